//! Pipeline entry point
//!
//! Loads the song tree, then the log tree, through one session. Log
//! processing resolves plays against the songs and artists loaded by the
//! first pass, so the order is fixed.

use crate::config::PipelineConfig;
use crate::database::{DatabaseEngine, Session, TableCounts};
use crate::engine::{BatchEngine, BatchReport, FileStats, ProgressSink};
use crate::error::Result;
use crate::extract::{LogFileProcessor, SongFileProcessor};
use serde::Serialize;
use std::sync::Arc;

/// Outcome of a full pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub songs: BatchReport,
    pub logs: BatchReport,
    /// Row counts after loading, when taken
    pub table_counts: Option<TableCounts>,
}

impl PipelineReport {
    /// Counters summed over both trees
    pub fn totals(&self) -> FileStats {
        let mut totals = self.songs.totals();
        totals.merge(&self.logs.totals());
        totals
    }
}

/// Song-then-log load over a session
pub struct Pipeline {
    config: PipelineConfig,
    engine: BatchEngine,
}

impl Pipeline {
    /// Create a pipeline for `config`
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            engine: BatchEngine::new(),
        }
    }

    /// Set the progress receiver
    #[must_use]
    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.engine = self.engine.with_progress(progress);
        self
    }

    /// Load both trees through `session`
    pub fn run<S: Session + ?Sized>(&self, session: &S) -> Result<PipelineReport> {
        let songs = self.engine.run(
            session,
            &self.config.song_data,
            &self.config.extension,
            &SongFileProcessor,
        )?;

        let logs = self.engine.run(
            session,
            &self.config.log_data,
            &self.config.extension,
            &LogFileProcessor::new(self.config.songplay_key),
        )?;

        Ok(PipelineReport {
            songs,
            logs,
            table_counts: None,
        })
    }

    /// Open the configured database, prepare the schema and load both trees
    ///
    /// The connection is closed when this returns.
    pub fn execute(&self) -> Result<PipelineReport> {
        let database = DatabaseEngine::open(&self.config.database)?;

        if self.config.database.reset {
            database.reset_schema()?;
        } else {
            database.create_schema()?;
        }

        let mut report = self.run(&database)?;
        report.table_counts = Some(database.table_counts()?);

        Ok(report)
    }
}
