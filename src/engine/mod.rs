//! Batch engine module
//!
//! Walks a record tree and loads it one file per transaction.
//!
//! # Overview
//!
//! The engine module provides:
//! - `BatchEngine` - discovery, per-file transactions and progress
//! - `RecordProcessor` - the per-file extraction step it drives
//! - `BatchReport` / `FileStats` - what got loaded

mod discover;
mod types;

pub use discover::discover_files;
pub use types::{
    BatchReport, FileReport, FileStats, ProgressSink, RecordProcessor, TracingProgress,
};

use crate::database::Transactional;
use crate::decode::{read_records, JsonlDecoder, RecordDecoder};
use crate::error::Result;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Batch engine for loading a tree of record files
pub struct BatchEngine {
    /// Decoder for file bodies
    decoder: Box<dyn RecordDecoder>,
    /// Progress receiver
    progress: Arc<dyn ProgressSink>,
}

impl Default for BatchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchEngine {
    /// Create a batch engine reading JSON Lines files
    pub fn new() -> Self {
        Self {
            decoder: Box::new(JsonlDecoder::new()),
            progress: Arc::new(TracingProgress),
        }
    }

    /// Set the progress receiver
    #[must_use]
    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    /// Load every file under `root` with `processor`
    ///
    /// Each file is read, processed and committed before the next one is
    /// touched. A failed process or commit rolls back the current file and
    /// stops the run; files committed before it stay committed.
    pub fn run<S, P>(
        &self,
        session: &S,
        root: &Path,
        extension: &str,
        processor: &P,
    ) -> Result<BatchReport>
    where
        S: Transactional + ?Sized,
        P: RecordProcessor<S> + ?Sized,
    {
        let start = Instant::now();
        let corpus = processor.corpus();
        let files = discover_files(root, extension)?;
        let total = files.len();

        self.progress.files_found(corpus, root, total);

        let mut reports = Vec::with_capacity(total);

        for (i, path) in files.iter().enumerate() {
            let index = i + 1;
            let records = read_records(path, self.decoder.as_ref())?;

            session.begin()?;
            let outcome = processor
                .process(session, path, &records)
                .and_then(|stats| session.commit().map(|()| stats));
            let stats = match outcome {
                Ok(stats) => stats,
                Err(e) => {
                    if let Err(rollback_err) = session.rollback() {
                        tracing::warn!(
                            "Rollback of {} failed: {}",
                            path.display(),
                            rollback_err
                        );
                    }
                    return Err(e);
                }
            };

            tracing::debug!(?stats, "Committed {}", path.display());
            self.progress.file_processed(index, total, path);

            reports.push(FileReport {
                index,
                path: path.clone(),
                stats,
            });
        }

        Ok(BatchReport {
            corpus,
            root: root.to_path_buf(),
            files_found: total,
            files: reports,
            duration: start.elapsed(),
        })
    }
}

#[cfg(test)]
mod tests;
