//! CLI runner - resolves configuration and runs the pipeline

use crate::cli::commands::Cli;
use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::pipeline::{Pipeline, PipelineReport};
use std::time::Instant;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the loader
    pub async fn run(&self) -> Result<PipelineReport> {
        let config = self.resolve_config()?;
        let start = Instant::now();

        tracing::info!(
            database = %config.database.path,
            songplay_key = %config.songplay_key,
            "Starting load"
        );

        // DuckDB calls block; keep them off the async workers.
        let pipeline = Pipeline::new(config);
        let report = tokio::task::spawn_blocking(move || pipeline.execute())
            .await
            .map_err(|e| Error::Other(format!("Pipeline task failed: {e}")))??;

        Self::log_summary(&report, start);

        Ok(report)
    }

    /// Defaults, then the config file, then flags
    pub fn resolve_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.cli.config {
            Some(path) => PipelineConfig::from_file(path)?,
            None => PipelineConfig::default(),
        };

        if let Some(database) = &self.cli.database {
            config.database.path.clone_from(database);
        }
        if let Some(song_data) = &self.cli.song_data {
            config.song_data.clone_from(song_data);
        }
        if let Some(log_data) = &self.cli.log_data {
            config.log_data.clone_from(log_data);
        }
        if let Some(strategy) = self.cli.songplay_key {
            config.songplay_key = strategy;
        }
        if self.cli.reset {
            config.database.reset = true;
        }

        config.validate()?;
        Ok(config)
    }

    fn log_summary(report: &PipelineReport, start: Instant) {
        let totals = report.totals();

        tracing::info!(
            song_files = report.songs.files.len(),
            log_files = report.logs.files.len(),
            records = totals.records,
            skipped = totals.skipped,
            songplays = totals.songplays,
            resolved = totals.resolved,
            "Load complete in {:.2}s",
            start.elapsed().as_secs_f64()
        );

        if let Some(counts) = &report.table_counts {
            tracing::info!("Table rows: {counts}");
        }
    }
}
