//! CLI arguments

use crate::types::SongplayKeyStrategy;
use clap::Parser;
use std::path::PathBuf;

/// Load song metadata and listening logs into a star schema
#[derive(Parser, Debug)]
#[command(name = "sparkify-etl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long, env = "SPARKIFY_CONFIG")]
    pub config: Option<PathBuf>,

    /// DuckDB database file (":memory:" for a dry run)
    #[arg(short, long, env = "SPARKIFY_DATABASE")]
    pub database: Option<String>,

    /// Root directory of song metadata files
    #[arg(long, env = "SPARKIFY_SONG_DATA")]
    pub song_data: Option<PathBuf>,

    /// Root directory of listening-event log files
    #[arg(long, env = "SPARKIFY_LOG_DATA")]
    pub log_data: Option<PathBuf>,

    /// How songplay ids are derived
    #[arg(long, value_enum)]
    pub songplay_key: Option<SongplayKeyStrategy>,

    /// Drop and recreate all tables before loading
    #[arg(long)]
    pub reset: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
