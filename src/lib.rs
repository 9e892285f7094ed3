// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # Sparkify ETL
//!
//! Batch loader for song metadata and listening-event logs. Two trees of
//! line-delimited JSON files are loaded into a star schema: a `songplays`
//! fact table and the `songs`, `artists`, `time` and `users` dimensions.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sparkify_etl::{Pipeline, PipelineConfig, Result};
//!
//! fn main() -> Result<()> {
//!     let config = PipelineConfig::from_file("etl.yaml")?;
//!     let report = Pipeline::new(config).execute()?;
//!     println!("{} songplays loaded", report.totals().songplays);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │  Pipeline: song tree, then log tree, one DuckDB session        │
//! └────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────────────────────┴─────────────────────────────────┐
//! │  BatchEngine: discover → read → BEGIN → process → COMMIT       │
//! └────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────────────┴───────┬───────────┬─────────────┐
//! │  Decode  │  Extract                  │  Resolve  │  Load       │
//! ├──────────┼───────────────────────────┼───────────┼─────────────┤
//! │ JSONL    │ Song + Artist             │ title     │ songs       │
//! │          │ Time (epoch ms)           │ artist    │ artists     │
//! │          │ User + Songplay (NextSong)│ duration  │ time, users │
//! │          │                           │           │ songplays   │
//! └──────────┴───────────────────────────┴───────────┴─────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Shared enums
pub mod types;

/// Pipeline configuration
pub mod config;

/// Line-delimited JSON record reading
pub mod decode;

/// Star schema rows and statements
pub mod schema;

/// Record extraction and per-file processors
pub mod extract;

/// DuckDB session, loader and resolver
pub mod database;

/// Batch engine: discovery and per-file transactions
pub mod engine;

/// Song-then-log pipeline
pub mod pipeline;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{DatabaseConfig, PipelineConfig};
pub use error::{Error, Result};
pub use pipeline::{Pipeline, PipelineReport};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
