//! CLI module
//!
//! Command-line interface for running the loader.
//!
//! Running `sparkify-etl` with no arguments loads `data/song_data` and
//! `data/log_data` into `sparkifydb.duckdb`. Flags override the defaults and
//! any YAML config file.

mod commands;
mod runner;

pub use commands::Cli;
pub use runner::Runner;
