//! Error types for the Sparkify loader
//!
//! This module defines the error hierarchy for the whole pipeline.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Dimension lookups that find nothing and artist fields that cannot be
//! NaN-tested are normal outcomes and never surface as errors.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// The main error type for the loader
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // ============================================================================
    // Extraction Errors
    // ============================================================================
    #[error("Failed to read '{}': {message}", .path.display())]
    Read { path: PathBuf, message: String },

    #[error("Invalid record at {}:{line}: {message}", .path.display())]
    InvalidRecord {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Failed to decode records: {message}")]
    Decode { message: String },

    #[error("Timestamp {millis}ms is out of range")]
    InvalidTimestamp { millis: i64 },

    // ============================================================================
    // Load Errors
    // ============================================================================
    #[error("Failed to load row into '{table}': {source} (row: {row})")]
    Load {
        table: &'static str,
        row: String,
        #[source]
        source: duckdb::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] duckdb::Error),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a read error for a file
    pub fn read(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Read {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an invalid record error (`line` is 1-based)
    pub fn invalid_record(
        path: impl AsRef<Path>,
        line: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidRecord {
            path: path.as_ref().to_path_buf(),
            line,
            message: message.into(),
        }
    }

    /// Create a load error carrying the rejected row
    pub fn load<R: serde::Serialize>(table: &'static str, row: &R, source: duckdb::Error) -> Self {
        let row =
            serde_json::to_string(row).unwrap_or_else(|e| format!("<unserializable: {e}>"));
        Self::Load { table, row, source }
    }
}

/// Result type alias for the loader
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
