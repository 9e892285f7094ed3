//! Decoder implementations

use super::types::{RawRecord, RecordDecoder};
use crate::error::{Error, Result};
use serde_json::Value;
use std::path::Path;

// ============================================================================
// JSONL Decoder
// ============================================================================

/// JSON Lines decoder (one JSON object per line)
#[derive(Debug, Clone, Default)]
pub struct JsonlDecoder;

impl JsonlDecoder {
    /// Create a new JSONL decoder
    pub fn new() -> Self {
        Self
    }
}

impl RecordDecoder for JsonlDecoder {
    fn decode(&self, body: &str) -> Result<Vec<RawRecord>> {
        let mut records = Vec::new();

        for (line_num, line) in body.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let value: Value = serde_json::from_str(line).map_err(|e| {
                Error::decode(format!("Failed to parse JSONL at line {}: {e}", line_num + 1))
            })?;

            if !value.is_object() {
                return Err(Error::decode(format!(
                    "Expected a JSON object at line {}",
                    line_num + 1
                )));
            }

            records.push(RawRecord::new(line_num + 1, value));
        }

        Ok(records)
    }
}

// ============================================================================
// File Reader
// ============================================================================

/// Read every record of a file, in file order
///
/// Any failure, whether I/O or parsing, is reported as a read error for
/// `path`. The file is not retried.
pub fn read_records(path: &Path, decoder: &dyn RecordDecoder) -> Result<Vec<RawRecord>> {
    let body = std::fs::read_to_string(path).map_err(|e| Error::read(path, e.to_string()))?;

    let records = decoder.decode(&body).map_err(|e| Error::read(path, e.to_string()))?;

    tracing::debug!("Read {} records from {}", records.len(), path.display());

    Ok(records)
}
