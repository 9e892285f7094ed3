//! Decoder types and traits
//!
//! Defines the core decoder abstractions.

use crate::error::Result;
use serde_json::Value;

/// One decoded record together with its position in the source file
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// 1-based line number in the source file
    pub line: usize,
    /// Parsed JSON value
    pub value: Value,
}

impl RawRecord {
    /// Create a new raw record
    pub fn new(line: usize, value: Value) -> Self {
        Self { line, value }
    }

    /// Get a field of an object record
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.value.get(field)
    }

    /// Get a string field of an object record
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.value.get(field).and_then(Value::as_str)
    }
}

/// Trait for decoding file contents into records
pub trait RecordDecoder: Send + Sync {
    /// Decode the file body into records, preserving file order
    fn decode(&self, body: &str) -> Result<Vec<RawRecord>>;
}
