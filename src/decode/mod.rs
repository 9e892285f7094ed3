//! Record decoder module
//!
//! Reads line-delimited JSON record files.
//!
//! # Overview
//!
//! The decode module turns one input file into an ordered list of raw
//! records. Each record keeps its 1-based line number so later stages can
//! point at the offending line when a record has the wrong shape.

mod decoders;
mod types;

pub use decoders::{read_records, JsonlDecoder};
pub use types::{RawRecord, RecordDecoder};
