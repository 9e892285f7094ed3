//! Database support via DuckDB
//!
//! This module owns the session handle the pipeline writes through. The
//! traits in `types` are the seams the extractors and the batch engine use,
//! so they can run against any store that offers upserts, lookups and
//! per-file transactions.

mod engine;
mod loader;
mod resolver;
mod types;

pub use engine::DatabaseEngine;
pub use types::{DimensionResolver, Loader, Session, TableCounts, Transactional};
