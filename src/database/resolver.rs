//! Dimension lookups through the DuckDB session

use super::engine::DatabaseEngine;
use super::types::DimensionResolver;
use crate::error::Result;
use crate::schema::{DimensionKeys, RESOLVE_SONG_SQL};
use duckdb::params;

impl DimensionResolver for DatabaseEngine {
    fn resolve(
        &self,
        title: &str,
        artist_name: &str,
        duration: f64,
    ) -> Result<Option<DimensionKeys>> {
        let mut stmt = self.conn.prepare(RESOLVE_SONG_SQL)?;
        let mut rows = stmt.query(params![title, artist_name, duration])?;

        match rows.next()? {
            Some(row) => {
                let song_id: String = row.get(0)?;
                let artist_id: String = row.get(1)?;
                Ok(Some(DimensionKeys::new(song_id, artist_id)))
            }
            None => {
                tracing::trace!("No song matches '{title}' by '{artist_name}' ({duration})");
                Ok(None)
            }
        }
    }
}
