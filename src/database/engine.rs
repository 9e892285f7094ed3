//! DuckDB-backed session
//!
//! Holds the single connection the pipeline loads through, plus schema
//! bootstrap and transaction control.

use super::types::{TableCounts, Transactional};
use crate::config::DatabaseConfig;
use crate::error::{Error, Result};
use crate::schema::{TableDef, ALL_TABLES, ARTISTS, SONGPLAYS, SONGS, TIME, USERS};
use duckdb::Connection;

/// Path that opens a throwaway in-memory database
pub const IN_MEMORY: &str = ":memory:";

/// Database session using DuckDB
pub struct DatabaseEngine {
    /// DuckDB connection
    pub(super) conn: Connection,
    /// Database path (for logging)
    path: String,
}

impl DatabaseEngine {
    /// Open the configured database, creating the file if needed
    pub fn open(config: &DatabaseConfig) -> Result<Self> {
        let conn = if config.path == IN_MEMORY {
            Connection::open_in_memory()
        } else {
            Connection::open(&config.path)
        }
        .map_err(|e| {
            Error::config(format!(
                "Failed to open DuckDB database '{}': {e}",
                config.path
            ))
        })?;

        tracing::debug!("Opened DuckDB database at {}", config.path);

        Ok(Self {
            conn,
            path: config.path.clone(),
        })
    }

    /// Open an in-memory database
    pub fn open_in_memory() -> Result<Self> {
        Self::open(&DatabaseConfig {
            path: IN_MEMORY.to_string(),
            ..DatabaseConfig::default()
        })
    }

    /// Create any missing table of the star schema
    pub fn create_schema(&self) -> Result<()> {
        for table in ALL_TABLES {
            self.conn.execute_batch(table.create_sql).map_err(|e| {
                Error::config(format!("Failed to create table '{}': {e}", table.name))
            })?;
        }
        Ok(())
    }

    /// Drop every table and create the schema again
    pub fn reset_schema(&self) -> Result<()> {
        for table in ALL_TABLES.iter().rev() {
            self.conn.execute_batch(table.drop_sql).map_err(|e| {
                Error::config(format!("Failed to drop table '{}': {e}", table.name))
            })?;
        }
        tracing::info!("Dropped existing tables in {}", self.path);
        self.create_schema()
    }

    /// Number of rows in a table
    pub fn count_rows(&self, table: &TableDef) -> Result<usize> {
        let sql = format!("SELECT COUNT(*) FROM \"{}\"", table.name);
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Row counts of all tables
    pub fn table_counts(&self) -> Result<TableCounts> {
        Ok(TableCounts {
            songs: self.count_rows(&SONGS)?,
            artists: self.count_rows(&ARTISTS)?,
            time: self.count_rows(&TIME)?,
            users: self.count_rows(&USERS)?,
            songplays: self.count_rows(&SONGPLAYS)?,
        })
    }

    /// Raw connection, for ad-hoc queries
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Database path
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Transactional for DatabaseEngine {
    fn begin(&self) -> Result<()> {
        self.conn.execute_batch("BEGIN TRANSACTION")?;
        Ok(())
    }

    fn commit(&self) -> Result<()> {
        self.conn.execute_batch("COMMIT")?;
        Ok(())
    }

    fn rollback(&self) -> Result<()> {
        self.conn.execute_batch("ROLLBACK")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Loader;
    use crate::schema::{Song, User};

    fn song(id: &str) -> Song {
        Song {
            song_id: id.to_string(),
            title: "Test".to_string(),
            artist_id: "ARAAA".to_string(),
            year: 2000,
            duration: 200.5,
        }
    }

    #[test]
    fn test_create_schema_is_idempotent() {
        let engine = DatabaseEngine::open_in_memory().unwrap();
        engine.create_schema().unwrap();
        engine.create_schema().unwrap();

        assert_eq!(engine.table_counts().unwrap(), TableCounts::default());
    }

    #[test]
    fn test_reset_schema_drops_rows() {
        let engine = DatabaseEngine::open_in_memory().unwrap();
        engine.create_schema().unwrap();
        engine.upsert_song(&song("SOAAA")).unwrap();
        assert_eq!(engine.count_rows(&SONGS).unwrap(), 1);

        engine.reset_schema().unwrap();
        assert_eq!(engine.count_rows(&SONGS).unwrap(), 0);
    }

    #[test]
    fn test_commit_persists_writes() {
        let engine = DatabaseEngine::open_in_memory().unwrap();
        engine.create_schema().unwrap();

        engine.begin().unwrap();
        engine.upsert_song(&song("SOAAA")).unwrap();
        engine.commit().unwrap();

        assert_eq!(engine.count_rows(&SONGS).unwrap(), 1);
    }

    #[test]
    fn test_rollback_discards_writes() {
        let engine = DatabaseEngine::open_in_memory().unwrap();
        engine.create_schema().unwrap();

        engine.begin().unwrap();
        engine.upsert_song(&song("SOAAA")).unwrap();
        engine
            .upsert_user(&User {
                user_id: "39".to_string(),
                first_name: None,
                last_name: None,
                gender: None,
                level: "free".to_string(),
            })
            .unwrap();
        engine.rollback().unwrap();

        let counts = engine.table_counts().unwrap();
        assert_eq!(counts.songs, 0);
        assert_eq!(counts.users, 0);
    }

    #[test]
    fn test_file_database_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            path: dir.path().join("test.duckdb").to_string_lossy().to_string(),
            ..DatabaseConfig::default()
        };

        {
            let engine = DatabaseEngine::open(&config).unwrap();
            engine.create_schema().unwrap();
            engine.upsert_song(&song("SOAAA")).unwrap();
        }

        let engine = DatabaseEngine::open(&config).unwrap();
        assert_eq!(engine.count_rows(&SONGS).unwrap(), 1);
        assert_eq!(engine.path(), config.path);
    }

    #[test]
    fn test_open_bad_path_is_config_error() {
        let config = DatabaseConfig {
            path: "/nonexistent-dir/for/sure/test.duckdb".to_string(),
            ..DatabaseConfig::default()
        };
        let err = DatabaseEngine::open(&config).err().unwrap();
        assert!(matches!(err, Error::Config { .. }));
    }
}
