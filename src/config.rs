//! Pipeline configuration
//!
//! Settings are layered: built-in defaults, then an optional YAML file, then
//! command-line flags (see [`crate::cli`]).
//!
//! ```yaml
//! database:
//!   path: sparkifydb.duckdb
//!   reset: false
//! song_data: data/song_data
//! log_data: data/log_data
//! extension: json
//! songplay_key: content_hash
//! ```

use crate::error::{Error, Result, ResultExt};
use crate::types::SongplayKeyStrategy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Target database
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Root of the song metadata tree
    #[serde(default = "default_song_data")]
    pub song_data: PathBuf,

    /// Root of the listening-event log tree
    #[serde(default = "default_log_data")]
    pub log_data: PathBuf,

    /// Extension of record files, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,

    /// How songplay ids are derived
    #[serde(default)]
    pub songplay_key: SongplayKeyStrategy,
}

fn default_song_data() -> PathBuf {
    PathBuf::from("data/song_data")
}

fn default_log_data() -> PathBuf {
    PathBuf::from("data/log_data")
}

fn default_extension() -> String {
    "json".to_string()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            song_data: default_song_data(),
            log_data: default_log_data(),
            extension: default_extension(),
            songplay_key: SongplayKeyStrategy::default(),
        }
    }
}

impl PipelineConfig {
    /// Parse a YAML document; missing keys take their defaults
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        if self.database.path.trim().is_empty() {
            return Err(Error::config("database.path must not be empty"));
        }
        if self.extension.is_empty() || self.extension.starts_with('.') {
            return Err(Error::config(format!(
                "extension must be a bare extension like 'json', got '{}'",
                self.extension
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Database Config
// ============================================================================

/// Target database settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// DuckDB file path, or `:memory:`
    #[serde(default = "default_database_path")]
    pub path: String,

    /// Drop and recreate all tables before loading
    #[serde(default)]
    pub reset: bool,
}

fn default_database_path() -> String {
    "sparkifydb.duckdb".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            reset: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.database.path, "sparkifydb.duckdb");
        assert!(!config.database.reset);
        assert_eq!(config.song_data, PathBuf::from("data/song_data"));
        assert_eq!(config.log_data, PathBuf::from("data/log_data"));
        assert_eq!(config.extension, "json");
        assert_eq!(config.songplay_key, SongplayKeyStrategy::ContentHash);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = PipelineConfig::from_yaml("{}").unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = r"
database:
  path: ':memory:'
log_data: /srv/logs
songplay_key: ordinal
";
        let config = PipelineConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.database.path, ":memory:");
        assert!(!config.database.reset);
        assert_eq!(config.log_data, PathBuf::from("/srv/logs"));
        assert_eq!(config.song_data, PathBuf::from("data/song_data"));
        assert_eq!(config.songplay_key, SongplayKeyStrategy::Ordinal);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = PipelineConfig::from_yaml("song_dir: x").unwrap_err();
        assert!(matches!(err, Error::YamlParse(_)));
    }

    #[test]
    fn test_extension_with_dot_rejected() {
        let err = PipelineConfig::from_yaml("extension: .json").unwrap_err();
        assert!(err.to_string().contains("bare extension"));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("etl.yaml");
        std::fs::write(&path, "database:\n  reset: true\n").unwrap();

        let config = PipelineConfig::from_file(&path).unwrap();
        assert!(config.database.reset);
        assert_eq!(config.database.path, "sparkifydb.duckdb");
    }

    #[test]
    fn test_from_missing_file() {
        let err = PipelineConfig::from_file("/nonexistent/etl.yaml").unwrap_err();
        assert!(err
            .to_string()
            .starts_with("Failed to read config file /nonexistent/etl.yaml: IO error:"));
    }
}
