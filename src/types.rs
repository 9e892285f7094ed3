//! Common types used throughout the loader
//!
//! Small enums shared across modules.

use serde::{Deserialize, Serialize};

// ============================================================================
// Songplay Key Strategy
// ============================================================================

/// How `songplay_id` is derived for a fact row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum SongplayKeyStrategy {
    /// Hash of timestamp, user and session; stable across files and re-runs
    #[default]
    ContentHash,
    /// Position of the event within its file. Collides across files.
    Ordinal,
}

impl std::fmt::Display for SongplayKeyStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SongplayKeyStrategy::ContentHash => write!(f, "content_hash"),
            SongplayKeyStrategy::Ordinal => write!(f, "ordinal"),
        }
    }
}

// ============================================================================
// Corpus Kind
// ============================================================================

/// The two record trees the pipeline loads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corpus {
    /// Song metadata files
    Songs,
    /// Listening-event log files
    Logs,
}

impl std::fmt::Display for Corpus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Corpus::Songs => write!(f, "songs"),
            Corpus::Logs => write!(f, "logs"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_songplay_key_strategy_serde() {
        let strategy: SongplayKeyStrategy = serde_json::from_str("\"ordinal\"").unwrap();
        assert_eq!(strategy, SongplayKeyStrategy::Ordinal);

        let json = serde_json::to_string(&SongplayKeyStrategy::ContentHash).unwrap();
        assert_eq!(json, "\"content_hash\"");
        assert_eq!(SongplayKeyStrategy::default(), SongplayKeyStrategy::ContentHash);
    }

    #[test]
    fn test_display() {
        assert_eq!(SongplayKeyStrategy::Ordinal.to_string(), "ordinal");
        assert_eq!(Corpus::Logs.to_string(), "logs");
    }
}
