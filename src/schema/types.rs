//! Row types for the star schema

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp format used when binding `start_time` values
pub(crate) const SQL_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Song dimension row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub song_id: String,
    pub title: String,
    pub artist_id: String,
    pub year: i32,
    pub duration: f64,
}

/// Artist dimension row
///
/// Every attribute is text. Attributes missing from the source record are
/// stored as empty strings rather than nulls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub artist_id: String,
    pub name: String,
    pub location: String,
    pub latitude: String,
    pub longitude: String,
}

/// Time dimension row, one per distinct event instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeDimension {
    pub start_time: NaiveDateTime,
    /// 0-23
    pub hour: u32,
    /// Day of month, 1-31
    pub day: u32,
    /// ISO week number
    pub week: u32,
    /// 1-12
    pub month: u32,
    pub year: i32,
    /// ISO weekday, Monday = 1
    pub weekday: u32,
}

impl TimeDimension {
    /// `start_time` rendered for a `CAST(? AS TIMESTAMP)` parameter
    pub fn start_time_sql(&self) -> String {
        self.start_time.format(SQL_TIMESTAMP_FORMAT).to_string()
    }
}

/// User dimension row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub level: String,
}

/// Identifier pair found by dimension resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionKeys {
    pub song_id: String,
    pub artist_id: String,
}

impl DimensionKeys {
    /// Create a new identifier pair
    pub fn new(song_id: impl Into<String>, artist_id: impl Into<String>) -> Self {
        Self {
            song_id: song_id.into(),
            artist_id: artist_id.into(),
        }
    }
}

/// Songplay fact row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Songplay {
    pub songplay_id: String,
    /// 0-based position among the play events of the source file
    pub ordinal: usize,
    pub start_time: NaiveDateTime,
    pub user_id: String,
    pub level: String,
    /// Song and artist ids, present together or not at all
    #[serde(flatten)]
    pub dimensions: Option<DimensionKeys>,
    pub session_id: i64,
    pub location: Option<String>,
    pub user_agent: Option<String>,
}

impl Songplay {
    pub fn song_id(&self) -> Option<&str> {
        self.dimensions.as_ref().map(|d| d.song_id.as_str())
    }

    pub fn artist_id(&self) -> Option<&str> {
        self.dimensions.as_ref().map(|d| d.artist_id.as_str())
    }

    /// Whether the play was matched to a loaded song and artist
    pub fn is_resolved(&self) -> bool {
        self.dimensions.is_some()
    }

    /// `start_time` rendered for a `CAST(? AS TIMESTAMP)` parameter
    pub fn start_time_sql(&self) -> String {
        self.start_time.format(SQL_TIMESTAMP_FORMAT).to_string()
    }
}
