//! Log-event extraction

use super::time::decompose;
use crate::decode::RawRecord;
use crate::error::{Error, Result};
use crate::schema::{DimensionKeys, Songplay, TimeDimension, User};
use crate::types::SongplayKeyStrategy;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::path::Path;

/// `page` value marking a song play
pub const PLAY_PAGE: &str = "NextSong";

/// Fields of a play event that feed the schema
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayFields {
    ts: i64,
    #[serde(deserialize_with = "string_or_number")]
    user_id: String,
    first_name: Option<String>,
    last_name: Option<String>,
    gender: Option<String>,
    level: String,
    song: Option<String>,
    artist: Option<String>,
    length: Option<f64>,
    session_id: i64,
    item_in_session: Option<i64>,
    location: Option<String>,
    user_agent: Option<String>,
}

/// `userId` shows up both as "39" and 39
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, found {other}"
        ))),
    }
}

/// One play event ready to be loaded
#[derive(Debug, Clone, PartialEq)]
pub struct PlayEvent {
    /// 0-based position among the play events of the file
    pub ordinal: usize,
    /// 1-based source line
    pub line: usize,
    pub ts_millis: i64,
    pub time: TimeDimension,
    pub user: User,
    pub song: Option<String>,
    pub artist: Option<String>,
    pub length: Option<f64>,
    pub session_id: i64,
    /// Position of the event within its session
    pub item_in_session: Option<i64>,
    pub location: Option<String>,
    pub user_agent: Option<String>,
}

impl PlayEvent {
    /// Resolution inputs, when the event carries all three
    pub fn lookup(&self) -> Option<(&str, &str, f64)> {
        match (&self.song, &self.artist, self.length) {
            (Some(song), Some(artist), Some(length)) => Some((song, artist, length)),
            _ => None,
        }
    }

    /// Assemble the fact row for this event
    pub fn to_songplay(
        &self,
        strategy: SongplayKeyStrategy,
        dimensions: Option<DimensionKeys>,
    ) -> Songplay {
        Songplay {
            songplay_id: songplay_id(strategy, self),
            ordinal: self.ordinal,
            start_time: self.time.start_time,
            user_id: self.user.user_id.clone(),
            level: self.user.level.clone(),
            dimensions,
            session_id: self.session_id,
            location: self.location.clone(),
            user_agent: self.user_agent.clone(),
        }
    }
}

/// Play events of one log file plus the count of discarded records
#[derive(Debug, Clone, Default)]
pub struct PlayExtraction {
    pub events: Vec<PlayEvent>,
    /// Records whose `page` is not [`PLAY_PAGE`]
    pub skipped: usize,
}

impl PlayExtraction {
    /// Time rows in file order, duplicates included
    pub fn time_rows(&self) -> impl Iterator<Item = &TimeDimension> {
        self.events.iter().map(|e| &e.time)
    }

    /// User rows in file order, one per event
    pub fn user_rows(&self) -> impl Iterator<Item = &User> {
        self.events.iter().map(|e| &e.user)
    }
}

/// Keep the play events of a log file and decode their fields
///
/// Records with any other `page` (or none) are dropped without error. A play
/// event missing `ts`, `userId`, `level` or `sessionId` is an invalid record.
pub fn extract_plays(path: &Path, records: &[RawRecord]) -> Result<PlayExtraction> {
    let mut extraction = PlayExtraction::default();

    for record in records {
        if record.get_str("page") != Some(PLAY_PAGE) {
            extraction.skipped += 1;
            continue;
        }

        let fields = PlayFields::deserialize(&record.value)
            .map_err(|e| Error::invalid_record(path, record.line, e.to_string()))?;

        let time = decompose(fields.ts)
            .map_err(|e| Error::invalid_record(path, record.line, e.to_string()))?;

        let user = User {
            user_id: fields.user_id,
            first_name: fields.first_name,
            last_name: fields.last_name,
            gender: fields.gender,
            level: fields.level,
        };

        extraction.events.push(PlayEvent {
            ordinal: extraction.events.len(),
            line: record.line,
            ts_millis: fields.ts,
            time,
            user,
            song: fields.song,
            artist: fields.artist,
            length: fields.length,
            session_id: fields.session_id,
            item_in_session: fields.item_in_session,
            location: fields.location,
            user_agent: fields.user_agent,
        });
    }

    Ok(extraction)
}

/// Derive the `songplay_id` of an event
///
/// `ContentHash` hashes `"{ts}|{user_id}|{session_id}|{item_in_session}"`
/// with SHA-256 and keeps the first 16 bytes as hex, so the same event gets
/// the same id in any file and on any run. Without `itemInSession` the key
/// ends at the session id.
pub fn songplay_id(strategy: SongplayKeyStrategy, event: &PlayEvent) -> String {
    match strategy {
        SongplayKeyStrategy::Ordinal => event.ordinal.to_string(),
        SongplayKeyStrategy::ContentHash => {
            let mut key = format!(
                "{}|{}|{}",
                event.ts_millis, event.user.user_id, event.session_id
            );
            if let Some(item) = event.item_in_session {
                key.push_str(&format!("|{item}"));
            }
            hex::encode(&Sha256::digest(key.as_bytes())[..16])
        }
    }
}
