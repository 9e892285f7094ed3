//! Record extraction module
//!
//! Maps raw song-metadata and log-event records onto star schema rows.
//!
//! # Overview
//!
//! - `normalize` - missing-value coercion for artist attributes
//! - `song` - song metadata record to `Song` + `Artist`
//! - `time` - epoch milliseconds to a `TimeDimension` row
//! - `log` - play-event filtering, `User` rows and `Songplay` assembly
//! - `processors` - per-file processors that push extracted rows to a loader

mod log;
mod normalize;
mod processors;
mod song;
mod time;

pub use log::{extract_plays, songplay_id, PlayEvent, PlayExtraction, PLAY_PAGE};
pub use normalize::FieldValue;
pub use processors::{LogFileProcessor, SongFileProcessor};
pub use song::extract_song;
pub use time::decompose;
