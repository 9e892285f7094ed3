//! Per-file processors for the two record trees

use super::log::extract_plays;
use super::song::extract_song;
use crate::database::{DimensionResolver, Loader};
use crate::decode::RawRecord;
use crate::engine::{FileStats, RecordProcessor};
use crate::error::Result;
use crate::types::{Corpus, SongplayKeyStrategy};
use std::path::Path;

/// Loads one `Song` and one `Artist` row per song-metadata record
#[derive(Debug, Clone, Copy, Default)]
pub struct SongFileProcessor;

impl<S: Loader + ?Sized> RecordProcessor<S> for SongFileProcessor {
    fn corpus(&self) -> Corpus {
        Corpus::Songs
    }

    fn process(&self, session: &S, path: &Path, records: &[RawRecord]) -> Result<FileStats> {
        let mut stats = FileStats::new(records.len());

        for record in records {
            let (song, artist) = extract_song(path, record)?;
            session.upsert_song(&song)?;
            session.upsert_artist(&artist)?;
            stats.songs += 1;
            stats.artists += 1;
        }

        Ok(stats)
    }
}

/// Loads time, user and songplay rows for the play events of a log file
///
/// Rows are written as three passes over the events, in file order: every
/// time row, then every user row, then every songplay.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFileProcessor {
    key_strategy: SongplayKeyStrategy,
}

impl LogFileProcessor {
    /// Create a processor deriving songplay ids with `key_strategy`
    pub fn new(key_strategy: SongplayKeyStrategy) -> Self {
        Self { key_strategy }
    }
}

impl<S: Loader + DimensionResolver + ?Sized> RecordProcessor<S> for LogFileProcessor {
    fn corpus(&self) -> Corpus {
        Corpus::Logs
    }

    fn process(&self, session: &S, path: &Path, records: &[RawRecord]) -> Result<FileStats> {
        let extraction = extract_plays(path, records)?;
        let mut stats = FileStats::new(records.len());
        stats.skipped = extraction.skipped;

        for time in extraction.time_rows() {
            session.upsert_time(time)?;
            stats.times += 1;
        }

        for user in extraction.user_rows() {
            session.upsert_user(user)?;
            stats.users += 1;
        }

        for event in &extraction.events {
            let dimensions = match event.lookup() {
                Some((title, artist, length)) => session.resolve(title, artist, length)?,
                None => None,
            };
            if dimensions.is_some() {
                stats.resolved += 1;
            }

            session.insert_songplay(&event.to_songplay(self.key_strategy, dimensions))?;
            stats.songplays += 1;
        }

        Ok(stats)
    }
}
