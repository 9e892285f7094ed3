//! Engine types
//!
//! Processor trait, per-file statistics and progress reporting for the
//! batch engine.

use crate::decode::RawRecord;
use crate::error::Result;
use crate::types::Corpus;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Turns the records of one file into writes against a session
pub trait RecordProcessor<S: ?Sized> {
    /// Which record tree this processor handles
    fn corpus(&self) -> Corpus;

    /// Extract and load every record of one file
    ///
    /// Runs inside the file's transaction. Any error aborts the file.
    fn process(&self, session: &S, path: &Path, records: &[RawRecord]) -> Result<FileStats>;
}

/// Counters for one processed file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FileStats {
    /// Records read from the file
    pub records: usize,
    /// Records discarded by filtering
    pub skipped: usize,
    pub songs: usize,
    pub artists: usize,
    pub times: usize,
    pub users: usize,
    pub songplays: usize,
    /// Songplays matched to a song and artist
    pub resolved: usize,
}

impl FileStats {
    /// Create new stats for a file with `records` records
    pub fn new(records: usize) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    /// Songplays that could not be matched
    pub fn unresolved(&self) -> usize {
        self.songplays - self.resolved
    }

    /// Add another file's counters
    pub fn merge(&mut self, other: &FileStats) {
        self.records += other.records;
        self.skipped += other.skipped;
        self.songs += other.songs;
        self.artists += other.artists;
        self.times += other.times;
        self.users += other.users;
        self.songplays += other.songplays;
        self.resolved += other.resolved;
    }
}

/// Outcome of one committed file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    /// 1-based position in discovery order
    pub index: usize,
    pub path: PathBuf,
    pub stats: FileStats,
}

/// Outcome of a whole record tree
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub corpus: Corpus,
    pub root: PathBuf,
    /// Files discovered under `root`
    pub files_found: usize,
    /// Committed files, in processing order
    pub files: Vec<FileReport>,
    pub duration: Duration,
}

impl BatchReport {
    /// Sum of all file counters
    pub fn totals(&self) -> FileStats {
        let mut totals = FileStats::default();
        for file in &self.files {
            totals.merge(&file.stats);
        }
        totals
    }
}

/// Receives progress of a batch run
pub trait ProgressSink: Send + Sync {
    /// Called once after discovery
    fn files_found(&self, corpus: Corpus, root: &Path, total: usize);

    /// Called after each file is committed
    fn file_processed(&self, index: usize, total: usize, path: &Path);
}

/// Progress reporting through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn files_found(&self, corpus: Corpus, root: &Path, total: usize) {
        tracing::info!(%corpus, "{} files found in {}", total, root.display());
    }

    fn file_processed(&self, index: usize, total: usize, path: &Path) {
        tracing::info!(file = %path.display(), "{}/{} files processed.", index, total);
    }
}
