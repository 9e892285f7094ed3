//! Tests for engine module

use super::*;
use crate::decode::RawRecord;
use crate::error::Error;
use crate::types::Corpus;
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

// ============================================================================
// Fixtures
// ============================================================================

/// Session that only records transaction calls
#[derive(Default)]
struct RecordingSession {
    calls: RefCell<Vec<String>>,
    reject_commit: bool,
}

impl RecordingSession {
    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl Transactional for RecordingSession {
    fn begin(&self) -> Result<()> {
        self.calls.borrow_mut().push("begin".to_string());
        Ok(())
    }

    fn commit(&self) -> Result<()> {
        self.calls.borrow_mut().push("commit".to_string());
        if self.reject_commit {
            return Err(Error::Other("commit rejected".to_string()));
        }
        Ok(())
    }

    fn rollback(&self) -> Result<()> {
        self.calls.borrow_mut().push("rollback".to_string());
        Ok(())
    }
}

/// Counts records and fails on any record with `"fail": true`
struct CountingProcessor;

impl RecordProcessor<RecordingSession> for CountingProcessor {
    fn corpus(&self) -> Corpus {
        Corpus::Songs
    }

    fn process(
        &self,
        session: &RecordingSession,
        path: &Path,
        records: &[RawRecord],
    ) -> Result<FileStats> {
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        session.calls.borrow_mut().push(format!("process {name}"));

        if let Some(bad) = records.iter().find(|r| r.value["fail"] == true) {
            return Err(Error::invalid_record(path, bad.line, "boom"));
        }

        let mut stats = FileStats::new(records.len());
        stats.songs = records.len();
        Ok(stats)
    }
}

#[derive(Default)]
struct RecordingProgress {
    lines: Mutex<Vec<String>>,
}

impl ProgressSink for RecordingProgress {
    fn files_found(&self, corpus: Corpus, _root: &Path, total: usize) {
        self.lines
            .lock()
            .unwrap()
            .push(format!("{corpus}: {total} files found"));
    }

    fn file_processed(&self, index: usize, total: usize, _path: &Path) {
        self.lines
            .lock()
            .unwrap()
            .push(format!("{index}/{total} files processed."));
    }
}

fn write(root: &Path, relative: &str, body: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, body).unwrap();
    path
}

// ============================================================================
// Discovery Tests
// ============================================================================

#[test]
fn test_discover_files_recursive_and_sorted() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "b/2.json", "{}");
    write(dir.path(), "a/x/1.json", "{}");
    write(dir.path(), "a/0.json", "{}");
    write(dir.path(), "c.json", "{}");

    let files = discover_files(dir.path(), "json").unwrap();
    let relative: Vec<String> = files
        .iter()
        .map(|p| {
            p.strip_prefix(dir.path())
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();

    assert_eq!(relative, vec!["a/0.json", "a/x/1.json", "b/2.json", "c.json"]);
}

#[test]
fn test_discover_files_filters_extension() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "keep.json", "{}");
    write(dir.path(), "skip.txt", "{}");
    write(dir.path(), "skip.json.bak", "{}");
    write(dir.path(), ".ipynb_checkpoints/keep-checkpoint.json", "{}");

    let files = discover_files(dir.path(), "json").unwrap();
    assert_eq!(files.len(), 2);
    assert!(files.iter().all(|p| p.extension().unwrap() == "json"));
}

#[test]
fn test_discover_files_missing_root() {
    let dir = tempfile::tempdir().unwrap();
    let err = discover_files(&dir.path().join("nope"), "json").unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
}

// ============================================================================
// Batch Run Tests
// ============================================================================

#[test]
fn test_run_commits_each_file_and_reports_progress() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.json", "{\"id\": 1}\n{\"id\": 2}\n");
    write(dir.path(), "b.json", "{\"id\": 3}\n");

    let progress = Arc::new(RecordingProgress::default());
    let engine = BatchEngine::new().with_progress(progress.clone());
    let session = RecordingSession::default();

    let report = engine
        .run(&session, dir.path(), "json", &CountingProcessor)
        .unwrap();

    assert_eq!(
        session.calls(),
        vec![
            "begin",
            "process a.json",
            "commit",
            "begin",
            "process b.json",
            "commit"
        ]
    );
    assert_eq!(
        *progress.lines.lock().unwrap(),
        vec![
            "songs: 2 files found",
            "1/2 files processed.",
            "2/2 files processed."
        ]
    );

    assert_eq!(report.files_found, 2);
    assert_eq!(report.files.len(), 2);
    assert_eq!(report.files[0].index, 1);
    assert_eq!(report.files[1].stats.records, 1);
    assert_eq!(report.totals().records, 3);
    assert_eq!(report.totals().songs, 3);
}

#[test]
fn test_run_stops_at_failing_file() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "1.json", "{\"id\": 1}\n");
    write(dir.path(), "2.json", "{\"id\": 2}\n{\"fail\": true}\n");
    write(dir.path(), "3.json", "{\"id\": 3}\n");

    let engine = BatchEngine::new().with_progress(Arc::new(RecordingProgress::default()));
    let session = RecordingSession::default();

    let err = engine
        .run(&session, dir.path(), "json", &CountingProcessor)
        .unwrap_err();

    match err {
        Error::InvalidRecord { path, line, .. } => {
            assert!(path.ends_with("2.json"));
            assert_eq!(line, 2);
        }
        other => panic!("unexpected error: {other:?}"),
    }

    assert_eq!(
        session.calls(),
        vec![
            "begin",
            "process 1.json",
            "commit",
            "begin",
            "process 2.json",
            "rollback"
        ]
    );
}

#[test]
fn test_run_failed_commit_rolls_back() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "1.json", "{\"id\": 1}\n");
    write(dir.path(), "2.json", "{\"id\": 2}\n");

    let progress = Arc::new(RecordingProgress::default());
    let engine = BatchEngine::new().with_progress(progress.clone());
    let session = RecordingSession {
        reject_commit: true,
        ..RecordingSession::default()
    };

    let err = engine
        .run(&session, dir.path(), "json", &CountingProcessor)
        .unwrap_err();

    assert_eq!(err.to_string(), "commit rejected");
    assert_eq!(
        session.calls(),
        vec!["begin", "process 1.json", "commit", "rollback"]
    );
    assert_eq!(*progress.lines.lock().unwrap(), vec!["songs: 2 files found"]);
}

#[test]
fn test_run_read_error_aborts_before_transaction() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "1.json", "{\"id\": 1}\n");
    write(dir.path(), "2.json", "{\"id\": \n");

    let engine = BatchEngine::new().with_progress(Arc::new(RecordingProgress::default()));
    let session = RecordingSession::default();

    let err = engine
        .run(&session, dir.path(), "json", &CountingProcessor)
        .unwrap_err();

    assert!(matches!(err, Error::Read { .. }));
    assert_eq!(session.calls(), vec!["begin", "process 1.json", "commit"]);
}

#[test]
fn test_run_empty_tree() {
    let dir = tempfile::tempdir().unwrap();
    let progress = Arc::new(RecordingProgress::default());
    let engine = BatchEngine::new().with_progress(progress.clone());
    let session = RecordingSession::default();

    let report = engine
        .run(&session, dir.path(), "json", &CountingProcessor)
        .unwrap();

    assert_eq!(report.files_found, 0);
    assert!(report.files.is_empty());
    assert!(session.calls().is_empty());
    assert_eq!(*progress.lines.lock().unwrap(), vec!["songs: 0 files found"]);
}

// ============================================================================
// Stats Tests
// ============================================================================

#[test]
fn test_file_stats_merge_and_unresolved() {
    let mut a = FileStats::new(3);
    a.songplays = 2;
    a.resolved = 1;

    let mut b = FileStats::new(4);
    b.skipped = 1;
    b.songplays = 3;
    b.resolved = 3;

    a.merge(&b);
    assert_eq!(a.records, 7);
    assert_eq!(a.skipped, 1);
    assert_eq!(a.songplays, 5);
    assert_eq!(a.unresolved(), 1);
}
