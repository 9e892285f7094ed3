//! Input file discovery

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Find every file under `root` with the given extension, recursively
///
/// Entries are visited in file-name order within each directory, so the
/// result is stable between runs. The extension is matched without its dot
/// and case-sensitively.
pub fn discover_files(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(Error::config(format!(
            "Data directory not found: {}",
            root.display()
        )));
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            Error::read(path, e.to_string())
        })?;

        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == extension)
        {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}
