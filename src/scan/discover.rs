//! Catalog document discovery under an extracted archive tree.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use super::ScanError;

/// Recursively finds files under `root` whose extension is `extension`.
///
/// Matching is case-insensitive and a leading `.` in `extension` is
/// ignored. Hidden files and directories are skipped, as are entries that
/// cannot be read (logged at `warn`). The result is sorted so repeated
/// scans of the same tree visit documents in the same order.
///
/// # Errors
///
/// Returns [`ScanError::PathNotFound`] or [`ScanError::NotADirectory`] when
/// `root` is unusable.
#[tracing::instrument(fields(root = %root.display()))]
pub fn discover_documents(root: &Path, extension: &str) -> Result<Vec<PathBuf>, ScanError> {
    if !root.exists() {
        return Err(ScanError::PathNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let extension = extension.trim_start_matches('.');
    let mut documents = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

    for entry in walker {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && has_extension(entry.path(), extension) {
                    documents.push(entry.into_path());
                }
            }
            Err(err) => {
                warn!(error = %err, "Skipping unreadable corpus entry");
            }
        }
    }

    documents.sort();
    debug!(documents = documents.len(), "Corpus discovery complete");
    Ok(documents)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}
