//! Source tree traversal

use hdlrefactor_core::error::{Result, ResultExt};
use std::path::{Path, PathBuf};
use tracing::trace;
use walkdir::WalkDir;

/// Files below `root` whose name matches `pattern`, in path order
///
/// A `root` that is itself a file is returned as is when it matches.
pub fn source_files(root: &Path, pattern: &glob::Pattern) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.context(format!("Failed to walk {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let matches = pattern.matches(&entry.file_name().to_string_lossy());
        if matches {
            files.push(entry.into_path());
        } else {
            trace!("Skipping {}", entry.path().display());
        }
    }

    Ok(files)
}
