//! Directory listing for category directories.

use crate::error::{CcsettingError, Result};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Options for [`list_files`].
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkOptions {
    /// Descend into nested directories instead of listing immediate children only.
    pub recursive: bool,
    /// Required file name suffix, e.g. `.md`. Empty matches every file.
    pub suffix: &'static str,
}

impl WalkOptions {
    pub fn flat() -> Self {
        Self::default()
    }

    pub fn recursive() -> Self {
        Self {
            recursive: true,
            ..Self::default()
        }
    }

    pub fn with_suffix(mut self, suffix: &'static str) -> Self {
        self.suffix = suffix;
        self
    }

    fn matches(&self, entry: &DirEntry) -> bool {
        entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(self.suffix))
    }
}

/// List files below `root` whose name ends with the configured suffix.
///
/// A missing `root` yields an empty list. Entries come back sorted by file name
/// within each directory. Symbolic links are followed; a link that points back to
/// one of its ancestors is skipped.
pub fn list_files(root: &Path, options: &WalkOptions) -> Result<Vec<PathBuf>> {
    let max_depth = if options.recursive { usize::MAX } else { 1 };
    let mut files = Vec::new();
    for entry in walk(root, max_depth)? {
        if entry.file_type().is_file() && options.matches(&entry) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// List the immediate subdirectories of `root`. A missing `root` yields an empty list.
pub fn list_dirs(root: &Path) -> Result<Vec<PathBuf>> {
    Ok(walk(root, 1)?
        .into_iter()
        .filter(|entry| entry.file_type().is_dir())
        .map(DirEntry::into_path)
        .collect())
}

fn walk(root: &Path, max_depth: usize) -> Result<Vec<DirEntry>> {
    if !root.is_dir() {
        debug!(path = %root.display(), "directory absent, nothing to list");
        return Ok(Vec::new());
    }

    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(true)
        .sort_by_file_name();

    let mut entries = Vec::new();
    for entry in walker {
        match entry {
            Ok(entry) => entries.push(entry),
            Err(err) => {
                if let Some(ancestor) = err.loop_ancestor() {
                    warn!(
                        path = %err.path().unwrap_or(root).display(),
                        ancestor = %ancestor.display(),
                        "skipping symlink cycle"
                    );
                    continue;
                }
                if err
                    .io_error()
                    .is_some_and(|io_err| io_err.kind() == io::ErrorKind::NotFound)
                {
                    debug!(
                        path = %err.path().unwrap_or(root).display(),
                        "skipping dangling link"
                    );
                    continue;
                }
                return Err(walk_error(root, err));
            }
        }
    }
    Ok(entries)
}

fn walk_error(root: &Path, err: walkdir::Error) -> CcsettingError {
    let path = err.path().unwrap_or(root).to_path_buf();
    let message = err.to_string();
    match err.into_io_error() {
        Some(source) => CcsettingError::read(path, source),
        None => CcsettingError::Walk { path, message },
    }
}
