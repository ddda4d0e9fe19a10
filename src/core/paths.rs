//! Path utilities
//!
//! Resolves configured targets against the root and expands directory
//! targets into the markdown files they contain.

use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::core::model::FormatError;

/// File extension picked up when a target is a directory
const MARKDOWN_EXTENSION: &str = "md";

/// A file to format, with the name used when reporting it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Path on disk
    pub path: PathBuf,
    /// Path shown in output, relative to root when possible
    pub display: String,
}

/// A directory entry that could not be traversed
#[derive(Debug)]
pub struct Unreadable {
    /// Path shown in output
    pub display: String,
    pub error: FormatError,
}

/// One resolved entry of the target list
pub type Resolved = Result<Target, Unreadable>;

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Make a path relative to the root directory
pub fn make_relative(path: &Path, root: &Path) -> Option<String> {
    path.strip_prefix(root).ok().map(normalize_path)
}

fn display_name(path: &Path, root: &Path) -> String {
    make_relative(path, root)
        .filter(|relative| !relative.is_empty())
        .unwrap_or_else(|| normalize_path(path))
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(MARKDOWN_EXTENSION))
        .unwrap_or(false)
}

/// Resolve targets in order.
///
/// Relative entries are joined onto `root`. A directory expands to every
/// markdown file below it, sorted by path, following symlinks. Anything else,
/// including paths that do not exist, is passed through so the formatter can
/// report it. Traversal errors are kept in place as [`Unreadable`] entries.
pub fn expand_targets(root: &Path, entries: &[PathBuf]) -> Vec<Resolved> {
    let mut resolved = Vec::new();

    for entry in entries {
        let path = if entry.is_absolute() {
            entry.clone()
        } else {
            root.join(entry)
        };

        if !path.is_dir() {
            resolved.push(Ok(Target {
                display: display_name(&path, root),
                path,
            }));
            continue;
        }

        let mut found = Vec::new();
        for item in WalkDir::new(&path).follow_links(true) {
            match item {
                Ok(e) if e.file_type().is_file() && is_markdown(e.path()) => {
                    found.push(Ok(e.into_path()));
                }
                Ok(_) => {}
                Err(err) => {
                    let failed = err.path().unwrap_or(&path).to_path_buf();
                    found.push(Err((failed, io::Error::from(err))));
                }
            }
        }
        found.sort_by(|a, b| sort_key(a).cmp(sort_key(b)));

        resolved.extend(found.into_iter().map(|item| match item {
            Ok(path) => Ok(Target {
                display: display_name(&path, root),
                path,
            }),
            Err((path, source)) => Err(Unreadable {
                display: display_name(&path, root),
                error: FormatError::Read { path, source },
            }),
        }));
    }

    resolved
}

fn sort_key(item: &Result<PathBuf, (PathBuf, io::Error)>) -> &Path {
    match item {
        Ok(path) | Err((path, _)) => path,
    }
}
