//! Outcome model
//!
//! Every processed target maps to one FileOutcome before rendering, and the
//! whole batch is summarized by a RunSummary.

use serde::Serialize;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Smallest threshold that keeps grouped output stable across runs
pub const MIN_THRESHOLD: usize = 4;

/// Errors raised while formatting a single file or preparing a run
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("threshold must be at least {min}, got {0}", min = MIN_THRESHOLD)]
    InvalidThreshold(usize),

    #[error("separator must not be an ASCII digit, got {0:?}")]
    InvalidSeparator(char),

    #[error("invalid config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

impl FormatError {
    /// Map a read failure, keeping "not found" distinct from other I/O errors
    pub fn from_read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            FormatError::NotFound { path }
        } else {
            FormatError::Read { path, source }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FormatError::NotFound { .. })
    }
}

/// What happened to a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Rewritten in place with at least one replacement
    Formatted,
    /// Rewritten in place, no tokens needed grouping
    Unchanged,
    /// Check mode: the file would be rewritten
    WouldChange,
    /// Tolerant mode: the file does not exist
    Skipped,
    /// Tolerant mode: reading or writing failed
    Failed,
}

/// Per-file record
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    /// Target path as given, using '/' as separator
    pub path: String,

    pub status: Status,

    /// Number of digit runs that were grouped
    pub replacements: usize,

    /// Warning or error message for skipped/failed targets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FileOutcome {
    pub fn formatted(path: impl Into<String>, replacements: usize) -> Self {
        Self {
            path: path.into(),
            status: if replacements > 0 {
                Status::Formatted
            } else {
                Status::Unchanged
            },
            replacements,
            message: None,
        }
    }

    pub fn checked(path: impl Into<String>, replacements: usize) -> Self {
        Self {
            path: path.into(),
            status: if replacements > 0 {
                Status::WouldChange
            } else {
                Status::Unchanged
            },
            replacements,
            message: None,
        }
    }

    pub fn skipped(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            status: Status::Skipped,
            replacements: 0,
            message: Some(message.into()),
        }
    }

    pub fn failed(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            status: Status::Failed,
            replacements: 0,
            message: Some(message.into()),
        }
    }
}

/// Aggregate counts for a batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub formatted: usize,
    pub unchanged: usize,
    pub would_change: usize,
    pub skipped: usize,
    pub failed: usize,
    pub replacements: usize,
}

impl RunSummary {
    pub fn from_outcomes(outcomes: &[FileOutcome]) -> Self {
        let mut summary = Self::default();
        for outcome in outcomes {
            match outcome.status {
                Status::Formatted => summary.formatted += 1,
                Status::Unchanged => summary.unchanged += 1,
                Status::WouldChange => summary.would_change += 1,
                Status::Skipped => summary.skipped += 1,
                Status::Failed => summary.failed += 1,
            }
            summary.replacements += outcome.replacements;
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.formatted + self.unchanged + self.would_change + self.skipped + self.failed
    }
}
