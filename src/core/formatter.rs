//! Number formatter
//!
//! Finds integer tokens in raw text and rewrites them with digit grouping.
//!
//! A token is a maximal run of ASCII digits whose neighbours are not ASCII
//! word characters (`[A-Za-z0-9_]`), i.e. `\b[0-9]{N,}\b` with ASCII word
//! boundaries. Text is never parsed as markdown.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

use crate::core::grouping::{format_with_grouping, DEFAULT_SEPARATOR};
use crate::core::model::{FormatError, MIN_THRESHOLD};

/// Default minimum digit-run length
pub const DEFAULT_THRESHOLD: usize = 5;

/// Static regex for maximal ASCII digit runs
static DIGIT_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+").expect("Invalid DIGIT_RUN_RE regex"));

/// Result of formatting a piece of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatted {
    pub text: String,
    pub replacements: usize,
}

/// Rewrites digit runs of at least `threshold` digits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormatter {
    threshold: usize,
    separator: char,
}

impl Default for NumberFormatter {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            separator: DEFAULT_SEPARATOR,
        }
    }
}

impl NumberFormatter {
    /// Thresholds below 4 are rejected: a three-digit group such as the
    /// `000` in `1,000` would itself be rewritten on the next run.
    pub fn new(threshold: usize) -> Result<Self, FormatError> {
        if threshold < MIN_THRESHOLD {
            return Err(FormatError::InvalidThreshold(threshold));
        }
        Ok(Self {
            threshold,
            separator: DEFAULT_SEPARATOR,
        })
    }

    /// Digits are rejected as separators since they would merge the groups
    /// back into one digit run.
    pub fn with_separator(mut self, separator: char) -> Result<Self, FormatError> {
        if separator.is_ascii_digit() {
            return Err(FormatError::InvalidSeparator(separator));
        }
        self.separator = separator;
        Ok(self)
    }

    /// Group every qualifying token in `text`
    pub fn format_text(&self, text: &str) -> Formatted {
        let mut out = String::with_capacity(text.len() + text.len() / 8);
        let mut last = 0;
        let mut replacements = 0;

        for m in DIGIT_RUN_RE.find_iter(text) {
            let digits = m.as_str();
            if digits.len() < self.threshold || !is_bounded(text, m.start(), m.end()) {
                continue;
            }

            out.push_str(&text[last..m.start()]);
            out.push_str(&format_with_grouping(digits, self.separator));
            last = m.end();
            replacements += 1;
        }
        out.push_str(&text[last..]);

        Formatted {
            text: out,
            replacements,
        }
    }

    /// Read, format and overwrite a file in place
    ///
    /// The file is always rewritten, even when nothing changed.
    pub fn format_file(&self, path: &Path) -> Result<usize, FormatError> {
        let formatted = self.format_path(path)?;

        fs::write(path, &formatted.text).map_err(|source| FormatError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(formatted.replacements)
    }

    /// Report how many tokens would be rewritten, without touching the file
    pub fn check_file(&self, path: &Path) -> Result<usize, FormatError> {
        Ok(self.format_path(path)?.replacements)
    }

    fn format_path(&self, path: &Path) -> Result<Formatted, FormatError> {
        let content =
            fs::read_to_string(path).map_err(|source| FormatError::from_read(path, source))?;
        Ok(self.format_text(&content))
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Whether the digit run at `start..end` sits on ASCII word boundaries
fn is_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();

    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}
