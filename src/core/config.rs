//! Run configuration
//!
//! Values come from three layers, lowest first:
//! - built-in defaults (the benchmark report set, threshold 5, fail-fast)
//! - an optional `format-numbers.toml` under the root (or `--config FILE`)
//! - command-line flags

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::formatter::DEFAULT_THRESHOLD;
use crate::core::grouping::DEFAULT_SEPARATOR;
use crate::core::model::FormatError;

/// Config file looked up under the root when `--config` is not given
pub const CONFIG_FILE_NAME: &str = "format-numbers.toml";

/// Benchmark reports rewritten when no targets are configured
pub const DEFAULT_TARGETS: &[&str] = &[
    "results/flow/flow.md",
    "results/lockup/batch-lockup.md",
    "results/lockup/lockup-dynamic.md",
    "results/lockup/lockup-linear.md",
    "results/lockup/lockup-tranched.md",
];

/// How per-file I/O errors are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorPolicy {
    /// Abort the batch on the first error
    #[default]
    FailFast,
    /// Warn and continue with the next file
    Tolerant,
}

impl std::str::FromStr for ErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fail-fast" | "failfast" | "strict" => Ok(ErrorPolicy::FailFast),
            "tolerant" | "lenient" => Ok(ErrorPolicy::Tolerant),
            _ => Err(format!("Unknown policy: {}", s)),
        }
    }
}

/// Effective settings for a run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Minimum digit-run length eligible for grouping
    pub threshold: usize,

    /// Error handling policy
    pub policy: ErrorPolicy,

    /// Grouping separator
    pub separator: char,

    /// Target files or directories, relative to the root
    pub files: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            policy: ErrorPolicy::FailFast,
            separator: DEFAULT_SEPARATOR,
            files: DEFAULT_TARGETS.iter().map(PathBuf::from).collect(),
        }
    }
}

impl Config {
    /// Parse a config from TOML text
    pub fn from_toml(text: &str, origin: &Path) -> Result<Self, FormatError> {
        toml::from_str(text).map_err(|e| FormatError::Config {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load the config for a run.
    ///
    /// An explicit path must exist. Without one, `format-numbers.toml` under
    /// `root` is used when present, otherwise the defaults.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self, FormatError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = root.join(CONFIG_FILE_NAME);
                if !candidate.is_file() {
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let text =
            fs::read_to_string(&path).map_err(|source| FormatError::from_read(&path, source))?;
        Self::from_toml(&text, &path)
    }
}

/// Command-line values that override the loaded config
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub threshold: Option<usize>,
    pub policy: Option<ErrorPolicy>,
    pub separator: Option<char>,
    pub files: Vec<PathBuf>,
}

/// Apply command-line overrides on top of a config
pub fn merge_cli_with_config(mut base_config: Config, cli: CliOverrides) -> Config {
    if let Some(threshold) = cli.threshold {
        base_config.threshold = threshold;
    }
    if let Some(policy) = cli.policy {
        base_config.policy = policy;
    }
    if let Some(separator) = cli.separator {
        base_config.separator = separator;
    }
    if !cli.files.is_empty() {
        base_config.files = cli.files;
    }
    base_config
}
