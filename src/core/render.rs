//! Renderer module
//!
//! Renders file outcomes as colored text lines, JSON Lines, or a JSON document.
//! Text and jsonl are streamed one line per file; json is emitted once at the end.

use colored::Colorize;
use serde::Serialize;

use crate::core::model::{FileOutcome, FormatError, RunSummary, Status};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Jsonl,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// How much text output to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Warnings and errors only
    Quiet,
    #[default]
    Normal,
    /// Also unchanged files and run details
    Verbose,
}

impl Verbosity {
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub verbosity: Verbosity,
}

impl RenderConfig {
    pub fn new(format: OutputFormat, verbosity: Verbosity) -> Self {
        Self { format, verbosity }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    files: &'a [FileOutcome],
    summary: RunSummary,
    /// Why the batch stopped early
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Renderer for file outcomes
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render the line for one processed file, if this format streams it
    pub fn render_outcome(&self, outcome: &FileOutcome) -> Option<String> {
        match self.config.format {
            OutputFormat::Text => self.render_text_line(outcome),
            OutputFormat::Jsonl => serde_json::to_string(outcome).ok(),
            OutputFormat::Json => None,
        }
    }

    /// Render the end-of-run output
    ///
    /// `error` is the failure that ended a fail-fast batch, if any. Text output
    /// leaves it to the caller's error report on stderr.
    pub fn render_summary(
        &self,
        outcomes: &[FileOutcome],
        error: Option<&FormatError>,
    ) -> Option<String> {
        let summary = RunSummary::from_outcomes(outcomes);
        match self.config.format {
            OutputFormat::Text => self.render_text_summary(&summary),
            OutputFormat::Jsonl => None,
            OutputFormat::Json => serde_json::to_string_pretty(&JsonReport {
                files: outcomes,
                summary,
                error: error.map(ToString::to_string),
            })
            .ok(),
        }
    }

    fn render_text_line(&self, outcome: &FileOutcome) -> Option<String> {
        let quiet = self.config.verbosity == Verbosity::Quiet;
        let verbose = self.config.verbosity == Verbosity::Verbose;
        let message = outcome.message.as_deref().unwrap_or_default();

        match outcome.status {
            Status::Formatted if !quiet => Some(format!(
                "{} Formatted {} ({})",
                "✓".green(),
                outcome.path.bold(),
                plural(outcome.replacements, "number")
            )),
            Status::Unchanged if verbose => Some(format!(
                "{} {} already formatted",
                "·".dimmed(),
                outcome.path
            )),
            Status::WouldChange => Some(format!(
                "{} Would format {} ({})",
                "✗".red(),
                outcome.path.bold(),
                plural(outcome.replacements, "number")
            )),
            Status::Skipped => Some(format!(
                "{} Skipping {}: {}",
                "⚠".yellow(),
                outcome.path.bold(),
                message
            )
            .yellow()
            .to_string()),
            Status::Failed => Some(format!(
                "{} Could not format {}: {}",
                "⚠".yellow(),
                outcome.path.bold(),
                message
            )
            .yellow()
            .to_string()),
            _ => None,
        }
    }

    fn render_text_summary(&self, summary: &RunSummary) -> Option<String> {
        if self.config.verbosity == Verbosity::Quiet || summary.total() == 0 {
            return None;
        }

        let mut parts = Vec::new();
        if summary.formatted > 0 {
            parts.push(format!("{} formatted", summary.formatted));
        }
        if summary.would_change > 0 {
            parts.push(format!("{} would change", summary.would_change));
        }
        if summary.unchanged > 0 {
            parts.push(format!("{} unchanged", summary.unchanged));
        }
        if summary.skipped > 0 {
            parts.push(format!("{} skipped", summary.skipped));
        }
        if summary.failed > 0 {
            parts.push(format!("{} failed", summary.failed));
        }

        let mut line = format!("{}: {}", plural(summary.total(), "file"), parts.join(", "));
        if self.config.verbosity == Verbosity::Verbose {
            line.push_str(&format!(" [{}]", plural(summary.replacements, "replacement")));
        }
        Some(line.dimmed().to_string())
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
