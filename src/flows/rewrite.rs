//! Rewrite flow - Format every target in order
//!
//! Targets are processed one at a time: read, substitute, write, then the next.
//! The error policy decides whether a failing target ends the batch or is
//! reported and skipped.

use anyhow::{Context, Result};
use std::path::Path;

use crate::core::config::{Config, ErrorPolicy};
use crate::core::formatter::NumberFormatter;
use crate::core::model::{FileOutcome, FormatError, Status};
use crate::core::paths::{expand_targets, Resolved};
use crate::core::render::{RenderConfig, Renderer};

/// Whether files are rewritten or only inspected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RewriteMode {
    #[default]
    Write,
    Check,
}

/// Everything a batch produced, up to the point it stopped
#[derive(Debug, Default)]
pub struct Batch {
    pub outcomes: Vec<FileOutcome>,
    /// Set when fail-fast ended the batch early
    pub error: Option<FormatError>,
}

/// Format `targets` in order, reporting each outcome through `emit`.
///
/// Under [`ErrorPolicy::FailFast`] the first error ends the batch and later
/// targets are left untouched. Under [`ErrorPolicy::Tolerant`] a missing file
/// becomes a `skipped` outcome and any other error a `failed` outcome.
pub fn format_targets(
    formatter: &NumberFormatter,
    targets: Vec<Resolved>,
    policy: ErrorPolicy,
    mode: RewriteMode,
    mut emit: impl FnMut(&FileOutcome),
) -> Batch {
    let mut batch = Batch {
        outcomes: Vec::with_capacity(targets.len()),
        error: None,
    };

    for resolved in targets {
        let (display, result) = match resolved {
            Ok(target) => {
                let result = match mode {
                    RewriteMode::Write => formatter.format_file(&target.path),
                    RewriteMode::Check => formatter.check_file(&target.path),
                };
                (target.display, result)
            }
            Err(unreadable) => (unreadable.display, Err(unreadable.error)),
        };

        let outcome = match (result, policy) {
            (Ok(replacements), _) => match mode {
                RewriteMode::Write => FileOutcome::formatted(display, replacements),
                RewriteMode::Check => FileOutcome::checked(display, replacements),
            },
            (Err(err), ErrorPolicy::FailFast) => {
                batch.error = Some(err);
                break;
            }
            (Err(err), ErrorPolicy::Tolerant) if err.is_not_found() => {
                FileOutcome::skipped(display, "file not found")
            }
            (Err(err), ErrorPolicy::Tolerant) => FileOutcome::failed(display, err.to_string()),
        };

        emit(&outcome);
        batch.outcomes.push(outcome);
    }

    batch
}

/// Run the rewrite flow and print its output.
///
/// The end-of-run report is printed even when fail-fast stopped the batch, so
/// files rewritten before the failure are still listed.
///
/// Returns `true` when the run is clean: in check mode, no file would change.
pub fn run_rewrite(
    root: &Path,
    config: &Config,
    mode: RewriteMode,
    render_config: RenderConfig,
) -> Result<bool> {
    let formatter = NumberFormatter::new(config.threshold)
        .context("invalid threshold")?
        .with_separator(config.separator)
        .context("invalid separator")?;

    let targets = expand_targets(root, &config.files);
    if targets.is_empty() {
        eprintln!("Warning: no markdown files found in the configured targets");
    }

    let renderer = Renderer::with_config(render_config);
    let emit = |outcome: &FileOutcome| {
        if let Some(line) = renderer.render_outcome(outcome) {
            println!("{}", line);
        }
    };

    let batch = format_targets(&formatter, targets, config.policy, mode, emit);

    if let Some(summary) = renderer.render_summary(&batch.outcomes, batch.error.as_ref()) {
        println!("{}", summary);
    }

    if let Some(err) = batch.error {
        return Err(err).context("formatting stopped");
    }

    Ok(!batch.outcomes.iter().any(|o| o.status == Status::WouldChange))
}
