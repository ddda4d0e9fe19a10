//! CLI module - Command-line interface definition and handler

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::core::config::{merge_cli_with_config, CliOverrides, Config, ErrorPolicy};
use crate::core::render::{OutputFormat, RenderConfig, Verbosity};
use crate::flows::rewrite::{run_rewrite, RewriteMode};

/// format-numbers - add thousand separators to long numbers in markdown reports.
#[derive(Parser, Debug)]
#[command(name = "format-numbers")]
#[command(
    author,
    version,
    about,
    long_about = r#"format-numbers rewrites markdown files in place, grouping every integer
of at least N digits with thousand separators (123456 -> 123,456).

A number is a run of ASCII digits that is not glued to a letter, digit or
underscore: `v12345` and `0x12345` are left alone, `(12345)` and `abc-12345`
are rewritten. Numbers that are already grouped are never touched again.

Without PATHS the configured report set is used: the `files` list from
format-numbers.toml, or the built-in benchmark reports under results/.

Examples:
    format-numbers
    format-numbers --tolerant
    format-numbers -n 4 docs/gas-report.md
    format-numbers --check results
"#
)]
pub struct Cli {
    /// Files or directories to format.
    #[arg(
        value_name = "PATHS",
        long_help = "Files or directories to format, relative to ROOT.\n\n\
A directory expands to every *.md file below it, in sorted order.\n\
When omitted, the configured target list is used."
    )]
    pub paths: Vec<PathBuf>,

    /// Root directory for relative paths.
    #[arg(
        long,
        default_value = ".",
        value_name = "ROOT",
        env = "FORMAT_NUMBERS_ROOT",
        long_help = "Root directory that relative targets and the config file are resolved\n\
against (defaults to the current directory)."
    )]
    pub root: PathBuf,

    /// Minimum number of digits for a number to be grouped.
    #[arg(
        short = 'n',
        long,
        value_name = "N",
        long_help = "Minimum digit-run length eligible for grouping (default: 5).\n\n\
A run of exactly N-1 digits is left as is; a run of N digits is grouped."
    )]
    pub threshold: Option<usize>,

    /// Warn about missing or unreadable files and keep going.
    #[arg(
        long,
        conflicts_with = "fail_fast",
        long_help = "Handle per-file errors by printing a warning and moving on to the next\n\
file. Missing files are reported as skipped. The run always exits successfully."
    )]
    pub tolerant: bool,

    /// Stop at the first missing or unreadable file (default).
    #[arg(
        long,
        long_help = "Abort the whole batch on the first read or write error. Files processed\n\
before the error keep their new content. This is the default policy."
    )]
    pub fail_fast: bool,

    /// Grouping separator character.
    #[arg(long, value_name = "CHAR")]
    pub separator: Option<char>,

    /// Path to a TOML config file.
    #[arg(
        long,
        value_name = "FILE",
        env = "FORMAT_NUMBERS_CONFIG",
        long_help = "Load settings from this TOML file instead of ROOT/format-numbers.toml.\n\n\
Supported keys: threshold, policy (\"fail-fast\" | \"tolerant\"), separator, files.\n\
Command-line flags override values from the file."
    )]
    pub config: Option<PathBuf>,

    /// Report files that would change without writing them.
    #[arg(
        long,
        long_help = "Do not modify any file. Exit with status 1 if at least one file would be\n\
rewritten. Useful in CI to verify reports are already formatted."
    )]
    pub check: bool,

    /// Output format (text/jsonl/json).
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub format: String,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,

    /// Only print warnings and errors.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print settings and unchanged files too.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        let policy = if self.tolerant {
            Some(ErrorPolicy::Tolerant)
        } else if self.fail_fast {
            Some(ErrorPolicy::FailFast)
        } else {
            None
        };

        CliOverrides {
            threshold: self.threshold,
            policy,
            separator: self.separator,
            files: self.paths.clone(),
        }
    }
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<ExitCode> {
    let format: OutputFormat = cli.format.parse().map_err(anyhow::Error::msg)?;
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);

    if cli.no_color || format != OutputFormat::Text {
        colored::control::set_override(false);
    }

    // Get absolute root path
    let root = cli.root.canonicalize().unwrap_or_else(|_| cli.root.clone());

    let base = Config::load(&root, cli.config.as_deref()).context("failed to load config")?;
    let config = merge_cli_with_config(base, cli.overrides());

    if verbosity == Verbosity::Verbose {
        eprintln!(
            "{}",
            format!(
                "root={} threshold={} separator={:?} policy={:?} targets={}",
                root.display(),
                config.threshold,
                config.separator,
                config.policy,
                config.files.len()
            )
            .dimmed()
        );
    }

    let mode = if cli.check {
        RewriteMode::Check
    } else {
        RewriteMode::Write
    };

    let clean = run_rewrite(&root, &config, mode, RenderConfig::new(format, verbosity))?;

    Ok(if clean {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
