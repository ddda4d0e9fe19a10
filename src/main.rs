//! format-numbers - thousand separators for numbers in markdown reports
//!
//! format-numbers provides:
//! - Digit-run detection with ASCII word boundaries and a configurable threshold
//! - In-place rewriting of a configured list of report files
//! - Fail-fast or tolerant handling of missing/unreadable files
//! - Colored text, jsonl or json reporting

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

mod cli;
mod core;
mod flows;

fn main() -> Result<ExitCode> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
