use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn parse_jsonl(stdout: &[u8]) -> Vec<Value> {
    let s = String::from_utf8_lossy(stdout);
    s.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str::<Value>(l).expect("valid jsonl line"))
        .collect()
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn cmd(root: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("format-numbers"));
    cmd.env_remove("FORMAT_NUMBERS_ROOT")
        .env_remove("FORMAT_NUMBERS_CONFIG")
        .arg("--root")
        .arg(root)
        .arg("--no-color");
    cmd
}

const REPORTS: &[&str] = &[
    "results/flow/flow.md",
    "results/lockup/batch-lockup.md",
    "results/lockup/lockup-dynamic.md",
    "results/lockup/lockup-linear.md",
    "results/lockup/lockup-tranched.md",
];

#[test]
fn default_run_formats_benchmark_reports() {
    let temp = tempdir().unwrap();
    for report in REPORTS {
        write_file(&temp.path().join(report), "| withdraw | 123456 | 9999 |\n");
    }

    cmd(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Formatted results/flow/flow.md (1 number)"))
        .stdout(predicate::str::contains("5 files: 5 formatted"));

    for report in REPORTS {
        let content = fs::read_to_string(temp.path().join(report)).unwrap();
        assert_eq!(content, "| withdraw | 123,456 | 9999 |\n");
    }
}

#[test]
fn default_run_fails_fast_on_missing_report() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join(REPORTS[0]), "total 500000\n");
    write_file(&temp.path().join(REPORTS[2]), "total 600000\n");

    cmd(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("file not found"))
        .stderr(predicate::str::contains("batch-lockup.md"));

    // Files before the failure are rewritten, files after it are not.
    assert_eq!(
        fs::read_to_string(temp.path().join(REPORTS[0])).unwrap(),
        "total 500,000\n"
    );
    assert_eq!(
        fs::read_to_string(temp.path().join(REPORTS[2])).unwrap(),
        "total 600000\n"
    );
}

#[test]
fn tolerant_skips_missing_files() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("present.md"), "Total: 123456 units\n");

    cmd(temp.path())
        .arg("--tolerant")
        .arg("missing.md")
        .arg("present.md")
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipping missing.md: file not found"))
        .stdout(predicate::str::contains("Formatted present.md"));

    assert_eq!(
        fs::read_to_string(temp.path().join("present.md")).unwrap(),
        "Total: 123,456 units\n"
    );
}

#[test]
fn threshold_four() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("gas.md"), "Gas: 9999 and 12345 and 999\n");

    cmd(temp.path())
        .args(["-n", "4", "gas.md"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(temp.path().join("gas.md")).unwrap(),
        "Gas: 9,999 and 12,345 and 999\n"
    );
}

#[test]
fn second_run_changes_nothing() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.md"), "v12345 costs 1234567 gas\n");

    cmd(temp.path()).arg("a.md").assert().success();
    let first = fs::read_to_string(temp.path().join("a.md")).unwrap();
    assert_eq!(first, "v12345 costs 1,234,567 gas\n");

    cmd(temp.path())
        .arg("--check")
        .arg("a.md")
        .assert()
        .success();
    assert_eq!(fs::read_to_string(temp.path().join("a.md")).unwrap(), first);
}

#[test]
fn check_exits_non_zero_without_writing() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.md"), "55555\n");

    cmd(temp.path())
        .arg("--check")
        .arg("a.md")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Would format a.md"));

    assert_eq!(fs::read_to_string(temp.path().join("a.md")).unwrap(), "55555\n");
}

#[test]
fn directory_target_expands_to_markdown_files() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("results/b.md"), "20000\n");
    write_file(&temp.path().join("results/a.md"), "10000\n");
    write_file(&temp.path().join("results/raw.csv"), "30000\n");

    let assert = cmd(temp.path())
        .args(["--format", "jsonl", "results"])
        .assert()
        .success();
    let items = parse_jsonl(&assert.get_output().stdout);

    let paths: Vec<_> = items
        .iter()
        .map(|v| v.get("path").and_then(|p| p.as_str()).unwrap().to_string())
        .collect();
    assert_eq!(paths, vec!["results/a.md", "results/b.md"]);
    assert_eq!(
        fs::read_to_string(temp.path().join("results/raw.csv")).unwrap(),
        "30000\n"
    );
}

#[test]
fn json_format_includes_summary() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.md"), "12345 67890\n");

    let assert = cmd(temp.path())
        .args(["--format", "json", "--tolerant", "a.md", "gone.md"])
        .assert()
        .success();
    let report: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();

    assert_eq!(report["files"][0]["status"], "formatted");
    assert_eq!(report["files"][0]["replacements"], 2);
    assert_eq!(report["files"][1]["status"], "skipped");
    assert_eq!(report["summary"]["skipped"], 1);
}

#[test]
fn config_file_sets_targets_and_policy() {
    let temp = tempdir().unwrap();
    write_file(
        &temp.path().join("format-numbers.toml"),
        "threshold = 4\npolicy = \"tolerant\"\nfiles = [\"docs/gas.md\", \"docs/absent.md\"]\n",
    );
    write_file(&temp.path().join("docs/gas.md"), "1234\n");

    cmd(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipping docs/absent.md"));

    assert_eq!(
        fs::read_to_string(temp.path().join("docs/gas.md")).unwrap(),
        "1,234\n"
    );
}

#[test]
fn cli_flags_override_config_file() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("format-numbers.toml"), "threshold = 4\n");
    write_file(&temp.path().join("a.md"), "1234 12345\n");

    cmd(temp.path())
        .args(["--threshold", "5", "a.md"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(temp.path().join("a.md")).unwrap(),
        "1234 12,345\n"
    );
}

#[test]
fn invalid_config_is_reported() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("format-numbers.toml"), "threshold = \"five\"\n");

    cmd(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load config"));
}

#[test]
fn quiet_mode_keeps_warnings_only() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.md"), "12345\n");

    cmd(temp.path())
        .args(["--quiet", "--tolerant", "a.md", "b.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipping b.md"))
        .stdout(predicate::str::contains("Formatted").not());
}

#[test]
fn unknown_format_is_rejected() {
    let temp = tempdir().unwrap();

    cmd(temp.path())
        .args(["--format", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown format: yaml"));
}

#[test]
fn fail_fast_json_reports_files_before_the_failure() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.md"), "12345\n");

    let assert = cmd(temp.path())
        .args(["--format", "json", "a.md", "gone.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("formatting stopped"));
    let report: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();

    assert_eq!(report["files"].as_array().unwrap().len(), 1);
    assert_eq!(report["files"][0]["path"], "a.md");
    assert_eq!(report["files"][0]["status"], "formatted");
    assert_eq!(report["summary"]["formatted"], 1);
    let error = report["error"].as_str().unwrap();
    assert!(error.starts_with("file not found"));
    assert!(error.ends_with("gone.md"));
    assert_eq!(fs::read_to_string(temp.path().join("a.md")).unwrap(), "12,345\n");
}

#[test]
fn threshold_below_four_is_rejected() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.md"), "cost 123, total 1,000\n");

    cmd(temp.path())
        .args(["--check", "-n", "3", "a.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("threshold must be at least 4"));
}

#[test]
fn grouped_file_is_clean_at_threshold_four() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.md"), "cost 123, total 1,000 and 12,345\n");

    cmd(temp.path())
        .args(["--check", "-n", "4", "a.md"])
        .assert()
        .success();
}

#[test]
fn digit_separator_is_rejected() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.md"), "123456\n");

    cmd(temp.path())
        .args(["--separator", "0", "a.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("separator must not be an ASCII digit"));

    assert_eq!(fs::read_to_string(temp.path().join("a.md")).unwrap(), "123456\n");
}

#[test]
fn quiet_and_verbose_conflict() {
    let temp = tempdir().unwrap();

    cmd(temp.path()).args(["-q", "-v"]).assert().failure();
}

#[cfg(unix)]
#[test]
fn dangling_symlink_in_directory_is_reported() {
    use std::os::unix::fs::symlink;

    let temp = tempdir().unwrap();
    write_file(&temp.path().join("docs/a.md"), "12345\n");
    symlink(temp.path().join("nowhere.md"), temp.path().join("docs/b.md")).unwrap();

    let assert = cmd(temp.path())
        .args(["--tolerant", "--format", "jsonl", "docs"])
        .assert()
        .success();
    let lines = parse_jsonl(&assert.get_output().stdout);
    assert_eq!(lines[0]["status"], "formatted");
    assert_eq!(lines[1]["path"], "docs/b.md");
    assert_eq!(lines[1]["status"], "failed");

    write_file(&temp.path().join("docs/a.md"), "12345\n");
    cmd(temp.path())
        .arg("docs")
        .assert()
        .failure()
        .stderr(predicate::str::contains("docs/b.md"));
}
