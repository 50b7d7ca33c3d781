//! CLI end-to-end tests for `run_examples`.
//!
//! Covers:
//! - Prose passthrough and example output substitution
//! - Silent pseudo-comment commands (side effects happen, output discarded)
//! - JSON prettification of captured output
//! - Exit codes: missing argument, unreadable file, normal completion

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

/// Get a Command for the run_examples binary.
fn run_examples() -> Command {
    let mut cmd = Command::cargo_bin("run_examples").unwrap();
    cmd.timeout(Duration::from_secs(30));
    cmd
}

#[test]
fn test_missing_argument_is_usage_error() {
    run_examples()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_unreadable_file_exits_10() {
    run_examples()
        .arg("/nonexistent/README.md")
        .assert()
        .code(10)
        .stderr(predicate::str::contains("cannot open"));
}

#[test]
fn test_malformed_pseudo_comment_exits_20() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("doc.md");
    fs::write(&path, "[//]: # no parens\n").unwrap();

    run_examples()
        .arg(&path)
        .assert()
        .code(20)
        .stderr(predicate::str::contains("pseudo-comment"));
}

#[test]
fn test_plain_document_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("doc.md");
    let src = "# WeeRT API\n\nNothing to run here.\n";
    fs::write(&path, src).unwrap();

    run_examples()
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::eq(src));
}

#[test]
fn test_example_output_is_captured_and_prettified() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("doc.md");
    let src = "\
Try it:

```shell
$ echo '{\"b\": 2, \"a\": 1}'
old stale output
```
Done.
";
    fs::write(&path, src).unwrap();

    let expect = "\
Try it:

```shell
$ echo '{\"b\": 2, \"a\": 1}'
{
    \"a\": 1,
    \"b\": 2
}
```
Done.
";
    run_examples()
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::eq(expect));
}

#[test]
fn test_silent_command_runs_with_output_discarded() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("doc.md");
    let marker = dir.path().join("touched");
    let src = format!(
        "[//]: # (touch {})\nprose\n",
        marker.display()
    );
    fs::write(&path, &src).unwrap();

    run_examples()
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::eq(src.as_str()));
    assert!(marker.exists(), "silent command should have run");
}

#[test]
fn test_multi_line_example() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("doc.md");
    let src = "$ echo one \\\n> two\nstale\n```\n";
    fs::write(&path, src).unwrap();

    let expect = "$ echo one \\\n> two\none two\n```\n";
    run_examples()
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::eq(expect));
}
