//! CLI integration tests for the `nt` binary

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn nt(workspace: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("nt").unwrap();
    let config = workspace.join(".no-config.yml");
    fs::write(&config, "{}\n").unwrap();
    cmd.arg("--config").arg(&config).arg("--workspace").arg(workspace);
    cmd
}

#[test]
fn test_write_then_read() {
    let temp = tempdir().unwrap();

    nt(temp.path())
        .args(["write", "a/b/c.txt", "--content", "data"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully wrote 4 bytes to"));

    nt(temp.path())
        .args(["read", "a/b/c.txt"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("data"));
}

#[test]
fn test_write_from_stdin() {
    let temp = tempdir().unwrap();

    nt(temp.path())
        .args(["write", "notes.md"])
        .write_stdin("from stdin")
        .assert()
        .success();

    assert_eq!(fs::read_to_string(temp.path().join("notes.md")).unwrap(), "from stdin");
}

#[test]
fn test_escape_fails_with_exit_code() {
    let temp = tempdir().unwrap();

    nt(temp.path())
        .args(["read", "../outside.txt"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("outside allowed directory"));
}

#[test]
fn test_list_empty_directory() {
    let temp = tempdir().unwrap();
    fs::create_dir(temp.path().join("empty")).unwrap();

    nt(temp.path())
        .args(["list", "empty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("is empty"));
}

#[test]
fn test_edit_replaces_text() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("a.txt"), "hello world").unwrap();

    nt(temp.path())
        .args(["edit", "a.txt", "--old", "world", "--new", "rust"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Successfully edited"));

    assert_eq!(fs::read_to_string(temp.path().join("a.txt")).unwrap(), "hello rust");
}

#[test]
fn test_call_runs_tool_by_name() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("a.txt"), "alpha").unwrap();

    nt(temp.path())
        .args(["call", "read_file", r#"{"path": "a.txt"}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("alpha"));

    nt(temp.path())
        .args(["call", "nope", "{}"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Tool not found: nope"));
}

#[test]
fn test_tools_prints_definitions() {
    let temp = tempdir().unwrap();

    let output = nt(temp.path()).arg("tools").output().unwrap();
    assert!(output.status.success());

    let defs: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = defs
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"read_file"));
    assert!(names.contains(&"edit_file"));
}
