//! Tests for argument parsing.

use predicates::prelude::*;

use crate::support::*;

#[test]
fn test_help_mentions_env_fallbacks() {
    let t = Test::new();

    t.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("GITHUB_TOKEN"))
        .stdout(predicate::str::contains("--value-file"))
        .stdout(predicate::str::contains("--api-url"));
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    t.cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_value_requires_name() {
    let t = Test::new();

    t.cmd()
        .args(["--value", "x"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--name"));
}

#[test]
fn test_file_conflicts_with_name() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["--file", "state.json", "--name", "REGION"])
        .output()
        .unwrap();
    assert_exit_code(&output, 2);
}

#[test]
fn test_value_conflicts_with_value_file() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["--name", "K", "--value", "x", "--value-file", "v.txt"])
        .output()
        .unwrap();
    assert_exit_code(&output, 2);
}

#[test]
fn test_timeout_must_be_number() {
    let t = Test::new();

    let output = t.cmd().args(["--timeout", "soon"]).output().unwrap();
    assert_exit_code(&output, 2);
}
