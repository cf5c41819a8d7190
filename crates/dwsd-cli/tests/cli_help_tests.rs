use assert_cmd::Command;
use predicates::prelude::*;

#[test]
#[allow(deprecated)]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("dwsd-events").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dwsd-events"));
}

#[test]
#[allow(deprecated)]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("dwsd-events").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("normalize"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("config"));
}

#[test]
#[allow(deprecated)]
fn test_cli_rejects_unknown_format() {
    let mut cmd = Command::cargo_bin("dwsd-events").unwrap();
    cmd.args(["--format", "xml", "config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("xml"));
}

#[test]
#[allow(deprecated)]
fn test_cli_rejects_bad_now() {
    let mut cmd = Command::cargo_bin("dwsd-events").unwrap();
    cmd.args(["normalize", "-", "--now", "yesterday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--now"));
}
