use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

#[test]
fn check_reports_unresolved_references() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("opn-focus"));
    cmd.arg("check")
        .arg(fixture("fixtures/opnsense-sample.xml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("unresolved_reference"))
        .stdout(predicate::str::contains("ghost_hosts"))
        .stdout(predicate::str::contains("1 error(s), 0 warning(s)"));
}

#[test]
fn check_json_format_emits_findings_array() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("opn-focus"));
    cmd.arg("check")
        .arg(fixture("fixtures/opnsense-sample.xml"))
        .arg("--format")
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""severity": "error""#))
        .stdout(predicate::str::contains(
            r#""path": "opnsense.filter.rule[1].destination.address""#,
        ));
}

#[test]
fn check_strict_fails_on_errors() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("opn-focus"));
    cmd.arg("check")
        .arg(fixture("fixtures/opnsense-sample.xml"))
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("strict mode failed"));
}
