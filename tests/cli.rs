//! CLI smoke tests for the certdesk binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn certdesk(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("certdesk").unwrap();
    cmd.env("CERTDESK_DATA_DIR", dir.path());
    cmd
}

#[test]
fn commands_require_initialization() {
    let dir = TempDir::new().unwrap();

    certdesk(&dir)
        .args(["certificate", "search"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("certdesk init"));
}

#[test]
fn full_lifecycle_through_the_binary() {
    let dir = TempDir::new().unwrap();

    certdesk(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete."));

    certdesk(&dir)
        .args(["prefix", "add", "2024", "AB"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Assigned prefix AB to 2024."));

    certdesk(&dir)
        .args([
            "certificate",
            "create",
            "--year",
            "2024",
            "--product",
            "PN-100",
            "--serial",
            "SN-1",
            "--amendment",
            "A1",
            "--date",
            "2024-03-18",
            "--quantity",
            "5",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("AB936000"));

    certdesk(&dir)
        .args(["certificate", "show", "AB936000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("State:          Valid"));

    certdesk(&dir)
        .args(["certificate", "search"])
        .assert()
        .success()
        .stdout(predicate::str::contains("AB936000"));

    certdesk(&dir)
        .args(["export", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Certificate No,Edition,State"));

    certdesk(&dir)
        .args(["audit", "recent"])
        .assert()
        .success()
        .stdout(predicate::str::contains("AB936000"));
}

#[test]
fn validation_errors_are_reported() {
    let dir = TempDir::new().unwrap();

    certdesk(&dir).arg("init").assert().success();
    certdesk(&dir)
        .args(["prefix", "add", "2024", "AB"])
        .assert()
        .success();

    certdesk(&dir)
        .args([
            "certificate",
            "create",
            "--year",
            "2024",
            "--product",
            "PN-100",
            "--serial",
            "SN-1",
            "--amendment",
            "A1",
            "--date",
            "2024-03-18",
            "--quantity",
            "100000",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Quantity must be between 0 and 99999.",
        ));
}

#[test]
fn regular_users_cannot_administer_prefixes() {
    let dir = TempDir::new().unwrap();

    certdesk(&dir).arg("init").assert().success();
    certdesk(&dir)
        .args(["user", "add", "jdoe", "J. Doe", "--role", "regular"])
        .assert()
        .success();

    certdesk(&dir)
        .args(["--user", "jdoe", "prefix", "add", "2024", "AB"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("administrator access"));
}
