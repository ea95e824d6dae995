use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn cli_help_lists_maintenance_commands() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("acctreg"));

    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("retry-failed"))
        .stdout(predicate::str::contains("purge-disabled"));
}
