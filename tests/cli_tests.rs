//! End-to-end tests of the `rapid-resolver` binary that need no network.

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("rapid-resolver").unwrap();
    cmd.env_remove("ENSEMBL_URL");
    cmd
}

#[test]
fn test_help_lists_commands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("resolve"));
}

#[test]
fn test_serve_help_shows_configuration() {
    cmd()
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--ensembl-url"))
        .stdout(predicate::str::contains("ENSEMBL_URL"))
        .stdout(predicate::str::contains("--port"));
}

#[test]
fn test_resolve_without_accession_fails() {
    // Missing marker is rejected before any lookup is attempted
    cmd()
        .args(["resolve", "Homo_sapiens"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Genome url name missing GCA assembly accession id",
        ));
}

#[test]
fn test_resolve_requires_name() {
    cmd().arg("resolve").assert().failure();
}
