use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

fn testdata_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../testdata")
        .join(name)
}

#[test]
fn report_writes_json_summary() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("report.json");

    Command::cargo_bin("woodpile")
        .unwrap()
        .arg("report")
        .arg(testdata_path("session_explicit.json"))
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    let raw = std::fs::read_to_string(&out).unwrap();
    let report: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(report["summary"]["total"], 13.0);
    assert_eq!(report["duplicates"], 1);
    assert_eq!(report["skipped_taps"], 1);
    assert_eq!(report["mode"], "explicit_lines");
}

#[test]
fn resolve_prints_cell_or_null() {
    Command::cargo_bin("woodpile")
        .unwrap()
        .args(["resolve"])
        .arg(testdata_path("woodpile_grid.json"))
        .args(["--x", "300", "--y", "200", "--screen-width", "600"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"row\": 2").and(predicate::str::contains("\"col\": 2")));

    Command::cargo_bin("woodpile")
        .unwrap()
        .args(["resolve"])
        .arg(testdata_path("woodpile_grid.json"))
        .args(["--x", "5", "--y", "5", "--mode", "uniform-box"])
        .assert()
        .success()
        .stdout(predicate::str::diff("null\n"));
}

#[test]
fn missing_session_fails_cleanly() {
    Command::cargo_bin("woodpile")
        .unwrap()
        .args(["report", "does/not/exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read session file"));
}

#[test]
fn log_level_routes_session_logs_to_stderr() {
    Command::cargo_bin("woodpile")
        .unwrap()
        .args(["--log-level", "info", "report"])
        .arg(testdata_path("session_explicit.json"))
        .assert()
        .success()
        .stderr(
            predicate::str::contains("INFO woodpile::session] tap (10, 10) is outside the grid")
                .and(predicate::str::contains("total 13")),
        );

    Command::cargo_bin("woodpile")
        .unwrap()
        .args(["--log-level", "error", "report"])
        .arg(testdata_path("session_explicit.json"))
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}
