use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

const INVOICE: &str = "請求書\n発行日 2024年4月1日\n合計 ¥330,000 (税込)\n代表者印";

fn docstamp() -> Command {
    Command::cargo_bin("docstamp").unwrap()
}

#[test]
fn analyze_prints_json_metadata() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("invoice.txt");
    fs::write(&input, INVOICE).unwrap();

    docstamp()
        .args(["analyze", "--today", "2025-06-15"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"date\":\"240401\""))
        .stdout(predicate::str::contains("\"document_type\":\"請求書\""))
        .stdout(predicate::str::contains("\"amount\":\"330,000\""))
        .stdout(predicate::str::contains("\"suggested_name\":\"240401_\""));
}

#[test]
fn analyze_reads_stdin() {
    docstamp()
        .args(["analyze", "-", "--format", "text", "--today", "2025-06-15"])
        .write_stdin(INVOICE)
        .assert()
        .success()
        .stdout(predicate::str::contains("Suggested name: 240401_"))
        .stdout(predicate::str::contains("Seal: yes"));
}

#[test]
fn analyze_missing_file_fails() {
    docstamp()
        .args(["analyze", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn batch_proposes_unique_names() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), INVOICE).unwrap();
    fs::write(dir.path().join("b.txt"), INVOICE).unwrap();
    let out = dir.path().join("out");

    docstamp()
        .arg("batch")
        .arg(format!("{}/*.txt", dir.path().display()))
        .arg("--output-dir")
        .arg(&out)
        .args(["--summary", "--today", "2025-06-15"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a.txt -> 240401_.txt"))
        .stdout(predicate::str::contains("b.txt -> 240401__1.txt"));

    assert!(out.join("a.json").exists());
    let summary = fs::read_to_string(out.join("summary.csv")).unwrap();
    assert!(summary.starts_with("filename,status,proposed_name"));
    assert!(summary.contains("240401__1.txt"));
}

#[test]
fn batch_without_matches_fails() {
    let dir = tempdir().unwrap();

    docstamp()
        .arg("batch")
        .arg(format!("{}/*.txt", dir.path().display()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files found"));
}

#[test]
fn config_set_and_get() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");

    docstamp()
        .arg("-c")
        .arg(&config)
        .args(["config", "init"])
        .assert()
        .success();

    docstamp()
        .arg("-c")
        .arg(&config)
        .args(["config", "set", "dates.future_days", "30"])
        .assert()
        .success();

    docstamp()
        .arg("-c")
        .arg(&config)
        .args(["config", "get", "dates.future_days"])
        .assert()
        .success()
        .stdout(predicate::str::contains("30"));

    docstamp()
        .arg("-c")
        .arg(&config)
        .args(["config", "set", "dates.unknown_key", "1"])
        .assert()
        .failure();
}
