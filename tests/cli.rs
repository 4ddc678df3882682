use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

fn cmd() -> Command {
    Command::cargo_bin("docstamp").unwrap()
}

fn names_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn fixture() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("client invoice.txt"),
        "ACME Corp\nInvoice Date: 2024-01-15\nDue Date: 2024-02-15\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("notes.txt"), "Nothing dated in here.").unwrap();
    std::fs::write(dir.path().join(".hidden.txt"), "Date: 2024-01-01").unwrap();
    dir
}

#[test]
fn dry_run_plans_without_renaming() {
    let dir = fixture();
    cmd()
        .arg(dir.path())
        .args(["--dry-run", "--date", "2020-05-05"])
        .assert()
        .success()
        .stdout(contains("Would rename: client invoice.txt -> 2024.01.15_client_invoice.txt"))
        .stdout(contains("Would rename: notes.txt -> 2020.05.05_notes.txt"))
        .stdout(contains("Dry run: no files were changed"));

    assert_eq!(names_in(dir.path()), vec![".hidden.txt", "client invoice.txt", "notes.txt"]);
}

#[test]
fn renames_and_writes_summary() {
    let dir = fixture();
    cmd()
        .arg(dir.path())
        .args(["--date", "2020-05-05"])
        .assert()
        .success()
        .stdout(contains("Files processed: 2"))
        .stdout(contains("Summary document:"));

    let names = names_in(dir.path());
    assert!(names.contains(&"2024.01.15_client_invoice.txt".to_string()));
    assert!(names.contains(&"2020.05.05_notes.txt".to_string()));
    assert!(names.contains(&".hidden.txt".to_string()));
    assert!(names.iter().any(|n| n.ends_with("_Document_Summary.md")));
}

#[test]
fn no_summary_flag() {
    let dir = fixture();
    cmd()
        .arg(dir.path())
        .args(["--no-summary", "--date", "2020-05-05"])
        .assert()
        .success()
        .stdout(contains("Summary document:").not());

    assert!(!names_in(dir.path()).iter().any(|n| n.ends_with("_Document_Summary.md")));
}

#[test]
fn no_extract_uses_fallback_for_everything() {
    let dir = fixture();
    cmd()
        .arg(dir.path())
        .args(["--no-extract", "--no-summary", "--date", "2021-03-04"])
        .assert()
        .success()
        .stdout(contains("2021.03.04_client_invoice.txt"))
        .stdout(contains("Fallback dates: 2"));
}

#[test]
fn json_output() {
    let dir = fixture();
    cmd()
        .arg(dir.path())
        .args(["--json", "--dry-run"])
        .assert()
        .success()
        .stdout(contains("\"ok\": true"))
        .stdout(contains("\"new_name\": \"2024.01.15_client_invoice.txt\""))
        .stdout(contains("\"label\": \"invoice_date\""));
}

#[test]
fn invalid_date_is_usage_error() {
    let dir = fixture();
    cmd()
        .arg(dir.path())
        .args(["--date", "2023-02-29"])
        .assert()
        .code(2)
        .stderr(contains("expected YYYY-MM-DD"));
}

#[test]
fn missing_folder_fails() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .arg(dir.path().join("missing"))
        .assert()
        .code(1)
        .stderr(contains("does not exist"));
}

#[test]
fn file_instead_of_folder_fails() {
    let dir = fixture();
    cmd()
        .arg(dir.path().join("notes.txt"))
        .assert()
        .code(1)
        .stderr(contains("is not a directory"));
}

#[test]
fn empty_folder_reports_nothing_to_do() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(contains("No eligible files"));
}
