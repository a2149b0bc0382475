use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const ENV_VARS: &[&str] = &[
    "CONFLUENCE_ENDPOINT",
    "CONFLUENCE_SPACE",
    "CONFLUENCE_USERNAME",
    "CONFLUENCE_PASSWORD",
    "RUST_LOG",
];

fn md2wiki(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("md2wiki").expect("md2wiki binary");
    cmd.env("HOME", home.path());
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn dry_run_reports_every_page_as_created() {
    let home = TempDir::new().unwrap();
    let docs = TempDir::new().unwrap();
    write(docs.path(), "index.md", "---\ntitle: Home\n---\nWelcome\n");
    write(docs.path(), "guides/setup.md", "# Setup\n");

    md2wiki(&home)
        .args(["sync", "--dry-run", "--space", "DOC", "--endpoint", "https://wiki.example.com/wiki"])
        .arg(docs.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[dry-run] ✓ synced 2 files (2 created, 0 updated, 0 failed)"))
        .stdout(predicate::str::contains("Home"))
        .stdout(predicate::str::contains("https://wiki.example.com/wiki/x/"));
}

#[test]
fn dry_run_json_report() {
    let home = TempDir::new().unwrap();
    let docs = TempDir::new().unwrap();
    write(docs.path(), "a.md", "---\ntags: [x]\n---\nA\n");
    write(docs.path(), "drafts/b.md", "B\n");

    let output = md2wiki(&home)
        .args(["sync", "--dry-run", "--json", "--space", "DOC", "--exclude", "^drafts/"])
        .arg(docs.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["created"], 1);
    assert_eq!(report["failed"], 0);
    assert_eq!(report["files"].as_array().unwrap().len(), 1);
    assert_eq!(report["files"][0]["action"], "created");
    assert_eq!(report["files"][0]["title"], "a");
    assert_eq!(report["files"][0]["version"], 2);
}

#[test]
fn space_can_come_from_environment() {
    let home = TempDir::new().unwrap();
    let docs = TempDir::new().unwrap();
    write(docs.path(), "a.md", "A\n");

    md2wiki(&home)
        .env("CONFLUENCE_SPACE", "ENV")
        .args(["sync", "--dry-run", "--json"])
        .arg(docs.path())
        .assert()
        .success();
}

#[test]
fn failed_file_makes_exit_status_non_zero() {
    let home = TempDir::new().unwrap();
    let docs = TempDir::new().unwrap();
    write(docs.path(), "bad.md", "---\ntitle: never closed\n");
    write(docs.path(), "good.md", "fine\n");

    md2wiki(&home)
        .args(["sync", "--dry-run", "--space", "DOC"])
        .arg(docs.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("1 created, 0 updated, 1 failed"))
        .stderr(predicate::str::contains("1 of 2 files failed to sync"));
}

#[test]
fn real_sync_requires_endpoint() {
    let home = TempDir::new().unwrap();
    let docs = TempDir::new().unwrap();
    write(docs.path(), "a.md", "A\n");

    md2wiki(&home)
        .args(["sync", "--space", "DOC"])
        .arg(docs.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("endpoint"));
}

#[test]
fn missing_source_directory_fails() {
    let home = TempDir::new().unwrap();

    md2wiki(&home)
        .args(["sync", "--dry-run", "--space", "DOC", "/no/such/docs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("/no/such/docs"));
}
