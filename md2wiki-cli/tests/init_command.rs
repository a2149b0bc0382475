use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

fn md2wiki(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("md2wiki").expect("md2wiki binary");
    cmd.env("HOME", home.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn init_writes_starter_config_under_home() {
    let home = TempDir::new().unwrap();

    md2wiki(&home)
        .args(["init", "--endpoint", "https://wiki.example.com/wiki", "--space", "DOC"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Wrote starter config"));

    let written = std::fs::read_to_string(home.path().join(".md2wiki/config.yaml")).unwrap();
    assert!(written.contains("space: DOC"));
    assert!(written.contains("sync_labels_on_update: false"));
    assert!(!written.contains("password"));
}

#[test]
fn init_refuses_to_overwrite_without_force() {
    let home = TempDir::new().unwrap();
    md2wiki(&home).arg("init").assert().success();

    md2wiki(&home)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    md2wiki(&home)
        .args(["init", "--force", "--space", "NEW"])
        .assert()
        .success();
    let written = std::fs::read_to_string(home.path().join(".md2wiki/config.yaml")).unwrap();
    assert!(written.contains("space: NEW"));
}

#[test]
fn init_honours_explicit_config_path() {
    let home = TempDir::new().unwrap();
    let dir = assert_fs::TempDir::new().unwrap();
    let target = dir.child("nested/md2wiki.yaml");

    md2wiki(&home)
        .args(["init", "--config"])
        .arg(target.path())
        .assert()
        .success();

    target.assert(predicate::path::is_file());
    target.assert(predicate::str::contains("timeout_secs: 30"));
    assert!(!home.path().join(".md2wiki").exists());
}
