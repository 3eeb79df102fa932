// tests/cli_test.rs
use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_xutlversion_help() {
    Command::cargo_bin("xutlversion")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("xutlversion"))
        .stdout(predicate::str::contains("none"));
}

#[test]
fn test_xutlversion_without_arguments_prints_usage() {
    Command::cargo_bin("xutlversion")
        .unwrap()
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "xutlversion <path/to/package.json> [ none | patch | minor | major ]",
        ));
}

#[test]
fn test_xutlversion_invalid_mode() {
    Command::cargo_bin("xutlversion")
        .unwrap()
        .args(["package.json", "huge"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid mode: huge"));
}

#[test]
fn test_xutlversion_git_without_arguments() {
    Command::cargo_bin("xutlversion-git")
        .unwrap()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("xutlversion-git <path/to/package/>"));
}

#[test]
fn test_xutlversion_git_invalid_mode() {
    Command::cargo_bin("xutlversion-git")
        .unwrap()
        .args([".", "none"])
        .assert()
        .code(2);
}

#[test]
fn test_xutlversion_git_path_not_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("xutlversion.toml");
    std::fs::write(&config, "").unwrap();

    Command::cargo_bin("xutlversion-git")
        .unwrap()
        .arg(dir.path().join("missing"))
        .arg("--config")
        .arg(&config)
        .assert()
        .code(3);
}

#[test]
fn test_xutlversion_git_missing_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("xutlversion.toml");
    std::fs::write(&config, "").unwrap();

    Command::cargo_bin("xutlversion-git")
        .unwrap()
        .arg(dir.path())
        .arg("--config")
        .arg(&config)
        .assert()
        .code(4)
        .stderr(predicate::str::contains("package.json"));
}
