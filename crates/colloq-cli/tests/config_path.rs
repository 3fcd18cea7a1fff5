use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_config_path_prints_location() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("colloq")
        .env("COLLOQ_HOME", dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("config.toml\n"));
}

#[test]
fn test_config_init_writes_starter_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    assert!(!config_path.exists());

    cargo_bin_cmd!("colloq")
        .env("COLLOQ_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote config to"));

    assert!(config_path.exists());

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("collection_name = \"documents\""));
    assert!(contents.contains("chunk_size = 1000"));
}

#[test]
fn test_config_init_refuses_overwrite() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    fs::write(&config_path, "# hand-tuned, do not clobber\n").unwrap();

    cargo_bin_cmd!("colloq")
        .env("COLLOQ_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_chat_mode_requires_terminal() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("colloq")
        .env("COLLOQ_HOME", dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a terminal"));
}

#[test]
fn test_malformed_config_override_errors() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("broken.toml");
    fs::write(&config_path, "collection_name = [not toml").unwrap();

    cargo_bin_cmd!("colloq")
        .env("COLLOQ_HOME", dir.path())
        .args(["--config", config_path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
}
