use assert_cmd::Command;
use motiondrill::config::{Config, ConfigStore, FileConfigStore};
use tempfile::tempdir;

#[test]
fn init_config_writes_defaults_with_overrides() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("motiondrill").join("config.json");

    Command::cargo_bin("motiondrill")
        .unwrap()
        .args(["--init-config", "--size", "12", "--config"])
        .arg(&path)
        .assert()
        .success();

    let loaded = FileConfigStore::with_path(&path).load().unwrap();
    assert_eq!(
        loaded,
        Config {
            session_size: 12,
            ..Config::default()
        }
    );
}

#[test]
fn refuses_to_start_without_a_tty() {
    let dir = tempdir().unwrap();

    let output = Command::cargo_bin("motiondrill")
        .unwrap()
        .arg("--config")
        .arg(dir.path().join("config.json"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("stdin must be a tty"), "stderr: {stderr}");
}

#[test]
fn help_mentions_commands() {
    let output = Command::cargo_bin("motiondrill")
        .unwrap()
        .arg("--help")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(":config N"));
    assert!(stdout.contains("--size"));
}
