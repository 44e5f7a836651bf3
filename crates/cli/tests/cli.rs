//! Offline CLI tests: account management and argument handling

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn run_cf(args: &[&str], config_dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cf"))
        .args(args)
        .env("CF_CONFIG_DIR", config_dir)
        .env_remove("CF_AUTH_TOKEN")
        .output()
        .expect("Failed to execute cf command")
}

const STORAGE: &str = "https://storage.example.com/v1/MossoCloudFS_abc";
const CDN: &str = "https://cdn.example.com/v1/MossoCloudFS_abc";

#[test]
fn test_account_lifecycle() {
    let config_dir = TempDir::new().unwrap();
    let dir = config_dir.path();

    let output = run_cf(&["account", "set", "prod", STORAGE, CDN, "token"], dir);
    assert!(output.status.success());
    assert!(dir.join("config.toml").exists());

    let output = run_cf(&["account", "list", "--json"], dir);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["accounts"][0]["name"], "prod");
    assert_eq!(json["accounts"][0]["storage_url"], STORAGE);
    assert!(json["accounts"][0].get("auth_token").is_none());

    let output = run_cf(&["account", "remove", "prod"], dir);
    assert!(output.status.success());

    let output = run_cf(&["account", "remove", "prod"], dir);
    assert_eq!(output.status.code(), Some(5));
}

#[test]
fn test_account_set_no_clobber() {
    let config_dir = TempDir::new().unwrap();
    let dir = config_dir.path();

    let output = run_cf(
        &["account", "set", "prod", STORAGE, CDN, "token", "--no-clobber"],
        dir,
    );
    assert!(output.status.success());

    let output = run_cf(
        &["account", "set", "prod", STORAGE, CDN, "other", "--no-clobber"],
        dir,
    );
    assert_eq!(output.status.code(), Some(6));

    let output = run_cf(&["account", "set", "prod", STORAGE, CDN, "other"], dir);
    assert!(output.status.success());
}

#[test]
fn test_account_set_rejects_bad_url() {
    let config_dir = TempDir::new().unwrap();
    let output = run_cf(
        &["account", "set", "prod", "not-a-url", CDN, "token"],
        config_dir.path(),
    );
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_ls_unknown_account() {
    let config_dir = TempDir::new().unwrap();
    let output = run_cf(&["ls", "nobody/photos"], config_dir.path());
    assert_eq!(output.status.code(), Some(5));
}

#[test]
fn test_ls_corrupt_config_is_not_a_missing_account() {
    let config_dir = TempDir::new().unwrap();
    std::fs::write(config_dir.path().join("config.toml"), "accounts = [[[").unwrap();

    let output = run_cf(&["ls", "prod/photos"], config_dir.path());
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("not found"));
}

#[test]
fn test_ls_bad_path() {
    let config_dir = TempDir::new().unwrap();
    let output = run_cf(&["ls", "prod"], config_dir.path());
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_rm_container_path_is_usage_error() {
    let config_dir = TempDir::new().unwrap();
    let output = run_cf(&["rm", "prod/photos"], config_dir.path());
    assert_eq!(output.status.code(), Some(2));
}
