//! Shared test helpers for integration tests

#![allow(dead_code)]

use std::path::PathBuf;

use assert_cmd::cargo;
use assert_cmd::Command;
use serde_json::json;
use tempfile::TempDir;

/// `blockchain` binary with a clean, colorless environment.
pub fn blockchain() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("blockchain"));
    cmd.env("NO_COLOR", "1")
        .env_remove("BLOCKCHAIN_CONFIG")
        .env_remove("BLOCKCHAIN_BASE_URL")
        .env_remove("BLOCKCHAIN_API_KEY")
        .env_remove("BLOCKCHAIN_TIMEOUT_SECS");
    cmd
}

/// Config file pointing the CLI at `base_url`.
pub fn config_for(temp: &TempDir, base_url: &str) -> PathBuf {
    let path = temp.path().join("config.json");
    std::fs::write(&path, json!({ "baseUrl": base_url }).to_string()).expect("write config");
    path
}

/// `blockchain --config <file>` bound to `base_url`.
pub fn blockchain_at(temp: &TempDir, base_url: &str) -> Command {
    let config = config_for(temp, base_url);
    let mut cmd = blockchain();
    cmd.arg("--config").arg(config);
    cmd
}
