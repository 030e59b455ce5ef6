//! End-to-end tests: the real binary against a mock API server.

mod common;

use httpmock::prelude::*;
use predicates::prelude::*;
use rstest::rstest;
use serde_json::{json, Value};
use tempfile::TempDir;

use common::{blockchain, blockchain_at};

#[rstest]
#[case(&["latest-block"], "/latestblock")]
#[case(&["rates"], "/ticker")]
#[case(&["stats"], "/stats")]
#[case(&["unconfirmed"], "/unconfirmed-transactions")]
#[case(&["block", "0000abc"], "/rawblock/0000abc")]
#[case(&["transaction", "ffee01"], "/rawtx/ffee01")]
#[case(&["block-height", "840000"], "/block-height/840000")]
#[case(&["address", "1A1z"], "/rawaddr/1A1z")]
#[case(&["transactions", "1A1z"], "/rawaddr/1A1z")]
#[case(&["balance", "1A1z"], "/balance")]
#[case(&["pools"], "/pools")]
#[case(&["convert", "USD", "500"], "/tobtc")]
fn given_json_flag_when_running_then_prints_pretty_response(
    #[case] args: &[&str],
    #[case] path: &str,
) {
    let server = MockServer::start();
    let payload = json!({
        "hash": "0000abc",
        "height": 840000,
        "nested": {"list": [1, 2, 3], "flag": true},
        "a_last_key": null
    });
    let mock = server.mock(|when, then| {
        when.method(GET).path(path);
        then.status(200).json_body(payload.clone());
    });
    let temp = TempDir::new().unwrap();

    let output = blockchain_at(&temp, &server.base_url())
        .args(args)
        .arg("--json")
        .output()
        .unwrap();

    mock.assert();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(
        stdout,
        format!("{}\n", serde_json::to_string_pretty(&payload).unwrap())
    );
    let parsed: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed, payload);
}

#[test]
fn given_balance_in_satoshis_when_running_then_shows_btc() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/balance").query_param("active", "1A1z");
        then.status(200).json_body(json!({
            "1A1z": {"final_balance": 150000000, "total_received": 300000000, "total_sent": 150000000, "n_tx": 4}
        }));
    });
    let temp = TempDir::new().unwrap();

    blockchain_at(&temp, &server.base_url())
        .args(["balance", "1A1z"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Final Balance: 1.5 BTC"))
        .stdout(predicate::str::contains("Total Received: 3 BTC"))
        .stdout(predicate::str::contains("Transactions: 4"));
    mock.assert();
}

#[test]
fn given_epoch_timestamp_when_showing_latest_block_then_iso_time() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/latestblock");
        then.status(200)
            .json_body(json!({"hash": "00ff", "height": 1, "time": 0, "block_index": 9}));
    });
    let temp = TempDir::new().unwrap();

    blockchain_at(&temp, &server.base_url())
        .arg("latest-block")
        .assert()
        .success()
        .stdout(predicate::str::contains("Time: 1970-01-01T00:00:00.000Z"))
        .stdout(predicate::str::contains("Block Index: 9"));
}

#[test]
fn given_pools_timespan_when_running_then_sent_as_query_param() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/pools")
            .query_param("timespan", "10days")
            .query_param("format", "json");
        then.status(200).json_body(json!({"Foundry USA": 250}));
    });
    let temp = TempDir::new().unwrap();

    blockchain_at(&temp, &server.base_url())
        .args(["pools", "--timespan", "10days"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Foundry USA: 250 blocks"));
    mock.assert();
}

#[test]
fn given_address_pagination_when_running_then_forwards_limit_and_offset() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/rawaddr/1A1z")
            .query_param("limit", "5")
            .query_param("offset", "10");
        then.status(200).json_body(json!({"n_tx": 0, "txs": []}));
    });
    let temp = TempDir::new().unwrap();

    blockchain_at(&temp, &server.base_url())
        .args(["transactions", "1A1z", "--limit", "5", "--offset", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 0 transactions"));
    mock.assert();
}

#[test]
fn given_structured_error_body_when_running_then_fails_with_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/rawtx/bogus");
        then.status(400)
            .json_body(json!({"message": "Transaction not found"}));
    });
    let temp = TempDir::new().unwrap();

    blockchain_at(&temp, &server.base_url())
        .args(["transaction", "bogus"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("✗"))
        .stderr(predicate::str::contains("API Error: Transaction not found"));
}

#[test]
fn given_unreachable_host_when_running_then_fails_with_transport_error() {
    let temp = TempDir::new().unwrap();

    blockchain_at(&temp, "http://127.0.0.1:1")
        .arg("latest-block")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("✗"))
        .stderr(predicate::str::contains("Request failed: error sending request"));
}

#[test]
fn given_error_status_without_message_when_running_then_request_failed() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/stats");
        then.status(503).body("Service Unavailable");
    });
    let temp = TempDir::new().unwrap();

    blockchain_at(&temp, &server.base_url())
        .arg("stats")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Request failed: status code 503"));
}

#[test]
fn given_api_key_set_when_showing_config_then_key_masked() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("cfg").join("config.json");

    blockchain()
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "--api-key", "abc123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("API key configured"));

    let stored = std::fs::read_to_string(&config).unwrap();
    assert!(stored.contains("abc123"));

    blockchain()
        .arg("--config")
        .arg(&config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current configuration:"))
        .stdout(predicate::str::contains(r#""apiKey": "***""#))
        .stdout(predicate::str::contains("abc123").not());
}

#[test]
fn given_config_from_env_var_when_setting_base_url_then_written_there() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config.json");

    blockchain()
        .env("BLOCKCHAIN_CONFIG", &config)
        .args(["config", "set", "--base-url", "http://localhost:9999"])
        .assert()
        .success();

    blockchain()
        .env("BLOCKCHAIN_CONFIG", &config)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""baseUrl": "http://localhost:9999""#))
        .stdout(predicate::str::contains(r#""apiKey": """#));
}

#[test]
fn given_invalid_base_url_when_setting_then_fails() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config.json");

    blockchain()
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "--base-url", "not-a-url"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid arguments"));
    assert!(!config.exists());
}

#[test]
fn given_config_path_command_when_running_then_prints_location() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config.json");

    blockchain()
        .arg("--config")
        .arg(&config)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(config.to_string_lossy().as_ref()));
}

#[test]
fn given_missing_positional_when_running_then_usage_error() {
    blockchain().arg("balance").assert().failure();
}

#[test]
fn given_completion_request_when_running_then_prints_script() {
    blockchain()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("blockchain"));
}

#[test]
fn given_env_base_url_when_running_then_overrides_config_file() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/ticker");
        then.status(200)
            .json_body(json!({"USD": {"last": 67234.5, "symbol": "$"}}));
    });
    let temp = TempDir::new().unwrap();

    blockchain_at(&temp, "http://127.0.0.1:1")
        .env("BLOCKCHAIN_BASE_URL", server.base_url())
        .arg("rates")
        .assert()
        .success()
        .stdout(predicate::str::contains("USD: $67,234.5"));
    mock.assert();
}

#[test]
fn given_invalid_stored_timeout_when_running_config_commands_then_still_usable() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config.json");
    std::fs::write(&config, r#"{"timeoutSecs": "never"}"#).unwrap();

    blockchain()
        .arg("--config")
        .arg(&config)
        .args(["config", "path"])
        .assert()
        .success();

    blockchain()
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "--api-key", "abc123"])
        .assert()
        .success();

    blockchain()
        .arg("--config")
        .arg(&config)
        .arg("stats")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("timeoutSecs must be a positive integer"));
}
