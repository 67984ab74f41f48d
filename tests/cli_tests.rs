//! CLI integration tests.

mod support;

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use foresight::testkit::config::write_config;
use predicates::prelude::*;
use support::http::serve_once;

const UNREACHABLE: &str = "http://127.0.0.1:9";

fn foresight(dir: &Path, config: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("foresight");
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("FORESIGHT_API_KEY")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(config);
    cmd
}

fn features_file(dir: &Path) -> PathBuf {
    let rows: Vec<Vec<f64>> = (0..30)
        .map(|i| {
            let close = 100.0 + f64::from(i);
            vec![close, 1_000_000.0, close - 1.0, close - 3.0, 0.02, 55.0]
        })
        .collect();
    let path = dir.join("features.json");
    std::fs::write(&path, serde_json::json!({ "values": rows }).to_string()).unwrap();
    path
}

fn seed_ledger(dir: &Path, json: &str) {
    std::fs::write(dir.join("ledger.json"), json).unwrap();
}

const ONE_OPEN_RECORD: &str = r#"[{"id":1,"createdAt":"2026-01-05T10:00:00Z","ticker":"Amazon","predictedPrice":100.0,"confidence":80.0,"actualPrice":null,"resolved":false}]"#;

#[test]
fn test_help_lists_commands() {
    cargo_bin_cmd!("foresight")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("predict"))
        .stdout(predicate::str::contains("reconcile"))
        .stdout(predicate::str::contains("accuracy"))
        .stdout(predicate::str::contains("history"))
        .stdout(predicate::str::contains("export"));
}

#[test]
fn test_export_empty_ledger_prints_empty_array() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "json", UNREACHABLE);

    foresight(dir.path(), &config)
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::diff("[]\n"));
}

#[test]
fn test_export_empty_sqlite_ledger_prints_empty_array() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "sqlite", UNREACHABLE);

    foresight(dir.path(), &config)
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::diff("[]\n"));
}

#[test]
fn test_accuracy_without_data_shows_na() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "json", UNREACHABLE);

    foresight(dir.path(), &config)
        .args(["accuracy", "Apple"])
        .assert()
        .success()
        .stdout(predicate::str::contains("N/A"));
}

#[test]
fn test_accuracy_json_reports_null_without_data() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "json", UNREACHABLE);

    let output = foresight(dir.path(), &config)
        .args(["--json", "accuracy", "Apple"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let windows = value["windows"].as_array().unwrap();
    assert_eq!(windows.len(), 3);
    assert!(windows.iter().all(|w| w["accuracy"].is_null()));
}

#[test]
fn test_history_empty_ledger() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "json", UNREACHABLE);

    foresight(dir.path(), &config)
        .args(["history", "Netflix"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No predictions yet"));
}

#[test]
fn test_invalid_config_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "[reconciler]\ninterval_secs = 0\n").unwrap();

    foresight(dir.path(), &config)
        .arg("export")
        .assert()
        .failure()
        .stderr(predicate::str::contains("interval_secs"));
}

#[test]
fn test_missing_explicit_config_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();

    foresight(dir.path(), &dir.path().join("absent.toml"))
        .arg("export")
        .assert()
        .failure()
        .stderr(predicate::str::contains("config"));
}

#[test]
fn test_predict_unreachable_service_records_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "json", UNREACHABLE);
    let features = features_file(dir.path());

    foresight(dir.path(), &config)
        .args(["predict", "Amazon", "--features"])
        .arg(&features)
        .assert()
        .failure();

    foresight(dir.path(), &config)
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::diff("[]\n"));
}

#[test]
fn test_predict_unsupported_ticker_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "json", UNREACHABLE);
    let features = features_file(dir.path());

    foresight(dir.path(), &config)
        .args(["predict", "Tesla", "--features"])
        .arg(&features)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Tesla"));
}

#[test]
fn test_predict_malformed_features_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "json", UNREACHABLE);
    let features = dir.path().join("features.json");
    std::fs::write(&features, r#"{"values": [[1.0, 2.0]]}"#).unwrap();

    foresight(dir.path(), &config)
        .args(["predict", "Amazon", "--features"])
        .arg(&features)
        .assert()
        .failure();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_predict_records_forecast() {
    let dir = tempfile::tempdir().unwrap();
    let (url, server) = serve_once(200, r#"{"prediction":181.5,"confidence":70.0}"#).await;
    let config = write_config(dir.path(), "json", &url);
    let features = features_file(dir.path());
    let workdir = dir.path().to_path_buf();

    let output = tokio::task::spawn_blocking(move || {
        foresight(&workdir, &config)
            .args(["--json", "predict", "Amazon", "--features"])
            .arg(&features)
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["record"]["id"], 1);
    assert_eq!(value["record"]["predictedPrice"], 181.5);
    assert_eq!(value["record"]["resolved"], false);

    let request = server.await.unwrap();
    assert!(request.request_line.starts_with("POST /predict/Amazon "));

    let ledger = std::fs::read_to_string(dir.path().join("ledger.json")).unwrap();
    assert!(ledger.contains("\"ticker\": \"Amazon\""));
}

#[test]
fn test_reconcile_once_resolves_and_history_shows_accuracy() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "json", UNREACHABLE);
    seed_ledger(dir.path(), ONE_OPEN_RECORD);
    std::fs::write(
        dir.path().join("prices.json"),
        r#"{"Amazon": {"2026-01-06": 105.0}}"#,
    )
    .unwrap();

    foresight(dir.path(), &config)
        .args(["--json", "reconcile", "--once"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"resolved\":1"));

    foresight(dir.path(), &config)
        .args(["history", "Amazon"])
        .assert()
        .success()
        .stdout(predicate::str::contains("105.00"))
        .stdout(predicate::str::contains("95.24%"))
        .stdout(predicate::str::contains("high"));
}

#[test]
fn test_reconcile_once_without_feed_keeps_prediction_open() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "json", UNREACHABLE);
    seed_ledger(dir.path(), ONE_OPEN_RECORD);

    foresight(dir.path(), &config)
        .args(["--json", "reconcile", "--once"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"failed\":1"));

    foresight(dir.path(), &config)
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"resolved\": false"));
}

#[test]
fn test_corrupted_ledger_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "json", UNREACHABLE);
    seed_ledger(dir.path(), "{broken");

    foresight(dir.path(), &config)
        .args(["history", "Amazon"])
        .assert()
        .failure();
}
