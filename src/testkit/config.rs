//! Canonical test configurations.
//!
//! Single source of truth for config files used across tests. Every path
//! points inside a caller-provided directory so tests never touch the
//! user's home.

use std::path::{Path, PathBuf};

use crate::infrastructure::config::settings::Config;

/// TOML for a config whose ledger and price feed live under `dir`.
///
/// `backend` is `"json"` or `"sqlite"`; `base_url` is the predictor root.
pub fn toml_in(dir: &Path, backend: &str, base_url: &str) -> String {
    let ledger = match backend {
        "sqlite" => dir.join("ledger.db"),
        _ => dir.join("ledger.json"),
    };
    format!(
        r#"tickers = ["Amazon", "Apple", "Facebook", "Google", "Netflix"]

[ledger]
backend = "{backend}"
path = "{ledger}"

[predictor]
base_url = "{base_url}"
timeout_secs = 5

[reconciler]
interval_secs = 1

[prices]
feed_path = "{prices}"

[logging]
level = "warn"
"#,
        ledger = ledger.display(),
        prices = dir.join("prices.json").display(),
    )
}

/// Parsed [`Config`] for [`toml_in`] with a JSON ledger.
pub fn config_in(dir: &Path) -> Config {
    Config::parse_toml(&toml_in(dir, "json", "http://127.0.0.1:9")).expect("test config is valid")
}

/// Write [`toml_in`] to `dir/config.toml` and return its path.
pub fn write_config(dir: &Path, backend: &str, base_url: &str) -> PathBuf {
    let path = dir.join("config.toml");
    std::fs::write(&path, toml_in(dir, backend, base_url)).expect("write test config");
    path
}
