//! Path utilities for foresight.
//!
//! All data lives under `~/.foresight/` by default:
//! - `~/.foresight/config.toml` - main configuration
//! - `~/.foresight/ledger.json` - prediction ledger
//! - `~/.foresight/prices.json` - actual-price feed

use std::path::PathBuf;

/// Returns the foresight home directory (`~/.foresight/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".foresight")
}

/// Returns the default config file path (`~/.foresight/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}
