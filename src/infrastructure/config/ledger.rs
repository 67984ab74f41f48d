//! Ledger persistence configuration.

use serde::Deserialize;

/// Storage backend for the prediction ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerBackend {
    /// Flat JSON array, rewritten atomically on every change.
    #[default]
    Json,
    /// SQLite database through Diesel.
    Sqlite,
}

/// `[ledger]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    #[serde(default)]
    pub backend: LedgerBackend,

    /// Ledger file (JSON) or database file (SQLite). A leading `~/` is
    /// expanded to the home directory.
    ///
    /// Defaults to `~/.foresight/ledger.json`.
    #[serde(default = "default_ledger_path")]
    pub path: String,
}

fn default_ledger_path() -> String {
    "~/.foresight/ledger.json".to_string()
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            backend: LedgerBackend::default(),
            path: default_ledger_path(),
        }
    }
}
