//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; the prediction service API key is
//! taken from the `FORESIGHT_API_KEY` environment variable.
//!
//! # Example
//!
//! ```no_run
//! use foresight::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::ledger::LedgerConfig;
use super::logging::LoggingConfig;
use super::predictor::PredictorConfig;
use super::reconciler::{PriceFeedConfig, ReconcilerConfig};
use crate::adapter::outbound::http::API_KEY_ENV;
use crate::application::submission::DEFAULT_TICKERS;
use crate::domain::Ticker;
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Every section is optional. Load from a TOML file using [`Config::load`]
/// or parse directly with [`Config::parse_toml`].
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Tickers accepted for new predictions. An empty list accepts any.
    #[serde(default = "default_tickers")]
    pub tickers: Vec<String>,

    #[serde(default)]
    pub ledger: LedgerConfig,

    #[serde(default)]
    pub predictor: PredictorConfig,

    #[serde(default)]
    pub reconciler: ReconcilerConfig,

    #[serde(default)]
    pub prices: PriceFeedConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_tickers() -> Vec<String> {
    DEFAULT_TICKERS.iter().map(|t| (*t).to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tickers: default_tickers(),
            ledger: LedgerConfig::default(),
            predictor: PredictorConfig::default(),
            reconciler: ReconcilerConfig::default(),
            prices: PriceFeedConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Expand a leading `~/` to the user's home directory.
#[must_use]
pub fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(rest),
        None => PathBuf::from(path),
    }
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation
    /// fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        // Never from the config file.
        config.predictor.api_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty());

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be loaded.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Self::parse_toml("")
        }
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.predictor.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "base_url" }.into());
        }
        if !self.predictor.base_url.starts_with("http://")
            && !self.predictor.base_url.starts_with("https://")
        {
            return Err(ConfigError::InvalidValue {
                field: "base_url",
                reason: "must start with http:// or https://".to_string(),
            }
            .into());
        }
        if self.predictor.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.reconciler.interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "interval_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.ledger.path.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "ledger.path" }.into());
        }
        if self.prices.feed_path.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "prices.feed_path",
            }
            .into());
        }
        if self.tickers.iter().any(|t| t.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "tickers",
                reason: "tickers cannot be blank".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Initialize logging based on configuration.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// The ticker allow-list as validated tickers.
    ///
    /// # Errors
    ///
    /// Returns an error if a ticker is blank; [`Config::parse_toml`] already
    /// rejects that.
    pub fn allowed_tickers(&self) -> Result<Vec<Ticker>> {
        self.tickers
            .iter()
            .map(|t| Ticker::new(t).map_err(Into::into))
            .collect()
    }

    #[must_use]
    pub fn ledger_path(&self) -> PathBuf {
        expand_home(&self.ledger.path)
    }

    #[must_use]
    pub fn price_feed_path(&self) -> PathBuf {
        expand_home(&self.prices.feed_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::infrastructure::config::ledger::LedgerBackend;
    use crate::infrastructure::config::logging::LogFormat;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config.tickers.len(), 5);
        assert_eq!(config.ledger.backend, LedgerBackend::Json);
        assert_eq!(config.reconciler.interval_secs, 10);
        assert_eq!(config.predictor.timeout_secs, 10);
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_full_file_parses() {
        let config = Config::parse_toml(
            r#"
            tickers = ["Apple"]

            [ledger]
            backend = "sqlite"
            path = "/tmp/ledger.db"

            [predictor]
            base_url = "https://models.internal"
            timeout_secs = 3

            [reconciler]
            interval_secs = 60

            [prices]
            feed_path = "/tmp/prices.json"

            [logging]
            level = "debug"
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.tickers, vec!["Apple".to_string()]);
        assert_eq!(config.ledger.backend, LedgerBackend::Sqlite);
        assert_eq!(config.ledger_path(), PathBuf::from("/tmp/ledger.db"));
        assert_eq!(config.predictor.timeout().as_secs(), 3);
        assert_eq!(config.reconciler.interval().as_secs(), 60);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let result = Config::parse_toml("[reconciler]\ninterval_secs = 0\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "interval_secs",
                ..
            }))
        ));
    }

    #[test]
    fn test_empty_base_url_rejected() {
        let result = Config::parse_toml("[predictor]\nbase_url = \"\"\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingField { field: "base_url" }))
        ));
    }

    #[test]
    fn test_blank_ticker_rejected() {
        let result = Config::parse_toml("tickers = [\"Apple\", \"  \"]\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue { field: "tickers", .. }))
        ));
    }

    #[test]
    fn test_unknown_backend_is_parse_error() {
        let result = Config::parse_toml("[ledger]\nbackend = \"redis\"\n");
        assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/abs/path"), PathBuf::from("/abs/path"));
        assert!(!expand_home("~/x.json").starts_with("~"));
    }
}
