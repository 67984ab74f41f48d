//! Remote prediction service configuration.

use std::time::Duration;

use serde::Deserialize;

/// `[predictor]` section.
///
/// The API key is never read from the file; it comes from the
/// `FORESIGHT_API_KEY` environment variable.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictorConfig {
    /// Service root; requests go to `{base_url}/predict/{ticker}`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(skip)]
    pub api_key: Option<String>,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

impl PredictorConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            api_key: None,
        }
    }
}
