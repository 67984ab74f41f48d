//! Reconciler and actual-price feed configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::application::reconciler::DEFAULT_INTERVAL;

/// `[reconciler]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ReconcilerConfig {
    /// Seconds between reconciliation ticks.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

const fn default_interval_secs() -> u64 {
    DEFAULT_INTERVAL.as_secs()
}

impl ReconcilerConfig {
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

/// `[prices]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceFeedConfig {
    /// JSON file of daily closes keyed by ticker then date.
    #[serde(default = "default_feed_path")]
    pub feed_path: String,
}

fn default_feed_path() -> String {
    "~/.foresight/prices.json".to_string()
}

impl Default for PriceFeedConfig {
    fn default() -> Self {
        Self {
            feed_path: default_feed_path(),
        }
    }
}
