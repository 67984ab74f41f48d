//! Remote prediction service port.
//!
//! How a prediction is computed is opaque: the service receives a feature
//! window and answers with a price and a confidence score.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{FeatureWindow, Ticker};
use crate::error::Result;

/// Next-day forecast returned by the prediction service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Predicted closing price for the next trading day.
    pub prediction: f64,
    /// Model confidence as a percentage.
    #[serde(default)]
    pub confidence: f64,
}

/// Client for the remote prediction model.
///
/// # Errors
///
/// Any failure, including non-success responses, is reported as an error;
/// callers must not record a prediction when `predict` fails.
#[async_trait]
pub trait Predictor: Send + Sync {
    /// Return the provider name for logging.
    fn name(&self) -> &'static str;

    /// Request a forecast for `ticker` from the given feature window.
    async fn predict(&self, ticker: &Ticker, features: &FeatureWindow) -> Result<Forecast>;
}
