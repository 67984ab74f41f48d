//! HTTP client for the remote prediction model.
//!
//! Provides an implementation of the [`Predictor`] trait that posts the
//! feature window to `{base_url}/predict/{ticker}`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use crate::domain::{FeatureWindow, Ticker};
use crate::error::{ConfigError, Error, Result};
use crate::port::{Forecast, Predictor};

/// Header carrying the service API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Environment variable the API key is read from.
pub const API_KEY_ENV: &str = "FORESIGHT_API_KEY";

/// Remote prediction service client.
#[derive(Debug)]
pub struct HttpPredictor {
    /// HTTP client for API requests.
    client: Client,
    /// Service root.
    base_url: Url,
    /// Optional API key sent on every request.
    api_key: Option<String>,
}

impl HttpPredictor {
    /// Create a client for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute URL or the
    /// HTTP client cannot be built.
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| ConfigError::InvalidValue {
            field: "base_url",
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidValue {
                field: "base_url",
                reason: format!("{base_url} cannot carry a path"),
            }
            .into());
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// `{base_url}/predict/{ticker}` with the ticker as one encoded segment.
    fn endpoint(&self, ticker: &Ticker) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("predict").push(ticker.as_str());
        }
        url
    }
}

#[async_trait]
impl Predictor for HttpPredictor {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn predict(&self, ticker: &Ticker, features: &FeatureWindow) -> Result<Forecast> {
        let url = self.endpoint(ticker);
        debug!(%url, "Requesting forecast");

        let mut request = self.client.post(url).json(features);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Error::RemoteService(body));
        }

        let forecast: Forecast = serde_json::from_str(&body)?;
        debug!(
            ticker = %ticker,
            prediction = forecast.prediction,
            confidence = forecast.confidence,
            "Forecast received"
        );
        Ok(forecast)
    }
}
