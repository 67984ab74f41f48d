//! Prediction submission use case.
//!
//! Sends a feature window to the remote model and records the forecast in
//! the ledger. Nothing is recorded unless the forecast arrives and
//! validates.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::store::PredictionStore;
use crate::domain::{DomainError, FeatureWindow, PredictionDraft, PredictionRecord, Ticker};
use crate::error::Result;
use crate::port::Predictor;

/// Tickers offered by the stock dashboard out of the box.
pub const DEFAULT_TICKERS: [&str; 5] = ["Amazon", "Apple", "Facebook", "Google", "Netflix"];

/// Requests forecasts and appends them to the ledger.
pub struct PredictionService {
    store: Arc<PredictionStore>,
    predictor: Arc<dyn Predictor>,
    allowed: Option<BTreeSet<Ticker>>,
}

impl std::fmt::Debug for PredictionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionService")
            .field("predictor", &self.predictor.name())
            .field("allowed", &self.allowed)
            .finish_non_exhaustive()
    }
}

impl PredictionService {
    /// A service that accepts any ticker.
    #[must_use]
    pub fn new(store: Arc<PredictionStore>, predictor: Arc<dyn Predictor>) -> Self {
        Self {
            store,
            predictor,
            allowed: None,
        }
    }

    /// Restrict submissions to `tickers`. An empty list lifts the
    /// restriction.
    #[must_use]
    pub fn with_allowed_tickers(mut self, tickers: impl IntoIterator<Item = Ticker>) -> Self {
        let set: BTreeSet<Ticker> = tickers.into_iter().collect();
        self.allowed = (!set.is_empty()).then_some(set);
        self
    }

    /// Whether `ticker` may be submitted.
    #[must_use]
    pub fn accepts(&self, ticker: &Ticker) -> bool {
        self.allowed.as_ref().map_or(true, |set| set.contains(ticker))
    }

    /// Request a forecast for `ticker` and record it.
    ///
    /// # Errors
    ///
    /// - [`DomainError::UnsupportedTicker`] if the ticker is not allowed.
    /// - Any predictor error, such as
    ///   [`Error::RemoteService`](crate::error::Error::RemoteService).
    /// - A domain error if the forecast price or confidence is invalid.
    /// - A persistence error.
    ///
    /// The ledger is unchanged in every error case.
    pub async fn submit(&self, ticker: &Ticker, features: &FeatureWindow) -> Result<PredictionRecord> {
        if !self.accepts(ticker) {
            return Err(DomainError::UnsupportedTicker {
                ticker: ticker.to_string(),
            }
            .into());
        }

        let forecast = match self.predictor.predict(ticker, features).await {
            Ok(forecast) => forecast,
            Err(e) => {
                warn!(
                    ticker = %ticker,
                    predictor = self.predictor.name(),
                    error = %e,
                    "Prediction request failed"
                );
                return Err(e);
            }
        };

        let draft = PredictionDraft::new(
            ticker.clone(),
            Utc::now(),
            forecast.prediction,
            forecast.confidence,
        )?;
        let record = self.store.append_draft(draft)?;

        info!(
            id = %record.id(),
            ticker = %ticker,
            predicted = record.predicted_price(),
            confidence = record.confidence(),
            last_close = features.last_close(),
            "Prediction submitted"
        );
        Ok(record)
    }
}
