//! File-backed actual-price source.
//!
//! Reads closing prices from a JSON document shaped
//! `{"<ticker>": {"YYYY-MM-DD": close, ...}, ...}`. The file is re-read on
//! every lookup so an external job can append closes while the reconciler
//! runs.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::trace;

use crate::domain::Ticker;
use crate::error::{Error, Result};
use crate::port::ActualPriceSource;

type PriceTable = HashMap<String, HashMap<NaiveDate, f64>>;

/// [`ActualPriceSource`] backed by a JSON file of daily closes.
#[derive(Debug, Clone)]
pub struct JsonPriceFeed {
    path: PathBuf,
}

impl JsonPriceFeed {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_table(&self, ticker: &Ticker) -> Result<PriceTable> {
        let unavailable = |reason: String| Error::SourceUnavailable {
            ticker: ticker.to_string(),
            reason,
        };

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| unavailable(format!("{}: {e}", self.path.display())))?;
        serde_json::from_str(&content).map_err(|e| unavailable(e.to_string()))
    }
}

#[async_trait]
impl ActualPriceSource for JsonPriceFeed {
    fn name(&self) -> &'static str {
        "json-feed"
    }

    async fn price_on(&self, ticker: &Ticker, date: NaiveDate) -> Result<Option<f64>> {
        let table = self.read_table(ticker).await?;
        let close = table
            .get(ticker.as_str())
            .and_then(|closes| closes.get(&date))
            .copied()
            .filter(|close| close.is_finite() && *close > 0.0);
        trace!(ticker = %ticker, %date, ?close, "Price lookup");
        Ok(close)
    }
}
