//! Scripted implementations of the outbound ports.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{FeatureWindow, Ticker};
use crate::error::{Error, Result};
use crate::port::{ActualPriceSource, Forecast, Predictor};

/// [`ActualPriceSource`] answering from a fixed table.
///
/// Unknown `(ticker, date)` pairs report "not yet available"; tickers
/// registered with [`failing`](Self::failing) report the source as
/// unavailable.
#[derive(Debug, Default)]
pub struct ScriptedPriceSource {
    prices: HashMap<(String, NaiveDate), f64>,
    failing: HashSet<String>,
    calls: AtomicUsize,
}

impl ScriptedPriceSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Known close for `ticker` on `date`.
    pub fn with_price(mut self, ticker: &str, date: NaiveDate, price: f64) -> Self {
        self.prices.insert((ticker.to_string(), date), price);
        self
    }

    /// Every lookup for `ticker` fails.
    pub fn failing(mut self, ticker: &str) -> Self {
        self.failing.insert(ticker.to_string());
        self
    }

    /// Number of lookups served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ActualPriceSource for ScriptedPriceSource {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn price_on(&self, ticker: &Ticker, date: NaiveDate) -> Result<Option<f64>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(ticker.as_str()) {
            return Err(Error::SourceUnavailable {
                ticker: ticker.to_string(),
                reason: "scripted outage".to_string(),
            });
        }
        Ok(self.prices.get(&(ticker.to_string(), date)).copied())
    }
}

/// [`Predictor`] returning a canned forecast or a canned remote error.
#[derive(Debug)]
pub struct StubPredictor {
    outcome: std::result::Result<Forecast, String>,
    calls: AtomicUsize,
}

impl StubPredictor {
    pub fn returning(prediction: f64, confidence: f64) -> Self {
        Self {
            outcome: Ok(Forecast {
                prediction,
                confidence,
            }),
            calls: AtomicUsize::new(0),
        }
    }

    /// Fail every request with [`Error::RemoteService`] carrying `body`.
    pub fn failing(body: &str) -> Self {
        Self {
            outcome: Err(body.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Predictor for StubPredictor {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn predict(&self, _ticker: &Ticker, _features: &FeatureWindow) -> Result<Forecast> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone().map_err(Error::RemoteService)
    }
}
