//! Actual-price source port.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::Ticker;
use crate::error::Result;

/// Lookup of observed closing prices, consumed by the reconciler.
///
/// # Errors
///
/// `Ok(None)` means the price is not observable yet; that is the common
/// case and not an error. Transport or availability problems are reported
/// as [`Error::SourceUnavailable`](crate::error::Error::SourceUnavailable)
/// and retried on the next reconciliation tick.
#[async_trait]
pub trait ActualPriceSource: Send + Sync {
    /// Return the provider name for logging.
    fn name(&self) -> &'static str;

    /// Closing price of `ticker` on `date`, if already known.
    async fn price_on(&self, ticker: &Ticker, date: NaiveDate) -> Result<Option<f64>>;
}
