//! Builders for domain primitives used across tests.
//!
//! Provides concise factory functions for [`Ticker`], timestamps,
//! [`PredictionRecord`] and [`FeatureWindow`] so tests focus on assertions
//! rather than construction boilerplate.

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::domain::{FeatureWindow, PredictionDraft, PredictionId, PredictionRecord, Ticker};

/// Confidence given to records built by [`record`].
pub const DEFAULT_CONFIDENCE: f64 = 80.0;

/// Create a [`Ticker`] from a string.
pub fn ticker(symbol: &str) -> Ticker {
    Ticker::new(symbol).expect("test ticker should be non-empty")
}

/// `n` days after Monday 2026-01-05 10:00 UTC.
///
/// `at_day(0)` is a Monday, so `at_day(1)` is its resolution date.
pub fn at_day(n: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 5, 10, 0, 0)
        .single()
        .expect("base timestamp is unambiguous")
        + Duration::days(n)
}

/// An unresolved record with [`DEFAULT_CONFIDENCE`].
pub fn record(id: u64, symbol: &str, created_at: DateTime<Utc>, predicted: f64) -> PredictionRecord {
    PredictionRecord::new(
        PredictionId::new(id),
        created_at,
        ticker(symbol),
        predicted,
        DEFAULT_CONFIDENCE,
    )
    .expect("test record should be valid")
}

/// A record already resolved at `actual`.
///
/// Built through the persisted layout, the same path a reloaded ledger
/// takes.
pub fn resolved(
    id: u64,
    symbol: &str,
    created_at: DateTime<Utc>,
    predicted: f64,
    actual: f64,
) -> PredictionRecord {
    let mut raw = crate::domain::PersistedRecord::from(record(id, symbol, created_at, predicted));
    raw.actual_price = Some(actual);
    raw.resolved = true;
    PredictionRecord::try_from(raw).expect("test resolution should be valid")
}

/// An id-less draft with [`DEFAULT_CONFIDENCE`].
pub fn draft(symbol: &str, created_at: DateTime<Utc>, predicted: f64) -> PredictionDraft {
    PredictionDraft::new(ticker(symbol), created_at, predicted, DEFAULT_CONFIDENCE)
        .expect("test draft should be valid")
}

/// A valid 30x6 feature window with a rising close.
pub fn feature_window() -> FeatureWindow {
    let rows = (0..30)
        .map(|i| {
            let close = 100.0 + i as f64;
            vec![close, 1_000_000.0, close - 1.0, close - 3.0, 0.02, 55.0]
        })
        .collect();
    FeatureWindow::new(rows).expect("test feature window should be valid")
}
