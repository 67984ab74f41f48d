//! Per-ticker accuracy over trailing windows.
//!
//! Window accuracy is the arithmetic mean of per-record accuracy over the
//! resolved records created inside the window. Unresolved records never
//! contribute. An empty window yields `None` ("no data"), which callers
//! must keep distinct from 0%.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::store::PredictionStore;
use crate::domain::{mean_accuracy, AccuracyWindow, PredictionRecord, Ticker};

/// Accuracy for one window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindowAccuracy {
    pub window: AccuracyWindow,
    /// Mean accuracy in percent, `None` when no resolved record qualifies.
    pub accuracy: Option<f64>,
    /// Number of resolved records in the window.
    pub samples: usize,
}

impl WindowAccuracy {
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.accuracy.is_some()
    }
}

/// Compute the accuracy of `records` over `window` as of `now`.
///
/// Records for other tickers must already be filtered out.
#[must_use]
pub fn window_accuracy(
    records: &[PredictionRecord],
    window: AccuracyWindow,
    now: DateTime<Utc>,
) -> WindowAccuracy {
    let scores: Vec<f64> = records
        .iter()
        .filter(|r| window.contains(r.created_at(), now))
        .filter_map(PredictionRecord::accuracy)
        .collect();

    WindowAccuracy {
        window,
        accuracy: mean_accuracy(&scores),
        samples: scores.len(),
    }
}

/// Reads the store on demand and summarizes accuracy per ticker.
#[derive(Debug, Clone)]
pub struct AccuracyAggregator {
    store: Arc<PredictionStore>,
}

impl AccuracyAggregator {
    #[must_use]
    pub fn new(store: Arc<PredictionStore>) -> Self {
        Self { store }
    }

    /// Accuracy of `ticker` over a single window.
    #[must_use]
    pub fn accuracy(
        &self,
        ticker: &Ticker,
        window: AccuracyWindow,
        now: DateTime<Utc>,
    ) -> WindowAccuracy {
        window_accuracy(&self.store.list_by_ticker(ticker), window, now)
    }

    /// Accuracy of `ticker` over every window, in display order
    /// (7 days, 30 days, all time), from one consistent snapshot.
    #[must_use]
    pub fn summarize(&self, ticker: &Ticker, now: DateTime<Utc>) -> Vec<WindowAccuracy> {
        let records = self.store.list_by_ticker(ticker);
        AccuracyWindow::ALL
            .iter()
            .map(|&window| window_accuracy(&records, window, now))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::domain::{at_day, record, resolved};

    #[test]
    fn empty_window_has_no_data() {
        let result = window_accuracy(&[], AccuracyWindow::Week, at_day(0));
        assert_eq!(result.accuracy, None);
        assert_eq!(result.samples, 0);
        assert!(!result.has_data());
    }

    #[test]
    fn unresolved_records_do_not_count() {
        let records = vec![record(1, "X", at_day(0), 100.0)];
        let result = window_accuracy(&records, AccuracyWindow::AllTime, at_day(1));
        assert_eq!(result.accuracy, None);
    }

    #[test]
    fn averages_resolved_records() {
        let records = vec![
            resolved(1, "X", at_day(0), 100.0, 100.0),
            resolved(2, "X", at_day(1), 50.0, 100.0),
        ];
        let result = window_accuracy(&records, AccuracyWindow::Week, at_day(2));
        assert_eq!(result.accuracy, Some(75.0));
        assert_eq!(result.samples, 2);
    }

    #[test]
    fn zero_accuracy_is_data_not_absence() {
        let records = vec![resolved(1, "X", at_day(0), 300.0, 100.0)];
        let result = window_accuracy(&records, AccuracyWindow::Week, at_day(1));
        assert_eq!(result.accuracy, Some(0.0));
    }

    #[test]
    fn windows_filter_by_creation_time() {
        let records = vec![
            resolved(1, "X", at_day(0), 100.0, 100.0),
            resolved(2, "X", at_day(20), 50.0, 100.0),
            resolved(3, "X", at_day(38), 80.0, 100.0),
        ];
        let now = at_day(40);

        assert_eq!(
            window_accuracy(&records, AccuracyWindow::Week, now).accuracy,
            Some(80.0)
        );
        assert_eq!(
            window_accuracy(&records, AccuracyWindow::Month, now).accuracy,
            Some(65.0)
        );
        let all = window_accuracy(&records, AccuracyWindow::AllTime, now);
        assert_eq!(all.samples, 3);
        assert!((all.accuracy.unwrap() - 230.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn summarize_reports_every_window_for_ticker_only() {
        let store = crate::testkit::ledger::memory_store(vec![
            resolved(1, "X", at_day(0), 100.0, 100.0),
            resolved(2, "Y", at_day(0), 10.0, 100.0),
        ]);
        let aggregator = AccuracyAggregator::new(store);

        let summary = aggregator.summarize(&crate::testkit::domain::ticker("X"), at_day(1));

        assert_eq!(summary.len(), 3);
        assert_eq!(
            summary.iter().map(|w| w.window).collect::<Vec<_>>(),
            AccuracyWindow::ALL.to_vec()
        );
        assert!(summary.iter().all(|w| w.accuracy == Some(100.0)));
    }
}
