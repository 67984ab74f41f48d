//! Display-ready prediction history.
//!
//! Entries are ordered most recent first by creation time, with ties broken
//! by id descending, so rendering an unchanged ledger always produces the
//! same sequence.

use std::cmp::Reverse;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::store::PredictionStore;
use crate::domain::{AccuracyBand, PredictionId, PredictionRecord, Ticker};

/// One row of the history view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: PredictionId,
    pub date: DateTime<Utc>,
    pub predicted_price: f64,
    pub actual_price: Option<f64>,
    /// Per-record accuracy, absent while pending.
    pub accuracy: Option<f64>,
    pub band: AccuracyBand,
}

impl From<&PredictionRecord> for HistoryEntry {
    fn from(record: &PredictionRecord) -> Self {
        Self {
            id: record.id(),
            date: record.created_at(),
            predicted_price: record.predicted_price(),
            actual_price: record.actual_price(),
            accuracy: record.accuracy(),
            band: record.band(),
        }
    }
}

/// Order and classify records for display.
#[must_use]
pub fn present(records: &[PredictionRecord]) -> Vec<HistoryEntry> {
    let mut entries: Vec<HistoryEntry> = records.iter().map(HistoryEntry::from).collect();
    entries.sort_by_key(|e| Reverse((e.date, e.id)));
    entries
}

/// Builds the history view for a ticker from the store.
#[derive(Debug, Clone)]
pub struct HistoryPresenter {
    store: Arc<PredictionStore>,
}

impl HistoryPresenter {
    #[must_use]
    pub fn new(store: Arc<PredictionStore>) -> Self {
        Self { store }
    }

    /// All predictions for `ticker`, newest first.
    #[must_use]
    pub fn history(&self, ticker: &Ticker) -> Vec<HistoryEntry> {
        present(&self.store.list_by_ticker(ticker))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::domain::{at_day, record, resolved};

    #[test]
    fn newest_first() {
        let records = vec![
            record(1, "X", at_day(0), 100.0),
            record(2, "X", at_day(2), 100.0),
            record(3, "X", at_day(1), 100.0),
        ];
        let ids: Vec<u64> = present(&records).iter().map(|e| e.id.value()).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn equal_timestamps_break_ties_by_id_descending() {
        let records = vec![
            record(4, "X", at_day(0), 100.0),
            record(9, "X", at_day(0), 100.0),
            record(6, "X", at_day(0), 100.0),
        ];
        let ids: Vec<u64> = present(&records).iter().map(|e| e.id.value()).collect();
        assert_eq!(ids, vec![9, 6, 4]);
    }

    #[test]
    fn repeated_presentation_is_identical() {
        let records = vec![
            record(1, "X", at_day(0), 100.0),
            resolved(2, "X", at_day(0), 100.0, 90.0),
        ];
        assert_eq!(present(&records), present(&records));
    }

    #[test]
    fn pending_entries_carry_no_accuracy() {
        let entry = &present(&[record(1, "X", at_day(0), 100.0)])[0];
        assert_eq!(entry.band, AccuracyBand::Pending);
        assert_eq!(entry.accuracy, None);
        assert_eq!(entry.actual_price, None);
    }

    #[test]
    fn resolved_entries_are_banded() {
        let records = vec![
            resolved(1, "X", at_day(0), 100.0, 105.0),
            resolved(2, "X", at_day(1), 70.0, 100.0),
            resolved(3, "X", at_day(2), 50.0, 100.0),
        ];
        let bands: Vec<AccuracyBand> = present(&records).iter().map(|e| e.band).collect();
        assert_eq!(
            bands,
            vec![AccuracyBand::Low, AccuracyBand::Medium, AccuracyBand::High]
        );
    }

    #[test]
    fn serializes_for_rendering() {
        let entry = &present(&[record(1, "X", at_day(0), 100.0)])[0];
        let json = serde_json::to_value(entry).unwrap();
        assert_eq!(json["band"], "pending");
        assert!(json["actualPrice"].is_null());
        assert_eq!(json["predictedPrice"], 100.0);
    }
}
