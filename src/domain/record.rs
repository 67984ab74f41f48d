//! Prediction ledger entries.
//!
//! A [`PredictionRecord`] is immutable apart from a single transition from
//! unresolved to resolved, which attaches the observed actual price. The
//! transition is crate-private so only the store can perform it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::accuracy::{accuracy, AccuracyBand};
use super::error::DomainError;
use super::id::{PredictionId, Ticker};

/// Validate a price: finite and strictly positive.
pub(crate) fn validate_price(field: &'static str, value: f64) -> Result<f64, DomainError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(DomainError::NonPositivePrice { field, value })
    }
}

/// Validate a confidence percentage.
pub(crate) fn validate_confidence(value: f64) -> Result<f64, DomainError> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(DomainError::ConfidenceOutOfRange { value })
    }
}

/// A prediction that has not been assigned an id yet.
///
/// The store turns a draft into a [`PredictionRecord`] by allocating the
/// next id under its lock.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionDraft {
    ticker: Ticker,
    created_at: DateTime<Utc>,
    predicted_price: f64,
    confidence: f64,
}

impl PredictionDraft {
    /// Create a validated draft.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if the price is not positive or the
    /// confidence falls outside `[0, 100]`.
    pub fn new(
        ticker: Ticker,
        created_at: DateTime<Utc>,
        predicted_price: f64,
        confidence: f64,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            ticker,
            created_at,
            predicted_price: validate_price("predicted price", predicted_price)?,
            confidence: validate_confidence(confidence)?,
        })
    }

    /// Attach an id, producing an unresolved record.
    #[must_use]
    pub fn into_record(self, id: PredictionId) -> PredictionRecord {
        PredictionRecord {
            id,
            created_at: self.created_at,
            ticker: self.ticker,
            predicted_price: self.predicted_price,
            confidence: self.confidence,
            actual_price: None,
        }
    }

    #[must_use]
    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }
}

/// One prediction event in the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PersistedRecord", into = "PersistedRecord")]
pub struct PredictionRecord {
    id: PredictionId,
    created_at: DateTime<Utc>,
    ticker: Ticker,
    predicted_price: f64,
    confidence: f64,
    /// `Some` exactly when the record is resolved.
    actual_price: Option<f64>,
}

impl PredictionRecord {
    /// Create a new, unresolved record.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if the price or confidence is invalid.
    pub fn new(
        id: PredictionId,
        created_at: DateTime<Utc>,
        ticker: Ticker,
        predicted_price: f64,
        confidence: f64,
    ) -> Result<Self, DomainError> {
        Ok(PredictionDraft::new(ticker, created_at, predicted_price, confidence)?.into_record(id))
    }

    #[must_use]
    pub fn id(&self) -> PredictionId {
        self.id
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    #[must_use]
    pub fn predicted_price(&self) -> f64 {
        self.predicted_price
    }

    #[must_use]
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// The observed actual price, present once resolved.
    #[must_use]
    pub fn actual_price(&self) -> Option<f64> {
        self.actual_price
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.actual_price.is_some()
    }

    /// Per-record accuracy percentage, `None` while unresolved.
    #[must_use]
    pub fn accuracy(&self) -> Option<f64> {
        self.actual_price
            .map(|actual| accuracy(self.predicted_price, actual))
    }

    /// Display band for this record.
    #[must_use]
    pub fn band(&self) -> AccuracyBand {
        AccuracyBand::classify(self.accuracy())
    }

    /// Attach the actual price. Only valid on unresolved records; the store
    /// checks that before calling.
    pub(crate) fn mark_resolved(&mut self, actual_price: f64) {
        debug_assert!(self.actual_price.is_none());
        self.actual_price = Some(actual_price);
    }

    /// Undo a resolution that could not be persisted.
    pub(crate) fn clear_resolution(&mut self) {
        self.actual_price = None;
    }
}

/// Flat persisted layout of a [`PredictionRecord`].
///
/// This is the exchange format with storage collaborators. Converting back
/// into a record re-validates every invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedRecord {
    pub id: PredictionId,
    pub created_at: DateTime<Utc>,
    pub ticker: String,
    pub predicted_price: f64,
    pub confidence: f64,
    pub actual_price: Option<f64>,
    pub resolved: bool,
}

impl From<PredictionRecord> for PersistedRecord {
    fn from(record: PredictionRecord) -> Self {
        Self {
            id: record.id,
            created_at: record.created_at,
            ticker: record.ticker.into(),
            predicted_price: record.predicted_price,
            confidence: record.confidence,
            resolved: record.actual_price.is_some(),
            actual_price: record.actual_price,
        }
    }
}

impl From<&PredictionRecord> for PersistedRecord {
    fn from(record: &PredictionRecord) -> Self {
        record.clone().into()
    }
}

impl TryFrom<PersistedRecord> for PredictionRecord {
    type Error = DomainError;

    fn try_from(raw: PersistedRecord) -> Result<Self, Self::Error> {
        let mut record = PredictionRecord::new(
            raw.id,
            raw.created_at,
            Ticker::new(&raw.ticker)?,
            raw.predicted_price,
            raw.confidence,
        )?;

        match (raw.resolved, raw.actual_price) {
            (true, Some(actual)) => {
                record.mark_resolved(validate_price("actual price", actual)?);
            }
            (false, None) => {}
            (true, None) => {
                return Err(DomainError::InconsistentResolution {
                    id: raw.id.value(),
                    resolved: true,
                    actual: "missing",
                })
            }
            (false, Some(_)) => {
                return Err(DomainError::InconsistentResolution {
                    id: raw.id.value(),
                    resolved: false,
                    actual: "present",
                })
            }
        }

        Ok(record)
    }
}
