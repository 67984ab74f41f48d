//! Database model types for Diesel ORM.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::predictions;
use crate::domain::{PersistedRecord, PredictionId, PredictionRecord};
use crate::error::{Error, Result};

/// Database row for a prediction.
#[derive(Queryable, Selectable, Insertable, AsChangeset, Debug, Clone, PartialEq)]
#[diesel(table_name = predictions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PredictionRow {
    pub id: i64,
    /// Insertion position within the ledger.
    pub seq: i64,
    /// RFC 3339 timestamp.
    pub created_at: String,
    pub ticker: String,
    pub predicted_price: f64,
    pub confidence: f64,
    pub actual_price: Option<f64>,
    pub resolved: bool,
}

impl PredictionRow {
    /// Build a row from a record at ledger position `seq`.
    ///
    /// # Errors
    /// Returns an error if the id does not fit SQLite's signed integer.
    pub fn from_record(record: &PredictionRecord, seq: usize) -> Result<Self> {
        let raw = PersistedRecord::from(record);
        let id = i64::try_from(raw.id.value())
            .map_err(|_| Error::Parse(format!("prediction id {} exceeds i64", raw.id)))?;
        Ok(Self {
            id,
            seq: seq as i64,
            created_at: raw.created_at.to_rfc3339(),
            ticker: raw.ticker,
            predicted_price: raw.predicted_price,
            confidence: raw.confidence,
            actual_price: raw.actual_price,
            resolved: raw.resolved,
        })
    }

    /// Convert back into a validated record.
    ///
    /// # Errors
    /// Returns an error if the row is malformed or violates a ledger
    /// invariant.
    pub fn into_record(self) -> Result<PredictionRecord> {
        let id = u64::try_from(self.id)
            .map_err(|_| Error::Parse(format!("negative prediction id {}", self.id)))?;
        let created_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| Error::Parse(e.to_string()))?
            .with_timezone(&Utc);

        let raw = PersistedRecord {
            id: PredictionId::new(id),
            created_at,
            ticker: self.ticker,
            predicted_price: self.predicted_price,
            confidence: self.confidence,
            actual_price: self.actual_price,
            resolved: self.resolved,
        };
        Ok(PredictionRecord::try_from(raw)?)
    }
}
