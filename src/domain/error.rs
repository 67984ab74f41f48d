//! Domain validation errors for core domain types.
//!
//! This module defines errors that occur when domain invariants are violated.
//! These errors are returned by the validating constructors of ledger types.
//!
//! # Examples
//!
//! ```
//! use foresight::domain::error::DomainError;
//! use foresight::domain::Ticker;
//!
//! assert!(matches!(Ticker::new(""), Err(DomainError::EmptyTicker)));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Tickers must contain at least one non-whitespace character.
    #[error("ticker cannot be empty")]
    EmptyTicker,

    /// The ticker is not in the configured allow-list.
    #[error("ticker {ticker} is not supported")]
    UnsupportedTicker {
        /// The rejected ticker.
        ticker: String,
    },

    /// Prices must be finite and strictly positive.
    #[error("{field} must be a finite positive number, got {value}")]
    NonPositivePrice {
        /// Which price was invalid.
        field: &'static str,
        /// The invalid value that was provided.
        value: f64,
    },

    /// Confidence is a percentage.
    #[error("confidence must be within [0, 100], got {value}")]
    ConfidenceOutOfRange {
        /// The invalid confidence that was provided.
        value: f64,
    },

    /// Feature windows have a fixed shape.
    #[error("feature window must be {expected_rows}x{expected_cols} finite values: {reason}")]
    FeatureShape {
        /// Required number of rows.
        expected_rows: usize,
        /// Required number of columns.
        expected_cols: usize,
        /// What was wrong with the input.
        reason: String,
    },

    /// `resolved` and `actualPrice` disagree in a persisted record.
    #[error("record {id}: resolved={resolved} but actual price is {actual}")]
    InconsistentResolution {
        /// Raw id of the offending record.
        id: u64,
        /// The persisted resolved flag.
        resolved: bool,
        /// Description of the persisted actual price.
        actual: &'static str,
    },
}
