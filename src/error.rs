use thiserror::Error;

use crate::domain::error::DomainError;
use crate::domain::PredictionId;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Ledger contract violations raised by the prediction store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("prediction {id} already exists in the ledger")]
    DuplicateId { id: PredictionId },

    #[error("prediction {id} not found")]
    NotFound { id: PredictionId },

    #[error("prediction {id} is already resolved")]
    AlreadyResolved { id: PredictionId },

    #[error("prediction {id} cannot be appended in a resolved state")]
    ResolvedOnAppend { id: PredictionId },

    #[error("no prediction id left after {last}")]
    IdsExhausted { last: PredictionId },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("actual-price source unavailable for {ticker}: {reason}")]
    SourceUnavailable { ticker: String, reason: String },

    #[error("prediction service error: {0}")]
    RemoteService(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("parse error: {0}")]
    Parse(String),
}

impl Error {
    /// True when the error is the benign "already resolved" race.
    #[must_use]
    pub fn is_already_resolved(&self) -> bool {
        matches!(self, Error::Ledger(LedgerError::AlreadyResolved { .. }))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
