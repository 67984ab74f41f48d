//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Ledger-unique prediction identifier.
///
/// Ids handed out by the store are monotonically increasing, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictionId(u64);

impl PredictionId {
    /// Create a `PredictionId` from its raw value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// The id following this one, or `None` once the id space is used up.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }
}

impl fmt::Display for PredictionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PredictionId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Instrument identifier - newtype for type safety.
///
/// Always trimmed and non-empty; construction goes through [`Ticker::new`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Create a ticker, rejecting blank input.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyTicker`] if the trimmed input is empty.
    pub fn new(symbol: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = symbol.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyTicker);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the ticker as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Ticker {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Ticker {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Ticker> for String {
    fn from(ticker: Ticker) -> Self {
        ticker.0
    }
}
