//! Accuracy scoring and display classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Upper bound of the `medium` band; anything above is `high`.
pub const HIGH_BAND_FLOOR: f64 = 80.0;

/// Lower bound of the `medium` band; anything below is `low`.
pub const MEDIUM_BAND_FLOOR: f64 = 60.0;

/// Accuracy of one prediction as a percentage in `[0, 100]`.
///
/// `100 - |predicted - actual| / actual * 100`, clamped so a miss larger
/// than the actual price scores 0. `actual` must be positive; the ledger
/// rejects non-positive prices before they reach this point.
#[must_use]
pub fn accuracy(predicted: f64, actual: f64) -> f64 {
    let error_pct = (predicted - actual).abs() / actual * 100.0;
    (100.0 - error_pct).clamp(0.0, 100.0)
}

/// Arithmetic mean of per-record accuracies, `None` for an empty input.
#[must_use]
pub fn mean_accuracy(scores: &[f64]) -> Option<f64> {
    if scores.is_empty() {
        None
    } else {
        Some(scores.iter().sum::<f64>() / scores.len() as f64)
    }
}

/// Coarse accuracy classification used wherever a record is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccuracyBand {
    High,
    Medium,
    Low,
    /// Not resolved yet, so no accuracy exists.
    Pending,
}

impl AccuracyBand {
    /// Classify an optional accuracy; `None` means the record is pending.
    #[must_use]
    pub fn classify(accuracy: Option<f64>) -> Self {
        match accuracy {
            None => Self::Pending,
            Some(a) if a > HIGH_BAND_FLOOR => Self::High,
            Some(a) if a >= MEDIUM_BAND_FLOOR => Self::Medium,
            Some(_) => Self::Low,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Pending => "pending",
        }
    }
}

impl fmt::Display for AccuracyBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
