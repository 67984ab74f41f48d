//! Trailing time windows for accuracy aggregation.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A trailing interval ending at the aggregation's "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccuracyWindow {
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "all")]
    AllTime,
}

impl AccuracyWindow {
    /// All windows in display order.
    pub const ALL: [AccuracyWindow; 3] = [Self::Week, Self::Month, Self::AllTime];

    /// Window length in days, `None` for all-time.
    #[must_use]
    pub const fn days(self) -> Option<i64> {
        match self {
            Self::Week => Some(7),
            Self::Month => Some(30),
            Self::AllTime => None,
        }
    }

    /// Short machine label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Week => "7d",
            Self::Month => "30d",
            Self::AllTime => "all",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Week => "Last 7 Days",
            Self::Month => "Last 30 Days",
            Self::AllTime => "All Time",
        }
    }

    /// Whether a prediction created at `created_at` falls in this window.
    ///
    /// Bounds are `[now - days, now]`. Records stamped after `now` are
    /// outside every window, including all-time.
    #[must_use]
    pub fn contains(self, created_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        if created_at > now {
            return false;
        }
        match self.days() {
            Some(days) => created_at >= now - Duration::days(days),
            None => true,
        }
    }
}

impl fmt::Display for AccuracyWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
