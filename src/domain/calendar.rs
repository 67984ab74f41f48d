//! Trading-day arithmetic.
//!
//! Weekends are the only non-trading days modelled; exchange holidays are
//! left to the actual-price source, which simply reports "not yet available"
//! for a date without a close.

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};

/// True for Monday through Friday.
#[must_use]
pub fn is_trading_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The first trading day strictly after `date`.
#[must_use]
pub fn next_trading_day(date: NaiveDate) -> NaiveDate {
    let mut next = date;
    loop {
        next = match next.succ_opt() {
            Some(d) => d,
            None => return next,
        };
        if is_trading_day(next) {
            return next;
        }
    }
}

/// The date whose close resolves a prediction made at `created_at`.
#[must_use]
pub fn resolution_date(created_at: DateTime<Utc>) -> NaiveDate {
    next_trading_day(created_at.date_naive())
}
