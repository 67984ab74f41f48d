//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for tickers, timestamps, records, feature windows.
//! - [`fakes`] - Scripted price source and predictor.
//! - [`ledger`] - In-memory ledgers and stores.
//! - [`config`] - Canonical test configurations.

pub mod config;
pub mod domain;
pub mod fakes;
pub mod ledger;
