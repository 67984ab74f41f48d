//! Foresight - prediction ledger and accuracy evaluation.
//!
//! Records next-day price predictions produced by a remote model, resolves
//! them once the actual close is known and reports how accurate they were.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - **`domain`** - Records, tickers, accuracy scoring, windows, calendar
//! - **`port`** - Traits for ledger storage, the price source and the model
//! - **`application`** - Store, reconciler, aggregator, presenter, submission
//! - **`adapter`** - JSON/SQLite ledgers, HTTP predictor, price feed, CLI
//! - **`infrastructure`** - Configuration and the composition root
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use chrono::Utc;
//! use foresight::adapter::outbound::json::JsonFileLedger;
//! use foresight::application::aggregator::AccuracyAggregator;
//! use foresight::application::store::PredictionStore;
//! use foresight::domain::Ticker;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(PredictionStore::open(Box::new(JsonFileLedger::new("ledger.json")))?);
//!     let aggregator = AccuracyAggregator::new(store);
//!     for window in aggregator.summarize(&Ticker::new("Apple")?, Utc::now()) {
//!         println!("{}: {:?}", window.window, window.accuracy);
//!     }
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
