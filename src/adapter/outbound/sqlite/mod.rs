//! SQLite persistence adapters.
//!
//! Provides a SQLite-backed ledger using Diesel ORM.

pub mod database;
pub mod ledger;

pub use ledger::SqliteLedger;
