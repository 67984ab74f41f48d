//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe infrastructure dependencies: ledger storage,
//! the actual-price feed, and the remote prediction model.

pub mod persistence;
pub mod predictor;
pub mod price;
