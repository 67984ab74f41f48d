//! Infrastructure configuration modules.

pub mod ledger;
pub mod logging;
pub mod predictor;
pub mod reconciler;
pub mod settings;
