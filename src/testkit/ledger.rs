//! Test helpers for ledger and store setup.

use std::sync::Arc;

pub use crate::adapter::outbound::memory::MemoryLedger;
use crate::application::store::PredictionStore;
use crate::domain::PredictionRecord;

/// Open a store over `ledger`, sharing its backing records.
pub fn store_over(ledger: &MemoryLedger) -> PredictionStore {
    PredictionStore::open(Box::new(ledger.clone())).expect("memory ledger should open")
}

/// Build a shared in-memory store seeded with `records`.
pub fn memory_store(records: Vec<PredictionRecord>) -> Arc<PredictionStore> {
    Arc::new(store_over(&MemoryLedger::with_records(records)))
}
