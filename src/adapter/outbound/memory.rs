//! In-process ledger persistence.
//!
//! Keeps the persisted ledger in shared memory. Clones share the same
//! backing storage, so a test can hand one clone to the store and inspect
//! what was persisted through another. Writes can be switched to fail to
//! exercise the store's rollback path.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::domain::PredictionRecord;
use crate::error::{Error, Result};
use crate::port::LedgerPersistence;

#[derive(Debug, Default)]
struct Shared {
    records: Mutex<Vec<PredictionRecord>>,
    fail_writes: AtomicBool,
}

/// Memory-backed [`LedgerPersistence`].
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    shared: Arc<Shared>,
}

impl MemoryLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already-persisted ledger.
    #[must_use]
    pub fn with_records(records: Vec<PredictionRecord>) -> Self {
        let ledger = Self::default();
        *ledger.shared.records.lock() = records;
        ledger
    }

    /// Make subsequent `persist` calls fail (or succeed again).
    pub fn fail_writes(&self, fail: bool) {
        self.shared.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// What was last persisted.
    #[must_use]
    pub fn stored(&self) -> Vec<PredictionRecord> {
        self.shared.records.lock().clone()
    }
}

impl LedgerPersistence for MemoryLedger {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn load(&self) -> Result<Vec<PredictionRecord>> {
        Ok(self.stored())
    }

    fn persist(&self, records: &[PredictionRecord]) -> Result<()> {
        if self.shared.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Database("memory ledger writes disabled".to_string()));
        }
        *self.shared.records.lock() = records.to_vec();
        Ok(())
    }
}
