//! Ledger persistence port.
//!
//! The prediction store owns the authoritative ledger in memory and writes
//! it through this port after every mutation. Persistence is injected, so
//! the store never touches files or databases directly.

use crate::domain::PredictionRecord;
use crate::error::Result;

/// Durable storage for the full ledger.
///
/// # Implementation Notes
///
/// - Calls are synchronous; the store persists before returning from
///   `append`/`resolve`, so the write must be durable when `persist` returns.
/// - `persist` receives the complete ledger in insertion order and must
///   replace the stored state atomically: after a crash, `load` returns
///   either the previous or the new ledger, never a mix.
/// - `load` must return records in the order they were persisted.
pub trait LedgerPersistence: Send + Sync {
    /// Short backend name for logging.
    fn name(&self) -> &'static str;

    /// Load the persisted ledger. An uninitialised store yields an empty
    /// ledger.
    fn load(&self) -> Result<Vec<PredictionRecord>>;

    /// Persist the complete ledger.
    fn persist(&self, records: &[PredictionRecord]) -> Result<()>;
}
