//! Authoritative, persisted prediction ledger.
//!
//! [`PredictionStore`] is the single owner of the ledger. Every other
//! component reads snapshots from it and mutates only through
//! [`append`](PredictionStore::append), [`append_draft`](PredictionStore::append_draft)
//! and [`resolve`](PredictionStore::resolve). Each mutation is written
//! through to the injected [`LedgerPersistence`] before returning; if the
//! write fails the in-memory change is rolled back so memory and storage
//! never diverge.

use std::collections::{BTreeSet, HashMap};

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::domain::record::validate_price;
use crate::domain::{PredictionDraft, PredictionId, PredictionRecord, Ticker};
use crate::error::{LedgerError, Result};
use crate::port::LedgerPersistence;

/// In-memory ledger state guarded by the store lock.
#[derive(Debug, Default)]
struct Ledger {
    /// Records in insertion order.
    records: Vec<PredictionRecord>,
    /// Position of each id in `records`.
    index: HashMap<PredictionId, usize>,
}

impl Ledger {
    fn from_records(records: Vec<PredictionRecord>) -> Result<Self> {
        let mut index = HashMap::with_capacity(records.len());
        for (pos, record) in records.iter().enumerate() {
            if index.insert(record.id(), pos).is_some() {
                return Err(LedgerError::DuplicateId { id: record.id() }.into());
            }
        }
        Ok(Self { records, index })
    }

    fn next_id(&self) -> Result<PredictionId> {
        match self.records.iter().map(PredictionRecord::id).max() {
            None => Ok(PredictionId::new(1)),
            Some(last) => last
                .next()
                .ok_or_else(|| LedgerError::IdsExhausted { last }.into()),
        }
    }

    fn push(&mut self, record: PredictionRecord) {
        self.index.insert(record.id(), self.records.len());
        self.records.push(record);
    }

    fn pop(&mut self) {
        if let Some(record) = self.records.pop() {
            self.index.remove(&record.id());
        }
    }
}

/// The prediction ledger.
///
/// Share it as `Arc<PredictionStore>`; all operations take `&self`. Reads
/// return owned snapshots so no caller holds ledger state across an
/// `.await`.
pub struct PredictionStore {
    ledger: Mutex<Ledger>,
    persistence: Box<dyn LedgerPersistence>,
}

impl std::fmt::Debug for PredictionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionStore")
            .field("backend", &self.persistence.name())
            .field("records", &self.len())
            .finish()
    }
}

impl PredictionStore {
    /// Open the ledger held by `persistence`.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or the persisted ledger contains
    /// duplicate ids.
    pub fn open(persistence: Box<dyn LedgerPersistence>) -> Result<Self> {
        let records = persistence.load()?;
        let ledger = Ledger::from_records(records)?;
        info!(
            backend = persistence.name(),
            records = ledger.records.len(),
            "Prediction ledger opened"
        );
        Ok(Self {
            ledger: Mutex::new(ledger),
            persistence,
        })
    }

    /// Append a fully-formed, unresolved record.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::DuplicateId`] if the id is already present.
    /// - [`LedgerError::ResolvedOnAppend`] if the record is already resolved.
    /// - A persistence error, in which case the ledger is unchanged.
    pub fn append(&self, record: PredictionRecord) -> Result<()> {
        let mut ledger = self.ledger.lock();
        if record.is_resolved() {
            return Err(LedgerError::ResolvedOnAppend { id: record.id() }.into());
        }
        if ledger.index.contains_key(&record.id()) {
            return Err(LedgerError::DuplicateId { id: record.id() }.into());
        }
        self.push_and_persist(&mut ledger, record)
    }

    /// Allocate the next id and append the draft as a new record.
    ///
    /// Allocation and insertion happen under one lock acquisition, so
    /// concurrent submissions never race for the same id.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::IdsExhausted`] if the highest id is `u64::MAX`.
    /// - A persistence error, in which case the ledger is unchanged.
    pub fn append_draft(&self, draft: PredictionDraft) -> Result<PredictionRecord> {
        let mut ledger = self.ledger.lock();
        let id = ledger.next_id()?;
        if ledger.index.contains_key(&id) {
            return Err(LedgerError::DuplicateId { id }.into());
        }
        let record = draft.into_record(id);
        self.push_and_persist(&mut ledger, record.clone())?;
        Ok(record)
    }

    fn push_and_persist(&self, ledger: &mut Ledger, record: PredictionRecord) -> Result<()> {
        let id = record.id();
        let ticker = record.ticker().clone();
        ledger.push(record);
        if let Err(e) = self.persistence.persist(&ledger.records) {
            ledger.pop();
            return Err(e);
        }
        info!(id = %id, ticker = %ticker, "Prediction recorded");
        Ok(())
    }

    /// Attach the observed actual price to an unresolved record.
    ///
    /// Returns the resolved record.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::NotFound`] if no record has this id.
    /// - [`LedgerError::AlreadyResolved`] if it was resolved before; the
    ///   existing actual price is left untouched.
    /// - A domain error if `actual_price` is not a positive finite number.
    /// - A persistence error, in which case the record stays unresolved.
    pub fn resolve(&self, id: PredictionId, actual_price: f64) -> Result<PredictionRecord> {
        let actual_price = validate_price("actual price", actual_price)?;

        let mut ledger = self.ledger.lock();
        let pos = *ledger
            .index
            .get(&id)
            .ok_or(LedgerError::NotFound { id })?;

        if ledger.records[pos].is_resolved() {
            debug!(id = %id, "Resolution rejected: already resolved");
            return Err(LedgerError::AlreadyResolved { id }.into());
        }

        ledger.records[pos].mark_resolved(actual_price);
        if let Err(e) = self.persistence.persist(&ledger.records) {
            ledger.records[pos].clear_resolution();
            return Err(e);
        }

        let record = ledger.records[pos].clone();
        info!(
            id = %id,
            ticker = %record.ticker(),
            predicted = record.predicted_price(),
            actual = actual_price,
            "Prediction resolved"
        );
        Ok(record)
    }

    /// All records for `ticker`, in insertion order.
    #[must_use]
    pub fn list_by_ticker(&self, ticker: &Ticker) -> Vec<PredictionRecord> {
        self.ledger
            .lock()
            .records
            .iter()
            .filter(|r| r.ticker() == ticker)
            .cloned()
            .collect()
    }

    /// All unresolved records across tickers, in insertion order.
    #[must_use]
    pub fn list_unresolved(&self) -> Vec<PredictionRecord> {
        self.ledger
            .lock()
            .records
            .iter()
            .filter(|r| !r.is_resolved())
            .cloned()
            .collect()
    }

    /// Look up one record.
    #[must_use]
    pub fn get(&self, id: PredictionId) -> Option<PredictionRecord> {
        let ledger = self.ledger.lock();
        ledger.index.get(&id).map(|&pos| ledger.records[pos].clone())
    }

    /// The whole ledger, in insertion order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<PredictionRecord> {
        self.ledger.lock().records.clone()
    }

    /// Distinct tickers present in the ledger, sorted.
    #[must_use]
    pub fn tickers(&self) -> Vec<Ticker> {
        let ledger = self.ledger.lock();
        let set: BTreeSet<&Ticker> = ledger.records.iter().map(PredictionRecord::ticker).collect();
        set.into_iter().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ledger.lock().records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
