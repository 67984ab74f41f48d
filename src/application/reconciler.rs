//! Periodic resolution of open predictions.
//!
//! Each tick walks the unresolved records, asks the actual-price source for
//! the close on the record's resolution date and resolves the records whose
//! price is known. A price that is not yet observable is the common case and
//! simply leaves the record for a later tick. Source failures for one record
//! never stop the others; the next tick is the retry.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::store::PredictionStore;
use crate::domain::resolution_date;
use crate::port::ActualPriceSource;

/// Default cadence between reconciliation ticks.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);

/// Outcome counts for one reconciliation tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// Unresolved records seen at the start of the tick.
    pub examined: usize,
    /// Records resolved by this tick.
    pub resolved: usize,
    /// Records whose actual price is not available yet.
    pub pending: usize,
    /// Records skipped because the source or the store failed.
    pub failed: usize,
    /// Records that another writer resolved first.
    pub raced: usize,
    /// Records left untouched because shutdown was requested.
    pub cancelled: usize,
}

/// Matches unresolved predictions against observed closing prices.
pub struct ResolutionReconciler {
    store: Arc<PredictionStore>,
    source: Arc<dyn ActualPriceSource>,
}

impl std::fmt::Debug for ResolutionReconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionReconciler")
            .field("source", &self.source.name())
            .finish_non_exhaustive()
    }
}

fn shutdown_requested(shutdown: &watch::Receiver<bool>) -> bool {
    *shutdown.borrow()
}

impl ResolutionReconciler {
    #[must_use]
    pub fn new(store: Arc<PredictionStore>, source: Arc<dyn ActualPriceSource>) -> Self {
        Self { store, source }
    }

    /// Run one reconciliation pass as of the current time.
    pub async fn tick(&self, shutdown: &watch::Receiver<bool>) -> ReconcileReport {
        self.tick_at(Utc::now(), shutdown).await
    }

    /// Run one reconciliation pass as of `now`.
    ///
    /// Records whose resolution date lies after `now`'s date are counted as
    /// pending without consulting the source.
    pub async fn tick_at(
        &self,
        now: DateTime<Utc>,
        shutdown: &watch::Receiver<bool>,
    ) -> ReconcileReport {
        let unresolved = self.store.list_unresolved();
        let today = now.date_naive();
        let mut report = ReconcileReport {
            examined: unresolved.len(),
            ..ReconcileReport::default()
        };

        for (pos, record) in unresolved.iter().enumerate() {
            if shutdown_requested(shutdown) {
                report.cancelled = unresolved.len() - pos;
                break;
            }

            let target = resolution_date(record.created_at());
            if target > today {
                report.pending += 1;
                continue;
            }

            let price = match self.source.price_on(record.ticker(), target).await {
                Ok(Some(price)) => price,
                Ok(None) => {
                    report.pending += 1;
                    continue;
                }
                Err(e) => {
                    warn!(
                        id = %record.id(),
                        ticker = %record.ticker(),
                        source = self.source.name(),
                        error = %e,
                        "Actual price lookup failed"
                    );
                    report.failed += 1;
                    continue;
                }
            };

            if shutdown_requested(shutdown) {
                report.cancelled = unresolved.len() - pos;
                break;
            }

            match self.store.resolve(record.id(), price) {
                Ok(_) => report.resolved += 1,
                Err(e) if e.is_already_resolved() => {
                    debug!(id = %record.id(), "Already resolved elsewhere");
                    report.raced += 1;
                }
                Err(e) => {
                    warn!(id = %record.id(), error = %e, "Failed to resolve prediction");
                    report.failed += 1;
                }
            }
        }

        if report.resolved > 0 || report.failed > 0 {
            info!(
                examined = report.examined,
                resolved = report.resolved,
                pending = report.pending,
                failed = report.failed,
                raced = report.raced,
                cancelled = report.cancelled,
                "Reconciliation tick"
            );
        } else {
            debug!(examined = report.examined, pending = report.pending, "Reconciliation tick");
        }
        report
    }

    /// Tick every `interval` until `shutdown` flips to `true` or its sender
    /// is dropped. The first tick runs immediately.
    pub async fn run(&self, interval: Duration, mut shutdown: watch::Receiver<bool>) {
        info!(
            interval_secs = interval.as_secs_f64(),
            source = self.source.name(),
            "Reconciler started"
        );
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                result = shutdown.changed() => {
                    match result {
                        Ok(()) => {
                            if *shutdown.borrow() {
                                info!("Shutdown signal received");
                                break;
                            }
                        }
                        Err(_) => {
                            info!("Shutdown channel closed");
                            break;
                        }
                    }
                }
                _ = ticker.tick() => {
                    self.tick(&shutdown).await;
                }
            }
        }

        info!("Reconciler stopped");
    }
}
