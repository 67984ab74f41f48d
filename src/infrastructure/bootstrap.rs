//! Composition root: builds ledger, predictor and price source from config.

use std::sync::Arc;

use tracing::{info, warn};

use crate::adapter::outbound::http::HttpPredictor;
use crate::adapter::outbound::json::JsonFileLedger;
use crate::adapter::outbound::price_feed::JsonPriceFeed;
use crate::adapter::outbound::sqlite::SqliteLedger;
use crate::application::aggregator::AccuracyAggregator;
use crate::application::presenter::HistoryPresenter;
use crate::application::reconciler::ResolutionReconciler;
use crate::application::store::PredictionStore;
use crate::application::submission::PredictionService;
use crate::error::Result;
use crate::infrastructure::config::ledger::LedgerBackend;
use crate::infrastructure::config::settings::Config;
use crate::port::{ActualPriceSource, LedgerPersistence, Predictor};

/// Build the configured ledger persistence backend.
///
/// # Errors
///
/// Returns an error if the SQLite database cannot be opened or migrated.
pub fn build_persistence(config: &Config) -> Result<Box<dyn LedgerPersistence>> {
    let path = config.ledger_path();
    let persistence: Box<dyn LedgerPersistence> = match config.ledger.backend {
        LedgerBackend::Json => Box::new(JsonFileLedger::new(path)),
        LedgerBackend::Sqlite => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            Box::new(SqliteLedger::open(&path.display().to_string())?)
        }
    };
    Ok(persistence)
}

/// Open the prediction store on the configured backend.
///
/// # Errors
///
/// Returns an error if the backend cannot be opened or its ledger fails
/// validation.
pub fn build_store(config: &Config) -> Result<Arc<PredictionStore>> {
    let store = PredictionStore::open(build_persistence(config)?)?;
    Ok(Arc::new(store))
}

/// Build the remote predictor client.
///
/// # Errors
///
/// Returns an error if the base URL is invalid or the HTTP client cannot be
/// built.
pub fn build_predictor(config: &Config) -> Result<Arc<dyn Predictor>> {
    if config.predictor.api_key.is_none() {
        warn!("FORESIGHT_API_KEY not set, requests will be sent without an API key");
    }
    let predictor = HttpPredictor::new(
        &config.predictor.base_url,
        config.predictor.api_key.clone(),
        config.predictor.timeout(),
    )?;
    info!(base_url = %config.predictor.base_url, "Predictor initialized");
    Ok(Arc::new(predictor))
}

/// Build the actual-price source.
#[must_use]
pub fn build_price_source(config: &Config) -> Arc<dyn ActualPriceSource> {
    Arc::new(JsonPriceFeed::new(config.price_feed_path()))
}

/// Build the submission service with the configured allow-list.
///
/// # Errors
///
/// Returns an error if the predictor cannot be built.
pub fn build_prediction_service(
    config: &Config,
    store: Arc<PredictionStore>,
) -> Result<PredictionService> {
    Ok(PredictionService::new(store, build_predictor(config)?)
        .with_allowed_tickers(config.allowed_tickers()?))
}

#[must_use]
pub fn build_reconciler(config: &Config, store: Arc<PredictionStore>) -> ResolutionReconciler {
    ResolutionReconciler::new(store, build_price_source(config))
}

#[must_use]
pub fn build_aggregator(store: Arc<PredictionStore>) -> AccuracyAggregator {
    AccuracyAggregator::new(store)
}

#[must_use]
pub fn build_presenter(store: Arc<PredictionStore>) -> HistoryPresenter {
    HistoryPresenter::new(store)
}
