//! Storage- and transport-agnostic ledger domain.

pub mod accuracy;
pub mod calendar;
pub mod error;
pub mod features;
pub mod id;
pub mod record;
pub mod window;

pub use accuracy::{accuracy, mean_accuracy, AccuracyBand};
pub use calendar::{next_trading_day, resolution_date};
pub use error::DomainError;
pub use features::FeatureWindow;
pub use id::{PredictionId, Ticker};
pub use record::{PersistedRecord, PredictionDraft, PredictionRecord};
pub use window::AccuracyWindow;
