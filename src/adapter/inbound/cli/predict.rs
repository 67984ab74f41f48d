//! Handler for the `predict` command.

use serde_json::json;

use crate::adapter::inbound::cli::command::PredictArgs;
use crate::adapter::inbound::cli::output;
use crate::domain::{FeatureWindow, PersistedRecord, Ticker};
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Execute the predict command.
pub async fn execute(config: &Config, args: &PredictArgs) -> Result<()> {
    let ticker = Ticker::new(&args.ticker)?;
    let features = FeatureWindow::from_json(&std::fs::read_to_string(&args.features)?)?;

    let store = bootstrap::build_store(config)?;
    let service = bootstrap::build_prediction_service(config, store)?;

    let pb = output::spinner(&format!("Requesting prediction for {ticker}"));
    let record = match service.submit(&ticker, &features).await {
        Ok(record) => {
            output::spinner_success(&pb, "Prediction recorded");
            record
        }
        Err(e) => {
            output::spinner_fail(&pb, "Prediction failed");
            return Err(e);
        }
    };

    if output::is_json() {
        output::json_output(json!({
            "command": "predict",
            "record": PersistedRecord::from(&record),
        }));
        return Ok(());
    }

    output::field("Id", record.id());
    output::field("Ticker", record.ticker());
    output::field("Predicted", format!("{:.2}", record.predicted_price()));
    output::field("Confidence", format!("{:.1}%", record.confidence()));
    output::field("Last close", format!("{:.2}", features.last_close()));
    output::field("Created", record.created_at().format("%Y-%m-%d %H:%M UTC"));
    Ok(())
}
