//! Handler for the `accuracy` command.

use chrono::Utc;
use serde_json::json;

use crate::adapter::inbound::cli::command::TickerArgs;
use crate::adapter::inbound::cli::output;
use crate::domain::Ticker;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Execute the accuracy command.
pub fn execute(config: &Config, args: &TickerArgs) -> Result<()> {
    let ticker = Ticker::new(&args.ticker)?;
    let aggregator = bootstrap::build_aggregator(bootstrap::build_store(config)?);
    let windows = aggregator.summarize(&ticker, Utc::now());

    if output::is_json() {
        output::json_output(json!({
            "command": "accuracy",
            "ticker": ticker,
            "windows": windows,
        }));
        return Ok(());
    }

    output::section(&format!("Accuracy for {ticker}"));
    for window in &windows {
        let samples = output::muted(format!("({} resolved)", window.samples));
        output::field(
            window.window.title(),
            format!("{} {samples}", output::percent(window.accuracy)),
        );
    }
    if windows.iter().all(|w| !w.has_data()) {
        output::hint("no resolved predictions yet; run `foresight reconcile`");
    }
    Ok(())
}
