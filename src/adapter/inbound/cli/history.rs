//! Handler for the `history` command.

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::TickerArgs;
use crate::adapter::inbound::cli::output;
use crate::application::presenter::HistoryEntry;
use crate::domain::Ticker;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Predicted")]
    predicted: String,
    #[tabled(rename = "Actual")]
    actual: String,
    #[tabled(rename = "Accuracy")]
    accuracy: String,
    #[tabled(rename = "Band")]
    band: &'static str,
}

impl From<&HistoryEntry> for HistoryRow {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            date: entry.date.format("%Y-%m-%d %H:%M").to_string(),
            predicted: output::price(Some(entry.predicted_price)),
            actual: output::price(entry.actual_price),
            accuracy: entry
                .accuracy
                .map_or_else(|| "-".to_string(), |a| format!("{a:.2}%")),
            band: entry.band.as_str(),
        }
    }
}

/// Execute the history command.
pub fn execute(config: &Config, args: &TickerArgs) -> Result<()> {
    let ticker = Ticker::new(&args.ticker)?;
    let presenter = bootstrap::build_presenter(bootstrap::build_store(config)?);
    let entries = presenter.history(&ticker);

    if output::is_json() {
        output::json_output(json!({
            "command": "history",
            "ticker": ticker,
            "entries": entries,
        }));
        return Ok(());
    }

    output::section(&format!("Prediction history for {ticker}"));
    if entries.is_empty() {
        output::note("No predictions yet");
        return Ok(());
    }

    let rows: Vec<HistoryRow> = entries.iter().map(HistoryRow::from).collect();
    output::table(&Table::new(rows).to_string());
    Ok(())
}
