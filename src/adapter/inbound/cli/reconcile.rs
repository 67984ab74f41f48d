//! Handler for the `reconcile` command.

use serde_json::json;
use tokio::sync::watch;
use tracing::info;

use crate::adapter::inbound::cli::command::ReconcileArgs;
use crate::adapter::inbound::cli::output;
use crate::application::reconciler::ReconcileReport;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Execute the reconcile command.
pub async fn execute(config: &Config, args: &ReconcileArgs) -> Result<()> {
    let store = bootstrap::build_store(config)?;
    let reconciler = bootstrap::build_reconciler(config, store);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    if args.once {
        let report = reconciler.tick(&shutdown_rx).await;
        print_report(&report);
        return Ok(());
    }

    let interval = args
        .interval
        .filter(|secs| *secs > 0)
        .map_or_else(|| config.reconciler.interval(), std::time::Duration::from_secs);

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Interval", format!("{}s", interval.as_secs()));
    output::field("Price feed", config.price_feed_path().display());
    output::hint("press Ctrl-C to stop");

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C received");
        }
        let _ = shutdown_tx.send(true);
    });

    reconciler.run(interval, shutdown_rx).await;
    output::success("Reconciler stopped");
    Ok(())
}

fn print_report(report: &ReconcileReport) {
    if output::is_json() {
        output::json_output(json!({
            "command": "reconcile",
            "report": report,
        }));
        return;
    }

    output::field("Examined", report.examined);
    output::field("Resolved", report.resolved);
    output::field("Pending", report.pending);
    if report.failed > 0 {
        output::warning(&format!("{} lookups failed, retried next tick", report.failed));
    }
    if report.raced > 0 {
        output::field("Raced", report.raced);
    }
}
