use clap::Parser;
use tracing::{debug, error};

use foresight::adapter::inbound::cli::command::Cli;
use foresight::adapter::inbound::cli::output::{self, OutputConfig};
use foresight::adapter::inbound::cli::dispatch::{execute, load_config};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet));

    let config = match load_config(&cli) {
        Ok(c) => c,
        Err(e) => {
            output::error(&format!("Failed to load config: {e}"));
            std::process::exit(1);
        }
    };

    config.init_logging();
    debug!(command = ?cli.command, "foresight starting");

    if let Err(e) = execute(&cli, &config).await {
        error!(error = %e, "Command failed");
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
