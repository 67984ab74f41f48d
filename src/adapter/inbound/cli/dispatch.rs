//! Configuration loading and command dispatch.

use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use super::command::{Cli, Commands};
use super::{accuracy, export, history, predict, reconcile};

/// Load configuration for `cli`.
///
/// An explicitly passed `--config` must exist; the default location falls
/// back to built-in defaults when absent.
///
/// # Errors
///
/// Returns an error if the configuration cannot be read or is invalid.
#[allow(clippy::result_large_err)]
pub fn load_config(cli: &Cli) -> Result<Config> {
    let (path, explicit) = cli.config_path();
    if explicit {
        Config::load(path)
    } else {
        Config::load_or_default(path)
    }
}

/// Dispatch a parsed command.
///
/// # Errors
///
/// Returns the command's error; the caller reports it and sets the exit
/// code.
pub async fn execute(cli: &Cli, config: &Config) -> Result<()> {
    match &cli.command {
        Commands::Predict(args) => predict::execute(config, args).await,
        Commands::Reconcile(args) => reconcile::execute(config, args).await,
        Commands::Accuracy(args) => accuracy::execute(config, args),
        Commands::History(args) => history::execute(config, args),
        Commands::Export => export::execute(config),
    }
}
