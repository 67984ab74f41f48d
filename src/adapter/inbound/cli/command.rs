//! Command-line interface definitions.
//!
//! Defines the CLI structure for the foresight application using `clap`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::paths;

/// Prediction ledger and accuracy evaluation CLI
#[derive(Parser, Debug)]
#[command(name = "foresight")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file [default: ~/.foresight/config.toml]
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// The config file to load and whether it was given explicitly.
    #[must_use]
    pub fn config_path(&self) -> (PathBuf, bool) {
        match &self.config {
            Some(path) => (path.clone(), true),
            None => (paths::default_config(), false),
        }
    }
}

/// Top-level subcommands for the foresight CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Request a next-day prediction and record it
    Predict(PredictArgs),

    /// Resolve open predictions against the actual-price feed
    Reconcile(ReconcileArgs),

    /// Show accuracy over the last 7 days, 30 days and all time
    Accuracy(TickerArgs),

    /// Show prediction history, newest first
    History(TickerArgs),

    /// Print the whole ledger in its persisted layout
    Export,
}

/// Arguments for `predict`.
#[derive(Parser, Debug)]
pub struct PredictArgs {
    /// Instrument to predict
    pub ticker: String,

    /// JSON file holding the 30x6 feature window (`{"values": [[...]]}`)
    #[arg(short, long)]
    pub features: PathBuf,
}

/// Arguments for `reconcile`.
#[derive(Parser, Debug)]
pub struct ReconcileArgs {
    /// Run a single tick and exit
    #[arg(long)]
    pub once: bool,

    /// Override the tick interval in seconds
    #[arg(long)]
    pub interval: Option<u64>,
}

/// Arguments for commands scoped to one ticker.
#[derive(Parser, Debug)]
pub struct TickerArgs {
    /// Instrument to report on
    pub ticker: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_predict() {
        let cli = Cli::try_parse_from([
            "foresight", "predict", "Apple", "--features", "window.json",
        ])
        .unwrap();
        match cli.command {
            Commands::Predict(args) => {
                assert_eq!(args.ticker, "Apple");
                assert_eq!(args.features, PathBuf::from("window.json"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "foresight", "history", "Apple", "--json", "--config", "/tmp/c.toml",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.config_path(), (PathBuf::from("/tmp/c.toml"), true));
    }

    #[test]
    fn config_defaults_to_home() {
        let cli = Cli::try_parse_from(["foresight", "export"]).unwrap();
        let (path, explicit) = cli.config_path();
        assert!(!explicit);
        assert_eq!(path, paths::default_config());
    }

    #[test]
    fn reconcile_once() {
        let cli = Cli::try_parse_from(["foresight", "reconcile", "--once"]).unwrap();
        assert!(matches!(cli.command, Commands::Reconcile(ReconcileArgs { once: true, .. })));
    }

    #[test]
    fn predict_requires_features() {
        assert!(Cli::try_parse_from(["foresight", "predict", "Apple"]).is_err());
    }
}
