//! Handler for the `export` command.

use crate::adapter::outbound::json::to_json;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Print the ledger as a flat JSON array on stdout.
pub fn execute(config: &Config) -> Result<()> {
    let store = bootstrap::build_store(config)?;
    println!("{}", to_json(&store.snapshot())?);
    Ok(())
}
