//! Pages of the ledger, one module per view.

pub mod history;
pub mod orders;
pub mod stock;

use serde::Serialize;
use stockledger_client::AppState;

use crate::cli::Commands;

/// Route a parsed command to its page.
pub async fn dispatch(state: &AppState, command: Commands, json: bool) -> anyhow::Result<()> {
    match command {
        Commands::Stock(cmd) => stock::run(state, cmd, json).await,
        Commands::Orders(cmd) => orders::run(state, cmd, json).await,
        Commands::History(cmd) => history::run(state, cmd, json).await,
    }
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn unconfirmed(what: &str, id: &str) {
    println!("Not deleted. Re-run with --yes to delete {what} {id}.");
}
