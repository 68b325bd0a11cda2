use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use stockledger_app::{Cli, ConsoleNotifier, Reported, pages};
use stockledger_client::{AppState, ClientConfig};
use stockledger_observability::LogFormat;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    stockledger_observability::init(LogFormat::from_env());

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Mutation failures were already shown by the notifier.
            if err.downcast_ref::<Reported>().is_none() {
                eprintln!("error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.api_url {
        config = config.with_api_url(url);
    }
    tracing::debug!(api_url = %config.api_url, "starting");

    let state = AppState::new(&config, Arc::new(ConsoleNotifier))?;
    pages::dispatch(&state, cli.command, cli.json).await
}
