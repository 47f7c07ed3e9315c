use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spendpause::cli::{self, Cli};
use spendpause::ledger::SavingsLedger;
use spendpause::storage::JsonFileStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let store = Arc::new(JsonFileStore::new());
    let ledger = SavingsLedger::new(store);
    ledger.initialize().await?;

    cli::run(cli, &ledger).await?;
    Ok(())
}
