use anyhow::{Context, Result};
use arcade_server::config::ArcadeConfig;
use arcade_server::db::{ScoreLedger, SqliteLedger};
use arcade_server::http_server::{AppState, run_http_server};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if exists
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ArcadeConfig::from_env()?;

    let ledger = SqliteLedger::connect(&config.database_url, config.db_max_connections)
        .await
        .context("Failed to open score database")?;
    ledger.init().await.context("Failed to initialize score table")?;
    info!("Score ledger ready");

    let state = AppState::new(Arc::new(ledger), &config);

    let cancellation_token = CancellationToken::new();
    let shutdown = cancellation_token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received shutdown signal. Shutting down gracefully...");
        }
        shutdown.cancel();
    });

    run_http_server(&config.http_addr, state, cancellation_token).await?;
    info!("Server shut down successfully");
    Ok(())
}
