//! Keepsake terminal entry point.

use std::sync::Arc;

use keepsake_cli::config::{self, HostConfig};
use keepsake_cli::{AppError, Supervisor, TerminalPresenter};
use keepsake_flow::FlowEngine;
use keepsake_store::{FileStore, StoredProgressGateway};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    // Logs go to stderr so they never interleave with screens.
    let json = std::env::var(config::LOG_JSON_VAR)
        .ok()
        .and_then(|value| config::parse_flag(&value))
        .unwrap_or(false);
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr);
    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let config = HostConfig::from_env()?;
    tracing::info!(?config, "starting keepsake");

    let catalog = config.load_catalog().await?;
    let gateway = StoredProgressGateway::new(FileStore::new(&config.store_path))
        .with_delay(config.storage_delay);
    let input = BufReader::new(tokio::io::stdin());
    let presenter = TerminalPresenter::builder(input, tokio::io::stdout())
        .status_duration(config.status_duration)
        .transition_duration(config.transition_duration)
        .clear_screen(config.clear_screen)
        .build();

    let engine = FlowEngine::builder(Arc::new(presenter), Arc::new(gateway))
        .catalog(catalog)
        .policy(config.policy)
        .build();

    let restarts = Supervisor::new(engine)
        .with_max_restarts(config.max_restarts)
        .run()
        .await?;
    tracing::info!(restarts, "input closed, exiting");

    Ok(())
}
