//! Beacon registry server entry point.

use anyhow::Context;
use beacons_db::DbManager;
use beacons_server::config::Cli;
use beacons_server::{AppState, ServerConfig};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("beacons_server=info".parse()?)
                .add_directive("beacons_service=info".parse()?)
                .add_directive("beacons_db=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .json()
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load(cli.config.as_deref())?;

    tracing::info!("Starting beacon registry server");

    let db = DbManager::open(&config.db)
        .await
        .context("opening SurrealDB")?;

    let state = AppState::new(db.client().clone(), config.auth);
    beacons_server::serve(beacons_server::router(state), config.listen_addr).await?;

    tracing::info!("Beacon registry server stopped");
    Ok(())
}
