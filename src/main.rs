//! # Board Server
//!
//! Community board backend entry point. Initializes:
//! - Tracing/logging subsystem
//! - Configuration loading
//! - Database connection pool and migrations
//! - Redis-backed session store
//! - HTTP server

use anyhow::Result;
use tracing::info;

use board_server::config::Settings;
use board_server::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    board_server::telemetry::init_tracing();

    info!("Starting Board Server...");

    let settings = Settings::load()?;
    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        "Configuration loaded"
    );

    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    Ok(())
}
