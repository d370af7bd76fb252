//! Esports arena server.
//!
//! Serves the in-memory tournament registry over a JSON HTTP API, with an
//! optional Prometheus exporter on a separate address.

use std::net::SocketAddr;

use anyhow::Error;
use arena::Registry;
use arena_server::{
    api::{self, AppState},
    config::ServerConfig,
    logging, metrics, seed,
};
use log::{info, warn};
use pico_args::Arguments;

const HELP: &str = "\
Run the esports arena server

USAGE:
  arena_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:8080]

FLAGS:
  --seed                   Register demo games, players and a team on startup
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:8080)
  METRICS_BIND             Prometheus exporter address; disabled when unset
  SEED_DEMO_DATA           Same as --seed when true
  CORS_PERMISSIVE          Allow any origin [default: true]
  RUST_LOG                 Log filter [default: info]
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let bind: Option<SocketAddr> = pargs.opt_value_from_str("--bind")?;
    let seed_flag = pargs.contains("--seed");

    logging::init();

    let config = ServerConfig::from_env(bind, seed_flag)?;
    config.validate()?;

    if let Some(metrics_bind) = config.metrics_bind {
        metrics::init_metrics(metrics_bind).map_err(|e| anyhow::anyhow!(e))?;
        info!("Prometheus exporter listening on {metrics_bind}");
    }

    let registry = Registry::new();
    if config.seed_demo_data {
        seed::seed_demo_data(&registry).await?;
    }
    if !config.cors_permissive {
        warn!("CORS is restricted; browser clients on other origins will be rejected");
    }

    let app = api::create_router(AppState::new(registry), config.cors_permissive);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", config.bind, e))?;

    info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("Shutting down server...");

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
}
