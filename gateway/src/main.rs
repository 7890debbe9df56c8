use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

use footprint_core::{Estimator, EstimatorConfig};
use footprint_gateway::{app, AppState};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8888";

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Logging Setup
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .compact()
        .init();

    info!("Footprint Gateway Initializing...");

    // 2. Configuration (.env is loaded by EstimatorConfig)
    let config = EstimatorConfig::from_env().context("failed to read estimator configuration")?;
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

    // 3. Estimator (the only upstream we talk to)
    let estimator = Estimator::new(config)?;
    let state = AppState::new(estimator);

    // 4. Start Server
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!("Gateway listening on {}...", bind_addr);

    axum::serve(listener, app(state))
        .await
        .context("server terminated")?;
    Ok(())
}
