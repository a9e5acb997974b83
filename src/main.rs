//! Leave Engine HTTP server.
//!
//! Loads the configuration directory named by `LEAVE_ENGINE_CONFIG`
//! (default `./config/default`) and serves the API.

use std::env;

use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use leave_engine::api::{AppState, create_router};
use leave_engine::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "./config/default";

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("LEAVE_ENGINE_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config_dir = env::var("LEAVE_ENGINE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.into());
    let config = ConfigLoader::load(&config_dir).inspect_err(|err| {
        error!(config_dir = %config_dir, error = %err, "Failed to load configuration");
    })?;

    let address = config.settings().server.bind_address();
    info!(
        config_dir = %config_dir,
        employees = config.employees().len(),
        leave_policies = config.leave_policies().len(),
        holidays = config.holidays().len(),
        fixed_date = ?config.settings().clock.fixed_date,
        "Configuration loaded"
    );

    let router = create_router(AppState::from_config(&config));
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(address = %address, "Leave engine listening");

    axum::serve(listener, router).await?;
    Ok(())
}
