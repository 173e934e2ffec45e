mod collaborators;
mod config;
mod directory;
mod errors;
mod matching;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values, never on missing keys)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Tradesmatch API v{}", env!("CARGO_PKG_VERSION"));

    log_collaborator_modes(&config);

    let state = AppState::from_config(config.clone())?;
    info!(
        "Local directory ready ({} providers)",
        state.directory.providers().len()
    );

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");
    info!("API available at http://localhost:{}/api", config.port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// One line per collaborator saying whether it will be called or replaced
/// by synthetic data.
fn log_collaborator_modes(config: &Config) {
    let mode = |configured: bool| if configured { "live" } else { "synthetic" };

    info!("Zeroentropy analysis: {}", mode(config.zeroentropy_api_key.is_some()));
    info!("Arcade analysis: {}", mode(config.arcade_api_key.is_some()));
    info!("Datalog analysis: {}", mode(config.datalog_api_key.is_some()));
    info!(
        "Google web search: {}",
        mode(config.google_api_key.is_some() && config.google_cse_id.is_some())
    );
}
