mod config;
mod errors;
mod generate;
mod ingest;
mod models;
mod render;
mod routes;
mod session;
mod state;
mod validate;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generate::drafter::OpenRouterDrafter;
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (panics on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Vitae API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the drafting client
    let drafter = OpenRouterDrafter::new(
        config.openrouter_base_url.clone(),
        config.openrouter_api_key.clone(),
    );
    info!("Drafter initialized (models: {:?})", generate::drafter::MODEL_CHAIN);

    // Initialize the in-memory session store
    let sessions = SessionStore::new(Duration::from_secs(config.session_ttl_secs));
    info!("Session store initialized (ttl: {}s)", config.session_ttl_secs);

    // Build app state
    let state = AppState {
        drafter: Arc::new(drafter),
        sessions,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
