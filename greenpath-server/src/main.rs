//! Carbon-aware navigation server.
//!
//! Thin HTTP layer over `greenpath_core`: collaborator clients for routing,
//! geocoding and safety points, a JSON-file session store, and the route
//! comparison pipeline.

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use clap::Parser;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

mod clients;
mod config;
mod error;
mod handlers;
mod state;
mod store;
#[cfg(test)]
mod tests;

use config::ServerConfig;
use state::AppState;

#[derive(Parser)]
#[command(version, about = "Carbon-aware navigation server")]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/route", get(handlers::route_proxy))
        .route("/compare", get(handlers::compare))
        .route("/geocode", get(handlers::geocode_search))
        .route("/reverse", get(handlers::reverse_geocode))
        .route("/nearby", get(handlers::nearby))
        .route("/safety", get(handlers::safety_points))
        .route("/stats", get(handlers::stats))
        .route("/trips", post(handlers::record_trip))
        .route("/freight", get(handlers::freight))
        .route("/tips", get(handlers::emission_tips))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        // The comparison pipeline holds collaborator connections for a
        // while; cap concurrent requests rather than queue without bound.
        .layer(ConcurrencyLimitLayer::new(64))
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = match cli.config {
        Some(path) => ServerConfig::from_file(&path)?,
        None => ServerConfig::default(),
    };

    let listen = config.listen.clone();
    let state = Arc::new(AppState::new(config)?);

    let listener = tokio::net::TcpListener::bind(&listen).await?;
    info!("listening on {listen}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(?err, "failed to install shutdown handler");
    }
}
