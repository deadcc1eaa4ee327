mod auth;
mod config;
mod db;
mod errors;
mod export;
mod models;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::export::pdf::load_font_family;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::PgResumeStore;

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

    info!("Starting Folio API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let pool = create_pool(&config.database_url).await?;
    let store = Arc::new(PgResumeStore::new(pool));

    // Load the PDF font family; the service stays up without it and serves
    // the plain-text fallback for PDF requests until fonts are installed.
    let fonts = load_font_family(&config.font_dir, &config.font_family).map(Arc::new);
    if fonts.is_some() {
        info!(
            "PDF font family '{}' loaded from {}",
            config.font_family, config.font_dir
        );
    }

    // Build app state
    let state = AppState {
        store,
        fonts,
        config: config.clone(),
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
