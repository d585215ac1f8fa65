//! Formsmith server - Main Entry Point

use std::sync::Arc;

use formsmith_server::{build_router, prepare_store, AppState, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Formsmith server v{}", env!("CARGO_PKG_VERSION"));

    let config = ServerConfig::from_env().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "config not loaded, using defaults");
        ServerConfig::default().with_overrides(|key| std::env::var(key).ok())
    });

    let store = prepare_store(&config)?;
    tracing::info!(database = %config.database_path.display(), "database ready");

    let app = build_router(AppState { store: Arc::new(store) });

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Formsmith API listening on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
