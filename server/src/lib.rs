//! Formsmith persistence API
//!
//! Generic CRUD over a single SQLite table of form schemas. Each row keeps
//! title and description as columns and the `{fields, submitLabel}`
//! document as an opaque JSON string.

pub mod config;
pub mod error;
pub mod routes;
pub mod store;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;
pub use store::{FormStore, StoreError};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<FormStore>,
}

/// Build the API router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes::router())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

/// Open the database, migrate it and insert the example schema when empty.
/// A failing seed is logged and otherwise ignored.
pub fn prepare_store(config: &ServerConfig) -> Result<FormStore, StoreError> {
    let store = FormStore::open(&config.database_path)?;
    store.migrate()?;
    if let Some(seed) = &config.seed_path {
        if let Err(e) = store.seed_if_empty(seed) {
            tracing::error!(error = %e, path = %seed.display(), "failed to check/insert example schema");
        }
    }
    Ok(store)
}
