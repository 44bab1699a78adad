//! In-memory todo REST service.
//!
//! # Overview
//! `TodoStore` owns every record and the id counter. The `api` routes parse
//! and validate requests at the boundary before calling into it, and
//! `LatencyLayer` optionally delays every response by a fixed amount chosen
//! at start-up.

pub mod api;
pub mod config;
pub mod error;
pub mod latency;
pub mod store;
pub mod telemetry;

use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;
pub use error::ApiError;
pub use latency::LatencyLayer;
pub use store::{StoreError, Todo, TodoInput, TodoStore};

/// Builds the full router around a fresh, empty store.
pub fn app(config: &ServerConfig) -> Router {
    app_with_store(TodoStore::new(), config)
}

pub fn app_with_store(store: TodoStore, config: &ServerConfig) -> Router {
    let index = config.static_dir.join("index.html");

    api::router(store)
        .route_service("/", ServeFile::new(index))
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(LatencyLayer::new(config.latency())),
        )
}

pub async fn run(listener: TcpListener, config: ServerConfig) -> anyhow::Result<()> {
    std::fs::create_dir_all(&config.static_dir)?;
    if config.latency_ms > 0 {
        tracing::info!("Adding {}ms latency to all requests", config.latency_ms);
    }
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app(&config)).await?;
    Ok(())
}
