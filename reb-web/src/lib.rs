//! Server-rendered dashboard pages and JSON API.
//!
//! This crate provides:
//! - `components`: Dioxus RSX components rendered to HTML on the server
//! - `pages`: full-page rendering around those components
//! - `routes`: Axum handlers for pages and the JSON API
//! - `state`: shared state and the blocking-pool bridge to the store

pub mod components;
pub mod error;
pub mod pages;
pub mod routes;
pub mod state;

use axum::routing::get;
use axum::Router;
use reb_stats::dashboard::Dashboard;
use state::AppState;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// All page and API routes over `state`.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::pages::national_page))
        .route("/capital", get(routes::pages::capital_page))
        .route("/group/{name}", get(routes::pages::group_page))
        .route("/api/dates", get(routes::api::list_dates))
        .route("/api/groups", get(routes::api::list_groups))
        .route("/api/stats", get(routes::api::get_stats))
        .route("/api/nearest", get(routes::api::get_nearest))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `addr` and serve the dashboard until the process is stopped.
pub async fn serve(addr: &str, dashboard: Dashboard) -> anyhow::Result<()> {
    let app = router(Arc::new(AppState::new(dashboard)));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("web: listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
