use crate::error::AppError;
use reb_stats::dashboard::Dashboard;
use std::sync::Arc;

/// Shared application state available to all route handlers via Axum's
/// `State` extractor.
pub struct AppState {
    /// Catalog, store and aggregator. Store calls block, so handlers reach
    /// it through [`AppState::run`].
    pub dashboard: Dashboard,
}

impl AppState {
    pub fn new(dashboard: Dashboard) -> Self {
        Self { dashboard }
    }

    /// Run `f` against the dashboard on the blocking thread pool.
    pub async fn run<F, T>(self: &Arc<Self>, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&Dashboard) -> T + Send + 'static,
        T: Send + 'static,
    {
        let state = Arc::clone(self);
        tokio::task::spawn_blocking(move || f(&state.dashboard))
            .await
            .map_err(|e| AppError::internal(format!("worker task failed: {}", e)))
    }
}
