use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use super::{handlers, health, AppState};

/// Build the application router.
pub fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/summarize", post(handlers::summarize))
        .route("/theme", post(handlers::toggle_theme))
        .route("/download", get(handlers::download))
        .route("/health", get(health::health))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}
