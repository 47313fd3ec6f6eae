use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::health;
use super::messages;
use super::middleware::logging_middleware;
use super::state::AppState;

/// Create the router with application state
///
/// Every route answers with and without a trailing slash.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/", get(health::health_check))
        .route("/messages/create", post(messages::create_message))
        .route("/messages/create/", post(messages::create_message))
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}
