//! Route definitions.

use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Create the service router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/issue", post(handlers::issue))
        .route("/demo", get(handlers::demo))
        .route("/api/ping", get(handlers::api_ping))
        .route("/reset", get(handlers::reset))
        .route("/.well-known/jwks.json", get(handlers::jwks))
        .with_state(state)
}
