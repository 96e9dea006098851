//! HTTP routes for negotiation endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{health, negotiate, NegotiationAppState};

/// Creates the negotiation router, mounted under `/api/negotiations`.
pub fn negotiation_routes(state: NegotiationAppState) -> Router {
    Router::new()
        .route("/", post(negotiate))
        .with_state(state)
}

/// Creates the liveness router.
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health))
}
