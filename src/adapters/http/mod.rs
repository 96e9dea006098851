//! HTTP adapters - REST API implementations.
//!
//! `api_router` assembles every endpoint; the binary layers tracing,
//! request ids, timeouts and CORS on top.

pub mod negotiation;

use axum::Router;

// Re-export key types for convenience
pub use negotiation::{health_routes, negotiation_routes, NegotiationAppState};

/// Builds the full application router.
///
/// - `POST /api/negotiations`
/// - `GET /health`
pub fn api_router(state: NegotiationAppState) -> Router {
    Router::new()
        .nest("/api/negotiations", negotiation_routes(state))
        .merge(health_routes())
}
