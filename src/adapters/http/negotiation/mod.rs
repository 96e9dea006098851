//! HTTP adapter for negotiation endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ErrorResponse, HealthResponse, NegotiateRequest, NegotiateResponse, ResponseMetadata,
    NEGOTIATION_METHOD,
};
pub use handlers::{NegotiationAppState, REQUEST_ID_HEADER};
pub use routes::{health_routes, negotiation_routes};
