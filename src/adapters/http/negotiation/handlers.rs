//! HTTP handlers for negotiation endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::negotiation::{
    NegotiateError, NegotiateStrategiesCommand, NegotiateStrategiesHandler,
};
use crate::domain::foundation::DomainError;

use super::dto::{
    ErrorResponse, HealthResponse, NegotiateRequest, NegotiateResponse, ResponseMetadata,
    NEGOTIATION_METHOD,
};

/// Header consulted when the body carries no correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct NegotiationAppState {
    negotiate_handler: Arc<NegotiateStrategiesHandler>,
}

impl NegotiationAppState {
    pub fn new(negotiate_handler: Arc<NegotiateStrategiesHandler>) -> Self {
        Self { negotiate_handler }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/negotiations - Negotiate a balanced set of strategies
pub async fn negotiate(
    State(state): State<NegotiationAppState>,
    headers: HeaderMap,
    body: Result<Json<NegotiateRequest>, JsonRejection>,
) -> Response {
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(rejection.body_text())),
            )
                .into_response()
        }
    };

    let correlation_id = req.correlation_id.or_else(|| {
        headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    });

    let cmd = NegotiateStrategiesCommand {
        scenario_id: req.scenario_id,
        impacts: req.impacts,
        strategies: req.strategies,
        user_preferences: req.user_preferences,
        user_id: req.user_id,
        correlation_id,
    };

    match state.negotiate_handler.handle(cmd).await {
        Ok(outcome) => {
            let response = NegotiateResponse {
                result: outcome.result,
                metadata: ResponseMetadata {
                    correlation_id: outcome.correlation_id.as_str().to_string(),
                    execution_time_ms: outcome.execution_time_ms,
                    negotiation_method: NEGOTIATION_METHOD,
                },
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_negotiate_error(e),
    }
}

/// GET /health - Liveness check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_negotiate_error(error: NegotiateError) -> Response {
    let status = match &error {
        NegotiateError::Validation(_) => StatusCode::BAD_REQUEST,
        NegotiateError::Engine { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let body = ErrorResponse::from(DomainError::from(error));
    (status, Json(body)).into_response()
}
