//! HTTP DTOs for negotiation endpoints.
//!
//! Every request field is optional at the wire level so the command handler
//! can report exactly which one is missing.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::DomainError;
use crate::domain::negotiation::{
    ImpactAnalysis, MitigationStrategy, NegotiationResult, UserPreferences,
};

/// Name of the scoring method reported in response metadata.
pub const NEGOTIATION_METHOD: &str = "multi-objective-weighted";

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to negotiate a balanced set of strategies.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NegotiateRequest {
    #[serde(default)]
    pub scenario_id: Option<String>,
    #[serde(default)]
    pub impacts: Option<ImpactAnalysis>,
    #[serde(default)]
    pub strategies: Option<Vec<MitigationStrategy>>,
    #[serde(default)]
    pub user_preferences: Option<UserPreferences>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub correlation_id: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Successful negotiation response.
#[derive(Debug, Clone, Serialize)]
pub struct NegotiateResponse {
    pub result: NegotiationResult,
    pub metadata: ResponseMetadata,
}

/// Request-level metadata attached to every negotiation response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    pub correlation_id: String,
    pub execution_time_ms: u64,
    pub negotiation_method: &'static str,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }
}

impl From<DomainError> for ErrorResponse {
    fn from(err: DomainError) -> Self {
        let details = if err.details.is_empty() {
            None
        } else {
            // BTreeMap keeps detail keys in a stable order on the wire.
            let ordered: std::collections::BTreeMap<_, _> = err.details.into_iter().collect();
            Some(serde_json::json!(ordered))
        };

        Self {
            code: err.code.to_string(),
            message: err.message,
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ErrorCode, ValidationError};

    #[test]
    fn request_accepts_camel_case_fields() {
        let json = r#"{
            "scenarioId": "scn-1",
            "impacts": {"deliveryDelayDays": 12, "costImpact": 250000},
            "strategies": [
                {"id": "A", "name": "Air freight", "costImpact": 10000, "riskReduction": 0.6, "sustainabilityImpact": 500}
            ],
            "userPreferences": {"prioritizeCost": true, "maxCostImpact": 40000},
            "userId": "planner-1"
        }"#;

        let request: NegotiateRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.scenario_id.as_deref(), Some("scn-1"));
        assert_eq!(request.impacts.unwrap().delivery_delay_days, 12.0);
        assert_eq!(request.strategies.unwrap()[0].risk_reduction, 0.6);
        let prefs = request.user_preferences.unwrap();
        assert!(prefs.prioritize_cost);
        assert_eq!(prefs.max_cost_impact, Some(40000.0));
        assert!(request.correlation_id.is_none());
    }

    #[test]
    fn request_tolerates_missing_fields() {
        let request: NegotiateRequest = serde_json::from_str("{}").unwrap();
        assert!(request.scenario_id.is_none());
        assert!(request.strategies.is_none());
    }

    #[test]
    fn metadata_serializes_camel_case() {
        let metadata = ResponseMetadata {
            correlation_id: "corr-1".to_string(),
            execution_time_ms: 3,
            negotiation_method: NEGOTIATION_METHOD,
        };
        let json = serde_json::to_value(&metadata).unwrap();

        assert_eq!(json["correlationId"], "corr-1");
        assert_eq!(json["executionTimeMs"], 3);
        assert_eq!(json["negotiationMethod"], "multi-objective-weighted");
    }

    #[test]
    fn error_response_from_validation_error() {
        let domain: DomainError = ValidationError::missing_field("strategies").into();
        let response = ErrorResponse::from(domain);

        assert_eq!(response.code, "MISSING_FIELD");
        assert_eq!(response.details.unwrap()["field"], "strategies");
    }

    #[test]
    fn error_response_omits_empty_details() {
        let response = ErrorResponse::from(DomainError::new(ErrorCode::AuditSinkError, "boom"));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["code"], "AUDIT_SINK_ERROR");
        assert!(json.get("details").is_none());
    }
}
