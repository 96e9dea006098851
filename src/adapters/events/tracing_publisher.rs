//! Tracing event publisher - Writes events to the structured log stream.
//!
//! Each envelope becomes one `info` record on the `audit` target, so the
//! audit trail ships wherever the process logs already go.

use async_trait::async_trait;
use tracing::info;

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::EventPublisher;

/// Log target used for audit records.
pub const AUDIT_LOG_TARGET: &str = "audit";

/// Publishes events as structured log records.
#[derive(Debug, Clone, Default)]
pub struct TracingEventPublisher;

impl TracingEventPublisher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventPublisher for TracingEventPublisher {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        let payload = serde_json::to_string(&event.payload).map_err(|e| {
            DomainError::new(
                ErrorCode::AuditSinkError,
                format!("Failed to serialize event payload: {}", e),
            )
        })?;

        info!(
            target: AUDIT_LOG_TARGET,
            event_id = %event.event_id,
            event_type = %event.event_type,
            aggregate_type = %event.aggregate_type,
            aggregate_id = %event.aggregate_id,
            correlation_id = event.metadata.correlation_id.as_deref().unwrap_or(""),
            occurred_at = %event.occurred_at.as_datetime().to_rfc3339(),
            payload = %payload,
            "Event recorded"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn publish_succeeds_without_subscriber() {
        let publisher = TracingEventPublisher::new();
        let envelope = EventEnvelope::new(
            "negotiation.decision_recorded.v1",
            "scn-1",
            "Scenario",
            json!({"rationale": "Consensus reached."}),
        )
        .with_correlation_id("corr-1");

        assert!(publisher.publish(envelope).await.is_ok());
    }
}
