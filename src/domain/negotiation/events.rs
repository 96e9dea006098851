//! Negotiation domain events.
//!
//! The decision audit record is published once per successful negotiation for
//! compliance and traceability. It is append-only; the engine never reads it back.

use serde::{Deserialize, Serialize};

use super::{ConflictReason, MitigationStrategy, NegotiationParameters};
use crate::domain::foundation::{CorrelationId, EventId, ScenarioId, Timestamp, UserId};

/// Trimmed copy of a selected strategy kept in the audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategySnapshot {
    pub id: String,
    pub name: String,
    pub cost_impact: f64,
    pub risk_reduction: f64,
    pub sustainability_impact: f64,
}

impl From<&MitigationStrategy> for StrategySnapshot {
    fn from(strategy: &MitigationStrategy) -> Self {
        Self {
            id: strategy.id.clone(),
            name: strategy.name.clone(),
            cost_impact: strategy.cost_impact,
            risk_reduction: strategy.risk_reduction,
            sustainability_impact: strategy.sustainability_impact,
        }
    }
}

/// Published when a negotiation completes, whether by consensus or escalation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionAuditRecord {
    /// Unique event identifier for deduplication.
    pub event_id: EventId,
    /// Scenario the negotiation was run for.
    pub scenario_id: ScenarioId,
    /// Decision-maker who requested the negotiation.
    pub user_id: UserId,
    /// Request correlation identifier.
    pub correlation_id: CorrelationId,
    /// The balanced strategies, best first.
    pub selected_strategies: Vec<StrategySnapshot>,
    /// Weights and thresholds in effect.
    pub negotiation_parameters: NegotiationParameters,
    pub conflict_detected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflict_reason: Option<ConflictReason>,
    /// Human-readable rationale.
    pub rationale: String,
    /// When the decision was recorded.
    pub recorded_at: Timestamp,
}

crate::domain_event!(
    DecisionAuditRecord,
    event_type = "negotiation.decision_recorded.v1",
    schema_version = 1,
    aggregate_id = scenario_id,
    aggregate_type = "Scenario",
    occurred_at = recorded_at,
    event_id = event_id
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainEvent, SerializableDomainEvent};

    fn record(conflict_reason: Option<ConflictReason>) -> DecisionAuditRecord {
        DecisionAuditRecord {
            event_id: EventId::from_string("evt-audit-1"),
            scenario_id: ScenarioId::new("scn-1").unwrap(),
            user_id: UserId::new("user-1").unwrap(),
            correlation_id: CorrelationId::or_generate(Some("corr-1")),
            selected_strategies: vec![StrategySnapshot::from(&MitigationStrategy::new(
                "B",
                "Dual sourcing",
                50000.0,
                0.9,
                200.0,
            ))],
            negotiation_parameters: NegotiationParameters::default(),
            conflict_detected: conflict_reason.is_some(),
            conflict_reason,
            rationale: "Consensus reached.".to_string(),
            recorded_at: Timestamp::now(),
        }
    }

    #[test]
    fn audit_record_event_identity() {
        let event = record(None);

        assert_eq!(event.event_type(), "negotiation.decision_recorded.v1");
        assert_eq!(event.aggregate_type(), "Scenario");
        assert_eq!(event.aggregate_id(), "scn-1");
    }

    #[test]
    fn audit_record_to_envelope() {
        let envelope = record(Some(ConflictReason::AmbiguousTradeOffs)).to_envelope();

        assert_eq!(envelope.event_type, "negotiation.decision_recorded.v1");
        assert_eq!(envelope.schema_version, 1);
        assert_eq!(envelope.event_id.as_str(), "evt-audit-1");
        assert_eq!(envelope.payload["conflictReason"], "ambiguous_trade_offs");
        assert_eq!(envelope.payload["selectedStrategies"][0]["id"], "B");
    }

    #[test]
    fn audit_record_survives_envelope_round_trip() {
        let envelope = record(None).to_envelope();
        let restored: DecisionAuditRecord = envelope.payload_as().unwrap();

        assert!(!restored.conflict_detected);
        assert!(restored.conflict_reason.is_none());
        assert!(restored.negotiation_parameters.thresholds.max_cost.is_infinite());
        assert_eq!(restored.selected_strategies.len(), 1);
    }

    #[test]
    fn snapshot_drops_description() {
        let strategy = MitigationStrategy::new("A", "Air", 1.0, 0.5, 2.0).with_description("long");
        let json = serde_json::to_value(StrategySnapshot::from(&strategy)).unwrap();
        assert!(json.get("description").is_none());
        assert_eq!(json["costImpact"], 1.0);
    }
}
