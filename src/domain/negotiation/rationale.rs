//! Rationale Composer - Explanation text and the decision audit record.

use super::{
    Conflict, DecisionAuditRecord, MitigationStrategy, NegotiationParameters, NegotiationResult,
    StrategySnapshot,
};
use crate::domain::foundation::{CorrelationId, EventId, ScenarioId, Timestamp, UserId};

/// Identifiers that tie an audit record to its request.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditContext {
    pub scenario_id: ScenarioId,
    pub user_id: UserId,
    pub correlation_id: CorrelationId,
}

/// Composes rationale text and audit records.
pub struct RationaleComposer;

impl RationaleComposer {
    /// Renders the human-readable explanation.
    ///
    /// States consensus or escalation (quoting the conflict explanation), the
    /// weight percentages used, and the top strategy with its raw metrics.
    pub fn compose_text(
        selected: &[MitigationStrategy],
        params: &NegotiationParameters,
        conflict: Option<&Conflict>,
    ) -> String {
        let mut parts = Vec::with_capacity(3);

        parts.push(match conflict {
            Some(conflict) => format!(
                "Conflict escalated for human review ({}): {}",
                conflict.reason(),
                conflict.explanation()
            ),
            None => format!(
                "Consensus reached: {} balanced {} identified across cost, risk, and sustainability.",
                selected.len(),
                if selected.len() == 1 { "strategy" } else { "strategies" }
            ),
        });

        let weights = &params.weights;
        parts.push(format!(
            "Weights applied: cost {:.1}%, risk {:.1}%, sustainability {:.1}%.",
            weights.cost * 100.0,
            weights.risk * 100.0,
            weights.sustainability * 100.0
        ));

        if let Some(top) = selected.first() {
            parts.push(format!(
                "Top strategy: {} (cost impact {}, risk reduction {}, sustainability impact {}).",
                top.name, top.cost_impact, top.risk_reduction, top.sustainability_impact
            ));
        }

        parts.join(" ")
    }

    /// Bundles a finished negotiation into an audit record.
    pub fn compose_audit_record(
        context: &AuditContext,
        result: &NegotiationResult,
        recorded_at: Timestamp,
    ) -> DecisionAuditRecord {
        let conflict = result.conflict_escalation.as_ref().map(|e| &e.conflict);

        DecisionAuditRecord {
            event_id: EventId::new(),
            scenario_id: context.scenario_id.clone(),
            user_id: context.user_id.clone(),
            correlation_id: context.correlation_id.clone(),
            selected_strategies: result
                .balanced_strategies
                .iter()
                .map(StrategySnapshot::from)
                .collect(),
            negotiation_parameters: result.negotiation_parameters,
            conflict_detected: conflict.is_some(),
            conflict_reason: conflict.map(Conflict::reason),
            rationale: result.rationale.clone(),
            recorded_at,
        }
    }
}
