//! Negotiation Engine - Runs the full multi-objective pipeline.
//!
//! The engine is pure and synchronous. Given the same strategies, preferences
//! and tuning it produces a byte-identical result.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::{
    ConflictDetector, ConflictEscalation, MitigationStrategy, NegotiationParameters,
    ObjectiveWeights, ParameterDeriver, RationaleComposer, StrategyEvaluator, StrategySelector,
    TradeoffVisualization, UserPreferences, VisualizationGenerator, AMBIGUITY_VARIANCE_THRESHOLD,
    DEFAULT_WEIGHTS,
};

/// Errors raised by the engine itself.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NegotiationError {
    #[error("At least one mitigation strategy is required")]
    NoCandidates,
}

/// Tunable constants for a negotiation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NegotiationTuning {
    /// Population variance below which the top scores count as tied.
    pub ambiguity_variance_threshold: f64,
    /// Weights used when no priority flag is set.
    pub default_weights: ObjectiveWeights,
}

impl Default for NegotiationTuning {
    fn default() -> Self {
        Self {
            ambiguity_variance_threshold: AMBIGUITY_VARIANCE_THRESHOLD,
            default_weights: DEFAULT_WEIGHTS,
        }
    }
}

/// Outcome of a negotiation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NegotiationResult {
    /// Up to three strategies, best first.
    pub balanced_strategies: Vec<MitigationStrategy>,
    /// Always three charts.
    pub tradeoff_visualizations: Vec<TradeoffVisualization>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflict_escalation: Option<ConflictEscalation>,
    pub negotiation_parameters: NegotiationParameters,
    pub rationale: String,
}

impl NegotiationResult {
    pub fn requires_user_input(&self) -> bool {
        self.conflict_escalation
            .as_ref()
            .is_some_and(|e| e.requires_user_input)
    }
}

/// Multi-objective negotiation engine.
#[derive(Debug, Clone, Default)]
pub struct NegotiationEngine {
    tuning: NegotiationTuning,
}

impl NegotiationEngine {
    pub fn new(tuning: NegotiationTuning) -> Self {
        Self { tuning }
    }

    /// Negotiates a balanced shortlist from candidate strategies.
    ///
    /// Pipeline: derive parameters, evaluate, rank, detect conflicts, select the
    /// top three, build trade-off charts, compose the rationale. A conflict is
    /// a successful result that carries an escalation.
    ///
    /// # Errors
    /// `NegotiationError::NoCandidates` when `strategies` is empty.
    pub fn negotiate(
        &self,
        strategies: &[MitigationStrategy],
        preferences: Option<&UserPreferences>,
    ) -> Result<NegotiationResult, NegotiationError> {
        let params =
            ParameterDeriver::derive_with_defaults(preferences, self.tuning.default_weights);
        debug!(
            candidates = strategies.len(),
            cost_weight = params.weights.cost,
            risk_weight = params.weights.risk,
            sustainability_weight = params.weights.sustainability,
            "Derived negotiation parameters"
        );

        let evaluated = StrategyEvaluator::evaluate(strategies, &params)?;
        let ranked = StrategySelector::rank(evaluated);

        let conflict = ConflictDetector::detect_with_threshold(
            &ranked,
            &params,
            self.tuning.ambiguity_variance_threshold,
        );
        if let Some(conflict) = &conflict {
            debug!(reason = %conflict.reason(), "Negotiation requires escalation");
        }

        let selected = StrategySelector::select(&ranked);
        let tradeoff_visualizations = VisualizationGenerator::generate(&selected, &params.thresholds);
        let rationale = RationaleComposer::compose_text(&selected, &params, conflict.as_ref());

        debug!(
            selected = selected.len(),
            conflict = conflict.is_some(),
            "Negotiation completed"
        );

        Ok(NegotiationResult {
            balanced_strategies: selected,
            tradeoff_visualizations,
            conflict_escalation: conflict.map(ConflictEscalation::from),
            negotiation_parameters: params,
            rationale,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::negotiation::{ConflictReason, Objective};
    use proptest::prelude::*;

    fn reference_strategies() -> Vec<MitigationStrategy> {
        vec![
            MitigationStrategy::new("A", "Air freight", 10000.0, 0.6, 500.0),
            MitigationStrategy::new("B", "Dual sourcing", 50000.0, 0.9, 200.0),
            MitigationStrategy::new("C", "Buffer stock", 30000.0, 0.75, 350.0),
        ]
    }

    fn ids(result: &NegotiationResult) -> Vec<&str> {
        result
            .balanced_strategies
            .iter()
            .map(|s| s.id.as_str())
            .collect()
    }

    #[test]
    fn default_preferences_rank_b_c_a() {
        let result = NegotiationEngine::default()
            .negotiate(&reference_strategies(), None)
            .unwrap();

        assert_eq!(ids(&result), vec!["B", "C", "A"]);
        assert!(result.conflict_escalation.is_none());
        assert!(!result.requires_user_input());
        assert_eq!(result.tradeoff_visualizations.len(), 3);
        assert!(result.rationale.starts_with("Consensus reached"));
        assert!(result.rationale.contains("Dual sourcing"));
    }

    #[test]
    fn tight_cost_cap_escalates_on_cost() {
        let prefs = UserPreferences {
            max_cost_impact: Some(5000.0),
            ..Default::default()
        };
        let result = NegotiationEngine::default()
            .negotiate(&reference_strategies(), Some(&prefs))
            .unwrap();

        let escalation = result.conflict_escalation.as_ref().unwrap();
        assert!(escalation.requires_user_input);
        assert_eq!(escalation.conflict.reason(), ConflictReason::ThresholdViolations);
        assert_eq!(escalation.conflict.objectives(), &[Objective::Cost]);
        assert!(escalation.conflict.explanation().contains("5000"));

        // Selection still happens, scored the usual way.
        assert_eq!(ids(&result), vec!["B", "C", "A"]);
        assert!(result.rationale.contains(escalation.conflict.explanation()));
    }

    #[test]
    fn near_identical_scores_escalate_as_ambiguous() {
        let strategies = vec![
            MitigationStrategy::new("A", "Cheap", 10000.0, 0.5, 400.0),
            MitigationStrategy::new("B", "Robust", 30000.0, 0.9, 400.0),
            MitigationStrategy::new("C", "Middle", 20000.0, 0.7, 400.0),
        ];
        let result = NegotiationEngine::default()
            .negotiate(&strategies, None)
            .unwrap();

        let escalation = result.conflict_escalation.unwrap();
        assert_eq!(escalation.conflict.reason(), ConflictReason::AmbiguousTradeOffs);
        assert_eq!(escalation.conflict.objectives(), &Objective::ALL);
    }

    #[test]
    fn prioritize_cost_shifts_weights() {
        let prefs = UserPreferences {
            prioritize_cost: true,
            prioritize_risk: true,
            ..Default::default()
        };
        let result = NegotiationEngine::default()
            .negotiate(&reference_strategies(), Some(&prefs))
            .unwrap();

        assert_eq!(result.negotiation_parameters.weights.cost, 0.50);
        assert_eq!(result.negotiation_parameters.weights.risk, 0.25);
    }

    #[test]
    fn empty_input_is_an_error() {
        let result = NegotiationEngine::default().negotiate(&[], None);
        assert_eq!(result.unwrap_err(), NegotiationError::NoCandidates);
    }

    #[test]
    fn custom_tuning_is_applied() {
        let tuning = NegotiationTuning {
            ambiguity_variance_threshold: 1.0,
            default_weights: ObjectiveWeights {
                cost: 0.2,
                risk: 0.6,
                sustainability: 0.2,
            },
        };
        let result = NegotiationEngine::new(tuning)
            .negotiate(&reference_strategies(), None)
            .unwrap();

        assert_eq!(result.negotiation_parameters.weights, tuning.default_weights);
        // Any spread at all is below a variance cutoff of 1.0.
        assert_eq!(
            result.conflict_escalation.unwrap().conflict.reason(),
            ConflictReason::AmbiguousTradeOffs
        );
    }

    #[test]
    fn result_serializes_deterministically() {
        let engine = NegotiationEngine::default();
        let prefs = UserPreferences {
            min_risk_reduction: Some(0.7),
            ..Default::default()
        };

        let first = serde_json::to_vec(&engine.negotiate(&reference_strategies(), Some(&prefs)).unwrap()).unwrap();
        let second = serde_json::to_vec(&engine.negotiate(&reference_strategies(), Some(&prefs)).unwrap()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn result_wire_shape() {
        let result = NegotiationEngine::default()
            .negotiate(&reference_strategies(), None)
            .unwrap();
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["balancedStrategies"][0]["id"], "B");
        assert!(json.get("conflictEscalation").is_none());
        assert!(json["negotiationParameters"]["thresholds"]["maxCost"].is_null());
        assert_eq!(json["tradeoffVisualizations"][1]["type"], "cost_vs_sustainability");

        let restored: NegotiationResult = serde_json::from_value(json).unwrap();
        assert_eq!(restored, result);
    }

    fn arb_strategies() -> impl Strategy<Value = Vec<MitigationStrategy>> {
        proptest::collection::vec((-1e6f64..1e6, -1.0f64..2.0, -1e4f64..1e4), 1..10).prop_map(
            |rows| {
                rows.into_iter()
                    .enumerate()
                    .map(|(i, (c, r, s))| MitigationStrategy::new(format!("S{}", i), "gen", c, r, s))
                    .collect()
            },
        )
    }

    proptest! {
        #[test]
        fn selection_length_is_min_three(strategies in arb_strategies()) {
            let result = NegotiationEngine::default().negotiate(&strategies, None).unwrap();
            prop_assert_eq!(result.balanced_strategies.len(), strategies.len().min(3));
            prop_assert_eq!(result.tradeoff_visualizations.len(), 3);
        }

        #[test]
        fn weights_always_normalized(
            strategies in arb_strategies(),
            cost in any::<bool>(),
            risk in any::<bool>(),
            sustainability in any::<bool>(),
        ) {
            let prefs = UserPreferences {
                prioritize_cost: cost,
                prioritize_risk: risk,
                prioritize_sustainability: sustainability,
                ..Default::default()
            };
            let result = NegotiationEngine::default().negotiate(&strategies, Some(&prefs)).unwrap();
            prop_assert!(result.negotiation_parameters.weights.is_normalized());
        }

        #[test]
        fn cost_cap_below_all_always_escalates(strategies in arb_strategies()) {
            let floor = strategies.iter().map(|s| s.cost_impact).fold(f64::INFINITY, f64::min);
            let prefs = UserPreferences {
                max_cost_impact: Some(floor - 1.0),
                ..Default::default()
            };
            let result = NegotiationEngine::default().negotiate(&strategies, Some(&prefs)).unwrap();
            let escalation = result.conflict_escalation.unwrap();
            prop_assert_eq!(escalation.conflict.reason(), ConflictReason::ThresholdViolations);
            prop_assert!(escalation.conflict.objectives().contains(&Objective::Cost));
        }
    }
}
