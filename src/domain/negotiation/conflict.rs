//! Conflict Detector - Decides when a negotiation must escalate to a human.
//!
//! Two failure modes are recognized, in order:
//!
//! 1. **Threshold violations** - no candidate satisfies every threshold.
//! 2. **Ambiguous trade-offs** - the top candidates' composite scores are
//!    statistically indistinguishable.
//!
//! The ambiguity check is a variance heuristic over the top three scores, not
//! a proof that no candidate is better. The cutoff is tunable.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{EvaluatedStrategy, NegotiationParameters, Objective};

/// Population variance below which the top candidates are considered tied.
pub const AMBIGUITY_VARIANCE_THRESHOLD: f64 = 0.001;

/// Number of top-ranked scores inspected by the ambiguity check.
pub const AMBIGUITY_SAMPLE_SIZE: usize = 3;

const AMBIGUITY_EXPLANATION: &str = "The top strategies have nearly identical overall scores, \
so the choice depends on how you weigh cost, risk, and sustainability against each other. \
Review the trade-off visualizations and confirm which objective should take priority.";

/// Why a negotiation could not reach consensus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictReason {
    ThresholdViolations,
    AmbiguousTradeOffs,
}

impl ConflictReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictReason::ThresholdViolations => "threshold_violations",
            ConflictReason::AmbiguousTradeOffs => "ambiguous_trade_offs",
        }
    }
}

impl fmt::Display for ConflictReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A detected conflict, tagged by reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Conflict {
    /// No strategy satisfies all thresholds; `objectives` lists the
    /// dimensions every strategy violates.
    ThresholdViolations {
        objectives: Vec<Objective>,
        explanation: String,
    },
    /// The top strategies cannot be told apart on composite score.
    AmbiguousTradeOffs {
        objectives: Vec<Objective>,
        explanation: String,
    },
}

impl Conflict {
    pub fn reason(&self) -> ConflictReason {
        match self {
            Conflict::ThresholdViolations { .. } => ConflictReason::ThresholdViolations,
            Conflict::AmbiguousTradeOffs { .. } => ConflictReason::AmbiguousTradeOffs,
        }
    }

    pub fn objectives(&self) -> &[Objective] {
        match self {
            Conflict::ThresholdViolations { objectives, .. }
            | Conflict::AmbiguousTradeOffs { objectives, .. } => objectives,
        }
    }

    pub fn explanation(&self) -> &str {
        match self {
            Conflict::ThresholdViolations { explanation, .. }
            | Conflict::AmbiguousTradeOffs { explanation, .. } => explanation,
        }
    }
}

/// A conflict as reported to the caller.
///
/// `requires_user_input` is always true: any conflict needs a human decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictEscalation {
    #[serde(flatten)]
    pub conflict: Conflict,
    pub requires_user_input: bool,
}

impl From<Conflict> for ConflictEscalation {
    fn from(conflict: Conflict) -> Self {
        Self {
            conflict,
            requires_user_input: true,
        }
    }
}

/// Detects escalation-worthy conflicts in an evaluated candidate set.
pub struct ConflictDetector;

impl ConflictDetector {
    /// Detects a conflict using [`AMBIGUITY_VARIANCE_THRESHOLD`].
    pub fn detect(
        evaluated: &[EvaluatedStrategy],
        params: &NegotiationParameters,
    ) -> Option<Conflict> {
        Self::detect_with_threshold(evaluated, params, AMBIGUITY_VARIANCE_THRESHOLD)
    }

    /// Detects a conflict with an explicit ambiguity cutoff.
    ///
    /// A threshold-violation conflict short-circuits: ambiguity is only checked
    /// when at least one candidate meets every threshold.
    pub fn detect_with_threshold(
        evaluated: &[EvaluatedStrategy],
        params: &NegotiationParameters,
        variance_threshold: f64,
    ) -> Option<Conflict> {
        if evaluated.is_empty() {
            return None;
        }

        if !evaluated.iter().any(|e| e.meets_thresholds) {
            return Some(Self::threshold_violations(evaluated, params));
        }

        let variance = Self::top_score_variance(evaluated)?;
        if variance < variance_threshold {
            return Some(Conflict::AmbiguousTradeOffs {
                objectives: Objective::ALL.to_vec(),
                explanation: AMBIGUITY_EXPLANATION.to_string(),
            });
        }

        None
    }

    /// Population variance of the top [`AMBIGUITY_SAMPLE_SIZE`] composite scores.
    ///
    /// Returns `None` with fewer than two candidates; a lone candidate is never ambiguous.
    pub fn top_score_variance(evaluated: &[EvaluatedStrategy]) -> Option<f64> {
        if evaluated.len() < 2 {
            return None;
        }

        let mut scores: Vec<f64> = evaluated.iter().map(|e| e.negotiation_score).collect();
        scores.sort_by(|a, b| b.total_cmp(a));
        scores.truncate(AMBIGUITY_SAMPLE_SIZE);

        let n = scores.len() as f64;
        let mean = scores.iter().sum::<f64>() / n;
        Some(scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n)
    }

    fn threshold_violations(
        evaluated: &[EvaluatedStrategy],
        params: &NegotiationParameters,
    ) -> Conflict {
        let thresholds = &params.thresholds;
        let mut objectives = Vec::new();
        let mut sentences = Vec::new();

        for objective in Objective::ALL {
            let universally_violated = evaluated
                .iter()
                .all(|e| thresholds.is_violated_by(objective, e.strategy.metric(objective)));
            if !universally_violated {
                continue;
            }

            let limit = thresholds.limit(objective);
            sentences.push(match objective {
                Objective::Cost => format!(
                    "All strategies exceed the maximum cost impact threshold of {}.",
                    limit
                ),
                Objective::Risk => format!(
                    "All strategies fall short of the minimum risk reduction threshold of {}.",
                    limit
                ),
                Objective::Sustainability => format!(
                    "All strategies exceed the maximum sustainability impact threshold of {}.",
                    limit
                ),
            });
            objectives.push(objective);
        }

        if sentences.is_empty() {
            sentences.push(
                "No single strategy satisfies all thresholds at once; each one violates at least one constraint."
                    .to_string(),
            );
        }

        Conflict::ThresholdViolations {
            objectives,
            explanation: sentences.join(" "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::negotiation::{
        MitigationStrategy, ParameterDeriver, StrategyEvaluator, UserPreferences,
    };

    fn reference_strategies() -> Vec<MitigationStrategy> {
        vec![
            MitigationStrategy::new("A", "Air freight", 10000.0, 0.6, 500.0),
            MitigationStrategy::new("B", "Dual sourcing", 50000.0, 0.9, 200.0),
            MitigationStrategy::new("C", "Buffer stock", 30000.0, 0.75, 350.0),
        ]
    }

    fn detect(strategies: &[MitigationStrategy], prefs: Option<UserPreferences>) -> Option<Conflict> {
        let params = ParameterDeriver::derive(prefs.as_ref());
        let evaluated = StrategyEvaluator::evaluate(strategies, &params).unwrap();
        ConflictDetector::detect(&evaluated, &params)
    }

    fn evaluated_with_scores(scores: &[f64]) -> Vec<EvaluatedStrategy> {
        scores
            .iter()
            .enumerate()
            .map(|(i, score)| EvaluatedStrategy {
                strategy: MitigationStrategy::new(format!("S{}", i), "s", 1.0, 0.5, 1.0),
                cost_score: 0.5,
                risk_score: 0.5,
                sustainability_score: 0.5,
                negotiation_score: *score,
                meets_thresholds: true,
            })
            .collect()
    }

    #[test]
    fn no_conflict_for_well_separated_scores() {
        assert_eq!(detect(&reference_strategies(), None), None);
    }

    #[test]
    fn cost_threshold_violated_by_all() {
        let prefs = UserPreferences {
            max_cost_impact: Some(5000.0),
            ..Default::default()
        };
        let conflict = detect(&reference_strategies(), Some(prefs)).unwrap();

        assert_eq!(conflict.reason(), ConflictReason::ThresholdViolations);
        assert_eq!(conflict.objectives(), &[Objective::Cost]);
        assert!(conflict.explanation().contains("5000"));
    }

    #[test]
    fn multiple_universal_violations_are_all_listed() {
        let prefs = UserPreferences {
            max_cost_impact: Some(5000.0),
            min_risk_reduction: Some(0.95),
            ..Default::default()
        };
        let conflict = detect(&reference_strategies(), Some(prefs)).unwrap();

        assert_eq!(conflict.objectives(), &[Objective::Cost, Objective::Risk]);
        assert!(conflict.explanation().contains("0.95"));
    }

    #[test]
    fn mixed_violations_report_no_universal_objective() {
        // Every strategy fails something, but no single bound fails for all of them.
        let prefs = UserPreferences {
            max_cost_impact: Some(40000.0),
            min_risk_reduction: Some(0.7),
            max_sustainability_impact: Some(300.0),
            ..Default::default()
        };
        let conflict = detect(&reference_strategies(), Some(prefs)).unwrap();

        assert_eq!(conflict.reason(), ConflictReason::ThresholdViolations);
        assert!(conflict.objectives().is_empty());
        assert!(!conflict.explanation().is_empty());
    }

    #[test]
    fn threshold_violation_suppresses_ambiguity() {
        let strategies = vec![
            MitigationStrategy::new("A", "One", 100.0, 0.5, 10.0),
            MitigationStrategy::new("B", "Two", 100.0, 0.5, 10.0),
        ];
        let prefs = UserPreferences {
            max_cost_impact: Some(50.0),
            ..Default::default()
        };
        let conflict = detect(&strategies, Some(prefs)).unwrap();
        assert_eq!(conflict.reason(), ConflictReason::ThresholdViolations);
    }

    #[test]
    fn near_identical_scores_are_ambiguous() {
        let evaluated = evaluated_with_scores(&[0.701, 0.700, 0.699]);
        let params = ParameterDeriver::derive(None);
        let conflict = ConflictDetector::detect(&evaluated, &params).unwrap();

        assert_eq!(conflict.reason(), ConflictReason::AmbiguousTradeOffs);
        assert_eq!(conflict.objectives(), &Objective::ALL);
        assert!(conflict.explanation().contains("trade-off visualizations"));
    }

    #[test]
    fn engineered_strategies_are_ambiguous() {
        let strategies = vec![
            MitigationStrategy::new("A", "Cheap", 10000.0, 0.5, 400.0),
            MitigationStrategy::new("B", "Robust", 30000.0, 0.9, 400.0),
            MitigationStrategy::new("C", "Middle", 20000.0, 0.7, 400.0),
        ];
        let conflict = detect(&strategies, None).unwrap();
        assert_eq!(conflict.reason(), ConflictReason::AmbiguousTradeOffs);
    }

    #[test]
    fn ambiguity_looks_only_at_top_three() {
        // Top three are well separated; the tied tail must not matter.
        let evaluated = evaluated_with_scores(&[0.9, 0.6, 0.3, 0.1, 0.1, 0.1]);
        let params = ParameterDeriver::derive(None);
        assert_eq!(ConflictDetector::detect(&evaluated, &params), None);
    }

    #[test]
    fn single_candidate_is_never_ambiguous() {
        let evaluated = evaluated_with_scores(&[0.5]);
        let params = ParameterDeriver::derive(None);
        assert_eq!(ConflictDetector::top_score_variance(&evaluated), None);
        assert_eq!(ConflictDetector::detect(&evaluated, &params), None);
    }

    #[test]
    fn custom_threshold_changes_sensitivity() {
        let evaluated = evaluated_with_scores(&[0.70, 0.65, 0.60]);
        let params = ParameterDeriver::derive(None);

        assert_eq!(ConflictDetector::detect(&evaluated, &params), None);
        let conflict = ConflictDetector::detect_with_threshold(&evaluated, &params, 0.01);
        assert_eq!(
            conflict.map(|c| c.reason()),
            Some(ConflictReason::AmbiguousTradeOffs)
        );
    }

    #[test]
    fn variance_is_population_variance() {
        let evaluated = evaluated_with_scores(&[0.67, 0.5, 0.33]);
        let variance = ConflictDetector::top_score_variance(&evaluated).unwrap();
        let expected = (0.17f64.powi(2) * 2.0) / 3.0;
        assert!((variance - expected).abs() < 1e-12);
    }

    #[test]
    fn escalation_serializes_flat_with_tag() {
        let escalation = ConflictEscalation::from(Conflict::ThresholdViolations {
            objectives: vec![Objective::Cost],
            explanation: "too expensive".to_string(),
        });
        let json = serde_json::to_value(&escalation).unwrap();

        assert_eq!(json["reason"], "threshold_violations");
        assert_eq!(json["objectives"], serde_json::json!(["cost"]));
        assert_eq!(json["explanation"], "too expensive");
        assert_eq!(json["requiresUserInput"], true);
    }
}
