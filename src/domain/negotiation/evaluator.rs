//! Strategy Evaluator - Min-max normalization and weighted composite scoring.

use serde::{Deserialize, Serialize};

use super::{MitigationStrategy, NegotiationError, NegotiationParameters, Objective};

/// Score used for every candidate on a dimension where all candidates tie.
pub const NEUTRAL_SCORE: f64 = 0.5;

/// A strategy with its normalized sub-scores and composite score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatedStrategy {
    pub strategy: MitigationStrategy,
    pub cost_score: f64,
    pub risk_score: f64,
    pub sustainability_score: f64,
    pub negotiation_score: f64,
    pub meets_thresholds: bool,
}

impl EvaluatedStrategy {
    /// Normalized sub-score for one objective.
    pub fn score(&self, objective: Objective) -> f64 {
        match objective {
            Objective::Cost => self.cost_score,
            Objective::Risk => self.risk_score,
            Objective::Sustainability => self.sustainability_score,
        }
    }
}

/// Observed range of one objective across the candidate set.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Range {
    min: f64,
    max: f64,
}

impl Range {
    fn of(strategies: &[MitigationStrategy], objective: Objective) -> Self {
        strategies.iter().map(|s| s.metric(objective)).fold(
            Range {
                min: f64::INFINITY,
                max: f64::NEG_INFINITY,
            },
            |acc, v| Range {
                min: acc.min.min(v),
                max: acc.max.max(v),
            },
        )
    }

    /// Position of `value` within the range, in [0,1]; `None` when the range is degenerate.
    ///
    /// Operands are halved before subtracting so ranges spanning close to the
    /// full `f64` domain stay finite.
    fn position(&self, value: f64) -> Option<f64> {
        if self.max <= self.min {
            return None;
        }
        let span = self.max / 2.0 - self.min / 2.0;
        if !(span.is_finite() && span > 0.0) {
            return None;
        }
        let position = (value / 2.0 - self.min / 2.0) / span;
        position.is_finite().then(|| position.clamp(0.0, 1.0))
    }

    /// Higher raw value scores higher.
    fn benefit_score(&self, value: f64) -> f64 {
        self.position(value).unwrap_or(NEUTRAL_SCORE)
    }

    /// Lower raw value scores higher.
    fn cost_score(&self, value: f64) -> f64 {
        self.position(value).map(|p| 1.0 - p).unwrap_or(NEUTRAL_SCORE)
    }
}

/// Scores candidate strategies relative to each other.
pub struct StrategyEvaluator;

impl StrategyEvaluator {
    /// Evaluates every strategy against the candidate set.
    ///
    /// # Algorithm
    /// Per objective, raw values are rescaled into [0,1] using the set's min and max
    /// (inverted for cost and sustainability, where lower is better). When every
    /// candidate ties on an objective each gets [`NEUTRAL_SCORE`]. The composite is
    /// the weighted sum of the three sub-scores. Threshold satisfaction is checked
    /// on raw values.
    ///
    /// # Errors
    /// `NegotiationError::NoCandidates` when `strategies` is empty.
    pub fn evaluate(
        strategies: &[MitigationStrategy],
        params: &NegotiationParameters,
    ) -> Result<Vec<EvaluatedStrategy>, NegotiationError> {
        if strategies.is_empty() {
            return Err(NegotiationError::NoCandidates);
        }

        let cost = Range::of(strategies, Objective::Cost);
        let risk = Range::of(strategies, Objective::Risk);
        let sustainability = Range::of(strategies, Objective::Sustainability);
        let weights = &params.weights;
        let thresholds = &params.thresholds;

        let evaluated = strategies
            .iter()
            .map(|strategy| {
                let cost_score = cost.cost_score(strategy.cost_impact);
                let risk_score = risk.benefit_score(strategy.risk_reduction);
                let sustainability_score =
                    sustainability.cost_score(strategy.sustainability_impact);

                let composite = weights.cost * cost_score
                    + weights.risk * risk_score
                    + weights.sustainability * sustainability_score;
                let negotiation_score = if composite.is_finite() {
                    composite.clamp(0.0, 1.0)
                } else {
                    NEUTRAL_SCORE
                };

                let meets_thresholds = Objective::ALL
                    .iter()
                    .all(|o| !thresholds.is_violated_by(*o, strategy.metric(*o)));

                EvaluatedStrategy {
                    strategy: strategy.clone(),
                    cost_score,
                    risk_score,
                    sustainability_score,
                    negotiation_score,
                    meets_thresholds,
                }
            })
            .collect();

        Ok(evaluated)
    }
}
