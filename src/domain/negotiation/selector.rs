//! Strategy Selector - Ranks evaluated strategies and keeps the shortlist.

use super::{EvaluatedStrategy, MitigationStrategy};

/// Upper bound on the balanced shortlist.
pub const MAX_BALANCED_STRATEGIES: usize = 3;

/// Ranking and truncation of evaluated strategies.
pub struct StrategySelector;

impl StrategySelector {
    /// Orders by composite score, best first.
    ///
    /// The sort is stable, so equal scores keep their input order.
    pub fn rank(mut evaluated: Vec<EvaluatedStrategy>) -> Vec<EvaluatedStrategy> {
        evaluated.sort_by(|a, b| b.negotiation_score.total_cmp(&a.negotiation_score));
        evaluated
    }

    /// Takes the top `min(MAX_BALANCED_STRATEGIES, n)` of an already ranked list.
    pub fn select(ranked: &[EvaluatedStrategy]) -> Vec<MitigationStrategy> {
        ranked
            .iter()
            .take(MAX_BALANCED_STRATEGIES)
            .map(|e| e.strategy.clone())
            .collect()
    }
}
