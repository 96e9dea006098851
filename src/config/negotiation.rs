//! Negotiation engine tuning

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::negotiation::{
    NegotiationTuning, Objective, ObjectiveWeights, AMBIGUITY_VARIANCE_THRESHOLD,
    DEFAULT_WEIGHTS,
};

/// Tunable constants for the negotiation engine
#[derive(Debug, Clone, Deserialize)]
pub struct NegotiationConfig {
    /// Population variance of the top three scores below which a result is ambiguous
    #[serde(default = "default_ambiguity_variance_threshold")]
    pub ambiguity_variance_threshold: f64,

    /// Cost weight when no priority flag is set
    #[serde(default = "default_cost_weight")]
    pub default_cost_weight: f64,

    /// Risk weight when no priority flag is set
    #[serde(default = "default_risk_weight")]
    pub default_risk_weight: f64,

    /// Sustainability weight when no priority flag is set
    #[serde(default = "default_sustainability_weight")]
    pub default_sustainability_weight: f64,
}

impl NegotiationConfig {
    pub fn default_weights(&self) -> ObjectiveWeights {
        ObjectiveWeights {
            cost: self.default_cost_weight,
            risk: self.default_risk_weight,
            sustainability: self.default_sustainability_weight,
        }
    }

    /// Engine tuning built from this configuration
    pub fn tuning(&self) -> NegotiationTuning {
        NegotiationTuning {
            ambiguity_variance_threshold: self.ambiguity_variance_threshold,
            default_weights: self.default_weights(),
        }
    }

    /// Validate negotiation configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.ambiguity_variance_threshold.is_finite() || self.ambiguity_variance_threshold < 0.0
        {
            return Err(ValidationError::InvalidAmbiguityThreshold);
        }

        let weights = self.default_weights();
        if weights.is_normalized() {
            return Ok(());
        }

        // Name the first weight outside (0,1); otherwise only the sum is off.
        match Objective::ALL.into_iter().find(|o| {
            let w = weights.weight(*o);
            !(w > 0.0 && w < 1.0)
        }) {
            Some(objective) => Err(ValidationError::WeightOutOfRange(objective.as_str())),
            None => Err(ValidationError::WeightsNotNormalized(weights.sum())),
        }
    }
}

impl Default for NegotiationConfig {
    fn default() -> Self {
        Self {
            ambiguity_variance_threshold: default_ambiguity_variance_threshold(),
            default_cost_weight: default_cost_weight(),
            default_risk_weight: default_risk_weight(),
            default_sustainability_weight: default_sustainability_weight(),
        }
    }
}

fn default_ambiguity_variance_threshold() -> f64 {
    AMBIGUITY_VARIANCE_THRESHOLD
}

fn default_cost_weight() -> f64 {
    DEFAULT_WEIGHTS.cost
}

fn default_risk_weight() -> f64 {
    DEFAULT_WEIGHTS.risk
}

fn default_sustainability_weight() -> f64 {
    DEFAULT_WEIGHTS.sustainability
}
