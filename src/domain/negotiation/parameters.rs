//! Parameter Deriver - Turns optional preferences into weights and thresholds.

use serde::{Deserialize, Serialize};

use super::{Objective, UserPreferences};
use crate::domain::foundation::bounds::upper_bound;

/// Tolerance for the weights-sum-to-one invariant.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Default weights when no priority flag is set.
///
/// The extra 0.01 on sustainability keeps the default ordering free of exact
/// ties between objectives. Tunable; see `NegotiationTuning`.
pub const DEFAULT_WEIGHTS: ObjectiveWeights = ObjectiveWeights {
    cost: 0.33,
    risk: 0.33,
    sustainability: 0.34,
};

/// Priority chain: the first objective whose flag is set selects the weights.
pub const PRIORITY_CHAIN: [(Objective, ObjectiveWeights); 3] = [
    (
        Objective::Cost,
        ObjectiveWeights {
            cost: 0.50,
            risk: 0.25,
            sustainability: 0.25,
        },
    ),
    (
        Objective::Risk,
        ObjectiveWeights {
            cost: 0.25,
            risk: 0.50,
            sustainability: 0.25,
        },
    ),
    (
        Objective::Sustainability,
        ObjectiveWeights {
            cost: 0.25,
            risk: 0.25,
            sustainability: 0.50,
        },
    ),
];

/// Relative importance of each objective.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveWeights {
    pub cost: f64,
    pub risk: f64,
    pub sustainability: f64,
}

impl ObjectiveWeights {
    /// Weight assigned to one objective.
    pub fn weight(&self, objective: Objective) -> f64 {
        match objective {
            Objective::Cost => self.cost,
            Objective::Risk => self.risk,
            Objective::Sustainability => self.sustainability,
        }
    }

    pub fn sum(&self) -> f64 {
        self.cost + self.risk + self.sustainability
    }

    /// True when every weight lies in (0,1) and they sum to one.
    pub fn is_normalized(&self) -> bool {
        Objective::ALL.iter().all(|o| {
            let w = self.weight(*o);
            w > 0.0 && w < 1.0
        }) && (self.sum() - 1.0).abs() <= WEIGHT_SUM_TOLERANCE
    }
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

/// Absolute bounds a strategy's raw impacts must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thresholds {
    /// Upper bound on cost impact; `+inf` when unconstrained.
    #[serde(with = "upper_bound")]
    pub max_cost: f64,
    /// Lower bound on risk reduction; `0` when unconstrained.
    pub min_risk_reduction: f64,
    /// Upper bound on sustainability impact; `+inf` when unconstrained.
    #[serde(with = "upper_bound")]
    pub max_sustainability: f64,
}

impl Thresholds {
    /// Whether a raw value on the given objective violates its bound.
    pub fn is_violated_by(&self, objective: Objective, value: f64) -> bool {
        match objective {
            Objective::Cost => value > self.max_cost,
            Objective::Risk => value < self.min_risk_reduction,
            Objective::Sustainability => value > self.max_sustainability,
        }
    }

    /// The bound applied to one objective.
    pub fn limit(&self, objective: Objective) -> f64 {
        match objective {
            Objective::Cost => self.max_cost,
            Objective::Risk => self.min_risk_reduction,
            Objective::Sustainability => self.max_sustainability,
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            max_cost: f64::INFINITY,
            min_risk_reduction: 0.0,
            max_sustainability: f64::INFINITY,
        }
    }
}

/// Weights and thresholds used for one negotiation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NegotiationParameters {
    pub weights: ObjectiveWeights,
    pub thresholds: Thresholds,
}

/// Derives negotiation parameters from decision-maker preferences.
pub struct ParameterDeriver;

impl ParameterDeriver {
    /// Derives parameters using [`DEFAULT_WEIGHTS`] as the fallback.
    pub fn derive(preferences: Option<&UserPreferences>) -> NegotiationParameters {
        Self::derive_with_defaults(preferences, DEFAULT_WEIGHTS)
    }

    /// Derives parameters with a caller-supplied fallback weight triple.
    ///
    /// Only the first priority flag in [`PRIORITY_CHAIN`] order is honored.
    /// Each threshold is overridden independently when present.
    pub fn derive_with_defaults(
        preferences: Option<&UserPreferences>,
        default_weights: ObjectiveWeights,
    ) -> NegotiationParameters {
        let Some(prefs) = preferences else {
            return NegotiationParameters {
                weights: default_weights,
                thresholds: Thresholds::default(),
            };
        };

        let weights = PRIORITY_CHAIN
            .iter()
            .find(|(objective, _)| prefs.prioritizes(*objective))
            .map(|(_, weights)| *weights)
            .unwrap_or(default_weights);

        let defaults = Thresholds::default();
        let thresholds = Thresholds {
            max_cost: prefs.max_cost_impact.unwrap_or(defaults.max_cost),
            min_risk_reduction: prefs
                .min_risk_reduction
                .unwrap_or(defaults.min_risk_reduction),
            max_sustainability: prefs
                .max_sustainability_impact
                .unwrap_or(defaults.max_sustainability),
        };

        NegotiationParameters {
            weights,
            thresholds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn no_preferences_yields_defaults() {
        let params = ParameterDeriver::derive(None);

        assert_eq!(params.weights, DEFAULT_WEIGHTS);
        assert!(params.thresholds.max_cost.is_infinite());
        assert_eq!(params.thresholds.min_risk_reduction, 0.0);
        assert!(params.thresholds.max_sustainability.is_infinite());
    }

    #[test]
    fn prioritize_cost_wins_over_other_flags() {
        let prefs = UserPreferences {
            prioritize_cost: true,
            prioritize_risk: true,
            prioritize_sustainability: true,
            ..Default::default()
        };
        let params = ParameterDeriver::derive(Some(&prefs));

        assert_eq!(params.weights.cost, 0.5);
        assert_eq!(params.weights.risk, 0.25);
        assert_eq!(params.weights.sustainability, 0.25);
    }

    #[test]
    fn prioritize_risk_wins_over_sustainability() {
        let prefs = UserPreferences {
            prioritize_risk: true,
            prioritize_sustainability: true,
            ..Default::default()
        };
        let params = ParameterDeriver::derive(Some(&prefs));
        assert_eq!(params.weights.risk, 0.5);
    }

    #[test]
    fn prioritize_sustainability_alone() {
        let prefs = UserPreferences {
            prioritize_sustainability: true,
            ..Default::default()
        };
        let params = ParameterDeriver::derive(Some(&prefs));
        assert_eq!(params.weights.sustainability, 0.5);
        assert_eq!(params.weights.cost, 0.25);
    }

    #[test]
    fn thresholds_override_independently() {
        let prefs = UserPreferences {
            min_risk_reduction: Some(0.7),
            ..Default::default()
        };
        let params = ParameterDeriver::derive(Some(&prefs));

        assert!(params.thresholds.max_cost.is_infinite());
        assert_eq!(params.thresholds.min_risk_reduction, 0.7);
        assert!(params.thresholds.max_sustainability.is_infinite());
        assert_eq!(params.weights, DEFAULT_WEIGHTS);
    }

    #[test]
    fn custom_defaults_apply_only_without_priority() {
        let custom = ObjectiveWeights {
            cost: 0.2,
            risk: 0.2,
            sustainability: 0.6,
        };
        assert_eq!(
            ParameterDeriver::derive_with_defaults(Some(&UserPreferences::default()), custom)
                .weights,
            custom
        );

        let prefs = UserPreferences {
            prioritize_risk: true,
            ..Default::default()
        };
        assert_eq!(
            ParameterDeriver::derive_with_defaults(Some(&prefs), custom).weights,
            PRIORITY_CHAIN[1].1
        );
    }

    #[test]
    fn threshold_violation_respects_direction() {
        let thresholds = Thresholds {
            max_cost: 100.0,
            min_risk_reduction: 0.5,
            max_sustainability: 10.0,
        };

        assert!(thresholds.is_violated_by(Objective::Cost, 100.1));
        assert!(!thresholds.is_violated_by(Objective::Cost, 100.0));
        assert!(thresholds.is_violated_by(Objective::Risk, 0.49));
        assert!(!thresholds.is_violated_by(Objective::Risk, 0.5));
        assert!(thresholds.is_violated_by(Objective::Sustainability, 11.0));
    }

    #[test]
    fn unbounded_thresholds_serialize_as_null() {
        let json = serde_json::to_value(Thresholds::default()).unwrap();
        assert!(json["maxCost"].is_null());
        assert_eq!(json["minRiskReduction"], 0.0);
        assert!(json["maxSustainability"].is_null());
    }

    #[test]
    fn every_chain_entry_is_normalized() {
        assert!(DEFAULT_WEIGHTS.is_normalized());
        for (_, weights) in PRIORITY_CHAIN {
            assert!(weights.is_normalized());
        }
    }

    fn arb_preferences() -> impl Strategy<Value = Option<UserPreferences>> {
        proptest::option::of(
            (
                any::<bool>(),
                any::<bool>(),
                any::<bool>(),
                proptest::option::of(0.0f64..1e7),
                proptest::option::of(0.0f64..1.0),
                proptest::option::of(0.0f64..1e5),
            )
                .prop_map(|(c, r, s, max_cost, min_risk, max_sus)| UserPreferences {
                    prioritize_cost: c,
                    prioritize_risk: r,
                    prioritize_sustainability: s,
                    max_cost_impact: max_cost,
                    min_risk_reduction: min_risk,
                    max_sustainability_impact: max_sus,
                }),
        )
    }

    proptest! {
        #[test]
        fn derived_weights_always_sum_to_one(prefs in arb_preferences()) {
            let params = ParameterDeriver::derive(prefs.as_ref());
            prop_assert!((params.weights.sum() - 1.0).abs() <= WEIGHT_SUM_TOLERANCE);
            for objective in Objective::ALL {
                let w = params.weights.weight(objective);
                prop_assert!(w > 0.0 && w < 1.0);
            }
        }

        #[test]
        fn prioritize_cost_always_yields_half_quarter_quarter(
            risk in any::<bool>(),
            sustainability in any::<bool>(),
        ) {
            let prefs = UserPreferences {
                prioritize_cost: true,
                prioritize_risk: risk,
                prioritize_sustainability: sustainability,
                ..Default::default()
            };
            let weights = ParameterDeriver::derive(Some(&prefs)).weights;
            prop_assert_eq!(weights, PRIORITY_CHAIN[0].1);
        }
    }
}
