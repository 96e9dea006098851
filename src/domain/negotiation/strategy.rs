//! Negotiation inputs - candidate strategies, baseline impacts, and preferences.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three objectives every mitigation strategy is traded off on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Objective {
    Cost,
    Risk,
    Sustainability,
}

impl Objective {
    /// All objectives in canonical order.
    pub const ALL: [Objective; 3] = [Objective::Cost, Objective::Risk, Objective::Sustainability];

    /// Wire name of the objective.
    pub fn as_str(&self) -> &'static str {
        match self {
            Objective::Cost => "cost",
            Objective::Risk => "risk",
            Objective::Sustainability => "sustainability",
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A candidate mitigation strategy produced by the upstream simulation agents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MitigationStrategy {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Currency units; lower is better.
    pub cost_impact: f64,
    /// Fraction of risk removed; higher is better.
    pub risk_reduction: f64,
    /// kg CO2-equivalent; lower is better.
    pub sustainability_impact: f64,
}

impl MitigationStrategy {
    /// Creates a strategy without a description.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        cost_impact: f64,
        risk_reduction: f64,
        sustainability_impact: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            cost_impact,
            risk_reduction,
            sustainability_impact,
        }
    }

    /// Adds a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Raw value of the strategy on one objective.
    pub fn metric(&self, objective: Objective) -> f64 {
        match objective {
            Objective::Cost => self.cost_impact,
            Objective::Risk => self.risk_reduction,
            Objective::Sustainability => self.sustainability_impact,
        }
    }

    /// Returns the first objective whose raw value is NaN or infinite.
    pub fn first_non_finite(&self) -> Option<Objective> {
        Objective::ALL
            .into_iter()
            .find(|objective| !self.metric(*objective).is_finite())
    }
}

/// Baseline impact of the disruption being mitigated.
///
/// Carried for context and audit; the engine does not re-score it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImpactAnalysis {
    pub delivery_delay_days: f64,
    pub cost_impact: f64,
    pub inventory_impact: f64,
    pub sustainability_impact: f64,
}

/// Optional decision-maker preferences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPreferences {
    pub prioritize_cost: bool,
    pub prioritize_risk: bool,
    pub prioritize_sustainability: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_cost_impact: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_risk_reduction: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_sustainability_impact: Option<f64>,
}

impl UserPreferences {
    /// Whether the given objective's priority flag is set.
    pub fn prioritizes(&self, objective: Objective) -> bool {
        match objective {
            Objective::Cost => self.prioritize_cost,
            Objective::Risk => self.prioritize_risk,
            Objective::Sustainability => self.prioritize_sustainability,
        }
    }
}
