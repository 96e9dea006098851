//! Visualization Generator - Pairwise trade-off datasets for the shortlist.

use serde::{Deserialize, Serialize};

use super::{MitigationStrategy, Objective, Thresholds};
use crate::domain::foundation::bounds::optional_upper_bound;

/// Which pair of objectives a chart plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeoffKind {
    CostVsRisk,
    CostVsSustainability,
    RiskVsSustainability,
}

impl TradeoffKind {
    /// All charts, in the order they are emitted.
    pub const ALL: [TradeoffKind; 3] = [
        TradeoffKind::CostVsRisk,
        TradeoffKind::CostVsSustainability,
        TradeoffKind::RiskVsSustainability,
    ];

    /// (x, y) objectives plotted.
    pub fn axes(&self) -> (Objective, Objective) {
        match self {
            TradeoffKind::CostVsRisk => (Objective::Cost, Objective::Risk),
            TradeoffKind::CostVsSustainability => (Objective::Cost, Objective::Sustainability),
            TradeoffKind::RiskVsSustainability => (Objective::Risk, Objective::Sustainability),
        }
    }
}

fn axis_label(objective: Objective) -> &'static str {
    match objective {
        Objective::Cost => "Cost Impact",
        Objective::Risk => "Risk Reduction",
        Objective::Sustainability => "Sustainability Impact (kg CO2e)",
    }
}

/// One strategy plotted on a trade-off chart, using raw values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeoffPoint {
    pub x: f64,
    pub y: f64,
    pub strategy_id: String,
    pub strategy_name: String,
}

/// Target zone on a chart, bounded by whichever thresholds apply to its axes.
///
/// An absent side does not apply to this chart; an upper side serialized as
/// `null` is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimalRegion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_min: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "optional_upper_bound"
    )]
    pub x_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_min: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "optional_upper_bound"
    )]
    pub y_max: Option<f64>,
}

impl OptimalRegion {
    fn for_axes(x: Objective, y: Objective, thresholds: &Thresholds) -> Self {
        let mut region = OptimalRegion::default();
        for (objective, is_x) in [(x, true), (y, false)] {
            let limit = Some(thresholds.limit(objective));
            match (objective, is_x) {
                (Objective::Risk, true) => region.x_min = limit,
                (Objective::Risk, false) => region.y_min = limit,
                (_, true) => region.x_max = limit,
                (_, false) => region.y_max = limit,
            }
        }
        region
    }
}

/// A two-axis trade-off chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeoffVisualization {
    #[serde(rename = "type")]
    pub kind: TradeoffKind,
    pub x_axis: String,
    pub y_axis: String,
    pub data_points: Vec<TradeoffPoint>,
    pub optimal_region: OptimalRegion,
}

/// Builds the trade-off charts.
pub struct VisualizationGenerator;

impl VisualizationGenerator {
    /// Builds exactly one chart per [`TradeoffKind`] from the selected strategies only.
    pub fn generate(
        selected: &[MitigationStrategy],
        thresholds: &Thresholds,
    ) -> Vec<TradeoffVisualization> {
        TradeoffKind::ALL
            .iter()
            .map(|kind| {
                let (x, y) = kind.axes();
                TradeoffVisualization {
                    kind: *kind,
                    x_axis: axis_label(x).to_string(),
                    y_axis: axis_label(y).to_string(),
                    data_points: selected
                        .iter()
                        .map(|s| TradeoffPoint {
                            x: s.metric(x),
                            y: s.metric(y),
                            strategy_id: s.id.clone(),
                            strategy_name: s.name.clone(),
                        })
                        .collect(),
                    optimal_region: OptimalRegion::for_axes(x, y, thresholds),
                }
            })
            .collect()
    }
}
