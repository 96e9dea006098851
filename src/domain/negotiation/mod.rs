//! Negotiation Module - Multi-objective reconciliation of mitigation strategies.
//!
//! Candidate strategies are scored on cost, risk reduction and sustainability,
//! ranked, and narrowed to a balanced shortlist. When no consensus exists the
//! result carries an escalation for a human decision-maker.
//!
//! # Components
//!
//! - `ParameterDeriver` - Preferences to weights and thresholds
//! - `StrategyEvaluator` - Min-max normalization and composite scoring
//! - `ConflictDetector` - Threshold violations and ambiguous trade-offs
//! - `StrategySelector` - Stable ranking and top-three shortlist
//! - `VisualizationGenerator` - Pairwise trade-off charts
//! - `RationaleComposer` - Explanation text and audit record
//! - `NegotiationEngine` - Runs the pipeline end to end
//!
//! # Design Philosophy
//!
//! Everything here is pure and stateless. The only side effect of a
//! negotiation, the audit record, is returned as a domain event for the
//! caller to publish.

mod conflict;
mod engine;
mod evaluator;
mod events;
mod parameters;
mod rationale;
mod selector;
mod strategy;
mod visualization;

// Re-export all public types
pub use conflict::{
    Conflict, ConflictDetector, ConflictEscalation, ConflictReason, AMBIGUITY_SAMPLE_SIZE,
    AMBIGUITY_VARIANCE_THRESHOLD,
};
pub use engine::{NegotiationEngine, NegotiationError, NegotiationResult, NegotiationTuning};
pub use evaluator::{EvaluatedStrategy, StrategyEvaluator, NEUTRAL_SCORE};
pub use events::{DecisionAuditRecord, StrategySnapshot};
pub use parameters::{
    NegotiationParameters, ObjectiveWeights, ParameterDeriver, Thresholds, DEFAULT_WEIGHTS,
    PRIORITY_CHAIN, WEIGHT_SUM_TOLERANCE,
};
pub use rationale::{AuditContext, RationaleComposer};
pub use selector::{StrategySelector, MAX_BALANCED_STRATEGIES};
pub use strategy::{ImpactAnalysis, MitigationStrategy, Objective, UserPreferences};
pub use visualization::{
    OptimalRegion, TradeoffKind, TradeoffPoint, TradeoffVisualization, VisualizationGenerator,
};
