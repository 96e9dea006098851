//! NegotiateStrategiesHandler - Command handler for running a negotiation.
//!
//! Validates the request contract, runs the engine inline, and hands the
//! decision audit record to the publisher without waiting for it.

use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::domain::foundation::{
    CorrelationId, DomainError, ErrorCode, ScenarioId, SerializableDomainEvent, Timestamp,
    UserId, ValidationError,
};
use crate::domain::negotiation::{
    AuditContext, ImpactAnalysis, MitigationStrategy, NegotiationEngine, NegotiationError,
    NegotiationResult, RationaleComposer, UserPreferences,
};
use crate::ports::EventPublisher;

/// Command to negotiate a balanced set of mitigation strategies.
///
/// Fields mirror the request contract; presence is checked by the handler.
#[derive(Debug, Clone, Default)]
pub struct NegotiateStrategiesCommand {
    pub scenario_id: Option<String>,
    pub impacts: Option<ImpactAnalysis>,
    pub strategies: Option<Vec<MitigationStrategy>>,
    pub user_preferences: Option<UserPreferences>,
    pub user_id: Option<String>,
    pub correlation_id: Option<String>,
}

/// Result of a successful negotiation.
#[derive(Debug, Clone)]
pub struct NegotiateStrategiesResult {
    pub result: NegotiationResult,
    pub correlation_id: CorrelationId,
    pub execution_time_ms: u64,
}

/// Errors from the negotiate command.
#[derive(Debug, Error)]
pub enum NegotiateError {
    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),

    #[error("Negotiation failed: {source}")]
    Engine {
        correlation_id: CorrelationId,
        #[source]
        source: NegotiationError,
    },
}

impl From<NegotiateError> for DomainError {
    fn from(err: NegotiateError) -> Self {
        match err {
            NegotiateError::Validation(e) => e.into(),
            NegotiateError::Engine {
                correlation_id,
                source,
            } => {
                let code = match source {
                    NegotiationError::NoCandidates => ErrorCode::NoCandidates,
                };
                DomainError::new(code, source.to_string())
                    .with_detail("correlation_id", correlation_id.as_str())
            }
        }
    }
}

struct ValidatedRequest {
    scenario_id: ScenarioId,
    user_id: UserId,
    strategies: Vec<MitigationStrategy>,
    user_preferences: Option<UserPreferences>,
}

fn validate(cmd: NegotiateStrategiesCommand) -> Result<ValidatedRequest, ValidationError> {
    let scenario_id = ScenarioId::new(
        cmd.scenario_id
            .ok_or_else(|| ValidationError::missing_field("scenario_id"))?,
    )?;
    let user_id = UserId::new(
        cmd.user_id
            .ok_or_else(|| ValidationError::missing_field("user_id"))?,
    )?;

    // Baseline impacts are context only, but the contract requires them.
    if cmd.impacts.is_none() {
        return Err(ValidationError::missing_field("impacts"));
    }

    let strategies = cmd
        .strategies
        .ok_or_else(|| ValidationError::missing_field("strategies"))?;
    if strategies.is_empty() {
        return Err(ValidationError::empty_field("strategies"));
    }
    for (index, strategy) in strategies.iter().enumerate() {
        if let Some(objective) = strategy.first_non_finite() {
            return Err(ValidationError::non_finite(format!(
                "strategies[{}].{}",
                index, objective
            )));
        }
    }

    Ok(ValidatedRequest {
        scenario_id,
        user_id,
        strategies,
        user_preferences: cmd.user_preferences,
    })
}

/// Handler for negotiation requests.
pub struct NegotiateStrategiesHandler {
    engine: NegotiationEngine,
    event_publisher: Arc<dyn EventPublisher>,
}

impl NegotiateStrategiesHandler {
    pub fn new(engine: NegotiationEngine, event_publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            engine,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: NegotiateStrategiesCommand,
    ) -> Result<NegotiateStrategiesResult, NegotiateError> {
        let correlation_id = CorrelationId::or_generate(cmd.correlation_id.as_deref());

        // 1. Validate the contract; nothing is computed on failure
        let request = validate(cmd).map_err(|e| {
            debug!(correlation_id = %correlation_id, error = %e, "Rejected negotiation request");
            e
        })?;

        // 2. Run the engine inline
        let started = Instant::now();
        let result = self
            .engine
            .negotiate(&request.strategies, request.user_preferences.as_ref())
            .map_err(|source| {
                error!(
                    correlation_id = %correlation_id,
                    scenario_id = %request.scenario_id,
                    error = %source,
                    "Negotiation engine failed"
                );
                NegotiateError::Engine {
                    correlation_id: correlation_id.clone(),
                    source,
                }
            })?;
        let execution_time_ms = started.elapsed().as_millis() as u64;

        info!(
            correlation_id = %correlation_id,
            scenario_id = %request.scenario_id,
            candidates = request.strategies.len(),
            selected = result.balanced_strategies.len(),
            requires_user_input = result.requires_user_input(),
            execution_time_ms,
            "Negotiation completed"
        );

        // 3. Dispatch the audit record, fire-and-forget
        let context = AuditContext {
            scenario_id: request.scenario_id,
            user_id: request.user_id,
            correlation_id: correlation_id.clone(),
        };
        self.dispatch_audit(&context, &result);

        Ok(NegotiateStrategiesResult {
            result,
            correlation_id,
            execution_time_ms,
        })
    }

    fn dispatch_audit(&self, context: &AuditContext, result: &NegotiationResult) {
        let record = RationaleComposer::compose_audit_record(context, result, Timestamp::now());
        let envelope = record
            .to_envelope()
            .with_correlation_id(context.correlation_id.as_str())
            .with_user_id(context.user_id.as_str());

        let publisher = Arc::clone(&self.event_publisher);
        let correlation_id = context.correlation_id.clone();
        tokio::spawn(async move {
            if let Err(e) = publisher.publish(envelope).await {
                warn!(
                    correlation_id = %correlation_id,
                    error = %e,
                    "Failed to publish decision audit record"
                );
            }
        });
    }
}
