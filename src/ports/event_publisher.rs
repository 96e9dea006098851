//! EventPublisher port - Interface for publishing domain events.
//!
//! The negotiation handler hands every decision audit record to this port.
//! Where the record ends up (the log stream, a JSON-lines file, a test bus) is
//! the adapter's business.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for publishing domain events.
///
/// Implementations must ensure:
/// - Events are appended, never rewritten
/// - Errors are returned to the caller rather than swallowed
///
/// # Example
///
/// ```ignore
/// let envelope = audit_record.to_envelope();
/// publisher.publish(envelope).await?;
/// ```
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a single event.
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;
}
