//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, event plumbing, and error types
//! that form the vocabulary of the negotiation domain.

pub mod bounds;
mod errors;
mod events;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent};
pub use ids::{CorrelationId, ScenarioId, UserId};
pub use timestamp::Timestamp;
