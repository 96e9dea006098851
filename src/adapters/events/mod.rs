//! Event publisher adapters.
//!
//! Adapters implement the `EventPublisher` port for the decision audit trail:
//!
//! - `InMemoryEventBus` - In-process capture for tests
//! - `TracingEventPublisher` - Structured log records on the `audit` target
//! - `JsonLinesEventPublisher` - Append-only JSON-lines file

mod in_memory;
mod jsonl_file;
mod tracing_publisher;

pub use in_memory::InMemoryEventBus;
pub use jsonl_file::JsonLinesEventPublisher;
pub use tracing_publisher::{TracingEventPublisher, AUDIT_LOG_TARGET};
