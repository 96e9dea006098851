//! Adapters - Implementations of ports for specific technologies.
//!
//! - `events` - Decision audit sinks (`EventPublisher` implementations)
//! - `http` - Axum REST endpoints

pub mod events;
pub mod http;
