//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod negotiation;

pub use negotiation::{
    NegotiateError, NegotiateStrategiesCommand, NegotiateStrategiesHandler,
    NegotiateStrategiesResult,
};
