//! Negotiation command handlers.

mod negotiate_strategies;

pub use negotiate_strategies::{
    NegotiateError, NegotiateStrategiesCommand, NegotiateStrategiesHandler,
    NegotiateStrategiesResult,
};
