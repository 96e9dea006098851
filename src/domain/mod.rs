//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, errors, events, timestamps)
//! - `negotiation` - Strategy scoring, conflict detection and selection

pub mod foundation;
pub mod negotiation;
