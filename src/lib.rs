//! Supply Chain Negotiator - Multi-objective mitigation strategy negotiation
//!
//! This crate reconciles candidate supply-chain mitigation strategies across
//! cost, risk reduction and sustainability, recommends a balanced shortlist,
//! and escalates to a human when no consensus exists.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
