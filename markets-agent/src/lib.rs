//! Canonical agent-facing market view
//!
//! This crate ties the provider crates together: any validated provider
//! market converts into an [`AgentMarket`] via [`ToAgentMarket`], and the
//! original model stays reachable through the tagged
//! [`OriginalMarket`] variant.

pub mod market;

pub use market::{AgentMarket, OriginalMarket, ToAgentMarket};
