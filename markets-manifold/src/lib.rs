//! Manifold integration for prediction market normalization
//!
//! This crate mirrors the Manifold REST API's market, user, and bet
//! objects and provides a read-only client for them.

pub mod client;
pub mod types;

pub use client::{ManifoldClient, MANIFOLD_API_BASE};
pub use types::{
    ManifoldBet, ManifoldBetFees, ManifoldBetFills, ManifoldMarket, ManifoldPool, ManifoldUser,
    ProfitCached,
};
