//! Omen integration for prediction market normalization
//!
//! This crate mirrors the Omen subgraph's fixed-product market maker
//! schema and provides a read-only client for it.

pub mod client;
pub mod types;

pub use client::{FilterBy, OmenSubgraphClient, SortBy, OMEN_SUBGRAPH_URL};
pub use types::{OmenCondition, OmenMarket};
