//! Core types for prediction market normalization
//!
//! This crate defines the value wrappers, address types, outcome lookup
//! helpers, and error taxonomy shared by the per-provider crates.

pub mod address;
pub mod error;
pub mod outcome;
pub mod provider;
pub mod resolution;
pub mod values;

pub use address::{ChecksumAddress, HexAddress};
pub use error::{MarketError, MarketResult};
pub use outcome::{outcome_at, outcome_index};
pub use provider::Provider;
pub use resolution::Resolution;
pub use values::{
    BetAmount, Currency, Mana, OutcomeTokenAmount, Probability, Usd, Usdc, Wei, Xdai,
};
