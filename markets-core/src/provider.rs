//! Provider definitions for prediction markets

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported prediction market providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Omen - fixed-product market maker on Gnosis Chain
    Omen,
    /// Manifold - play-money prediction market
    Manifold,
    /// Polymarket - USDC-settled prediction market
    Polymarket,
}

impl Provider {
    /// Get a short identifier for the provider (for display)
    pub fn short_name(&self) -> &'static str {
        match self {
            Provider::Omen => "O",
            Provider::Manifold => "M",
            Provider::Polymarket => "P",
        }
    }

    /// Get the full display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::Omen => "Omen",
            Provider::Manifold => "Manifold",
            Provider::Polymarket => "Polymarket",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "omen" | "o" => Ok(Provider::Omen),
            "manifold" | "m" => Ok(Provider::Manifold),
            "polymarket" | "poly" | "p" => Ok(Provider::Polymarket),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}
