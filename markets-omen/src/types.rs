//! Omen subgraph response types
//!
//! These types mirror the `fixedProductMarketMaker` objects returned by
//! the protofire/omen-xdai subgraph and are converted to the canonical
//! agent view for use downstream.

use chrono::{DateTime, Utc};
use markets_core::{
    outcome_at, outcome_index, ChecksumAddress, Currency, HexAddress, MarketError, MarketResult,
    OutcomeTokenAmount, Probability, Usd, Wei, Xdai,
};
use serde::{Deserialize, Serialize};

/// An Omen fixed-product market maker from the subgraph
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OmenMarket {
    /// Market id; doubles as the market maker contract address
    pub id: HexAddress,

    /// Market question
    pub title: String,

    /// Total volume in the collateral token's smallest unit
    pub collateral_volume: Wei,

    /// Total volume in USD
    pub usd_volume: Usd,

    /// Collateral token contract address
    pub collateral_token: HexAddress,

    /// Ordered outcome labels
    pub outcomes: Vec<String>,

    /// Outstanding outcome token amounts, positionally aligned with `outcomes`
    pub outcome_token_amounts: Vec<OutcomeTokenAmount>,

    /// Marginal prices per outcome; absent for markets with no liquidity
    #[serde(default)]
    pub outcome_token_marginal_prices: Option<Vec<Xdai>>,

    /// Market maker fee in wei
    #[serde(default)]
    pub fee: Option<Wei>,

    /// When the market was created
    #[serde(default, deserialize_with = "unix_ts::deserialize")]
    pub creation_timestamp: Option<DateTime<Utc>>,

    /// Category assigned at creation
    #[serde(default)]
    pub category: Option<String>,

    /// Conditional tokens condition backing this market
    #[serde(default)]
    pub condition: Option<OmenCondition>,

    /// When the reality.eth answer was finalized, if it was
    #[serde(default, deserialize_with = "unix_ts::deserialize")]
    pub answer_finalized_timestamp: Option<DateTime<Utc>>,

    /// When the market was resolved on-chain, if it was
    #[serde(default, deserialize_with = "unix_ts::deserialize")]
    pub resolution_timestamp: Option<DateTime<Utc>>,

    /// Raw reality.eth answer payload, if any
    #[serde(default)]
    pub current_answer: Option<String>,
}

/// Conditional tokens condition sub-record
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OmenCondition {
    pub id: String,
    pub outcome_slot_count: u32,
}

impl OmenMarket {
    /// Settlement currency for all Omen markets
    pub const BET_AMOUNT_CURRENCY: Currency = Currency::Xdai;

    /// The market maker contract address (same value as the id)
    pub fn market_maker_contract_address(&self) -> &HexAddress {
        &self.id
    }

    /// EIP-55 checksummed market maker contract address
    pub fn market_maker_contract_address_checksummed(&self) -> MarketResult<ChecksumAddress> {
        self.market_maker_contract_address().checksummed()
    }

    /// The collateral token contract address
    pub fn collateral_token_contract_address(&self) -> &HexAddress {
        &self.collateral_token
    }

    /// EIP-55 checksummed collateral token contract address
    pub fn collateral_token_contract_address_checksummed(&self) -> MarketResult<ChecksumAddress> {
        self.collateral_token_contract_address().checksummed()
    }

    /// Per-outcome probabilities derived from marginal prices
    ///
    /// `None` when the subgraph omitted marginal prices (no liquidity).
    pub fn outcome_token_probabilities(&self) -> MarketResult<Option<Vec<Probability>>> {
        let Some(prices) = &self.outcome_token_marginal_prices else {
            return Ok(None);
        };
        prices
            .iter()
            .map(|price| {
                let value = price.to_f64().ok_or_else(|| {
                    MarketError::validation(format!("marginal price {price} is not a finite number"))
                })?;
                Probability::new(value)
            })
            .collect::<MarketResult<Vec<_>>>()
            .map(Some)
    }

    /// Position of an outcome label in this market's outcome list
    pub fn outcome_index(&self, outcome: &str) -> MarketResult<usize> {
        outcome_index(&self.outcomes, outcome)
    }

    /// Outcome label at a position in this market's outcome list
    pub fn outcome_at(&self, index: usize) -> MarketResult<&str> {
        outcome_at(&self.outcomes, index)
    }

    /// Whether the market has been resolved on-chain
    pub fn is_resolved(&self) -> bool {
        self.resolution_timestamp.is_some()
    }
}

/// Subgraph timestamps arrive as unix-second strings or integers
mod unix_ts {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum SecondsOrString {
        Num(i64),
        Str(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(raw) = Option::<SecondsOrString>::deserialize(deserializer)? else {
            return Ok(None);
        };
        let seconds = match raw {
            SecondsOrString::Num(n) => n,
            SecondsOrString::Str(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|e| serde::de::Error::custom(format!("bad timestamp `{s}`: {e}")))?,
        };
        DateTime::<Utc>::from_timestamp(seconds, 0)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("timestamp {seconds} out of range")))
    }
}
