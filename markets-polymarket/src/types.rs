//! Polymarket Gamma API response types
//!
//! These types mirror the public REST API. The website exposes a second,
//! overlapping schema with full resolution detail; that family lives in
//! [`crate::web`].

use chrono::{DateTime, Utc};
use markets_core::{outcome_at, outcome_index, Currency, MarketResult, Probability, Usdc};
use serde::{Deserialize, Deserializer, Serialize};

/// Base URL of the Polymarket website
pub const POLYMARKET_BASE_URL: &str = "https://polymarket.com";

/// Base URL for the Polymarket Gamma API
pub const GAMMA_API_BASE: &str = "https://gamma-api.polymarket.com";

/// Outcome label Polymarket uses for the positive side of a binary market
pub const POLYMARKET_TRUE_OUTCOME: &str = "Yes";

/// Outcome label Polymarket uses for the negative side of a binary market
pub const POLYMARKET_FALSE_OUTCOME: &str = "No";

/// Canonical URL of an event page
///
/// Only valid for single-question (main) markets, not for sub-markets of
/// a grouped event.
pub fn construct_event_url(slug: &str) -> String {
    format!("{POLYMARKET_BASE_URL}/event/{slug}")
}

/// A Polymarket market from the Gamma API
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolymarketMarket {
    /// Unique identifier
    pub id: String,

    /// Market question
    pub question: String,

    /// URL slug
    #[serde(default)]
    pub slug: Option<String>,

    /// Condition ID (used for CLOB)
    #[serde(default)]
    pub condition_id: Option<String>,

    /// End date
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,

    /// Category
    #[serde(default)]
    pub category: Option<String>,

    /// Total liquidity
    #[serde(default)]
    pub liquidity: Option<Usdc>,

    /// Total volume
    #[serde(default)]
    pub volume: Option<Usdc>,

    /// Numeric volume (some responses carry this instead)
    #[serde(default)]
    pub volume_num: Option<Usdc>,

    /// Numeric liquidity
    #[serde(default)]
    pub liquidity_num: Option<Usdc>,

    /// Ordered outcome labels; the API double-encodes these as a JSON string
    #[serde(deserialize_with = "de_outcomes")]
    pub outcomes: Vec<String>,

    /// Outcome prices, positionally aligned with `outcomes`
    #[serde(default, deserialize_with = "de_price_list")]
    pub outcome_prices: Vec<Usdc>,

    /// Whether the market is active
    #[serde(default)]
    pub active: Option<bool>,

    /// Whether the market is closed
    #[serde(default)]
    pub closed: Option<bool>,

    /// Description
    #[serde(default)]
    pub description: Option<String>,

    /// CLOB token IDs, double-encoded like `outcomes`
    #[serde(default, deserialize_with = "de_string_list")]
    pub clob_token_ids: Vec<String>,
}

impl PolymarketMarket {
    /// Settlement currency for all Polymarket markets
    pub const BET_AMOUNT_CURRENCY: Currency = Currency::Usdc;

    /// Whether the market has stopped trading
    pub fn is_closed(&self) -> bool {
        self.closed.unwrap_or(false) || !self.active.unwrap_or(true)
    }

    /// Canonical event page URL, when the API included a slug
    pub fn event_url(&self) -> Option<String> {
        self.slug.as_deref().map(construct_event_url)
    }

    /// Total volume, preferring the numeric field when both are present
    pub fn total_volume(&self) -> Option<Usdc> {
        self.volume_num.or(self.volume)
    }

    /// Per-outcome probabilities derived from outcome prices
    pub fn outcome_probabilities(&self) -> MarketResult<Vec<Probability>> {
        self.outcome_prices
            .iter()
            .map(|price| {
                let value = price.to_f64().ok_or_else(|| {
                    markets_core::MarketError::validation(format!(
                        "outcome price {price} is not a finite number"
                    ))
                })?;
                Probability::new(value)
            })
            .collect()
    }

    /// Position of an outcome label in this market's outcome list
    pub fn outcome_index(&self, outcome: &str) -> MarketResult<usize> {
        outcome_index(&self.outcomes, outcome)
    }

    /// Outcome label at a position in this market's outcome list
    pub fn outcome_at(&self, index: usize) -> MarketResult<&str> {
        outcome_at(&self.outcomes, index)
    }
}

/// Decode a list the API double-encoded as a JSON string
///
/// Older responses occasionally carry a plain array, so both shapes are
/// accepted.
fn de_string_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<String>),
        Encoded(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::List(list) => Ok(list),
        Raw::Encoded(s) => serde_json::from_str(&s)
            .map_err(|e| serde::de::Error::custom(format!("bad encoded list `{s}`: {e}"))),
    }
}

fn de_outcomes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let outcomes = de_string_list(deserializer)?;
    if outcomes.len() < 2 {
        return Err(serde::de::Error::custom(format!(
            "market must have at least two outcomes, got {outcomes:?}"
        )));
    }
    Ok(outcomes)
}

fn de_price_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Usdc>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<Usdc>),
        Encoded(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::List(list) => Ok(list),
        Raw::Encoded(s) => serde_json::from_str(&s)
            .map_err(|e| serde::de::Error::custom(format!("bad encoded prices `{s}`: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn market_json() -> serde_json::Value {
        serde_json::json!({
            "id": "512329",
            "question": "Will the Chiefs win the Super Bowl?",
            "slug": "will-the-chiefs-win-the-super-bowl",
            "conditionId": "0xc0ffee",
            "endDate": "2025-02-09T23:00:00Z",
            "liquidity": "112934.12",
            "volume": "20149227.53",
            "outcomes": "[\"Yes\", \"No\"]",
            "outcomePrices": "[\"0.0115\", \"0.9885\"]",
            "active": true,
            "closed": false,
            "clobTokenIds": "[\"1343\", \"1344\"]"
        })
    }

    fn market() -> PolymarketMarket {
        serde_json::from_value(market_json()).unwrap()
    }

    #[test]
    fn decodes_double_encoded_lists() {
        let market = market();
        assert_eq!(market.outcomes, vec!["Yes", "No"]);
        assert_eq!(market.outcome_prices[0].get(), Decimal::new(115, 4));
        assert_eq!(market.clob_token_ids, vec!["1343", "1344"]);
    }

    #[test]
    fn accepts_plain_arrays_too() {
        let mut json = market_json();
        json["outcomes"] = serde_json::json!(["Yes", "No"]);
        json["outcomePrices"] = serde_json::json!([0.5, 0.5]);
        let market: PolymarketMarket = serde_json::from_value(json).unwrap();
        assert_eq!(market.outcomes.len(), 2);
        assert_eq!(market.outcome_prices.len(), 2);
    }

    #[test]
    fn rejects_single_outcome_markets() {
        let mut json = market_json();
        json["outcomes"] = serde_json::json!("[\"Yes\"]");
        assert!(serde_json::from_value::<PolymarketMarket>(json).is_err());
    }

    #[test]
    fn derives_probabilities_from_prices() {
        let probabilities = market().outcome_probabilities().unwrap();
        assert!((probabilities[0].get() - 0.0115).abs() < 1e-9);
        assert!((probabilities[1].get() - 0.9885).abs() < 1e-9);
    }

    #[test]
    fn constructs_event_url_from_slug() {
        assert_eq!(
            market().event_url().unwrap(),
            "https://polymarket.com/event/will-the-chiefs-win-the-super-bowl"
        );
    }

    #[test]
    fn outcome_lookup_round_trips() {
        let market = market();
        let label = market.outcome_at(0).unwrap();
        assert_eq!(market.outcome_index(label).unwrap(), 0);
    }
}
