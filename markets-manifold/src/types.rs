//! Manifold API response types
//!
//! These types mirror the Manifold REST API (https://docs.manifold.markets/api)
//! and are converted to the canonical agent view for use downstream.

use chrono::{DateTime, Utc};
use markets_core::{outcome_at, outcome_index, Currency, Mana, MarketResult, Probability};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Liquidity pool of a binary market
///
/// The pool shape is fixed; outcome labels are its keys, in declaration
/// order, which is how Manifold orders them everywhere else.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ManifoldPool {
    #[serde(rename = "NO")]
    pub no: f64,
    #[serde(rename = "YES")]
    pub yes: f64,
}

impl ManifoldPool {
    /// Outcome labels derived from the pool keys
    pub fn outcomes(&self) -> Vec<String> {
        vec!["NO".to_string(), "YES".to_string()]
    }
}

/// A Manifold market from GET /v0/markets
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifoldMarket {
    /// Unique identifier
    pub id: String,

    /// Market question
    pub question: String,

    /// Creator's user id
    pub creator_id: String,

    /// When the market closes for trading
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub close_time: DateTime<Utc>,

    /// When the market was created
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_time: DateTime<Utc>,

    #[serde(default)]
    pub creator_avatar_url: Option<String>,
    pub creator_name: String,
    pub creator_username: String,

    /// Whether the market has been resolved
    pub is_resolved: bool,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_bet_time: DateTime<Utc>,

    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub last_comment_time: Option<DateTime<Utc>>,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_updated_time: DateTime<Utc>,

    /// Market maker mechanism (e.g. "cpmm-1")
    pub mechanism: String,

    /// Market kind (e.g. "BINARY")
    pub outcome_type: String,

    /// CPMM curvature parameter
    pub p: f64,

    /// Current liquidity pool
    pub pool: ManifoldPool,

    /// Current YES probability
    pub probability: Probability,

    pub slug: String,
    pub total_liquidity: Mana,
    pub unique_bettor_count: u32,
    pub url: String,
    pub volume: Mana,
    #[serde(rename = "volume24Hours")]
    pub volume_24_hours: Mana,
}

impl ManifoldMarket {
    /// Settlement currency for all Manifold markets
    pub const BET_AMOUNT_CURRENCY: Currency = Currency::Mana;

    /// Outcome labels derived from the pool shape
    pub fn outcomes(&self) -> Vec<String> {
        self.pool.outcomes()
    }

    /// Position of an outcome label in this market's outcome list
    pub fn outcome_index(&self, outcome: &str) -> MarketResult<usize> {
        outcome_index(&self.outcomes(), outcome)
    }

    /// Outcome label at a position in this market's outcome list
    pub fn outcome_at(&self, index: usize) -> MarketResult<String> {
        outcome_at(&self.outcomes(), index).map(str::to_string)
    }
}

/// Cached profit figures on a user record
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitCached {
    pub daily: Decimal,
    pub weekly: Decimal,
    pub monthly: Decimal,
    pub all_time: Decimal,
}

/// A Manifold user from GET /v0/user/{username}
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifoldUser {
    pub id: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_time: DateTime<Utc>,
    pub name: String,
    pub username: String,
    pub url: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub twitter_handle: Option<String>,
    #[serde(default)]
    pub discord_handle: Option<String>,
    #[serde(default)]
    pub is_bot: Option<bool>,
    #[serde(default)]
    pub is_admin: Option<bool>,
    #[serde(default)]
    pub is_trustworthy: Option<bool>,
    #[serde(default)]
    pub is_banned_from_posting: Option<bool>,
    #[serde(default)]
    pub user_deleted: Option<bool>,
    pub balance: Mana,
    pub total_deposits: Mana,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub last_bet_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub current_betting_streak: Option<u32>,
    pub profit_cached: ProfitCached,
}

/// Partial fill of a limit bet
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifoldBetFills {
    pub amount: Mana,
    #[serde(default)]
    pub matched_bet_id: Option<String>,
    pub shares: Decimal,
    pub timestamp: i64,
}

/// Fee breakdown attached to a bet
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifoldBetFees {
    pub platform_fee: Decimal,
    pub liquidity_fee: Decimal,
    pub creator_fee: Decimal,
}

/// A Manifold bet from GET /v0/bets
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifoldBet {
    pub id: String,
    pub user_id: String,
    pub contract_id: String,
    pub amount: Mana,
    pub shares: Decimal,
    pub prob_before: Probability,
    pub prob_after: Probability,
    #[serde(default)]
    pub is_filled: Option<bool>,
    #[serde(default)]
    pub is_cancelled: Option<bool>,
    pub fees: ManifoldBetFees,
    pub loan_amount: Mana,
    #[serde(default)]
    pub order_amount: Option<Mana>,
    #[serde(default)]
    pub fills: Option<Vec<ManifoldBetFills>>,
    pub created_time: i64,
    pub outcome: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use markets_core::MarketError;

    fn market_json() -> serde_json::Value {
        serde_json::json!({
            "id": "4QTb4cANeQzXNQS9lZnn",
            "question": "Will there be a debate in 2024?",
            "creatorId": "fSrex43BDjeneNZ4ZLfxllSb8b42",
            "closeTime": 1735689600000i64,
            "createdTime": 1708343480000i64,
            "creatorAvatarUrl": "https://example.com/avatar.png",
            "creatorName": "Trader",
            "creatorUsername": "trader",
            "isResolved": false,
            "lastBetTime": 1708350000000i64,
            "lastUpdatedTime": 1708350000000i64,
            "mechanism": "cpmm-1",
            "outcomeType": "BINARY",
            "p": 0.5,
            "pool": {"NO": 310.0, "YES": 290.0},
            "probability": 0.52,
            "slug": "will-there-be-a-debate-in-2024",
            "totalLiquidity": 600,
            "uniqueBettorCount": 14,
            "url": "https://manifold.markets/trader/will-there-be-a-debate-in-2024",
            "volume": 4231.5,
            "volume24Hours": "120.25"
        })
    }

    fn market() -> ManifoldMarket {
        serde_json::from_value(market_json()).unwrap()
    }

    #[test]
    fn deserializes_rest_market() {
        let market = market();
        assert_eq!(market.probability.get(), 0.52);
        assert_eq!(market.close_time.timestamp_millis(), 1_735_689_600_000);
        assert_eq!(market.volume_24_hours.get().to_string(), "120.25");
    }

    #[test]
    fn outcomes_come_from_pool_keys() {
        assert_eq!(market().outcomes(), vec!["NO", "YES"]);
    }

    #[test]
    fn outcome_lookup_round_trips() {
        let market = market();
        let label = market.outcome_at(0).unwrap();
        assert_eq!(market.outcome_index(&label).unwrap(), 0);
        assert!(matches!(
            market.outcome_at(2),
            Err(MarketError::OutcomeIndexOutOfRange { .. })
        ));
    }

    #[test]
    fn out_of_range_probability_is_rejected() {
        let mut json = market_json();
        json["probability"] = serde_json::json!(1.2);
        assert!(serde_json::from_value::<ManifoldMarket>(json).is_err());
    }

    #[test]
    fn deserializes_bet_with_fills_and_fees() {
        let bet: ManifoldBet = serde_json::from_value(serde_json::json!({
            "id": "dDkYrEPR8vZgkPYJpZr4",
            "userId": "fSrex43BDjeneNZ4ZLfxllSb8b42",
            "contractId": "4QTb4cANeQzXNQS9lZnn",
            "amount": 10,
            "shares": 19.2,
            "probBefore": 0.5,
            "probAfter": 0.52,
            "isFilled": true,
            "fees": {"platformFee": 0, "liquidityFee": 0, "creatorFee": "0.1"},
            "loanAmount": 0,
            "fills": [
                {"amount": 10, "matchedBetId": null, "shares": 19.2, "timestamp": 1708350000000i64}
            ],
            "createdTime": 1708350000000i64,
            "outcome": "YES"
        }))
        .unwrap();
        assert_eq!(bet.fills.as_ref().unwrap().len(), 1);
        assert_eq!(bet.fees.creator_fee.to_string(), "0.1");
    }
}
