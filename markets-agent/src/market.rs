//! Canonical agent-facing market view
//!
//! Downstream agents work against [`AgentMarket`] regardless of where a
//! market came from. The source model rides along as a tagged variant so
//! provider-specific capabilities (contract addresses, pool shares, CLOB
//! token ids) stay reachable without widening the canonical surface.

use markets_core::{outcome_at, outcome_index, Currency, MarketResult, Provider};
use markets_manifold::ManifoldMarket;
use markets_omen::OmenMarket;
use markets_polymarket::PolymarketMarket;
use serde::Serialize;

/// The provider model an [`AgentMarket`] was derived from
#[derive(Debug, Clone, Serialize)]
pub enum OriginalMarket {
    Omen(OmenMarket),
    Manifold(ManifoldMarket),
    Polymarket(PolymarketMarket),
}

impl OriginalMarket {
    /// Which provider this market came from
    pub fn provider(&self) -> Provider {
        match self {
            OriginalMarket::Omen(_) => Provider::Omen,
            OriginalMarket::Manifold(_) => Provider::Manifold,
            OriginalMarket::Polymarket(_) => Provider::Polymarket,
        }
    }
}

/// Common market view that can be created from provider-specific markets
///
/// Contains everything an agent needs to make a prediction. Created on
/// demand from a validated provider model and read-only afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct AgentMarket {
    /// Provider-local identifier
    pub id: String,

    /// Market question
    pub question: String,

    /// Ordered outcome labels, positionally aligned with provider pricing
    pub outcomes: Vec<String>,

    /// The provider's native settlement currency
    pub bet_amount_currency: Currency,

    /// The exact provider model this view was derived from
    pub original_market: OriginalMarket,
}

impl AgentMarket {
    /// Which provider this market came from
    pub fn provider(&self) -> Provider {
        self.original_market.provider()
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

/// Conversion from a validated provider model into the canonical view
///
/// Total for every provider: validation already happened when the model
/// was constructed, so the copy of shared fields cannot fail.
pub trait ToAgentMarket {
    fn to_agent_market(&self) -> AgentMarket;
}

impl ToAgentMarket for OmenMarket {
    fn to_agent_market(&self) -> AgentMarket {
        AgentMarket {
            id: self.id.as_str().to_string(),
            question: self.title.clone(),
            outcomes: self.outcomes.clone(),
            bet_amount_currency: OmenMarket::BET_AMOUNT_CURRENCY,
            original_market: OriginalMarket::Omen(self.clone()),
        }
    }
}

impl ToAgentMarket for ManifoldMarket {
    fn to_agent_market(&self) -> AgentMarket {
        AgentMarket {
            id: self.id.clone(),
            question: self.question.clone(),
            outcomes: self.outcomes(),
            bet_amount_currency: ManifoldMarket::BET_AMOUNT_CURRENCY,
            original_market: OriginalMarket::Manifold(self.clone()),
        }
    }
}

impl ToAgentMarket for PolymarketMarket {
    fn to_agent_market(&self) -> AgentMarket {
        AgentMarket {
            id: self.id.clone(),
            question: self.question.clone(),
            outcomes: self.outcomes.clone(),
            bet_amount_currency: PolymarketMarket::BET_AMOUNT_CURRENCY,
            original_market: OriginalMarket::Polymarket(self.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use markets_core::MarketError;

    fn omen_market() -> OmenMarket {
        serde_json::from_value(serde_json::json!({
            "id": "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed",
            "title": "Will GNO reach $1000 by the end of the year?",
            "collateralVolume": "2340000000000000000",
            "usdVolume": "2.34",
            "collateralToken": "0xfb6916095ca1df60bb79ce92ce3ea74c37c5d359",
            "outcomes": ["Yes", "No"],
            "outcomeTokenAmounts": ["769231", "1000000"],
            "outcomeTokenMarginalPrices": ["0.565", "0.435"],
            "fee": "20000000000000000"
        }))
        .unwrap()
    }

    fn manifold_market() -> ManifoldMarket {
        serde_json::from_value(serde_json::json!({
            "id": "4QTb4cANeQzXNQS9lZnn",
            "question": "Will there be a debate in 2024?",
            "creatorId": "fSrex43BDjeneNZ4ZLfxllSb8b42",
            "closeTime": 1735689600000i64,
            "createdTime": 1708343480000i64,
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
            "volume24Hours": 120.25
        }))
        .unwrap()
    }

    fn polymarket_market() -> PolymarketMarket {
        serde_json::from_value(serde_json::json!({
            "id": "512329",
            "question": "Will the Chiefs win the Super Bowl?",
            "slug": "will-the-chiefs-win-the-super-bowl",
            "outcomes": "[\"Yes\", \"No\"]",
            "outcomePrices": "[\"0.0115\", \"0.9885\"]",
            "active": true,
            "closed": false
        }))
        .unwrap()
    }

    #[test]
    fn omen_adapter_is_lossless_on_shared_fields() {
        let market = omen_market();
        let agent_market = market.to_agent_market();
        assert_eq!(agent_market.id, market.id.as_str());
        assert_eq!(agent_market.question, market.title);
        assert_eq!(agent_market.outcomes, market.outcomes);
        assert_eq!(agent_market.bet_amount_currency, Currency::Xdai);
        assert_eq!(agent_market.provider(), Provider::Omen);
    }

    #[test]
    fn manifold_adapter_is_lossless_on_shared_fields() {
        let market = manifold_market();
        let agent_market = market.to_agent_market();
        assert_eq!(agent_market.id, market.id);
        assert_eq!(agent_market.question, market.question);
        assert_eq!(agent_market.outcomes, market.outcomes());
        assert_eq!(agent_market.bet_amount_currency, Currency::Mana);
        assert_eq!(agent_market.provider(), Provider::Manifold);
    }

    #[test]
    fn polymarket_adapter_is_lossless_on_shared_fields() {
        let market = polymarket_market();
        let agent_market = market.to_agent_market();
        assert_eq!(agent_market.id, market.id);
        assert_eq!(agent_market.question, market.question);
        assert_eq!(agent_market.outcomes, market.outcomes);
        assert_eq!(agent_market.bet_amount_currency, Currency::Usdc);
        assert_eq!(agent_market.provider(), Provider::Polymarket);
    }

    #[test]
    fn original_market_keeps_provider_capabilities_reachable() {
        let agent_market = omen_market().to_agent_market();
        let OriginalMarket::Omen(original) = &agent_market.original_market else {
            panic!("expected an Omen original market");
        };
        assert!(original.market_maker_contract_address_checksummed().is_ok());
    }

    #[test]
    fn outcome_lookup_round_trips_through_agent_market() {
        let agent_market = manifold_market().to_agent_market();
        for i in 0..agent_market.outcomes.len() {
            let label = agent_market.outcome_at(i).unwrap().to_string();
            assert_eq!(agent_market.outcome_index(&label).unwrap(), i);
        }
        assert!(matches!(
            agent_market.outcome_index("Maybe"),
            Err(MarketError::OutcomeNotFound { .. })
        ));
        assert!(matches!(
            agent_market.outcome_at(2),
            Err(MarketError::OutcomeIndexOutOfRange { .. })
        ));
    }
}
