//! Omen subgraph client
//!
//! Queries the protofire/omen-xdai subgraph for fixed-product market
//! maker data. Only read access, no on-chain interaction.

use crate::types::OmenMarket;
use chrono::{DateTime, Utc};
use markets_core::{HexAddress, MarketError, MarketResult};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

/// Public deployment of the Omen trades subgraph
pub const OMEN_SUBGRAPH_URL: &str = "https://api.thegraph.com/subgraphs/name/protofire/omen-xdai";

/// Ordering options for market listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    ClosingSoonest,
    Newest,
}

impl SortBy {
    /// `orderBy` and `orderDirection` values for the subgraph query
    // TODO: order ClosingSoonest by openingTimestamp once listing carries it
    fn ordering(&self) -> (&'static str, &'static str) {
        match self {
            SortBy::ClosingSoonest => ("creationTimestamp", "desc"),
            SortBy::Newest => ("creationTimestamp", "desc"),
        }
    }
}

/// Market state filters for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterBy {
    /// Markets still accepting bets
    Open,
    /// Markets resolved on-chain
    Resolved,
    /// No state filter
    None,
}

const QUERY_GET_SINGLE_MARKET: &str = r#"
query getFixedProductMarketMaker($id: String!) {
    fixedProductMarketMaker(
        id: $id
    ) {
        id
        title
        collateralVolume
        usdVolume
        collateralToken
        outcomes
        outcomeTokenAmounts
        outcomeTokenMarginalPrices
        fee
        creationTimestamp
        category
        condition {
            id
            outcomeSlotCount
        }
        answerFinalizedTimestamp
        resolutionTimestamp
        currentAnswer
    }
}
"#;

/// Build the listing query for the given filter
///
/// The state filter works by deleting `where` lines from a template that
/// excludes everything, mirroring how the subgraph distinguishes open
/// (no finalized answer) from resolved (resolution timestamp set) markets.
fn build_list_markets_query(include_creator: bool, filter_by: FilterBy) -> String {
    let mut query = String::from(
        r#"
query getFixedProductMarketMakers(
    $first: Int!,
    $outcomes: [String!],
    $orderBy: String!,
    $orderDirection: String!,
    $creationTimestamp_gt: Int!,
    $creator: Bytes = null,
) {
    fixedProductMarketMakers(
        where: {
            isPendingArbitration: false,
            outcomes: $outcomes
            creationTimestamp_gt: $creationTimestamp_gt
            creator: $creator,
            answerFinalizedTimestamp: null
            resolutionTimestamp_not: null
        },
        orderBy: $orderBy,
        orderDirection: $orderDirection,
        first: $first
    ) {
        id
        title
        collateralVolume
        usdVolume
        collateralToken
        outcomes
        outcomeTokenAmounts
        outcomeTokenMarginalPrices
        fee
        creationTimestamp
        category
        condition {
            id
            outcomeSlotCount
        }
        answerFinalizedTimestamp
        resolutionTimestamp
        currentAnswer
    }
}
"#,
    );

    match filter_by {
        FilterBy::Open => query = query.replace("resolutionTimestamp_not: null", ""),
        FilterBy::Resolved => query = query.replace("answerFinalizedTimestamp: null", ""),
        FilterBy::None => {
            query = query.replace("answerFinalizedTimestamp: null", "");
            query = query.replace("resolutionTimestamp_not: null", "");
        }
    }

    if !include_creator {
        // "creator: null" in a where clause matches nothing, so the line
        // has to go entirely when not filtering by creator.
        query = query.replace("creator: $creator,", "");
    }

    query
}

#[derive(Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct GraphqlResponse<T> {
    #[serde(default)]
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SingleMarketData {
    fixed_product_market_maker: Option<OmenMarket>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MarketListData {
    fixed_product_market_makers: Vec<OmenMarket>,
}

/// Omen subgraph client
#[derive(Clone)]
pub struct OmenSubgraphClient {
    client: Client,
    url: String,
}

impl OmenSubgraphClient {
    /// Create a client against the public subgraph deployment
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            url: OMEN_SUBGRAPH_URL.to_string(),
        }
    }

    /// Create a client against a custom subgraph deployment
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::new()
        }
    }

    async fn post_query<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> MarketResult<T> {
        let response = self
            .client
            .post(&self.url)
            .json(&serde_json::json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(|e| MarketError::network(format!("subgraph request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MarketError::api(format!(
                "Omen subgraph error ({status}): {body}"
            )));
        }

        let body: GraphqlResponse<T> = response
            .json()
            .await
            .map_err(|e| MarketError::validation(format!("bad subgraph response: {e}")))?;

        if !body.errors.is_empty() {
            let messages: Vec<String> = body.errors.into_iter().map(|e| e.message).collect();
            return Err(MarketError::api(format!(
                "Omen subgraph query failed: {}",
                messages.join("; ")
            )));
        }

        body.data
            .ok_or_else(|| MarketError::api("Omen subgraph response carried no data"))
    }

    /// Fetch a single market by its id
    #[instrument(skip(self))]
    pub async fn get_market(&self, market_id: &str) -> MarketResult<Option<OmenMarket>> {
        debug!("Fetching Omen market {market_id}");
        let data: SingleMarketData = self
            .post_query(
                QUERY_GET_SINGLE_MARKET,
                serde_json::json!({ "id": market_id }),
            )
            .await?;
        Ok(data.fixed_product_market_maker)
    }

    /// List markets matching the given outcomes and filters
    #[instrument(skip(self, outcomes))]
    pub async fn list_markets(
        &self,
        first: u32,
        outcomes: &[String],
        sort_by: SortBy,
        filter_by: FilterBy,
        created_after: Option<DateTime<Utc>>,
        creator: Option<&HexAddress>,
    ) -> MarketResult<Vec<OmenMarket>> {
        let (order_by, order_direction) = sort_by.ordering();
        let query = build_list_markets_query(creator.is_some(), filter_by);
        let variables = serde_json::json!({
            "first": first,
            "outcomes": outcomes,
            "orderBy": order_by,
            "orderDirection": order_direction,
            "creationTimestamp_gt": created_after.map(|dt| dt.timestamp()).unwrap_or(0),
            "creator": creator.map(|c| c.as_str().to_lowercase()),
        });

        debug!("Listing Omen markets (first {first})");
        let data: MarketListData = self.post_query(&query, variables).await?;
        Ok(data.fixed_product_market_makers)
    }
}

impl Default for OmenSubgraphClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_filter_drops_resolution_clause() {
        let query = build_list_markets_query(false, FilterBy::Open);
        assert!(query.contains("answerFinalizedTimestamp: null"));
        assert!(!query.contains("resolutionTimestamp_not: null"));
        assert!(!query.contains("creator: $creator,"));
    }

    #[test]
    fn resolved_filter_drops_answer_clause() {
        let query = build_list_markets_query(true, FilterBy::Resolved);
        assert!(!query.contains("answerFinalizedTimestamp: null"));
        assert!(query.contains("resolutionTimestamp_not: null"));
        assert!(query.contains("creator: $creator,"));
    }

    #[test]
    fn no_filter_drops_both_clauses() {
        let query = build_list_markets_query(false, FilterBy::None);
        assert!(!query.contains("answerFinalizedTimestamp: null"));
        assert!(!query.contains("resolutionTimestamp_not: null"));
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn fetches_live_markets() {
        let client = OmenSubgraphClient::new();
        let markets = client
            .list_markets(
                2,
                &["Yes".to_string(), "No".to_string()],
                SortBy::Newest,
                FilterBy::Open,
                None,
                None,
            )
            .await
            .unwrap();
        assert!(markets.len() <= 2);
    }
}
