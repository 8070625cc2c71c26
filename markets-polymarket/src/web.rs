//! Polymarket website response types and resolution extraction
//!
//! The website embeds its page state as a JSON blob in a `__NEXT_DATA__`
//! script tag. That blob is the only public source of full resolution
//! detail, so this module mirrors its schema and walks it down to the one
//! market snapshot a page describes.
//!
//! The API-facing schema family lives in [`crate::types`]; the two
//! overlap but name fields differently and neither subsumes the other.

use chrono::{DateTime, NaiveDateTime, Utc};
use markets_core::{
    outcome_index, HexAddress, MarketError, MarketResult, Resolution, Usdc,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{construct_event_url, POLYMARKET_FALSE_OUTCOME, POLYMARKET_TRUE_OUTCOME};

/// Opening marker of the embedded page-state blob
pub const PAYLOAD_START_MARKER: &str =
    r#"<script id="__NEXT_DATA__" type="application/json" crossorigin="anonymous">"#;

/// Closing marker of the embedded page-state blob
pub const PAYLOAD_END_MARKER: &str = "</script>";

/// Locate the embedded JSON blob within a fetched HTML document
pub fn extract_embedded_payload(html: &str) -> MarketResult<&str> {
    let start = html
        .find(PAYLOAD_START_MARKER)
        .ok_or(MarketError::PayloadNotFound)?
        + PAYLOAD_START_MARKER.len();
    let end = html[start..]
        .find(PAYLOAD_END_MARKER)
        .map(|offset| start + offset)
        .ok_or(MarketError::PayloadNotFound)?;
    Ok(&html[start..end])
}

/// Parse and validate an extracted blob into the typed response tree
///
/// Syntax errors and schema violations are reported separately: the
/// former mean the page changed shape entirely, the latter that a known
/// blob carried unexpected content.
pub fn parse_web_response(payload: &str) -> MarketResult<PolymarketWebResponse> {
    let value: serde_json::Value = serde_json::from_str(payload)
        .map_err(|e| MarketError::malformed_payload(e.to_string()))?;
    serde_json::from_value(value).map_err(|e| MarketError::validation(e.to_string()))
}

/// Extract the unique full-market snapshot from a fetched HTML document
///
/// Returns `Ok(None)` when the page exists but forecasts nothing (the
/// website's "Oops... we didn't forecast this" case).
pub fn full_market_from_html(html: &str) -> MarketResult<Option<PolymarketFullMarket>> {
    let payload = extract_embedded_payload(html)?;
    let response = parse_web_response(payload)?;
    Ok(response.full_market()?.cloned())
}

/// Top-level `__NEXT_DATA__` document
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolymarketWebResponse {
    pub props: Props,
    pub page: String,
    pub build_id: String,
}

impl PolymarketWebResponse {
    /// The unique full-market snapshot in the dehydrated query list
    pub fn full_market(&self) -> MarketResult<Option<&PolymarketFullMarket>> {
        let snapshots: Vec<&PolymarketFullMarket> = self
            .props
            .page_props
            .dehydrated_state
            .queries
            .iter()
            .filter_map(|query| match &query.state.data {
                ResolutionPayload::FullMarket(market) => Some(market.as_ref()),
                _ => None,
            })
            .collect();

        match snapshots.len() {
            0 => Ok(None),
            1 => Ok(Some(snapshots[0])),
            count => Err(MarketError::AmbiguousPayload { count }),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Props {
    pub page_props: PageProps,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageProps {
    pub dehydrated_state: DehydratedState,
    #[serde(default)]
    pub eslug: Option<String>,
    #[serde(default)]
    pub mslug: Option<String>,
    #[serde(default)]
    pub is_single_market: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DehydratedState {
    #[serde(default)]
    pub mutations: Vec<serde_json::Value>,
    pub queries: Vec<DehydratedQuery>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DehydratedQuery {
    pub state: QueryState,
    pub query_key: serde_json::Value,
    pub query_hash: String,
}

/// State record of a single dehydrated react-query entry
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryState {
    pub data: ResolutionPayload,
    pub data_update_count: i64,
    pub data_updated_at: i64,
    pub error_update_count: i64,
    pub error_updated_at: i64,
    pub fetch_failure_count: i64,
    pub is_invalidated: bool,
    pub status: String,
    pub fetch_status: String,
}

/// What a query's `data` field may hold
///
/// Resolved by attempting each variant in fixed priority order: full
/// market snapshot first, then price quote, then the null `Absent` case
/// the website emits for pages it never forecast.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ResolutionPayload {
    FullMarket(Box<PolymarketFullMarket>),
    PriceQuote(PriceQuote),
    Absent,
}

impl ResolutionPayload {
    pub fn is_full_market(&self) -> bool {
        matches!(self, ResolutionPayload::FullMarket(_))
    }
}

impl<'de> Deserialize<'de> for ResolutionPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        if value.is_null() {
            return Ok(ResolutionPayload::Absent);
        }
        if let Ok(market) = serde_json::from_value::<PolymarketFullMarket>(value.clone()) {
            return Ok(ResolutionPayload::FullMarket(Box::new(market)));
        }
        if let Ok(quote) = serde_json::from_value::<PriceQuote>(value) {
            return Ok(ResolutionPayload::PriceQuote(quote));
        }
        Err(serde::de::Error::custom(
            "query data matches none of: full market snapshot, price quote, absent",
        ))
    }
}

/// A best-price quote the website dehydrates alongside market snapshots
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PriceQuote {
    pub price: Usdc,
    pub side: QuoteSide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QuoteSide {
    Buy,
    Sell,
}

/// An event-level snapshot of a market as the website renders it
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolymarketFullMarket {
    pub id: String,
    #[serde(default)]
    pub ticker: Option<String>,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub resolution_source: Option<String>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    pub active: bool,
    pub closed: bool,
    pub archived: bool,
    #[serde(default, rename = "new")]
    pub is_new: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub restricted: bool,
    pub liquidity: Usdc,
    #[serde(default)]
    pub volume: Option<Usdc>,
    #[serde(default)]
    pub volume_24hr: Option<Usdc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub enable_order_book: Option<bool>,
    #[serde(default)]
    pub liquidity_amm: Option<f64>,
    #[serde(default)]
    pub liquidity_clob: Option<f64>,
    pub markets: Vec<WebMarket>,
}

impl PolymarketFullMarket {
    /// Canonical URL of this market's event page
    pub fn url(&self) -> String {
        construct_event_url(&self.slug)
    }

    /// Whether this event wraps exactly one binary question
    ///
    /// Some events bundle several independent yes/no markets; resolution
    /// inference over outcome prices is only meaningful for the
    /// single-question case.
    pub fn is_main_market(&self) -> bool {
        self.markets.len() == 1
    }

    /// The single market of a main-market event
    pub fn main_market(&self) -> MarketResult<&WebMarket> {
        if !self.is_main_market() {
            return Err(MarketError::validation(format!(
                "event {} ({}) bundles {} markets, expected exactly one",
                self.id,
                self.title,
                self.markets.len()
            )));
        }
        Ok(&self.markets[0])
    }

    /// Resolution of the main market, `None` while it is still open
    pub fn resolution(&self) -> MarketResult<Option<Resolution>> {
        self.main_market()?.resolution()
    }
}

/// A market-level snapshot within an event
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebMarket {
    pub id: String,
    pub question: String,
    pub condition_id: String,
    pub slug: String,
    #[serde(default)]
    pub resolution_source: Option<String>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub liquidity: Option<Usdc>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    pub outcomes: Vec<String>,
    pub outcome_prices: Vec<Usdc>,
    #[serde(default)]
    pub volume: Option<Usdc>,
    pub active: bool,
    pub closed: bool,
    #[serde(default)]
    pub archived: bool,
    pub market_maker_address: HexAddress,
    /// Close time; the website appends a bare "+00" offset
    #[serde(default, deserialize_with = "de_closed_time")]
    pub closed_time: Option<DateTime<Utc>>,
    #[serde(default, rename = "new")]
    pub is_new: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub restricted: bool,
    #[serde(default)]
    pub group_item_title: Option<String>,
    #[serde(default, rename = "questionID")]
    pub question_id: Option<String>,
    #[serde(default)]
    pub clob_token_ids: Option<serde_json::Value>,
    #[serde(default)]
    pub events: Vec<WebEventRef>,
    #[serde(default)]
    pub markets: Vec<WebSubMarket>,
    #[serde(default)]
    pub resolution_data: Option<ResolutionData>,
}

impl WebMarket {
    /// Infer the final resolution from terminal outcome prices
    ///
    /// Open markets have no resolution yet, so `Ok(None)`. A closed
    /// binary market settles with the winning outcome priced at exactly 1
    /// and the losing one at 0; anything else is rejected rather than
    /// coerced into an answer.
    pub fn resolution(&self) -> MarketResult<Option<Resolution>> {
        if !self.closed {
            return Ok(None);
        }

        let yes_price = self.outcome_price(POLYMARKET_TRUE_OUTCOME)?;
        let no_price = self.outcome_price(POLYMARKET_FALSE_OUTCOME)?;

        if yes_price.get() == Decimal::ONE && no_price.get() == Decimal::ZERO {
            Ok(Some(Resolution::Yes))
        } else if yes_price.get() == Decimal::ZERO && no_price.get() == Decimal::ONE {
            Ok(Some(Resolution::No))
        } else {
            Err(MarketError::UnresolvableOutcome {
                outcomes: self.outcomes.clone(),
                prices: self
                    .outcome_prices
                    .iter()
                    .map(|price| price.to_string())
                    .collect(),
            })
        }
    }

    /// Price of the outcome with the given label
    pub fn outcome_price(&self, outcome: &str) -> MarketResult<Usdc> {
        let index = outcome_index(&self.outcomes, outcome)?;
        self.outcome_prices.get(index).copied().ok_or_else(|| {
            MarketError::validation(format!(
                "no price at index {index} for outcome `{outcome}`"
            ))
        })
    }
}

/// Resolution oracle record attached to a settled web market
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionData {
    pub id: String,
    #[serde(default)]
    pub author: Option<String>,
    pub status: String,
    pub was_disputed: bool,
    pub price: String,
    #[serde(default)]
    pub proposed_price: Option<String>,
    #[serde(default)]
    pub reproposed_price: Option<String>,
    #[serde(default)]
    pub updates: Option<String>,
    #[serde(default)]
    pub transaction_hash: Option<String>,
    #[serde(default)]
    pub log_index: Option<String>,
}

/// Event reference carried on a web market
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebEventRef {
    pub slug: String,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
}

/// Sibling market stub nested within a web market
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebSubMarket {
    pub slug: String,
    pub question: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub volume: Option<Usdc>,
    pub outcomes: Vec<String>,
    pub outcome_prices: Vec<Usdc>,
    pub active: bool,
    pub archived: bool,
    pub closed: bool,
    #[serde(default)]
    pub order_price_min_tick_size: Option<f64>,
    #[serde(default)]
    pub clob_token_ids: Option<serde_json::Value>,
    #[serde(default)]
    pub events: Vec<WebEventRef>,
}

/// The website emits close times like `2020-11-04 10:02:52+00`
fn de_closed_time<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let trimmed = raw.trim_end_matches("+00");
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Ok(Some(naive.and_utc()));
    }
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| Some(dt.with_timezone(&Utc)))
        .map_err(|e| serde::de::Error::custom(format!("bad closedTime `{raw}`: {e}")))
}
