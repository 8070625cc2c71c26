//! Polymarket integration for prediction market normalization
//!
//! Two sibling schema families are mirrored here because neither source
//! is complete on its own: [`types`] follows the public Gamma API, and
//! [`web`] follows the website's embedded page state, which is the only
//! place full resolution detail appears.

pub mod client;
pub mod types;
pub mod web;

pub use client::PolymarketClient;
pub use types::{
    construct_event_url, PolymarketMarket, GAMMA_API_BASE, POLYMARKET_BASE_URL,
    POLYMARKET_FALSE_OUTCOME, POLYMARKET_TRUE_OUTCOME,
};
pub use web::{
    extract_embedded_payload, full_market_from_html, parse_web_response, PolymarketFullMarket,
    PolymarketWebResponse, PriceQuote, ResolutionPayload, WebMarket,
};
