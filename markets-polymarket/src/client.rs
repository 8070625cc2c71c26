//! Polymarket clients
//!
//! Two data paths: the Gamma REST API for market listings, and the
//! website itself for full resolution detail, which only appears in the
//! page's embedded `__NEXT_DATA__` blob.

use crate::types::{PolymarketMarket, GAMMA_API_BASE};
use crate::web::{full_market_from_html, PolymarketFullMarket};
use markets_core::{MarketError, MarketResult};
use reqwest::header::USER_AGENT;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Pages render differently for bots; fetch as a desktop browser would
const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

/// Polymarket API and website client
#[derive(Clone)]
pub struct PolymarketClient {
    client: Client,
    gamma_url: String,
}

impl PolymarketClient {
    /// Create a client against the public endpoints
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            gamma_url: GAMMA_API_BASE.to_string(),
        }
    }

    /// Create a client against a custom Gamma API base URL
    pub fn with_gamma_url(gamma_url: impl Into<String>) -> Self {
        Self {
            gamma_url: gamma_url.into(),
            ..Self::new()
        }
    }

    /// List markets from the Gamma API, highest volume first
    #[instrument(skip(self))]
    pub async fn list_markets(
        &self,
        limit: u32,
        active_only: bool,
    ) -> MarketResult<Vec<PolymarketMarket>> {
        let mut url = format!("{}/markets?limit={limit}", self.gamma_url);
        if active_only {
            url.push_str("&active=true&closed=false");
        }
        url.push_str("&order=volume&ascending=false");

        debug!("Fetching Polymarket markets from: {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| MarketError::network(format!("failed to fetch markets: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MarketError::api(format!(
                "Polymarket API error ({status}): {body}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| MarketError::validation(format!("bad markets response: {e}")))
    }

    /// Get a single market by ID from the Gamma API
    #[instrument(skip(self))]
    pub async fn get_market(&self, id: &str) -> MarketResult<Option<PolymarketMarket>> {
        let url = format!("{}/markets?id={id}", self.gamma_url);
        debug!("Fetching Polymarket market {id}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| MarketError::network(format!("failed to fetch market: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MarketError::api(format!(
                "Polymarket API error ({status}): {body}"
            )));
        }

        let markets: Vec<PolymarketMarket> = response
            .json()
            .await
            .map_err(|e| MarketError::validation(format!("bad market response: {e}")))?;

        Ok(markets.into_iter().next())
    }

    /// Fetch an event page and extract its full market snapshot
    ///
    /// Returns `Ok(None)` when the page exists but has no forecastable
    /// market. This hits the website rather than the API, so it is slow;
    /// use only when resolution detail is needed.
    #[instrument(skip(self))]
    pub async fn fetch_full_market(
        &self,
        url: &str,
    ) -> MarketResult<Option<PolymarketFullMarket>> {
        debug!("Fetching Polymarket page: {url}");

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, DESKTOP_USER_AGENT)
            .send()
            .await
            .map_err(|e| MarketError::network(format!("failed to fetch page: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(MarketError::api(format!(
                "Polymarket website error ({status}) for {url}"
            )));
        }

        let html = response
            .text()
            .await
            .map_err(|e| MarketError::network(format!("failed to read page body: {e}")))?;

        let market = full_market_from_html(&html)?;
        if market.is_none() {
            warn!("No Polymarket market found at {url}");
        }
        Ok(market)
    }
}

impl Default for PolymarketClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::construct_event_url;

    #[tokio::test]
    #[ignore] // Requires network access
    async fn lists_live_markets() {
        let client = PolymarketClient::new();
        let markets = client.list_markets(2, true).await.unwrap();
        assert!(markets.len() <= 2);
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn scrapes_a_live_event_page() {
        let client = PolymarketClient::new();
        let url = construct_event_url("will-donald-trump-win-the-2024-us-presidential-election");
        let market = client.fetch_full_market(&url).await.unwrap();
        assert!(market.is_some());
    }
}
