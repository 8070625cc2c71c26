//! Manifold API client
//!
//! Read-only access to the Manifold REST API for market, user, and bet
//! data. No authentication is required for these endpoints.

use crate::types::{ManifoldBet, ManifoldMarket, ManifoldUser};
use markets_core::{MarketError, MarketResult};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};

/// Base URL for the Manifold REST API
pub const MANIFOLD_API_BASE: &str = "https://api.manifold.markets/v0";

/// Manifold API client
#[derive(Clone)]
pub struct ManifoldClient {
    client: Client,
    base_url: String,
}

impl ManifoldClient {
    /// Create a client against the public API
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: MANIFOLD_API_BASE.to_string(),
        }
    }

    /// Create a client against a custom base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::new()
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> MarketResult<Option<T>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| MarketError::network(format!("request to {url} failed: {e}")))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MarketError::api(format!(
                "Manifold API error ({status}): {body}"
            )));
        }

        let parsed = response
            .json()
            .await
            .map_err(|e| MarketError::validation(format!("bad Manifold response: {e}")))?;
        Ok(Some(parsed))
    }

    /// Fetch a single market by its id
    #[instrument(skip(self))]
    pub async fn get_market(&self, market_id: &str) -> MarketResult<Option<ManifoldMarket>> {
        let url = format!("{}/market/{market_id}", self.base_url);
        debug!("Fetching Manifold market {market_id}");
        self.get_json(&url).await
    }

    /// List markets, newest first
    #[instrument(skip(self))]
    pub async fn list_markets(&self, limit: u32) -> MarketResult<Vec<ManifoldMarket>> {
        let url = format!("{}/markets?limit={limit}", self.base_url);
        debug!("Listing Manifold markets (limit {limit})");
        self.get_json(&url)
            .await?
            .ok_or_else(|| MarketError::api("Manifold market listing returned 404"))
    }

    /// Fetch a user by username
    #[instrument(skip(self))]
    pub async fn get_user(&self, username: &str) -> MarketResult<Option<ManifoldUser>> {
        let url = format!("{}/user/{username}", self.base_url);
        debug!("Fetching Manifold user {username}");
        self.get_json(&url).await
    }

    /// List a user's bets, most recent first
    #[instrument(skip(self))]
    pub async fn get_bets(&self, user_id: &str, limit: u32) -> MarketResult<Vec<ManifoldBet>> {
        let url = format!("{}/bets?userId={user_id}&limit={limit}", self.base_url);
        debug!("Fetching Manifold bets for user {user_id}");
        self.get_json(&url)
            .await?
            .ok_or_else(|| MarketError::api("Manifold bet listing returned 404"))
    }
}

impl Default for ManifoldClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires network access
    async fn lists_live_markets() {
        let client = ManifoldClient::new();
        let markets = client.list_markets(3).await.unwrap();
        assert!(markets.len() <= 3);
    }
}
