use std::time::Duration;

use reqwest::Client;
use thiserror::Error;

use super::types::{MarketCoin, SimplePriceResponse};

pub const COINGECKO_API_BASE: &str = "https://api.coingecko.com/api/v3";

#[derive(Debug, Error)]
pub enum CoinGeckoError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Unexpected(String),
}

/// Extra fields requested from `/simple/price`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimplePriceOptions {
    pub include_24hr_change: bool,
    pub include_market_cap: bool,
}

#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl CoinGeckoClient {
    /// Build a client whose every request is bounded by `timeout`.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, CoinGeckoError> {
        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let req = self.http.get(url).header("accept", "application/json");
        match &self.api_key {
            Some(key) => req.header("x-cg-demo-api-key", key),
            None => req,
        }
    }

    /// Spot prices for one or more coin ids in a single request.
    pub async fn simple_price(
        &self,
        ids: &[String],
        vs_currencies: &[&str],
        opts: SimplePriceOptions,
    ) -> Result<SimplePriceResponse, CoinGeckoError> {
        if ids.is_empty() {
            return Err(CoinGeckoError::Unexpected("no coin ids requested".into()));
        }

        let ids = ids.join(",");
        let vs = vs_currencies.join(",");
        let mut query = vec![("ids", ids.as_str()), ("vs_currencies", vs.as_str())];
        if opts.include_24hr_change {
            query.push(("include_24hr_change", "true"));
        }
        if opts.include_market_cap {
            query.push(("include_market_cap", "true"));
        }

        let resp = self
            .get("/simple/price")
            .query(&query)
            .send()
            .await?
            .error_for_status()?;

        let prices: SimplePriceResponse = resp.json().await?;
        tracing::debug!(ids = %ids, returned = prices.len(), "CoinGecko simple/price");
        Ok(prices)
    }

    /// Top coins by market cap, one page.
    pub async fn coins_markets(
        &self,
        vs_currency: &str,
        per_page: u32,
        page: u32,
    ) -> Result<Vec<MarketCoin>, CoinGeckoError> {
        let per_page = per_page.to_string();
        let page = page.to_string();
        let resp = self
            .get("/coins/markets")
            .query(&[
                ("vs_currency", vs_currency),
                ("order", "market_cap_desc"),
                ("per_page", per_page.as_str()),
                ("page", page.as_str()),
                ("sparkline", "false"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let coins: Vec<MarketCoin> = resp.json().await?;
        tracing::debug!(returned = coins.len(), "CoinGecko coins/markets");
        Ok(coins)
    }
}
