use std::sync::Arc;

use chrono::Utc;
use metrics::counter;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::cache::{quote_key, QuoteCache};
use crate::coingecko::{
    CoinGeckoClient, CoinGeckoError, MarketCoin, SimplePriceOptions, SimplePriceResponse,
};
use crate::models::{
    CachedQuote, CoinComparison, CurrencyPrices, PriceQuote, QuoteSource, TopCoin,
};

const QUOTE_CURRENCIES: &[&str] = &["usd", "eur", "pln"];
const COMPARE_CURRENCIES: &[&str] = &["usd", "pln"];
const TOP_N: u32 = 10;

#[derive(Debug, Error)]
pub enum PriceError {
    #[error("coin '{0}' not found")]
    CoinNotFound(String),

    #[error(transparent)]
    Upstream(#[from] CoinGeckoError),
}

/// Price lookups against CoinGecko, with an optional cache in front of
/// single-coin quotes.
#[derive(Clone)]
pub struct PriceService {
    client: CoinGeckoClient,
    cache: Option<Arc<dyn QuoteCache>>,
}

impl PriceService {
    pub fn new(client: CoinGeckoClient, cache: Option<Arc<dyn QuoteCache>>) -> Self {
        Self { client, cache }
    }

    pub fn cache(&self) -> Option<&Arc<dyn QuoteCache>> {
        self.cache.as_ref()
    }

    /// Quote for one coin id. Served from cache when a fresh entry exists.
    pub async fn quote(&self, coin: &str) -> Result<PriceQuote, PriceError> {
        let coin = coin.trim().to_lowercase();
        let key = quote_key(&coin);

        if let Some(cached) = self.read_cached(&key).await {
            return Ok(cached);
        }

        let ids = [coin.clone()];
        let prices = self
            .fetch(&ids, QUOTE_CURRENCIES, SimplePriceOptions {
                include_24hr_change: true,
                include_market_cap: true,
            })
            .await?;

        let entry = prices
            .get(&coin)
            .ok_or_else(|| PriceError::CoinNotFound(coin.clone()))?;

        let quote = PriceQuote {
            coin: coin.clone(),
            prices: CurrencyPrices {
                usd: entry.usd,
                eur: entry.eur,
                pln: entry.pln,
            },
            change_24h: entry.usd_24h_change,
            market_cap_usd: entry.usd_market_cap,
            timestamp: Utc::now(),
            source: QuoteSource::Live,
        };

        self.write_cached(&key, &quote).await;
        Ok(quote)
    }

    /// Top coins by market cap.
    pub async fn top_coins(&self) -> Result<Vec<TopCoin>, PriceError> {
        counter!("upstream_requests_total", "endpoint" => "coins/markets").increment(1);
        let coins = self
            .client
            .coins_markets("usd", TOP_N, 1)
            .await
            .inspect_err(|_| {
                counter!("upstream_failures_total", "endpoint" => "coins/markets").increment(1);
            })?;

        Ok(coins.into_iter().map(to_top_coin).collect())
    }

    /// Batched comparison of already-resolved coin ids. Coins the upstream
    /// does not know are skipped.
    pub async fn compare(&self, coin_ids: &[String]) -> Result<Vec<CoinComparison>, PriceError> {
        if coin_ids.is_empty() {
            return Ok(Vec::new());
        }

        let prices = self
            .fetch(coin_ids, COMPARE_CURRENCIES, SimplePriceOptions {
                include_24hr_change: true,
                include_market_cap: false,
            })
            .await?;

        Ok(coin_ids
            .iter()
            .filter_map(|id| {
                prices.get(id).map(|p| CoinComparison {
                    coin: id.clone(),
                    price_usd: p.usd,
                    price_pln: p.pln,
                    change_24h: p.usd_24h_change.unwrap_or(Decimal::ZERO).round_dp(2),
                })
            })
            .collect())
    }

    /// Spot prices for many coins in one upstream call.
    pub async fn spot_prices(
        &self,
        coin_ids: &[String],
        currencies: &[&str],
    ) -> Result<SimplePriceResponse, PriceError> {
        self.fetch(coin_ids, currencies, SimplePriceOptions::default()).await
    }

    async fn fetch(
        &self,
        coin_ids: &[String],
        currencies: &[&str],
        opts: SimplePriceOptions,
    ) -> Result<SimplePriceResponse, PriceError> {
        counter!("upstream_requests_total", "endpoint" => "simple/price").increment(1);
        match self.client.simple_price(coin_ids, currencies, opts).await {
            Ok(prices) => Ok(prices),
            Err(e) => {
                counter!("upstream_failures_total", "endpoint" => "simple/price").increment(1);
                tracing::warn!(error = %e, coins = ?coin_ids, "Price fetch failed");
                Err(e.into())
            }
        }
    }

    /// Cache read; any failure counts as a miss.
    async fn read_cached(&self, key: &str) -> Option<PriceQuote> {
        let cache = self.cache.as_ref()?;

        let raw = match cache.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                counter!("quote_cache_misses_total").increment(1);
                return None;
            }
            Err(e) => {
                tracing::warn!(error = %e, key, "Cache read failed, fetching directly");
                counter!("quote_cache_errors_total").increment(1);
                return None;
            }
        };

        match serde_json::from_str::<CachedQuote>(&raw) {
            Ok(cached) => {
                counter!("quote_cache_hits_total").increment(1);
                tracing::debug!(key, "Quote cache hit");
                Some(cached.into_quote())
            }
            Err(e) => {
                tracing::warn!(error = %e, key, "Discarding unreadable cache entry");
                counter!("quote_cache_errors_total").increment(1);
                None
            }
        }
    }

    /// Cache write; failures are logged and dropped.
    async fn write_cached(&self, key: &str, quote: &PriceQuote) {
        let Some(cache) = &self.cache else {
            return;
        };

        let raw = match serde_json::to_string(&CachedQuote::from(quote)) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, key, "Failed to serialize quote for cache");
                return;
            }
        };

        if let Err(e) = cache.set(key, &raw).await {
            tracing::warn!(error = %e, key, "Cache write failed");
            counter!("quote_cache_errors_total").increment(1);
        }
    }
}

fn to_top_coin(coin: MarketCoin) -> TopCoin {
    TopCoin {
        rank: coin.market_cap_rank,
        name: coin.name,
        symbol: coin.symbol.map(|s| s.to_uppercase()),
        price_usd: coin.current_price,
        change_24h: coin
            .price_change_percentage_24h
            .unwrap_or(Decimal::ZERO)
            .round_dp(2),
        market_cap: coin.market_cap,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use std::time::Duration;

    use crate::cache::MemoryCache;

    #[tokio::test]
    async fn test_cache_hit_returns_exact_fetched_values() {
        let cache: Arc<dyn QuoteCache> = Arc::new(MemoryCache::new(Duration::from_secs(60)));
        // Unreachable upstream: the quote can only come from the cache.
        let client =
            CoinGeckoClient::new("http://127.0.0.1:1", None, Duration::from_secs(1)).unwrap();
        let service = PriceService::new(client, Some(cache));

        let live = PriceQuote {
            coin: "shiba-inu".into(),
            prices: CurrencyPrices {
                usd: Some(Decimal::from_str("0.000012345678901234567").unwrap()),
                eur: Some(Decimal::from_str("0.0000113").unwrap()),
                pln: None,
            },
            change_24h: Some(Decimal::from_str("-3.14159265358979").unwrap()),
            market_cap_usd: Some(Decimal::from(7_270_000_000i64)),
            timestamp: Utc::now(),
            source: QuoteSource::Live,
        };
        service.write_cached(&quote_key("shiba-inu"), &live).await;

        let cached = service.quote("shiba-inu").await.unwrap();
        assert_eq!(cached.source, QuoteSource::Cache);
        assert_eq!(cached.prices, live.prices);
        assert_eq!(cached.change_24h, live.change_24h);
        assert_eq!(cached.market_cap_usd, live.market_cap_usd);
    }

    #[test]
    fn test_top_coin_uppercases_symbol_and_rounds_change() {
        let coin = MarketCoin {
            id: Some("bitcoin".into()),
            symbol: Some("btc".into()),
            name: Some("Bitcoin".into()),
            market_cap_rank: Some(1),
            current_price: Some(Decimal::from(67_000)),
            price_change_percentage_24h: Some(Decimal::new(-123456, 5)), // -1.23456
            market_cap: None,
        };

        let top = to_top_coin(coin);
        assert_eq!(top.symbol.as_deref(), Some("BTC"));
        assert_eq!(top.change_24h, Decimal::new(-123, 2));
        assert_eq!(top.rank, Some(1));
    }

    #[test]
    fn test_top_coin_defaults_missing_change_to_zero() {
        let coin = MarketCoin {
            id: None,
            symbol: None,
            name: None,
            market_cap_rank: None,
            current_price: None,
            price_change_percentage_24h: None,
            market_cap: None,
        };

        assert_eq!(to_top_coin(coin).change_24h, Decimal::ZERO);
    }
}
