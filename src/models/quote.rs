use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Where a quote came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteSource {
    Live,
    Cache,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyPrices {
    #[serde(with = "rust_decimal::serde::float_option")]
    pub usd: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub eur: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub pln: Option<Decimal>,
}

/// Single-coin quote, rebuilt on every live fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceQuote {
    pub coin: String,
    pub prices: CurrencyPrices,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub change_24h: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub market_cap_usd: Option<Decimal>,
    pub timestamp: DateTime<Utc>,
    pub source: QuoteSource,
}

/// Cache entry for a [`PriceQuote`]. Decimals keep their string form so a
/// cache hit returns exactly the values that were fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedQuote {
    pub coin: String,
    pub usd: Option<Decimal>,
    pub eur: Option<Decimal>,
    pub pln: Option<Decimal>,
    pub change_24h: Option<Decimal>,
    pub market_cap_usd: Option<Decimal>,
    pub timestamp: DateTime<Utc>,
}

impl From<&PriceQuote> for CachedQuote {
    fn from(quote: &PriceQuote) -> Self {
        Self {
            coin: quote.coin.clone(),
            usd: quote.prices.usd,
            eur: quote.prices.eur,
            pln: quote.prices.pln,
            change_24h: quote.change_24h,
            market_cap_usd: quote.market_cap_usd,
            timestamp: quote.timestamp,
        }
    }
}

impl CachedQuote {
    pub fn into_quote(self) -> PriceQuote {
        PriceQuote {
            coin: self.coin,
            prices: CurrencyPrices {
                usd: self.usd,
                eur: self.eur,
                pln: self.pln,
            },
            change_24h: self.change_24h,
            market_cap_usd: self.market_cap_usd,
            timestamp: self.timestamp,
            source: QuoteSource::Cache,
        }
    }
}

/// One row of the top-by-market-cap listing.
#[derive(Debug, Clone, Serialize)]
pub struct TopCoin {
    pub rank: Option<u32>,
    pub name: Option<String>,
    pub symbol: Option<String>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub price_usd: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float")]
    pub change_24h: Decimal,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub market_cap: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoinComparison {
    pub coin: String,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub price_usd: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub price_pln: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float")]
    pub change_24h: Decimal,
}
