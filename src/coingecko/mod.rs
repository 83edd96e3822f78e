pub mod client;
pub mod symbols;
pub mod types;

pub use client::{CoinGeckoClient, CoinGeckoError, SimplePriceOptions, COINGECKO_API_BASE};
pub use symbols::{parse_coin_list, resolve_coin_id};
pub use types::{MarketCoin, SimplePrice, SimplePriceResponse};
