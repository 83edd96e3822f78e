pub mod alert;
pub mod holding;
pub mod quote;
pub mod record;

pub use alert::{AlertDirection, NewAlert, PriceAlert};
pub use holding::{Holding, HoldingValuation, PortfolioSnapshot, TotalValue, MAX_AMOUNT};
pub use quote::{CachedQuote, CoinComparison, CurrencyPrices, PriceQuote, QuoteSource, TopCoin};
pub use record::{RecordStats, TransformedRecord, RECORD_SOURCE};
