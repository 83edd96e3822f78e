use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// Exclusive upper bound for stored amounts and prices. `NUMERIC(28,10)`
/// leaves 18 integer digits.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA764_0000, 0x0DE0_B6B3, 0, false, 0);

/// Database row for portfolio_holdings table. One row per coin.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Holding {
    pub coin: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub buy_price: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

/// A holding priced against live spot prices.
#[derive(Debug, Clone, Serialize)]
pub struct HoldingValuation {
    pub coin: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub buy_price: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub current_price_usd: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float")]
    pub value_usd: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub value_pln: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct TotalValue {
    #[serde(with = "rust_decimal::serde::float")]
    pub usd: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub pln: Decimal,
}

/// Response shape of `GET /api/portfolio`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PortfolioSnapshot {
    Empty {
        message: String,
        hint: String,
    },
    Valued {
        holdings: Vec<HoldingValuation>,
        total_value: TotalValue,
        timestamp: DateTime<Utc>,
    },
    /// Pricing failed; holdings are returned as stored.
    Unpriced {
        holdings: Vec<Holding>,
        warning: String,
        details: String,
        timestamp: DateTime<Utc>,
    },
}
