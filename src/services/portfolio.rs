use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::coingecko::{SimplePrice, SimplePriceResponse};
use crate::errors::AppError;
use crate::models::{Holding, HoldingValuation, PortfolioSnapshot, TotalValue};
use crate::services::prices::PriceService;
use crate::services::validation::{optional_positive_decimal, required_coin, required_positive_decimal};
use crate::store::PortfolioStore;

const VALUATION_CURRENCIES: &[&str] = &["usd", "pln"];

/// Validated `POST /api/portfolio/add` body.
#[derive(Debug, Clone, PartialEq)]
pub struct AddHolding {
    pub coin: String,
    pub amount: Decimal,
    pub buy_price: Option<Decimal>,
}

impl AddHolding {
    pub fn from_json(body: &Map<String, Value>) -> Result<Self, AppError> {
        if !body.contains_key("coin") || !body.contains_key("amount") {
            return Err(AppError::BadRequest("Required: coin, amount".into()));
        }

        Ok(Self {
            coin: required_coin(body)?,
            amount: required_positive_decimal(body, "amount")?,
            buy_price: optional_positive_decimal(body, "buy_price")?,
        })
    }
}

pub async fn add_holding(
    store: &dyn PortfolioStore,
    req: AddHolding,
) -> Result<Holding, AppError> {
    let holding = store.add(&req.coin, req.amount, req.buy_price).await?;
    tracing::info!(
        coin = %holding.coin,
        added = %req.amount,
        total = %holding.amount,
        backend = store.backend(),
        "Holding updated"
    );
    Ok(holding)
}

/// Load holdings and value them against live prices. Pricing failures
/// degrade to the raw holdings rather than an error.
pub async fn snapshot(
    store: &dyn PortfolioStore,
    prices: &PriceService,
) -> Result<PortfolioSnapshot, AppError> {
    let holdings = store.list().await?;

    if holdings.is_empty() {
        return Ok(PortfolioSnapshot::Empty {
            message: "Portfolio is empty".into(),
            hint: "POST /api/portfolio/add with {coin, amount}".into(),
        });
    }

    let coin_ids: Vec<String> = holdings.iter().map(|h| h.coin.clone()).collect();

    let spot = match prices.spot_prices(&coin_ids, VALUATION_CURRENCIES).await {
        Ok(spot) => spot,
        Err(e) => {
            tracing::warn!(error = %e, "Portfolio pricing unavailable, returning raw holdings");
            return Ok(unpriced(holdings, "Live prices unavailable", e.to_string()));
        }
    };

    match value_holdings(&holdings, &spot) {
        Ok(valued) => Ok(valued),
        Err(e) => {
            tracing::warn!(error = %e, "Portfolio valuation failed, returning raw holdings");
            Ok(unpriced(holdings, "Portfolio value out of range", e.to_string()))
        }
    }
}

fn unpriced(holdings: Vec<Holding>, warning: &str, details: String) -> PortfolioSnapshot {
    PortfolioSnapshot::Unpriced {
        holdings,
        warning: warning.into(),
        details,
        timestamp: Utc::now(),
    }
}

#[derive(Debug, Error)]
pub enum ValuationError {
    #[error("value of '{0}' overflows")]
    Overflow(String),
}

/// Multiply each holding by its spot price. Coins without a price are
/// valued at zero.
pub fn value_holdings(
    holdings: &[Holding],
    spot: &SimplePriceResponse,
) -> Result<PortfolioSnapshot, ValuationError> {
    let empty = SimplePrice::default();
    let mut total_usd = Decimal::ZERO;
    let mut total_pln = Decimal::ZERO;
    let mut valued = Vec::with_capacity(holdings.len());

    for h in holdings {
        let price = spot.get(&h.coin).unwrap_or(&empty);
        let overflow = || ValuationError::Overflow(h.coin.clone());

        let value_usd = h
            .amount
            .checked_mul(price.usd.unwrap_or(Decimal::ZERO))
            .ok_or_else(overflow)?;
        let value_pln = h
            .amount
            .checked_mul(price.pln.unwrap_or(Decimal::ZERO))
            .ok_or_else(overflow)?;
        total_usd = total_usd.checked_add(value_usd).ok_or_else(overflow)?;
        total_pln = total_pln.checked_add(value_pln).ok_or_else(overflow)?;

        valued.push(HoldingValuation {
            coin: h.coin.clone(),
            amount: h.amount,
            buy_price: h.buy_price,
            current_price_usd: price.usd,
            value_usd: value_usd.round_dp(2),
            value_pln: value_pln.round_dp(2),
        });
    }

    Ok(PortfolioSnapshot::Valued {
        holdings: valued,
        total_value: TotalValue {
            usd: total_usd.round_dp(2),
            pln: total_pln.round_dp(2),
        },
        timestamp: Utc::now(),
    })
}
