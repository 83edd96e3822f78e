use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::coingecko::parse_coin_list;
use crate::errors::AppError;
use crate::models::{CoinComparison, PriceQuote, TopCoin};
use crate::AppState;

const DEFAULT_COMPARE_COINS: &str = "bitcoin,ethereum";

#[derive(Serialize)]
pub struct TopCoinsResponse {
    pub top_10: Vec<TopCoin>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct ComparisonResponse {
    pub comparison: Vec<CoinComparison>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct CompareQuery {
    pub coins: Option<String>,
}

/// GET /api/crypto/{coin}: single-coin quote
pub async fn quote(
    State(state): State<AppState>,
    Path(coin): Path<String>,
) -> Result<Json<PriceQuote>, AppError> {
    let quote = state.prices.quote(&coin).await?;
    Ok(Json(quote))
}

/// GET /api/crypto/top10: top 10 by market cap
pub async fn top10(State(state): State<AppState>) -> Result<Json<TopCoinsResponse>, AppError> {
    let top_10 = state.prices.top_coins().await?;

    Ok(Json(TopCoinsResponse {
        top_10,
        timestamp: Utc::now(),
    }))
}

/// GET /api/crypto/compare?coins=btc,eth: side-by-side quotes
pub async fn compare(
    State(state): State<AppState>,
    Query(query): Query<CompareQuery>,
) -> Result<Json<ComparisonResponse>, AppError> {
    let raw = query.coins.as_deref().unwrap_or(DEFAULT_COMPARE_COINS);
    let coin_ids = parse_coin_list(raw);
    if coin_ids.is_empty() {
        return Err(AppError::BadRequest("coins must list at least one coin".into()));
    }

    let comparison = state.prices.compare(&coin_ids).await?;

    Ok(Json(ComparisonResponse {
        comparison,
        timestamp: Utc::now(),
    }))
}
