use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::{Holding, PortfolioSnapshot};
use crate::services::portfolio::{self, AddHolding};
use crate::services::validation::json_object;
use crate::AppState;

#[derive(Serialize)]
pub struct AddHoldingResponse {
    pub status: &'static str,
    pub message: String,
    pub holding: Holding,
    pub portfolio: Vec<Holding>,
}

/// POST /api/portfolio/add: add an amount of a coin
pub async fn add(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AddHoldingResponse>, AppError> {
    let body = json_object(&body)
        .ok_or_else(|| AppError::BadRequest("Required: coin, amount".into()))?;
    let req = AddHolding::from_json(&body)?;
    let message = format!(
        "Added {} {} to portfolio",
        req.amount.normalize(),
        req.coin.to_uppercase()
    );

    let holding = portfolio::add_holding(state.portfolio.as_ref(), req).await?;
    let all = state.portfolio.list().await?;

    Ok(Json(AddHoldingResponse {
        status: "success",
        message,
        holding,
        portfolio: all,
    }))
}

/// GET /api/portfolio: holdings valued at live prices
pub async fn get_portfolio(
    State(state): State<AppState>,
) -> Result<Json<PortfolioSnapshot>, AppError> {
    let snapshot = portfolio::snapshot(state.portfolio.as_ref(), &state.prices).await?;
    Ok(Json(snapshot))
}
