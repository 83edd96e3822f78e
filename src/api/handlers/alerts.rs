use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::PriceAlert;
use crate::services::alerts::{create_alert, parse_new_alert};
use crate::services::validation::json_object;
use crate::AppState;

#[derive(Serialize)]
pub struct AlertList {
    pub alerts: Vec<PriceAlert>,
}

#[derive(Serialize)]
pub struct AlertCreated {
    pub status: &'static str,
    pub alert: PriceAlert,
}

/// GET /api/alerts: all alerts in creation order
pub async fn list(State(state): State<AppState>) -> Result<Json<AlertList>, AppError> {
    let alerts = state.alerts.list().await?;
    Ok(Json(AlertList { alerts }))
}

/// POST /api/alerts: register a price alert
pub async fn create(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AlertCreated>, AppError> {
    let body = json_object(&body).ok_or_else(|| {
        AppError::BadRequest("Required: coin, target_price, direction (above/below)".into())
    })?;
    let new_alert = parse_new_alert(&body)?;
    let alert = create_alert(state.alerts.as_ref(), new_alert).await?;

    Ok(Json(AlertCreated {
        status: "success",
        alert,
    }))
}
