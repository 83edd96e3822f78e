use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::{RecordStats, TransformedRecord};
use crate::services::transform::{summarize, transform as transform_record};
use crate::services::validation::json_object;
use crate::AppState;

#[derive(Serialize)]
pub struct TransformResponse {
    pub status: &'static str,
    #[serde(flatten)]
    pub record: TransformedRecord,
}

/// POST /api/transform: uppercase name, integer age, append to the log
pub async fn transform(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<TransformResponse>, AppError> {
    let body = json_object(&body).ok_or_else(|| AppError::BadRequest("No data provided".into()))?;
    let record = transform_record(&body)?;

    state.records.append(record.clone()).await;
    tracing::debug!(name = %record.name, age = record.age, "Record transformed");

    Ok(Json(TransformResponse {
        status: "success",
        record,
    }))
}

/// GET /api/stats: count, mean, min and max of ages
pub async fn stats(State(state): State<AppState>) -> Json<RecordStats> {
    let records = state.records.snapshot().await;
    Json(summarize(&records))
}
