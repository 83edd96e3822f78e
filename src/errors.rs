use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::services::prices::PriceError;
use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An outbound dependency failed; `details` is safe to show the client.
    #[error("{message}: {details}")]
    Upstream { message: String, details: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::Upstream { message, details } => {
                tracing::warn!(error = %details, "{message}");
                (StatusCode::INTERNAL_SERVER_ERROR, message, Some(details))
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                    None,
                )
            }
        };

        (
            status,
            Json(ErrorBody {
                success: false,
                error: message,
                details,
            }),
        )
            .into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Internal(e.into())
    }
}

impl From<PriceError> for AppError {
    fn from(e: PriceError) -> Self {
        match e {
            PriceError::CoinNotFound(coin) => {
                AppError::NotFound(format!("Coin '{coin}' not found"))
            }
            PriceError::Upstream(source) => AppError::Upstream {
                message: "Failed to fetch data".into(),
                details: source.to_string(),
            },
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            e @ StoreError::AmountOverflow(_) => AppError::BadRequest(e.to_string()),
            StoreError::Backend(e) => AppError::Internal(e),
        }
    }
}
