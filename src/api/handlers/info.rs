use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::AppState;

/// GET /: service metadata and endpoint index.
pub async fn index(State(state): State<AppState>) -> Json<Value> {
    let cache = state
        .prices
        .cache()
        .map(|c| c.backend())
        .unwrap_or("disabled");

    Json(json!({
        "service": "Crypto Tracker API",
        "version": state.config.app_version,
        "storage": state.storage_backend(),
        "cache": cache,
        "endpoints": {
            "GET /health": "Health check",
            "GET /metrics": "Prometheus metrics",
            "GET /api/crypto/<coin>": "Get price for specific coin (e.g., bitcoin, ethereum)",
            "GET /api/crypto/top10": "Get top 10 cryptocurrencies",
            "GET /api/crypto/compare?coins=btc,eth": "Compare multiple coins",
            "POST /api/portfolio/add": "Add coin to portfolio",
            "GET /api/portfolio": "View your portfolio with current values",
            "POST /api/alerts": "Set price alert",
            "GET /api/alerts": "View all alerts",
            "POST /api/transform": "Transform a {name, age} record",
            "GET /api/stats": "Statistics over transformed records",
        }
    }))
}
