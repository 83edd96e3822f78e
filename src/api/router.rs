use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;
use super::handlers;
use super::middleware::track_requests;

pub fn create_router(state: AppState) -> Router {
    // Service endpoints
    let service = Router::new()
        .route("/", get(handlers::info::index))
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::render));

    let api = Router::new()
        // Prices (static segments take priority over /:coin)
        .route("/api/crypto/top10", get(handlers::crypto::top10))
        .route("/api/crypto/compare", get(handlers::crypto::compare))
        .route("/api/crypto/:coin", get(handlers::crypto::quote))
        // Portfolio
        .route("/api/portfolio", get(handlers::portfolio::get_portfolio))
        .route("/api/portfolio/add", post(handlers::portfolio::add))
        // Alerts
        .route("/api/alerts", get(handlers::alerts::list).post(handlers::alerts::create))
        // Transform
        .route("/api/transform", post(handlers::transform::transform))
        .route("/api/stats", get(handlers::transform::stats));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    service
        .merge(api)
        .route_layer(middleware::from_fn(track_requests))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
