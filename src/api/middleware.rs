use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use metrics::{counter, histogram};

/// Count requests and record latency, labelled by route template so that
/// `/api/crypto/bitcoin` and `/api/crypto/solana` share one series.
pub async fn track_requests(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = req.method().to_string();
    let endpoint = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".into());

    let response = next.run(req).await;

    let status = response.status().as_u16().to_string();
    counter!(
        "app_requests_total",
        "method" => method.clone(),
        "endpoint" => endpoint.clone(),
        "status" => status
    )
    .increment(1);
    histogram!(
        "app_request_duration_seconds",
        "method" => method,
        "endpoint" => endpoint
    )
    .record(started.elapsed().as_secs_f64());

    response
}
