use std::sync::OnceLock;

use metrics::{counter, describe_counter, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder once per process and register all
/// application metrics. Returns a `PrometheusHandle` whose `render()` method
/// produces the text/plain Prometheus scrape payload.
pub fn init_metrics() -> PrometheusHandle {
    HANDLE
        .get_or_init(|| {
            let recorder = PrometheusBuilder::new().build_recorder();
            let handle = recorder.handle();
            if let Err(e) = metrics::set_global_recorder(recorder) {
                tracing::warn!(error = %e, "Metrics recorder already installed");
            }
            register();
            handle
        })
        .clone()
}

fn register() {
    describe_counter!("app_requests_total", "Total HTTP requests by method and route");
    describe_histogram!("app_request_duration_seconds", "HTTP request duration");
    describe_counter!("upstream_requests_total", "Calls to the market-data provider");
    describe_counter!("upstream_failures_total", "Failed calls to the market-data provider");
    describe_counter!("quote_cache_hits_total", "Quotes served from cache");
    describe_counter!("quote_cache_misses_total", "Quote cache misses");
    describe_counter!("quote_cache_errors_total", "Quote cache errors treated as misses");

    // Pre-register so they appear even before the first increment.
    counter!("quote_cache_hits_total").absolute(0);
    counter!("quote_cache_misses_total").absolute(0);
    counter!("quote_cache_errors_total").absolute(0);
}
