use metrics::{describe_counter, describe_histogram, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Initialize the Prometheus metrics exporter.
/// Returns None if a recorder is already installed (e.g., in tests).
pub fn init_metrics() -> Option<PrometheusHandle> {
    let builder = PrometheusBuilder::new();
    let handle = builder.install_recorder().ok()?;

    init_metric_descriptions();

    Some(handle)
}

fn init_metric_descriptions() {
    describe_counter!("panel_quotes_total", "Total number of cost quotes computed");
    describe_counter!("panel_searches_total", "Total number of respondent searches executed");
    describe_counter!("panel_http_requests_total", "Total number of HTTP requests served");
    describe_histogram!(
        "panel_http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_counter!("panel_errors_total", "Total number of request errors");

    gauge!("panel_pricing_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
}

/// Record one served request.
pub fn record_request(endpoint: &str, status: u16, duration_seconds: f64) {
    metrics::counter!(
        "panel_http_requests_total",
        "endpoint" => endpoint.to_string(),
        "status" => status.to_string(),
    )
    .increment(1);

    metrics::histogram!(
        "panel_http_request_duration_seconds",
        "endpoint" => endpoint.to_string(),
    )
    .record(duration_seconds);

    if status >= 500 {
        metrics::counter!("panel_errors_total", "endpoint" => endpoint.to_string()).increment(1);
    }
}
