//! Prometheus metrics for the studio service.

use std::sync::OnceLock;
use std::time::Instant;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use regex_lite::Regex;

/// Install the Prometheus recorder.
/// Returns a handle that can be used to render metrics.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

/// Metric names as constants for consistency.
pub mod names {
    // HTTP metrics
    pub const HTTP_REQUESTS_TOTAL: &str = "nds_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "nds_http_request_duration_seconds";
    pub const HTTP_REQUESTS_IN_FLIGHT: &str = "nds_http_requests_in_flight";

    // Generation metrics
    pub const RENDERS_TOTAL: &str = "nds_renders_total";
    pub const RENDER_DURATION_SECONDS: &str = "nds_render_duration_seconds";
    pub const DESCRIPTIONS_TOTAL: &str = "nds_descriptions_total";

    // Studio state
    pub const TIMELINE_ITEMS: &str = "nds_timeline_items";
}

/// Record an HTTP request.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", sanitize_path(path)),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record a finished render attempt.
pub fn record_render(outcome: &str, duration_secs: f64) {
    let labels = [("outcome", outcome.to_string())];
    counter!(names::RENDERS_TOTAL, &labels).increment(1);
    histogram!(names::RENDER_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record a scene description attempt.
pub fn record_description(outcome: &str) {
    let labels = [("outcome", outcome.to_string())];
    counter!(names::DESCRIPTIONS_TOTAL, &labels).increment(1);
}

/// Update the timeline length gauge.
pub fn set_timeline_items(count: usize) {
    gauge!(names::TIMELINE_ITEMS).set(count as f64);
}

/// Sanitize path for metrics labels (collapse instance IDs).
fn sanitize_path(path: &str) -> String {
    static INSTANCE: OnceLock<Regex> = OnceLock::new();
    let instance = INSTANCE.get_or_init(|| {
        Regex::new(r"/timeline/[a-zA-Z0-9_-]+").expect("static regex is valid")
    });
    instance.replace_all(path, "/timeline/:instance_id").to_string()
}

/// Metrics middleware for HTTP requests.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).increment(1.0);

    let response = next.run(request).await;

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).decrement(1.0);

    let status = response.status().as_u16();
    let duration = start.elapsed().as_secs_f64();

    record_http_request(&method, &path, status, duration);

    response
}
