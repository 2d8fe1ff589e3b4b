//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define dispatch metrics (requests, latency, registered routes)
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `webmvc_requests_total` (counter): requests by method, outcome, status
//! - `webmvc_request_duration_seconds` (histogram): latency by method, outcome
//! - `webmvc_routes_registered` (gauge): size of the routing table
//!
//! # Design Decisions
//! - Low-overhead metric updates (atomic operations)
//! - Recording is a no-op until an exporter is installed
//! - The `method` label is bounded: unsupported verbs are folded into `OTHER`

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::routing::RequestMethod;

const OTHER_METHOD: &str = "OTHER";

/// Result of dispatching one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Handled,
    NotFound,
    Failed,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Handled => "handled",
            Outcome::NotFound => "not_found",
            Outcome::Failed => "failed",
        }
    }
}

/// Start the Prometheus scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to start metrics endpoint"),
    }
}

/// Label value for a raw request method.
pub fn method_label(method: &str) -> &'static str {
    method
        .parse::<RequestMethod>()
        .map(|m| m.as_str())
        .unwrap_or(OTHER_METHOD)
}

pub fn record_request(method: &str, outcome: Outcome, status: u16, start: Instant) {
    let method = method_label(method);
    metrics::counter!(
        "webmvc_requests_total",
        "method" => method,
        "outcome" => outcome.as_str(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "webmvc_request_duration_seconds",
        "method" => method,
        "outcome" => outcome.as_str()
    )
    .record(start.elapsed().as_secs_f64());
}

pub fn record_routes(count: usize) {
    metrics::gauge!("webmvc_routes_registered").set(count as f64);
}
