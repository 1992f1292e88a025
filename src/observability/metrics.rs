//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by method, status, route
//! - `gateway_request_duration_seconds` (histogram): latency by route
//! - `gateway_tasks_total` (counter): terminal task outcomes
//! - `gateway_tasks_live` (gauge): current task store size

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter and register metric descriptions.
///
/// Must be called from within the Tokio runtime; the exporter serves
/// scrapes from a background task on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            describe_counter!(
                "gateway_requests_total",
                "Total inbound requests by method, status and route"
            );
            describe_histogram!(
                "gateway_request_duration_seconds",
                "Inbound request handling latency"
            );
            describe_counter!(
                "gateway_tasks_total",
                "Terminal task outcomes by status"
            );
            describe_gauge!("gateway_tasks_live", "Tasks currently held in the store");

            tracing::info!(address = %addr, "Metrics exporter listening");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install metrics exporter");
        }
    }
}

/// Record one handled inbound request.
pub fn record_request(method: &str, status: u16, route: &str, start: Instant) {
    counter!(
        "gateway_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "route" => route.to_string()
    )
    .increment(1);
    histogram!(
        "gateway_request_duration_seconds",
        "route" => route.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record a task reaching a terminal state.
pub fn record_task_outcome(outcome: &'static str) {
    counter!("gateway_tasks_total", "outcome" => outcome).increment(1);
}

/// Record the current task store size.
pub fn record_store_size(size: usize) {
    gauge!("gateway_tasks_live").set(size as f64);
}
