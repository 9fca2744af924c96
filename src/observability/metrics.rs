//! Metrics collection and exposition.
//!
//! # Metrics
//! - `proxy_requests_total` (counter): forwarded requests by method, target, status
//! - `proxy_request_duration_seconds` (histogram): time to response headers
//! - `proxy_upstream_errors_total` (counter): failed forwards by target, kind
//! - `proxy_upgrades_total` (counter): tunnelled connection upgrades by target
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::routing::Target;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_request(method: &str, target: Target, status: u16, start: Instant) {
    counter!(
        "proxy_requests_total",
        "method" => method.to_string(),
        "target" => target.as_str(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(
        "proxy_request_duration_seconds",
        "method" => method.to_string(),
        "target" => target.as_str()
    )
    .record(start.elapsed().as_secs_f64());
}

pub fn record_upstream_error(target: Target, kind: &'static str) {
    counter!(
        "proxy_upstream_errors_total",
        "target" => target.as_str(),
        "kind" => kind
    )
    .increment(1);
}

pub fn record_upgrade(target: Target) {
    counter!("proxy_upgrades_total", "target" => target.as_str()).increment(1);
}
