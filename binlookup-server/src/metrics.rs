//! Prometheus metrics collection for the lookup server

use crate::api::LookupOutcome;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::net::SocketAddr;
use std::time::Instant;
use tracing::{info, warn};

/// Initialize all metric descriptions
pub fn init_metrics() {
    // Counters
    describe_counter!("binlookup_requests_total", "Total number of BIN lookup requests");
    describe_counter!(
        "binlookup_upstream_errors_total",
        "Total number of failed dataset fetches or parses"
    );

    // Histograms
    describe_histogram!(
        "binlookup_request_latency_seconds",
        "Lookup request latency in seconds"
    );
    describe_histogram!(
        "binlookup_fetch_latency_seconds",
        "Dataset download and parse latency in seconds"
    );

    // Gauges
    describe_gauge!("binlookup_dataset_rows", "Rows in the most recently fetched dataset");
}

/// Record a completed lookup
pub fn record_lookup(outcome: LookupOutcome, latency_seconds: f64) {
    counter!("binlookup_requests_total", "outcome" => outcome.as_str()).increment(1);
    histogram!("binlookup_request_latency_seconds").record(latency_seconds);
}

/// Record the size of a freshly fetched dataset
pub fn record_dataset_rows(rows: usize) {
    gauge!("binlookup_dataset_rows").set(rows as f64);
}

/// Record a dataset failure by error kind
pub fn record_upstream_error(kind: &'static str) {
    counter!("binlookup_upstream_errors_total", "kind" => kind).increment(1);
}

/// Timer for measuring operation latency
pub struct LatencyTimer {
    start: Instant,
    metric_name: &'static str,
}

impl LatencyTimer {
    pub fn new(metric_name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            metric_name,
        }
    }

    /// Record elapsed time and return it in seconds
    pub fn record(self) -> f64 {
        let elapsed = self.start.elapsed().as_secs_f64();
        histogram!(self.metric_name).record(elapsed);
        elapsed
    }
}

/// Storage for Prometheus handle
static PROMETHEUS_HANDLE: std::sync::OnceLock<PrometheusHandle> = std::sync::OnceLock::new();

/// Install the Prometheus recorder.
///
/// When `listen` is set, a scrape endpoint is served on that address,
/// separate from the lookup API. Must be called from within a Tokio runtime
/// in that case.
pub fn init_prometheus(listen: Option<SocketAddr>) -> anyhow::Result<()> {
    let builder = PrometheusBuilder::new();

    let handle = match listen {
        Some(addr) => {
            let (recorder, exporter) = builder.with_http_listener(addr).build()?;
            let handle = recorder.handle();
            metrics::set_global_recorder(recorder)
                .map_err(|_| anyhow::anyhow!("Failed to install metrics recorder"))?;
            tokio::spawn(async move {
                if let Err(e) = exporter.await {
                    warn!("Prometheus exporter stopped: {}", e);
                }
            });
            info!("Prometheus metrics listening on {}", addr);
            handle
        }
        None => builder.install_recorder()?,
    };

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| anyhow::anyhow!("Failed to set Prometheus handle"))?;
    Ok(())
}

/// Get Prometheus metrics string
pub fn get_prometheus_metrics() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Prometheus metrics not initialized\n".to_string())
}
