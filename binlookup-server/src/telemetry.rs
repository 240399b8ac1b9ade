//! Logging and OpenTelemetry tracing for the lookup server

use binlookup_core::TelemetryConfig;
use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    runtime,
    trace::{self, RandomIdGenerator, Sampler},
    Resource,
};
use std::time::Duration;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Initialize OpenTelemetry with OTLP exporter
pub fn init_telemetry(service_name: &str) -> anyhow::Result<opentelemetry_sdk::trace::Tracer> {
    // Get OTLP endpoint from environment or use default
    let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
        .unwrap_or_else(|_| "http://localhost:4317".to_string());

    // Configure resource attributes
    let resource = Resource::new(vec![
        KeyValue::new("service.name", service_name.to_string()),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    // Configure OTLP exporter
    let exporter = opentelemetry_otlp::new_exporter()
        .tonic()
        .with_endpoint(endpoint)
        .with_timeout(Duration::from_secs(3));

    let tracer = opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(exporter)
        .with_trace_config(
            trace::config()
                .with_sampler(get_sampler())
                .with_id_generator(RandomIdGenerator::default())
                .with_resource(resource),
        )
        .install_batch(runtime::Tokio)?;

    Ok(tracer)
}

/// Sampler from `OTEL_TRACES_SAMPLER_ARG`, sampling everything by default
fn get_sampler() -> Sampler {
    let ratio = std::env::var("OTEL_TRACES_SAMPLER_ARG")
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(1.0); // Sample everything unless told otherwise
    sampler_for_ratio(ratio)
}

fn sampler_for_ratio(ratio: f64) -> Sampler {
    if ratio >= 1.0 {
        Sampler::AlwaysOn
    } else if ratio <= 0.0 {
        Sampler::AlwaysOff
    } else {
        Sampler::TraceIdRatioBased(ratio)
    }
}

fn env_filter(config: &TelemetryConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter))
}

/// Console logging only
pub fn init_logging(config: &TelemetryConfig) -> anyhow::Result<()> {
    Registry::default()
        .with(env_filter(config))
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;
    Ok(())
}

/// Console logging plus OTLP span export
pub fn init_tracing_stack(config: &TelemetryConfig) -> anyhow::Result<()> {
    let tracer = init_telemetry(&config.service_name)?;

    let otel_layer = OpenTelemetryLayer::new(tracer);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_thread_ids(true)
        .with_thread_names(true);

    Registry::default()
        .with(env_filter(config))
        .with(fmt_layer)
        .with(otel_layer)
        .try_init()?;

    Ok(())
}

/// Shutdown OpenTelemetry provider
pub fn shutdown_telemetry() {
    opentelemetry::global::shutdown_tracer_provider();
}

/// Span covering one lookup request
pub fn create_lookup_span(bin: &str) -> tracing::Span {
    tracing::info_span!(
        "lookup_request",
        bin = %bin,
        otel.kind = "server",
        outcome = tracing::field::Empty,
        latency_ms = tracing::field::Empty,
        error = tracing::field::Empty,
        otel.status_code = tracing::field::Empty,
    )
}

/// Record outcome in current span
pub fn record_outcome(outcome: &str, latency_ms: f64) {
    let span = tracing::Span::current();
    span.record("outcome", outcome);
    span.record("latency_ms", latency_ms);
    span.record("otel.status_code", "OK");
}

/// Record error in current span
pub fn record_error(error: &str) {
    let span = tracing::Span::current();
    span.record("otel.status_code", "ERROR");
    span.record("error", error);
}

/// Child span around the linear dataset scan
#[tracing::instrument(name = "dataset_scan", skip_all, fields(rows = rows))]
pub fn trace_scan<F, R>(rows: usize, f: F) -> R
where
    F: FnOnce() -> R,
{
    f()
}
