//! HTTP request handlers

use crate::api::{LookupOutcome, LookupResponse, CACHE_CONTROL_VALUE};
use crate::metrics::{self, LatencyTimer};
use crate::state::AppState;
use crate::telemetry;
use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use binlookup_core::BinQuery;
use std::time::Instant;
use tracing::{debug, info, warn, Instrument};

/// `GET /:bin`
pub async fn lookup_bin(
    State(state): State<AppState>,
    bin: Result<Path<String>, PathRejection>,
) -> impl IntoResponse {
    let bin = match bin {
        Ok(Path(bin)) => bin,
        Err(rejection) => {
            debug!("Unusable BIN path segment: {}", rejection);
            String::new()
        }
    };

    respond(lookup(&state, &bin).await)
}

/// `GET /` - an empty BIN
pub async fn lookup_root(State(state): State<AppState>) -> impl IntoResponse {
    respond(lookup(&state, "").await)
}

fn respond(response: LookupResponse) -> impl IntoResponse {
    ([(header::CACHE_CONTROL, CACHE_CONTROL_VALUE)], Json(response))
}

/// Validate, fetch, scan. Every failure becomes a response envelope.
pub async fn lookup(state: &AppState, bin: &str) -> LookupResponse {
    let span = telemetry::create_lookup_span(bin);

    async move {
        let start = Instant::now();
        let (outcome, response) = resolve(state, bin).await;

        let elapsed = start.elapsed().as_secs_f64();
        metrics::record_lookup(outcome, elapsed);
        telemetry::record_outcome(outcome.as_str(), elapsed * 1000.0);

        info!(
            "Lookup: {} -> {} ({:.2}ms)",
            bin,
            outcome.as_str(),
            elapsed * 1000.0
        );

        response
    }
    .instrument(span)
    .await
}

async fn resolve(state: &AppState, bin: &str) -> (LookupOutcome, LookupResponse) {
    let query = match BinQuery::parse(bin) {
        Ok(query) => query,
        Err(e) => {
            debug!("Rejected BIN {:?}: {}", bin, e);
            return (LookupOutcome::Invalid, LookupResponse::invalid());
        }
    };

    let timer = LatencyTimer::new("binlookup_fetch_latency_seconds");
    let dataset = match state.fetcher.fetch().await {
        Ok(dataset) => dataset,
        Err(e) => {
            timer.record();
            warn!(kind = e.kind(), "Failed to load BIN dataset: {}", e);
            metrics::record_upstream_error(e.kind());
            telemetry::record_error(&e.to_string());
            return (LookupOutcome::FetchError, LookupResponse::fetch_error());
        }
    };
    timer.record();
    metrics::record_dataset_rows(dataset.len());

    match telemetry::trace_scan(dataset.len(), || dataset.find(&query)) {
        Some(record) => (LookupOutcome::Found, LookupResponse::found(&query, record)),
        None => (LookupOutcome::NotFound, LookupResponse::not_found()),
    }
}
