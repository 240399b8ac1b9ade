//! binlookup HTTP server binary

use binlookup_core::{Config, DatasetFetcher};
use binlookup_server::{router, telemetry, AppState};
use std::path::PathBuf;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::var_os("BINLOOKUP_CONFIG").map(PathBuf::from);
    let mut config = Config::load(config_path.as_deref())?;
    config.apply_env_overrides()?;

    if config.telemetry.otel_enabled {
        telemetry::init_tracing_stack(&config.telemetry)?;
        info!("OpenTelemetry tracing enabled");
    } else {
        telemetry::init_logging(&config.telemetry)?;
        info!("Console logging enabled (set OTEL_ENABLED=true for OpenTelemetry)");
    }

    info!("Starting binlookup server v{}", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &config_path {
        info!("Configuration loaded from {}", path.display());
    }

    binlookup_server::metrics::init_prometheus(config.server.metrics_address)?;
    binlookup_server::metrics::init_metrics();

    let fetcher = DatasetFetcher::new(&config.dataset)?;
    info!("BIN dataset source: {}", fetcher.url());

    let app = router(AppState::new(fetcher));

    let addr = config.server.bind_address;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
        info!("Received shutdown signal, shutting down gracefully...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    if config.telemetry.otel_enabled {
        info!("Flushing OpenTelemetry traces...");
        telemetry::shutdown_telemetry();
    }

    info!("Server shutdown complete");
    Ok(())
}
