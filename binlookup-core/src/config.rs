//! Service configuration
//!
//! Configuration is read from an optional TOML file and then overridden from
//! the environment. Every field has a default, so an empty file (or no file)
//! yields a working configuration pointing at the public dataset.

use crate::error::{LookupError, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Published BIN list the service reads from
pub const DEFAULT_DATASET_URL: &str =
    "https://raw.githubusercontent.com/venelinkochev/bin-list-data/refs/heads/master/bin-list-data.csv";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// HTTP listener settings
    pub server: ServerConfig,
    /// Upstream dataset settings
    pub dataset: DatasetConfig,
    /// Logging and tracing settings
    pub telemetry: TelemetryConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Address the lookup API binds to
    pub bind_address: SocketAddr,
    /// Address for the Prometheus scrape listener, disabled when unset
    pub metrics_address: Option<SocketAddr>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 8080)),
            metrics_address: None,
        }
    }
}

/// Upstream dataset settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatasetConfig {
    /// Location of the CSV dataset
    pub url: String,
    /// Whole-request timeout; the HTTP client default applies when unset
    pub timeout_secs: Option<u64>,
    /// User-Agent sent with each fetch
    pub user_agent: String,
}

impl DatasetConfig {
    /// Dataset settings pointing at `url`, everything else defaulted
    pub fn with_url(url: impl Into<String>) -> Self {
        DatasetConfig {
            url: url.into(),
            ..DatasetConfig::default()
        }
    }

    /// Timeout as a `Duration`
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        DatasetConfig {
            url: DEFAULT_DATASET_URL.to_string(),
            timeout_secs: None,
            user_agent: format!("binlookup/{}", crate::VERSION),
        }
    }
}

/// Logging and tracing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TelemetryConfig {
    /// Export spans over OTLP
    pub otel_enabled: bool,
    /// `service.name` resource attribute
    pub service_name: String,
    /// Default `EnvFilter` directive when RUST_LOG is unset
    pub log_filter: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        TelemetryConfig {
            otel_enabled: false,
            service_name: "binlookup-server".to_string(),
            log_filter: "info,binlookup=debug".to_string(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load configuration from `path`, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                let contents = std::fs::read_to_string(path)?;
                Self::from_toml_str(&contents)
            }
            None => Ok(Config::default()),
        }
    }

    /// Apply overrides from the process environment
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("BIND_ADDRESS") {
            self.server.bind_address = parse_override("BIND_ADDRESS", &addr)?;
        }
        if let Some(addr) = lookup("METRICS_ADDRESS") {
            self.server.metrics_address = Some(parse_override("METRICS_ADDRESS", &addr)?);
        }
        if let Some(url) = lookup("BIN_DATASET_URL") {
            self.dataset.url = url;
        }
        if let Some(secs) = lookup("BIN_DATASET_TIMEOUT_SECS") {
            self.dataset.timeout_secs = Some(parse_override("BIN_DATASET_TIMEOUT_SECS", &secs)?);
        }
        if let Some(enabled) = lookup("OTEL_ENABLED") {
            self.telemetry.otel_enabled = parse_override("OTEL_ENABLED", &enabled)?;
        }
        Ok(())
    }
}

fn parse_override<T>(key: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| LookupError::Config(format!("{}={:?}: {}", key, value, e)))
}
