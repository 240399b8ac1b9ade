//! Error types for BIN lookups

use thiserror::Error;

/// Main error type for lookup operations
#[derive(Error, Debug)]
pub enum LookupError {
    /// The caller supplied something that is not a 6-16 digit BIN
    #[error("Invalid BIN: {0}")]
    InvalidBin(String),

    /// Transport-level failure talking to the dataset host
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Dataset host answered with a non-success status
    #[error("Upstream returned HTTP {status} for {url}")]
    UpstreamStatus {
        /// HTTP status code
        status: u16,
        /// Dataset URL that was requested
        url: String,
    },

    /// Dataset body could not be decoded as BIN records
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// Dataset header lacks a required column
    #[error("Dataset header is missing column {0}")]
    MissingColumn(&'static str),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LookupError {
    /// Stable label used in logs and metric dimensions
    pub fn kind(&self) -> &'static str {
        match self {
            LookupError::InvalidBin(_) => "invalid_bin",
            LookupError::Http(_) | LookupError::UpstreamStatus { .. } => "fetch",
            LookupError::Csv(_) | LookupError::MissingColumn(_) => "parse",
            LookupError::Config(_) => "config",
            LookupError::Io(_) => "io",
        }
    }

    /// True for failures of the remote dataset (fetch or parse)
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            LookupError::Http(_)
                | LookupError::UpstreamStatus { .. }
                | LookupError::Csv(_)
                | LookupError::MissingColumn(_)
        )
    }
}

impl From<toml::de::Error> for LookupError {
    fn from(err: toml::de::Error) -> Self {
        LookupError::Config(err.to_string())
    }
}

/// Result type alias for lookup operations
pub type Result<T> = std::result::Result<T, LookupError>;
