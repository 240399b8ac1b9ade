//! binlookup core - BIN validation, dataset retrieval and lookup
//!
//! This crate holds everything the HTTP service and the CLI share: the
//! validated [`BinQuery`], the fixed-shape [`BinRecord`], the CSV
//! [`Dataset`] with its linear scan, the [`DatasetFetcher`] that pulls
//! the published list over HTTP, and the [`LookupResponse`] envelope both
//! front ends print.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
pub mod dataset;
pub mod error;
pub mod query;
pub mod record;
pub mod response;

pub use config::{Config, DatasetConfig, ServerConfig, TelemetryConfig, DEFAULT_DATASET_URL};
pub use dataset::{Dataset, DatasetFetcher};
pub use error::{LookupError, Result};
pub use query::{BinQuery, MAX_BIN_LENGTH, MIN_BIN_LENGTH};
pub use record::{BinRecord, COLUMNS};
pub use response::{BinData, LookupOutcome, LookupResponse};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
