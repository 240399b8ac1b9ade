//! Application state

use binlookup_core::DatasetFetcher;
use std::sync::Arc;

/// Application state shared across handlers.
///
/// Holds no per-request data; every lookup fetches its own dataset.
#[derive(Clone)]
pub struct AppState {
    /// Retrieves the BIN dataset
    pub fetcher: Arc<DatasetFetcher>,
}

impl AppState {
    /// Create new application state
    pub fn new(fetcher: DatasetFetcher) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
        }
    }
}
