//! API response types

pub use binlookup_core::response::{BinData, LookupOutcome, LookupResponse};

/// Cache-Control value sent with every lookup response
pub const CACHE_CONTROL_VALUE: &str = "public, max-age=86400";
