//! Lookup response envelope shared by the HTTP API and the CLI

use crate::query::BinQuery;
use crate::record::BinRecord;
use serde::{Deserialize, Serialize};

/// Result of a single lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    /// BIN present in the dataset
    Found,
    /// Dataset fetched, no matching row
    NotFound,
    /// Input was not 6-16 digits
    Invalid,
    /// Dataset could not be fetched or parsed
    FetchError,
}

impl LookupOutcome {
    /// Message shown to the caller
    pub fn message(self) -> &'static str {
        match self {
            LookupOutcome::Found => "BIN Found",
            LookupOutcome::NotFound => "BIN Not Found",
            LookupOutcome::Invalid => "Invalid BIN",
            LookupOutcome::FetchError => "Error fetching BIN data",
        }
    }

    /// Label used for metrics and spans
    pub fn as_str(self) -> &'static str {
        match self {
            LookupOutcome::Found => "found",
            LookupOutcome::NotFound => "not_found",
            LookupOutcome::Invalid => "invalid",
            LookupOutcome::FetchError => "fetch_error",
        }
    }
}

/// Lookup response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResponse {
    /// Whether a match was found
    pub result: bool,

    /// Human-readable status
    pub message: String,

    /// Matched record, `null` otherwise
    pub data: Option<BinData>,
}

/// Issuer metadata returned for a matched BIN
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinData {
    /// Numeric value of the BIN, leading zeros dropped
    pub bin: u64,
    /// Card network, from the `Brand` column
    pub vendor: String,
    /// Card type
    #[serde(rename = "type")]
    pub card_type: String,
    /// Card category
    pub category: String,
    /// Issuing institution
    pub issuer: String,
    /// Issuer contact number
    pub issuer_phone: String,
    /// Issuer website
    pub issuer_url: String,
    /// ISO 3166-1 alpha-2 country code
    pub iso_code2: String,
    /// ISO 3166-1 alpha-3 country code
    pub iso_code3: String,
    /// Country name
    pub country_name: String,
}

impl BinData {
    /// Rename-copy a dataset row; `bin` is the numeric value of the query,
    /// which equals the row's BIN digits.
    pub fn from_record(query: &BinQuery, record: &BinRecord) -> Self {
        BinData {
            bin: query.number(),
            vendor: record.brand.clone(),
            card_type: record.card_type.clone(),
            category: record.category.clone(),
            issuer: record.issuer.clone(),
            issuer_phone: record.issuer_phone.clone(),
            issuer_url: record.issuer_url.clone(),
            iso_code2: record.iso_code2.clone(),
            iso_code3: record.iso_code3.clone(),
            country_name: record.country_name.clone(),
        }
    }
}

impl LookupResponse {
    fn empty(outcome: LookupOutcome) -> Self {
        LookupResponse {
            result: false,
            message: outcome.message().to_string(),
            data: None,
        }
    }

    /// Successful match
    pub fn found(query: &BinQuery, record: &BinRecord) -> Self {
        LookupResponse {
            result: true,
            message: LookupOutcome::Found.message().to_string(),
            data: Some(BinData::from_record(query, record)),
        }
    }

    /// Valid BIN with no matching row
    pub fn not_found() -> Self {
        Self::empty(LookupOutcome::NotFound)
    }

    /// Malformed BIN
    pub fn invalid() -> Self {
        Self::empty(LookupOutcome::Invalid)
    }

    /// Upstream fetch or parse failure
    pub fn fetch_error() -> Self {
        Self::empty(LookupOutcome::FetchError)
    }
}
