//! Dataset row type

use serde::{Deserialize, Serialize};

/// Header names every dataset must carry
pub const COLUMNS: [&str; 10] = [
    "BIN",
    "Brand",
    "Type",
    "Category",
    "Issuer",
    "IssuerPhone",
    "IssuerUrl",
    "isoCode2",
    "isoCode3",
    "CountryName",
];

/// One row of the upstream BIN dataset.
///
/// Column names follow the published CSV header. Unknown columns are
/// ignored; a header without one of [`COLUMNS`] fails decoding of the whole
/// dataset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BinRecord {
    /// BIN digits as published
    #[serde(rename = "BIN")]
    pub bin: String,

    /// Card network (e.g. "VISA")
    #[serde(rename = "Brand")]
    pub brand: String,

    /// Card type (e.g. "DEBIT")
    #[serde(rename = "Type")]
    pub card_type: String,

    /// Card category (e.g. "CLASSIC")
    #[serde(rename = "Category")]
    pub category: String,

    /// Issuing institution
    #[serde(rename = "Issuer")]
    pub issuer: String,

    /// Issuer contact number
    #[serde(rename = "IssuerPhone")]
    pub issuer_phone: String,

    /// Issuer website
    #[serde(rename = "IssuerUrl")]
    pub issuer_url: String,

    /// ISO 3166-1 alpha-2 country code
    #[serde(rename = "isoCode2")]
    pub iso_code2: String,

    /// ISO 3166-1 alpha-3 country code
    #[serde(rename = "isoCode3")]
    pub iso_code3: String,

    /// Country name in upper case as published
    #[serde(rename = "CountryName")]
    pub country_name: String,
}
