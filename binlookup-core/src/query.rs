//! Validated BIN queries

use crate::error::{LookupError, Result};
use std::fmt;
use std::str::FromStr;

/// Shortest accepted BIN
pub const MIN_BIN_LENGTH: usize = 6;

/// Longest accepted BIN
pub const MAX_BIN_LENGTH: usize = 16;

/// A caller-supplied BIN of 6 to 16 ASCII decimal digits.
///
/// A `BinQuery` that exists is always well formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BinQuery {
    digits: String,
    number: u64,
}

impl BinQuery {
    /// Validate and wrap a raw BIN string
    pub fn parse(input: &str) -> Result<Self> {
        if input.is_empty() {
            return Err(LookupError::InvalidBin("BIN is empty".to_string()));
        }

        if !input.bytes().all(|b| b.is_ascii_digit()) {
            return Err(LookupError::InvalidBin(
                "BIN must contain only decimal digits".to_string(),
            ));
        }

        let len = input.len();
        if !(MIN_BIN_LENGTH..=MAX_BIN_LENGTH).contains(&len) {
            return Err(LookupError::InvalidBin(format!(
                "expected {}-{} digits, got {}",
                MIN_BIN_LENGTH, MAX_BIN_LENGTH, len
            )));
        }

        // 16 decimal digits always fit in a u64
        let number = input
            .parse::<u64>()
            .map_err(|e| LookupError::InvalidBin(e.to_string()))?;

        Ok(BinQuery {
            digits: input.to_string(),
            number,
        })
    }

    /// The digits exactly as supplied
    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// Numeric value (leading zeros dropped)
    pub fn number(&self) -> u64 {
        self.number
    }
}

impl FromStr for BinQuery {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self> {
        BinQuery::parse(s)
    }
}

impl fmt::Display for BinQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}
