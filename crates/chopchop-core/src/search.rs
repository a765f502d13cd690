//! Digest query normalization.
//!
//! Hash values pulled out of a disassembler are integers, while the store
//! keeps little-endian hex strings. A `0x` query is converted to the stored
//! form; anything else is looked up as typed.

use std::fmt;

use crate::error::{Error, Result};

/// A digest to look up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DigestQuery {
    /// Either a hex digest as stored, or a `0x`-prefixed dword/qword.
    Text(String),
    /// An integer hash value.
    Integer(u64),
}

/// Little-endian hex of the low `width` bytes of `value`.
fn le_hex(value: u64, width: usize) -> String {
    hex::encode(&value.to_le_bytes()[..width])
}

impl DigestQuery {
    /// Converts the query to the string form stored in the database.
    pub fn normalize(&self) -> Result<String> {
        match self {
            Self::Integer(value) => {
                let width = if u32::try_from(*value).is_ok() { 4 } else { 8 };
                Ok(le_hex(*value, width))
            }
            Self::Text(text) => match text.strip_prefix("0x") {
                Some(digits) => Self::normalize_hex(text, digits),
                None => Ok(text.clone()),
            },
        }
    }

    fn normalize_hex(query: &str, digits: &str) -> Result<String> {
        let invalid = || Error::InvalidDigestValue {
            query: query.to_string(),
        };
        // `_` may group digits as in `0x1122_3344`, but not trail or repeat
        if digits.ends_with('_') || digits.contains("__") {
            return Err(invalid());
        }
        let digits = digits.replace('_', "");

        let width = digits.len() / 2;
        if width != 4 && width != 8 {
            return Err(Error::InvalidDigestWidth {
                query: query.to_string(),
                digits: digits.len(),
            });
        }

        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let value = u64::from_str_radix(&digits, 16).map_err(|_| invalid())?;
        if width == 4 && u32::try_from(value).is_err() {
            return Err(invalid());
        }
        Ok(le_hex(value, width))
    }
}

impl From<&str> for DigestQuery {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for DigestQuery {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<u64> for DigestQuery {
    fn from(value: u64) -> Self {
        Self::Integer(value)
    }
}

impl From<u32> for DigestQuery {
    fn from(value: u32) -> Self {
        Self::Integer(value as u64)
    }
}

impl fmt::Display for DigestQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(value) => write!(f, "{:#x}", value),
        }
    }
}
