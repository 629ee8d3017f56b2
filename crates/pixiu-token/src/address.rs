//! Account addresses.
//!
//! Addresses are 20-byte account identifiers rendered as lowercase
//! `0x`-prefixed hex, the form the original contracts used.

use crate::error::{Result, TokenError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of an address in bytes.
pub const ADDRESS_BYTES: usize = 20;

/// A 20-byte account address (lowercase `0x`-prefixed hex).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    /// Parse an address from a hex string (with or without `0x` prefix).
    ///
    /// # Errors
    ///
    /// Returns error if the string is not 40 hex digits.
    pub fn from_hex(s: &str) -> Result<Self> {
        let digits = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);

        if digits.len() != ADDRESS_BYTES * 2 {
            return Err(TokenError::invalid_address(format!(
                "address must be {} hex digits, got {}",
                ADDRESS_BYTES * 2,
                digits.len()
            )));
        }
        if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(TokenError::invalid_address(format!(
                "invalid hex digit {bad:?}"
            )));
        }

        Ok(Self(format!("0x{}", digits.to_ascii_lowercase())))
    }

    /// Create an address from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns error if the slice is not 20 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != ADDRESS_BYTES {
            return Err(TokenError::invalid_address(format!(
                "address must be {ADDRESS_BYTES} bytes, got {}",
                bytes.len()
            )));
        }
        let mut hex = String::with_capacity(2 + ADDRESS_BYTES * 2);
        hex.push_str("0x");
        for byte in bytes {
            hex.push_str(&format!("{byte:02x}"));
        }
        Ok(Self(hex))
    }

    /// Get the address as its canonical hex string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the raw bytes of the address.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0
            .as_bytes()
            .chunks(2)
            .skip(1) // the "0x" prefix
            .map(|pair| {
                let hi = hex_value(pair[0]);
                let lo = hex_value(pair[1]);
                (hi << 4) | lo
            })
            .collect()
    }
}

/// Hex digit value; the input is canonical lowercase hex by construction.
const fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => 0,
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
