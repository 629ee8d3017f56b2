//! Token amount representation.
//!
//! Amounts are stored as integer base units (1 token = 10^18 base units,
//! matching the original contracts' 18 decimals) so ledger arithmetic is
//! exact. All fallible math is explicit via checked operations.

use crate::BASE_UNITS_PER_TOKEN;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An amount of tokens, stored as base units.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Amount {
    base_units: u128,
}

impl Amount {
    /// Zero tokens.
    pub const ZERO: Self = Self { base_units: 0 };

    /// Maximum representable amount.
    pub const MAX: Self = Self {
        base_units: u128::MAX,
    };

    /// Create an amount from base units.
    #[must_use]
    pub const fn from_base_units(base_units: u128) -> Self {
        Self { base_units }
    }

    /// Create an amount from a whole number of tokens.
    #[must_use]
    pub const fn whole(tokens: u64) -> Self {
        Self {
            base_units: tokens as u128 * BASE_UNITS_PER_TOKEN,
        }
    }

    /// Get the amount in base units.
    #[must_use]
    pub const fn base_units(&self) -> u128 {
        self.base_units
    }

    /// Check if the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.base_units == 0
    }

    /// Checked addition.
    #[must_use]
    pub const fn checked_add(&self, other: Self) -> Option<Self> {
        match self.base_units.checked_add(other.base_units) {
            Some(base_units) => Some(Self { base_units }),
            None => None,
        }
    }

    /// Checked subtraction.
    #[must_use]
    pub const fn checked_sub(&self, other: Self) -> Option<Self> {
        match self.base_units.checked_sub(other.base_units) {
            Some(base_units) => Some(Self { base_units }),
            None => None,
        }
    }

    /// Saturating addition.
    #[must_use]
    pub const fn saturating_add(&self, other: Self) -> Self {
        Self {
            base_units: self.base_units.saturating_add(other.base_units),
        }
    }

    /// Saturating subtraction.
    #[must_use]
    pub const fn saturating_sub(&self, other: Self) -> Self {
        Self {
            base_units: self.base_units.saturating_sub(other.base_units),
        }
    }

    /// Compute `floor(self * percent / 100)` without intermediate overflow.
    ///
    /// Percentages above 100 are clamped to 100, so the result never exceeds
    /// the original amount.
    #[must_use]
    pub const fn percent_of(&self, percent: u8) -> Self {
        let pct = if percent > 100 { 100 } else { percent } as u128;
        let quotient = self.base_units / 100;
        let remainder = self.base_units % 100;
        Self {
            base_units: quotient * pct + remainder * pct / 100,
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.base_units / BASE_UNITS_PER_TOKEN;
        let frac = self.base_units % BASE_UNITS_PER_TOKEN;
        if frac == 0 {
            write!(f, "{whole}")
        } else {
            let digits = format!("{frac:018}");
            write!(f, "{whole}.{}", digits.trim_end_matches('0'))
        }
    }
}

impl From<u128> for Amount {
    fn from(base_units: u128) -> Self {
        Self::from_base_units(base_units)
    }
}
