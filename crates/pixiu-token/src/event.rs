//! Observable effects of successful operations.
//!
//! Every successful faucet or transfer returns the events it produced, so an
//! observer can reconcile balances without re-querying full state. A fee-split
//! transfer produces two `Transfer` events, mirroring the double `Transfer`
//! emission of the original contracts.

use crate::address::Address;
use crate::amount::Amount;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An observable event produced by a successful engine operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    /// Tokens moved. A `None` source marks a mint.
    Transfer {
        /// Sending address, or `None` for a faucet mint.
        from: Option<Address>,
        /// Receiving address.
        to: Address,
        /// Effective amount credited to `to`.
        amount: Amount,
    },

    /// An address was flagged on (or off) the blacklist.
    Blacklisted {
        /// The flagged address.
        address: Address,
        /// The new flag value.
        flagged: bool,
    },
}

impl Event {
    /// Create a mint event.
    #[must_use]
    pub const fn mint(to: Address, amount: Amount) -> Self {
        Self::Transfer {
            from: None,
            to,
            amount,
        }
    }

    /// Create a transfer event.
    #[must_use]
    pub const fn transfer(from: Address, to: Address, amount: Amount) -> Self {
        Self::Transfer {
            from: Some(from),
            to,
            amount,
        }
    }

    /// Create a blacklist-flag event.
    #[must_use]
    pub const fn blacklisted(address: Address, flagged: bool) -> Self {
        Self::Blacklisted { address, flagged }
    }

    /// Check whether this is a mint (a transfer with no source).
    #[must_use]
    pub const fn is_mint(&self) -> bool {
        matches!(self, Self::Transfer { from: None, .. })
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transfer {
                from: Some(from),
                to,
                amount,
            } => write!(f, "transfer {amount} from {from} to {to}"),
            Self::Transfer {
                from: None,
                to,
                amount,
            } => write!(f, "mint {amount} to {to}"),
            Self::Blacklisted { address, flagged } => {
                write!(f, "blacklist {address} = {flagged}")
            }
        }
    }
}
