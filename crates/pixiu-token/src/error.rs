//! Error types for the honeypot token engine.
//!
//! Policy denials are split out from the rest of the taxonomy because they
//! are the deceptive surface of these tokens: deterministic, owner-recoverable
//! rejections whose display strings are the machine-readable reasons the
//! original contracts reverted with.

use crate::amount::Amount;
use crate::policy::PolicyKind;
use thiserror::Error;

/// Result type alias for token operations.
pub type Result<T> = std::result::Result<T, TokenError>;

/// Errors that can occur during token operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Invalid account address format.
    #[error("invalid address: {message}")]
    InvalidAddress {
        /// Description of the address error.
        message: String,
    },

    /// A non-owner called an owner-gated setter.
    #[error("unauthorized: only the owner may {operation}")]
    Unauthorized {
        /// The operation that was attempted.
        operation: String,
    },

    /// Transfer amount exceeds the sender's balance.
    #[error("insufficient balance: have {have}, need {need}")]
    InsufficientBalance {
        /// Current balance.
        have: Amount,
        /// Required balance.
        need: Amount,
    },

    /// A credit would exceed the representable range.
    #[error("amount overflow")]
    Overflow,

    /// A fee rate above 100 percent was supplied.
    #[error("invalid fee rate: {rate}% exceeds 100%")]
    InvalidFeeRate {
        /// The offending rate.
        rate: u8,
    },

    /// A variant-specific operation was invoked on a token built with a
    /// different policy.
    #[error("{operation} is not supported by the {policy} policy")]
    UnsupportedOperation {
        /// The operation that was attempted.
        operation: &'static str,
        /// The policy the token actually carries.
        policy: PolicyKind,
    },

    /// The transfer was denied by the token's restriction policy.
    #[error(transparent)]
    Denied(#[from] PolicyDenial),
}

impl TokenError {
    /// Create an invalid address error.
    #[must_use]
    pub fn invalid_address(message: impl Into<String>) -> Self {
        Self::InvalidAddress {
            message: message.into(),
        }
    }

    /// Create an unauthorized error.
    #[must_use]
    pub fn unauthorized(operation: impl Into<String>) -> Self {
        Self::Unauthorized {
            operation: operation.into(),
        }
    }

    /// Create an insufficient balance error.
    #[must_use]
    pub const fn insufficient_balance(have: Amount, need: Amount) -> Self {
        Self::InsufficientBalance { have, need }
    }
}

/// A policy's reason for denying an outbound transfer.
///
/// Every denial is a pure function of current state, so a denied transfer
/// keeps being denied until the owner changes policy state. Display strings
/// match the reasons the original contracts surfaced to wallets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PolicyDenial {
    /// The sender is on the blacklist.
    #[error("Sell blocked: blacklisted")]
    Blacklisted,

    /// The owner has switched trading off.
    #[error("Trading is disabled")]
    TradingDisabled,

    /// The amount exceeds the per-transaction cap.
    #[error("Exceeds max transaction amount")]
    ExceedsMaxTx,

    /// The sender's cooldown window has not yet elapsed.
    #[error("Cooldown active: {remaining_secs} seconds remaining")]
    CooldownActive {
        /// Seconds until the sender may transfer.
        remaining_secs: u64,
    },
}
