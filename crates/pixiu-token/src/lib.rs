//! # pixiu-token
//!
//! Educational simulations of "honeypot" ERC-20 tokens: ledgers that look
//! standards-compliant but embed hidden rules letting anyone buy in freely
//! while selectively blocking transfers out.
//!
//! This crate provides:
//! - A balance/supply ledger with checked arithmetic
//! - An owner/whitelist/blacklist access registry
//! - Five outbound-transfer restriction policies (blacklist, hidden fee,
//!   trading kill-switch, per-transaction cap, time cooldown)
//! - A token service orchestrating the three, with atomic operations and
//!   observable transfer events
//!
//! The engine is a deterministic, in-memory state machine: every operation
//! either fully commits or fully fails, and "now" is supplied per call by
//! the host environment.
//!
//! ## Example
//!
//! ```rust
//! use chrono::Utc;
//! use pixiu_token::{Address, Amount, HoneypotToken, PolicyDenial, TokenError};
//!
//! # fn main() -> pixiu_token::Result<()> {
//! let owner = Address::from_hex("0x1111111111111111111111111111111111111111")?;
//! let buyer = Address::from_hex("0x2222222222222222222222222222222222222222")?;
//! let mut token = HoneypotToken::pixiu(owner.clone());
//!
//! // Buying always works, and silently flags the buyer.
//! token.faucet(&buyer, &buyer, Amount::whole(10), Utc::now())?;
//! assert!(token.is_blacklisted(&buyer));
//!
//! // Selling is blocked.
//! let denied = token.transfer(&buyer, &owner, Amount::whole(1), Utc::now());
//! assert_eq!(denied, Err(TokenError::Denied(PolicyDenial::Blacklisted)));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod address;
pub mod amount;
pub mod error;
pub mod event;
pub mod ledger;
pub mod policy;
pub mod registry;
pub mod shared;
pub mod token;

pub use address::Address;
pub use amount::Amount;
pub use error::{PolicyDenial, Result, TokenError};
pub use event::Event;
pub use ledger::Ledger;
pub use policy::{
    Approval, BlacklistPolicy, CooldownPolicy, HiddenFeePolicy, MaxTxPolicy, Policy, PolicyKind,
    TradingSwitchPolicy,
};
pub use registry::AccessRegistry;
pub use shared::SharedToken;
pub use token::HoneypotToken;

/// Token decimals (mirrors the 18 decimals of the original contracts).
pub const TOKEN_DECIMALS: u8 = 18;

/// One whole token in base units.
pub const BASE_UNITS_PER_TOKEN: u128 = 1_000_000_000_000_000_000;
