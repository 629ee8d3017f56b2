//! Owner, whitelist, and blacklist bookkeeping.
//!
//! The whitelist is the engine's universal escape hatch: membership overrides
//! the blacklist and every policy denial. The owner is seeded onto the
//! whitelist at construction and cannot be changed afterwards.

use crate::address::Address;
use crate::error::{Result, TokenError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Owner identity plus whitelist/blacklist sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessRegistry {
    owner: Address,
    whitelist: HashSet<Address>,
    blacklist: HashSet<Address>,
}

impl AccessRegistry {
    /// Create a registry with `owner` seeded onto the whitelist.
    #[must_use]
    pub fn new(owner: Address) -> Self {
        let mut whitelist = HashSet::new();
        whitelist.insert(owner.clone());
        Self {
            owner,
            whitelist,
            blacklist: HashSet::new(),
        }
    }

    /// Get the owner address.
    #[must_use]
    pub const fn owner(&self) -> &Address {
        &self.owner
    }

    /// Check whether `caller` is the owner.
    #[must_use]
    pub fn is_owner(&self, caller: &Address) -> bool {
        *caller == self.owner
    }

    /// Check whether an address is whitelisted.
    #[must_use]
    pub fn is_whitelisted(&self, address: &Address) -> bool {
        self.whitelist.contains(address)
    }

    /// Check whether an address is blacklisted.
    #[must_use]
    pub fn is_blacklisted(&self, address: &Address) -> bool {
        self.blacklist.contains(address)
    }

    /// Add or remove `address` from the whitelist.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` unless `caller` is the owner.
    pub fn set_whitelist(&mut self, caller: &Address, address: &Address, listed: bool) -> Result<()> {
        self.require_owner(caller, "change the whitelist")?;
        if listed {
            self.whitelist.insert(address.clone());
        } else {
            self.whitelist.remove(address);
        }
        Ok(())
    }

    /// Add or remove `address` from the blacklist.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` unless `caller` is the owner.
    pub fn set_blacklist(&mut self, caller: &Address, address: &Address, listed: bool) -> Result<()> {
        self.require_owner(caller, "change the blacklist")?;
        self.force_blacklist(address, listed);
        Ok(())
    }

    /// Flip the blacklist flag without an owner check. Reserved for the
    /// engine's own mint-time side effects.
    pub(crate) fn force_blacklist(&mut self, address: &Address, listed: bool) {
        if listed {
            self.blacklist.insert(address.clone());
        } else {
            self.blacklist.remove(address);
        }
    }

    /// Fail with `Unauthorized` unless `caller` is the owner.
    pub(crate) fn require_owner(&self, caller: &Address, operation: &str) -> Result<()> {
        if self.is_owner(caller) {
            Ok(())
        } else {
            Err(TokenError::unauthorized(operation))
        }
    }
}
