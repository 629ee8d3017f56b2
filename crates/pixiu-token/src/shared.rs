//! Shared handle for concurrent hosts.
//!
//! The engine itself is a single-threaded state machine; policy evaluation
//! reads several pieces of state (balance, whitelist, blacklist, timestamps)
//! that must be observed consistently relative to the mutation that follows,
//! so fine-grained locking is unsafe. Hosts that call from multiple threads
//! wrap the whole token behind this one lock.

use crate::address::Address;
use crate::amount::Amount;
use crate::error::Result;
use crate::event::Event;
use crate::token::HoneypotToken;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::Arc;

/// A cheaply cloneable, thread-safe handle to a [`HoneypotToken`].
///
/// Every operation takes the single engine lock for its full duration.
#[derive(Debug, Clone)]
pub struct SharedToken {
    inner: Arc<Mutex<HoneypotToken>>,
}

impl SharedToken {
    /// Wrap a token behind a single serialization point.
    #[must_use]
    pub fn new(token: HoneypotToken) -> Self {
        Self {
            inner: Arc::new(Mutex::new(token)),
        }
    }

    /// Open mint (see [`HoneypotToken::faucet`]).
    ///
    /// # Errors
    ///
    /// Returns `Overflow` if the credit would exceed the representable range.
    pub fn faucet(
        &self,
        caller: &Address,
        to: &Address,
        amount: Amount,
        now: DateTime<Utc>,
    ) -> Result<Vec<Event>> {
        self.inner.lock().faucet(caller, to, amount, now)
    }

    /// Guarded transfer (see [`HoneypotToken::transfer`]).
    ///
    /// # Errors
    ///
    /// Returns `InsufficientBalance`, a policy denial, or `Overflow`.
    pub fn transfer(
        &self,
        caller: &Address,
        to: &Address,
        amount: Amount,
        now: DateTime<Utc>,
    ) -> Result<Vec<Event>> {
        self.inner.lock().transfer(caller, to, amount, now)
    }

    /// Balance of an address.
    #[must_use]
    pub fn balance_of(&self, address: &Address) -> Amount {
        self.inner.lock().balance_of(address)
    }

    /// Total minted supply.
    #[must_use]
    pub fn total_supply(&self) -> Amount {
        self.inner.lock().total_supply()
    }

    /// The owner address.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.inner.lock().owner().clone()
    }

    /// Run a read against the locked token.
    pub fn read<R>(&self, f: impl FnOnce(&HoneypotToken) -> R) -> R {
        f(&self.inner.lock())
    }

    /// Run a mutation against the locked token.
    pub fn write<R>(&self, f: impl FnOnce(&mut HoneypotToken) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
