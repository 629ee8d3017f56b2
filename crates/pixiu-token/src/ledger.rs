//! Balance and supply bookkeeping.
//!
//! The ledger tracks per-address balances and the total supply. Reads of
//! absent addresses yield zero; zero balances may persist as entries. Moves
//! validate every leg before mutating anything, so a failed operation leaves
//! no partial state.

use crate::address::Address;
use crate::amount::Amount;
use crate::error::{Result, TokenError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The balance/supply ledger.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    balances: HashMap<Address, Amount>,
    total_supply: Amount,
}

impl Ledger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the balance of an address. Absent addresses read as zero.
    #[must_use]
    pub fn balance_of(&self, address: &Address) -> Amount {
        self.balances.get(address).copied().unwrap_or(Amount::ZERO)
    }

    /// Get the total supply.
    #[must_use]
    pub const fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Mint: raise `address`'s balance and the total supply by `amount`.
    ///
    /// # Errors
    ///
    /// Returns `Overflow` if either addition exceeds the representable range.
    pub fn credit(&mut self, address: &Address, amount: Amount) -> Result<()> {
        let new_balance = self
            .balance_of(address)
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;
        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(TokenError::Overflow)?;

        self.balances.insert(address.clone(), new_balance);
        self.total_supply = new_supply;
        Ok(())
    }

    /// Lower `address`'s balance by `amount`. The supply is untouched: this
    /// is the low-level half of a move and is always paired with a credit by
    /// the callers of the public surface (there is no burn).
    ///
    /// # Errors
    ///
    /// Returns `InsufficientBalance` if the balance is short.
    pub fn debit(&mut self, address: &Address, amount: Amount) -> Result<()> {
        let have = self.balance_of(address);
        let new_balance = have
            .checked_sub(amount)
            .ok_or(TokenError::insufficient_balance(have, amount))?;
        self.balances.insert(address.clone(), new_balance);
        Ok(())
    }

    /// Atomically move `amount` from `from` to `to`. The supply is unchanged.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientBalance` or `Overflow`; on error no balance moves.
    pub fn transfer(&mut self, from: &Address, to: &Address, amount: Amount) -> Result<()> {
        self.apply(from, amount, &[(to, amount)])
    }

    /// Atomically move `amount` out of `from`, splitting it between `to`
    /// (which receives `amount - fee`) and `collector` (which receives the
    /// fee). Correct when the three addresses alias each other.
    ///
    /// # Errors
    ///
    /// Returns `Overflow` if `fee > amount`, `InsufficientBalance` or
    /// `Overflow` for the legs; on error no balance moves.
    pub fn transfer_with_fee(
        &mut self,
        from: &Address,
        to: &Address,
        collector: &Address,
        amount: Amount,
        fee: Amount,
    ) -> Result<()> {
        let remainder = amount.checked_sub(fee).ok_or(TokenError::Overflow)?;
        self.apply(from, amount, &[(to, remainder), (collector, fee)])
    }

    /// Stage one debit plus a set of credits, committing only if every leg
    /// fits. Staging resolves aliased addresses sequentially, so self-sends
    /// and `to == collector` splits come out right.
    fn apply(
        &mut self,
        from: &Address,
        amount: Amount,
        credits: &[(&Address, Amount)],
    ) -> Result<()> {
        let mut staged: HashMap<Address, Amount> = HashMap::with_capacity(1 + credits.len());

        let have = self.balance_of(from);
        let debited = have
            .checked_sub(amount)
            .ok_or(TokenError::insufficient_balance(have, amount))?;
        staged.insert(from.clone(), debited);

        for (address, credit) in credits {
            let current = staged
                .get(*address)
                .copied()
                .unwrap_or_else(|| self.balance_of(address));
            let next = current.checked_add(*credit).ok_or(TokenError::Overflow)?;
            staged.insert((*address).clone(), next);
        }

        self.balances.extend(staged);
        Ok(())
    }
}
