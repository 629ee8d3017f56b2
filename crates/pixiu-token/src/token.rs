//! The token service: public operation surface over ledger, registry, and
//! policy.
//!
//! Every operation is atomic: it either fully commits or returns an error
//! with no state change. Balance sufficiency is checked before the policy
//! runs, the policy decides, and only then does the ledger move. Mint-time
//! side effects (auto-blacklist, cooldown stamping) are explicit post-credit
//! hooks here rather than hidden inside the ledger.
//!
//! Zero-amount and self-transfers go through the full normal path: the
//! balance check, the policy, the ledger move, and the events. A blacklisted
//! sender is denied even for zero.

use crate::address::Address;
use crate::amount::Amount;
use crate::error::{Result, TokenError};
use crate::event::Event;
use crate::ledger::Ledger;
use crate::policy::{Policy, PolicyKind};
use crate::registry::AccessRegistry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// A fungible-token ledger with a hidden outbound-transfer restriction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoneypotToken {
    name: String,
    symbol: String,
    ledger: Ledger,
    registry: AccessRegistry,
    policy: Policy,
}

impl HoneypotToken {
    /// Create a token with the given metadata, owner, and policy.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        owner: Address,
        policy: Policy,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            ledger: Ledger::new(),
            registry: AccessRegistry::new(owner),
            policy,
        }
    }

    /// The classic honeypot: buyers are blacklisted the moment they buy.
    #[must_use]
    pub fn pixiu(owner: Address) -> Self {
        Self::new("Pixiu Token", "PIXIU", owner, Policy::blacklist())
    }

    /// Sells silently lose 90% to the owner.
    #[must_use]
    pub fn hidden_fee(owner: Address) -> Self {
        Self::new("Hidden Fee Token", "HFEE", owner, Policy::hidden_fee())
    }

    /// The owner can switch all trading off.
    #[must_use]
    pub fn trading_switch(owner: Address) -> Self {
        Self::new(
            "Trading Switch Token",
            "TSWITCH",
            owner,
            Policy::trading_switch(),
        )
    }

    /// A per-transaction cap that starts at zero.
    #[must_use]
    pub fn max_tx(owner: Address) -> Self {
        Self::new("Max Tx Token", "MAXTX", owner, Policy::max_tx())
    }

    /// Sellers must wait 365 days after receiving before they can sell.
    #[must_use]
    pub fn cooldown(owner: Address) -> Self {
        Self::new("Cooldown Token", "COOL", owner, Policy::cooldown())
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Token name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Token symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The owner address.
    #[must_use]
    pub const fn owner(&self) -> &Address {
        self.registry.owner()
    }

    /// Which restriction policy this token carries.
    #[must_use]
    pub const fn policy_kind(&self) -> PolicyKind {
        self.policy.kind()
    }

    /// The policy itself, for callers that want to inspect variant state.
    #[must_use]
    pub const fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Balance of an address. Absent addresses read as zero.
    #[must_use]
    pub fn balance_of(&self, address: &Address) -> Amount {
        self.ledger.balance_of(address)
    }

    /// Total minted supply.
    #[must_use]
    pub const fn total_supply(&self) -> Amount {
        self.ledger.total_supply()
    }

    /// Whether an address is whitelisted.
    #[must_use]
    pub fn is_whitelisted(&self, address: &Address) -> bool {
        self.registry.is_whitelisted(address)
    }

    /// Whether an address is blacklisted.
    #[must_use]
    pub fn is_blacklisted(&self, address: &Address) -> bool {
        self.registry.is_blacklisted(address)
    }

    /// Auto-blacklist flag. `None` unless this is the blacklist variant.
    #[must_use]
    pub const fn auto_blacklist(&self) -> Option<bool> {
        match &self.policy {
            Policy::Blacklist(policy) => Some(policy.auto_blacklist()),
            _ => None,
        }
    }

    /// Buy fee in percent. `None` unless this is the hidden-fee variant.
    #[must_use]
    pub const fn buy_fee(&self) -> Option<u8> {
        match &self.policy {
            Policy::HiddenFee(policy) => Some(policy.buy_fee()),
            _ => None,
        }
    }

    /// Sell fee in percent. `None` unless this is the hidden-fee variant.
    #[must_use]
    pub const fn sell_fee(&self) -> Option<u8> {
        match &self.policy {
            Policy::HiddenFee(policy) => Some(policy.sell_fee()),
            _ => None,
        }
    }

    /// Trading switch state. `None` unless this is the trading-switch variant.
    #[must_use]
    pub const fn trading_enabled(&self) -> Option<bool> {
        match &self.policy {
            Policy::TradingSwitch(policy) => Some(policy.trading_enabled()),
            _ => None,
        }
    }

    /// Per-transaction cap. `None` unless this is the max-tx variant.
    #[must_use]
    pub const fn max_tx_amount(&self) -> Option<Amount> {
        match &self.policy {
            Policy::MaxTx(policy) => Some(policy.max_tx_amount()),
            _ => None,
        }
    }

    /// Cooldown window in seconds. `None` unless this is the cooldown variant.
    #[must_use]
    pub const fn cooldown_secs(&self) -> Option<u64> {
        match &self.policy {
            Policy::Cooldown(policy) => Some(policy.cooldown_secs()),
            _ => None,
        }
    }

    /// Seconds until `address` may transfer out. `None` unless this is the
    /// cooldown variant; zero means unblocked.
    #[must_use]
    pub fn remaining_cooldown(&self, address: &Address, now: DateTime<Utc>) -> Option<u64> {
        match &self.policy {
            Policy::Cooldown(policy) => Some(policy.remaining_secs(address, now)),
            _ => None,
        }
    }

    /// When `address` last received tokens. `None` for other variants, and
    /// for addresses that never received anything.
    #[must_use]
    pub fn last_receive_time(&self, address: &Address) -> Option<DateTime<Utc>> {
        match &self.policy {
            Policy::Cooldown(policy) => policy.last_receive_time(address),
            _ => None,
        }
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Open mint, simulating a "buy". Always succeeds when the arithmetic is
    /// valid: no policy ever denies a faucet call.
    ///
    /// Variant behavior: the hidden-fee token shaves the buy fee off the
    /// minted amount for non-whitelisted recipients; the blacklist token
    /// flags non-whitelisted recipients when auto-blacklist is on; the
    /// cooldown token stamps the recipient's receive time.
    ///
    /// # Errors
    ///
    /// Returns `Overflow` if the credit would exceed the representable range.
    pub fn faucet(
        &mut self,
        caller: &Address,
        to: &Address,
        amount: Amount,
        now: DateTime<Utc>,
    ) -> Result<Vec<Event>> {
        let minted = match &self.policy {
            Policy::HiddenFee(policy) if !self.registry.is_whitelisted(to) => {
                policy.buy_adjusted(amount)
            }
            _ => amount,
        };
        self.ledger.credit(to, minted)?;

        let mut events = vec![Event::mint(to.clone(), minted)];
        match &mut self.policy {
            Policy::Blacklist(policy)
                if policy.auto_blacklist() && !self.registry.is_whitelisted(to) =>
            {
                self.registry.force_blacklist(to, true);
                events.push(Event::blacklisted(to.clone(), true));
            }
            Policy::Cooldown(policy) => policy.note_credit(to, now),
            _ => {}
        }

        info!(
            caller = %caller,
            to = %to,
            minted = %minted,
            "faucet mint"
        );
        Ok(events)
    }

    /// Guarded transfer out of the caller's balance.
    ///
    /// Balance sufficiency is checked before policy evaluation; on a policy
    /// denial the ledger is untouched. An approved hidden-fee transfer emits
    /// two events: the remainder to the recipient and the fee to the owner.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientBalance`, a policy denial, or `Overflow`.
    pub fn transfer(
        &mut self,
        caller: &Address,
        to: &Address,
        amount: Amount,
        now: DateTime<Utc>,
    ) -> Result<Vec<Event>> {
        let have = self.ledger.balance_of(caller);
        if have < amount {
            return Err(TokenError::insufficient_balance(have, amount));
        }

        let approval = self.policy.authorize(&self.registry, caller, amount, now)?;

        if approval.owner_fee.is_zero() {
            self.ledger.transfer(caller, to, amount)?;
        } else {
            let owner = self.registry.owner().clone();
            self.ledger
                .transfer_with_fee(caller, to, &owner, amount, approval.owner_fee)?;
        }

        // Receiving a transfer resets the recipient's cooldown clock just
        // like a faucet mint does.
        if let Policy::Cooldown(policy) = &mut self.policy {
            policy.note_credit(to, now);
        }

        let mut events = vec![Event::transfer(
            caller.clone(),
            to.clone(),
            approval.recipient_amount,
        )];
        if !approval.owner_fee.is_zero() {
            events.push(Event::transfer(
                caller.clone(),
                self.registry.owner().clone(),
                approval.owner_fee,
            ));
        }

        debug!(
            from = %caller,
            to = %to,
            amount = %amount,
            fee = %approval.owner_fee,
            "transfer completed"
        );
        Ok(events)
    }

    /// Add or remove an address from the whitelist. Owner only.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` unless `caller` is the owner.
    pub fn set_whitelist(&mut self, caller: &Address, address: &Address, listed: bool) -> Result<()> {
        self.registry.set_whitelist(caller, address, listed)?;
        info!(address = %address, listed, "whitelist updated");
        Ok(())
    }

    /// Add or remove an address from the blacklist. Owner only.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` unless `caller` is the owner.
    pub fn set_blacklist(&mut self, caller: &Address, address: &Address, listed: bool) -> Result<()> {
        self.registry.set_blacklist(caller, address, listed)?;
        info!(address = %address, listed, "blacklist updated");
        Ok(())
    }

    /// Toggle auto-blacklisting of faucet recipients. Owner only, blacklist
    /// variant only.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for non-owners, `UnsupportedOperation` for
    /// other variants.
    pub fn set_auto_blacklist(&mut self, caller: &Address, enabled: bool) -> Result<()> {
        self.registry.require_owner(caller, "toggle auto-blacklist")?;
        match &mut self.policy {
            Policy::Blacklist(policy) => {
                policy.set_auto_blacklist(enabled);
                info!(enabled, "auto-blacklist updated");
                Ok(())
            }
            other => Err(TokenError::UnsupportedOperation {
                operation: "set_auto_blacklist",
                policy: other.kind(),
            }),
        }
    }

    /// Set buy and sell fee rates in percent. Owner only, hidden-fee variant
    /// only.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for non-owners, `InvalidFeeRate` above 100%,
    /// `UnsupportedOperation` for other variants.
    pub fn set_fees(&mut self, caller: &Address, buy_fee: u8, sell_fee: u8) -> Result<()> {
        self.registry.require_owner(caller, "adjust fees")?;
        match &mut self.policy {
            Policy::HiddenFee(policy) => {
                policy.set_fees(buy_fee, sell_fee)?;
                info!(buy_fee, sell_fee, "fees updated");
                Ok(())
            }
            other => Err(TokenError::UnsupportedOperation {
                operation: "set_fees",
                policy: other.kind(),
            }),
        }
    }

    /// Switch trading on or off. Owner only, trading-switch variant only.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for non-owners, `UnsupportedOperation` for
    /// other variants.
    pub fn set_trading_enabled(&mut self, caller: &Address, enabled: bool) -> Result<()> {
        self.registry.require_owner(caller, "toggle trading")?;
        match &mut self.policy {
            Policy::TradingSwitch(policy) => {
                policy.set_trading_enabled(enabled);
                info!(enabled, "trading switch updated");
                Ok(())
            }
            other => Err(TokenError::UnsupportedOperation {
                operation: "set_trading_enabled",
                policy: other.kind(),
            }),
        }
    }

    /// Set the per-transaction cap. Owner only, max-tx variant only.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for non-owners, `UnsupportedOperation` for
    /// other variants.
    pub fn set_max_tx_amount(&mut self, caller: &Address, cap: Amount) -> Result<()> {
        self.registry.require_owner(caller, "set the max-tx cap")?;
        match &mut self.policy {
            Policy::MaxTx(policy) => {
                policy.set_max_tx_amount(cap);
                info!(cap = %cap, "max-tx cap updated");
                Ok(())
            }
            other => Err(TokenError::UnsupportedOperation {
                operation: "set_max_tx_amount",
                policy: other.kind(),
            }),
        }
    }

    /// Set the cooldown window in seconds. Owner only, cooldown variant only.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for non-owners, `UnsupportedOperation` for
    /// other variants.
    pub fn set_cooldown(&mut self, caller: &Address, secs: u64) -> Result<()> {
        self.registry.require_owner(caller, "set the cooldown")?;
        match &mut self.policy {
            Policy::Cooldown(policy) => {
                policy.set_cooldown_secs(secs);
                info!(secs, "cooldown updated");
                Ok(())
            }
            other => Err(TokenError::UnsupportedOperation {
                operation: "set_cooldown",
                policy: other.kind(),
            }),
        }
    }
}
