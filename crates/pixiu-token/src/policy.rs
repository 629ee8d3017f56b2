//! The five outbound-transfer restriction policies.
//!
//! Each policy is a pure guard evaluated fresh on every transfer against
//! current registry/policy state: no multi-step handshake, no hidden
//! coupling. The whitelist check is evaluated strictly first and
//! short-circuits everything else. Policies never run for faucet mints;
//! mint-time side effects (auto-blacklist, cooldown stamping) are explicit
//! hooks invoked by the token service.
//!
//! Defaults reproduce the traps of the original contracts: a max-tx cap of
//! zero, a 365-day cooldown, a 90% sell fee, auto-blacklist switched on.

use crate::address::Address;
use crate::amount::Amount;
use crate::error::{PolicyDenial, Result, TokenError};
use crate::registry::AccessRegistry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Default sell fee of the hidden-fee token (percent).
pub const DEFAULT_SELL_FEE_PERCENT: u8 = 90;

/// Default buy fee of the hidden-fee token (percent).
pub const DEFAULT_BUY_FEE_PERCENT: u8 = 0;

/// Default cooldown of the cooldown token: 365 days.
pub const DEFAULT_COOLDOWN_SECS: u64 = 365 * 24 * 60 * 60;

/// Which restriction policy a token carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// Senders on the blacklist are denied; buyers are flagged on faucet.
    Blacklist,
    /// A hidden percentage of every sell is redirected to the owner.
    HiddenFee,
    /// A global owner-controlled kill switch.
    TradingSwitch,
    /// A per-transaction amount cap.
    MaxTx,
    /// A minimum elapsed time since the sender last received tokens.
    Cooldown,
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blacklist => write!(f, "blacklist"),
            Self::HiddenFee => write!(f, "hidden-fee"),
            Self::TradingSwitch => write!(f, "trading-switch"),
            Self::MaxTx => write!(f, "max-tx"),
            Self::Cooldown => write!(f, "cooldown"),
        }
    }
}

/// An approved transfer: how the debited amount lands.
///
/// `recipient_amount + owner_fee` always equals the amount the sender is
/// debited, so conservation holds exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Approval {
    /// Amount credited to the recipient.
    pub recipient_amount: Amount,
    /// Amount redirected to the owner.
    pub owner_fee: Amount,
}

impl Approval {
    /// The full amount reaches the recipient.
    #[must_use]
    pub const fn full(amount: Amount) -> Self {
        Self {
            recipient_amount: amount,
            owner_fee: Amount::ZERO,
        }
    }

    /// Split the amount between recipient and owner.
    #[must_use]
    pub const fn with_fee(recipient_amount: Amount, owner_fee: Amount) -> Self {
        Self {
            recipient_amount,
            owner_fee,
        }
    }
}

/// Blacklist policy state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlacklistPolicy {
    auto_blacklist: bool,
}

impl Default for BlacklistPolicy {
    fn default() -> Self {
        Self {
            auto_blacklist: true,
        }
    }
}

impl BlacklistPolicy {
    /// Whether faucet mints flag non-whitelisted recipients.
    #[must_use]
    pub const fn auto_blacklist(&self) -> bool {
        self.auto_blacklist
    }

    pub(crate) const fn set_auto_blacklist(&mut self, enabled: bool) {
        self.auto_blacklist = enabled;
    }
}

/// Hidden-fee policy state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HiddenFeePolicy {
    buy_fee: u8,
    sell_fee: u8,
}

impl Default for HiddenFeePolicy {
    fn default() -> Self {
        Self {
            buy_fee: DEFAULT_BUY_FEE_PERCENT,
            sell_fee: DEFAULT_SELL_FEE_PERCENT,
        }
    }
}

impl HiddenFeePolicy {
    /// Buy fee in percent.
    #[must_use]
    pub const fn buy_fee(&self) -> u8 {
        self.buy_fee
    }

    /// Sell fee in percent.
    #[must_use]
    pub const fn sell_fee(&self) -> u8 {
        self.sell_fee
    }

    /// How much of a faucet request actually gets minted.
    #[must_use]
    pub const fn buy_adjusted(&self, amount: Amount) -> Amount {
        amount.saturating_sub(amount.percent_of(self.buy_fee))
    }

    pub(crate) fn set_fees(&mut self, buy_fee: u8, sell_fee: u8) -> Result<()> {
        for rate in [buy_fee, sell_fee] {
            if rate > 100 {
                return Err(TokenError::InvalidFeeRate { rate });
            }
        }
        self.buy_fee = buy_fee;
        self.sell_fee = sell_fee;
        Ok(())
    }
}

/// Trading-switch policy state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradingSwitchPolicy {
    trading_enabled: bool,
}

impl Default for TradingSwitchPolicy {
    fn default() -> Self {
        Self {
            trading_enabled: true,
        }
    }
}

impl TradingSwitchPolicy {
    /// Whether trading is currently enabled.
    #[must_use]
    pub const fn trading_enabled(&self) -> bool {
        self.trading_enabled
    }

    pub(crate) const fn set_trading_enabled(&mut self, enabled: bool) {
        self.trading_enabled = enabled;
    }
}

/// Max-transaction policy state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaxTxPolicy {
    // Zero by default: every non-whitelisted transfer above zero is trapped.
    max_tx_amount: Amount,
}

impl MaxTxPolicy {
    /// The per-transaction cap.
    #[must_use]
    pub const fn max_tx_amount(&self) -> Amount {
        self.max_tx_amount
    }

    pub(crate) const fn set_max_tx_amount(&mut self, cap: Amount) {
        self.max_tx_amount = cap;
    }
}

/// Cooldown policy state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CooldownPolicy {
    cooldown_secs: u64,
    last_receive: HashMap<Address, DateTime<Utc>>,
}

impl Default for CooldownPolicy {
    fn default() -> Self {
        Self {
            cooldown_secs: DEFAULT_COOLDOWN_SECS,
            last_receive: HashMap::new(),
        }
    }
}

impl CooldownPolicy {
    /// The cooldown window in seconds.
    #[must_use]
    pub const fn cooldown_secs(&self) -> u64 {
        self.cooldown_secs
    }

    /// When `address` last received tokens, if ever.
    #[must_use]
    pub fn last_receive_time(&self, address: &Address) -> Option<DateTime<Utc>> {
        self.last_receive.get(address).copied()
    }

    /// Seconds until `address` may transfer out. Zero means unblocked;
    /// an address that never received tokens is never blocked.
    #[must_use]
    pub fn remaining_secs(&self, address: &Address, now: DateTime<Utc>) -> u64 {
        let Some(last) = self.last_receive.get(address) else {
            return 0;
        };
        let elapsed_secs = now.signed_duration_since(*last).num_seconds().max(0) as u64;
        self.cooldown_secs.saturating_sub(elapsed_secs)
    }

    /// Stamp `address` as having just received tokens. Every credit resets
    /// the clock, faucet mints and transfer credits alike.
    pub(crate) fn note_credit(&mut self, address: &Address, now: DateTime<Utc>) {
        self.last_receive.insert(address.clone(), now);
    }

    pub(crate) const fn set_cooldown_secs(&mut self, secs: u64) {
        self.cooldown_secs = secs;
    }
}

/// The variant-specific guard governing outbound transfers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Blacklist variant.
    Blacklist(BlacklistPolicy),
    /// Hidden-fee variant.
    HiddenFee(HiddenFeePolicy),
    /// Trading-switch variant.
    TradingSwitch(TradingSwitchPolicy),
    /// Max-transaction variant.
    MaxTx(MaxTxPolicy),
    /// Cooldown variant.
    Cooldown(CooldownPolicy),
}

impl Policy {
    /// Blacklist policy with auto-blacklist on.
    #[must_use]
    pub fn blacklist() -> Self {
        Self::Blacklist(BlacklistPolicy::default())
    }

    /// Hidden-fee policy with a 90% sell fee and free buys.
    #[must_use]
    pub fn hidden_fee() -> Self {
        Self::HiddenFee(HiddenFeePolicy::default())
    }

    /// Trading-switch policy with trading initially enabled.
    #[must_use]
    pub fn trading_switch() -> Self {
        Self::TradingSwitch(TradingSwitchPolicy::default())
    }

    /// Max-transaction policy with a cap of zero.
    #[must_use]
    pub fn max_tx() -> Self {
        Self::MaxTx(MaxTxPolicy::default())
    }

    /// Cooldown policy with a 365-day window.
    #[must_use]
    pub fn cooldown() -> Self {
        Self::Cooldown(CooldownPolicy::default())
    }

    /// Which variant this policy is.
    #[must_use]
    pub const fn kind(&self) -> PolicyKind {
        match self {
            Self::Blacklist(_) => PolicyKind::Blacklist,
            Self::HiddenFee(_) => PolicyKind::HiddenFee,
            Self::TradingSwitch(_) => PolicyKind::TradingSwitch,
            Self::MaxTx(_) => PolicyKind::MaxTx,
            Self::Cooldown(_) => PolicyKind::Cooldown,
        }
    }

    /// Decide whether `from` may transfer `amount` out right now, and how the
    /// amount lands if so.
    ///
    /// Whitelisted senders are approved in full before any variant rule runs.
    ///
    /// # Errors
    ///
    /// Returns the variant's denial reason.
    pub fn authorize(
        &self,
        registry: &AccessRegistry,
        from: &Address,
        amount: Amount,
        now: DateTime<Utc>,
    ) -> std::result::Result<Approval, PolicyDenial> {
        if registry.is_whitelisted(from) {
            return Ok(Approval::full(amount));
        }

        match self {
            Self::Blacklist(_) => {
                if registry.is_blacklisted(from) {
                    Err(PolicyDenial::Blacklisted)
                } else {
                    Ok(Approval::full(amount))
                }
            }
            Self::HiddenFee(policy) => {
                let fee = amount.percent_of(policy.sell_fee());
                let remainder = amount.saturating_sub(fee);
                Ok(Approval::with_fee(remainder, fee))
            }
            Self::TradingSwitch(policy) => {
                if policy.trading_enabled() {
                    Ok(Approval::full(amount))
                } else {
                    Err(PolicyDenial::TradingDisabled)
                }
            }
            Self::MaxTx(policy) => {
                if amount > policy.max_tx_amount() {
                    Err(PolicyDenial::ExceedsMaxTx)
                } else {
                    Ok(Approval::full(amount))
                }
            }
            Self::Cooldown(policy) => match policy.remaining_secs(from, now) {
                0 => Ok(Approval::full(amount)),
                remaining_secs => Err(PolicyDenial::CooldownActive { remaining_secs }),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn addr(byte: u8) -> Address {
        Address::from_bytes(&[byte; 20]).expect("should create")
    }

    fn registry() -> AccessRegistry {
        AccessRegistry::new(addr(1))
    }

    #[test]
    fn test_whitelist_short_circuits_every_variant() {
        let mut reg = registry();
        reg.set_whitelist(&addr(1), &addr(2), true)
            .expect("should set");
        reg.set_blacklist(&addr(1), &addr(2), true)
            .expect("should set");

        let policies = [
            Policy::blacklist(),
            Policy::hidden_fee(),
            Policy::trading_switch(),
            Policy::max_tx(),
            Policy::cooldown(),
        ];
        for policy in policies {
            let approval = policy
                .authorize(&reg, &addr(2), Amount::whole(10), Utc::now())
                .expect("whitelisted sender must be approved");
            assert_eq!(approval, Approval::full(Amount::whole(10)));
        }
    }

    #[test]
    fn test_blacklist_denies_flagged_sender() {
        let mut reg = registry();
        reg.set_blacklist(&addr(1), &addr(2), true)
            .expect("should set");

        let result = Policy::blacklist().authorize(&reg, &addr(2), Amount::whole(1), Utc::now());
        assert_eq!(result, Err(PolicyDenial::Blacklisted));
    }

    #[test]
    fn test_blacklist_allows_clean_sender() {
        let reg = registry();
        let result = Policy::blacklist().authorize(&reg, &addr(2), Amount::whole(1), Utc::now());
        assert!(result.is_ok());
    }

    #[test]
    fn test_hidden_fee_splits_ninety_percent() {
        let reg = registry();
        let approval = Policy::hidden_fee()
            .authorize(&reg, &addr(2), Amount::whole(100), Utc::now())
            .expect("hidden fee never denies");

        assert_eq!(approval.owner_fee, Amount::whole(90));
        assert_eq!(approval.recipient_amount, Amount::whole(10));
    }

    #[test]
    fn test_hidden_fee_conserves_amount_exactly() {
        let reg = registry();
        // An amount that does not divide evenly by 100.
        let amount = Amount::from_base_units(12_345);
        let approval = Policy::hidden_fee()
            .authorize(&reg, &addr(2), amount, Utc::now())
            .expect("hidden fee never denies");

        let total = approval
            .recipient_amount
            .checked_add(approval.owner_fee)
            .expect("no overflow");
        assert_eq!(total, amount);
    }

    #[test]
    fn test_trading_switch_denies_when_off() {
        let reg = registry();
        let mut switch = TradingSwitchPolicy::default();
        switch.set_trading_enabled(false);
        let policy = Policy::TradingSwitch(switch);

        let result = policy.authorize(&reg, &addr(2), Amount::whole(1), Utc::now());
        assert_eq!(result, Err(PolicyDenial::TradingDisabled));
    }

    #[test]
    fn test_trading_switch_allows_by_default() {
        let reg = registry();
        let result =
            Policy::trading_switch().authorize(&reg, &addr(2), Amount::whole(1), Utc::now());
        assert!(result.is_ok());
    }

    #[test]
    fn test_max_tx_zero_cap_traps_everything() {
        let reg = registry();
        let result = Policy::max_tx().authorize(
            &reg,
            &addr(2),
            Amount::from_base_units(1),
            Utc::now(),
        );
        assert_eq!(result, Err(PolicyDenial::ExceedsMaxTx));
    }

    #[test]
    fn test_max_tx_zero_amount_passes_zero_cap() {
        let reg = registry();
        let result = Policy::max_tx().authorize(&reg, &addr(2), Amount::ZERO, Utc::now());
        assert!(result.is_ok());
    }

    #[test]
    fn test_max_tx_raised_cap_allows() {
        let reg = registry();
        let mut cap = MaxTxPolicy::default();
        cap.set_max_tx_amount(Amount::whole(1000));
        let policy = Policy::MaxTx(cap);

        let result = policy.authorize(&reg, &addr(2), Amount::whole(50), Utc::now());
        assert!(result.is_ok());
    }

    #[test]
    fn test_cooldown_never_blocks_fresh_address() {
        let reg = registry();
        let result = Policy::cooldown().authorize(&reg, &addr(2), Amount::whole(1), Utc::now());
        assert!(result.is_ok());
    }

    #[test]
    fn test_cooldown_blocks_within_window() {
        let reg = registry();
        let now = Utc::now();
        let mut cooldown = CooldownPolicy::default();
        cooldown.note_credit(&addr(2), now);
        let policy = Policy::Cooldown(cooldown);

        let result = policy.authorize(&reg, &addr(2), Amount::whole(1), now);
        assert_eq!(
            result,
            Err(PolicyDenial::CooldownActive {
                remaining_secs: DEFAULT_COOLDOWN_SECS,
            })
        );
    }

    #[test]
    fn test_cooldown_unblocks_after_window() {
        let reg = registry();
        let now = Utc::now();
        let mut cooldown = CooldownPolicy::default();
        cooldown.set_cooldown_secs(60);
        cooldown.note_credit(&addr(2), now);
        let policy = Policy::Cooldown(cooldown);

        let later = now + Duration::seconds(61);
        let result = policy.authorize(&reg, &addr(2), Amount::whole(1), later);
        assert!(result.is_ok());
    }

    #[test]
    fn test_cooldown_remaining_counts_down() {
        let now = Utc::now();
        let mut cooldown = CooldownPolicy::default();
        cooldown.set_cooldown_secs(100);
        cooldown.note_credit(&addr(2), now);

        assert_eq!(cooldown.remaining_secs(&addr(2), now), 100);
        assert_eq!(
            cooldown.remaining_secs(&addr(2), now + Duration::seconds(40)),
            60
        );
        assert_eq!(
            cooldown.remaining_secs(&addr(2), now + Duration::seconds(200)),
            0
        );
    }

    #[test]
    fn test_cooldown_clock_going_backwards_does_not_underflow() {
        let now = Utc::now();
        let mut cooldown = CooldownPolicy::default();
        cooldown.set_cooldown_secs(100);
        cooldown.note_credit(&addr(2), now);

        let earlier = now - Duration::seconds(30);
        assert_eq!(cooldown.remaining_secs(&addr(2), earlier), 100);
    }

    #[test]
    fn test_fee_validation() {
        let mut fees = HiddenFeePolicy::default();
        assert!(fees.set_fees(5, 99).is_ok());
        assert_eq!(fees.buy_fee(), 5);
        assert_eq!(fees.sell_fee(), 99);

        let result = fees.set_fees(0, 101);
        assert_eq!(result, Err(TokenError::InvalidFeeRate { rate: 101 }));
        // Rejected update leaves rates untouched.
        assert_eq!(fees.sell_fee(), 99);
    }

    #[test]
    fn test_buy_adjusted_mint() {
        let mut fees = HiddenFeePolicy::default();
        fees.set_fees(25, 90).expect("should set");
        assert_eq!(fees.buy_adjusted(Amount::whole(100)), Amount::whole(75));
    }

    #[test]
    fn test_kind_reporting() {
        assert_eq!(Policy::blacklist().kind(), PolicyKind::Blacklist);
        assert_eq!(Policy::hidden_fee().kind(), PolicyKind::HiddenFee);
        assert_eq!(Policy::trading_switch().kind(), PolicyKind::TradingSwitch);
        assert_eq!(Policy::max_tx().kind(), PolicyKind::MaxTx);
        assert_eq!(Policy::cooldown().kind(), PolicyKind::Cooldown);
    }

    #[test]
    fn test_serde_roundtrip() {
        let policy = Policy::cooldown();
        let json = serde_json::to_string(&policy).expect("serialize");
        let restored: Policy = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored.kind(), PolicyKind::Cooldown);
    }
}
