//! Account domain — balances, reserves, spendable limits.

mod convert;
pub mod wire;

use std::collections::HashMap;
use std::sync::OnceLock;

use rust_decimal::Decimal;

use crate::shared::fmt::{lighten_zeros, AmountParts};
use crate::shared::{AccountId, Asset};

static BASE_RESERVE: OnceLock<Decimal> = OnceLock::new();
static FEE_ALLOWANCE: OnceLock<Decimal> = OnceLock::new();

/// Reserve per ledger entry, in native units.
fn base_reserve() -> &'static Decimal {
    BASE_RESERVE.get_or_init(|| Decimal::new(5, 1))
}

/// Headroom kept out of `max_native_spend` so the account can still pay
/// transaction fees.
fn fee_allowance() -> &'static Decimal {
    FEE_ALLOWANCE.get_or_init(|| Decimal::new(1, 2))
}

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// One balance line of the snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BalanceEntry {
    pub balance: Decimal,
    /// Amount locked in the account's open offers (selling liabilities).
    pub reserved: Decimal,
    pub limit: Option<Decimal>,
}

/// Point-in-time view of the logged-in account.
///
/// The app owns one instance and rebuilds it from the wire payload on each
/// account-change notification; forms read it on every render.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountSnapshot {
    pub id: AccountId,
    balances: HashMap<Asset, BalanceEntry>,
    subentry_count: u32,
}

impl AccountSnapshot {
    pub fn new(id: impl Into<AccountId>, subentry_count: u32) -> Self {
        Self {
            id: id.into(),
            balances: HashMap::new(),
            subentry_count,
        }
    }

    pub fn insert(&mut self, asset: Asset, entry: BalanceEntry) {
        self.balances.insert(asset, entry);
    }

    /// Builder-style insert for tests and fixtures.
    pub fn with_balance(mut self, asset: Asset, balance: Decimal, reserved: Decimal) -> Self {
        self.insert(
            asset,
            BalanceEntry {
                balance,
                reserved,
                limit: None,
            },
        );
        self
    }

    pub fn subentry_count(&self) -> u32 {
        self.subentry_count
    }

    /// Balance for `asset`; `None` means no trust line exists. The native
    /// balance is always present (zero for a hollow snapshot).
    pub fn get_balance(&self, asset: &Asset) -> Option<Decimal> {
        match self.balances.get(asset) {
            Some(entry) => Some(entry.balance),
            None if asset.is_native() => Some(Decimal::ZERO),
            None => None,
        }
    }

    /// Amount of `asset` locked in open offers; zero when none.
    pub fn get_reserved_balance(&self, asset: &Asset) -> Decimal {
        self.balances
            .get(asset)
            .map(|entry| entry.reserved)
            .unwrap_or(Decimal::ZERO)
    }

    /// Trust lines the account carries (every non-native balance line).
    pub fn trust_lines(&self) -> impl Iterator<Item = &Asset> {
        self.balances.keys().filter(|asset| !asset.is_native())
    }

    /// Minimum native balance the ledger requires: two base entries plus
    /// one per subentry, each costing the base reserve.
    pub fn min_balance(&self) -> Decimal {
        Decimal::from(2 + self.subentry_count) * *base_reserve()
    }

    /// Native amount spendable without dropping below the minimum balance
    /// or losing fee headroom. Floored at zero.
    pub fn max_native_spend(&self) -> Decimal {
        let native = self
            .get_balance(&Asset::Native)
            .unwrap_or(Decimal::ZERO);
        (native - self.min_balance() - *fee_allowance()).max(Decimal::ZERO)
    }

    /// Balance split for display, with trailing zeros separated out.
    pub fn balance_display(&self, asset: &Asset) -> Option<AmountParts> {
        self.get_balance(asset)
            .map(|balance| lighten_zeros(&balance.to_string()))
    }

    /// Itemized reserve breakdown for the minimum-balance table.
    pub fn explain_reserve(&self) -> ReserveBreakdown {
        let trust_lines = self.trust_lines().count() as u32;
        let other_subentries = self.subentry_count.saturating_sub(trust_lines);

        let items = vec![
            ReserveItem::new("Base reserve", 2),
            ReserveItem::new("Trust lines", trust_lines),
            ReserveItem::new("Offers & other subentries", other_subentries),
        ];

        ReserveBreakdown {
            items,
            total_lumens: self.min_balance(),
        }
    }
}

// ─── Reserve breakdown ───────────────────────────────────────────────────────

/// One row of the minimum-balance table.
#[derive(Debug, Clone, PartialEq)]
pub struct ReserveItem {
    pub entry_type: &'static str,
    pub count: u32,
    pub lumens: Decimal,
}

impl ReserveItem {
    fn new(entry_type: &'static str, count: u32) -> Self {
        Self {
            entry_type,
            count,
            lumens: Decimal::from(count) * *base_reserve(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReserveBreakdown {
    pub items: Vec<ReserveItem>,
    pub total_lumens: Decimal,
}
