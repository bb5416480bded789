//! Balance and reserve constraints for a draft offer.
//!
//! Pure functions of the account snapshot and the current draft; safe to
//! call on every render.

use std::str::FromStr;

use rust_decimal::Decimal;

use super::OfferDraft;
use crate::domain::account::AccountSnapshot;
use crate::domain::book::AssetPair;
use crate::shared::{Asset, Side};

/// What the account can spend toward the offer's target asset.
#[derive(Debug, Clone, PartialEq)]
pub enum Spendable {
    Available(Decimal),
    /// No trust line: the asset must be accepted before trading.
    TrustRequired,
}

/// Projection of account limits against the current draft.
#[derive(Debug, Clone, PartialEq)]
pub struct OfferConstraints {
    /// The asset being spent: the counter asset when buying the base,
    /// the base asset when selling it.
    pub target_asset: Asset,
    pub max_offer: Spendable,
    pub insufficient: bool,
}

impl OfferConstraints {
    pub fn evaluate(
        account: &AccountSnapshot,
        side: Side,
        pair: &AssetPair,
        draft: &OfferDraft,
    ) -> Self {
        let target_asset = if side.is_buy() {
            pair.counter.clone()
        } else {
            pair.base.clone()
        };
        let max_offer = max_offer(account, &target_asset);

        // Buying spends the total (counter units); selling spends the
        // amount (base units). Unparsable drafts are not flagged — the
        // form is already invalid.
        let spend = if side.is_buy() {
            &draft.total
        } else {
            &draft.amount
        };
        let insufficient = match &max_offer {
            Spendable::Available(max) => Decimal::from_str(spend)
                .map(|value| value > *max)
                .unwrap_or(false),
            Spendable::TrustRequired => false,
        };

        Self {
            target_asset,
            max_offer,
            insufficient,
        }
    }
}

/// Native assets spend out of `max_native_spend`; issued assets out of
/// the trust-line balance. Amounts locked in open offers are excluded and
/// the result never goes negative.
fn max_offer(account: &AccountSnapshot, target: &Asset) -> Spendable {
    let available = if target.is_native() {
        account.max_native_spend()
    } else {
        match account.get_balance(target) {
            Some(balance) => balance,
            None => return Spendable::TrustRequired,
        }
    };
    let reserved = account.get_reserved_balance(target);
    Spendable::Available((available - reserved).max(Decimal::ZERO))
}

/// Assets of the pair the account holds no trust line for. Non-empty
/// means the submit path is replaced by a trust-establishment prompt.
pub fn trust_needed_assets(account: &AccountSnapshot, pair: &AssetPair) -> Vec<Asset> {
    [&pair.base, &pair.counter]
        .into_iter()
        .filter(|asset| account.get_balance(asset).is_none())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn usd() -> Asset {
        Asset::credit("USD", "GISSUER")
    }

    fn pair() -> AssetPair {
        AssetPair {
            base: Asset::Native,
            counter: usd(),
        }
    }

    fn draft(amount: &str, total: &str) -> OfferDraft {
        OfferDraft {
            price: "1".into(),
            amount: amount.into(),
            total: total.into(),
        }
    }

    #[test]
    fn test_insufficient_when_spend_exceeds_max() {
        // balance 100, reserved 20 -> max 80; selling 90 is too much
        let account =
            AccountSnapshot::new("GABC", 0).with_balance(usd(), dec("100"), dec("20"));
        let sell_pair = AssetPair {
            base: usd(),
            counter: Asset::Native,
        };
        let constraints =
            OfferConstraints::evaluate(&account, Side::Sell, &sell_pair, &draft("90", "90"));
        assert_eq!(constraints.max_offer, Spendable::Available(dec("80")));
        assert!(constraints.insufficient);

        let constraints =
            OfferConstraints::evaluate(&account, Side::Sell, &sell_pair, &draft("50", "50"));
        assert!(!constraints.insufficient);
    }

    #[test]
    fn test_buy_spends_the_total() {
        let account = AccountSnapshot::new("GABC", 0).with_balance(usd(), dec("10"), dec("0"));
        let constraints =
            OfferConstraints::evaluate(&account, Side::Buy, &pair(), &draft("100", "11"));
        assert_eq!(constraints.target_asset, usd());
        assert!(constraints.insufficient);
    }

    #[test]
    fn test_native_target_uses_max_native_spend() {
        let account = AccountSnapshot::new("GABC", 0)
            .with_balance(Asset::Native, dec("10"), dec("2"));
        let sell_pair = AssetPair {
            base: Asset::Native,
            counter: usd(),
        };
        // max_native_spend = 10 - 1.0 - 0.01 = 8.99; minus 2 reserved = 6.99
        let constraints =
            OfferConstraints::evaluate(&account, Side::Sell, &sell_pair, &draft("7", "7"));
        assert_eq!(constraints.max_offer, Spendable::Available(dec("6.99")));
        assert!(constraints.insufficient);
    }

    #[test]
    fn test_max_offer_floors_at_zero() {
        let account = AccountSnapshot::new("GABC", 0).with_balance(usd(), dec("5"), dec("9"));
        let sell_pair = AssetPair {
            base: usd(),
            counter: Asset::Native,
        };
        let constraints =
            OfferConstraints::evaluate(&account, Side::Sell, &sell_pair, &draft("1", "1"));
        assert_eq!(constraints.max_offer, Spendable::Available(Decimal::ZERO));
    }

    #[test]
    fn test_missing_trust_line_reports_trust_required() {
        let account = AccountSnapshot::new("GABC", 0);
        let constraints =
            OfferConstraints::evaluate(&account, Side::Buy, &pair(), &draft("1", "1"));
        assert_eq!(constraints.max_offer, Spendable::TrustRequired);
        assert!(!constraints.insufficient);
    }

    #[test]
    fn test_unparsable_spend_is_not_flagged() {
        let account = AccountSnapshot::new("GABC", 0).with_balance(usd(), dec("10"), dec("0"));
        let constraints =
            OfferConstraints::evaluate(&account, Side::Buy, &pair(), &draft("", ""));
        assert!(!constraints.insufficient);
    }

    #[test]
    fn test_trust_needed_assets() {
        let account = AccountSnapshot::new("GABC", 0);
        let needed = trust_needed_assets(&account, &pair());
        // Native never needs trust; USD does.
        assert_eq!(needed, vec![usd()]);

        let trusted = AccountSnapshot::new("GABC", 1).with_balance(usd(), dec("0"), dec("0"));
        assert!(trust_needed_assets(&trusted, &pair()).is_empty());
    }
}
