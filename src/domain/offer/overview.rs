//! Read-only projection of the offer form into renderable facts.
//!
//! No logic is left to the renderer: this module decides what the pane
//! shows, the renderer only draws it. Pure; call on every render.

use super::constraint::{trust_needed_assets, OfferConstraints, Spendable};
use super::form::{OfferButton, OfferFormState};
use crate::domain::account::AccountSnapshot;
use crate::domain::book::AssetPair;
use crate::session::SessionState;
use crate::shared::{arith, Asset};

/// Everything the overview pane needs to render.
#[derive(Debug, Clone, PartialEq)]
pub enum OfferOverview {
    /// Not logged in: show the input summary (if any) and a login prompt.
    LoginRequired { summary: Option<String> },
    /// The pair needs trust lines before trading; submit is replaced by
    /// a trust-establishment prompt for these assets.
    TrustRequired { assets: Vec<Asset> },
    /// The normal trade panel.
    Panel(OfferPanel),
}

#[derive(Debug, Clone, PartialEq)]
pub struct OfferPanel {
    pub balance: BalanceLine,
    pub insufficient: bool,
    /// "Buy 10 BTC for 5 USD", once the draft is valid.
    pub summary: Option<String>,
    pub result: Option<ResultMessage>,
    pub submit: SubmitButton,
}

/// "You have N CODE", or for the native asset "You may trade up to N XLM"
/// with the minimum-balance note.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceLine {
    pub asset: Asset,
    pub max_offer_view: String,
    pub native_reserve_note: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResultMessage {
    Success(String),
    Error { code: String, copy: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmitButton {
    pub label: String,
    pub enabled: bool,
}

/// Cap displayed digits at the tradable precision; garbage input is
/// shown as typed.
fn cap_digits(input: &str) -> String {
    arith::to_fixed_digits(input, None).unwrap_or_else(|_| input.to_string())
}

pub fn project(
    state: &OfferFormState,
    session: SessionState,
    account: Option<&AccountSnapshot>,
    pair: &AssetPair,
) -> OfferOverview {
    let summary = input_summary(state, pair);

    let account = match (session, account) {
        (SessionState::In, Some(account)) => account,
        _ => return OfferOverview::LoginRequired { summary },
    };

    let trust_needed = trust_needed_assets(account, pair);
    if !trust_needed.is_empty() {
        return OfferOverview::TrustRequired {
            assets: trust_needed,
        };
    }

    let constraints = OfferConstraints::evaluate(account, state.side, pair, &state.draft);
    let max_offer = match &constraints.max_offer {
        Spendable::Available(max) => max.to_string(),
        // Unreachable past the trust gate; render as nothing to spend.
        Spendable::TrustRequired => "0".to_string(),
    };

    let is_ready = state.button == OfferButton::Ready;
    let panel = OfferPanel {
        balance: BalanceLine {
            asset: constraints.target_asset.clone(),
            max_offer_view: cap_digits(&max_offer),
            native_reserve_note: constraints.target_asset.is_native(),
        },
        insufficient: constraints.insufficient,
        summary,
        result: result_message(state),
        submit: SubmitButton {
            label: if is_ready {
                format!("{} {}", state.side, pair.base.code())
            } else {
                "Creating offer...".to_string()
            },
            enabled: state.valid && !constraints.insufficient && is_ready,
        },
    };
    OfferOverview::Panel(panel)
}

fn input_summary(state: &OfferFormState, pair: &AssetPair) -> Option<String> {
    if !state.valid {
        return None;
    }
    Some(format!(
        "{} {} {} for {} {}",
        state.side,
        cap_digits(state.amount()),
        pair.base.code(),
        cap_digits(state.total()),
        pair.counter.code(),
    ))
}

fn result_message(state: &OfferFormState) -> Option<ResultMessage> {
    if let Some(text) = state.success_message() {
        return Some(ResultMessage::Success(text.to_string()));
    }
    state.error().map(|err| ResultMessage::Error {
        code: err.code(),
        copy: err.user_message(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::offer::form::{reduce, Field, FormEvent};
    use crate::shared::Side;
    use rust_decimal::Decimal;
    use std::str::FromStr;

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

    fn valid_state(side: Side) -> OfferFormState {
        let state = OfferFormState::new(side);
        let state = reduce(
            &state,
            FormEvent::Edit {
                field: Field::Price,
                value: "2".into(),
            },
        );
        reduce(
            &state,
            FormEvent::Edit {
                field: Field::Amount,
                value: "10".into(),
            },
        )
    }

    fn funded_account() -> AccountSnapshot {
        AccountSnapshot::new("GABC", 1)
            .with_balance(Asset::Native, dec("100"), Decimal::ZERO)
            .with_balance(usd(), dec("50"), Decimal::ZERO)
    }

    #[test]
    fn test_logged_out_prompts_login() {
        let state = valid_state(Side::Buy);
        let overview = project(&state, SessionState::Out, None, &pair());
        match overview {
            OfferOverview::LoginRequired { summary } => {
                assert_eq!(summary.unwrap(), "Buy 10 XLM for 20 USD");
            }
            other => panic!("expected login prompt, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_trust_replaces_submit_path() {
        let state = valid_state(Side::Buy);
        let account = AccountSnapshot::new("GABC", 0);
        let overview = project(&state, SessionState::In, Some(&account), &pair());
        assert_eq!(
            overview,
            OfferOverview::TrustRequired {
                assets: vec![usd()]
            }
        );
    }

    #[test]
    fn test_panel_for_funded_account() {
        let state = valid_state(Side::Buy);
        let account = funded_account();
        let overview = project(&state, SessionState::In, Some(&account), &pair());
        let panel = match overview {
            OfferOverview::Panel(panel) => panel,
            other => panic!("expected panel, got {:?}", other),
        };

        assert_eq!(panel.balance.asset, usd());
        assert!(!panel.balance.native_reserve_note);
        assert_eq!(panel.balance.max_offer_view, "50");
        assert!(!panel.insufficient);
        assert_eq!(panel.summary.unwrap(), "Buy 10 XLM for 20 USD");
        assert_eq!(panel.submit.label, "Buy XLM");
        assert!(panel.submit.enabled);
    }

    #[test]
    fn test_native_target_carries_reserve_note() {
        let state = valid_state(Side::Sell);
        let account = funded_account();
        let overview = project(&state, SessionState::In, Some(&account), &pair());
        let panel = match overview {
            OfferOverview::Panel(panel) => panel,
            other => panic!("expected panel, got {:?}", other),
        };
        assert!(panel.balance.native_reserve_note);
        // 100 - (2 + 1) * 0.5 - 0.01
        assert_eq!(panel.balance.max_offer_view, "98.49");
    }

    #[test]
    fn test_insufficient_disables_submit() {
        let state = valid_state(Side::Buy);
        let account = AccountSnapshot::new("GABC", 1)
            .with_balance(Asset::Native, dec("100"), Decimal::ZERO)
            .with_balance(usd(), dec("5"), Decimal::ZERO);
        let overview = project(&state, SessionState::In, Some(&account), &pair());
        let panel = match overview {
            OfferOverview::Panel(panel) => panel,
            other => panic!("expected panel, got {:?}", other),
        };
        assert!(panel.insufficient);
        assert!(!panel.submit.enabled);
    }

    #[test]
    fn test_pending_button_copy() {
        let state = valid_state(Side::Buy);
        let pending = reduce(&state, FormEvent::Submit);
        let overview = project(&pending, SessionState::In, Some(&funded_account()), &pair());
        let panel = match overview {
            OfferOverview::Panel(panel) => panel,
            other => panic!("expected panel, got {:?}", other),
        };
        assert_eq!(panel.submit.label, "Creating offer...");
        assert!(!panel.submit.enabled);
    }
}
