//! The four-step payment composer: destination, asset, amount, review.
//!
//! Steps unlock in order; editing a passed step truncates back to it.
//! Destination resolution (federation) is external and arrives through
//! `set_destination`, stale-guarded against the input it resolved.

pub mod memo;

use memo::{validate_memo, MemoCheck, MemoType};
use serde::Serialize;

use crate::domain::account::AccountSnapshot;
use crate::session::{Handoff, SessionHandlers};
use crate::shared::{arith, AccountId, Asset};

// ─── Step data ───────────────────────────────────────────────────────────────

/// The composer's panels, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SendStep {
    Destination,
    Asset,
    Amount,
    Review,
}

/// Externally resolved destination facts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Destination {
    pub account_id: Option<AccountId>,
    /// Federated address the input resolved from, when any.
    pub address: Option<String>,
    /// The recipient requires a memo (federation record says so).
    pub memo_required: bool,
    /// Memo fixed by the federation record; the user cannot edit it.
    pub locked_memo: Option<(MemoType, String)>,
    pub not_found: bool,
}

/// Sendability of one asset toward the chosen destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    pub asset: Asset,
    pub sendable: bool,
}

/// What the composer hands to the session collaborator on submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentRecipe {
    pub destination: AccountId,
    pub asset: Asset,
    pub amount: String,
    pub memo_type: MemoType,
    pub memo_content: String,
}

/// Composer lifecycle around the setup steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendState {
    Setup,
    Pending,
    Success { tx_id: String },
    Error { details: String },
}

/// Outcome of validating the amount step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountCheck {
    pub valid: bool,
    pub message: Option<String>,
}

// ─── Flow ────────────────────────────────────────────────────────────────────

pub struct SendFlow<H: SessionHandlers> {
    state: SendState,
    step: SendStep,
    dest_input: String,
    destination: Destination,
    memo_type: MemoType,
    memo_content: String,
    available_assets: Vec<Availability>,
    picked: Option<Asset>,
    amount: String,
    handlers: H,
}

impl<H: SessionHandlers> SendFlow<H> {
    pub fn new(handlers: H) -> Self {
        Self {
            state: SendState::Setup,
            step: SendStep::Destination,
            dest_input: String::new(),
            destination: Destination::default(),
            memo_type: MemoType::None,
            memo_content: String::new(),
            available_assets: Vec::new(),
            picked: None,
            amount: String::new(),
            handlers,
        }
    }

    pub fn state(&self) -> &SendState {
        &self.state
    }

    pub fn step(&self) -> SendStep {
        self.step
    }

    pub fn dest_input(&self) -> &str {
        &self.dest_input
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    pub fn memo_type(&self) -> MemoType {
        self.memo_type
    }

    pub fn memo_content(&self) -> &str {
        &self.memo_content
    }

    pub fn available_assets(&self) -> &[Availability] {
        &self.available_assets
    }

    pub fn picked_asset(&self) -> Option<&Asset> {
        self.picked.as_ref()
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    // ── Step 1: destination ─────────────────────────────────────────────

    /// A keystroke in the destination field. Clears the previous
    /// resolution; the host kicks off a new external resolution.
    pub fn update_destination(&mut self, input: &str) {
        self.dest_input = input.to_string();
        self.destination = Destination::default();
        self.truncate_to(SendStep::Destination);
    }

    /// Applies an external resolution. Responses for superseded input are
    /// discarded.
    pub fn set_destination(&mut self, for_input: &str, destination: Destination) {
        if for_input != self.dest_input {
            tracing::debug!(%for_input, "discarding stale destination resolution");
            return;
        }
        if let Some((memo_type, content)) = &destination.locked_memo {
            self.memo_type = *memo_type;
            self.memo_content = content.clone();
        }
        self.destination = destination;
    }

    /// The recipient is the sender.
    pub fn self_send(&self, account: &AccountSnapshot) -> bool {
        self.destination.account_id.as_ref() == Some(&account.id)
            || self.dest_input == account.id.as_str()
    }

    /// Memo type changes are rejected while the federation record locks
    /// the memo.
    pub fn update_memo_type(&mut self, memo_type: MemoType) {
        if self.destination.memo_required {
            return;
        }
        self.memo_type = memo_type;
        self.memo_content.clear();
    }

    pub fn update_memo_content(&mut self, content: &str) {
        if self.destination.locked_memo.is_some() {
            return;
        }
        self.memo_content = content.to_string();
    }

    pub fn memo_check(&self) -> MemoCheck {
        validate_memo(self.memo_type, &self.memo_content)
    }

    pub fn step1_ready(&self) -> bool {
        self.destination.account_id.is_some() && self.memo_check().ready
    }

    pub fn step1_next(&mut self) {
        if self.step == SendStep::Destination && self.step1_ready() {
            self.step = SendStep::Asset;
        }
    }

    // ── Step 2: asset ───────────────────────────────────────────────────

    /// Availabilities are computed outside (they depend on the
    /// recipient's trust lines).
    pub fn set_available_assets(&mut self, assets: Vec<Availability>) {
        self.available_assets = assets;
    }

    pub fn step2_pick_asset(&mut self, asset: &Asset) {
        if self.step != SendStep::Asset {
            return;
        }
        let sendable = self
            .available_assets
            .iter()
            .any(|a| &a.asset == asset && a.sendable);
        if sendable {
            self.picked = Some(asset.clone());
            self.step = SendStep::Amount;
        }
    }

    // ── Step 3: amount ──────────────────────────────────────────────────

    pub fn update_amount(&mut self, amount: &str) {
        self.amount = amount.to_string();
    }

    /// Well-formedness plus the native spending cap.
    pub fn amount_check(&self, account: &AccountSnapshot) -> AmountCheck {
        if !arith::is_valid_amount(&self.amount) {
            return AmountCheck {
                valid: false,
                message: Some("Amount is invalid".into()),
            };
        }
        if self.picked.as_ref().is_some_and(Asset::is_native) {
            let max = account.max_native_spend();
            let over = self
                .amount
                .trim()
                .parse::<rust_decimal::Decimal>()
                .map(|amount| amount > max)
                .unwrap_or(false);
            if over {
                return AmountCheck {
                    valid: false,
                    message: Some(format!(
                        "You may only send up to {} lumens due to the minimum balance \
                         requirements.",
                        max
                    )),
                };
            }
        }
        AmountCheck {
            valid: true,
            message: None,
        }
    }

    pub fn step3_next(&mut self, account: &AccountSnapshot) {
        if self.step == SendStep::Amount && self.amount_check(account).valid {
            self.step = SendStep::Review;
        }
    }

    // ── Editing passed steps ────────────────────────────────────────────

    pub fn edit_step(&mut self, step: SendStep) {
        if step < self.step {
            self.truncate_to(step);
        }
    }

    fn truncate_to(&mut self, step: SendStep) {
        self.step = step;
        if step <= SendStep::Asset {
            self.picked = None;
        }
        if step <= SendStep::Amount {
            self.amount.clear();
        }
    }

    // ── Step 4: submit ──────────────────────────────────────────────────

    fn recipe(&self) -> Option<PaymentRecipe> {
        Some(PaymentRecipe {
            destination: self.destination.account_id.clone()?,
            asset: self.picked.clone()?,
            amount: self.amount.clone(),
            memo_type: self.memo_type,
            memo_content: self.memo_content.clone(),
        })
    }

    /// Builds and dispatches the payment; drives Setup → Pending →
    /// Success/Error. A no-op before the review step.
    pub async fn submit(&mut self) -> &SendState {
        if self.step != SendStep::Review || self.state != SendState::Setup {
            return &self.state;
        }
        let Some(recipe) = self.recipe() else {
            return &self.state;
        };
        tracing::debug!(asset = %recipe.asset.code(), "dispatching payment");

        self.state = match self.handlers.send_payment(recipe).await {
            Ok(Handoff::Finish { server_result }) => {
                self.state = SendState::Pending;
                match server_result.await {
                    Ok(response) => SendState::Success {
                        tx_id: response.hash,
                    },
                    Err(failure) => SendState::Error {
                        details: failure.message,
                    },
                }
            }
            Ok(Handoff::Cancelled) => SendState::Setup,
            Err(failure) => SendState::Error {
                details: failure.message,
            },
        };
        &self.state
    }

    /// Start over from a clean composer, keeping the session handlers.
    pub fn reset(&mut self) {
        self.state = SendState::Setup;
        self.step = SendStep::Destination;
        self.dest_input.clear();
        self.destination = Destination::default();
        self.memo_type = MemoType::None;
        self.memo_content.clear();
        self.available_assets.clear();
        self.picked = None;
        self.amount.clear();
    }
}
