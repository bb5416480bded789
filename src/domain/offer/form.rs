//! The offer-entry form: an immutable state value, a pure transition
//! function, and an async controller that drives submission.
//!
//! Editing one of price/amount/total recomputes the dependent field with
//! decimal-exact arithmetic. Submission hands the draft to the session
//! collaborator and suspends the machine (`Pending`) until the ledger
//! verdict arrives.

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;

use super::classify::{classify, ClassifiedError};
use super::OfferDraft;
use crate::domain::book::OrderbookView;
use crate::session::feed::{PriceFeed, PriceTick, SessionEvent, SessionEvents};
use crate::session::{Handoff, SessionHandlers};
use crate::shared::{arith, Side};

// ─── State ───────────────────────────────────────────────────────────────────

/// Which input the user edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Price,
    Amount,
    Total,
}

/// Submit button phase; `Pending` holds strictly between dispatch and
/// result arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OfferButton {
    #[default]
    Ready,
    Pending,
}

/// Message shown once a submission resolves. Success and error are one
/// value, so they can never both be set.
#[derive(Debug, Clone, PartialEq)]
pub enum FormMessage {
    Success(String),
    Error(ClassifiedError),
}

/// Complete state of one offer form. `side` never changes after mount.
#[derive(Debug, Clone, PartialEq)]
pub struct OfferFormState {
    pub side: Side,
    pub draft: OfferDraft,
    /// True only when the latest derivation succeeded.
    pub valid: bool,
    pub button: OfferButton,
    pub message: Option<FormMessage>,
}

impl OfferFormState {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            draft: OfferDraft::default(),
            valid: false,
            button: OfferButton::Ready,
            message: None,
        }
    }

    pub fn price(&self) -> &str {
        &self.draft.price
    }

    pub fn amount(&self) -> &str {
        &self.draft.amount
    }

    pub fn total(&self) -> &str {
        &self.draft.total
    }

    pub fn is_pending(&self) -> bool {
        self.button == OfferButton::Pending
    }

    pub fn success_message(&self) -> Option<&str> {
        match &self.message {
            Some(FormMessage::Success(text)) => Some(text),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ClassifiedError> {
        match &self.message {
            Some(FormMessage::Error(err)) => Some(err),
            _ => None,
        }
    }
}

// ─── Transition function ─────────────────────────────────────────────────────

/// One discrete input to the form machine.
#[derive(Debug, Clone)]
pub enum FormEvent {
    /// A keystroke in one of the three fields.
    Edit { field: Field, value: String },
    /// A "use this market price" tick; handled exactly like a price edit.
    PricePicked(String),
    /// Submit requested; guarded on `valid` and `Ready`.
    Submit,
    /// The signer dismissed the handoff.
    SubmitCancelled,
    SubmitSucceeded,
    SubmitFailed(ClassifiedError),
}

/// Pure transition: the previous state and one event produce the next
/// state. The controller replaces its value wholesale — nothing aliases
/// a half-updated form.
pub fn reduce(state: &OfferFormState, event: FormEvent) -> OfferFormState {
    match event {
        FormEvent::Edit { field, value } => apply_edit(state, field, &value),
        FormEvent::PricePicked(price) => apply_edit(state, Field::Price, &price),
        FormEvent::Submit => {
            if state.valid && state.button == OfferButton::Ready {
                OfferFormState {
                    button: OfferButton::Pending,
                    message: None,
                    ..state.clone()
                }
            } else {
                state.clone()
            }
        }
        FormEvent::SubmitCancelled => OfferFormState {
            button: OfferButton::Ready,
            ..state.clone()
        },
        FormEvent::SubmitSucceeded => OfferFormState {
            side: state.side,
            // Price is the sticky field: the form is immediately ready
            // for another offer at the same level.
            draft: OfferDraft {
                price: state.draft.price.clone(),
                amount: String::new(),
                total: String::new(),
            },
            valid: false,
            button: OfferButton::Ready,
            message: Some(FormMessage::Success("Offer successfully created".into())),
        },
        FormEvent::SubmitFailed(err) => OfferFormState {
            button: OfferButton::Ready,
            message: Some(FormMessage::Error(err)),
            ..state.clone()
        },
    }
}

fn apply_edit(state: &OfferFormState, field: Field, value: &str) -> OfferFormState {
    // Suspension point: no field mutation while a submission is in flight.
    if state.button == OfferButton::Pending {
        return state.clone();
    }

    let mut next = state.clone();
    next.message = None;
    next.valid = false;

    // The edited field always keeps the literal keystroke, even when the
    // derivation below fails.
    match field {
        Field::Price => next.draft.price = value.to_string(),
        Field::Amount => next.draft.amount = value.to_string(),
        Field::Total => next.draft.total = value.to_string(),
    }

    match field {
        Field::Price | Field::Amount => {
            let other = if field == Field::Price {
                &state.draft.amount
            } else {
                &state.draft.price
            };
            if let Ok(total) = arith::multiply(value, other) {
                next.draft.total = total;
                next.valid = true;
            }
        }
        Field::Total => {
            if let Ok(amount) = arith::divide(value, &state.draft.price) {
                next.draft.amount = amount;
                next.valid = true;
            }
        }
    }

    next
}

// ─── Controller ──────────────────────────────────────────────────────────────

/// Owns one form's state and its feed subscriptions, and drives the
/// submission lifecycle against the session collaborator.
///
/// Dropping the controller releases both subscriptions and abandons any
/// in-flight ledger verdict, so results for an unmounted form are never
/// applied.
pub struct OfferForm<H: SessionHandlers> {
    state: OfferFormState,
    handlers: H,
    price_ticks: broadcast::Receiver<PriceTick>,
    session_events: broadcast::Receiver<SessionEvent>,
}

impl<H: SessionHandlers> OfferForm<H> {
    /// Mounts a form: subscribes to both feeds and seeds the price from
    /// the opposing best order when the book is ready.
    pub fn mount(
        side: Side,
        book: &OrderbookView,
        feed: &PriceFeed,
        events: &SessionEvents,
        handlers: H,
    ) -> Self {
        let mut state = OfferFormState::new(side);
        if let Some(price) = book.seed_price(side) {
            state.draft.price = price;
        }
        Self {
            state,
            handlers,
            price_ticks: feed.subscribe(),
            session_events: events.subscribe(),
        }
    }

    pub fn state(&self) -> &OfferFormState {
        &self.state
    }

    pub fn update(&mut self, field: Field, value: &str) {
        self.state = reduce(
            &self.state,
            FormEvent::Edit {
                field,
                value: value.to_string(),
            },
        );
    }

    /// Drains queued feed events into the machine. Returns true when
    /// anything changed and the host should re-render.
    pub fn pump(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.price_ticks.try_recv() {
                Ok(tick) => {
                    self.state = reduce(&self.state, FormEvent::PricePicked(tick.pick_price));
                    changed = true;
                }
                Err(TryRecvError::Lagged(_)) => continue,
                Err(_) => break,
            }
        }
        loop {
            match self.session_events.try_recv() {
                // Account changes don't touch the draft; the constraints
                // are recomputed from the fresh snapshot on render.
                Ok(_) => changed = true,
                Err(TryRecvError::Lagged(_)) => continue,
                Err(_) => break,
            }
        }
        changed
    }

    /// Dispatches the draft. A no-op unless the draft is valid and no
    /// submission is already in flight.
    pub async fn submit(&mut self) -> &OfferFormState {
        if !self.state.valid || self.state.is_pending() {
            return &self.state;
        }
        self.state = reduce(&self.state, FormEvent::Submit);
        let draft = self.state.draft.clone();
        tracing::debug!(side = %self.state.side, price = %draft.price, "dispatching offer");

        let resolution = match self.handlers.create_offer(self.state.side, draft).await {
            Ok(Handoff::Finish { server_result }) => match server_result.await {
                Ok(_) => FormEvent::SubmitSucceeded,
                Err(failure) => FormEvent::SubmitFailed(classify(&failure)),
            },
            Ok(Handoff::Cancelled) => FormEvent::SubmitCancelled,
            Err(failure) => FormEvent::SubmitFailed(classify(&failure)),
        };
        if let FormEvent::SubmitFailed(err) = &resolution {
            tracing::debug!(code = %err.code(), "offer rejected");
        }
        self.state = reduce(&self.state, resolution);
        &self.state
    }
}
