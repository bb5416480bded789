//! End-to-end offer submission against a scripted session collaborator.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use futures_util::FutureExt;
use serde_json::json;

use lumenterm_core::prelude::*;

/// What the scripted collaborator does with the next `create_offer` call.
enum Script {
    Accept,
    RejectWith(serde_json::Value),
    FailImmediately(String),
    Dismiss,
}

#[derive(Default)]
struct ScriptedSession {
    script: Mutex<VecDeque<Script>>,
    calls: AtomicUsize,
}

impl ScriptedSession {
    fn with(script: Vec<Script>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SessionHandlers for ScriptedSession {
    fn create_offer(
        &self,
        _side: Side,
        _draft: OfferDraft,
    ) -> impl Future<Output = Result<Handoff, SubmissionFailure>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let step = self.script.lock().unwrap().pop_front();
        async move {
            match step.expect("unexpected create_offer call") {
                Script::Accept => Ok(Handoff::Finish {
                    server_result: futures_util::future::ready(Ok(LedgerResponse {
                        hash: "txhash".into(),
                        ledger: Some(42),
                    }))
                    .boxed(),
                }),
                Script::RejectWith(data) => Ok(Handoff::Finish {
                    server_result: futures_util::future::ready(Err(SubmissionFailure {
                        message: "Request failed with status code 400".into(),
                        data: Some(data),
                    }))
                    .boxed(),
                }),
                Script::FailImmediately(message) => Err(SubmissionFailure::client(message)),
                Script::Dismiss => Ok(Handoff::Cancelled),
            }
        }
    }

    fn add_trust(
        &self,
        _code: String,
        _issuer: String,
    ) -> impl Future<Output = Result<Handoff, SubmissionFailure>> + Send {
        async { Ok(Handoff::Cancelled) }
    }

    fn remove_trust(
        &self,
        _code: String,
        _issuer: String,
    ) -> impl Future<Output = Result<Handoff, SubmissionFailure>> + Send {
        async { Ok(Handoff::Cancelled) }
    }

    fn send_payment(
        &self,
        _recipe: PaymentRecipe,
    ) -> impl Future<Output = Result<Handoff, SubmissionFailure>> + Send {
        async { Ok(Handoff::Cancelled) }
    }
}

fn seeded_book() -> OrderbookView {
    use lumenterm_core::domain::book::wire::{BookUpdate, PriceLevel};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    let mut book = OrderbookView::new(AssetPair {
        base: Asset::credit("BTC", "GISSUER"),
        counter: Asset::Native,
    });
    book.apply(&BookUpdate {
        is_snapshot: true,
        bids: vec![PriceLevel {
            price: Decimal::from_str("0.5000000").unwrap(),
            size: Decimal::from_str("10").unwrap(),
        }],
        asks: vec![PriceLevel {
            price: Decimal::from_str("0.6").unwrap(),
            size: Decimal::from_str("4").unwrap(),
        }],
    });
    book
}

fn mounted(session: Arc<ScriptedSession>) -> (OfferForm<Arc<ScriptedSession>>, PriceFeed) {
    let feed = PriceFeed::new();
    let events = SessionEvents::new();
    let form = OfferForm::mount(Side::Buy, &seeded_book(), &feed, &events, session);
    (form, feed)
}

#[tokio::test]
async fn offer_succeeds_and_form_resets_for_next_entry() {
    let session = ScriptedSession::with(vec![Script::Accept]);
    let (mut form, _feed) = mounted(session.clone());

    // The mount seeded the price from the best bid, zeros stripped.
    assert_eq!(form.state().price(), "0.5");

    form.update(Field::Amount, "10");
    assert_eq!(form.state().total(), "5");
    assert!(form.state().valid);

    let state = form.submit().await;
    assert_eq!(state.success_message(), Some("Offer successfully created"));
    assert_eq!(state.price(), "0.5");
    assert_eq!(state.amount(), "");
    assert_eq!(state.total(), "");
    assert!(!state.is_pending());
    assert_eq!(session.calls(), 1);
}

#[tokio::test]
async fn rejection_is_classified_from_the_gateway_envelope() {
    let session = ScriptedSession::with(vec![Script::RejectWith(json!({
        "extras": {"result_codes": {"operations": ["op_low_reserve"]}}
    }))]);
    let (mut form, _feed) = mounted(session.clone());

    form.update(Field::Amount, "10");
    let state = form.submit().await;

    let error = state.error().expect("expected a classified error");
    assert_eq!(error.code(), "op_low_reserve");
    assert!(error.known_copy().is_some());
    // The draft survives a rejection so the user can adjust and retry.
    assert_eq!(state.amount(), "10");
}

#[tokio::test]
async fn immediate_failure_classifies_as_client_error() {
    let session = ScriptedSession::with(vec![Script::FailImmediately("Network Error".into())]);
    let (mut form, _feed) = mounted(session.clone());

    form.update(Field::Amount, "10");
    let state = form.submit().await;

    assert_eq!(
        state.error().unwrap().code(),
        "clientError - Network Error"
    );
}

#[tokio::test]
async fn dismissed_signer_returns_to_draft_silently() {
    let session = ScriptedSession::with(vec![Script::Dismiss]);
    let (mut form, _feed) = mounted(session.clone());

    form.update(Field::Amount, "10");
    let state = form.submit().await;

    assert!(state.error().is_none());
    assert!(state.success_message().is_none());
    assert!(!state.is_pending());
    assert_eq!(state.amount(), "10");
}

#[tokio::test]
async fn invalid_draft_never_dispatches() {
    let session = ScriptedSession::with(vec![]);
    let (mut form, _feed) = mounted(session.clone());

    form.update(Field::Price, "");
    form.submit().await;
    assert_eq!(session.calls(), 0);
}

#[tokio::test]
async fn price_tick_prefills_the_draft_price() {
    let session = ScriptedSession::with(vec![]);
    let (mut form, feed) = mounted(session.clone());

    form.update(Field::Amount, "10");
    feed.publish(PriceTick {
        pick_price: "0.25".into(),
    });
    assert!(form.pump());

    assert_eq!(form.state().price(), "0.25");
    assert_eq!(form.state().total(), "2.5");
}
