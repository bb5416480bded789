//! The session collaborator contract and its change feeds.
//!
//! Key management, signing, and network transport live outside this crate.
//! Forms reach them through [`SessionHandlers`] and observe account and
//! order-book changes through the broadcast feeds in [`feed`].

pub mod feed;

use std::future::Future;

use futures_util::future::BoxFuture;
use serde::Deserialize;

use crate::domain::offer::OfferDraft;
use crate::domain::payment::PaymentRecipe;
use crate::shared::Side;

// ─── Session state ───────────────────────────────────────────────────────────

/// Login lifecycle of the terminal session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Out,
    Unfunded,
    Loading,
    In,
}

// ─── Submission results ──────────────────────────────────────────────────────

/// Raw failure surfaced by the submission collaborator.
///
/// `data` is the gateway's error envelope when one exists; a failure with
/// no envelope never left the client.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionFailure {
    pub message: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl SubmissionFailure {
    /// A failure that never reached the gateway.
    pub fn client(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }
}

/// Ledger acknowledgement for an accepted transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerResponse {
    pub hash: String,
    #[serde(default)]
    pub ledger: Option<u64>,
}

/// The ledger's eventual verdict on a dispatched transaction.
pub type ServerResult = BoxFuture<'static, Result<LedgerResponse, SubmissionFailure>>;

/// Outcome of handing a transaction to the signer.
pub enum Handoff {
    /// Signed and dispatched; the ledger result arrives asynchronously.
    Finish { server_result: ServerResult },
    /// The signer dismissed the request; nothing was sent.
    Cancelled,
}

// ─── SessionHandlers ─────────────────────────────────────────────────────────

/// The narrow request/response contract with the session/signing
/// collaborator. One method per transaction kind the terminal builds.
///
/// Every call resolves quickly with a [`Handoff`] (or an immediate
/// failure); the ledger verdict is awaited separately through
/// `Handoff::Finish`.
pub trait SessionHandlers {
    fn create_offer(
        &self,
        side: Side,
        draft: OfferDraft,
    ) -> impl Future<Output = Result<Handoff, SubmissionFailure>> + Send;

    fn add_trust(
        &self,
        code: String,
        issuer: String,
    ) -> impl Future<Output = Result<Handoff, SubmissionFailure>> + Send;

    fn remove_trust(
        &self,
        code: String,
        issuer: String,
    ) -> impl Future<Output = Result<Handoff, SubmissionFailure>> + Send;

    fn send_payment(
        &self,
        recipe: PaymentRecipe,
    ) -> impl Future<Output = Result<Handoff, SubmissionFailure>> + Send;
}

/// Forwarding impl so a session shared behind an [`Arc`] satisfies the
/// contract — every call delegates to the pointee.
impl<T: SessionHandlers + ?Sized> SessionHandlers for std::sync::Arc<T> {
    fn create_offer(
        &self,
        side: Side,
        draft: OfferDraft,
    ) -> impl Future<Output = Result<Handoff, SubmissionFailure>> + Send {
        (**self).create_offer(side, draft)
    }

    fn add_trust(
        &self,
        code: String,
        issuer: String,
    ) -> impl Future<Output = Result<Handoff, SubmissionFailure>> + Send {
        (**self).add_trust(code, issuer)
    }

    fn remove_trust(
        &self,
        code: String,
        issuer: String,
    ) -> impl Future<Output = Result<Handoff, SubmissionFailure>> + Send {
        (**self).remove_trust(code, issuer)
    }

    fn send_payment(
        &self,
        recipe: PaymentRecipe,
    ) -> impl Future<Output = Result<Handoff, SubmissionFailure>> + Send {
        (**self).send_payment(recipe)
    }
}
