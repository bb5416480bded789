//! # Lumenterm Core
//!
//! Client-side presentation and interaction logic for the Lumenterm
//! trading terminal. Rendering, routing, signing, and transport live in
//! the host application; this crate owns the state machines between them.
//!
//! ## Architecture
//!
//! 1. **Shared** — decimal-string arithmetic, asset/side newtypes, display helpers
//! 2. **Session** — the collaborator contract (signing/transport) and change feeds
//! 3. **Domain** — vertical slices: account, book, offer, payment, trust, history
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use lumenterm_core::prelude::*;
//!
//! let mut form = OfferForm::mount(Side::Buy, &book, &feed, &events, handlers);
//! form.update(Field::Amount, "25");
//! let state = form.submit().await;
//! ```

// ── Layer 1: Shared ──────────────────────────────────────────────────────────

/// Shared newtypes, decimal arithmetic, display helpers.
pub mod shared;

/// Crate-level error type.
pub mod error;

// ── Layer 2: Session ─────────────────────────────────────────────────────────

/// Session collaborator contract and change feeds.
pub mod session;

// ── Layer 3: Domain ──────────────────────────────────────────────────────────

/// Domain modules (vertical slices): account, book, offer, payment,
/// trust, history.
pub mod domain;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{AccountId, Asset, Side, TRADE_DECIMALS};

    // Arithmetic
    pub use crate::shared::arith::{divide, multiply, to_fixed_digits, ArithmeticError};

    // Domain — account
    pub use crate::domain::account::{AccountSnapshot, BalanceEntry, ReserveBreakdown};

    // Domain — book
    pub use crate::domain::book::{AssetPair, OrderbookView};

    // Domain — offer
    pub use crate::domain::offer::{
        classify, project, trust_needed_assets, ClassifiedError, Field, FormEvent, FormMessage,
        OfferButton, OfferConstraints, OfferDraft, OfferForm, OfferFormState, OfferOverview,
        OfferPanel, Spendable,
    };

    // Domain — payment
    pub use crate::domain::payment::memo::{validate_memo, MemoCheck, MemoType};
    pub use crate::domain::payment::{
        AmountCheck, Availability, Destination, PaymentRecipe, SendFlow, SendState, SendStep,
    };

    // Domain — trust
    pub use crate::domain::trust::federation::{
        AnchorCurrency, AnchorLookup, AnchorResolver, LookupState,
    };
    pub use crate::domain::trust::{
        can_remove_trust, validate_asset_entry, AddTrustFlow, RemoveStatus, RemoveTrustFlow,
        TrustEntryError, TrustStatus,
    };

    // Domain — history
    pub use crate::domain::history::{
        EffectCategory, EffectDetails, HistoryFilters, HistoryRow, HistoryState,
    };

    // Session
    pub use crate::session::feed::{PriceFeed, PriceTick, SessionEvent, SessionEvents};
    pub use crate::session::{
        Handoff, LedgerResponse, SessionHandlers, SessionState, SubmissionFailure,
    };

    // Errors
    pub use crate::error::TerminalError;
}
