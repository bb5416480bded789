//! Offer domain — the offer-entry form and everything around it.
//!
//! `form` owns the three linked fields and the submission lifecycle;
//! `classify` turns raw rejections into symbolic codes; `constraint`
//! derives spendable limits from the account; `overview` projects it all
//! into renderable facts.

pub mod classify;
pub mod constraint;
pub mod form;
pub mod overview;

use serde::Serialize;

pub use classify::{classify, ClassifiedError};
pub use constraint::{trust_needed_assets, OfferConstraints, Spendable};
pub use form::{Field, FormEvent, FormMessage, OfferButton, OfferForm, OfferFormState};
pub use overview::{project, OfferOverview, OfferPanel};

/// The three linked fields of a draft offer, exactly as entered.
///
/// `total == price * amount` whenever the draft is valid; the strings keep
/// the user's literal keystrokes otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OfferDraft {
    pub price: String,
    pub amount: String,
    pub total: String,
}
