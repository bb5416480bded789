//! Trust-line management — accepting and removing assets.

pub mod federation;
pub mod strkey;

use std::fmt;

use rust_decimal::Decimal;

use crate::domain::account::AccountSnapshot;
use crate::session::{Handoff, SessionHandlers, SubmissionFailure};
use crate::shared::Asset;

// ─── Entry validation ────────────────────────────────────────────────────────

/// Problems with a manually entered asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrustEntryError {
    CodeTooLong,
    CodeNotAlphanumeric,
    InvalidIssuer,
}

impl fmt::Display for TrustEntryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrustEntryError::CodeTooLong => {
                write!(f, "Asset code must be 12 or fewer characters")
            }
            TrustEntryError::CodeNotAlphanumeric => {
                write!(f, "Asset code must contain only letters and/or numbers")
            }
            TrustEntryError::InvalidIssuer => {
                write!(f, "Asset issuer account ID must be a valid account ID")
            }
        }
    }
}

impl std::error::Error for TrustEntryError {}

/// All problems with the entry, in display order. Empty means submittable.
pub fn validate_asset_entry(code: &str, issuer: &str) -> Vec<TrustEntryError> {
    let mut errors = Vec::new();
    if code.len() > 12 {
        errors.push(TrustEntryError::CodeTooLong);
    }
    if code.is_empty() || !code.bytes().all(|b| b.is_ascii_alphanumeric()) {
        errors.push(TrustEntryError::CodeNotAlphanumeric);
    }
    if !strkey::is_valid_ed25519_public_key(issuer) {
        errors.push(TrustEntryError::InvalidIssuer);
    }
    errors
}

// ─── Manual acceptance ───────────────────────────────────────────────────────

/// Submission phase of a trust operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrustStatus {
    #[default]
    Ready,
    Working,
}

/// The "manually accept asset" form: code + issuer entry plus a working
/// flag while the trust line is being established.
pub struct AddTrustFlow<H: SessionHandlers> {
    code: String,
    issuer: String,
    status: TrustStatus,
    handlers: H,
}

impl<H: SessionHandlers> AddTrustFlow<H> {
    pub fn new(handlers: H) -> Self {
        Self {
            code: String::new(),
            issuer: String::new(),
            status: TrustStatus::Ready,
            handlers,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn status(&self) -> TrustStatus {
        self.status
    }

    /// Any edit resets a previous Working indication.
    pub fn set_code(&mut self, value: &str) {
        self.status = TrustStatus::Ready;
        self.code = value.to_string();
    }

    pub fn set_issuer(&mut self, value: &str) {
        self.status = TrustStatus::Ready;
        self.issuer = value.to_string();
    }

    /// Validation of the current entry; only run once both fields have
    /// content, matching the form's progressive disclosure.
    pub fn entry_errors(&self) -> Vec<TrustEntryError> {
        if self.code.is_empty() || self.issuer.is_empty() {
            return Vec::new();
        }
        validate_asset_entry(&self.code, &self.issuer)
    }

    /// Whether the entry is complete, well-formed, and not yet held.
    pub fn can_submit(&self, account: &AccountSnapshot) -> bool {
        !self.code.is_empty()
            && !self.issuer.is_empty()
            && self.entry_errors().is_empty()
            && !self.already_accepted(account)
            && self.status == TrustStatus::Ready
    }

    pub fn already_accepted(&self, account: &AccountSnapshot) -> bool {
        account.trust_lines().any(|asset| {
            asset.code() == self.code
                && asset
                    .issuer()
                    .is_some_and(|issuer| issuer.as_str() == self.issuer)
        })
    }

    /// Establishes the trust line. Failures return the raw failure and
    /// leave the form ready for another attempt.
    pub async fn submit(&mut self, account: &AccountSnapshot) -> Result<(), SubmissionFailure> {
        if !self.can_submit(account) {
            return Ok(());
        }
        match self
            .handlers
            .add_trust(self.code.clone(), self.issuer.clone())
            .await
        {
            Ok(Handoff::Finish { server_result }) => {
                self.status = TrustStatus::Working;
                let outcome = server_result.await;
                self.status = TrustStatus::Ready;
                match outcome {
                    Ok(_) => Ok(()),
                    Err(failure) => {
                        tracing::warn!(message = %failure.message, "trust line not established");
                        Err(failure)
                    }
                }
            }
            Ok(Handoff::Cancelled) => Ok(()),
            Err(failure) => Err(failure),
        }
    }
}

// ─── Removal ─────────────────────────────────────────────────────────────────

/// Removal status for one balance row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemoveStatus {
    #[default]
    Ready,
    Pending,
    Error,
}

/// Whether the row offers removal at all: only zero-balance lines can go.
pub fn can_remove_trust(account: &AccountSnapshot, asset: &Asset) -> bool {
    !asset.is_native() && account.get_balance(asset) == Some(Decimal::ZERO)
}

/// The "remove asset" link on one balance row.
pub struct RemoveTrustFlow<H: SessionHandlers> {
    asset: Asset,
    status: RemoveStatus,
    handlers: H,
}

impl<H: SessionHandlers> RemoveTrustFlow<H> {
    pub fn new(asset: Asset, handlers: H) -> Self {
        Self {
            asset,
            status: RemoveStatus::Ready,
            handlers,
        }
    }

    pub fn asset(&self) -> &Asset {
        &self.asset
    }

    pub fn status(&self) -> RemoveStatus {
        self.status
    }

    /// Drops the trust line. The row disappears with the next account
    /// refresh on success; errors leave the link retryable.
    pub async fn remove(&mut self, account: &AccountSnapshot) -> RemoveStatus {
        if self.status == RemoveStatus::Pending || !can_remove_trust(account, &self.asset) {
            return self.status;
        }
        let Asset::Credit { code, issuer } = self.asset.clone() else {
            return self.status;
        };
        self.status = match self.handlers.remove_trust(code, issuer.to_string()).await {
            Ok(Handoff::Finish { server_result }) => {
                self.status = RemoveStatus::Pending;
                match server_result.await {
                    Ok(_) => RemoveStatus::Ready,
                    Err(failure) => {
                        tracing::warn!(message = %failure.message, "trust removal failed");
                        RemoveStatus::Error
                    }
                }
            }
            Ok(Handoff::Cancelled) => RemoveStatus::Ready,
            Err(_) => RemoveStatus::Error,
        };
        self.status
    }
}
