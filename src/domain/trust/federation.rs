//! Anchor-domain asset lookup with stale-response discarding.
//!
//! The TOML fetch itself is external; this module owns the lookup
//! lifecycle for the "accept via anchor domain" form. Lookups race the
//! user's typing, so every response is checked against the input it was
//! issued for and discarded when superseded.

use std::future::Future;

use serde::Deserialize;

use crate::error::TerminalError;
use crate::shared::AccountId;

/// One currency advertised by an anchor's TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnchorCurrency {
    pub code: String,
    pub issuer: AccountId,
}

/// Resolves an anchor domain to its advertised currencies. Implemented
/// outside this crate (network transport).
pub trait AnchorResolver {
    fn resolve(
        &self,
        domain: String,
    ) -> impl Future<Output = Result<Vec<AnchorCurrency>, TerminalError>> + Send;
}

/// Lookup lifecycle for the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupState {
    Initial,
    Pending,
    Found(Vec<AnchorCurrency>),
    NotFound,
}

pub struct AnchorLookup<R: AnchorResolver> {
    domain: String,
    state: LookupState,
    resolver: R,
}

impl<R: AnchorResolver> AnchorLookup<R> {
    pub fn new(resolver: R) -> Self {
        Self {
            domain: String::new(),
            state: LookupState::Initial,
            resolver,
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn state(&self) -> &LookupState {
        &self.state
    }

    /// Records a new input and returns the query to resolve. An empty
    /// input resets the form instead of querying.
    pub fn input(&mut self, domain: &str) -> Option<String> {
        self.domain = domain.to_string();
        if domain.is_empty() {
            self.state = LookupState::Initial;
            None
        } else {
            self.state = LookupState::Pending;
            Some(self.domain.clone())
        }
    }

    /// Applies a completed lookup. A response for a superseded input is
    /// discarded — the newer lookup owns the form now.
    pub fn apply(&mut self, queried: &str, result: Result<Vec<AnchorCurrency>, TerminalError>) {
        if queried != self.domain {
            tracing::debug!(%queried, current = %self.domain, "discarding stale anchor lookup");
            return;
        }
        self.state = match result {
            Ok(currencies) => LookupState::Found(currencies),
            Err(_) => LookupState::NotFound,
        };
    }

    /// Input + resolve + apply in one await, for hosts that serialize
    /// their lookups.
    pub async fn lookup(&mut self, domain: &str) {
        let Some(queried) = self.input(domain) else {
            return;
        };
        let result = self.resolver.resolve(queried.clone()).await;
        self.apply(&queried, result);
    }
}
