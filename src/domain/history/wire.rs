//! Raw effect records as the history gateway streams them.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One effect touching the account, newest first in the stream.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EffectRecord {
    pub id: String,
    /// e.g. `trade`, `account_credited`, `trustline_created`.
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: DateTime<Utc>,
    pub transaction_hash: String,
    #[serde(default)]
    pub ledger: Option<u64>,
}
