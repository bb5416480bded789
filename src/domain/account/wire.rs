//! Raw account payloads as the ledger gateway returns them.

use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AccountResponse {
    pub id: String,
    pub subentry_count: u32,
    pub balances: Vec<BalanceLine>,
}

/// One line of the gateway's `balances` array. Amounts arrive as strings.
#[derive(Debug, Clone, Deserialize)]
pub struct BalanceLine {
    /// `native`, `credit_alphanum4`, or `credit_alphanum12`.
    pub asset_type: String,
    #[serde(default)]
    pub asset_code: Option<String>,
    #[serde(default)]
    pub asset_issuer: Option<String>,
    pub balance: Decimal,
    #[serde(default)]
    pub selling_liabilities: Option<Decimal>,
    #[serde(default)]
    pub limit: Option<Decimal>,
}
