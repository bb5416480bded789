//! Conversions: wire account payloads → domain snapshot.

use rust_decimal::Decimal;

use super::wire;
use super::{AccountSnapshot, BalanceEntry};
use crate::error::TerminalError;
use crate::shared::Asset;

impl TryFrom<wire::AccountResponse> for AccountSnapshot {
    type Error = TerminalError;

    fn try_from(response: wire::AccountResponse) -> Result<Self, Self::Error> {
        let mut snapshot = AccountSnapshot::new(response.id, response.subentry_count);

        for line in response.balances {
            let asset = asset_of(&line)?;
            snapshot.insert(
                asset,
                BalanceEntry {
                    balance: line.balance,
                    reserved: line.selling_liabilities.unwrap_or(Decimal::ZERO),
                    limit: line.limit,
                },
            );
        }

        Ok(snapshot)
    }
}

fn asset_of(line: &wire::BalanceLine) -> Result<Asset, TerminalError> {
    if line.asset_type == "native" {
        return Ok(Asset::Native);
    }
    match (&line.asset_code, &line.asset_issuer) {
        (Some(code), Some(issuer)) => Ok(Asset::credit(code.clone(), issuer.as_str())),
        _ => Err(TerminalError::Validation(format!(
            "balance line of type {} is missing its code or issuer",
            line.asset_type
        ))),
    }
}
