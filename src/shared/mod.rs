//! Shared newtypes and helpers used across all domain modules.
//!
//! These types are serialization-transparent where they appear in wire
//! structs: they serialize the way the ledger gateway formats them, so wire
//! types can embed them without conversion shims.

pub mod arith;
pub mod fmt;

pub use arith::{divide, multiply, to_fixed_digits, ArithmeticError};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt as stdfmt;
use std::str::FromStr;

/// Fractional digits the ledger tracks for any amount — the minimum
/// tradable unit is `1e-7`.
pub const TRADE_DECIMALS: u32 = 7;

// ─── AccountId ───────────────────────────────────────────────────────────────

/// An account identifier in strkey form (`G...`), stored as entered.
///
/// Serializes transparently as a JSON string. Can be used as a HashMap key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl stdfmt::Display for AccountId {
    fn fmt(&self, f: &mut stdfmt::Formatter<'_>) -> stdfmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for AccountId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(AccountId(s.to_string()))
    }
}

impl Serialize for AccountId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(AccountId(s))
    }
}

// ─── Asset ───────────────────────────────────────────────────────────────────

/// An asset on the ledger: the native currency or an issued credit.
///
/// The native asset needs no trust line and has no issuer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Asset {
    Native,
    Credit { code: String, issuer: AccountId },
}

impl Asset {
    pub fn native() -> Self {
        Asset::Native
    }

    pub fn credit(code: impl Into<String>, issuer: impl Into<AccountId>) -> Self {
        Asset::Credit {
            code: code.into(),
            issuer: issuer.into(),
        }
    }

    /// Display code; the native asset reads as `XLM`.
    pub fn code(&self) -> &str {
        match self {
            Asset::Native => "XLM",
            Asset::Credit { code, .. } => code,
        }
    }

    pub fn issuer(&self) -> Option<&AccountId> {
        match self {
            Asset::Native => None,
            Asset::Credit { issuer, .. } => Some(issuer),
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Asset::Native)
    }
}

impl stdfmt::Display for Asset {
    fn fmt(&self, f: &mut stdfmt::Formatter<'_>) -> stdfmt::Result {
        match self {
            Asset::Native => write!(f, "XLM"),
            Asset::Credit { code, issuer } => write!(f, "{}-{}", code, issuer),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct AssetRepr {
    code: String,
    issuer: Option<AccountId>,
}

impl Serialize for Asset {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        AssetRepr {
            code: self.code().to_string(),
            issuer: self.issuer().cloned(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Asset {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let repr = AssetRepr::deserialize(deserializer)?;
        Ok(match repr.issuer {
            Some(issuer) => Asset::Credit {
                code: repr.code,
                issuer,
            },
            None => Asset::Native,
        })
    }
}

// ─── Side ────────────────────────────────────────────────────────────────────

/// Offer side from the account's perspective: buying or selling the base
/// asset of the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn is_buy(&self) -> bool {
        matches!(self, Side::Buy)
    }
}

impl stdfmt::Display for Side {
    fn fmt(&self, f: &mut stdfmt::Formatter) -> stdfmt::Result {
        match self {
            Side::Buy => write!(f, "Buy"),
            Side::Sell => write!(f, "Sell"),
        }
    }
}
