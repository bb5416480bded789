//! Raw order-book updates as the gateway streams them.

use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct BookUpdate {
    /// Snapshots replace the whole book; deltas merge into it.
    pub is_snapshot: bool,
    #[serde(default)]
    pub bids: Vec<PriceLevel>,
    #[serde(default)]
    pub asks: Vec<PriceLevel>,
}

/// A zero size deletes the level.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceLevel {
    pub price: Decimal,
    pub size: Decimal,
}
