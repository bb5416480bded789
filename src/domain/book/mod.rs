//! Order-book view — the pair being traded and its live price levels.

pub mod wire;

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::shared::{Asset, Side};
use self::wire::BookUpdate;

/// The asset pair an order book trades: offers buy or sell `base`,
/// priced in `counter`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPair {
    pub base: Asset,
    pub counter: Asset,
}

/// Live order-book state the terminal renders and seeds offer prices from.
///
/// The app owns one instance per pair and applies gateway updates
/// (snapshot replaces, delta merges).
#[derive(Debug, Clone)]
pub struct OrderbookView {
    pub pair: AssetPair,
    ready: bool,
    bids: BTreeMap<Decimal, Decimal>,
    asks: BTreeMap<Decimal, Decimal>,
}

impl OrderbookView {
    pub fn new(pair: AssetPair) -> Self {
        Self {
            pair,
            ready: false,
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
        }
    }

    /// The book becomes ready on its first applied update.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn apply(&mut self, update: &BookUpdate) {
        if update.is_snapshot {
            self.bids.clear();
            self.asks.clear();
        }
        self.ready = true;

        for level in &update.bids {
            if level.size.is_zero() {
                self.bids.remove(&level.price);
            } else {
                self.bids.insert(level.price, level.size);
            }
        }
        for level in &update.asks {
            if level.size.is_zero() {
                self.asks.remove(&level.price);
            } else {
                self.asks.insert(level.price, level.size);
            }
        }
    }

    /// Bids keyed by price; highest is best.
    pub fn bids(&self) -> &BTreeMap<Decimal, Decimal> {
        &self.bids
    }

    /// Asks keyed by price; lowest is best.
    pub fn asks(&self) -> &BTreeMap<Decimal, Decimal> {
        &self.asks
    }

    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.keys().next_back().copied()
    }

    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.keys().next().copied()
    }

    pub fn spread(&self) -> Option<Decimal> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }

    /// Initial price for a new offer form: buyers join the best bid,
    /// sellers the best ask. Trailing zeros are stripped.
    pub fn seed_price(&self, side: Side) -> Option<String> {
        if !self.ready {
            return None;
        }
        let price = match side {
            Side::Buy => self.best_bid(),
            Side::Sell => self.best_ask(),
        };
        price.map(|p| p.normalize().to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}
