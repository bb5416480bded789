//! Order-book tick and session-change feeds.
//!
//! Broadcast channels: a receiver handle *is* the subscription, and
//! dropping it releases it — no manual unsubscribe bookkeeping. Forms hold
//! their receivers for exactly their own lifetime.

use tokio::sync::broadcast;

use super::SessionState;

const FEED_CAPACITY: usize = 32;

// ─── Price ticks ─────────────────────────────────────────────────────────────

/// A "use this market price" tick from the order-book pane.
#[derive(Debug, Clone)]
pub struct PriceTick {
    pub pick_price: String,
}

/// Publisher side of the order-book tick feed.
pub struct PriceFeed {
    tx: broadcast::Sender<PriceTick>,
}

impl PriceFeed {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(FEED_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PriceTick> {
        self.tx.subscribe()
    }

    /// Lossy by design: ticks with no live subscriber are dropped.
    pub fn publish(&self, tick: PriceTick) {
        let _ = self.tx.send(tick);
    }
}

impl Default for PriceFeed {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Session events ──────────────────────────────────────────────────────────

/// Account and login-state change notifications.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    StateChanged(SessionState),
    /// Balances, subentries, or open offers changed.
    AccountUpdated,
}

/// Publisher side of the session-change feed.
pub struct SessionEvents {
    tx: broadcast::Sender<SessionEvent>,
}

impl SessionEvents {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(FEED_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.tx.subscribe()
    }

    pub fn publish(&self, event: SessionEvent) {
        let _ = self.tx.send(event);
    }
}

impl Default for SessionEvents {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_reaches_subscriber() {
        let feed = PriceFeed::new();
        let mut rx = feed.subscribe();
        feed.publish(PriceTick {
            pick_price: "0.5".into(),
        });
        let tick = rx.try_recv().unwrap();
        assert_eq!(tick.pick_price, "0.5");
    }

    #[test]
    fn test_publish_without_subscribers_is_fine() {
        let feed = PriceFeed::new();
        feed.publish(PriceTick {
            pick_price: "1".into(),
        });
    }

    #[test]
    fn test_dropped_receiver_stops_receiving() {
        let events = SessionEvents::new();
        let rx = events.subscribe();
        drop(rx);
        events.publish(SessionEvent::AccountUpdated);
        assert_eq!(events.tx.receiver_count(), 0);
    }
}
