//! Subscriber registry keyed by subscription id.

use std::collections::BTreeMap;
use std::fmt;

use game_core::WorldSnapshot;

use super::observer::Observer;

/// Handle returned by a subscription; pass it back to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "subscription#{}", self.0)
    }
}

/// Delivers snapshots to every live observer in subscription order.
///
/// Ids increase monotonically, so iterating the ordered map visits observers
/// in the order they subscribed. All observers of one broadcast share the same
/// immutable snapshot.
#[derive(Default)]
pub struct Broadcaster {
    observers: BTreeMap<SubscriptionId, Box<dyn Observer>>,
    next_id: u64,
}

impl Broadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `observer` and hands it `current` immediately.
    ///
    /// An observer that is already closed is not kept, but still gets an id.
    pub fn subscribe(
        &mut self,
        mut observer: Box<dyn Observer>,
        current: &WorldSnapshot,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;

        if observer.deliver(current) {
            self.observers.insert(id, observer);
            tracing::debug!(
                target: "runtime::broadcast",
                %id,
                subscribers = self.observers.len(),
                "Observer subscribed"
            );
        }
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let removed = self.observers.remove(&id).is_some();
        if removed {
            tracing::debug!(
                target: "runtime::broadcast",
                %id,
                subscribers = self.observers.len(),
                "Observer unsubscribed"
            );
        }
        removed
    }

    /// Returns the number of observers that received the snapshot.
    pub fn broadcast(&mut self, snapshot: &WorldSnapshot) -> usize {
        self.observers.retain(|id, observer| {
            let alive = observer.deliver(snapshot);
            if !alive {
                tracing::debug!(target: "runtime::broadcast", %id, "Dropping closed observer");
            }
            alive
        });
        tracing::trace!(
            target: "runtime::broadcast",
            subscribers = self.observers.len(),
            "Broadcast delivered"
        );
        self.observers.len()
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use game_core::{GameConfig, GameState, IdAllocator};

    use super::*;
    use crate::events::ChannelObserver;

    fn snapshot() -> WorldSnapshot {
        let config = GameConfig::default();
        WorldSnapshot::new(GameState::new(&config, IdAllocator::new(), Vec::new()))
    }

    fn recorder(log: &Arc<Mutex<Vec<&'static str>>>, tag: &'static str) -> Box<dyn Observer> {
        let log = Arc::clone(log);
        Box::new(move |_: &WorldSnapshot| log.lock().unwrap().push(tag))
    }

    #[test]
    fn subscribe_delivers_current_state_first() {
        let mut bus = Broadcaster::new();
        let (observer, mut rx) = ChannelObserver::new();
        let current = snapshot();

        bus.subscribe(Box::new(observer), &current);

        let received = rx.try_recv().unwrap();
        assert!(received.ptr_eq(&current));
        assert!(rx.try_recv().is_none());
    }

    #[test]
    fn broadcast_follows_subscription_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut bus = Broadcaster::new();
        let current = snapshot();
        bus.subscribe(recorder(&log, "first"), &current);
        bus.subscribe(recorder(&log, "second"), &current);
        log.lock().unwrap().clear();

        assert_eq!(bus.broadcast(&current), 2);

        assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn unsubscribed_observer_stops_receiving() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut bus = Broadcaster::new();
        let current = snapshot();
        let first = bus.subscribe(recorder(&log, "first"), &current);
        bus.subscribe(recorder(&log, "second"), &current);
        log.lock().unwrap().clear();

        assert!(bus.unsubscribe(first));
        assert!(!bus.unsubscribe(first));
        bus.broadcast(&current);

        assert_eq!(*log.lock().unwrap(), vec!["second"]);
    }

    #[test]
    fn channel_keeps_only_the_latest_snapshot() {
        let mut bus = Broadcaster::new();
        let (observer, mut rx) = ChannelObserver::new();
        bus.subscribe(Box::new(observer), &snapshot());

        let mut last = snapshot();
        for _ in 0..50 {
            last = snapshot();
            assert_eq!(bus.broadcast(&last), 1);
        }

        let received = rx.try_recv().unwrap();
        assert!(received.ptr_eq(&last));
        assert!(rx.try_recv().is_none());
    }

    #[test]
    fn dropped_receiver_is_pruned() {
        let mut bus = Broadcaster::new();
        let (observer, rx) = ChannelObserver::new();
        bus.subscribe(Box::new(observer), &snapshot());
        drop(rx);

        assert_eq!(bus.broadcast(&snapshot()), 0);
        assert!(bus.is_empty());
    }
}
