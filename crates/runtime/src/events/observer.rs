use tokio::sync::watch;

use game_core::WorldSnapshot;

/// Receiver of state snapshots.
///
/// Observers run on the simulation worker, so `deliver` must return promptly.
/// Returning `false` reports that the observer is gone; the broadcaster then
/// drops it.
pub trait Observer: Send + 'static {
    fn deliver(&mut self, snapshot: &WorldSnapshot) -> bool;
}

impl<F> Observer for F
where
    F: FnMut(&WorldSnapshot) + Send + 'static,
{
    fn deliver(&mut self, snapshot: &WorldSnapshot) -> bool {
        self(snapshot);
        true
    }
}

/// Publishes snapshots into a single-slot channel.
///
/// Only the most recent snapshot is retained, so a stalled reader holds at
/// most one pending state no matter how many broadcasts it misses.
pub struct ChannelObserver {
    tx: watch::Sender<Option<WorldSnapshot>>,
}

impl ChannelObserver {
    pub fn new() -> (Self, SnapshotReceiver) {
        let (tx, rx) = watch::channel(None);
        (Self { tx }, SnapshotReceiver { rx })
    }
}

impl Observer for ChannelObserver {
    fn deliver(&mut self, snapshot: &WorldSnapshot) -> bool {
        self.tx.send(Some(snapshot.clone())).is_ok()
    }
}

/// Reading side of a [`ChannelObserver`].
#[derive(Debug)]
pub struct SnapshotReceiver {
    rx: watch::Receiver<Option<WorldSnapshot>>,
}

impl SnapshotReceiver {
    /// Waits for a snapshot newer than the last one read.
    ///
    /// Returns `None` once the observer has been dropped and the final
    /// snapshot, if any, has been read.
    pub async fn recv(&mut self) -> Option<WorldSnapshot> {
        self.rx.changed().await.ok()?;
        self.rx.borrow_and_update().clone()
    }

    /// Returns the latest unread snapshot without waiting.
    pub fn try_recv(&mut self) -> Option<WorldSnapshot> {
        let latest = self.rx.borrow_and_update();
        if latest.has_changed() {
            (*latest).clone()
        } else {
            None
        }
    }
}
