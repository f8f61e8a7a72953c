//! Snapshot fan-out to observers.
//!
//! The [`Broadcaster`] is owned by the simulation worker and never shared, so
//! registration, removal and delivery are serialized with every mutation.

mod bus;
mod observer;

pub use bus::{Broadcaster, SubscriptionId};
pub use observer::{ChannelObserver, Observer, SnapshotReceiver};
