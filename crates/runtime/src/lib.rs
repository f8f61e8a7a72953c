//! Runtime orchestration for the EcoExplore authority.
//!
//! This crate hosts a [`game_core::Simulation`] inside a single worker task,
//! drives its 20 Hz tick, and fans state snapshots out to observers. Consumers
//! embed [`Runtime`] and talk to it through the cloneable [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] keeps the subscriber registry
//! - [`protocol`] frames commands and snapshots as JSON messages
//! - [`workers`] keeps background tasks internal to the crate
pub mod api;
pub mod clock;
pub mod events;
pub mod protocol;
pub mod runtime;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use clock::SessionClock;
pub use events::{Broadcaster, ChannelObserver, Observer, SnapshotReceiver, SubscriptionId};
pub use protocol::{ClientMessage, ServerMessage};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
