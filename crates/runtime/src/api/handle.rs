//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for every
//! gameplay command, state queries and snapshot subscriptions. Every call is
//! serialized through the single simulation worker, so handles can be shared
//! freely across tasks.
use tokio::sync::{mpsc, oneshot};

use game_core::{
    Action, BuildingId, Dispatch, EntityId, GenerationReport, ItemId, WorldSnapshot,
};

use super::errors::{Result, RuntimeError};
use crate::events::{ChannelObserver, Observer, SnapshotReceiver, SubscriptionId};
use crate::protocol::{ClientMessage, ServerMessage};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>) -> Self {
        Self { command_tx }
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Runs one gameplay command and returns how the authority handled it.
    pub async fn dispatch(&self, action: Action) -> Result<Dispatch> {
        self.request(|reply| Command::Dispatch { action, reply })
            .await
    }

    pub async fn login(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Dispatch> {
        self.dispatch(Action::login(username, password)).await
    }

    pub async fn register(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Dispatch> {
        self.dispatch(Action::register(username, password)).await
    }

    pub async fn enter_world(&self) -> Result<Dispatch> {
        self.dispatch(Action::enter_world()).await
    }

    pub async fn return_home(&self) -> Result<Dispatch> {
        self.dispatch(Action::return_home()).await
    }

    pub async fn move_player(&self, dx: f32, dy: f32) -> Result<Dispatch> {
        self.dispatch(Action::move_by(dx, dy)).await
    }

    pub async fn attack(&self, target: EntityId) -> Result<Dispatch> {
        self.dispatch(Action::attack(target)).await
    }

    pub async fn loot(&self, entity: EntityId) -> Result<Dispatch> {
        self.dispatch(Action::loot(entity)).await
    }

    pub async fn send_chat(&self, text: impl Into<String>) -> Result<Dispatch> {
        self.dispatch(Action::chat(text)).await
    }

    pub async fn open_container(&self, item: ItemId) -> Result<Dispatch> {
        self.dispatch(Action::open_container(item)).await
    }

    pub async fn plant_crop(&self, building: BuildingId) -> Result<Dispatch> {
        self.dispatch(Action::plant(building)).await
    }

    pub async fn harvest_crop(&self, building: BuildingId) -> Result<Dispatch> {
        self.dispatch(Action::harvest(building)).await
    }

    pub async fn recover_hp(&self, building: BuildingId) -> Result<Dispatch> {
        self.dispatch(Action::recover_hp(building)).await
    }

    /// Query the current game state (read-only snapshot)
    pub async fn query_state(&self) -> Result<WorldSnapshot> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Regenerates the terrain and clears all live entities.
    pub async fn reset_world(&self) -> Result<GenerationReport> {
        self.request(|reply| Command::ResetWorld { reply }).await
    }

    /// Registers an observer. It receives the current state right away and
    /// then every broadcast, in subscription order.
    pub async fn subscribe(&self, observer: impl Observer) -> Result<SubscriptionId> {
        let observer: Box<dyn Observer> = Box::new(observer);
        self.request(|reply| Command::Subscribe { observer, reply })
            .await
    }

    /// Subscribes a latest-value channel; the first read is the current state.
    ///
    /// Dropping the receiver is enough to unsubscribe: the observer is pruned
    /// at the next broadcast.
    pub async fn subscribe_channel(&self) -> Result<(SubscriptionId, SnapshotReceiver)> {
        let (observer, rx) = ChannelObserver::new();
        let id = self.subscribe(observer).await?;
        Ok((id, rx))
    }

    /// Returns false if `id` was not subscribed.
    pub async fn unsubscribe(&self, id: SubscriptionId) -> Result<bool> {
        self.request(|reply| Command::Unsubscribe { id, reply })
            .await
    }

    /// Handles one wire message from a client.
    ///
    /// Malformed input never reaches the authority; it is answered with a
    /// [`ServerMessage::Error`]. Accepted commands produce no direct reply:
    /// their effect arrives through the subscription.
    pub async fn handle_message(&self, raw: &str) -> Result<Option<ServerMessage>> {
        match ClientMessage::decode(raw) {
            Ok(message) => {
                self.dispatch(message.into_action()).await?;
                Ok(None)
            }
            Err(error) => {
                tracing::debug!(
                    target: "runtime::protocol",
                    error = %error,
                    "Rejected malformed client message"
                );
                Ok(Some(ServerMessage::error(&error)))
            }
        }
    }
}
