//! Unified error types surfaced by the runtime API.
//!
//! Gameplay rejections are not errors at this layer: they come back as
//! [`game_core::Dispatch`] values. Only infrastructure failures (worker
//! coordination, wire decoding) end up here.
use thiserror::Error;
use tokio::sync::oneshot;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("failed to decode client message: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to encode server message")]
    Encode(#[source] serde_json::Error),
}
