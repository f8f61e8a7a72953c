//! Error types for the action execution pipeline.

use crate::action::{ActionError, ActionKind};
use crate::error::{ErrorSeverity, GameError};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// A command the simulation declined, with the phase that declined it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind} action failed: {error}")]
pub struct ExecuteError {
    pub kind: ActionKind,
    pub error: TransitionPhaseError<ActionError>,
}

impl ExecuteError {
    pub fn new(kind: ActionKind, error: TransitionPhaseError<ActionError>) -> Self {
        Self { kind, error }
    }

    pub fn phase(&self) -> TransitionPhase {
        self.error.phase
    }

    pub fn action_error(&self) -> &ActionError {
        &self.error.error
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        self.action_error().severity()
    }

    fn error_code(&self) -> &'static str {
        self.action_error().error_code()
    }
}
