use std::ops::Deref;
use std::sync::Arc;

use super::GameState;

/// Immutable view of the state handed to observers.
///
/// Cloning is cheap; every observer of one broadcast shares the same allocation
/// and none of them can reach the authoritative copy.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct WorldSnapshot(Arc<GameState>);

impl WorldSnapshot {
    pub fn new(state: GameState) -> Self {
        Self(Arc::new(state))
    }

    pub fn state(&self) -> &GameState {
        &self.0
    }

    /// Returns true when both snapshots come from the same broadcast.
    pub fn ptr_eq(&self, other: &WorldSnapshot) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for WorldSnapshot {
    type Target = GameState;

    fn deref(&self) -> &GameState {
        &self.0
    }
}

impl From<GameState> for WorldSnapshot {
    fn from(state: GameState) -> Self {
        Self::new(state)
    }
}
