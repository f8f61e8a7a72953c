use crate::action::{ActionError, ActionKind, ActionTransition, require_mode};
use crate::collision;
use crate::env::Env;
use crate::state::{EntityId, GameState, Mode, Position};

/// Shifts the player by a client-supplied delta. A zero delta is a silent no-op.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveAction {
    pub delta: Position,
}

impl MoveAction {
    pub fn new(delta: Position) -> Self {
        Self { delta }
    }

    fn destination(&self, state: &GameState) -> Position {
        state.player.position.offset(self.delta.x, self.delta.y)
    }
}

impl ActionTransition for MoveAction {
    type Result = ();

    fn kind(&self) -> ActionKind {
        ActionKind::Move
    }

    fn pre_validate(&self, state: &GameState, env: &Env<'_>) -> Result<(), ActionError> {
        require_mode(state, &[Mode::World])?;
        if !self.delta.is_finite() || self.delta == Position::ORIGIN {
            return Err(ActionError::InvalidDelta);
        }
        let destination = self.destination(state);
        if collision::is_blocked(state, env.config, destination, Some(EntityId::PLAYER)) {
            return Err(ActionError::Blocked);
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &mut Env<'_>) -> Result<(), ActionError> {
        state.player.position = self.destination(state);
        Ok(())
    }
}
