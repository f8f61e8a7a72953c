//! Action transition dispatch and execution logic.

use crate::action::{Action, ActionError, ActionResult, ActionTransition};
use crate::env::Env;
use crate::state::GameState;

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Executes a transition through the three-phase pipeline.
///
/// Phases:
/// 1. `pre_validate` - check preconditions against the live state
/// 2. `apply` - mutate a working copy
/// 3. `post_validate` - check invariants on the working copy
///
/// The working copy replaces the live state only after all three pass, so a
/// failure in any phase leaves `state` untouched.
fn drive_transition<T>(
    transition: &T,
    state: &mut GameState,
    env: &mut Env<'_>,
) -> Result<T::Result, TransitionPhaseError<ActionError>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let mut working = state.clone();
    let result = transition
        .apply(&mut working, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(&working, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    *state = working;
    Ok(result)
}

/// Routes each action to its transition and wraps the result in [`ActionResult`].
pub(super) fn execute_transition(
    action: &Action,
    state: &mut GameState,
    env: &mut Env<'_>,
) -> Result<ActionResult, ExecuteError> {
    let fail = |error| ExecuteError::new(action.kind(), error);
    let result = match action {
        Action::Login(t) => {
            ActionResult::LoggedIn { username: drive_transition(t, state, env).map_err(fail)? }
        }
        Action::Register(t) => {
            ActionResult::Registered { username: drive_transition(t, state, env).map_err(fail)? }
        }
        Action::EnterWorld(t) => {
            ActionResult::EnteredWorld(drive_transition(t, state, env).map_err(fail)?)
        }
        Action::ReturnHome(t) => {
            drive_transition(t, state, env).map_err(fail)?;
            ActionResult::ReturnedHome
        }
        Action::Move(t) => {
            drive_transition(t, state, env).map_err(fail)?;
            ActionResult::Moved
        }
        Action::Attack(t) => ActionResult::Attack(drive_transition(t, state, env).map_err(fail)?),
        Action::Loot(t) => ActionResult::Looted(drive_transition(t, state, env).map_err(fail)?),
        Action::Chat(t) => {
            drive_transition(t, state, env).map_err(fail)?;
            ActionResult::Chatted
        }
        Action::OpenContainer(t) => {
            ActionResult::ContainerOpened(drive_transition(t, state, env).map_err(fail)?)
        }
        Action::Plant(t) => {
            drive_transition(t, state, env).map_err(fail)?;
            ActionResult::Planted
        }
        Action::Harvest(t) => ActionResult::Harvested {
            levels_gained: drive_transition(t, state, env).map_err(fail)?,
        },
        Action::RecoverHp(t) => ActionResult::Recovered {
            hp: drive_transition(t, state, env).map_err(fail)?,
        },
    };
    Ok(result)
}
