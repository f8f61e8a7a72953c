//! Simulation authority and action execution pipeline.
//!
//! The [`Simulation`] owns the authoritative [`GameState`] together with
//! everything that sits beside it (configuration, seeded RNG, accounts). It is
//! the only mutator: commands enter through [`Simulation::dispatch`] and the
//! scheduler drives [`Simulation::tick`]. Neither ever panics on bad input;
//! rejections come back as values.

mod errors;
mod tick;
mod transition;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};
pub use tick::{TickChanges, TickReport};

use crate::action::{Action, ActionResult};
use crate::config::GameConfig;
use crate::env::{AccountRegistry, Env, GameRng};
use crate::state::{GameState, IdAllocator, Mode, Timestamp, WorldSnapshot};
use crate::world::{self, GenerationReport};

/// Outcome of one dispatched command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Dispatch {
    Applied(ActionResult),
    /// The command was declined. `notified` is true when a popup explaining
    /// the rejection was added to the state.
    Rejected { error: ExecuteError, notified: bool },
}

impl Dispatch {
    /// True if observers need a fresh snapshot.
    pub fn state_changed(&self) -> bool {
        match self {
            Self::Applied(_) => true,
            Self::Rejected { notified, .. } => *notified,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    pub fn error(&self) -> Option<&ExecuteError> {
        match self {
            Self::Applied(_) => None,
            Self::Rejected { error, .. } => Some(error),
        }
    }
}

pub struct Simulation {
    config: GameConfig,
    state: GameState,
    rng: GameRng,
    accounts: AccountRegistry,
    generation: GenerationReport,
}

impl Simulation {
    /// Creates a session with a reproducible world.
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, GameRng::seed_from_u64(seed))
    }

    pub fn with_rng(config: GameConfig, mut rng: GameRng) -> Self {
        let mut ids = IdAllocator::new();
        let generated = world::generate(&config, &mut rng, &mut ids);
        let state = GameState::new(&config, ids, generated.decorations);
        Self {
            config,
            state,
            rng,
            accounts: AccountRegistry::new(),
            generation: generated.report,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot::new(self.state.clone())
    }

    pub fn generation_report(&self) -> &GenerationReport {
        &self.generation
    }

    pub fn accounts(&self) -> &AccountRegistry {
        &self.accounts
    }

    /// Replaces the terrain and clears the live entity set.
    ///
    /// A player standing in the world is sent back to the lobby so the next
    /// world entry repopulates the new map.
    pub fn reset_world(&mut self) -> &GenerationReport {
        let generated = world::generate(&self.config, &mut self.rng, &mut self.state.ids);
        self.state.decorations = generated.decorations.into();
        self.state.entities.clear();
        if self.state.mode == Mode::World {
            self.state.mode = Mode::Lobby;
        }
        self.generation = generated.report;
        &self.generation
    }

    /// Runs one command to completion.
    pub fn dispatch(&mut self, action: &Action, now: Timestamp) -> Dispatch {
        let mut env = Env::new(&self.config, &mut self.rng, &mut self.accounts, now);
        match transition::execute_transition(action, &mut self.state, &mut env) {
            Ok(result) => Dispatch::Applied(result),
            Err(error) => {
                let notified = match error.action_error().notice() {
                    Some(notice) => {
                        crate::effects::push_popup(&mut self.state, now, notice.text, notice.icon);
                        true
                    }
                    None => false,
                };
                Dispatch::Rejected { error, notified }
            }
        }
    }

    /// Advances timers and, in the world, the AI by one step.
    pub fn tick(&mut self, now: Timestamp) -> TickReport {
        let mut env = Env::new(&self.config, &mut self.rng, &mut self.accounts, now);
        tick::run_tick(&mut self.state, &mut env)
    }
}
