//! Player-facing command surface.
//!
//! Each command is a small struct implementing [`ActionTransition`]. The
//! engine drives it through `pre_validate → apply → post_validate`; checks
//! that can fail belong in `pre_validate` so a rejected command never touches
//! state.
//!
//! # Module Structure
//!
//! - `error`: [`ActionError`] and the user-facing [`Notice`] of a rejection
//! - `session`: login, registration and switching between world and home
//! - `movement`: player movement
//! - `combat`: melee attacks
//! - `inventory`: looting and opening containers
//! - `farming`: planting, harvesting and eating at the canteen
//! - `chat`: chat messages

mod chat;
mod combat;
mod error;
mod farming;
mod inventory;
mod movement;
mod session;

pub use chat::ChatAction;
pub use combat::{AttackAction, AttackOutcome};
pub use error::{ActionError, Notice};
pub use farming::{HarvestAction, PlantAction, RecoverHpAction};
pub use inventory::{ContainerRewards, LootAction, OpenContainerAction};
pub use movement::MoveAction;
pub use session::{Credentials, EnterWorldAction, LoginAction, RegisterAction, ReturnHomeAction};

use crate::env::Env;
use crate::state::{BuildingId, EntityId, GameState, ItemId, ItemKind, Mode, Position};
use crate::world::SpawnReport;

/// Defines how a concrete command mutates game state.
///
/// Implementors surface their preconditions in `pre_validate`, which sees the
/// state **before** mutation and must be side-effect free. `apply` may assume
/// the preconditions hold.
pub trait ActionTransition {
    type Result;

    fn kind(&self) -> ActionKind;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &GameState, _env: &Env<'_>) -> Result<(), ActionError> {
        Ok(())
    }

    /// Applies the action by mutating the game state directly.
    fn apply(&self, state: &mut GameState, env: &mut Env<'_>) -> Result<Self::Result, ActionError>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(&self, state: &GameState, _env: &Env<'_>) -> Result<(), ActionError> {
        state
            .check_invariants()
            .map_err(ActionError::InvariantViolated)
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    Login,
    Register,
    EnterWorld,
    ReturnHome,
    Move,
    Attack,
    Loot,
    Chat,
    OpenContainer,
    Plant,
    Harvest,
    RecoverHp,
}

/// A command submitted to the simulation.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Login(LoginAction),
    Register(RegisterAction),
    EnterWorld(EnterWorldAction),
    ReturnHome(ReturnHomeAction),
    Move(MoveAction),
    Attack(AttackAction),
    Loot(LootAction),
    Chat(ChatAction),
    OpenContainer(OpenContainerAction),
    Plant(PlantAction),
    Harvest(HarvestAction),
    RecoverHp(RecoverHpAction),
}

impl Action {
    pub fn login(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Login(LoginAction(Credentials::new(username, password)))
    }

    pub fn register(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Register(RegisterAction(Credentials::new(username, password)))
    }

    pub fn enter_world() -> Self {
        Self::EnterWorld(EnterWorldAction)
    }

    pub fn return_home() -> Self {
        Self::ReturnHome(ReturnHomeAction)
    }

    pub fn move_by(dx: f32, dy: f32) -> Self {
        Self::Move(MoveAction::new(Position::new(dx, dy)))
    }

    pub fn attack(target: EntityId) -> Self {
        Self::Attack(AttackAction::new(target))
    }

    pub fn loot(entity: EntityId) -> Self {
        Self::Loot(LootAction::new(entity))
    }

    pub fn chat(text: impl Into<String>) -> Self {
        Self::Chat(ChatAction::new(text))
    }

    pub fn open_container(item: ItemId) -> Self {
        Self::OpenContainer(OpenContainerAction::new(item))
    }

    pub fn plant(building: BuildingId) -> Self {
        Self::Plant(PlantAction::new(building))
    }

    pub fn harvest(building: BuildingId) -> Self {
        Self::Harvest(HarvestAction::new(building))
    }

    pub fn recover_hp(building: BuildingId) -> Self {
        Self::RecoverHp(RecoverHpAction::new(building))
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Login(_) => ActionKind::Login,
            Self::Register(_) => ActionKind::Register,
            Self::EnterWorld(_) => ActionKind::EnterWorld,
            Self::ReturnHome(_) => ActionKind::ReturnHome,
            Self::Move(_) => ActionKind::Move,
            Self::Attack(_) => ActionKind::Attack,
            Self::Loot(_) => ActionKind::Loot,
            Self::Chat(_) => ActionKind::Chat,
            Self::OpenContainer(_) => ActionKind::OpenContainer,
            Self::Plant(_) => ActionKind::Plant,
            Self::Harvest(_) => ActionKind::Harvest,
            Self::RecoverHp(_) => ActionKind::RecoverHp,
        }
    }
}

/// Action-specific result of a successful command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionResult {
    LoggedIn { username: String },
    Registered { username: String },
    EnteredWorld(SpawnReport),
    ReturnedHome,
    Moved,
    Attack(AttackOutcome),
    Looted(ItemKind),
    Chatted,
    ContainerOpened(ContainerRewards),
    Planted,
    Harvested { levels_gained: u32 },
    Recovered { hp: u32 },
}

pub(crate) fn require_mode(state: &GameState, allowed: &[Mode]) -> Result<(), ActionError> {
    if allowed.contains(&state.mode) {
        Ok(())
    } else {
        Err(ActionError::WrongMode)
    }
}

pub(crate) fn require_logged_in(state: &GameState) -> Result<(), ActionError> {
    if state.mode.is_logged_in() {
        Ok(())
    } else {
        Err(ActionError::WrongMode)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::config::GameConfig;
    use crate::env::{AccountRegistry, Env, GameRng};
    use crate::state::{GameState, IdAllocator, Mode, Timestamp};

    use super::{ActionError, ActionTransition};

    /// Bare session on an empty map with a logged-in player.
    pub struct Harness {
        pub state: GameState,
        pub config: GameConfig,
        pub rng: GameRng,
        pub accounts: AccountRegistry,
        pub now: Timestamp,
    }

    impl Harness {
        pub fn new(mode: Mode) -> Self {
            let config = GameConfig::default();
            let mut state = GameState::new(&config, IdAllocator::new(), Vec::new());
            state.mode = mode;
            Self {
                state,
                config,
                rng: GameRng::seed_from_u64(99),
                accounts: AccountRegistry::new(),
                now: Timestamp(1_000),
            }
        }

        /// Runs the three phases against the live state, stopping at the first error.
        pub fn run<T: ActionTransition>(&mut self, action: &T) -> Result<T::Result, ActionError> {
            let mut env = Env::new(&self.config, &mut self.rng, &mut self.accounts, self.now);
            action.pre_validate(&self.state, &env)?;
            let result = action.apply(&mut self.state, &mut env)?;
            action.post_validate(&self.state, &env)?;
            Ok(result)
        }
    }
}
