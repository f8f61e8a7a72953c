//! Deterministic game logic and data types for the EcoExplore simulation.
//!
//! `game-core` defines the canonical rules (actions, collision, world
//! generation, AI, tick) and the session state they operate on. It performs no
//! I/O and never reads the wall clock: time and randomness are injected, so a
//! seeded [`engine::Simulation`] replays identically. All state mutation flows
//! through the simulation, and the runtime depends on the types re-exported here.
pub mod action;
pub mod ai;
pub mod collision;
pub mod config;
pub mod effects;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;
pub mod world;

pub use action::{
    Action, ActionError, ActionKind, ActionResult, ActionTransition, AttackOutcome,
    ContainerRewards, Credentials, Notice,
};
pub use collision::{Blocker, blocking_reason, find_free_spot, is_blocked};
pub use config::GameConfig;
pub use engine::{
    Dispatch, ExecuteError, Simulation, TickChanges, TickReport, TransitionPhase,
    TransitionPhaseError,
};
pub use env::{AccountRegistry, Env, GameRng};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    Building, BuildingId, BuildingKind, Decoration, DecorationId, DecorationKind, Entity,
    EntityId, EntityKind, FloatingText, FloatingTextStyle, GameState, HomeState, IdAllocator,
    Item, ItemId, ItemKind, MessageLog, Mode, NoticeId, PlantedCrop, PlayerState, Popup, Position,
    Timestamp, WorldSnapshot,
};
pub use world::{GenerationReport, SpawnReport};
