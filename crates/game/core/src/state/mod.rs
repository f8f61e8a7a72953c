//! Authoritative game state representation.
//!
//! This module owns the data structures that describe the player, the live
//! entity set, terrain, the home base and transient notifications. Runtime
//! layers read snapshots of this state but mutate it exclusively through the
//! simulation.
mod snapshot;
pub mod types;

use std::sync::Arc;

pub use snapshot::WorldSnapshot;
pub use types::{
    Building, BuildingId, BuildingKind, Decoration, DecorationId, DecorationKind, Entity,
    EntityId, EntityKind, FloatingText, FloatingTextStyle, HomeState, IdAllocator,
    InventoryItems, Item, ItemId, ItemKind, MessageLog, NoticeId, PlantedCrop, PlayerState,
    Popup, Position, Timestamp,
};

use crate::config::GameConfig;

/// Session mode. Sessions start in `Auth`, move to `Lobby` after a login and
/// then alternate between `World` and `Home`.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Mode {
    #[default]
    Auth,
    Lobby,
    World,
    Home,
}

impl Mode {
    pub const fn is_logged_in(self) -> bool {
        !matches!(self, Self::Auth)
    }
}

/// Canonical state of one session.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct GameState {
    /// Sequential id allocator shared by entities, items, buildings and notices.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub ids: IdAllocator,
    pub mode: Mode,
    pub player: PlayerState,
    /// Live entities in insertion order.
    pub entities: Vec<Entity>,
    /// Terrain generated once per world; shared between snapshots.
    pub decorations: Arc<[Decoration]>,
    pub home: HomeState,
    pub messages: MessageLog,
    pub popups: Vec<Popup>,
    pub floating_texts: Vec<FloatingText>,
}

impl GameState {
    /// Default player name until someone logs in.
    pub const DEFAULT_PLAYER_NAME: &'static str = "Adventurer";

    /// Creates a fresh session around already generated terrain.
    ///
    /// `ids` must be the allocator that produced `decorations` so ids never collide.
    pub fn new(
        config: &GameConfig,
        mut ids: IdAllocator,
        decorations: impl Into<Arc<[Decoration]>>,
    ) -> Self {
        let home = HomeState::initial(&mut ids);
        Self {
            ids,
            mode: Mode::Auth,
            player: PlayerState::new(Self::DEFAULT_PLAYER_NAME, config.map_center()),
            entities: Vec::new(),
            decorations: decorations.into(),
            home,
            messages: MessageLog::with_welcome(),
            popups: Vec::new(),
            floating_texts: Vec::new(),
        }
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|entity| entity.id == id)
    }

    /// Removes the entity with `id`, keeping the order of the others.
    pub fn remove_entity(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.entities.iter().position(|entity| entity.id == id)?;
        Some(self.entities.remove(index))
    }

    pub fn monster_count(&self) -> usize {
        self.entities
            .iter()
            .filter(|entity| entity.kind.is_monster())
            .count()
    }

    pub fn walls(&self) -> impl Iterator<Item = &Decoration> {
        self.decorations
            .iter()
            .filter(|decoration| decoration.kind.is_collidable())
    }

    /// Checks the structural invariants every committed state must satisfy.
    pub fn check_invariants(&self) -> Result<(), &'static str> {
        if self.player.hp == 0 || self.player.hp > self.player.max_hp {
            return Err("player hp out of range");
        }
        if self.player.inventory.len() > self.player.max_inventory {
            return Err("inventory exceeds capacity");
        }
        if self.player.max_inventory > GameConfig::MAX_INVENTORY_SLOTS {
            return Err("inventory capacity exceeds hard limit");
        }
        if self
            .entities
            .iter()
            .any(|entity| !entity.is_alive() || entity.hp > entity.max_hp)
        {
            return Err("entity hp out of range");
        }
        if self
            .home
            .buildings
            .iter()
            .any(|building| building.crop.is_some() && !building.is_field())
        {
            return Err("crop planted outside a field");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> GameState {
        GameState::new(&GameConfig::default(), IdAllocator::new(), Vec::new())
    }

    #[test]
    fn new_session_starts_unauthenticated_at_map_center() {
        let state = fresh();

        assert_eq!(state.mode, Mode::Auth);
        assert_eq!(state.player.position, Position::new(400.0, 400.0));
        assert_eq!(state.messages.len(), 3);
        assert!(state.entities.is_empty());
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn remove_entity_preserves_order() {
        let mut state = fresh();
        let ids: Vec<_> = (0..3).map(|_| state.ids.entity()).collect();
        for id in &ids {
            state.entities.push(Entity::slime(*id, Position::ORIGIN));
        }

        assert!(state.remove_entity(ids[1]).is_some());
        assert_eq!(
            state.entities.iter().map(|e| e.id).collect::<Vec<_>>(),
            vec![ids[0], ids[2]]
        );
        assert!(state.remove_entity(ids[1]).is_none());
    }

    #[test]
    fn invariants_reject_dead_entities() {
        let mut state = fresh();
        let id = state.ids.entity();
        let mut slime = Entity::slime(id, Position::ORIGIN);
        slime.hp = 0;
        state.entities.push(slime);

        assert_eq!(state.check_invariants(), Err("entity hp out of range"));
    }
}
