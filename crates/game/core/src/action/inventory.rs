use crate::action::{ActionError, ActionKind, ActionTransition, require_logged_in, require_mode};
use crate::config::GameConfig;
use crate::effects;
use crate::env::{Env, GameRng};
use crate::state::{EntityId, GameState, Item, ItemId, ItemKind, Mode};

/// Picks up a loot container lying in the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LootAction {
    pub entity: EntityId,
}

impl LootAction {
    pub fn new(entity: EntityId) -> Self {
        Self { entity }
    }
}

impl ActionTransition for LootAction {
    type Result = ItemKind;

    fn kind(&self) -> ActionKind {
        ActionKind::Loot
    }

    fn pre_validate(&self, state: &GameState, env: &Env<'_>) -> Result<(), ActionError> {
        require_mode(state, &[Mode::World])?;
        let entity = state
            .entity(self.entity)
            .ok_or(ActionError::EntityNotFound)?;
        if !entity.kind.is_loot() {
            return Err(ActionError::NotLootable);
        }
        if state.player.position.distance(entity.position) > env.config.loot_range {
            return Err(ActionError::TooFarToLoot);
        }
        if state.player.is_inventory_full() {
            return Err(ActionError::InventoryFull);
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &mut Env<'_>) -> Result<ItemKind, ActionError> {
        state
            .remove_entity(self.entity)
            .ok_or(ActionError::EntityNotFound)?;

        let kind = if env.rng.chance(GameConfig::RARE_CONTAINER_CHANCE) {
            ItemKind::ContainerRare
        } else {
            ItemKind::ContainerCommon
        };
        let item = Item::new(state.ids.item(), kind, 1);
        state
            .player
            .inventory
            .try_push(item)
            .map_err(|_| ActionError::InventoryFull)?;

        effects::push_popup(
            state,
            env.now,
            format!("Obtained: {}", kind.display_name()),
            kind.icon(),
        );
        Ok(kind)
    }
}

/// Resources granted by one opened container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ContainerRewards {
    pub wood: u32,
    pub stone: u32,
    pub seeds: u32,
}

impl ContainerRewards {
    /// Rolls the contents of a container. Wood and seeds are always at least one.
    pub fn roll(kind: ItemKind, rng: &mut GameRng) -> Self {
        let (wood, stone, seeds) = match kind {
            ItemKind::ContainerRare => ((3, 10), (2, 6), (2, 4)),
            _ => ((1, 5), (0, 3), (1, 2)),
        };
        Self {
            wood: rng.range_inclusive(wood.0, wood.1),
            stone: rng.range_inclusive(stone.0, stone.1),
            seeds: rng.range_inclusive(seeds.0, seeds.1),
        }
    }
}

/// Opens a container from the inventory into the home resource store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpenContainerAction {
    pub item: ItemId,
}

impl OpenContainerAction {
    pub fn new(item: ItemId) -> Self {
        Self { item }
    }
}

impl ActionTransition for OpenContainerAction {
    type Result = ContainerRewards;

    fn kind(&self) -> ActionKind {
        ActionKind::OpenContainer
    }

    fn pre_validate(&self, state: &GameState, _env: &Env<'_>) -> Result<(), ActionError> {
        require_logged_in(state)?;
        let item = state.player.item(self.item).ok_or(ActionError::ItemNotFound)?;
        if !item.kind.is_container() {
            return Err(ActionError::NotAContainer);
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        env: &mut Env<'_>,
    ) -> Result<ContainerRewards, ActionError> {
        let item = state
            .player
            .take_item(self.item)
            .ok_or(ActionError::ItemNotFound)?;
        let rewards = ContainerRewards::roll(item.kind, env.rng);

        effects::add_resource(state, env.now, ItemKind::ResourceWood, rewards.wood);
        effects::add_resource(state, env.now, ItemKind::ResourceStone, rewards.stone);
        effects::add_resource(state, env.now, ItemKind::SeedWheat, rewards.seeds);
        Ok(rewards)
    }
}
