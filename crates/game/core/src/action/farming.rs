use crate::action::{ActionError, ActionKind, ActionTransition, require_logged_in};
use crate::config::GameConfig;
use crate::effects;
use crate::env::Env;
use crate::state::{
    Building, BuildingId, BuildingKind, FloatingTextStyle, GameState, ItemKind, PlantedCrop,
};

fn field(state: &GameState, id: BuildingId) -> Result<&Building, ActionError> {
    let building = state
        .home
        .building(id)
        .ok_or(ActionError::BuildingNotFound)?;
    if !building.is_field() {
        return Err(ActionError::NotAField);
    }
    Ok(building)
}

/// Sows one seed on an empty field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlantAction {
    pub building: BuildingId,
}

impl PlantAction {
    pub fn new(building: BuildingId) -> Self {
        Self { building }
    }
}

impl ActionTransition for PlantAction {
    type Result = ();

    fn kind(&self) -> ActionKind {
        ActionKind::Plant
    }

    fn pre_validate(&self, state: &GameState, _env: &Env<'_>) -> Result<(), ActionError> {
        require_logged_in(state)?;
        if field(state, self.building)?.crop.is_some() {
            return Err(ActionError::FieldOccupied);
        }
        if state.home.resource(ItemKind::SeedWheat) == 0 {
            return Err(ActionError::InsufficientSeeds);
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &mut Env<'_>) -> Result<(), ActionError> {
        if !state.home.consume_resource(ItemKind::SeedWheat, 1) {
            return Err(ActionError::InsufficientSeeds);
        }
        let building = state
            .home
            .building_mut(self.building)
            .ok_or(ActionError::BuildingNotFound)?;
        building.crop = Some(PlantedCrop::new(ItemKind::CropWheat, env.now));
        Ok(())
    }
}

/// Collects a ripe crop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HarvestAction {
    pub building: BuildingId,
}

impl HarvestAction {
    pub fn new(building: BuildingId) -> Self {
        Self { building }
    }
}

impl ActionTransition for HarvestAction {
    type Result = u32;

    fn kind(&self) -> ActionKind {
        ActionKind::Harvest
    }

    fn pre_validate(&self, state: &GameState, _env: &Env<'_>) -> Result<(), ActionError> {
        require_logged_in(state)?;
        if !field(state, self.building)?.is_ready() {
            return Err(ActionError::CropNotReady);
        }
        Ok(())
    }

    /// Returns the number of levels gained from the harvest experience.
    fn apply(&self, state: &mut GameState, env: &mut Env<'_>) -> Result<u32, ActionError> {
        let building = state
            .home
            .building_mut(self.building)
            .ok_or(ActionError::BuildingNotFound)?;
        let crop = building.crop.take().ok_or(ActionError::CropNotReady)?;

        effects::add_resource(state, env.now, crop.kind, GameConfig::HARVEST_YIELD);
        let levels = effects::grant_experience(state, env.now, GameConfig::HARVEST_EXP);
        effects::push_popup(state, env.now, "Harvested wheat", crop.kind.icon());
        Ok(levels)
    }
}

/// Eats one wheat at a canteen to restore hit points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecoverHpAction {
    pub building: BuildingId,
}

impl RecoverHpAction {
    pub fn new(building: BuildingId) -> Self {
        Self { building }
    }
}

impl ActionTransition for RecoverHpAction {
    type Result = u32;

    fn kind(&self) -> ActionKind {
        ActionKind::RecoverHp
    }

    fn pre_validate(&self, state: &GameState, _env: &Env<'_>) -> Result<(), ActionError> {
        require_logged_in(state)?;
        let building = state
            .home
            .building(self.building)
            .ok_or(ActionError::BuildingNotFound)?;
        if building.kind != BuildingKind::Canteen {
            return Err(ActionError::NotACanteen);
        }
        if state.home.resource(ItemKind::CropWheat) == 0 {
            return Err(ActionError::InsufficientCrop);
        }
        if state.player.is_hp_full() {
            return Err(ActionError::HpFull);
        }
        Ok(())
    }

    /// Returns the player's hit points after eating.
    fn apply(&self, state: &mut GameState, env: &mut Env<'_>) -> Result<u32, ActionError> {
        if !state.home.consume_resource(ItemKind::CropWheat, 1) {
            return Err(ActionError::InsufficientCrop);
        }
        let player = &mut state.player;
        player.hp = player
            .hp
            .saturating_add(GameConfig::HEAL_PER_CROP)
            .min(player.max_hp);
        let (hp, anchor) = (player.hp, player.position);

        effects::push_floating_text(
            state,
            env.config,
            env.rng,
            env.now,
            anchor,
            format!("+{}", GameConfig::HEAL_PER_CROP),
            FloatingTextStyle::Heal,
        );
        Ok(hp)
    }
}
