//! Fixed-rate world update.

use bitflags::bitflags;

use crate::ai::{self, AiOutcome};
use crate::config::GameConfig;
use crate::effects;
use crate::env::Env;
use crate::state::{GameState, ItemKind, Mode};
use crate::world::{self, SpawnReport};

bitflags! {
    /// Tracks which parts of the state a tick touched.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct TickChanges: u8 {
        const NOTICES_EXPIRED  = 1 << 0;
        const CROPS_MATURED    = 1 << 1;
        const ACTORS_MOVED     = 1 << 2;
        const COMBAT           = 1 << 3;
        const CHAT             = 1 << 4;
        const MONSTERS_SPAWNED = 1 << 5;
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub changes: TickChanges,
    pub ai: AiOutcome,
    pub spawn: Option<SpawnReport>,
}

impl TickReport {
    pub fn state_changed(&self) -> bool {
        !self.changes.is_empty()
    }
}

pub(super) fn run_tick(state: &mut GameState, env: &mut Env<'_>) -> TickReport {
    let mut report = TickReport::default();

    if expire_notices(state, env) {
        report.changes |= TickChanges::NOTICES_EXPIRED;
    }
    if mature_crops(state, env) {
        report.changes |= TickChanges::CROPS_MATURED;
    }

    if state.mode != Mode::World {
        return report;
    }

    report.ai = ai::step(state, env);
    report.changes.set(TickChanges::ACTORS_MOVED, report.ai.moved > 0);
    report.changes.set(TickChanges::COMBAT, report.ai.assists > 0);
    report.changes.set(TickChanges::CHAT, report.ai.chatted);

    if env.rng.chance(GameConfig::MONSTER_SPAWN_CHANCE)
        && state.monster_count() < env.config.monster_cap
    {
        let spawn = world::spawn_monsters(state, env.config, env.rng, 1);
        report
            .changes
            .set(TickChanges::MONSTERS_SPAWNED, !spawn.is_empty());
        report.spawn = Some(spawn);
    }

    report
}

fn expire_notices(state: &mut GameState, env: &Env<'_>) -> bool {
    let before = state.popups.len() + state.floating_texts.len();
    state.popups.retain(|popup| !popup.is_expired(env.now));
    state.floating_texts.retain(|text| !text.is_expired(env.now));
    before != state.popups.len() + state.floating_texts.len()
}

/// Flips every planted crop whose maturation time has elapsed. Runs in any mode.
fn mature_crops(state: &mut GameState, env: &Env<'_>) -> bool {
    let mut ripened = Vec::new();
    for building in &mut state.home.buildings {
        if let Some(crop) = building.crop.as_mut() {
            if !crop.is_ready && crop.has_matured(env.now) {
                crop.is_ready = true;
                ripened.push(crop.kind);
            }
        }
    }
    for kind in &ripened {
        let text = match kind {
            ItemKind::CropWheat => "Wheat is ready to harvest",
            _ => "A crop is ready to harvest",
        };
        effects::push_popup(state, env.now, text, kind.icon());
    }
    !ripened.is_empty()
}
