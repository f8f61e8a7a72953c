//! Population of the world map: the ally bot and wandering monsters.

use crate::collision;
use crate::config::GameConfig;
use crate::env::GameRng;
use crate::state::{Entity, EntityId, GameState, Position};

/// Outcome of a monster spawn pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpawnReport {
    pub spawned: Vec<EntityId>,
    /// Monsters placed by the grid scan after random sampling ran dry.
    pub fallbacks: usize,
    /// Monsters that found no legal position at all.
    pub skipped: usize,
}

impl SpawnReport {
    pub fn is_empty(&self) -> bool {
        self.spawned.is_empty()
    }
}

/// True inside the square around the city where monsters never appear.
pub fn in_safe_zone(position: Position) -> bool {
    let inside = |v: f32| v > GameConfig::SPAWN_EXCLUSION_MIN && v < GameConfig::SPAWN_EXCLUSION_MAX;
    inside(position.x) && inside(position.y)
}

fn spawnable(state: &GameState, config: &GameConfig, candidate: Position) -> bool {
    !in_safe_zone(candidate) && !collision::is_blocked(state, config, candidate, None)
}

/// Spawns up to `count` monsters outside the safe zone.
///
/// Each monster gets [`GameConfig::SPAWN_ATTEMPTS`] random draws; if all of
/// them land somewhere illegal a deterministic grid scan picks the first free
/// cell instead. A monster is skipped only when the scan also comes up empty.
pub fn spawn_monsters(
    state: &mut GameState,
    config: &GameConfig,
    rng: &mut GameRng,
    count: usize,
) -> SpawnReport {
    let mut report = SpawnReport::default();
    let extent = config.map_size - 50.0;

    for _ in 0..count {
        let mut position = None;
        for _ in 0..GameConfig::SPAWN_ATTEMPTS {
            let candidate =
                Position::new(rng.range_f32(0.0, extent), rng.range_f32(0.0, extent));
            if spawnable(state, config, candidate) {
                position = Some(candidate);
                break;
            }
        }
        if position.is_none() {
            position = grid_scan(state, config);
            if position.is_some() {
                report.fallbacks += 1;
            }
        }
        let Some(position) = position else {
            report.skipped += 1;
            continue;
        };

        let id = state.ids.entity();
        let monster = if rng.chance(GameConfig::BEAST_CHANCE) {
            Entity::beast(id, position)
        } else {
            Entity::slime(id, position)
        };
        state.entities.push(monster);
        report.spawned.push(id);
    }

    report
}

fn grid_scan(state: &GameState, config: &GameConfig) -> Option<Position> {
    let step = config.actor_size;
    let limit = config.map_size - config.actor_size;
    let mut y = 0.0;
    while y <= limit {
        let mut x = 0.0;
        while x <= limit {
            let candidate = Position::new(x, y);
            if spawnable(state, config, candidate) {
                return Some(candidate);
            }
            x += step;
        }
        y += step;
    }
    None
}

/// Places the ally bot beside the player. Returns `None` if there is no room.
pub fn spawn_ally(state: &mut GameState, config: &GameConfig) -> Option<EntityId> {
    let beside = state.player.position.offset(30.0, 0.0);
    let position = collision::find_free_spot(state, config, beside, None, 6)?;
    let id = state.ids.entity();
    state.entities.push(Entity::ally(id, position));
    Some(id)
}
