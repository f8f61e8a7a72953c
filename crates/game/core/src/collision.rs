//! Spatial predicate shared by player movement, AI wandering and spawning.
//!
//! Positions are the top-left corner of an actor's square box. Checks run in a
//! fixed order and the first hit wins: map bounds, then walls (box overlap with
//! an inward padding so gate gaps stay passable), then other actors (center
//! distance below [`GameConfig::separation_distance`]). Nothing here mutates
//! state.

use crate::config::GameConfig;
use crate::state::{DecorationId, EntityId, GameState, Position};

/// Why a candidate position was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blocker {
    OutOfBounds,
    Wall(DecorationId),
    Actor(EntityId),
}

/// Returns the first obstacle that prevents an actor from standing at `candidate`.
///
/// `mover` is the body being tested: it never collides with itself. `None`
/// stands for a body that does not exist yet, so every actor including the
/// player counts as an obstacle.
pub fn blocking_reason(
    state: &GameState,
    config: &GameConfig,
    candidate: Position,
    mover: Option<EntityId>,
) -> Option<Blocker> {
    if !candidate.is_finite() {
        return Some(Blocker::OutOfBounds);
    }
    let limit = config.map_size - config.actor_size;
    if candidate.x < 0.0 || candidate.y < 0.0 || candidate.x > limit || candidate.y > limit {
        return Some(Blocker::OutOfBounds);
    }

    let radius = config.actor_radius();
    let (cx, cy) = (candidate.x + radius, candidate.y + radius);
    let pad = config.wall_padding;
    for wall in state.walls() {
        let size = GameConfig::WALL_SIZE * wall.scale;
        let (wx, wy) = (wall.position.x, wall.position.y);
        if cx + radius - pad > wx
            && cx - radius + pad < wx + size
            && cy + radius - pad > wy
            && cy - radius + pad < wy + size
        {
            return Some(Blocker::Wall(wall.id));
        }
    }

    let separation = config.separation_distance();
    let center = Position::new(cx, cy);
    let too_close = |other: Position| {
        center.distance(other.offset(radius, radius)) < separation
    };

    for entity in &state.entities {
        if Some(entity.id) == mover || !entity.kind.is_actor() {
            continue;
        }
        if too_close(entity.position) {
            return Some(Blocker::Actor(entity.id));
        }
    }

    if !mover.is_some_and(EntityId::is_player) && too_close(state.player.position) {
        return Some(Blocker::Actor(EntityId::PLAYER));
    }

    None
}

pub fn is_blocked(
    state: &GameState,
    config: &GameConfig,
    candidate: Position,
    mover: Option<EntityId>,
) -> bool {
    blocking_reason(state, config, candidate, mover).is_some()
}

/// Finds the nearest free position around `origin` by scanning square rings
/// of increasing size, one separation distance apart.
///
/// Returns `None` only if nothing within `max_rings` is free.
pub fn find_free_spot(
    state: &GameState,
    config: &GameConfig,
    origin: Position,
    mover: Option<EntityId>,
    max_rings: u32,
) -> Option<Position> {
    if !is_blocked(state, config, origin, mover) {
        return Some(origin);
    }

    let step = config.separation_distance();
    for ring in 1..=max_rings as i32 {
        for dy in -ring..=ring {
            for dx in -ring..=ring {
                if dx.abs() != ring && dy.abs() != ring {
                    continue;
                }
                let candidate = origin.offset(dx as f32 * step, dy as f32 * step);
                if !is_blocked(state, config, candidate, mover) {
                    return Some(candidate);
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Decoration, Entity, IdAllocator};

    fn state_with_walls(walls: &[Position]) -> GameState {
        let mut ids = IdAllocator::new();
        let decorations: Vec<_> = walls
            .iter()
            .map(|pos| Decoration::wall(ids.decoration(), *pos))
            .collect();
        GameState::new(&GameConfig::default(), ids, decorations)
    }

    #[test]
    fn bounds_accept_the_last_full_box() {
        let config = GameConfig::default();
        let state = state_with_walls(&[]);
        let edge = config.map_size - config.actor_size;

        assert!(!is_blocked(&state, &config, Position::new(edge, edge), Some(EntityId::PLAYER)));
        assert_eq!(
            blocking_reason(&state, &config, Position::new(edge + 0.5, 0.0), Some(EntityId::PLAYER)),
            Some(Blocker::OutOfBounds)
        );
        assert_eq!(
            blocking_reason(&state, &config, Position::new(-0.1, 10.0), Some(EntityId::PLAYER)),
            Some(Blocker::OutOfBounds)
        );
    }

    #[test]
    fn wall_padding_allows_grazing_contact() {
        let config = GameConfig::default();
        let state = state_with_walls(&[Position::new(100.0, 100.0)]);

        // Overlapping the wall by less than the padding is fine.
        assert!(!is_blocked(&state, &config, Position::new(72.0, 100.0), Some(EntityId::PLAYER)));
        assert!(matches!(
            blocking_reason(&state, &config, Position::new(80.0, 100.0), Some(EntityId::PLAYER)),
            Some(Blocker::Wall(_))
        ));
    }

    #[test]
    fn single_actor_passes_through_a_city_gate() {
        let config = GameConfig::default();
        let walls: Vec<_> = [300.0, 332.0, 460.0, 492.0]
            .into_iter()
            .map(|x| Position::new(x, 300.0))
            .collect();
        let mut state = state_with_walls(&walls);
        state.player.position = Position::new(400.0, 260.0);

        let mut y = 260.0;
        while y < 340.0 {
            let step = Position::new(400.0, y + 5.0);
            assert!(!is_blocked(&state, &config, step, Some(EntityId::PLAYER)), "blocked at {step}");
            y += 5.0;
        }
    }

    #[test]
    fn actors_collide_by_center_distance_and_ignore_loot() {
        let config = GameConfig::default();
        let mut state = state_with_walls(&[]);
        state.player.position = Position::new(600.0, 600.0);
        let slime = state.ids.entity();
        state.entities.push(Entity::slime(slime, Position::new(100.0, 100.0)));
        let loot = state.ids.entity();
        state.entities.push(Entity::loot(loot, Position::new(200.0, 200.0)));

        assert_eq!(
            blocking_reason(&state, &config, Position::new(120.0, 100.0), Some(EntityId::PLAYER)),
            Some(Blocker::Actor(slime))
        );
        assert!(!is_blocked(&state, &config, Position::new(124.0, 100.0), Some(EntityId::PLAYER)));
        assert!(!is_blocked(&state, &config, Position::new(200.0, 200.0), Some(EntityId::PLAYER)));
        // The slime never blocks itself.
        assert!(!is_blocked(&state, &config, Position::new(101.0, 100.0), Some(slime)));
    }

    #[test]
    fn player_blocks_everyone_but_itself() {
        let config = GameConfig::default();
        let state = state_with_walls(&[]);
        let near = state.player.position.offset(4.0, 0.0);

        assert!(!is_blocked(&state, &config, near, Some(EntityId::PLAYER)));
        assert_eq!(
            blocking_reason(&state, &config, near, None),
            Some(Blocker::Actor(EntityId::PLAYER))
        );
    }

    #[test]
    fn free_spot_steps_away_from_occupied_origin() {
        let config = GameConfig::default();
        let mut state = state_with_walls(&[]);
        let origin = Position::new(400.0, 400.0);
        let slime = state.ids.entity();
        state.entities.push(Entity::slime(slime, origin));

        let spot = find_free_spot(&state, &config, origin, Some(EntityId::PLAYER), 4).unwrap();

        assert_ne!(spot, origin);
        assert!(!is_blocked(&state, &config, spot, Some(EntityId::PLAYER)));
    }
}
