//! Random-walk behaviour of the ally bot and monsters.
//!
//! There is no pathfinding: each actor proposes a small random step and keeps
//! it only if the collision predicate allows it.

use crate::collision;
use crate::config::GameConfig;
use crate::effects;
use crate::env::Env;
use crate::state::{EntityId, EntityKind, FloatingTextStyle, GameState};

const ALLY_LINES: [&str; 2] = ["Nice weather today!", "Watch out for slimes!"];

/// What one AI pass changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AiOutcome {
    pub moved: usize,
    pub assists: usize,
    pub kills: usize,
    pub chatted: bool,
}

/// Moves every ally and monster once and lets allies act.
pub fn step(state: &mut GameState, env: &mut Env<'_>) -> AiOutcome {
    let mut outcome = AiOutcome::default();

    let actors: Vec<(EntityId, EntityKind)> = state
        .entities
        .iter()
        .filter(|entity| entity.kind.is_actor())
        .map(|entity| (entity.id, entity.kind))
        .collect();

    for (id, kind) in actors {
        match kind {
            EntityKind::OtherPlayer => {
                if wander(state, env, id, GameConfig::ALLY_WANDER_SPEED) {
                    outcome.moved += 1;
                }
                if let Some(killed) = ally_assist(state, env, id) {
                    outcome.assists += 1;
                    outcome.kills += usize::from(killed);
                }
                if ally_chat(state, env, id) {
                    outcome.chatted = true;
                }
            }
            kind if kind.is_monster() => {
                if wander(state, env, id, GameConfig::MONSTER_WANDER_SPEED) {
                    outcome.moved += 1;
                }
            }
            _ => {}
        }
    }

    outcome
}

/// Proposes a step of at most `speed` per axis. Returns true if the entity moved.
///
/// Entities removed earlier in the same pass are skipped.
pub fn wander(state: &mut GameState, env: &mut Env<'_>, id: EntityId, speed: f32) -> bool {
    let Some(origin) = state.entity(id).map(|entity| entity.position) else {
        return false;
    };
    let dx = env.rng.unit_offset(speed);
    let dy = env.rng.unit_offset(speed);
    let target = origin.offset(dx, dy);

    if collision::is_blocked(state, env.config, target, Some(id)) {
        return false;
    }
    match state.entity_mut(id) {
        Some(entity) => {
            entity.position = target;
            true
        }
        None => false,
    }
}

/// Occasionally chips at the first monster within assist range.
///
/// Returns `Some(killed)` when the ally struck. Kills by the ally drop loot
/// but grant the player no experience.
fn ally_assist(state: &mut GameState, env: &mut Env<'_>, ally: EntityId) -> Option<bool> {
    let origin = state.entity(ally)?.position;
    let target = state
        .entities
        .iter()
        .find(|entity| {
            entity.kind.is_monster()
                && entity.position.distance(origin) < GameConfig::ALLY_ASSIST_RANGE
        })
        .map(|entity| entity.id)?;

    if !env.rng.chance(GameConfig::ALLY_ASSIST_CHANCE) {
        return None;
    }

    let monster = state.entity_mut(target)?;
    let died = monster.take_damage(GameConfig::ALLY_ASSIST_DAMAGE);
    let anchor = monster.position;
    effects::push_floating_text(
        state,
        env.config,
        env.rng,
        env.now,
        anchor,
        format!("-{}", GameConfig::ALLY_ASSIST_DAMAGE),
        FloatingTextStyle::MonsterDamage,
    );
    if died {
        effects::kill_entity(state, env.now, target);
    }
    Some(died)
}

fn ally_chat(state: &mut GameState, env: &mut Env<'_>, ally: EntityId) -> bool {
    if !env.rng.chance(GameConfig::ALLY_CHAT_CHANCE) {
        return false;
    }
    let Some(name) = state.entity(ally).map(|entity| entity.name.clone()) else {
        return false;
    };
    let line = ALLY_LINES[env.rng.index(ALLY_LINES.len())];
    state.messages.push(format!("[{name}]: {line}"));
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{AccountRegistry, GameRng};
    use crate::state::{Entity, IdAllocator, Position, Timestamp};

    struct Fixture {
        state: GameState,
        config: GameConfig,
        rng: GameRng,
        accounts: AccountRegistry,
    }

    impl Fixture {
        fn new() -> Self {
            let config = GameConfig::default();
            Self {
                state: GameState::new(&config, IdAllocator::new(), Vec::new()),
                config,
                rng: GameRng::seed_from_u64(17),
                accounts: AccountRegistry::new(),
            }
        }

        fn run<R>(&mut self, f: impl FnOnce(&mut GameState, &mut Env<'_>) -> R) -> R {
            let mut env = Env::new(&self.config, &mut self.rng, &mut self.accounts, Timestamp(0));
            f(&mut self.state, &mut env)
        }
    }

    #[test]
    fn wander_moves_at_most_speed_per_axis() {
        let mut fx = Fixture::new();
        let id = fx.state.ids.entity();
        let start = Position::new(100.0, 100.0);
        fx.state.entities.push(Entity::slime(id, start));

        for _ in 0..50 {
            let before = fx.state.entity(id).unwrap().position;
            fx.run(|state, env| wander(state, env, id, 1.0));
            let after = fx.state.entity(id).unwrap().position;
            assert!((after.x - before.x).abs() <= 1.0);
            assert!((after.y - before.y).abs() <= 1.0);
        }
    }

    #[test]
    fn wander_refuses_blocked_steps() {
        let mut fx = Fixture::new();
        let id = fx.state.ids.entity();
        // Wedged into the corner: any step with a negative component is out of bounds.
        fx.state.entities.push(Entity::slime(id, Position::ORIGIN));

        for _ in 0..50 {
            fx.run(|state, env| wander(state, env, id, 1.0));
            let pos = fx.state.entity(id).unwrap().position;
            assert!(pos.x >= 0.0 && pos.y >= 0.0);
        }
    }

    #[test]
    fn wander_ignores_missing_entities() {
        let mut fx = Fixture::new();
        assert!(!fx.run(|state, env| wander(state, env, EntityId(999), 2.0)));
    }

    #[test]
    fn step_keeps_loot_still() {
        let mut fx = Fixture::new();
        let id = fx.state.ids.entity();
        let spot = Position::new(100.0, 100.0);
        fx.state.entities.push(Entity::loot(id, spot));

        let outcome = fx.run(step);

        assert_eq!(outcome.moved, 0);
        assert_eq!(fx.state.entity(id).unwrap().position, spot);
    }

    #[test]
    fn ally_kill_drops_loot_without_experience() {
        let mut fx = Fixture::new();
        let ally = fx.state.ids.entity();
        fx.state.entities.push(Entity::ally(ally, Position::new(100.0, 100.0)));
        let slime = fx.state.ids.entity();
        let mut weak = Entity::slime(slime, Position::new(130.0, 100.0));
        weak.hp = 1;
        fx.state.entities.push(weak);

        let mut killed = false;
        for _ in 0..2_000 {
            // Keep the pair in range regardless of wandering.
            if let Some(entity) = fx.state.entity_mut(ally) {
                entity.position = Position::new(100.0, 100.0);
            }
            if let Some(entity) = fx.state.entity_mut(slime) {
                entity.position = Position::new(130.0, 100.0);
            }
            if fx.run(|state, env| ally_assist(state, env, ally)) == Some(true) {
                killed = true;
                break;
            }
        }

        assert!(killed);
        assert!(fx.state.entity(slime).is_none());
        assert!(fx.state.entities.iter().any(|e| e.kind.is_loot()));
        assert_eq!(fx.state.player.exp, 0);
    }
}
