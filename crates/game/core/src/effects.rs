//! State mutations shared by actions and the tick: notices, kills,
//! progression, player damage and resource grants.

use crate::collision;
use crate::config::GameConfig;
use crate::env::GameRng;
use crate::state::{
    Entity, EntityId, FloatingText, FloatingTextStyle, GameState, ItemKind, Popup, Position,
    Timestamp,
};

pub fn push_popup(state: &mut GameState, now: Timestamp, text: impl Into<String>, icon: &str) {
    let id = state.ids.notice();
    state.popups.push(Popup {
        id,
        text: text.into(),
        icon: (!icon.is_empty()).then(|| icon.to_owned()),
        timestamp: now,
    });
}

/// Adds a floating text above the actor whose top-left corner is `anchor`,
/// with a little horizontal scatter so stacked numbers stay readable.
pub fn push_floating_text(
    state: &mut GameState,
    config: &GameConfig,
    rng: &mut GameRng,
    now: Timestamp,
    anchor: Position,
    text: impl Into<String>,
    style: FloatingTextStyle,
) {
    let id = state.ids.notice();
    let x = anchor.x + config.actor_radius() - 10.0 + rng.unit_offset(10.0);
    state.floating_texts.push(FloatingText {
        id,
        x,
        y: anchor.y - 20.0,
        text: text.into(),
        style,
        timestamp: now,
    });
}

/// Removes a dead entity and drops a loot container where it stood.
///
/// Returns the removed entity, or `None` if it was already gone.
pub fn kill_entity(state: &mut GameState, now: Timestamp, id: EntityId) -> Option<Entity> {
    let victim = state.remove_entity(id)?;
    let loot = state.ids.entity();
    state.entities.push(Entity::loot(loot, victim.position));
    push_popup(state, now, format!("{} defeated!", victim.name), "⚔️");
    Some(victim)
}

/// Adds experience and resolves every level-up it unlocks.
///
/// Returns the number of levels gained.
pub fn grant_experience(state: &mut GameState, now: Timestamp, amount: u32) -> u32 {
    let player = &mut state.player;
    player.exp = player.exp.saturating_add(amount);

    let mut gained = 0;
    while player.exp >= player.required_exp() {
        player.exp -= player.required_exp();
        player.level += 1;
        player.max_hp += GameConfig::HP_PER_LEVEL;
        player.hp = player.max_hp;
        player.max_inventory = (player.max_inventory + 1).min(GameConfig::MAX_INVENTORY_SLOTS);
        gained += 1;
    }

    for _ in 0..gained {
        push_popup(state, now, "Level up!", "🆙");
    }
    gained
}

/// Applies damage to the player and runs death recovery if it was lethal.
///
/// Returns true if the player died (and has already respawned).
pub fn damage_player(
    state: &mut GameState,
    config: &GameConfig,
    rng: &mut GameRng,
    now: Timestamp,
    amount: u32,
) -> bool {
    state.player.hp = state.player.hp.saturating_sub(amount);
    let anchor = state.player.position;
    push_floating_text(
        state,
        config,
        rng,
        now,
        anchor,
        format!("-{amount}"),
        FloatingTextStyle::PlayerDamage,
    );

    if state.player.hp > 0 {
        return false;
    }
    respawn_player(state, config, now);
    true
}

/// Death recovery: full heal, half the experience, back to the city center.
pub fn respawn_player(state: &mut GameState, config: &GameConfig, now: Timestamp) {
    let center = config.map_center();
    let position =
        collision::find_free_spot(state, config, center, Some(EntityId::PLAYER), 8).unwrap_or(center);

    let player = &mut state.player;
    player.hp = player.max_hp;
    player.exp /= 2;
    player.position = position;

    push_popup(state, now, "You were defeated!", "💀");
    push_popup(state, now, "Respawned", "🔄");
}

/// Credits the home store and tells the player about it.
pub fn add_resource(state: &mut GameState, now: Timestamp, kind: ItemKind, amount: u32) {
    if amount == 0 {
        return;
    }
    state.home.add_resource(kind, amount);
    push_popup(
        state,
        now,
        format!("Obtained: {} x{amount}", kind.display_name()),
        kind.icon(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::IdAllocator;

    fn fresh() -> (GameState, GameConfig) {
        let config = GameConfig::default();
        let state = GameState::new(&config, IdAllocator::new(), Vec::new());
        (state, config)
    }

    #[test]
    fn experience_carries_over_after_level_up() {
        let (mut state, _) = fresh();
        state.player.exp = 45;
        state.player.hp = 30;

        let gained = grant_experience(&mut state, Timestamp(10), 10);

        assert_eq!(gained, 1);
        assert_eq!(state.player.level, 2);
        assert_eq!(state.player.exp, 5);
        assert_eq!(state.player.max_hp, 110);
        assert_eq!(state.player.hp, 110);
        assert_eq!(state.player.max_inventory, GameConfig::BASE_INVENTORY + 1);
        assert_eq!(state.popups.last().map(|p| p.text.as_str()), Some("Level up!"));
    }

    #[test]
    fn large_grants_level_up_repeatedly() {
        let (mut state, _) = fresh();

        // 50 for level 1, 100 for level 2, 20 left over.
        let gained = grant_experience(&mut state, Timestamp::ZERO, 170);

        assert_eq!(gained, 2);
        assert_eq!(state.player.level, 3);
        assert_eq!(state.player.exp, 20);
    }

    #[test]
    fn inventory_capacity_is_capped() {
        let (mut state, _) = fresh();
        state.player.max_inventory = GameConfig::MAX_INVENTORY_SLOTS;

        grant_experience(&mut state, Timestamp::ZERO, 50);

        assert_eq!(state.player.max_inventory, GameConfig::MAX_INVENTORY_SLOTS);
    }

    #[test]
    fn lethal_damage_respawns_at_center() {
        let (mut state, config) = fresh();
        let mut rng = GameRng::seed_from_u64(0);
        state.player.position = Position::new(100.0, 650.0);
        state.player.hp = 5;
        state.player.exp = 31;

        let died = damage_player(&mut state, &config, &mut rng, Timestamp(7), 10);

        assert!(died);
        assert_eq!(state.player.hp, state.player.max_hp);
        assert_eq!(state.player.exp, 15);
        assert_eq!(state.player.position, config.map_center());
        let texts: Vec<_> = state.popups.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["You were defeated!", "Respawned"]);
    }

    #[test]
    fn kill_leaves_loot_in_place() {
        let (mut state, _) = fresh();
        let id = state.ids.entity();
        let spot = Position::new(90.0, 80.0);
        state.entities.push(Entity::slime(id, spot));

        let victim = kill_entity(&mut state, Timestamp(1), id).unwrap();

        assert_eq!(victim.id, id);
        assert!(state.entity(id).is_none());
        assert_eq!(state.entities.len(), 1);
        assert!(state.entities[0].kind.is_loot());
        assert_eq!(state.entities[0].position, spot);
        assert!(kill_entity(&mut state, Timestamp(2), id).is_none());
    }
}
