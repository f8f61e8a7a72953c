use crate::action::{ActionError, ActionKind, ActionTransition, require_mode};
use crate::effects;
use crate::env::Env;
use crate::state::{EntityId, FloatingTextStyle, GameState, Mode};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackAction {
    pub target: EntityId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackOutcome {
    pub target: EntityId,
    pub damage: u32,
    pub killed: bool,
    /// Damage the surviving target dealt back.
    pub counter_damage: u32,
    pub player_died: bool,
    pub levels_gained: u32,
}

impl AttackAction {
    pub fn new(target: EntityId) -> Self {
        Self { target }
    }
}

impl ActionTransition for AttackAction {
    type Result = AttackOutcome;

    fn kind(&self) -> ActionKind {
        ActionKind::Attack
    }

    fn pre_validate(&self, state: &GameState, env: &Env<'_>) -> Result<(), ActionError> {
        require_mode(state, &[Mode::World])?;
        let target = state
            .entity(self.target)
            .ok_or(ActionError::EntityNotFound)?;
        if state.player.position.distance(target.position) > env.config.attack_range {
            return Err(ActionError::OutOfRange);
        }
        if !target.kind.is_monster() {
            return Err(ActionError::NotAMonster);
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        env: &mut Env<'_>,
    ) -> Result<AttackOutcome, ActionError> {
        let damage = env.config.player_damage;
        let target = state
            .entity_mut(self.target)
            .ok_or(ActionError::EntityNotFound)?;
        let killed = target.take_damage(damage);
        let (anchor, reward) = (target.position, target.kind.exp_reward());

        effects::push_floating_text(
            state,
            env.config,
            env.rng,
            env.now,
            anchor,
            format!("-{damage}"),
            FloatingTextStyle::MonsterDamage,
        );

        let mut outcome = AttackOutcome {
            target: self.target,
            damage,
            killed,
            counter_damage: 0,
            player_died: false,
            levels_gained: 0,
        };

        if killed {
            effects::kill_entity(state, env.now, self.target);
            outcome.levels_gained = effects::grant_experience(state, env.now, reward);
        } else {
            outcome.counter_damage = env.config.monster_damage;
            outcome.player_died = effects::damage_player(
                state,
                env.config,
                env.rng,
                env.now,
                outcome.counter_damage,
            );
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::state::{Entity, FloatingTextStyle, Position};

    fn with_slime(offset: f32) -> (crate::action::test_support::Harness, EntityId) {
        let mut h = crate::action::test_support::Harness::new(Mode::World);
        let id = h.state.ids.entity();
        let spot = h.state.player.position.offset(offset, 0.0);
        h.state.entities.push(Entity::slime(id, spot));
        (h, id)
    }

    #[test]
    fn attack_out_of_range_changes_nothing() {
        let (mut h, id) = with_slime(150.0);
        let before = h.state.clone();

        assert_eq!(h.run(&AttackAction::new(id)), Err(ActionError::OutOfRange));
        assert_eq!(h.state, before);
        assert!(ActionError::OutOfRange.notice().is_some());
    }

    #[test]
    fn surviving_target_hits_back() {
        let (mut h, id) = with_slime(40.0);

        let outcome = h.run(&AttackAction::new(id)).unwrap();

        assert!(!outcome.killed);
        assert_eq!(h.state.entity(id).unwrap().hp, GameConfig::SLIME_HP - 20);
        assert_eq!(h.state.player.hp, GameConfig::BASE_HP - 10);
        let styles: Vec<_> = h.state.floating_texts.iter().map(|t| t.style).collect();
        assert_eq!(
            styles,
            vec![FloatingTextStyle::MonsterDamage, FloatingTextStyle::PlayerDamage]
        );
    }

    #[test]
    fn lethal_hit_drops_loot_and_grants_experience() {
        let (mut h, id) = with_slime(40.0);
        h.state.entity_mut(id).unwrap().hp = 20;
        let spot = h.state.entity(id).unwrap().position;

        let outcome = h.run(&AttackAction::new(id)).unwrap();

        assert!(outcome.killed);
        assert!(h.state.entity(id).is_none());
        assert_eq!(h.state.player.exp, GameConfig::SLIME_EXP);
        assert_eq!(h.state.player.hp, GameConfig::BASE_HP);
        let loot: Vec<_> = h.state.entities.iter().filter(|e| e.kind.is_loot()).collect();
        assert_eq!(loot.len(), 1);
        assert_eq!(loot[0].position, spot);
        assert!(h.state.popups.iter().any(|p| p.text == "Slime defeated!"));
    }

    #[test]
    fn counter_attack_can_kill_the_player() {
        let (mut h, id) = with_slime(40.0);
        h.state.player.hp = 10;
        h.state.player.exp = 8;
        h.state.player.position = Position::new(100.0, 650.0);
        h.state.entity_mut(id).unwrap().position = Position::new(140.0, 650.0);

        let outcome = h.run(&AttackAction::new(id)).unwrap();

        assert!(outcome.player_died);
        assert_eq!(h.state.player.hp, h.state.player.max_hp);
        assert_eq!(h.state.player.exp, 4);
        assert_eq!(h.state.player.position, h.config.map_center());
    }

    #[test]
    fn attacking_allies_or_ghosts_is_a_silent_miss() {
        let mut h = crate::action::test_support::Harness::new(Mode::World);
        let ally = h.state.ids.entity();
        let spot = h.state.player.position.offset(30.0, 0.0);
        h.state.entities.push(Entity::ally(ally, spot));

        assert_eq!(h.run(&AttackAction::new(ally)), Err(ActionError::NotAMonster));
        assert_eq!(
            h.run(&AttackAction::new(EntityId(4242))),
            Err(ActionError::EntityNotFound)
        );
        assert!(h.state.popups.is_empty());
    }
}
