//! Live entities of the world map: the ally bot, monsters and loot drops.

use crate::config::GameConfig;
use crate::state::types::{EntityId, Position};

/// Kind tag of a live entity.
#[derive(
    Clone,
    Copy,
    Debug,
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
pub enum EntityKind {
    Player,
    OtherPlayer,
    MonsterSlime,
    MonsterBeast,
    LootContainer,
}

impl EntityKind {
    pub const fn is_monster(self) -> bool {
        matches!(self, Self::MonsterSlime | Self::MonsterBeast)
    }

    pub const fn is_loot(self) -> bool {
        matches!(self, Self::LootContainer)
    }

    /// Actors occupy space; loot containers do not.
    pub const fn is_actor(self) -> bool {
        !self.is_loot()
    }

    /// Experience granted to the player for killing an entity of this kind.
    pub const fn exp_reward(self) -> u32 {
        match self {
            Self::MonsterSlime => GameConfig::SLIME_EXP,
            Self::MonsterBeast => GameConfig::BEAST_EXP,
            _ => 0,
        }
    }
}

/// A live entity. Hit points never exceed `max_hp`; an entity whose hit
/// points reach zero is removed in the same mutation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Entity {
    pub id: EntityId,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: EntityKind,
    #[cfg_attr(feature = "serde", serde(rename = "pos"))]
    pub position: Position,
    pub hp: u32,
    pub max_hp: u32,
    pub name: String,
}

impl Entity {
    pub fn new(
        id: EntityId,
        kind: EntityKind,
        position: Position,
        max_hp: u32,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            kind,
            position,
            hp: max_hp,
            max_hp,
            name: name.into(),
        }
    }

    pub fn slime(id: EntityId, position: Position) -> Self {
        Self::new(
            id,
            EntityKind::MonsterSlime,
            position,
            GameConfig::SLIME_HP,
            "Slime",
        )
    }

    pub fn beast(id: EntityId, position: Position) -> Self {
        Self::new(
            id,
            EntityKind::MonsterBeast,
            position,
            GameConfig::BEAST_HP,
            "Wild Beast",
        )
    }

    pub fn ally(id: EntityId, position: Position) -> Self {
        Self::new(
            id,
            EntityKind::OtherPlayer,
            position,
            GameConfig::ALLY_HP,
            "Explorer_99",
        )
    }

    pub fn loot(id: EntityId, position: Position) -> Self {
        Self::new(id, EntityKind::LootContainer, position, 1, "Loot")
    }

    /// Subtracts `amount` hit points and returns true if the entity died.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.hp = self.hp.saturating_sub(amount);
        self.hp == 0
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}
