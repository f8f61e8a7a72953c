//! Player record, inventory and item kinds.

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::state::types::{EntityId, ItemId, Position};

/// Everything that can sit in the inventory or the home resource store.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum ItemKind {
    ContainerCommon,
    ContainerRare,
    ResourceWood,
    ResourceStone,
    SeedWheat,
    CropWheat,
}

impl ItemKind {
    pub const fn is_container(self) -> bool {
        matches!(self, Self::ContainerCommon | Self::ContainerRare)
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::ContainerCommon => "Battered Crate",
            Self::ContainerRare => "Golden Chest",
            Self::ResourceWood => "Wood",
            Self::ResourceStone => "Stone",
            Self::SeedWheat => "Wheat Seed",
            Self::CropWheat => "Wheat",
        }
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::ContainerCommon => "📦",
            Self::ContainerRare => "👑",
            Self::ResourceWood => "🪵",
            Self::ResourceStone => "🪨",
            Self::SeedWheat => "🌱",
            Self::CropWheat => "🌾",
        }
    }
}

/// A stack of items in the player's inventory.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: ItemId,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: ItemKind,
    pub count: u32,
}

impl Item {
    pub fn new(id: ItemId, kind: ItemKind, count: u32) -> Self {
        Self { id, kind, count }
    }
}

pub type InventoryItems = ArrayVec<Item, { GameConfig::MAX_INVENTORY_SLOTS }>;

/// The local player.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PlayerState {
    pub id: EntityId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "pos"))]
    pub position: Position,
    pub hp: u32,
    pub max_hp: u32,
    pub inventory: InventoryItems,
    /// Current capacity; grows with level up to [`GameConfig::MAX_INVENTORY_SLOTS`].
    pub max_inventory: usize,
    pub level: u32,
    pub exp: u32,
}

impl PlayerState {
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Self {
            id: EntityId::PLAYER,
            name: name.into(),
            position,
            hp: GameConfig::BASE_HP,
            max_hp: GameConfig::BASE_HP,
            inventory: ArrayVec::new(),
            max_inventory: GameConfig::BASE_INVENTORY,
            level: 1,
            exp: 0,
        }
    }

    pub fn is_inventory_full(&self) -> bool {
        self.inventory.len() >= self.max_inventory.min(GameConfig::MAX_INVENTORY_SLOTS)
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.inventory.iter().find(|item| item.id == id)
    }

    /// Removes and returns the item with `id`, preserving the order of the rest.
    pub fn take_item(&mut self, id: ItemId) -> Option<Item> {
        let index = self.inventory.iter().position(|item| item.id == id)?;
        Some(self.inventory.remove(index))
    }

    /// Experience needed to reach the next level.
    pub fn required_exp(&self) -> u32 {
        GameConfig::required_exp(self.level)
    }

    pub fn is_hp_full(&self) -> bool {
        self.hp >= self.max_hp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_item_keeps_remaining_order() {
        let mut player = PlayerState::new("tester", Position::ORIGIN);
        for raw in 1..=3 {
            player
                .inventory
                .push(Item::new(ItemId(raw), ItemKind::ContainerCommon, 1));
        }

        let taken = player.take_item(ItemId(2)).unwrap();

        assert_eq!(taken.id, ItemId(2));
        let ids: Vec<_> = player.inventory.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![ItemId(1), ItemId(3)]);
        assert!(player.take_item(ItemId(2)).is_none());
    }

    #[test]
    fn inventory_full_respects_current_capacity() {
        let mut player = PlayerState::new("tester", Position::ORIGIN);
        player.max_inventory = 2;
        player
            .inventory
            .push(Item::new(ItemId(1), ItemKind::ContainerRare, 1));
        assert!(!player.is_inventory_full());
        player
            .inventory
            .push(Item::new(ItemId(2), ItemKind::ContainerRare, 1));
        assert!(player.is_inventory_full());
    }
}
