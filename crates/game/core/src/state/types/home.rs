//! Home base: buildings and the shared resource store.

use std::collections::BTreeMap;

use crate::config::GameConfig;
use crate::state::types::{BuildingId, IdAllocator, ItemKind, Position, Timestamp};

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
pub enum BuildingKind {
    Field,
    Workbench,
    ContainerOpener,
    Canteen,
}

/// A crop growing on a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PlantedCrop {
    #[cfg_attr(feature = "serde", serde(rename = "cropType"))]
    pub kind: ItemKind,
    #[cfg_attr(feature = "serde", serde(rename = "plantTime"))]
    pub planted_at: Timestamp,
    pub is_ready: bool,
}

impl PlantedCrop {
    pub fn new(kind: ItemKind, planted_at: Timestamp) -> Self {
        Self {
            kind,
            planted_at,
            is_ready: false,
        }
    }

    pub fn has_matured(&self, now: Timestamp) -> bool {
        now.millis_since(self.planted_at) >= GameConfig::CROP_MATURATION_MS
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Building {
    pub id: BuildingId,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: BuildingKind,
    #[cfg_attr(feature = "serde", serde(rename = "pos"))]
    pub position: Position,
    pub level: u32,
    /// Only fields ever carry a crop; `None` means the field is empty.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub crop: Option<PlantedCrop>,
}

impl Building {
    pub fn new(id: BuildingId, kind: BuildingKind, position: Position) -> Self {
        Self {
            id,
            kind,
            position,
            level: 1,
            crop: None,
        }
    }

    pub fn is_field(&self) -> bool {
        self.kind == BuildingKind::Field
    }

    pub fn is_ready(&self) -> bool {
        self.crop.is_some_and(|crop| crop.is_ready)
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HomeState {
    pub buildings: Vec<Building>,
    /// Missing keys count as zero.
    pub resources: BTreeMap<ItemKind, u32>,
}

impl HomeState {
    /// The starting base: opener, field, workbench and canteen, plus a couple of seeds.
    pub fn initial(ids: &mut IdAllocator) -> Self {
        let layout = [
            (BuildingKind::ContainerOpener, Position::new(100.0, 100.0)),
            (BuildingKind::Field, Position::new(200.0, 100.0)),
            (BuildingKind::Workbench, Position::new(300.0, 100.0)),
            (BuildingKind::Canteen, Position::new(100.0, 200.0)),
        ];
        let buildings = layout
            .into_iter()
            .map(|(kind, position)| Building::new(ids.building(), kind, position))
            .collect();

        let mut resources = BTreeMap::new();
        resources.insert(ItemKind::ResourceWood, 0);
        resources.insert(ItemKind::ResourceStone, 0);
        resources.insert(ItemKind::SeedWheat, GameConfig::STARTING_SEEDS);

        Self {
            buildings,
            resources,
        }
    }

    pub fn building(&self, id: BuildingId) -> Option<&Building> {
        self.buildings.iter().find(|b| b.id == id)
    }

    pub fn building_mut(&mut self, id: BuildingId) -> Option<&mut Building> {
        self.buildings.iter_mut().find(|b| b.id == id)
    }

    pub fn resource(&self, kind: ItemKind) -> u32 {
        self.resources.get(&kind).copied().unwrap_or(0)
    }

    pub fn add_resource(&mut self, kind: ItemKind, amount: u32) {
        let entry = self.resources.entry(kind).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// Removes `amount` of `kind`; returns false (and leaves the store untouched)
    /// if there is not enough.
    pub fn consume_resource(&mut self, kind: ItemKind, amount: u32) -> bool {
        match self.resources.get_mut(&kind) {
            Some(count) if *count >= amount => {
                *count -= amount;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_home_has_one_of_each_building() {
        let mut ids = IdAllocator::new();
        let home = HomeState::initial(&mut ids);

        assert_eq!(home.buildings.len(), 4);
        assert_eq!(home.buildings.iter().filter(|b| b.is_field()).count(), 1);
        assert!(home.buildings.iter().all(|b| b.crop.is_none()));
        assert_eq!(home.resource(ItemKind::SeedWheat), GameConfig::STARTING_SEEDS);
        assert_eq!(home.resource(ItemKind::CropWheat), 0);
    }

    #[test]
    fn consume_resource_refuses_overdraft() {
        let mut ids = IdAllocator::new();
        let mut home = HomeState::initial(&mut ids);

        assert!(!home.consume_resource(ItemKind::CropWheat, 1));
        assert!(home.consume_resource(ItemKind::SeedWheat, 2));
        assert_eq!(home.resource(ItemKind::SeedWheat), 0);
        assert!(!home.consume_resource(ItemKind::SeedWheat, 1));
    }

    #[test]
    fn crop_matures_after_fixed_interval() {
        let crop = PlantedCrop::new(ItemKind::CropWheat, Timestamp(1_000));
        assert!(!crop.has_matured(Timestamp(5_999)));
        assert!(crop.has_matured(Timestamp(6_000)));
    }
}
