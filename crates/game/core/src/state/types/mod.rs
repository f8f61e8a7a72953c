mod common;
mod entities;
mod home;
mod notice;
mod player;
mod world;

pub use common::{BuildingId, DecorationId, EntityId, IdAllocator, ItemId, NoticeId, Position, Timestamp};
pub use entities::{Entity, EntityKind};
pub use home::{Building, BuildingKind, HomeState, PlantedCrop};
pub use notice::{FloatingText, FloatingTextStyle, MessageLog, Popup};
pub use player::{InventoryItems, Item, ItemKind, PlayerState};
pub use world::{Decoration, DecorationKind};
