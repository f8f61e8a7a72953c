//! Static terrain features.

use crate::state::types::{DecorationId, Position};

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
pub enum DecorationKind {
    Tree,
    Rock,
    Water,
    Wall,
}

impl DecorationKind {
    /// Walls are the only terrain that blocks movement.
    pub const fn is_collidable(self) -> bool {
        matches!(self, Self::Wall)
    }
}

/// A terrain feature. Decorations are fixed once the world is generated.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decoration {
    pub id: DecorationId,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: DecorationKind,
    #[cfg_attr(feature = "serde", serde(rename = "pos"))]
    pub position: Position,
    /// Visual size multiplier. Walls scale their collision box with it.
    pub scale: f32,
}

impl Decoration {
    pub fn new(id: DecorationId, kind: DecorationKind, position: Position, scale: f32) -> Self {
        Self {
            id,
            kind,
            position,
            scale,
        }
    }

    pub fn wall(id: DecorationId, position: Position) -> Self {
        Self::new(id, DecorationKind::Wall, position, 1.0)
    }
}
