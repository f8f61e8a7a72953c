//! Action rejection errors.
//!
//! Every way an action can be declined lives here. Rejections split into two
//! groups: precondition failures the player is told about through a
//! [`Notice`], and silent misses where the referenced object is gone or the
//! request does not apply right now.

use crate::error::{ErrorSeverity, GameError};

/// User-facing text for a rejection, shown as a popup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Notice {
    pub text: &'static str,
    pub icon: &'static str,
}

impl Notice {
    const fn new(text: &'static str, icon: &'static str) -> Self {
        Self { text, icon }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    // ========================================================================
    // Rejections with a notice
    // ========================================================================
    #[error("wrong username or password")]
    WrongCredentials,

    #[error("username is already taken")]
    UserExists,

    #[error("username and password are required")]
    MissingCredentials,

    #[error("target is out of range")]
    OutOfRange,

    #[error("inventory is full")]
    InventoryFull,

    #[error("not enough seeds")]
    InsufficientSeeds,

    #[error("not enough wheat")]
    InsufficientCrop,

    #[error("hp is already full")]
    HpFull,

    // ========================================================================
    // Silent rejections
    // ========================================================================
    #[error("action is not available in the current mode")]
    WrongMode,

    #[error("destination is blocked")]
    Blocked,

    #[error("loot is out of reach")]
    TooFarToLoot,

    #[error("crop is not ready")]
    CropNotReady,

    #[error("field already has a crop")]
    FieldOccupied,

    #[error("chat message is empty")]
    EmptyMessage,

    #[error("movement delta is zero or not a finite number")]
    InvalidDelta,

    // ========================================================================
    // Misses
    // ========================================================================
    #[error("entity not found")]
    EntityNotFound,

    #[error("item not found")]
    ItemNotFound,

    #[error("building not found")]
    BuildingNotFound,

    #[error("entity is not a monster")]
    NotAMonster,

    #[error("entity is not a loot container")]
    NotLootable,

    #[error("item is not a container")]
    NotAContainer,

    #[error("building is not a field")]
    NotAField,

    #[error("building is not a canteen")]
    NotACanteen,

    // ========================================================================
    // Internal
    // ========================================================================
    #[error("invariant violated: {0}")]
    InvariantViolated(&'static str),
}

impl ActionError {
    /// Popup to show the player, if this rejection is one they should hear about.
    pub const fn notice(&self) -> Option<Notice> {
        use ActionError::*;
        let notice = match self {
            WrongCredentials => Notice::new("Wrong username or password", "🔒"),
            UserExists => Notice::new("That username is taken", "👤"),
            MissingCredentials => Notice::new("Enter a username and password", "✏️"),
            OutOfRange => Notice::new("Target is too far away!", "✋"),
            InventoryFull => Notice::new("Inventory is full!", "🎒"),
            InsufficientSeeds => Notice::new("Not enough seeds", "🌱"),
            InsufficientCrop => Notice::new("Not enough wheat", "🌾"),
            HpFull => Notice::new("HP is already full", "❤️"),
            _ => return None,
        };
        Some(notice)
    }
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            WrongCredentials | UserExists | MissingCredentials => ErrorSeverity::Recoverable,
            OutOfRange | InventoryFull | InsufficientSeeds | InsufficientCrop | HpFull => {
                ErrorSeverity::Recoverable
            }
            WrongMode | Blocked | TooFarToLoot | CropNotReady | FieldOccupied => {
                ErrorSeverity::Recoverable
            }
            EmptyMessage | InvalidDelta => ErrorSeverity::Recoverable,
            EntityNotFound | ItemNotFound | BuildingNotFound => ErrorSeverity::Validation,
            NotAMonster | NotLootable | NotAContainer | NotAField | NotACanteen => {
                ErrorSeverity::Validation
            }
            InvariantViolated(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            WrongCredentials => "ACTION_WRONG_CREDENTIALS",
            UserExists => "ACTION_USER_EXISTS",
            MissingCredentials => "ACTION_MISSING_CREDENTIALS",
            OutOfRange => "ACTION_OUT_OF_RANGE",
            InventoryFull => "ACTION_INVENTORY_FULL",
            InsufficientSeeds => "ACTION_INSUFFICIENT_SEEDS",
            InsufficientCrop => "ACTION_INSUFFICIENT_CROP",
            HpFull => "ACTION_HP_FULL",
            WrongMode => "ACTION_WRONG_MODE",
            Blocked => "ACTION_BLOCKED",
            TooFarToLoot => "ACTION_TOO_FAR_TO_LOOT",
            CropNotReady => "ACTION_CROP_NOT_READY",
            FieldOccupied => "ACTION_FIELD_OCCUPIED",
            EmptyMessage => "ACTION_EMPTY_MESSAGE",
            InvalidDelta => "ACTION_INVALID_DELTA",
            EntityNotFound => "ACTION_ENTITY_NOT_FOUND",
            ItemNotFound => "ACTION_ITEM_NOT_FOUND",
            BuildingNotFound => "ACTION_BUILDING_NOT_FOUND",
            NotAMonster => "ACTION_NOT_A_MONSTER",
            NotLootable => "ACTION_NOT_LOOTABLE",
            NotAContainer => "ACTION_NOT_A_CONTAINER",
            NotAField => "ACTION_NOT_A_FIELD",
            NotACanteen => "ACTION_NOT_A_CANTEEN",
            InvariantViolated(_) => "ACTION_INVARIANT_VIOLATED",
        }
    }
}
