use crate::state::Position;

/// Game configuration constants and tunable parameters.
///
/// The associated constants are the canonical values of the game. The struct
/// fields mirror the subset that tests and tools may want to vary; `Default`
/// always reproduces the constants.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Side length of the square map, in world units.
    pub map_size: f32,
    /// Side length of every actor's bounding box.
    pub actor_size: f32,
    /// Interval between scheduler ticks, in milliseconds.
    pub tick_period_ms: u64,
    /// Maximum distance between player and monster for a melee hit.
    pub attack_range: f32,
    /// Maximum distance between player and a loot container to pick it up.
    pub loot_range: f32,
    /// Damage dealt by the player per attack.
    pub player_damage: u32,
    /// Counter-damage dealt by a surviving monster.
    pub monster_damage: u32,
    /// Inward padding applied to the actor box when testing against walls.
    pub wall_padding: f32,
    /// Monster population the spawner tops up to.
    pub monster_cap: usize,
    /// Attempts per decoration class before generation gives up on the class.
    pub decoration_attempts: u32,
    /// Minimum distance between a new decoration and every earlier one.
    pub decoration_clearance: f32,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Hard upper bound on inventory slots; the per-player capacity grows towards it.
    pub const MAX_INVENTORY_SLOTS: usize = 20;
    /// Number of chat/system lines kept in the message log.
    pub const MAX_MESSAGES: usize = 50;

    // ===== map & physics =====
    pub const MAP_SIZE: f32 = 800.0;
    pub const ACTOR_SIZE: f32 = 32.0;
    pub const WALL_SIZE: f32 = 32.0;
    pub const WALL_PADDING: f32 = 5.0;
    /// Actors closer than `radius * ACTOR_SEPARATION` (center to center) collide.
    pub const ACTOR_SEPARATION: f32 = 1.5;
    pub const MOVEMENT_SPEED: f32 = 5.0;

    // ===== safe city =====
    pub const CITY_START: f32 = 300.0;
    pub const CITY_END: f32 = 500.0;
    /// Half-width of each gate gap, measured from the center line.
    pub const GATE_HALF_WIDTH: f32 = 40.0;
    /// Monsters never spawn inside `(SPAWN_EXCLUSION_MIN, SPAWN_EXCLUSION_MAX)` on both axes.
    pub const SPAWN_EXCLUSION_MIN: f32 = 250.0;
    pub const SPAWN_EXCLUSION_MAX: f32 = 550.0;

    // ===== terrain generation =====
    pub const DECORATION_ATTEMPTS: u32 = 2000;
    pub const DECORATION_CLEARANCE: f32 = 24.0;
    pub const WATER_COUNT: usize = 4;
    pub const TREE_COUNT: usize = 50;
    pub const ROCK_COUNT: usize = 30;

    // ===== combat =====
    pub const ATTACK_RANGE: f32 = 80.0;
    pub const LOOT_RANGE: f32 = 80.0;
    pub const PLAYER_DAMAGE: u32 = 20;
    pub const MONSTER_DAMAGE: u32 = 10;
    pub const ALLY_ASSIST_RANGE: f32 = 50.0;
    pub const ALLY_ASSIST_CHANCE: f64 = 0.05;
    pub const ALLY_ASSIST_DAMAGE: u32 = 5;
    pub const ALLY_CHAT_CHANCE: f64 = 0.005;

    // ===== monsters =====
    pub const INITIAL_MONSTERS: usize = 8;
    pub const MONSTER_CAP: usize = 8;
    pub const MONSTER_SPAWN_CHANCE: f64 = 0.01;
    pub const SPAWN_ATTEMPTS: u32 = 20;
    pub const BEAST_CHANCE: f64 = 0.3;
    pub const SLIME_HP: u32 = 40;
    pub const BEAST_HP: u32 = 80;
    pub const SLIME_EXP: u32 = 10;
    pub const BEAST_EXP: u32 = 20;
    pub const MONSTER_WANDER_SPEED: f32 = 1.0;
    pub const ALLY_WANDER_SPEED: f32 = 2.0;
    pub const ALLY_HP: u32 = 100;

    // ===== player & progression =====
    pub const BASE_HP: u32 = 100;
    pub const HP_PER_LEVEL: u32 = 10;
    pub const BASE_INVENTORY: usize = 10;
    pub const EXP_PER_LEVEL: u32 = 50;
    pub const RARE_CONTAINER_CHANCE: f64 = 0.2;

    // ===== home & farming =====
    pub const STARTING_SEEDS: u32 = 2;
    pub const CROP_MATURATION_MS: u64 = 5000;
    pub const HARVEST_YIELD: u32 = 2;
    pub const HARVEST_EXP: u32 = 10;
    pub const HEAL_PER_CROP: u32 = 50;

    // ===== transient objects =====
    pub const POPUP_TTL_MS: u64 = 3000;
    pub const FLOATING_TEXT_TTL_MS: u64 = 1000;

    // ===== scheduler =====
    pub const TICK_PERIOD_MS: u64 = 50;

    pub fn new() -> Self {
        Self {
            map_size: Self::MAP_SIZE,
            actor_size: Self::ACTOR_SIZE,
            tick_period_ms: Self::TICK_PERIOD_MS,
            attack_range: Self::ATTACK_RANGE,
            loot_range: Self::LOOT_RANGE,
            player_damage: Self::PLAYER_DAMAGE,
            monster_damage: Self::MONSTER_DAMAGE,
            wall_padding: Self::WALL_PADDING,
            monster_cap: Self::MONSTER_CAP,
            decoration_attempts: Self::DECORATION_ATTEMPTS,
            decoration_clearance: Self::DECORATION_CLEARANCE,
        }
    }

    /// Radius of the actor bounding circle.
    pub fn actor_radius(&self) -> f32 {
        self.actor_size / 2.0
    }

    /// Center-to-center distance below which two actors overlap.
    pub fn separation_distance(&self) -> f32 {
        self.actor_radius() * Self::ACTOR_SEPARATION
    }

    /// Top-left corner of an actor standing in the middle of the map.
    pub fn map_center(&self) -> Position {
        Position::new(self.map_size / 2.0, self.map_size / 2.0)
    }

    /// Experience required to advance past `level`.
    pub const fn required_exp(level: u32) -> u32 {
        level.saturating_mul(Self::EXP_PER_LEVEL)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
