//! Terrain generation and population of the world map.
mod generator;
mod spawn;

pub use generator::{GeneratedWorld, GenerationReport, ScatterOutcome, generate};
pub use spawn::{SpawnReport, in_safe_zone, spawn_ally, spawn_monsters};
