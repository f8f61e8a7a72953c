//! Worker tasks that back the runtime orchestration.
//!
//! A single simulation worker owns the authority; nothing else mutates state.

mod simulation;

pub use simulation::{Command, SimulationWorker};
