//! Execution environment handed to every action and tick step.
//!
//! The [`Env`] aggregate bundles the pieces of the simulation that live
//! beside the [`GameState`](crate::state::GameState) rather than inside it:
//! tunables, the seeded random source, the account registry and the current
//! session time.
mod accounts;
mod rng;

pub use accounts::AccountRegistry;
pub use rng::GameRng;

use crate::config::GameConfig;
use crate::state::Timestamp;

pub struct Env<'a> {
    pub config: &'a GameConfig,
    pub rng: &'a mut GameRng,
    pub accounts: &'a mut AccountRegistry,
    /// Session time at which the current action or tick runs.
    pub now: Timestamp,
}

impl<'a> Env<'a> {
    pub fn new(
        config: &'a GameConfig,
        rng: &'a mut GameRng,
        accounts: &'a mut AccountRegistry,
        now: Timestamp,
    ) -> Self {
        Self {
            config,
            rng,
            accounts,
            now,
        }
    }
}
