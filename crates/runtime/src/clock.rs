//! Monotonic session time fed into the simulation.

use tokio::time::Instant;

use game_core::Timestamp;

/// Milliseconds elapsed since the runtime started.
///
/// Backed by tokio's clock so paused-time tests drive it deterministically.
#[derive(Clone, Copy, Debug)]
pub struct SessionClock {
    started: Instant,
}

impl SessionClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn now(&self) -> Timestamp {
        let millis = self.started.elapsed().as_millis();
        Timestamp::from_millis(u64::try_from(millis).unwrap_or(u64::MAX))
    }
}
