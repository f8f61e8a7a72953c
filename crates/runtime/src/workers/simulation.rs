//! Simulation worker that owns the authoritative [`game_core::GameState`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), runs them
//! and the fixed-rate tick through [`game_core::Simulation`], and pushes a
//! snapshot to every observer whenever the state changed. Commands and ticks
//! share one `select!` loop, so they never interleave.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info, trace, warn};

use game_core::{
    Action, ActionResult, Dispatch, ExecuteError, GameError, GenerationReport,
    Simulation, SpawnReport, WorldSnapshot,
};

use crate::clock::SessionClock;
use crate::events::{Broadcaster, Observer, SubscriptionId};

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Run one gameplay command.
    Dispatch {
        action: Action,
        reply: oneshot::Sender<Dispatch>,
    },
    /// Query the current game state (read-only).
    QueryState {
        reply: oneshot::Sender<WorldSnapshot>,
    },
    /// Register an observer; it receives the current state immediately.
    Subscribe {
        observer: Box<dyn Observer>,
        reply: oneshot::Sender<SubscriptionId>,
    },
    Unsubscribe {
        id: SubscriptionId,
        reply: oneshot::Sender<bool>,
    },
    /// Regenerate terrain and clear live entities.
    ResetWorld {
        reply: oneshot::Sender<GenerationReport>,
    },
}

/// Background task that processes gameplay commands and ticks.
pub struct SimulationWorker {
    simulation: Simulation,
    broadcaster: Broadcaster,
    clock: SessionClock,
    tick_period: Duration,
    command_rx: mpsc::Receiver<Command>,
    shutdown_rx: oneshot::Receiver<()>,
}

impl SimulationWorker {
    pub fn new(
        simulation: Simulation,
        tick_period: Duration,
        command_rx: mpsc::Receiver<Command>,
        shutdown_rx: oneshot::Receiver<()>,
    ) -> Self {
        log_generation(simulation.generation_report());

        Self {
            simulation,
            broadcaster: Broadcaster::new(),
            clock: SessionClock::start(),
            tick_period,
            command_rx,
            shutdown_rx,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        info!(
            target: "runtime::worker",
            tick_ms = self.tick_period.as_millis() as u64,
            "Simulation worker started"
        );

        let mut ticker = time::interval(self.tick_period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                command = self.command_rx.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                _ = ticker.tick() => self.handle_tick(),
                _ = &mut self.shutdown_rx => break,
            }
        }

        info!(
            target: "runtime::worker",
            subscribers = self.broadcaster.len(),
            "Simulation worker stopped"
        );
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Dispatch { action, reply } => {
                let outcome = self.handle_dispatch(&action);
                if reply.send(outcome).is_err() {
                    debug!(target: "runtime::worker", "Dispatch reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.simulation.snapshot()).is_err() {
                    debug!(target: "runtime::worker", "QueryState reply channel closed (caller dropped)");
                }
            }
            Command::Subscribe { observer, reply } => {
                let current = self.simulation.snapshot();
                let id = self.broadcaster.subscribe(observer, &current);
                if reply.send(id).is_err() {
                    // The caller is gone and can never unsubscribe.
                    self.broadcaster.unsubscribe(id);
                }
            }
            Command::Unsubscribe { id, reply } => {
                let removed = self.broadcaster.unsubscribe(id);
                if reply.send(removed).is_err() {
                    debug!(target: "runtime::worker", "Unsubscribe reply channel closed (caller dropped)");
                }
            }
            Command::ResetWorld { reply } => {
                let report = self.simulation.reset_world().clone();
                log_generation(&report);
                self.broadcast();
                if reply.send(report).is_err() {
                    debug!(target: "runtime::worker", "ResetWorld reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn handle_dispatch(&mut self, action: &Action) -> Dispatch {
        let kind = action.kind();
        let outcome = self.simulation.dispatch(action, self.clock.now());

        match &outcome {
            Dispatch::Applied(result) => log_applied(result),
            Dispatch::Rejected { error, notified } => log_rejection(error, *notified),
        }
        trace!(target: "runtime::worker", action = %kind, changed = outcome.state_changed(), "Dispatched");

        if outcome.state_changed() {
            self.broadcast();
        }
        outcome
    }

    fn handle_tick(&mut self) {
        let report = self.simulation.tick(self.clock.now());

        if let Some(spawn) = &report.spawn {
            log_spawn(spawn);
        }
        if report.state_changed() {
            trace!(target: "runtime::worker", changes = ?report.changes, "Tick changed state");
            self.broadcast();
        }
    }

    fn broadcast(&mut self) {
        if self.broadcaster.is_empty() {
            return;
        }
        let snapshot = self.simulation.snapshot();
        self.broadcaster.broadcast(&snapshot);
    }
}

fn log_applied(result: &ActionResult) {
    match result {
        ActionResult::LoggedIn { username } => {
            info!(target: "runtime::worker", %username, "Player logged in");
        }
        ActionResult::Registered { username } => {
            info!(target: "runtime::worker", %username, "Player registered");
        }
        ActionResult::EnteredWorld(spawn) => {
            info!(target: "runtime::worker", spawned = spawn.spawned.len(), "Player entered the world");
            log_spawn(spawn);
        }
        ActionResult::Attack(outcome) if outcome.player_died => {
            info!(target: "runtime::worker", entity = %outcome.target, "Player was defeated");
        }
        _ => {}
    }
}

fn log_rejection(error: &ExecuteError, notified: bool) {
    if error.severity().is_internal() {
        error!(
            target: "runtime::worker",
            action = %error.kind,
            phase = error.phase().as_str(),
            code = error.error_code(),
            error = %error,
            "Action broke a state invariant and was discarded"
        );
    } else {
        debug!(
            target: "runtime::worker",
            action = %error.kind,
            code = error.error_code(),
            notified,
            "Action rejected"
        );
    }
}

fn log_spawn(report: &SpawnReport) {
    if report.fallbacks > 0 || report.skipped > 0 {
        warn!(
            target: "runtime::worker",
            fallbacks = report.fallbacks,
            skipped = report.skipped,
            "Monster placement ran out of random attempts"
        );
    }
}

fn log_generation(report: &GenerationReport) {
    for outcome in report.shortfalls() {
        warn!(
            target: "runtime::worker",
            kind = %outcome.kind,
            placed = outcome.placed,
            requested = outcome.requested,
            attempts = outcome.attempts,
            "Terrain generation placed fewer decorations than requested"
        );
    }
    debug!(
        target: "runtime::worker",
        walls = report.walls,
        "World generated"
    );
}
