//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up the command channel, and
//! exposes a builder-based API for transports to drive the session.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use game_core::{GameConfig, GameRng, Simulation};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::workers::{Command, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    /// Seed for world generation and every random roll; `None` draws one from the OS.
    pub seed: Option<u64>,
    pub command_buffer_size: usize,
    pub tick_period: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        let game_config = GameConfig::default();
        let tick_period = Duration::from_millis(game_config.tick_period_ms);
        Self {
            game_config,
            seed: None,
            command_buffer_size: 32,
            tick_period,
        }
    }
}

/// Main runtime that hosts one authoritative session.
///
/// [`RuntimeHandle`] provides a cloneable façade for clients. Dropping the
/// runtime without calling [`Runtime::shutdown`] also stops the worker.
pub struct Runtime {
    handle: RuntimeHandle,
    shutdown_tx: oneshot::Sender<()>,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Starts a runtime with `config`. Must be called inside a tokio runtime.
    pub fn start(config: RuntimeConfig) -> Self {
        Self::builder().config(config).build()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Stops the worker and waits for it to finish.
    ///
    /// Commands already queued are dropped; their callers see
    /// [`RuntimeError::ReplyChannelClosed`].
    pub async fn shutdown(self) -> Result<()> {
        // The worker may already be gone; joining reports that.
        let _ = self.shutdown_tx.send(());
        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    rng: Option<GameRng>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            rng: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn game_config(mut self, game_config: GameConfig) -> Self {
        self.config.tick_period = Duration::from_millis(game_config.tick_period_ms);
        self.config.game_config = game_config;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Supplies a ready random source; takes precedence over the seed.
    pub fn rng(mut self, rng: GameRng) -> Self {
        self.rng = Some(rng);
        self
    }

    pub fn command_buffer_size(mut self, size: usize) -> Self {
        self.config.command_buffer_size = size.max(1);
        self
    }

    /// Build the runtime and spawn its worker.
    pub fn build(self) -> Runtime {
        let RuntimeConfig {
            game_config,
            seed,
            command_buffer_size,
            tick_period,
        } = self.config;

        let rng = match (self.rng, seed) {
            (Some(rng), _) => rng,
            (None, Some(seed)) => GameRng::seed_from_u64(seed),
            (None, None) => GameRng::from_entropy(),
        };
        let simulation = Simulation::with_rng(game_config, rng);

        let (command_tx, command_rx) = mpsc::channel::<Command>(command_buffer_size.max(1));
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let sim_worker = SimulationWorker::new(simulation, tick_period, command_rx, shutdown_rx);
        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        Runtime {
            handle: RuntimeHandle::new(command_tx),
            shutdown_tx,
            sim_worker_handle,
        }
    }
}
