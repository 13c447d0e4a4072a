//! High-level runtime orchestrator.
//!
//! The runtime owns the simulation worker, wires up command/event channels,
//! and exposes a builder-based API for clients to drive the game.

use std::str::FromStr;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use game_content::{WorldSpec, default_world};
use game_core::GameConfig;

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::{Event, EventBus, Topic};
use crate::workers::{Command, EnemyTurnTimer, SimulationWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    /// Pause between a player combat action and the enemy's reply.
    pub enemy_turn_delay: Duration,
    /// Fixed seed for reproducible playthroughs; random when `None`.
    pub game_seed: Option<u64>,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            enemy_turn_delay: Self::DEFAULT_ENEMY_TURN_DELAY,
            game_seed: None,
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

impl RuntimeConfig {
    pub const DEFAULT_ENEMY_TURN_DELAY: Duration = Duration::from_millis(1000);

    /// Defaults overridden by `ENEMY_TURN_DELAY_MS`, `GAME_SEED`,
    /// `RUNTIME_COMMAND_BUFFER` and `RUNTIME_EVENT_BUFFER`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let parse = |key: &'static str| -> Result<Option<u64>> { parse_var(key, lookup(key)) };

        let mut config = Self::default();
        if let Some(millis) = parse("ENEMY_TURN_DELAY_MS")? {
            config.enemy_turn_delay = Duration::from_millis(millis);
        }
        if let Some(seed) = parse("GAME_SEED")? {
            config.game_seed = Some(seed);
        }
        if let Some(size) = parse("RUNTIME_COMMAND_BUFFER")? {
            config.command_buffer_size = size as usize;
        }
        if let Some(size) = parse("RUNTIME_EVENT_BUFFER")? {
            config.event_buffer_size = size as usize;
        }
        Ok(config)
    }
}

fn parse_var<T: FromStr>(key: &'static str, value: Option<String>) -> Result<Option<T>> {
    let Some(value) = value else {
        return Ok(None);
    };
    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|_| RuntimeError::InvalidConfig { key, value })
}

/// Main runtime that owns the simulation worker.
///
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    sim_worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Shutdown the runtime gracefully
    ///
    /// Waits for the worker to drain its queue, which only happens once every
    /// cloned handle has been dropped too. A pending enemy turn is discarded.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.sim_worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    world: Option<WorldSpec>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            world: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Override only the game rules
    pub fn game_config(mut self, game_config: GameConfig) -> Self {
        self.config.game_config = game_config;
        self
    }

    /// Play a different world instead of the built-in dungeon
    pub fn world(mut self, world: WorldSpec) -> Self {
        self.world = Some(world);
        self
    }

    /// Build the runtime and start its worker
    pub async fn build(self) -> Result<Runtime> {
        let world = self.world.unwrap_or_else(default_world);
        let misplaced = world.misplaced();
        if !misplaced.is_empty() {
            return Err(RuntimeError::InvalidWorld(
                misplaced.into_iter().map(|(id, _)| id).collect(),
            ));
        }

        let game_seed = self.config.game_seed.unwrap_or_else(rand::random);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let (command_tx, command_rx) =
            mpsc::channel::<Command>(self.config.command_buffer_size.max(1));

        let timer = EnemyTurnTimer::new(self.config.enemy_turn_delay, command_tx.downgrade());
        let sim_worker = SimulationWorker::new(
            world,
            self.config.game_config,
            game_seed,
            command_rx,
            timer,
            event_bus.clone(),
        );

        let sim_worker_handle = tokio::spawn(async move {
            sim_worker.run().await;
        });

        Ok(Runtime {
            handle: RuntimeHandle::new(command_tx, event_bus),
            sim_worker_handle,
        })
    }
}
