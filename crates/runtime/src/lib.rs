//! Runtime orchestration for the dungeon simulation.
//!
//! This crate wires the deterministic rules of `game-core` to an async
//! single-writer worker. Consumers embed [`Runtime`] and drive the game through
//! the cloneable [`RuntimeHandle`], subscribing to the topics they care about.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator, builder and configuration
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - `workers` keeps the simulation task and the enemy-turn timer internal
pub mod api;
pub mod events;
pub mod runtime;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle, Snapshot};
pub use events::{Event, EventBus, SessionEvent, Topic};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
