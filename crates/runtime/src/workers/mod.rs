//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker executes gameplay commands; the enemy-turn timer
//! feeds delayed enemy actions back into the same command queue.

mod simulation;
mod timer;

pub use simulation::{Command, SimulationWorker};
pub use timer::EnemyTurnTimer;
