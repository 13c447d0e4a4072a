//! Static game content and data-driven loaders.
//!
//! This crate houses the built-in dungeon (player, enemies, bosses, floor
//! items, quests and wall layout) and, behind the `loaders` feature, RON/TOML
//! loaders for alternative worlds and rule overrides.
//!
//! Content is immutable: a [`WorldSpec`] is turned into a fresh
//! [`game_core::GameState`] for every new game or reset.

pub mod dungeon;
pub mod world;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use dungeon::{GRID_HEIGHT, GRID_WIDTH, default_world};
pub use world::WorldSpec;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, WorldLoader};
