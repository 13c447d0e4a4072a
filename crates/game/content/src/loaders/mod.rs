//! Content loaders for reading game data from files.
//!
//! Worlds are RON documents shaped like [`WorldSpec`](crate::WorldSpec); rule
//! overrides are TOML documents shaped like [`game_core::GameConfig`].

pub mod config;
pub mod factory;
pub mod world;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use world::WorldLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
