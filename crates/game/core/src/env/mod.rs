//! Traits describing read-only world data.
//!
//! Oracles expose the static map geometry and the random source. The
//! [`GameEnv`] aggregate bundles them with the rule tables so the engine can
//! access everything it needs without hard coupling to concrete
//! implementations.
mod map;
mod rng;

pub use map::{MapDimensions, MapOracle, StaticMap, TerrainKind};
pub use rng::{PcgRng, RngOracle, compute_seed, context};

use crate::config::GameConfig;

/// Aggregates the read-only collaborators required by the action pipeline.
#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    map: &'a dyn MapOracle,
    rng: &'a dyn RngOracle,
    config: &'a GameConfig,
}

impl<'a> GameEnv<'a> {
    pub fn new(map: &'a dyn MapOracle, rng: &'a dyn RngOracle, config: &'a GameConfig) -> Self {
        Self { map, rng, config }
    }

    pub fn map(&self) -> &'a dyn MapOracle {
        self.map
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }
}

impl std::fmt::Debug for GameEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEnv")
            .field("dimensions", &self.map.dimensions())
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
