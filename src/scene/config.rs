//! Scene configuration

use serde::{Deserialize, Serialize};

use crate::carving::CarvingConfig;
use crate::core::{Error, Result};
use super::evolver::EvolutionConfig;

/// Largest grid side accepted by [`SceneConfig::validate`].
pub const MAX_GRID_SIDE: usize = 4096;

/// Configuration for a generated scene. Fixed once the manager is built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// World seed; 0 picks a random seed at construction
    pub seed: u32,
    /// Biome name, looked up in the manager's registry
    pub biome: String,
    /// Grid cells along x
    pub grid_width: usize,
    /// Grid cells along z
    pub grid_height: usize,
    /// World units per grid cell
    pub cell_size: f32,
    /// World height of elevation 1.0
    pub height_scale: f32,
    pub carving: CarvingConfig,
    pub evolution: EvolutionConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            biome: "dark_forest".to_string(),
            grid_width: 64,
            grid_height: 64,
            cell_size: 1.0,
            height_scale: 20.0,
            carving: CarvingConfig::default(),
            evolution: EvolutionConfig::default(),
        }
    }
}

impl SceneConfig {
    /// Check dimensions, scales and evolution timing.
    pub fn validate(&self) -> Result<()> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(Error::InvalidConfig(format!(
                "grid must be non-empty, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        if self.grid_width > MAX_GRID_SIDE || self.grid_height > MAX_GRID_SIDE {
            return Err(Error::InvalidConfig(format!(
                "grid {}x{} exceeds {} cells per side",
                self.grid_width, self.grid_height, MAX_GRID_SIDE
            )));
        }
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(Error::InvalidConfig(format!("cell_size must be positive, got {}", self.cell_size)));
        }
        if !(self.height_scale.is_finite() && self.height_scale > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "height_scale must be positive, got {}",
                self.height_scale
            )));
        }
        if !self.carving.feature_density.is_finite() || self.carving.feature_density < 0.0 {
            return Err(Error::InvalidConfig("carving.feature_density must be non-negative".into()));
        }
        self.evolution.validate()
    }

    /// The configured seed, or a fresh random non-zero seed when it is 0.
    pub fn resolved_seed(&self) -> u32 {
        if self.seed != 0 {
            return self.seed;
        }
        rand::random::<u32>().max(1)
    }
}
