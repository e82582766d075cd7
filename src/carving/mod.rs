//! Feature carving: post-synthesis passes that cut recognisable landmarks
//! into the height map.
//!
//! Each pass blends toward a target rather than overwriting, clamps into the
//! elevation domain and ignores cells outside the grid. Which passes run,
//! and how many of each, comes from a [`CarvingPlan`] chosen by the biome's
//! [`TerrainStyle`].

pub mod patches;
pub mod path;
pub mod peaks;
pub mod ravine;
pub mod shape;
pub mod smoothing;

pub use shape::{shape_elevation, ShapeSample, Shaped};
pub use smoothing::smooth_terrain;

use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::terrain::{HeightMap, TerrainStyle};

/// Carving configuration, fixed at construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarvingConfig {
    /// Skip every pass except smoothing.
    pub enabled: bool,
    /// 3x3 smoothing passes after carving.
    pub smoothing_passes: u32,
    /// Multiplier on feature counts.
    pub feature_density: f32,
    /// Feature radius as a fraction of the shorter grid side.
    pub radius_fraction: f32,
}

impl Default for CarvingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            smoothing_passes: 2,
            feature_density: 1.0,
            radius_fraction: 0.08,
        }
    }
}

/// How many of each feature a map gets.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CarvingPlan {
    pub clearings: usize,
    pub groves: usize,
    pub pits: usize,
    pub islands: usize,
    pub peaks: usize,
    pub ravines: usize,
    pub paths: usize,
    /// Patch radius in cells.
    pub radius: f32,
}

impl CarvingPlan {
    /// Plan for a `width x height` map of the given style. Patch counts
    /// scale with map area relative to a 64x64 map.
    pub fn for_style(style: TerrainStyle, width: usize, height: usize, config: &CarvingConfig) -> Self {
        let area = (width * height) as f32 / 4096.0;
        let scaled = |n: f32| ((n * area * config.feature_density).round() as usize).max(1);
        let radius = (width.min(height) as f32 * config.radius_fraction).max(2.0);

        match style {
            TerrainStyle::Forest => Self {
                clearings: scaled(3.0),
                groves: scaled(4.0),
                ravines: 1,
                paths: 1,
                radius,
                ..Default::default()
            },
            TerrainStyle::Swamp => Self {
                pits: scaled(5.0),
                islands: scaled(3.0),
                clearings: 1,
                paths: 1,
                radius,
                ..Default::default()
            },
            TerrainStyle::Mountains => Self {
                peaks: scaled(4.0),
                ravines: 2,
                paths: 1,
                radius: radius * 1.5,
                ..Default::default()
            },
            TerrainStyle::Clearing => Self {
                clearings: scaled(4.0),
                groves: 1,
                paths: 2,
                radius: radius * 1.25,
                ..Default::default()
            },
        }
    }
}

/// What a carving run actually did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CarveStats {
    pub patches: usize,
    pub peaks: usize,
    pub ravine_steps: usize,
    pub path_cells: usize,
}

/// Applies a [`CarvingPlan`] to a height map with an owned seeded RNG.
pub struct FeatureCarver {
    config: CarvingConfig,
    rng: ChaCha8Rng,
}

impl FeatureCarver {
    pub fn new(seed: u64, config: CarvingConfig) -> Self {
        Self { config, rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn config(&self) -> &CarvingConfig {
        &self.config
    }

    /// Carve the style's default plan, then smooth.
    pub fn carve(&mut self, map: &mut HeightMap, style: TerrainStyle) -> CarveStats {
        let plan = CarvingPlan::for_style(style, map.width(), map.height(), &self.config);
        self.carve_plan(map, &plan)
    }

    /// Carve an explicit plan, then smooth.
    pub fn carve_plan(&mut self, map: &mut HeightMap, plan: &CarvingPlan) -> CarveStats {
        let mut stats = CarveStats::default();
        if map.is_empty() {
            return stats;
        }
        let start = Instant::now();

        if self.config.enabled {
            // Order matters: later passes see earlier ones' labels
            for _ in 0..plan.clearings {
                let (cx, cz) = self.random_centre(map);
                patches::carve_clearing(map, cx, cz, plan.radius);
                stats.patches += 1;
            }
            for _ in 0..plan.pits {
                let (cx, cz) = self.random_centre(map);
                patches::carve_swamp_pit(map, cx, cz, plan.radius);
                stats.patches += 1;
            }
            for _ in 0..plan.islands {
                let (cx, cz) = self.random_centre(map);
                patches::carve_island(map, cx, cz, plan.radius * 0.75);
                stats.patches += 1;
            }
            for _ in 0..plan.groves {
                let (cx, cz) = self.random_centre(map);
                patches::carve_grove(map, cx, cz, plan.radius, &mut self.rng);
                stats.patches += 1;
            }
            stats.peaks = peaks::raise_peaks(map, plan.peaks, plan.radius, &mut self.rng);
            for _ in 0..plan.ravines {
                stats.ravine_steps += ravine::carve_ravine(map, &mut self.rng);
            }
            for _ in 0..plan.paths {
                stats.path_cells += path::carve_path(map, &mut self.rng).len();
            }
        }

        smooth_terrain(map, self.config.smoothing_passes);

        log::debug!(
            "Carved {} patches, {} peaks, {} ravine steps, {} path cells in {:.1}ms",
            stats.patches,
            stats.peaks,
            stats.ravine_steps,
            stats.path_cells,
            start.elapsed().as_secs_f64() * 1000.0
        );
        stats
    }

    fn random_centre(&mut self, map: &HeightMap) -> (f32, f32) {
        (
            self.rng.random_range(0.0..map.width() as f32),
            self.rng.random_range(0.0..map.height() as f32),
        )
    }
}
