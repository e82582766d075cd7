//! Noise-based terrain synthesis.
//!
//! Builds a [`HeightMap`] from layered FBM bands, biome shaping, an
//! independent humidity channel, roulette material selection and a
//! rule-table region classification. Rows are independent and generated in
//! parallel; each row owns an RNG seeded from `(seed, row)` so output does
//! not depend on scheduling.

use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use super::biome::{BiomeParams, TerrainStyle};
use super::grid::Grid;
use super::heightmap::{clamp_elevation, HeightMap};
use super::material::{choose_material, Material};
use super::region::Region;
use crate::carving::shape::{shape_elevation, ShapeSample};
use crate::noise_field::NoiseField;

// Noise channel indices. Each gets an independent seed.
const CH_LARGE: u32 = 1;
const CH_MEDIUM: u32 = 2;
const CH_SMALL: u32 = 3;
const CH_RIDGE: u32 = 4;
const CH_RIVER: u32 = 5;
const CH_RIVER_MASK: u32 = 6;
const CH_HUMIDITY: u32 = 7;
const CH_REGION: u32 = 8;

/// One generated row, merged into the grids after the parallel pass.
struct RowSample {
    elevation: Vec<f32>,
    humidity: Vec<f32>,
    material: Vec<Material>,
    region: Vec<Option<Region>>,
}

/// Terrain synthesizer for one seed and biome.
pub struct TerrainSynthesizer<'a> {
    biome: &'a BiomeParams,
    seed: u32,
    cell_size: f32,
    height_scale: f32,
    large: NoiseField,
    medium: NoiseField,
    small: NoiseField,
    ridge: NoiseField,
    river: NoiseField,
    river_mask: NoiseField,
    humidity: NoiseField,
    region: NoiseField,
}

impl<'a> TerrainSynthesizer<'a> {
    pub fn new(seed: u32, biome: &'a BiomeParams, cell_size: f32, height_scale: f32) -> Self {
        let base = NoiseField::new(seed);
        Self {
            biome,
            seed,
            cell_size,
            height_scale,
            large: base.channel(CH_LARGE),
            medium: base.channel(CH_MEDIUM),
            small: base.channel(CH_SMALL),
            ridge: base.channel(CH_RIDGE),
            river: base.channel(CH_RIVER),
            river_mask: base.channel(CH_RIVER_MASK),
            humidity: base.channel(CH_HUMIDITY),
            region: base.channel(CH_REGION),
        }
    }

    /// Generate a `width x height` map.
    pub fn synthesize(&self, width: usize, height: usize) -> HeightMap {
        if width == 0 || height == 0 {
            log::warn!("Terrain synthesis requested for empty grid {}x{}", width, height);
            return HeightMap::new(width, height, self.cell_size, self.height_scale);
        }

        let start = Instant::now();
        let rows: Vec<RowSample> = (0..height)
            .into_par_iter()
            .map(|z| self.synthesize_row(z, width, height))
            .collect();

        let cells = width * height;
        let mut elevation = Vec::with_capacity(cells);
        let mut humidity = Vec::with_capacity(cells);
        let mut material = Vec::with_capacity(cells);
        let mut region = Vec::with_capacity(cells);
        for row in rows {
            elevation.extend(row.elevation);
            humidity.extend(row.humidity);
            material.extend(row.material);
            region.extend(row.region);
        }

        let layers = (
            Grid::from_vec(width, height, elevation),
            Grid::from_vec(width, height, humidity),
            Grid::from_vec(width, height, material),
            Grid::from_vec(width, height, region),
        );
        let map = match layers {
            (Some(e), Some(h), Some(m), Some(r)) => {
                HeightMap::from_layers(e, h, m, r, self.cell_size, self.height_scale)
            }
            _ => None,
        };

        log::info!(
            "Synthesized {}x{} terrain for biome '{}' in {:.1}ms",
            width,
            height,
            self.biome.name,
            start.elapsed().as_secs_f64() * 1000.0
        );

        map.unwrap_or_else(|| {
            log::warn!("Terrain layers disagreed in size; returning flat terrain");
            HeightMap::new(width, height, self.cell_size, self.height_scale)
        })
    }

    fn synthesize_row(&self, z: usize, width: usize, height: usize) -> RowSample {
        let mut rng = self.row_rng(z);
        let nz = z as f32 / height as f32;

        let mut row = RowSample {
            elevation: Vec::with_capacity(width),
            humidity: Vec::with_capacity(width),
            material: Vec::with_capacity(width),
            region: Vec::with_capacity(width),
        };

        for x in 0..width {
            let nx = x as f32 / width as f32;
            let (elevation, river) = self.elevation_at(nx, nz);
            let humidity = self.humidity_at(nx, nz);
            let material = choose_material(elevation, &self.biome.materials, &mut rng);
            let region = if river {
                Region::River
            } else {
                Region::classify(elevation, humidity, self.region.unit_2d(nx * 1.5, nz * 1.5))
            };

            row.elevation.push(elevation);
            row.humidity.push(humidity);
            row.material.push(material);
            row.region.push(Some(region));
        }
        row
    }

    /// Shaped, clamped elevation at normalized coordinates and whether a
    /// river runs through it.
    fn elevation_at(&self, nx: f32, nz: f32) -> (f32, bool) {
        let raw = 0.6 * self.large.fbm_2d(nx * 2.0, nz * 2.0, 4, 2.0, 0.5)
            + 0.3 * self.medium.fbm_2d(nx * 6.0, nz * 6.0, 3, 2.0, 0.5)
            + 0.1 * self.small.fbm_2d(nx * 16.0, nz * 16.0, 2, 2.0, 0.5);

        let elevation = self.biome.base_elevation + raw * self.biome.roughness * 0.5;
        let sample = ShapeSample {
            ridge: self.ridge.ridge_2d(nx * 3.0, nz * 3.0),
            river_primary: self.river.perlin_2d(nx * 2.5 + 0.5, nz * 2.5 + 0.5),
            river_secondary: self.river_mask.perlin_2d(nx * 1.2 + 0.3, nz * 1.2 + 0.7),
        };
        let shaped = shape_elevation(self.biome.terrain_style, elevation, &sample);
        (clamp_elevation(shaped.elevation), shaped.river)
    }

    fn humidity_at(&self, nx: f32, nz: f32) -> f32 {
        let h = (self.humidity.fbm_2d(nx * 3.0, nz * 3.0, 3, 2.0, 0.5) + 1.0) * 0.5;
        let h = match self.biome.terrain_style {
            TerrainStyle::Swamp => 0.5 + h * 0.5,
            TerrainStyle::Mountains => h * 0.6,
            TerrainStyle::Forest | TerrainStyle::Clearing => h,
        };
        h.clamp(0.0, 1.0)
    }

    fn row_rng(&self, z: usize) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(((self.seed as u64) << 32) ^ z as u64)
    }
}
