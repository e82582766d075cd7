//! Scene manager: generates the world, evolves it and answers queries.
//!
//! The scene sits behind an `RwLock`: `generate_initial_world` and `update`
//! take it exclusively, [`SceneManager::current_scene`] shares it. Terrain
//! queries go through a separate handle to the height map and never touch
//! the scene lock. The phase is an atomic, so no query waits on the
//! evolver mutex a writer holds while it acquires the scene lock.

use std::ops::Deref;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard};
use std::time::Instant;

use super::config::SceneConfig;
use super::evolver::SceneEvolver;
use super::{lock_mutex, read_lock, write_lock, Scene, TerrainHandle};
use crate::atmosphere::{clamp_fear, TimeOfDay, WeatherState};
use crate::carving::FeatureCarver;
use crate::core::Result;
use crate::population::ObjectPopulator;
use crate::terrain::{BiomeParams, BiomeRegistry, HeightMap, TerrainSynthesizer};

/// Returned by [`SceneManager::terrain_height_at`] off the map.
pub const TERRAIN_HEIGHT_SENTINEL: f32 = 0.0;
/// Returned by [`SceneManager::biome_at`] off the map.
pub const UNKNOWN_BIOME: &str = "unknown";

/// Lifecycle of the managed world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum WorldPhase {
    #[default]
    Uninitialized,
    Generated,
    Evolving,
}

impl WorldPhase {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Generated,
            2 => Self::Evolving,
            _ => Self::Uninitialized,
        }
    }
}

/// Shared read access to the current scene. Holding it blocks `update`.
pub struct SceneView<'a>(RwLockReadGuard<'a, Scene>);

impl Deref for SceneView<'_> {
    type Target = Scene;

    fn deref(&self) -> &Scene {
        &self.0
    }
}

/// Owns one generated world.
pub struct SceneManager {
    config: SceneConfig,
    seed: u32,
    biome: BiomeParams,
    scene: RwLock<Scene>,
    terrain: RwLock<TerrainHandle>,
    evolver: Mutex<Option<SceneEvolver>>,
    phase: AtomicU8,
}

impl SceneManager {
    /// Create a manager using the built-in biomes.
    pub fn new(config: SceneConfig) -> Result<Self> {
        Self::with_biomes(config, &BiomeRegistry::with_defaults())
    }

    /// Create a manager, resolving the configured biome in `registry`.
    pub fn with_biomes(config: SceneConfig, registry: &BiomeRegistry) -> Result<Self> {
        config.validate()?;
        let biome = registry.get(&config.biome)?.clone();
        let seed = config.resolved_seed();
        if seed != config.seed {
            log::info!("Seed 0 requested; using random seed {}", seed);
        }

        let scene = Scene::empty();
        let terrain = Arc::clone(&scene.terrain);
        Ok(Self {
            config,
            seed,
            biome,
            scene: RwLock::new(scene),
            terrain: RwLock::new(terrain),
            evolver: Mutex::new(None),
            phase: AtomicU8::new(WorldPhase::Uninitialized as u8),
        })
    }

    /// Generate terrain, carve features and populate objects, replacing any
    /// existing scene. Resets the phase to [`WorldPhase::Generated`].
    pub fn generate_initial_world(&self) {
        let start = Instant::now();
        let mut evolver_slot = lock_mutex(&self.evolver);
        let config = &self.config;
        let biome = &self.biome;

        let mut map = TerrainSynthesizer::new(self.seed, biome, config.cell_size, config.height_scale)
            .synthesize(config.grid_width, config.grid_height);
        let terrain_ms = start.elapsed().as_secs_f64() * 1000.0;

        let carve = FeatureCarver::new(self.seed as u64, config.carving.clone()).carve(&mut map, biome.terrain_style);
        let carve_ms = start.elapsed().as_secs_f64() * 1000.0 - terrain_ms;

        let mut populator = ObjectPopulator::new(self.seed as u64, biome, 0);
        let (objects, population) = populator.populate(&map);

        let mut weather = biome.weather.clone();
        WeatherState::from_weights(&weather).write_to(&mut weather);
        let fear_level = clamp_fear(biome.fear_level);
        let mut atmosphere = biome.atmosphere.clone();
        atmosphere.set("atmosphere.fear", fear_level);

        let terrain: TerrainHandle = Arc::new(RwLock::new(map));
        let scene = Scene {
            terrain: Arc::clone(&terrain),
            objects,
            weather,
            atmosphere,
            time_of_day: TimeOfDay::new(config.evolution.start_time).fraction(),
            fear_level,
            seed: self.seed,
            biome: biome.name.clone(),
            next_object_id: populator.next_id(),
        };
        let evolver = SceneEvolver::new(&scene, biome.clone(), config.evolution.clone());

        // Scene and terrain handle switch under the scene write lock so
        // queries never pair the new scene with the old map.
        let mut current = write_lock(&self.scene);
        *write_lock(&self.terrain) = terrain;
        *current = scene;
        *evolver_slot = Some(evolver);
        self.phase.store(WorldPhase::Generated as u8, Ordering::Release);
        drop(current);

        log::info!(
            "Generated '{}' world {}x{} (seed {}): {} objects, {} carved patches in {:.1}ms (terrain {:.1}ms, carving {:.1}ms)",
            biome.name,
            config.grid_width,
            config.grid_height,
            self.seed,
            population.total(),
            carve.patches,
            start.elapsed().as_secs_f64() * 1000.0,
            terrain_ms,
            carve_ms
        );
    }

    /// Advance simulated time by `dt` seconds. A no-op before generation and
    /// for non-finite or non-positive `dt`.
    pub fn update(&self, dt: f32) {
        let mut evolver_slot = lock_mutex(&self.evolver);
        let Some(evolver) = evolver_slot.as_mut() else {
            return;
        };
        if !dt.is_finite() || dt <= 0.0 {
            log::debug!("Ignoring update with dt = {}", dt);
            return;
        }

        let mut scene = write_lock(&self.scene);
        evolver.update(&mut scene, dt);
        self.phase.store(WorldPhase::Evolving as u8, Ordering::Release);
    }

    /// Read-locked view of the scene; an empty scene before generation.
    pub fn current_scene(&self) -> SceneView<'_> {
        SceneView(read_lock(&self.scene))
    }

    /// Terrain surface height at world `(x, z)`, bilinearly interpolated.
    /// [`TERRAIN_HEIGHT_SENTINEL`] off the map, for non-finite input and
    /// before generation.
    pub fn terrain_height_at(&self, x: f32, z: f32) -> f32 {
        self.with_terrain(|map| map.height_at_world(x, z))
            .unwrap_or(TERRAIN_HEIGHT_SENTINEL)
    }

    /// Region tag of the nearest cell, the biome name for an unlabelled
    /// cell, or [`UNKNOWN_BIOME`] off the map.
    pub fn biome_at(&self, x: f32, z: f32) -> String {
        match self.with_terrain(|map| map.region_at_world(x, z)) {
            Some(Some(region)) => region.as_str().to_string(),
            Some(None) => self.biome.name.clone(),
            None => UNKNOWN_BIOME.to_string(),
        }
    }

    pub fn phase(&self) -> WorldPhase {
        WorldPhase::from_u8(self.phase.load(Ordering::Acquire))
    }

    /// Resolved world seed (never 0).
    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn biome(&self) -> &BiomeParams {
        &self.biome
    }

    /// Handle to the current height map.
    pub fn terrain(&self) -> TerrainHandle {
        Arc::clone(&read_lock(&self.terrain))
    }

    fn with_terrain<T>(&self, f: impl FnOnce(&HeightMap) -> Option<T>) -> Option<T> {
        let handle = self.terrain();
        let map = read_lock(&handle);
        f(&map)
    }
}
