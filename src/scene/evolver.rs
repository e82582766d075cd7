//! Temporal scene evolution.
//!
//! Time of day advances continuously with every update. Everything else
//! (weather, object metadata, population and mood) moves in discrete ticks
//! gated on accumulated simulated time, so a run is reproducible for a seed
//! regardless of how it is sliced into frames.

use std::sync::Arc;

use glam::Vec3;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::{read_lock, Scene};
use crate::atmosphere::{drift_fear, TimeOfDay, WeatherDrift, WeatherState};
use crate::core::{Error, Result};
use crate::population::rules::{self, METADATA_TAXONOMY, SPAWN_SEED_OFFSET};
use crate::population::{random_cell, ObjectKind, ProceduralObject};
use crate::terrain::{BiomeParams, HeightMap, Material};

/// Cells tried when looking for dry ground to spawn on.
const SPAWN_TRIES: usize = 5;
const METADATA_STEP: f32 = 0.05;
const STRANGE_JITTER: f32 = 0.25;

/// Evolution timing and drift rates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Simulated seconds per evolution tick.
    pub tick_interval: f32,
    /// Tick cap per update. Backlog carries to later updates, up to one
    /// update's worth.
    pub max_ticks_per_update: u32,
    /// Simulated seconds in one full day.
    pub day_length: f32,
    /// Time of day at generation, as a fraction.
    pub start_time: f32,
    /// Population ceiling for spawned objects.
    pub max_objects: usize,
    /// Per-object chance per tick of nudging every metadata weight.
    pub metadata_drift_chance: f64,
    /// Per-object chance per tick of gaining a new metadata key.
    pub metadata_inject_chance: f64,
    /// Per-anomaly chance per tick of shuffling position.
    pub strange_jitter_chance: f64,
    pub spawn_chance: f64,
    pub despawn_chance: f64,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            tick_interval: 2.0,
            max_ticks_per_update: 8,
            day_length: 600.0,
            start_time: 0.35,
            max_objects: 1024,
            metadata_drift_chance: 0.05,
            metadata_inject_chance: 0.01,
            strange_jitter_chance: 0.02,
            spawn_chance: 0.02,
            despawn_chance: 0.02,
        }
    }
}

impl EvolutionConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.tick_interval.is_finite() && self.tick_interval > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "evolution.tick_interval must be positive, got {}",
                self.tick_interval
            )));
        }
        if !(self.day_length.is_finite() && self.day_length > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "evolution.day_length must be positive, got {}",
                self.day_length
            )));
        }
        if self.max_ticks_per_update == 0 {
            return Err(Error::InvalidConfig("evolution.max_ticks_per_update must be at least 1".into()));
        }
        let chances = [
            self.metadata_drift_chance,
            self.metadata_inject_chance,
            self.strange_jitter_chance,
            self.spawn_chance,
            self.despawn_chance,
        ];
        if chances.iter().any(|p| !(0.0..=1.0).contains(p)) {
            return Err(Error::InvalidConfig("evolution chances must lie in [0, 1]".into()));
        }
        Ok(())
    }

    /// Copy with every field forced into the range `validate` accepts.
    /// Chances are clamped to `[0, 1]` (NaN becomes 0); a bad interval,
    /// day length or tick cap falls back to its default.
    pub fn sanitized(&self) -> Self {
        let defaults = Self::default();
        let chance = |p: f64| if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
        let positive = |v: f32, fallback: f32| if v.is_finite() && v > 0.0 { v } else { fallback };
        Self {
            tick_interval: positive(self.tick_interval, defaults.tick_interval),
            max_ticks_per_update: if self.max_ticks_per_update == 0 {
                defaults.max_ticks_per_update
            } else {
                self.max_ticks_per_update
            },
            day_length: positive(self.day_length, defaults.day_length),
            start_time: self.start_time,
            max_objects: self.max_objects,
            metadata_drift_chance: chance(self.metadata_drift_chance),
            metadata_inject_chance: chance(self.metadata_inject_chance),
            strange_jitter_chance: chance(self.strange_jitter_chance),
            spawn_chance: chance(self.spawn_chance),
            despawn_chance: chance(self.despawn_chance),
        }
    }
}

/// Drives a [`Scene`] forward in time with an owned seeded RNG.
pub struct SceneEvolver {
    config: EvolutionConfig,
    biome: BiomeParams,
    seed: u64,
    rng: ChaCha8Rng,
    time: TimeOfDay,
    weather: WeatherDrift,
    accumulator: f32,
    ticks: u64,
    spawned: u64,
}

impl SceneEvolver {
    /// Weather starts from the scene's current `fog`/`wind` weights. A config
    /// that fails [`EvolutionConfig::validate`] is sanitized first.
    pub fn new(scene: &Scene, biome: BiomeParams, config: EvolutionConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                log::warn!("{}; clamping evolution config", e);
                config.sanitized()
            }
        };
        Self {
            weather: WeatherDrift::new(scene.seed, WeatherState::from_weights(&scene.weather)),
            rng: ChaCha8Rng::seed_from_u64(scene.seed as u64 ^ 0x6576_6F6C_7665),
            seed: scene.seed as u64,
            time: TimeOfDay::new(scene.time_of_day),
            config,
            biome,
            accumulator: 0.0,
            ticks: 0,
            spawned: 0,
        }
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    pub fn time(&self) -> &TimeOfDay {
        &self.time
    }

    /// Ticks run since construction.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advance by `dt` simulated seconds. Returns the number of ticks run.
    /// Non-finite or non-positive `dt` is ignored.
    pub fn update(&mut self, scene: &mut Scene, dt: f32) -> u32 {
        if !dt.is_finite() || dt <= 0.0 {
            return 0;
        }
        self.time.advance(dt, self.config.day_length);
        scene.time_of_day = self.time.fraction();

        let interval = self.config.tick_interval;
        let max_ticks = self.config.max_ticks_per_update;
        self.accumulator += dt;

        let mut ran = 0;
        while self.accumulator >= interval && ran < max_ticks {
            self.accumulator -= interval;
            self.tick(scene);
            ran += 1;
        }
        let cap = interval * max_ticks as f32;
        if self.accumulator > cap {
            log::debug!("Evolution backlog of {:.1}s trimmed to {:.1}s", self.accumulator, cap);
            self.accumulator = cap;
        }
        ran
    }

    /// Run one evolution tick unconditionally.
    pub fn tick(&mut self, scene: &mut Scene) {
        self.weather.tick(&self.time).write_to(&mut scene.weather);

        let terrain = Arc::clone(&scene.terrain);
        let map = read_lock(&terrain);
        self.drift_metadata(scene, &map);
        self.drift_population(scene, &map);
        drop(map);

        scene.fear_level = drift_fear(scene.fear_level, &mut self.rng);
        scene.atmosphere.set("atmosphere.fear", scene.fear_level);
        self.ticks += 1;
    }

    fn drift_metadata(&mut self, scene: &mut Scene, map: &HeightMap) {
        for obj in scene.objects.iter_mut() {
            if self.rng.random_bool(self.config.metadata_drift_chance) {
                let keys: Vec<String> = obj.metadata.keys().map(str::to_string).collect();
                for key in keys {
                    let delta = self.rng.random_range(-METADATA_STEP..=METADATA_STEP);
                    obj.metadata.nudge(&key, delta);
                }
            }

            if self.rng.random_bool(self.config.metadata_inject_chance) {
                let missing: Vec<&str> = METADATA_TAXONOMY
                    .iter()
                    .copied()
                    .filter(|k| !obj.metadata.contains(k))
                    .collect();
                if let Some(key) = missing.choose(&mut self.rng) {
                    let weight = self.rng.random_range(0.0..=1.0);
                    obj.metadata.set(*key, weight);
                }
            }

            if obj.kind == ObjectKind::Strange && self.rng.random_bool(self.config.strange_jitter_chance) {
                let x = obj.position.x + self.rng.random_range(-STRANGE_JITTER..=STRANGE_JITTER);
                let z = obj.position.z + self.rng.random_range(-STRANGE_JITTER..=STRANGE_JITTER);
                if let Some(y) = map.height_at_world(x, z) {
                    obj.position = Vec3::new(x, y, z);
                }
            }
        }
    }

    fn drift_population(&mut self, scene: &mut Scene, map: &HeightMap) {
        if self.rng.random_bool(self.config.spawn_chance) {
            if scene.objects.len() >= self.config.max_objects {
                return;
            }
            if let Some(obj) = self.spawn(scene, map) {
                log::debug!("Spawned {} '{}' (id {})", obj.kind, obj.sub_type, obj.id);
                scene.objects.push(obj);
            }
        } else if !scene.objects.is_empty() && self.rng.random_bool(self.config.despawn_chance) {
            let index = self.rng.random_range(0..scene.objects.len());
            let removed = scene.objects.swap_remove(index);
            log::debug!("Removed {} (id {})", removed.kind, removed.id);
        }
    }

    fn spawn(&mut self, scene: &mut Scene, map: &HeightMap) -> Option<ProceduralObject> {
        let cell = (0..SPAWN_TRIES)
            .filter_map(|_| random_cell(map, &mut self.rng))
            .find(|&(x, z)| map.material(x, z) != Some(Material::Water))?;
        let kind = self.pick_kind();
        let region = map.region(cell.0, cell.1);

        let appearance = match kind {
            ObjectKind::Tree => rules::tree_appearance(region, &self.biome, &mut self.rng)?,
            ObjectKind::Rock => {
                rules::rock_appearance(region, map.slope_at(cell.0, cell.1), &self.biome, &mut self.rng)
            }
            ObjectKind::Strange => rules::strange_appearance(&mut self.rng),
        };
        let position = map.grid_to_world(cell.0, cell.1)?;
        let metadata = rules::object_metadata(kind, &appearance.sub_type, region, &mut self.rng);

        let id = scene.next_object_id;
        scene.next_object_id += 1;
        let seed = rules::object_seed(self.seed, SPAWN_SEED_OFFSET, self.spawned);
        self.spawned += 1;

        Some(ProceduralObject {
            id,
            kind,
            sub_type: appearance.sub_type,
            position,
            scale: appearance.scale,
            rotation: rules::rotation(&mut self.rng),
            metadata,
            seed,
        })
    }

    /// Kind weighted by the biome's densities.
    fn pick_kind(&mut self) -> ObjectKind {
        let d = self.biome.densities;
        let weights = [d.tree.max(0.0), d.rock.max(0.0), d.strange.max(0.0)];
        let total: f32 = weights.iter().sum();
        if !total.is_finite() || total <= 0.0 {
            return ObjectKind::Tree;
        }
        let mut pick = self.rng.random_range(0.0..total);
        for (kind, w) in ObjectKind::ALL.into_iter().zip(weights) {
            pick -= w;
            if pick < 0.0 {
                return kind;
            }
        }
        ObjectKind::Tree
    }
}
