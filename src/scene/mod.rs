//! The live scene: generated terrain, placed objects and global mood state,
//! plus the manager that owns and evolves it.

pub mod config;
pub mod evolver;
pub mod manager;

pub use config::SceneConfig;
pub use evolver::{EvolutionConfig, SceneEvolver};
pub use manager::{SceneManager, SceneView, WorldPhase, TERRAIN_HEIGHT_SENTINEL, UNKNOWN_BIOME};

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::atmosphere::MIN_FEAR;
use crate::core::WeightMap;
use crate::population::{ObjectKind, ProceduralObject};
use crate::terrain::HeightMap;

/// Shared, separately locked height map. Terrain is read far more often than
/// the rest of the scene changes, so it does not sit behind the scene lock.
pub type TerrainHandle = Arc<RwLock<HeightMap>>;

/// A generated world and its evolving state.
#[derive(Clone, Debug)]
pub struct Scene {
    pub terrain: TerrainHandle,
    pub objects: Vec<ProceduralObject>,
    /// Global weather weights (`fog`, `wind`, ...).
    pub weather: WeightMap,
    /// Global atmosphere weights (`atmosphere.fear`, ...).
    pub atmosphere: WeightMap,
    /// Fraction of the day in `[0, 1)`.
    pub time_of_day: f32,
    /// Global fear in `[0.1, 1.0]`.
    pub fear_level: f32,
    pub seed: u32,
    pub biome: String,
    /// Id for the next object added to the scene.
    pub next_object_id: u64,
}

impl Scene {
    /// A scene with no terrain and no objects.
    pub fn empty() -> Self {
        Self {
            terrain: Arc::new(RwLock::new(HeightMap::empty())),
            objects: Vec::new(),
            weather: WeightMap::new(),
            atmosphere: WeightMap::new(),
            time_of_day: 0.0,
            fear_level: MIN_FEAR,
            seed: 0,
            biome: String::new(),
            next_object_id: 0,
        }
    }

    /// Read access to the terrain.
    pub fn terrain(&self) -> RwLockReadGuard<'_, HeightMap> {
        read_lock(&self.terrain)
    }

    pub fn objects_of(&self, kind: ObjectKind) -> impl Iterator<Item = &ProceduralObject> {
        self.objects.iter().filter(move |o| o.kind == kind)
    }

    pub fn object(&self, id: u64) -> Option<&ProceduralObject> {
        self.objects.iter().find(|o| o.id == id)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::empty()
    }
}

// A panicking writer leaves data that is still structurally valid, so
// poisoned locks are entered rather than propagated.

pub(crate) fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn lock_mutex<T>(lock: &Mutex<T>) -> MutexGuard<'_, T> {
    lock.lock().unwrap_or_else(PoisonError::into_inner)
}
