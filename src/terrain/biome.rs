//! Biome configuration: terrain shape, materials, population density and
//! mood baselines for each named biome.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::material::Material;
use crate::core::{Error, Result, WeightMap};

/// How a biome shapes raw noise elevation and which carving passes it gets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainStyle {
    #[default]
    Forest,
    Swamp,
    Mountains,
    Clearing,
}

/// Objects per 1000 grid cells, per category.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectDensities {
    pub tree: f32,
    pub rock: f32,
    pub strange: f32,
}

impl Default for ObjectDensities {
    fn default() -> Self {
        Self { tree: 40.0, rock: 12.0, strange: 2.0 }
    }
}

/// Parameters for one named biome. Treated as immutable once registered.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiomeParams {
    pub name: String,
    pub terrain_style: TerrainStyle,
    /// Elevation the raw noise is centred on.
    pub base_elevation: f32,
    /// Multiplier on raw noise amplitude.
    pub roughness: f32,
    pub densities: ObjectDensities,
    /// Tree sub-types this biome may place.
    pub tree_kinds: Vec<String>,
    /// Rock sub-types this biome may place.
    pub rock_kinds: Vec<String>,
    /// Materials the material roulette may pick from.
    pub materials: Vec<Material>,
    /// Starting fear level, `[0.1, 1.0]`.
    pub fear_level: f32,
    /// Baseline weather weights (`fog`, `wind`, ...).
    pub weather: WeightMap,
    /// Baseline atmosphere weights.
    pub atmosphere: WeightMap,
}

impl Default for BiomeParams {
    fn default() -> Self {
        Self::dark_forest()
    }
}

fn kinds(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

impl BiomeParams {
    pub fn dark_forest() -> Self {
        Self {
            name: "dark_forest".to_string(),
            terrain_style: TerrainStyle::Forest,
            base_elevation: 0.5,
            roughness: 0.8,
            densities: ObjectDensities { tree: 40.0, rock: 12.0, strange: 2.0 },
            tree_kinds: kinds(&["pine", "oak", "birch", "dead"]),
            rock_kinds: kinds(&["boulder", "slab", "mossy_stone"]),
            materials: vec![Material::Water, Material::Moss, Material::Dirt, Material::Rock, Material::Snow],
            fear_level: 0.5,
            weather: [("fog", 0.6), ("wind", 0.3), ("rain", 0.2)].into_iter().collect(),
            atmosphere: [("atmosphere.dread", 0.6), ("atmosphere.calm", 0.2)].into_iter().collect(),
        }
    }

    pub fn swamp() -> Self {
        Self {
            name: "swamp".to_string(),
            terrain_style: TerrainStyle::Swamp,
            base_elevation: 0.35,
            roughness: 0.5,
            densities: ObjectDensities { tree: 25.0, rock: 6.0, strange: 3.0 },
            tree_kinds: kinds(&["willow", "cypress", "dead"]),
            rock_kinds: kinds(&["mossy_stone", "slab"]),
            materials: vec![Material::Water, Material::Moss, Material::Dirt],
            fear_level: 0.6,
            weather: [("fog", 0.8), ("wind", 0.1), ("rain", 0.4)].into_iter().collect(),
            atmosphere: [("atmosphere.dread", 0.7), ("atmosphere.decay", 0.5)].into_iter().collect(),
        }
    }

    pub fn mountains() -> Self {
        Self {
            name: "mountains".to_string(),
            terrain_style: TerrainStyle::Mountains,
            base_elevation: 0.6,
            roughness: 1.2,
            densities: ObjectDensities { tree: 10.0, rock: 30.0, strange: 1.0 },
            tree_kinds: kinds(&["pine", "fir"]),
            rock_kinds: kinds(&["boulder", "crag", "scree"]),
            materials: vec![Material::Water, Material::Dirt, Material::Rock, Material::Snow],
            fear_level: 0.3,
            weather: [("fog", 0.3), ("wind", 0.7), ("snow", 0.3)].into_iter().collect(),
            atmosphere: [("atmosphere.dread", 0.3), ("atmosphere.awe", 0.6)].into_iter().collect(),
        }
    }

    pub fn clearing() -> Self {
        Self {
            name: "clearing".to_string(),
            terrain_style: TerrainStyle::Clearing,
            base_elevation: 0.45,
            roughness: 0.4,
            densities: ObjectDensities { tree: 15.0, rock: 5.0, strange: 1.0 },
            tree_kinds: kinds(&["oak", "birch"]),
            rock_kinds: kinds(&["pebble", "boulder"]),
            materials: vec![Material::Water, Material::Moss, Material::Dirt, Material::Rock],
            fear_level: 0.2,
            weather: [("fog", 0.2), ("wind", 0.4)].into_iter().collect(),
            atmosphere: [("atmosphere.dread", 0.2), ("atmosphere.calm", 0.7)].into_iter().collect(),
        }
    }
}

/// Named biome lookup.
#[derive(Clone, Debug)]
pub struct BiomeRegistry {
    biomes: HashMap<String, BiomeParams>,
}

impl BiomeRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self { biomes: HashMap::new() }
    }

    /// Registry holding the built-in biomes.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for params in [
            BiomeParams::dark_forest(),
            BiomeParams::swamp(),
            BiomeParams::mountains(),
            BiomeParams::clearing(),
        ] {
            registry.insert(params);
        }
        registry
    }

    /// Register a biome under its own name, replacing any previous entry.
    pub fn insert(&mut self, params: BiomeParams) {
        self.biomes.insert(params.name.clone(), params);
    }

    pub fn get(&self, name: &str) -> Result<&BiomeParams> {
        self.biomes
            .get(name)
            .ok_or_else(|| Error::UnknownBiome(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.biomes.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.biomes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.biomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.biomes.is_empty()
    }
}

impl Default for BiomeRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
