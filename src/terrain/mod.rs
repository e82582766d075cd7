//! Procedural terrain: grid storage, the height map and its synthesizer

pub mod grid;
pub use grid::Grid;

pub mod material;
pub use material::Material;

pub mod region;
pub use region::Region;

pub mod heightmap;
pub use heightmap::HeightMap;

pub mod biome;
pub use biome::{BiomeParams, BiomeRegistry, ObjectDensities, TerrainStyle};

pub mod generator;
pub use generator::TerrainSynthesizer;
