//! Gloam - procedural world generation and evolution

pub mod core;
pub mod noise_field;
pub mod terrain;
pub mod carving;
pub mod population;
pub mod atmosphere;
pub mod scene;
