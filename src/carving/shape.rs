//! Per-biome shaping of raw noise elevation, including river channels.

use crate::terrain::TerrainStyle;

/// Half-width of the river band in secondary-noise units.
pub const RIVER_THRESHOLD: f32 = 0.04;

/// Noise samples the shaping function needs at one cell.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShapeSample {
    /// Ridge noise in `[0, 1]`.
    pub ridge: f32,
    /// Primary river noise; rivers only run where it is positive.
    pub river_primary: f32,
    /// Low-frequency river noise; the channel follows its zero crossing.
    pub river_secondary: f32,
}

/// Shaped elevation plus whether a river was cut through the cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shaped {
    pub elevation: f32,
    pub river: bool,
}

/// Apply the biome's terrain shape to `elevation`. The result is not
/// clamped; callers clamp once after shaping.
pub fn shape_elevation(style: TerrainStyle, elevation: f32, sample: &ShapeSample) -> Shaped {
    let mut e = match style {
        TerrainStyle::Mountains => elevation * 0.6 + sample.ridge * 0.5,
        TerrainStyle::Swamp => 0.3 + (elevation - 0.3) * 0.4,
        TerrainStyle::Clearing => 0.45 + (elevation - 0.45) * 0.5,
        TerrainStyle::Forest => elevation,
    };

    let band = sample.river_secondary.abs();
    let river = band < RIVER_THRESHOLD && sample.river_primary > 0.0;
    if river {
        // Deepest at the zero crossing, fading to untouched at the band edge
        e *= 0.5 + 0.5 * (band / RIVER_THRESHOLD);
    }

    Shaped { elevation: e, river }
}
