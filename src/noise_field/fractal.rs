//! Noise built from other noise: fractal Brownian motion and ridges.

use super::perlin::perlin_2d;

/// Exponent applied to the folded ridge signal.
const RIDGE_SHARPNESS: i32 = 2;

/// Normalized sum of Perlin octaves at increasing frequency and decreasing
/// amplitude. Each octave hashes with its own seed offset so octaves do not
/// share lattice alignment.
pub fn fbm_2d(x: f32, y: f32, octaves: u32, lacunarity: f32, gain: f32, seed: u32) -> f32 {
    let mut total = 0.0;
    let mut norm = 0.0;
    let mut frequency = 1.0;
    let mut amplitude = 1.0;

    for octave in 0..octaves {
        total += perlin_2d(x * frequency, y * frequency, seed.wrapping_add(octave)) * amplitude;
        norm += amplitude;
        frequency *= lacunarity;
        amplitude *= gain;
    }

    if norm > 0.0 {
        (total / norm).clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Ridged noise in `[0, 1]`: `1 - |perlin|`, sharpened.
pub fn ridge_2d(x: f32, y: f32, seed: u32) -> f32 {
    (1.0 - perlin_2d(x, y, seed).abs())
        .clamp(0.0, 1.0)
        .powi(RIDGE_SHARPNESS)
}
