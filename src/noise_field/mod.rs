//! Seeded deterministic noise primitives.
//!
//! [`NoiseField`] bundles the seed with the gradient, simplex, ridge,
//! cellular and fractal generators. Given the same seed and coordinates every
//! function returns a bit-identical result; there is no state beyond the seed
//! (and the simplex permutation table derived from it).

pub mod cellular;
pub mod fractal;
pub mod hash;
pub mod perlin;

use noise::{NoiseFn, Simplex};

pub use cellular::cellular_2d;
pub use fractal::{fbm_2d, ridge_2d};
pub use perlin::{perlin_1d, perlin_2d, perlin_3d};

/// Channel stride used by [`NoiseField::channel`]; a large odd constant keeps
/// derived seeds far apart.
const CHANNEL_STRIDE: u32 = 0x2545_F491;

/// A seeded noise source.
#[derive(Clone, Debug)]
pub struct NoiseField {
    seed: u32,
    simplex: Simplex,
}

impl NoiseField {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            simplex: Simplex::new(seed),
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Derive an independent field for a named purpose (elevation band,
    /// humidity, rivers, ...).
    pub fn channel(&self, index: u32) -> Self {
        Self::new(self.seed.wrapping_add(index.wrapping_mul(CHANNEL_STRIDE)))
    }

    #[inline]
    pub fn perlin_1d(&self, x: f32) -> f32 {
        perlin_1d(x, self.seed)
    }

    #[inline]
    pub fn perlin_2d(&self, x: f32, y: f32) -> f32 {
        perlin_2d(x, y, self.seed)
    }

    #[inline]
    pub fn perlin_3d(&self, x: f32, y: f32, z: f32) -> f32 {
        perlin_3d(x, y, z, self.seed)
    }

    /// Simplex noise in `[-1, 1]`.
    pub fn simplex_2d(&self, x: f32, y: f32) -> f32 {
        (self.simplex.get([x as f64, y as f64]) as f32).clamp(-1.0, 1.0)
    }

    #[inline]
    pub fn ridge_2d(&self, x: f32, y: f32) -> f32 {
        ridge_2d(x, y, self.seed)
    }

    #[inline]
    pub fn cellular_2d(&self, x: f32, y: f32) -> f32 {
        cellular_2d(x, y, self.seed)
    }

    #[inline]
    pub fn fbm_2d(&self, x: f32, y: f32, octaves: u32, lacunarity: f32, gain: f32) -> f32 {
        fbm_2d(x, y, octaves, lacunarity, gain, self.seed)
    }

    /// Perlin remapped from `[-1, 1]` to `[0, 1]`.
    #[inline]
    pub fn unit_2d(&self, x: f32, y: f32) -> f32 {
        (self.perlin_2d(x, y) + 1.0) * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism_across_instances() {
        let a = NoiseField::new(42);
        let b = NoiseField::new(42);
        for i in 0..100 {
            let x = i as f32 * 0.731 + 0.05;
            let y = i as f32 * 0.419 - 3.3;
            assert_eq!(a.perlin_2d(x, y).to_bits(), b.perlin_2d(x, y).to_bits());
            assert_eq!(a.simplex_2d(x, y).to_bits(), b.simplex_2d(x, y).to_bits());
            assert_eq!(a.cellular_2d(x, y).to_bits(), b.cellular_2d(x, y).to_bits());
            assert_eq!(
                a.fbm_2d(x, y, 4, 2.0, 0.5).to_bits(),
                b.fbm_2d(x, y, 4, 2.0, 0.5).to_bits()
            );
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = NoiseField::new(1);
        let b = NoiseField::new(2);
        let differs = (0..20).any(|i| {
            let x = i as f32 * 0.37 + 0.1;
            a.perlin_2d(x, 0.5) != b.perlin_2d(x, 0.5)
        });
        assert!(differs);
    }

    #[test]
    fn test_channels_are_independent() {
        let base = NoiseField::new(7);
        assert_ne!(base.channel(1).seed(), base.channel(2).seed());
        assert_eq!(base.channel(0).seed(), base.seed());
    }

    #[test]
    fn test_continuity() {
        let field = NoiseField::new(99);
        let points = [(0.31, 0.77), (4.52, -1.18), (-7.09, 3.33), (12.4, 0.61)];
        for (x, y) in points {
            let eps = 1e-4;
            let d1 = (field.perlin_1d(x + eps) - field.perlin_1d(x)).abs();
            let d2 = (field.perlin_2d(x + eps, y) - field.perlin_2d(x, y)).abs();
            let d3 = (field.perlin_3d(x + eps, y, 0.5) - field.perlin_3d(x, y, 0.5)).abs();
            let ds = (field.simplex_2d(x + eps, y) - field.simplex_2d(x, y)).abs();
            let df = (field.fbm_2d(x + eps, y, 4, 2.0, 0.5) - field.fbm_2d(x, y, 4, 2.0, 0.5)).abs();
            for d in [d1, d2, d3, ds, df] {
                assert!(d < 1e-2, "discontinuity {} at ({}, {})", d, x, y);
            }
        }
    }

    #[test]
    fn test_simplex_range() {
        let field = NoiseField::new(3);
        for i in 0..200 {
            let v = field.simplex_2d(i as f32 * 0.19, i as f32 * 0.23);
            assert!((-1.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_unit_range() {
        let field = NoiseField::new(3);
        for i in 0..200 {
            let v = field.unit_2d(i as f32 * 0.19, i as f32 * 0.23);
            assert!((0.0..=1.0).contains(&v));
        }
    }
}
