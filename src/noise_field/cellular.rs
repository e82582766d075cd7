//! Cellular (Worley) noise.

use super::hash::{hash_2d, hash_to_unit};

/// Decorrelates the second feature-point coordinate from the first.
const FEATURE_Y_SALT: u32 = 0x9E37_79B9;

/// Distance from `(x, y)` to the nearest per-cell feature point.
///
/// Every integer cell owns one pseudo-random feature point; only the 3x3
/// neighbourhood around the sample can contain the nearest one.
pub fn cellular_2d(x: f32, y: f32, seed: u32) -> f32 {
    let cx = x.floor() as i32;
    let cy = y.floor() as i32;

    let mut best = f32::MAX;
    for dy in -1..=1 {
        for dx in -1..=1 {
            let gx = cx.wrapping_add(dx);
            let gy = cy.wrapping_add(dy);
            let px = gx as f32 + hash_to_unit(hash_2d(gx, gy, seed));
            let py = gy as f32 + hash_to_unit(hash_2d(gx, gy, seed ^ FEATURE_Y_SALT));
            let d = ((x - px).powi(2) + (y - py).powi(2)).sqrt();
            best = best.min(d);
        }
    }
    best
}
