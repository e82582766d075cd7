//! Final smoothing pass over carved terrain.

use crate::terrain::HeightMap;

/// Weight of the neighbourhood average in each pass.
const SMOOTH_BLEND: f32 = 0.3;

/// Run `passes` rounds of 3x3 box smoothing over interior cells, blending
/// 30 % average into 70 % original. Border cells keep their elevation.
pub fn smooth_terrain(map: &mut HeightMap, passes: u32) {
    let (w, h) = map.dimensions();
    if passes == 0 || w < 3 || h < 3 {
        return;
    }

    for _ in 0..passes {
        let src = map.elevations().clone();
        let mut dst = src.clone();
        for z in 1..h - 1 {
            for x in 1..w - 1 {
                let mut sum = 0.0;
                for nz in z - 1..=z + 1 {
                    for nx in x - 1..=x + 1 {
                        sum += src[(nx, nz)];
                    }
                }
                let avg = sum / 9.0;
                dst[(x, z)] = src[(x, z)] * (1.0 - SMOOTH_BLEND) + avg * SMOOTH_BLEND;
            }
        }
        map.replace_elevations(dst);
    }
}
