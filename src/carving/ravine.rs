//! Ravines: a wandering random walk cut into the terrain.

use std::f32::consts::TAU;

use rand::Rng;

use crate::terrain::{HeightMap, Region};

/// Maximum heading change per step, radians.
const HEADING_JITTER: f32 = 0.3;
/// Fractional depth at the centre line.
const RAVINE_DEPTH: f32 = 0.4;

/// Carve one ravine. Returns the number of steps walked.
///
/// The walk starts at a random cell and stops after `max(width, height)`
/// steps or when it leaves the grid. Depth is measured from the elevation
/// before this ravine, so overlapping steps never dig deeper than
/// `RAVINE_DEPTH`.
pub fn carve_ravine<R: Rng + ?Sized>(map: &mut HeightMap, rng: &mut R) -> usize {
    if map.is_empty() {
        return 0;
    }
    let original = map.elevations().clone();
    let (w, h) = map.dimensions();

    let mut px = rng.random_range(0.0..w as f32);
    let mut pz = rng.random_range(0.0..h as f32);
    let mut heading = rng.random_range(0.0..TAU);
    let width: f32 = rng.random_range(2.0..=3.0);
    let reach = width.ceil() as i64;
    let max_steps = w.max(h);

    let mut steps = 0;
    while steps < max_steps {
        let cx = px.round() as i64;
        let cz = pz.round() as i64;
        for dz in -reach..=reach {
            for dx in -reach..=reach {
                let (x, z) = (cx + dx, cz + dz);
                if x < 0 || z < 0 {
                    continue;
                }
                let (x, z) = (x as usize, z as usize);
                let (Some(cur), Some(&orig)) = (map.elevation(x, z), original.get(x, z)) else {
                    continue;
                };
                let d = ((x as f32 - px).powi(2) + (z as f32 - pz).powi(2)).sqrt();
                let falloff = 1.0 - d / width;
                if falloff <= 0.0 {
                    continue;
                }
                map.set_elevation(x, z, cur.min(orig * (1.0 - RAVINE_DEPTH * falloff)));
                if d < width * 0.5 {
                    map.set_region(x, z, Region::Ravine);
                }
            }
        }
        steps += 1;

        heading += rng.random_range(-HEADING_JITTER..=HEADING_JITTER);
        px += heading.cos();
        pz += heading.sin();
        if px < 0.0 || pz < 0.0 || px > (w - 1) as f32 || pz > (h - 1) as f32 {
            break;
        }
    }

    log::debug!("Carved ravine of width {:.1} over {} steps", width, steps);
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn flat(w: usize, h: usize) -> HeightMap {
        let mut map = HeightMap::new(w, h, 1.0, 10.0);
        for z in 0..h {
            for x in 0..w {
                map.set_elevation(x, z, 0.6);
                map.set_region(x, z, Region::Forest);
            }
        }
        map
    }

    #[test]
    fn test_ravine_lowers_and_labels() {
        let mut map = flat(32, 24);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let steps = carve_ravine(&mut map, &mut rng);

        assert!(steps >= 1 && steps <= 32, "steps {steps}");
        let labelled = map.regions().iter().filter(|r| **r == Some(Region::Ravine)).count();
        assert!(labelled > 0, "no ravine cells");
        for &e in map.elevations().iter() {
            assert!(e <= 0.6 + 1e-6, "ravine raised terrain to {e}");
            assert!(e >= 0.6 * (1.0 - RAVINE_DEPTH) - 1e-6, "ravine dug below its depth: {e}");
        }
    }

    #[test]
    fn test_ravine_deterministic() {
        let mut a = flat(20, 20);
        let mut b = flat(20, 20);
        carve_ravine(&mut a, &mut ChaCha8Rng::seed_from_u64(5));
        carve_ravine(&mut b, &mut ChaCha8Rng::seed_from_u64(5));
        assert_eq!(a, b);
    }

    #[test]
    fn test_ravine_on_empty_map() {
        let mut map = HeightMap::empty();
        assert_eq!(carve_ravine(&mut map, &mut ChaCha8Rng::seed_from_u64(1)), 0);
    }
}
