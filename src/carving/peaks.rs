//! Mountain peak raising.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::terrain::{HeightMap, Material, Region};

/// Cells must already sit above this to seed a peak.
pub const PEAK_CANDIDATE_ELEVATION: f32 = 0.7;
const PEAK_BOOST: f32 = 0.25;

/// Raise up to `count` peaks on high ground. Returns how many were raised.
///
/// Candidates are every cell above [`PEAK_CANDIDATE_ELEVATION`], shuffled
/// and taken from the front; flat low maps get none.
pub fn raise_peaks<R: Rng + ?Sized>(
    map: &mut HeightMap,
    count: usize,
    radius: f32,
    rng: &mut R,
) -> usize {
    if count == 0 || radius <= 0.0 {
        return 0;
    }

    let mut candidates: Vec<(usize, usize)> = Vec::new();
    for z in 0..map.height() {
        for x in 0..map.width() {
            if map.elevation(x, z).is_some_and(|e| e > PEAK_CANDIDATE_ELEVATION) {
                candidates.push((x, z));
            }
        }
    }
    if candidates.is_empty() {
        log::debug!("No peak candidates above {}", PEAK_CANDIDATE_ELEVATION);
        return 0;
    }
    candidates.shuffle(rng);

    let reach = radius.ceil() as i64;
    let sigma2 = 2.0 * radius * radius * 0.5;
    let raised = count.min(candidates.len());

    for &(px, pz) in candidates.iter().take(raised) {
        for dz in -reach..=reach {
            for dx in -reach..=reach {
                let x = px as i64 + dx;
                let z = pz as i64 + dz;
                if x < 0 || z < 0 {
                    continue;
                }
                let (x, z) = (x as usize, z as usize);
                let Some(e) = map.elevation(x, z) else {
                    continue;
                };
                let d2 = (dx * dx + dz * dz) as f32;
                if d2 > radius * radius {
                    continue;
                }

                let falloff = (-d2 / sigma2).exp();
                map.set_elevation(x, z, e + PEAK_BOOST * falloff);

                if d2.sqrt() < radius * 0.4 {
                    map.set_region(x, z, Region::MountainPeak);
                }
                let boosted = map.elevation(x, z).unwrap_or(e);
                if boosted > 0.8 {
                    map.set_material(x, z, Material::Snow);
                } else if falloff > 0.1 {
                    map.set_material(x, z, Material::Rock);
                }
            }
        }
    }

    log::debug!("Raised {} of {} requested peaks ({} candidates)", raised, count, candidates.len());
    raised
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::heightmap::MAX_ELEVATION;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn map_with_high_spot() -> HeightMap {
        let mut map = HeightMap::new(30, 30, 1.0, 10.0);
        for z in 0..30 {
            for x in 0..30 {
                map.set_elevation(x, z, 0.5);
                map.set_region(x, z, Region::Highland);
            }
        }
        map.set_elevation(15, 15, 0.75);
        map
    }

    #[test]
    fn test_peak_raises_around_candidate() {
        let mut map = map_with_high_spot();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let raised = raise_peaks(&mut map, 3, 5.0, &mut rng);

        assert_eq!(raised, 1, "only one candidate exists");
        let top = map.elevation(15, 15).unwrap();
        assert!((top - 0.99_f32.min(0.75 + PEAK_BOOST)).abs() < 1e-5, "top {top}");
        assert_eq!(map.region(15, 15), Some(Region::MountainPeak));
        assert_eq!(map.material(15, 15), Some(Material::Snow));

        let shoulder = map.elevation(18, 15).unwrap();
        assert!(shoulder > 0.5 && shoulder < top);
        assert_eq!(map.elevation(0, 0), Some(0.5));
    }

    #[test]
    fn test_no_candidates_is_noop() {
        let mut map = HeightMap::new(10, 10, 1.0, 10.0);
        let before = map.clone();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(raise_peaks(&mut map, 4, 3.0, &mut rng), 0);
        assert_eq!(map, before);
    }

    #[test]
    fn test_peaks_stay_clamped() {
        let mut map = HeightMap::new(12, 12, 1.0, 10.0);
        for z in 0..12 {
            for x in 0..12 {
                map.set_elevation(x, z, 0.95);
            }
        }
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        raise_peaks(&mut map, 10, 4.0, &mut rng);
        assert!(map.elevations().iter().all(|&e| e <= MAX_ELEVATION));
    }
}
