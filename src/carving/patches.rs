//! Circular patch features: clearings, groves, swamp pits and islands.
//!
//! Every patch blends toward its target by `t = 1 - d / r`, so the centre
//! takes the target fully and the rim is untouched.

use rand::Rng;

use crate::terrain::{HeightMap, Material, Region};

const CLEARING_ELEVATION: f32 = 0.4;
const PIT_ELEVATION: f32 = 0.15;
const ISLAND_ELEVATION: f32 = 0.45;

/// Visit every in-bounds cell within `radius` of `(cx, cz)` with its distance.
fn for_each_in_disc(
    map: &HeightMap,
    cx: f32,
    cz: f32,
    radius: f32,
    mut f: impl FnMut(usize, usize, f32),
) {
    if map.is_empty() || radius <= 0.0 || !cx.is_finite() || !cz.is_finite() {
        return;
    }
    let max_x = map.width() as i64 - 1;
    let max_z = map.height() as i64 - 1;
    let x0 = ((cx - radius).floor() as i64).max(0);
    let x1 = ((cx + radius).ceil() as i64).min(max_x);
    let z0 = ((cz - radius).floor() as i64).max(0);
    let z1 = ((cz + radius).ceil() as i64).min(max_z);

    for z in z0..=z1 {
        for x in x0..=x1 {
            let dx = x as f32 - cx;
            let dz = z as f32 - cz;
            let d = (dx * dx + dz * dz).sqrt();
            if d <= radius {
                f(x as usize, z as usize, d);
            }
        }
    }
}

/// Flatten a patch toward clearing height and lay moss in its inner 80 %.
pub fn carve_clearing(map: &mut HeightMap, cx: f32, cz: f32, radius: f32) {
    let mut cells = Vec::new();
    for_each_in_disc(map, cx, cz, radius, |x, z, d| cells.push((x, z, d)));
    for (x, z, d) in cells {
        let t = 1.0 - d / radius;
        map.blend_elevation(x, z, CLEARING_ELEVATION, t);
        if d < radius * 0.8 {
            map.set_region(x, z, Region::Clearing);
            map.set_material(x, z, Material::Moss);
        }
    }
}

/// Relabel a ragged disc as dense forest. Elevation is left alone and
/// water cells keep their label.
pub fn carve_grove<R: Rng + ?Sized>(map: &mut HeightMap, cx: f32, cz: f32, radius: f32, rng: &mut R) {
    let mut cells = Vec::new();
    for_each_in_disc(map, cx, cz, radius, |x, z, d| cells.push((x, z, d)));
    for (x, z, d) in cells {
        let jittered = radius * rng.random_range(0.8..=1.0);
        if d > jittered || map.material(x, z) == Some(Material::Water) {
            continue;
        }
        map.set_region(x, z, Region::DenseForest);
    }
}

/// Sink a waterlogged pit; open water where the pit is deepest.
pub fn carve_swamp_pit(map: &mut HeightMap, cx: f32, cz: f32, radius: f32) {
    let mut cells = Vec::new();
    for_each_in_disc(map, cx, cz, radius, |x, z, d| cells.push((x, z, d)));
    for (x, z, d) in cells {
        let t = 1.0 - d / radius;
        map.blend_elevation(x, z, PIT_ELEVATION, t);
        if let Some(h) = map.humidity(x, z) {
            map.set_humidity(x, z, h + (1.0 - h) * t);
        }
        if d < radius * 0.7 {
            map.set_region(x, z, Region::SwampPit);
            let material = if t > 0.5 { Material::Water } else { Material::Moss };
            map.set_material(x, z, material);
        }
    }
}

/// Raise a drier hummock of moss out of wet ground.
pub fn carve_island(map: &mut HeightMap, cx: f32, cz: f32, radius: f32) {
    let mut cells = Vec::new();
    for_each_in_disc(map, cx, cz, radius, |x, z, d| cells.push((x, z, d)));
    for (x, z, d) in cells {
        let t = 1.0 - d / radius;
        map.blend_elevation(x, z, ISLAND_ELEVATION, t);
        if let Some(h) = map.humidity(x, z) {
            map.set_humidity(x, z, h * (1.0 - 0.5 * t));
        }
        if d < radius * 0.6 {
            map.set_region(x, z, Region::Island);
            map.set_material(x, z, Material::Moss);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn flat(elevation: f32) -> HeightMap {
        let mut map = HeightMap::new(21, 21, 1.0, 10.0);
        for z in 0..21 {
            for x in 0..21 {
                map.set_elevation(x, z, elevation);
                map.set_region(x, z, Region::Forest);
            }
        }
        map
    }

    #[test]
    fn test_clearing_blends_toward_target() {
        let mut map = flat(0.8);
        carve_clearing(&mut map, 10.0, 10.0, 6.0);

        let centre = map.elevation(10, 10).unwrap();
        assert!((centre - CLEARING_ELEVATION).abs() < 1e-5, "centre {centre}");
        let mid = map.elevation(13, 10).unwrap();
        assert!(mid > CLEARING_ELEVATION && mid < 0.8, "mid {mid}");
        assert_eq!(map.elevation(0, 0), Some(0.8), "outside the disc is untouched");

        assert_eq!(map.region(10, 10), Some(Region::Clearing));
        assert_eq!(map.material(10, 10), Some(Material::Moss));
        // d = 5.39 > 0.8 * 6.0: rim keeps its label
        assert_eq!(map.region(15, 12), Some(Region::Forest));
    }

    #[test]
    fn test_clearing_partially_outside() {
        let mut map = flat(0.8);
        carve_clearing(&mut map, -2.0, 0.0, 5.0);
        assert_eq!(map.region(1, 0), Some(Region::Clearing));
        carve_clearing(&mut map, 100.0, 100.0, 5.0);
    }

    #[test]
    fn test_grove_skips_water() {
        let mut map = flat(0.5);
        map.set_material(10, 10, Material::Water);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        carve_grove(&mut map, 10.0, 10.0, 5.0, &mut rng);

        assert_eq!(map.region(10, 10), Some(Region::Forest));
        assert_eq!(map.region(11, 10), Some(Region::DenseForest));
        assert_eq!(map.elevation(11, 10), Some(0.5));
    }

    #[test]
    fn test_swamp_pit() {
        let mut map = flat(0.4);
        for z in 0..21 {
            for x in 0..21 {
                map.set_humidity(x, z, 0.5);
            }
        }
        carve_swamp_pit(&mut map, 10.0, 10.0, 6.0);

        assert!((map.elevation(10, 10).unwrap() - PIT_ELEVATION).abs() < 1e-5);
        assert!((map.humidity(10, 10).unwrap() - 1.0).abs() < 1e-5);
        assert_eq!(map.region(10, 10), Some(Region::SwampPit));
        assert_eq!(map.material(10, 10), Some(Material::Water));
        // d = 4, t = 1/3: inside 70 % but shallow
        assert_eq!(map.material(14, 10), Some(Material::Moss));
    }

    #[test]
    fn test_island_dries_and_raises() {
        let mut map = flat(0.2);
        for z in 0..21 {
            for x in 0..21 {
                map.set_humidity(x, z, 0.9);
            }
        }
        carve_island(&mut map, 10.0, 10.0, 5.0);

        assert!((map.elevation(10, 10).unwrap() - ISLAND_ELEVATION).abs() < 1e-5);
        assert!(map.humidity(10, 10).unwrap() < 0.9);
        assert_eq!(map.region(10, 10), Some(Region::Island));
        assert_eq!(map.material(10, 10), Some(Material::Moss));
    }
}
