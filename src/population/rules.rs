//! Region-dependent placement rules and metadata ranges.

use std::f32::consts::TAU;

use rand::seq::IndexedRandom;
use rand::Rng;

use super::object::ObjectKind;
use crate::core::WeightMap;
use crate::terrain::{BiomeParams, Region};

/// Bits below a category's seed offset. Every index a category can reach
/// (grid cells, evolver spawns) fits under the stride.
pub const SEED_CATEGORY_SHIFT: u32 = 40;

pub const TREE_SEED_OFFSET: u64 = 0;
pub const ROCK_SEED_OFFSET: u64 = 1 << SEED_CATEGORY_SHIFT;
pub const STRANGE_SEED_OFFSET: u64 = 2 << SEED_CATEGORY_SHIFT;
/// Offset for objects spawned after generation by scene evolution.
pub const SPAWN_SEED_OFFSET: u64 = 3 << SEED_CATEGORY_SHIFT;

/// Seed for the `index`-th object of the category starting at `offset`.
pub fn object_seed(scene_seed: u64, offset: u64, index: u64) -> u64 {
    let index = index & ((1 << SEED_CATEGORY_SHIFT) - 1);
    scene_seed.wrapping_add(offset | index)
}

/// Metadata keys objects may carry. Evolution may inject any of these.
pub const METADATA_TAXONOMY: [&str; 8] = [
    "atmosphere.fear",
    "atmosphere.cold",
    "audio.creak",
    "audio.whisper",
    "audio.drip",
    "visual.moss",
    "visual.glow",
    "visual.fog_cling",
];

/// Anomaly sub-types.
pub const STRANGE_KINDS: [&str; 4] = ["totem", "glowing_stone", "hanging_charm", "cairn"];

/// Chance a candidate tree in open ground is dropped.
const OPEN_GROUND_DROP: f64 = 0.7;
/// Chance a dense-forest tree grows twisted.
const TWISTED_CHANCE: f64 = 0.4;

/// Sub-type and scale decided for a placement.
#[derive(Clone, Debug, PartialEq)]
pub struct Appearance {
    pub sub_type: String,
    pub scale: f32,
}

/// Tree appearance for a region, or `None` if the candidate is dropped.
pub fn tree_appearance<R: Rng + ?Sized>(
    region: Option<Region>,
    biome: &BiomeParams,
    rng: &mut R,
) -> Option<Appearance> {
    let scale = rng.random_range(0.8..1.2);
    match region {
        Some(Region::Swamp | Region::SwampPit) => Some(Appearance { sub_type: "dead".into(), scale }),
        Some(Region::DenseForest) if rng.random_bool(TWISTED_CHANCE) => {
            Some(Appearance { sub_type: "twisted".into(), scale: scale * 1.1 })
        }
        Some(Region::Clearing | Region::Path) => {
            if rng.random_bool(OPEN_GROUND_DROP) {
                return None;
            }
            let sub_type = if rng.random_bool(0.5) { "bush" } else { "sapling" };
            Some(Appearance { sub_type: sub_type.into(), scale: scale * 0.5 })
        }
        _ => Some(Appearance { sub_type: pick_kind(&biome.tree_kinds, "pine", rng), scale }),
    }
}

/// Rock appearance; larger on high broken ground and steep slopes.
pub fn rock_appearance<R: Rng + ?Sized>(
    region: Option<Region>,
    slope: f32,
    biome: &BiomeParams,
    rng: &mut R,
) -> Appearance {
    let mut scale = rng.random_range(0.5..1.0);
    if matches!(region, Some(Region::Rocky | Region::MountainPeak | Region::Highland)) {
        scale *= 1.6;
    }
    scale *= 1.0 + slope.clamp(0.0, 2.0) * 0.25;
    Appearance { sub_type: pick_kind(&biome.rock_kinds, "boulder", rng), scale }
}

pub fn strange_appearance<R: Rng + ?Sized>(rng: &mut R) -> Appearance {
    let sub_type = STRANGE_KINDS.choose(rng).copied().unwrap_or("totem");
    Appearance { sub_type: sub_type.into(), scale: rng.random_range(0.6..1.4) }
}

/// Random yaw.
pub fn rotation<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random_range(0.0..TAU)
}

/// Initial metadata weights for a new object.
pub fn object_metadata<R: Rng + ?Sized>(
    kind: ObjectKind,
    sub_type: &str,
    region: Option<Region>,
    rng: &mut R,
) -> WeightMap {
    let dark = region.is_some_and(|r| r.is_dark());
    let wet = matches!(region, Some(Region::Swamp | Region::SwampPit | Region::River | Region::Pond));
    let mut meta = WeightMap::new();

    match kind {
        ObjectKind::Tree => {
            meta.set("atmosphere.fear", if dark { rng.random_range(0.4..0.8) } else { rng.random_range(0.1..0.4) });
            meta.set(
                "audio.creak",
                if sub_type == "dead" || sub_type == "twisted" {
                    rng.random_range(0.5..0.9)
                } else {
                    rng.random_range(0.1..0.5)
                },
            );
            meta.set("visual.moss", if wet || dark { rng.random_range(0.5..0.9) } else { rng.random_range(0.1..0.5) });
        }
        ObjectKind::Rock => {
            meta.set("atmosphere.fear", rng.random_range(0.05..0.3));
            meta.set("visual.moss", if wet { rng.random_range(0.6..1.0) } else { rng.random_range(0.0..0.4) });
            if matches!(region, Some(Region::MountainPeak | Region::Rocky)) {
                meta.set("atmosphere.cold", rng.random_range(0.4..0.9));
            }
        }
        ObjectKind::Strange => {
            meta.set("atmosphere.fear", rng.random_range(0.6..1.0));
            meta.set("visual.glow", rng.random_range(0.3..1.0));
            meta.set("audio.whisper", if dark { rng.random_range(0.5..0.9) } else { rng.random_range(0.2..0.6) });
        }
    }
    meta
}

fn pick_kind<R: Rng + ?Sized>(kinds: &[String], fallback: &str, rng: &mut R) -> String {
    kinds.choose(rng).cloned().unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_swamp_trees_are_dead() {
        let biome = BiomeParams::swamp();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..50 {
            let a = tree_appearance(Some(Region::SwampPit), &biome, &mut rng).unwrap();
            assert_eq!(a.sub_type, "dead");
        }
    }

    #[test]
    fn test_dense_forest_twisted_share() {
        let biome = BiomeParams::dark_forest();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let twisted = (0..1000)
            .filter_map(|_| tree_appearance(Some(Region::DenseForest), &biome, &mut rng))
            .filter(|a| a.sub_type == "twisted")
            .count();
        assert!((300..500).contains(&twisted), "twisted {twisted}/1000");
    }

    #[test]
    fn test_clearing_trees_mostly_dropped_and_small() {
        let biome = BiomeParams::dark_forest();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let kept: Vec<_> = (0..1000)
            .filter_map(|_| tree_appearance(Some(Region::Clearing), &biome, &mut rng))
            .collect();
        assert!((200..400).contains(&kept.len()), "kept {}", kept.len());
        for a in &kept {
            assert!(a.sub_type == "bush" || a.sub_type == "sapling");
            assert!(a.scale < 0.6);
        }
    }

    #[test]
    fn test_forest_trees_use_biome_kinds() {
        let biome = BiomeParams::dark_forest();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        for _ in 0..50 {
            let a = tree_appearance(Some(Region::Forest), &biome, &mut rng).unwrap();
            assert!(biome.tree_kinds.contains(&a.sub_type), "{} not allowed", a.sub_type);
        }
    }

    #[test]
    fn test_rocks_bigger_on_peaks_and_slopes() {
        let biome = BiomeParams::mountains();
        let mean = |region, slope, seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..200).map(|_| rock_appearance(region, slope, &biome, &mut rng).scale).sum::<f32>() / 200.0
        };
        assert!(mean(Some(Region::MountainPeak), 0.0, 5) > mean(Some(Region::Forest), 0.0, 5));
        assert!(mean(Some(Region::Forest), 2.0, 6) > mean(Some(Region::Forest), 0.0, 6));
    }

    #[test]
    fn test_metadata_in_unit_range_and_namespaced() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for kind in ObjectKind::ALL {
            for region in [Some(Region::Swamp), Some(Region::Rocky), None] {
                let meta = object_metadata(kind, "dead", region, &mut rng);
                assert!(!meta.is_empty());
                for (key, w) in meta.iter() {
                    assert!(METADATA_TAXONOMY.contains(&key), "{key} outside taxonomy");
                    assert!((0.0..=1.0).contains(&w), "{key} = {w}");
                }
            }
        }
    }
}
