//! Object population: stochastic placement of trees, rocks and anomalies
//! on a carved height map.
//!
//! Each kind gets a target count from its biome density. Candidates are drawn
//! uniformly over the map and rejected when their cell is already taken this
//! pass or is water the kind cannot stand in.

pub mod object;
pub mod rules;

pub use object::{ObjectKind, ProceduralObject};

use std::collections::HashSet;
use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::terrain::{BiomeParams, HeightMap, Material};
use rules::Appearance;

/// Attempts per anomaly when hunting for a dark region.
const STRANGE_SEARCH_TRIES: usize = 10;

/// Placement outcome for one population pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PopulationStats {
    pub trees: usize,
    pub rocks: usize,
    pub strange: usize,
    /// Candidates whose cell was already occupied.
    pub rejected_occupied: usize,
    /// Candidates on water for a kind that needs dry ground.
    pub rejected_water: usize,
    /// Candidates discarded by region rules (sparse clearings).
    pub dropped: usize,
}

impl PopulationStats {
    pub fn total(&self) -> usize {
        self.trees + self.rocks + self.strange
    }
}

/// Target object count for a density (objects per 1000 cells).
pub fn target_count(density: f32, width: usize, height: usize) -> usize {
    if !density.is_finite() || density <= 0.0 {
        return 0;
    }
    (density * (width * height) as f32 / 1000.0).round() as usize
}

/// Places objects for one biome with an owned seeded RNG.
pub struct ObjectPopulator<'a> {
    biome: &'a BiomeParams,
    scene_seed: u64,
    rng: ChaCha8Rng,
    next_id: u64,
}

impl<'a> ObjectPopulator<'a> {
    /// `first_id` is the id handed to the first placed object.
    pub fn new(scene_seed: u64, biome: &'a BiomeParams, first_id: u64) -> Self {
        Self {
            biome,
            scene_seed,
            rng: ChaCha8Rng::seed_from_u64(scene_seed ^ 0x706F_7075_6C61_7465),
            next_id: first_id,
        }
    }

    /// Id the next placed object would receive.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Populate the map. Occupancy is fresh for every call.
    pub fn populate(&mut self, map: &HeightMap) -> (Vec<ProceduralObject>, PopulationStats) {
        let mut objects = Vec::new();
        let mut stats = PopulationStats::default();
        if map.is_empty() {
            return (objects, stats);
        }
        let start = Instant::now();
        let mut occupied: HashSet<(usize, usize)> = HashSet::new();
        let (w, h) = map.dimensions();

        let densities = self.biome.densities;
        let trees = target_count(densities.tree, w, h);
        let rocks = target_count(densities.rock, w, h);
        let strange = target_count(densities.strange, w, h);

        stats.trees = self.place_kind(ObjectKind::Tree, trees, map, &mut occupied, &mut objects, &mut stats);
        stats.rocks = self.place_kind(ObjectKind::Rock, rocks, map, &mut occupied, &mut objects, &mut stats);
        stats.strange = self.place_strange(strange, map, &mut occupied, &mut objects, &mut stats);

        log::info!(
            "Populated '{}': {} trees, {} rocks, {} strange in {:.1}ms",
            self.biome.name,
            stats.trees,
            stats.rocks,
            stats.strange,
            start.elapsed().as_secs_f64() * 1000.0
        );
        log::debug!(
            "Population rejections: {} occupied, {} water, {} dropped",
            stats.rejected_occupied,
            stats.rejected_water,
            stats.dropped
        );
        (objects, stats)
    }

    fn place_kind(
        &mut self,
        kind: ObjectKind,
        target: usize,
        map: &HeightMap,
        occupied: &mut HashSet<(usize, usize)>,
        objects: &mut Vec<ProceduralObject>,
        stats: &mut PopulationStats,
    ) -> usize {
        let offset = match kind {
            ObjectKind::Tree => rules::TREE_SEED_OFFSET,
            ObjectKind::Rock => rules::ROCK_SEED_OFFSET,
            ObjectKind::Strange => rules::STRANGE_SEED_OFFSET,
        };
        let mut placed = 0;

        for _ in 0..target * 2 {
            if placed >= target {
                break;
            }
            let Some(cell) = random_cell(map, &mut self.rng) else {
                break;
            };
            if occupied.contains(&cell) {
                stats.rejected_occupied += 1;
                continue;
            }
            if !kind.tolerates_water() && map.material(cell.0, cell.1) == Some(Material::Water) {
                stats.rejected_water += 1;
                continue;
            }

            let region = map.region(cell.0, cell.1);
            let appearance = match kind {
                ObjectKind::Tree => rules::tree_appearance(region, self.biome, &mut self.rng),
                ObjectKind::Rock => Some(rules::rock_appearance(
                    region,
                    map.slope_at(cell.0, cell.1),
                    self.biome,
                    &mut self.rng,
                )),
                ObjectKind::Strange => Some(rules::strange_appearance(&mut self.rng)),
            };
            let Some(appearance) = appearance else {
                stats.dropped += 1;
                continue;
            };

            let seed = rules::object_seed(self.scene_seed, offset, placed as u64);
            if let Some(obj) = self.build(kind, appearance, cell, map, seed) {
                occupied.insert(cell);
                objects.push(obj);
                placed += 1;
            }
        }

        if placed < target {
            log::debug!("Placed {}/{} {} objects", placed, target, kind);
        }
        placed
    }

    /// Anomalies search a few cells for a dark region and settle for the
    /// last free cell they saw otherwise.
    fn place_strange(
        &mut self,
        target: usize,
        map: &HeightMap,
        occupied: &mut HashSet<(usize, usize)>,
        objects: &mut Vec<ProceduralObject>,
        stats: &mut PopulationStats,
    ) -> usize {
        let mut placed = 0;

        for _ in 0..target * 2 {
            if placed >= target {
                break;
            }
            let mut chosen = None;
            for _ in 0..STRANGE_SEARCH_TRIES {
                let Some(cell) = random_cell(map, &mut self.rng) else {
                    break;
                };
                if occupied.contains(&cell) {
                    stats.rejected_occupied += 1;
                    continue;
                }
                chosen = Some(cell);
                if map.region(cell.0, cell.1).is_some_and(|r| r.is_dark()) {
                    break;
                }
            }
            let Some(cell) = chosen else {
                continue;
            };

            let appearance = rules::strange_appearance(&mut self.rng);
            let seed = rules::object_seed(self.scene_seed, rules::STRANGE_SEED_OFFSET, placed as u64);
            if let Some(obj) = self.build(ObjectKind::Strange, appearance, cell, map, seed) {
                occupied.insert(cell);
                objects.push(obj);
                placed += 1;
            }
        }
        placed
    }

    fn build(
        &mut self,
        kind: ObjectKind,
        appearance: Appearance,
        cell: (usize, usize),
        map: &HeightMap,
        seed: u64,
    ) -> Option<ProceduralObject> {
        let position = map.grid_to_world(cell.0, cell.1)?;
        let region = map.region(cell.0, cell.1);
        let metadata = rules::object_metadata(kind, &appearance.sub_type, region, &mut self.rng);
        let id = self.next_id;
        self.next_id += 1;
        Some(ProceduralObject {
            id,
            kind,
            sub_type: appearance.sub_type,
            position,
            scale: appearance.scale,
            rotation: rules::rotation(&mut self.rng),
            metadata,
            seed,
        })
    }
}

/// Cell under a uniformly drawn world position.
pub fn random_cell<R: Rng + ?Sized>(map: &HeightMap, rng: &mut R) -> Option<(usize, usize)> {
    if map.is_empty() {
        return None;
    }
    let span_x = (map.width() - 1) as f32 * map.cell_size();
    let span_z = (map.height() - 1) as f32 * map.cell_size();
    let x = if span_x > 0.0 { rng.random_range(0.0..=span_x) } else { 0.0 };
    let z = if span_z > 0.0 { rng.random_range(0.0..=span_z) } else { 0.0 };
    map.cell_at_world(x, z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carving::{CarvingConfig, FeatureCarver};
    use crate::terrain::{ObjectDensities, Region, TerrainSynthesizer};

    fn world(biome: &BiomeParams, seed: u32) -> HeightMap {
        let mut map = TerrainSynthesizer::new(seed, biome, 1.0, 20.0).synthesize(64, 64);
        FeatureCarver::new(seed as u64, CarvingConfig::default()).carve(&mut map, biome.terrain_style);
        map
    }

    #[test]
    fn test_target_count() {
        assert_eq!(target_count(40.0, 64, 64), 164);
        assert_eq!(target_count(0.0, 64, 64), 0);
        assert_eq!(target_count(-3.0, 64, 64), 0);
        assert_eq!(target_count(f32::NAN, 64, 64), 0);
    }

    #[test]
    fn test_occupancy_one_object_per_cell() {
        let biome = BiomeParams::dark_forest();
        let map = world(&biome, 42);
        let (objects, _) = ObjectPopulator::new(42, &biome, 0).populate(&map);

        let mut cells = HashSet::new();
        for obj in &objects {
            let cell = map.cell_at_world(obj.position.x, obj.position.z).unwrap();
            assert!(cells.insert(cell), "two objects share cell {cell:?}");
        }
    }

    #[test]
    fn test_counts_and_ids() {
        let biome = BiomeParams::dark_forest();
        let map = world(&biome, 42);
        let (objects, stats) = ObjectPopulator::new(42, &biome, 100).populate(&map);

        assert!(stats.trees > 0 && stats.rocks > 0);
        assert!(stats.trees <= target_count(biome.densities.tree, 64, 64));
        assert!(stats.rocks <= target_count(biome.densities.rock, 64, 64));
        assert_eq!(stats.total(), objects.len());
        for (i, obj) in objects.iter().enumerate() {
            assert_eq!(obj.id, 100 + i as u64, "ids must increase by one");
        }
    }

    #[test]
    fn test_only_strange_on_water() {
        let biome = BiomeParams::swamp();
        let map = world(&biome, 3);
        let (objects, _) = ObjectPopulator::new(3, &biome, 0).populate(&map);
        for obj in &objects {
            let (x, z) = map.cell_at_world(obj.position.x, obj.position.z).unwrap();
            if map.material(x, z) == Some(Material::Water) {
                assert_eq!(obj.kind, ObjectKind::Strange, "{} placed on water", obj.kind);
            }
        }
    }

    #[test]
    fn test_objects_sit_on_terrain() {
        let biome = BiomeParams::mountains();
        let map = world(&biome, 8);
        let (objects, _) = ObjectPopulator::new(8, &biome, 0).populate(&map);
        for obj in &objects {
            let ground = map.height_at_world(obj.position.x, obj.position.z).unwrap();
            assert!((obj.position.y - ground).abs() < 1e-3, "{} floats: {} vs {}", obj.id, obj.position.y, ground);
        }
    }

    #[test]
    fn test_swamp_trees_dead() {
        let biome = BiomeParams::swamp();
        let map = world(&biome, 5);
        let (objects, _) = ObjectPopulator::new(5, &biome, 0).populate(&map);
        for obj in objects.iter().filter(|o| o.kind == ObjectKind::Tree) {
            let (x, z) = map.cell_at_world(obj.position.x, obj.position.z).unwrap();
            if matches!(map.region(x, z), Some(Region::Swamp | Region::SwampPit)) {
                assert_eq!(obj.sub_type, "dead");
            }
        }
    }

    #[test]
    fn test_seeds_use_category_offsets() {
        let biome = BiomeParams::dark_forest();
        let map = world(&biome, 42);
        let (objects, _) = ObjectPopulator::new(1000, &biome, 0).populate(&map);

        let first_tree = objects.iter().find(|o| o.kind == ObjectKind::Tree).unwrap();
        assert_eq!(first_tree.seed, 1000);
        let first_rock = objects.iter().find(|o| o.kind == ObjectKind::Rock).unwrap();
        assert_eq!(first_rock.seed, 1000 + rules::ROCK_SEED_OFFSET);
    }

    #[test]
    fn test_seeds_unique_past_ten_thousand_per_kind() {
        let biome = BiomeParams {
            densities: ObjectDensities { tree: 1000.0, rock: 300.0, strange: 20.0 },
            ..BiomeParams::dark_forest()
        };
        let map = HeightMap::new(128, 128, 1.0, 20.0);
        let (objects, stats) = ObjectPopulator::new(42, &biome, 0).populate(&map);
        assert!(stats.trees > 10_000, "only {} trees", stats.trees);
        assert!(stats.rocks > 0);

        let mut seeds = HashSet::new();
        for obj in &objects {
            assert!(seeds.insert(obj.seed), "{} {} reuses seed {}", obj.kind, obj.id, obj.seed);
        }
    }

    #[test]
    fn test_object_seed_categories_disjoint() {
        let last_tree = rules::object_seed(7, rules::TREE_SEED_OFFSET, 4096 * 4096);
        let first_rock = rules::object_seed(7, rules::ROCK_SEED_OFFSET, 0);
        assert!(last_tree < first_rock);
        assert_eq!(rules::object_seed(7, rules::SPAWN_SEED_OFFSET, 3), 7 + rules::SPAWN_SEED_OFFSET + 3);
    }

    #[test]
    fn test_deterministic() {
        let biome = BiomeParams::dark_forest();
        let map = world(&biome, 11);
        let (a, _) = ObjectPopulator::new(11, &biome, 0).populate(&map);
        let (b, _) = ObjectPopulator::new(11, &biome, 0).populate(&map);
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_map() {
        let biome = BiomeParams::dark_forest();
        let (objects, stats) = ObjectPopulator::new(1, &biome, 0).populate(&HeightMap::empty());
        assert!(objects.is_empty());
        assert_eq!(stats, PopulationStats::default());
    }
}
