//! Edge-to-edge footpaths found by a greedy walk.
//!
//! The walk is not a shortest-path search: each step takes the cheapest
//! unvisited neighbour by distance-to-goal plus a climb penalty, with an
//! occasional random detour. If it boxes itself in the path ends where it is.

use std::collections::HashSet;

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::terrain::{HeightMap, Material, Region};

/// Cost per unit of elevation change between neighbouring cells.
const CLIMB_PENALTY: f32 = 10.0;
/// Chance of an extra random step after each greedy one.
const WANDER_CHANCE: f64 = 0.2;
/// Corridor half-width in cells.
const CORRIDOR_WIDTH: f32 = 2.0;

/// Pick a start on a random edge and a goal on the opposite edge.
fn pick_endpoints<R: Rng + ?Sized>(w: usize, h: usize, rng: &mut R) -> ((usize, usize), (usize, usize)) {
    match rng.random_range(0..4) {
        0 => ((0, rng.random_range(0..h)), (w - 1, rng.random_range(0..h))),
        1 => ((w - 1, rng.random_range(0..h)), (0, rng.random_range(0..h))),
        2 => ((rng.random_range(0..w), 0), (rng.random_range(0..w), h - 1)),
        _ => ((rng.random_range(0..w), h - 1), (rng.random_range(0..w), 0)),
    }
}

fn unvisited_neighbours(
    map: &HeightMap,
    (x, z): (usize, usize),
    visited: &HashSet<(usize, usize)>,
) -> Vec<(usize, usize)> {
    let (w, h) = map.dimensions();
    let mut out = Vec::with_capacity(4);
    if x > 0 {
        out.push((x - 1, z));
    }
    if x + 1 < w {
        out.push((x + 1, z));
    }
    if z > 0 {
        out.push((x, z - 1));
    }
    if z + 1 < h {
        out.push((x, z + 1));
    }
    out.retain(|c| !visited.contains(c));
    out
}

/// Walk from `start` toward `goal`. Returns the visited cells in order.
pub fn trace_path<R: Rng + ?Sized>(
    map: &HeightMap,
    start: (usize, usize),
    goal: (usize, usize),
    rng: &mut R,
) -> Vec<(usize, usize)> {
    if map.elevation(start.0, start.1).is_none() {
        return Vec::new();
    }
    let cap = (map.width() * map.height() / 10).max(1);
    let mut visited = HashSet::from([start]);
    let mut path = vec![start];
    let mut current = start;

    let cost = |from: (usize, usize), to: (usize, usize)| {
        let dx = to.0 as f32 - goal.0 as f32;
        let dz = to.1 as f32 - goal.1 as f32;
        let climb = (map.elevation(to.0, to.1).unwrap_or(0.0)
            - map.elevation(from.0, from.1).unwrap_or(0.0))
        .abs();
        (dx * dx + dz * dz).sqrt() + CLIMB_PENALTY * climb
    };

    while current != goal && path.len() < cap {
        let options = unvisited_neighbours(map, current, &visited);
        let Some(&next) = options
            .iter()
            .min_by(|a, b| cost(current, **a).total_cmp(&cost(current, **b)))
        else {
            log::debug!("Path boxed in after {} cells; truncating", path.len());
            break;
        };
        visited.insert(next);
        path.push(next);
        current = next;

        if current != goal && path.len() < cap && rng.random_bool(WANDER_CHANCE) {
            let options = unvisited_neighbours(map, current, &visited);
            if let Some(&detour) = options.choose(rng) {
                visited.insert(detour);
                path.push(detour);
                current = detour;
            }
        }
    }
    path
}

/// Trace a path across the map and cut its corridor. Returns the cells the
/// path runs through.
pub fn carve_path<R: Rng + ?Sized>(map: &mut HeightMap, rng: &mut R) -> Vec<(usize, usize)> {
    if map.is_empty() {
        return Vec::new();
    }
    let (w, h) = map.dimensions();
    let (start, goal) = pick_endpoints(w, h, rng);
    let path = trace_path(map, start, goal, rng);

    let original = map.elevations().clone();
    let reach = CORRIDOR_WIDTH.ceil() as i64;
    for &(px, pz) in &path {
        for dz in -reach..=reach {
            for dx in -reach..=reach {
                let (x, z) = (px as i64 + dx, pz as i64 + dz);
                if x < 0 || z < 0 {
                    continue;
                }
                let (x, z) = (x as usize, z as usize);
                let (Some(cur), Some(&orig)) = (map.elevation(x, z), original.get(x, z)) else {
                    continue;
                };
                let d = ((dx * dx + dz * dz) as f32).sqrt();
                if d > CORRIDOR_WIDTH {
                    continue;
                }
                map.set_elevation(x, z, cur.min(orig * (0.95 + 0.05 * d / CORRIDOR_WIDTH)));
            }
        }
        map.set_region(px, pz, Region::Path);
        map.set_material(px, pz, Material::Dirt);
    }

    log::debug!(
        "Carved path {:?} -> {:?}: {} cells, reached goal: {}",
        start,
        goal,
        path.len(),
        path.last() == Some(&goal)
    );
    path
}
