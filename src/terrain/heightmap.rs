//! Per-world elevation, humidity, material and region grid.

use glam::Vec3;

use super::grid::Grid;
use super::material::Material;
use super::region::Region;

/// Lowest elevation any cell may hold.
pub const MIN_ELEVATION: f32 = 0.01;
/// Highest elevation any cell may hold.
pub const MAX_ELEVATION: f32 = 0.99;

#[inline]
pub fn clamp_elevation(e: f32) -> f32 {
    if e.is_nan() {
        return MIN_ELEVATION;
    }
    e.clamp(MIN_ELEVATION, MAX_ELEVATION)
}

/// Terrain grid. All four layers share the same dimensions; elevation and
/// humidity are kept inside their domains by every setter.
///
/// Grid cell `(x, z)` sits at world position `(x * cell_size, z * cell_size)`
/// and its world height is `elevation * height_scale`.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightMap {
    elevation: Grid<f32>,
    humidity: Grid<f32>,
    material: Grid<Material>,
    region: Grid<Option<Region>>,
    cell_size: f32,
    height_scale: f32,
}

impl HeightMap {
    /// Flat map at mid elevation with no region labels.
    pub fn new(width: usize, height: usize, cell_size: f32, height_scale: f32) -> Self {
        Self {
            elevation: Grid::new(width, height, 0.5),
            humidity: Grid::new(width, height, 0.5),
            material: Grid::new(width, height, Material::Dirt),
            region: Grid::new(width, height, None),
            cell_size,
            height_scale,
        }
    }

    /// A zero-sized map; every query on it misses.
    pub fn empty() -> Self {
        Self::new(0, 0, 1.0, 1.0)
    }

    /// Assemble a map from layers, clamping values into their domains.
    /// Returns `None` if the layer dimensions disagree.
    pub fn from_layers(
        mut elevation: Grid<f32>,
        mut humidity: Grid<f32>,
        material: Grid<Material>,
        region: Grid<Option<Region>>,
        cell_size: f32,
        height_scale: f32,
    ) -> Option<Self> {
        let dims = elevation.dimensions();
        if humidity.dimensions() != dims
            || material.dimensions() != dims
            || region.dimensions() != dims
        {
            return None;
        }
        for e in elevation.as_mut_slice() {
            *e = clamp_elevation(*e);
        }
        for h in humidity.as_mut_slice() {
            *h = h.clamp(0.0, 1.0);
        }
        Some(Self { elevation, humidity, material, region, cell_size, height_scale })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.elevation.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.elevation.height()
    }

    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        self.elevation.dimensions()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elevation.is_empty()
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    #[inline]
    pub fn height_scale(&self) -> f32 {
        self.height_scale
    }

    pub fn elevations(&self) -> &Grid<f32> {
        &self.elevation
    }

    pub fn humidities(&self) -> &Grid<f32> {
        &self.humidity
    }

    pub fn materials(&self) -> &Grid<Material> {
        &self.material
    }

    pub fn regions(&self) -> &Grid<Option<Region>> {
        &self.region
    }

    #[inline]
    pub fn elevation(&self, x: usize, z: usize) -> Option<f32> {
        self.elevation.get(x, z).copied()
    }

    #[inline]
    pub fn humidity(&self, x: usize, z: usize) -> Option<f32> {
        self.humidity.get(x, z).copied()
    }

    #[inline]
    pub fn material(&self, x: usize, z: usize) -> Option<Material> {
        self.material.get(x, z).copied()
    }

    /// Region label, `None` when out of bounds or unlabelled.
    #[inline]
    pub fn region(&self, x: usize, z: usize) -> Option<Region> {
        self.region.get(x, z).copied().flatten()
    }

    #[inline]
    pub fn set_elevation(&mut self, x: usize, z: usize, value: f32) {
        self.elevation.set(x, z, clamp_elevation(value));
    }

    /// Move elevation toward `target` by fraction `t` in `[0, 1]`.
    #[inline]
    pub fn blend_elevation(&mut self, x: usize, z: usize, target: f32, t: f32) {
        if let Some(e) = self.elevation(x, z) {
            self.set_elevation(x, z, e + (target - e) * t.clamp(0.0, 1.0));
        }
    }

    #[inline]
    pub fn set_humidity(&mut self, x: usize, z: usize, value: f32) {
        self.humidity.set(x, z, value.clamp(0.0, 1.0));
    }

    #[inline]
    pub fn set_material(&mut self, x: usize, z: usize, material: Material) {
        self.material.set(x, z, material);
    }

    #[inline]
    pub fn set_region(&mut self, x: usize, z: usize, region: Region) {
        self.region.set(x, z, Some(region));
    }

    /// Replace the whole elevation layer, clamping. Ignored on size mismatch.
    pub fn replace_elevations(&mut self, mut elevation: Grid<f32>) {
        if elevation.dimensions() != self.dimensions() {
            return;
        }
        for e in elevation.as_mut_slice() {
            *e = clamp_elevation(*e);
        }
        self.elevation = elevation;
    }

    /// Whether every cell carries a region label.
    pub fn is_fully_labelled(&self) -> bool {
        self.region.iter().all(Option::is_some)
    }

    /// Continuous grid coordinates for a world position, or `None` when the
    /// position lies outside the grid or is not finite.
    pub fn world_to_grid(&self, x: f32, z: f32) -> Option<(f32, f32)> {
        if self.is_empty() || !x.is_finite() || !z.is_finite() || self.cell_size <= 0.0 {
            return None;
        }
        let gx = x / self.cell_size;
        let gz = z / self.cell_size;
        let max_x = (self.width() - 1) as f32;
        let max_z = (self.height() - 1) as f32;
        if gx < 0.0 || gz < 0.0 || gx > max_x || gz > max_z {
            return None;
        }
        Some((gx, gz))
    }

    /// Nearest grid cell to a world position.
    pub fn cell_at_world(&self, x: f32, z: f32) -> Option<(usize, usize)> {
        self.world_to_grid(x, z)
            .map(|(gx, gz)| (gx.round() as usize, gz.round() as usize))
    }

    /// Region label of the nearest cell to a world position.
    pub fn region_at_world(&self, x: f32, z: f32) -> Option<Option<Region>> {
        self.cell_at_world(x, z).map(|(cx, cz)| self.region(cx, cz))
    }

    /// World position of a cell centre, grounded on the terrain.
    pub fn grid_to_world(&self, x: usize, z: usize) -> Option<Vec3> {
        self.elevation(x, z).map(|e| {
            Vec3::new(
                x as f32 * self.cell_size,
                e * self.height_scale,
                z as f32 * self.cell_size,
            )
        })
    }

    /// Bilinear world height at a world position.
    pub fn height_at_world(&self, x: f32, z: f32) -> Option<f32> {
        let (gx, gz) = self.world_to_grid(x, z)?;
        let x0 = gx.floor() as usize;
        let z0 = gz.floor() as usize;
        let x1 = (x0 + 1).min(self.width() - 1);
        let z1 = (z0 + 1).min(self.height() - 1);
        let fx = gx - x0 as f32;
        let fz = gz - z0 as f32;

        let h00 = self.elevation(x0, z0)?;
        let h10 = self.elevation(x1, z0)?;
        let h01 = self.elevation(x0, z1)?;
        let h11 = self.elevation(x1, z1)?;

        let a = h00 + (h10 - h00) * fx;
        let b = h01 + (h11 - h01) * fx;
        Some((a + (b - a) * fz) * self.height_scale)
    }

    /// Terrain slope (rise over run, world units) at a cell, using central
    /// differences clamped at the edges.
    pub fn slope_at(&self, x: usize, z: usize) -> f32 {
        if self.elevation(x, z).is_none() || self.cell_size <= 0.0 {
            return 0.0;
        }
        let xn = x.saturating_sub(1);
        let xp = (x + 1).min(self.width() - 1);
        let zn = z.saturating_sub(1);
        let zp = (z + 1).min(self.height() - 1);

        let e = |cx: usize, cz: usize| self.elevation(cx, cz).unwrap_or(0.0) * self.height_scale;
        let run_x = ((xp - xn).max(1)) as f32 * self.cell_size;
        let run_z = ((zp - zn).max(1)) as f32 * self.cell_size;
        let dx = (e(xp, z) - e(xn, z)) / run_x;
        let dz = (e(x, zp) - e(x, zn)) / run_z;
        (dx * dx + dz * dz).sqrt()
    }
}

impl Default for HeightMap {
    fn default() -> Self {
        Self::empty()
    }
}
