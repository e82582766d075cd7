//! Bounds-checked flat 2D grid.

/// Row-major `width x height` buffer. `x` is the column, `z` the row.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Create a grid filled with `value`.
    pub fn new(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }
}

impl<T> Grid<T> {
    /// Build a grid from row-major data. Returns `None` when the length does
    /// not match the dimensions.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Option<Self> {
        (data.len() == width * height).then_some(Self { width, height, data })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flat index of `(x, z)`, or `None` outside the grid.
    #[inline]
    pub fn index(&self, x: usize, z: usize) -> Option<usize> {
        (x < self.width && z < self.height).then(|| z * self.width + x)
    }

    /// Flat index for signed coordinates (neighbourhood walks may step off
    /// the grid).
    #[inline]
    pub fn index_signed(&self, x: i64, z: i64) -> Option<usize> {
        if x < 0 || z < 0 {
            return None;
        }
        self.index(x as usize, z as usize)
    }

    #[inline]
    pub fn get(&self, x: usize, z: usize) -> Option<&T> {
        self.index(x, z).map(|i| &self.data[i])
    }

    #[inline]
    pub fn get_mut(&mut self, x: usize, z: usize) -> Option<&mut T> {
        self.index(x, z).map(move |i| &mut self.data[i])
    }

    /// Write `value` at `(x, z)`; out-of-bounds writes are ignored.
    #[inline]
    pub fn set(&mut self, x: usize, z: usize, value: T) {
        if let Some(cell) = self.get_mut(x, z) {
            *cell = value;
        }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Rows in order, each `width` long.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.data.chunks(self.width.max(1))
    }
}

impl<T> std::ops::Index<(usize, usize)> for Grid<T> {
    type Output = T;

    /// Panics outside the grid; use [`Grid::get`] for untrusted coordinates.
    fn index(&self, (x, z): (usize, usize)) -> &T {
        assert!(x < self.width && z < self.height, "grid index ({x}, {z}) out of bounds");
        &self.data[z * self.width + x]
    }
}

impl<T> std::ops::IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (x, z): (usize, usize)) -> &mut T {
        assert!(x < self.width && z < self.height, "grid index ({x}, {z}) out of bounds");
        &mut self.data[z * self.width + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_new_and_get() {
        let grid = Grid::new(4, 3, 1.5f32);
        assert_eq!(grid.dimensions(), (4, 3));
        assert_eq!(grid.get(3, 2), Some(&1.5));
        assert_eq!(grid.get(4, 0), None);
        assert_eq!(grid.get(0, 3), None);
    }

    #[test]
    fn test_grid_row_major() {
        let grid = Grid::from_vec(3, 2, vec![0, 1, 2, 3, 4, 5]).unwrap();
        assert_eq!(grid[(2, 0)], 2);
        assert_eq!(grid[(0, 1)], 3);
        assert_eq!(grid.index(1, 1), Some(4));
        let rows: Vec<&[i32]> = grid.rows().collect();
        assert_eq!(rows, vec![&[0, 1, 2][..], &[3, 4, 5][..]]);
    }

    #[test]
    fn test_grid_from_vec_rejects_bad_length() {
        assert!(Grid::from_vec(2, 2, vec![1, 2, 3]).is_none());
    }

    #[test]
    fn test_grid_signed_index() {
        let grid = Grid::new(2, 2, 0u8);
        assert_eq!(grid.index_signed(-1, 0), None);
        assert_eq!(grid.index_signed(1, 1), Some(3));
        assert_eq!(grid.index_signed(2, 1), None);
    }

    #[test]
    fn test_grid_set_ignores_out_of_bounds() {
        let mut grid = Grid::new(2, 2, 0u8);
        grid.set(5, 5, 9);
        grid.set(1, 0, 7);
        assert_eq!(grid.as_slice(), &[0, 7, 0, 0]);
    }
}
