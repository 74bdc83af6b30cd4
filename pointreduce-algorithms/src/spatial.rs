//! Uniform grid bucketing for 2D points.

use pointreduce_core::Point;
use std::collections::HashMap;

/// Spatial grid that buckets values by the cell their point falls into.
///
/// Cell `(i, j)` covers `[i*size, (i+1)*size) x [j*size, (j+1)*size)`.
/// Cells are kept in order of first insertion so iteration is deterministic.
/// Cells are keyed on the floored coordinate ratios themselves, so cell
/// indices beyond the range of any integer type stay distinct.
#[derive(Debug)]
pub struct SpatialGrid<T> {
    cell_size: f64,
    index: HashMap<(u64, u64), usize>,
    cells: Vec<Vec<T>>,
}

impl<T> SpatialGrid<T> {
    /// Create a new spatial grid. `cell_size` must be positive.
    pub fn new(cell_size: f64) -> Self {
        Self {
            cell_size,
            index: HashMap::new(),
            cells: Vec::new(),
        }
    }

    /// Cell size of the grid.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Cell coordinates of a point, `floor(x / size)` and `floor(y / size)`.
    ///
    /// Infinite when the ratio overflows; see [`SpatialGrid::covers`].
    pub fn cell_of(&self, point: &Point) -> (f64, f64) {
        (
            cell_index(point.x, self.cell_size),
            cell_index(point.y, self.cell_size),
        )
    }

    /// Returns true if `point` maps to a finite cell index.
    pub fn covers(&self, point: &Point) -> bool {
        let (i, j) = self.cell_of(point);
        i.is_finite() && j.is_finite()
    }

    fn key(&self, point: &Point) -> (u64, u64) {
        let (i, j) = self.cell_of(point);
        (i.to_bits(), j.to_bits())
    }

    /// Insert a value at the given point.
    pub fn insert(&mut self, point: &Point, value: T) {
        let key = self.key(point);
        let next = self.cells.len();
        let slot = *self.index.entry(key).or_insert(next);
        if slot == next {
            self.cells.push(Vec::new());
        }
        self.cells[slot].push(value);
    }

    /// Values stored in the cell containing `point`.
    pub fn get(&self, point: &Point) -> Option<&[T]> {
        self.index
            .get(&self.key(point))
            .map(|&slot| self.cells[slot].as_slice())
    }

    /// Number of non-empty cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if nothing has been inserted.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Clear all data.
    pub fn clear(&mut self) {
        self.index.clear();
        self.cells.clear();
    }

    /// Consumes the grid, yielding each cell's values in first-seen order.
    pub fn into_cells(self) -> impl Iterator<Item = Vec<T>> {
        self.cells.into_iter()
    }
}

fn cell_index(value: f64, cell_size: f64) -> f64 {
    let index = (value / cell_size).floor();
    // -0.0 and 0.0 are the same cell but differ bitwise.
    if index == 0.0 {
        0.0
    } else {
        index
    }
}
