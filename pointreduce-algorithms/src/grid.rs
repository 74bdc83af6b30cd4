//! Grid bucketing.
//!
//! Divides the plane into square cells of side `radius` and reports one
//! weighted centroid per non-empty cell. O(n) and deterministic, but only a
//! coarse approximation: two members of a cell can be up to `radius * sqrt(2)`
//! apart, and points in neighbouring cells may be closer than `radius`.

use crate::SpatialGrid;
use log::debug;
use pointreduce_core::{
    validate_points, Cluster, Error, Point, PointReduction, Reduction, ReductionConfig, Result,
};

/// Grid-based reduction.
#[derive(Debug, Clone, Default)]
pub struct GridReduction {
    config: ReductionConfig,
}

impl GridReduction {
    /// Create with custom configuration.
    pub fn new(config: ReductionConfig) -> Self {
        Self { config }
    }

    /// Create with default configuration and the given radius.
    pub fn with_radius(radius: f64) -> Self {
        Self::new(ReductionConfig::new(radius))
    }

    /// Cell size used for bucketing.
    pub fn cell_size(&self) -> f64 {
        self.config.radius
    }
}

impl PointReduction for GridReduction {
    fn name(&self) -> &'static str {
        "grid"
    }

    fn config(&self) -> &ReductionConfig {
        &self.config
    }

    /// Same as the provided method, but also fails with
    /// [`Error::InvalidConfig`] when a coordinate divided by the radius
    /// overflows, as such a point has no representable cell.
    fn reduce(&self, points: &[Point]) -> Result<Reduction> {
        self.config.validate()?;
        validate_points(points)?;

        let grid: SpatialGrid<()> = SpatialGrid::new(self.cell_size());
        if let Some(point) = points.iter().find(|p| !grid.covers(p)) {
            return Err(Error::InvalidConfig(format!(
                "radius {} is too small for point ({}, {})",
                self.cell_size(),
                point.x,
                point.y
            )));
        }

        Ok(self.reduce_points(points))
    }

    fn reduce_points(&self, points: &[Point]) -> Reduction {
        if points.is_empty() {
            return Reduction::default();
        }

        let mut grid = SpatialGrid::new(self.cell_size());
        for point in points {
            grid.insert(point, *point);
        }

        let clusters: Vec<Cluster> = grid
            .into_cells()
            .map(|points| Cluster { points })
            .collect();
        let reduction = Reduction::from_clusters(&clusters, points.len(), 0);

        debug!(
            "grid: {} points -> {} cells (cell size {})",
            points.len(),
            reduction.len(),
            self.cell_size()
        );
        reduction
    }
}
