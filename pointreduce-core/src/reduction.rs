//! Reduction traits and types.

use crate::point::{centroid, Point, WeightedPoint};
use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A working group of points during a reduction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cluster {
    /// Points belonging to this cluster.
    pub points: Vec<Point>,
}

impl Cluster {
    /// Creates an empty cluster.
    #[must_use]
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Creates a cluster with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// Adds a point to the cluster.
    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Returns the number of points in the cluster.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the cluster is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns an iterator over the points.
    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    /// Removes all points, keeping the allocation.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Centroid of the members, `None` if empty.
    #[must_use]
    pub fn centroid(&self) -> Option<Point> {
        centroid(&self.points)
    }

    /// Representative of the cluster, `None` if empty.
    #[must_use]
    pub fn weighted(&self) -> Option<WeightedPoint> {
        WeightedPoint::from_members(&self.points)
    }
}

impl FromIterator<Point> for Cluster {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl Extend<Point> for Cluster {
    fn extend<I: IntoIterator<Item = Point>>(&mut self, iter: I) {
        self.points.extend(iter);
    }
}

/// Configuration shared by all reduction strategies.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReductionConfig {
    /// Cluster radius. Interpreted per strategy: grid cell size, graph edge
    /// threshold, or assignment cutoff.
    pub radius: f64,
    /// Iteration cap for the iterative strategies (`None` uses the strategy default).
    pub max_iterations: Option<usize>,
    /// Seed for site selection (`None` draws from OS entropy).
    pub seed: Option<u64>,
    /// Fail with [`Error::PointsDropped`] instead of silently dropping points.
    pub strict: bool,
    /// Voronoi sites closer than `radius * merge_factor` are merged.
    pub merge_factor: f64,
}

impl Default for ReductionConfig {
    fn default() -> Self {
        Self {
            radius: 1.0,
            max_iterations: None,
            seed: None,
            strict: false,
            merge_factor: 0.5,
        }
    }
}

impl ReductionConfig {
    /// Creates a configuration with the given radius and default values otherwise.
    #[must_use]
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            ..Self::default()
        }
    }

    /// Sets the cluster radius.
    #[must_use]
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Sets the iteration cap.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Pins the random seed used for site selection.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets strict mode.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets the Voronoi merge factor.
    #[must_use]
    pub fn with_merge_factor(mut self, factor: f64) -> Self {
        self.merge_factor = factor;
        self
    }

    /// Iteration cap, falling back to `default` when unset.
    #[must_use]
    pub fn iterations_or(&self, default: usize) -> usize {
        self.max_iterations.unwrap_or(default)
    }

    /// Checks the configuration invariants.
    ///
    /// # Errors
    /// Returns [`Error::InvalidRadius`] for a non-positive or non-finite radius
    /// and [`Error::InvalidConfig`] for a zero iteration cap or a bad merge factor.
    pub fn validate(&self) -> Result<()> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(Error::InvalidRadius(self.radius));
        }
        if self.max_iterations == Some(0) {
            return Err(Error::InvalidConfig(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        if !(self.merge_factor.is_finite() && self.merge_factor >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "merge_factor must be finite and non-negative, got {}",
                self.merge_factor
            )));
        }
        Ok(())
    }
}

/// Rejects points with non-finite coordinates.
///
/// # Errors
/// Returns [`Error::InvalidPoint`] for the first offending point.
pub fn validate_points(points: &[Point]) -> Result<()> {
    match points.iter().position(|p| !p.is_finite()) {
        Some(index) => Err(Error::InvalidPoint {
            index,
            x: points[index].x,
            y: points[index].y,
        }),
        None => Ok(()),
    }
}

/// Result of a single reduction call.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Reduction {
    /// One representative per discovered cluster.
    pub clusters: Vec<WeightedPoint>,
    /// Number of input points.
    pub input_len: usize,
    /// Input points not represented by any cluster.
    pub dropped: usize,
    /// Iterations performed (zero for the single-pass strategies).
    pub iterations: usize,
}

impl Reduction {
    /// Builds a reduction from finished member groups; empty groups are skipped.
    pub fn from_clusters<'a, I>(clusters: I, input_len: usize, iterations: usize) -> Self
    where
        I: IntoIterator<Item = &'a Cluster>,
    {
        let clusters: Vec<WeightedPoint> =
            clusters.into_iter().filter_map(Cluster::weighted).collect();
        let represented = clusters.iter().map(|wp| wp.weight).sum::<u64>();
        let represented = usize::try_from(represented).unwrap_or(usize::MAX);
        Self {
            clusters,
            input_len,
            dropped: input_len.saturating_sub(represented),
            iterations,
        }
    }

    /// Sum of all output weights.
    #[must_use]
    pub fn total_weight(&self) -> u64 {
        self.clusters.iter().map(|wp| wp.weight).sum()
    }

    /// Number of clusters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// Returns true if no clusters were produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Consumes the reduction, returning the weighted points.
    #[must_use]
    pub fn into_clusters(self) -> Vec<WeightedPoint> {
        self.clusters
    }
}

/// Trait for point reduction strategies.
///
/// A strategy groups points that lie close together (by its own reading of
/// the radius) and reports one weighted representative per group.
pub trait PointReduction: Send + Sync {
    /// Returns the name of the strategy.
    fn name(&self) -> &'static str;

    /// Returns the active configuration.
    fn config(&self) -> &ReductionConfig;

    /// Runs the strategy on already validated input.
    fn reduce_points(&self, points: &[Point]) -> Reduction;

    /// Validates the configuration and input, then reduces the points.
    ///
    /// # Errors
    /// Fails on an invalid configuration or non-finite input, and in strict
    /// mode when any point was dropped.
    fn reduce(&self, points: &[Point]) -> Result<Reduction> {
        let config = self.config();
        config.validate()?;
        validate_points(points)?;

        let reduction = self.reduce_points(points);
        if config.strict && reduction.dropped > 0 {
            return Err(Error::PointsDropped {
                dropped: reduction.dropped,
                total: reduction.input_len,
            });
        }
        Ok(reduction)
    }
}
