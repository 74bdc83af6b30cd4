//! Constrained k-means.
//!
//! The number of clusters is not given up front: sites are seeded greedily so
//! that they are at least `radius` apart, then refined Lloyd-style. A point is
//! only assigned to its nearest centroid when that centroid lies within
//! `radius`; points that never get that close are left out of every weight and
//! reported through [`Reduction::dropped`].

use crate::seeding::{rng_for, seed_sites, CONVERGENCE_TOLERANCE};
use log::{debug, trace};
use pointreduce_core::{Cluster, Point, PointReduction, Reduction, ReductionConfig};

/// Iteration cap used when the configuration does not set one.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Constrained k-means reduction.
#[derive(Debug, Clone, Default)]
pub struct KMeansReduction {
    config: ReductionConfig,
}

impl KMeansReduction {
    /// Create with custom configuration.
    pub fn new(config: ReductionConfig) -> Self {
        Self { config }
    }

    /// Create with default configuration and the given radius.
    pub fn with_radius(radius: f64) -> Self {
        Self::new(ReductionConfig::new(radius))
    }

    /// Runs the iteration from explicit starting centroids instead of
    /// random seeding.
    pub fn reduce_from_centroids(&self, points: &[Point], mut centroids: Vec<Point>) -> Reduction {
        let radius = self.config.radius;
        let max_iterations = self.config.iterations_or(DEFAULT_MAX_ITERATIONS);

        let mut clusters: Vec<Cluster> = Vec::new();
        let mut iterations = 0;
        let mut converged = false;

        while iterations < max_iterations && !centroids.is_empty() {
            iterations += 1;
            clusters = assign(points, &centroids, radius);

            // Centroids that lost all their points disappear here.
            let updated: Vec<Point> = clusters.iter().filter_map(Cluster::centroid).collect();
            converged = updated.len() == centroids.len()
                && centroids
                    .iter()
                    .zip(&updated)
                    .all(|(old, new)| old.distance(new) <= CONVERGENCE_TOLERANCE);

            trace!(
                "kmeans iteration {iterations}: {} -> {} centroids",
                centroids.len(),
                updated.len()
            );
            centroids = updated;
            if converged {
                break;
            }
        }

        let reduction = Reduction::from_clusters(&clusters, points.len(), iterations);
        debug!(
            "kmeans: {} points -> {} clusters, {} dropped, {} iterations (converged: {})",
            points.len(),
            reduction.len(),
            reduction.dropped,
            iterations,
            converged
        );
        reduction
    }
}

/// Assigns every point to its nearest centroid within `radius`.
///
/// The returned clusters are index-aligned with `centroids`; ties go to the
/// lower index.
fn assign(points: &[Point], centroids: &[Point], radius: f64) -> Vec<Cluster> {
    let mut clusters = vec![Cluster::new(); centroids.len()];

    for point in points {
        let mut best: Option<(usize, f64)> = None;
        for (i, centroid) in centroids.iter().enumerate() {
            let dist = point.distance(centroid);
            if dist <= radius && best.is_none_or(|(_, min)| dist < min) {
                best = Some((i, dist));
            }
        }

        if let Some((i, _)) = best {
            clusters[i].push(*point);
        }
    }

    clusters
}

impl PointReduction for KMeansReduction {
    fn name(&self) -> &'static str {
        "kmeans"
    }

    fn config(&self) -> &ReductionConfig {
        &self.config
    }

    fn reduce_points(&self, points: &[Point]) -> Reduction {
        if points.is_empty() {
            return Reduction::default();
        }

        let mut rng = rng_for(&self.config);
        let centroids = seed_sites(points, self.config.radius, &mut rng);
        self.reduce_from_centroids(points, centroids)
    }
}
