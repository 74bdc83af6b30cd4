//! Connectivity agglomeration.
//!
//! Builds the implicit graph in which two points are joined when they are at
//! most `radius` apart and reports each connected component as one cluster.
//! This is single-linkage clustering: a chain of close points can make a
//! component much wider than `radius`.

use log::debug;
use pointreduce_core::{Cluster, Point, PointReduction, Reduction, ReductionConfig};
use std::collections::VecDeque;

/// Connected-component reduction (reported under the name "hierarchical").
#[derive(Debug, Clone, Default)]
pub struct ConnectivityReduction {
    config: ReductionConfig,
}

impl ConnectivityReduction {
    /// Create with custom configuration.
    pub fn new(config: ReductionConfig) -> Self {
        Self { config }
    }

    /// Create with default configuration and the given radius.
    pub fn with_radius(radius: f64) -> Self {
        Self::new(ReductionConfig::new(radius))
    }
}

/// Splits `points` into radius-connected components.
///
/// Components are discovered by breadth-first search seeded from the lowest
/// unassigned index, so the output order follows the input order. Pairwise
/// checks make this O(n^2).
pub fn connected_components(points: &[Point], radius: f64) -> Vec<Cluster> {
    let mut components = Vec::new();
    let mut assigned = vec![false; points.len()];
    let mut queue = VecDeque::new();

    for seed in 0..points.len() {
        if assigned[seed] {
            continue;
        }

        let mut component = Cluster::new();
        assigned[seed] = true;
        queue.push_back(seed);

        while let Some(current) = queue.pop_front() {
            let here = points[current];
            component.push(here);

            for (j, other) in points.iter().enumerate() {
                if !assigned[j] && here.distance(other) <= radius {
                    assigned[j] = true;
                    queue.push_back(j);
                }
            }
        }

        components.push(component);
    }

    components
}

impl PointReduction for ConnectivityReduction {
    fn name(&self) -> &'static str {
        "hierarchical"
    }

    fn config(&self) -> &ReductionConfig {
        &self.config
    }

    fn reduce_points(&self, points: &[Point]) -> Reduction {
        let components = connected_components(points, self.config.radius);
        let reduction = Reduction::from_clusters(&components, points.len(), 0);

        debug!(
            "hierarchical: {} points -> {} components (radius {})",
            points.len(),
            reduction.len(),
            self.config.radius
        );
        reduction
    }
}
