//! pointreduce-algorithms: Point reduction strategies.
//!
//! This crate provides four interchangeable strategies, each turning a batch
//! of points and a radius into weighted representatives:
//! - **Grid** - O(n) bucketing into `radius`-sized cells
//! - **Hierarchical** - radius-connected components (single linkage)
//! - **K-Means** - greedy seeding plus radius-constrained Lloyd iterations
//! - **Voronoi** - site iteration with merge and per-cell connectivity split
//!
//! Grid and Hierarchical account for every input point. K-Means and Voronoi
//! may drop points that never come within `radius` of a site; the count is
//! reported in [`Reduction::dropped`].
//!
#![warn(missing_docs)]

mod connectivity;
mod grid;
mod kmeans;
mod processing;
pub mod seeding;
pub mod spatial;
mod voronoi;

pub use connectivity::{connected_components, ConnectivityReduction};
pub use grid::GridReduction;
pub use kmeans::KMeansReduction;
pub use processing::{reduce, reduce_with, strategy_for, Strategy};
pub use seeding::{seed_sites, seed_sites_from};
pub use spatial::SpatialGrid;
pub use voronoi::VoronoiReduction;

// Re-export core types
pub use pointreduce_core::{
    Error, Point, PointReduction, Reduction, ReductionConfig, Result, WeightedPoint,
};
