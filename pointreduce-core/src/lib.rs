//! pointreduce-core: Core types for radius-constrained point clustering.
//!
//! This crate provides the point types, geometric primitives, shared
//! configuration and the reduction trait implemented by every strategy.
//!

pub mod error;
pub mod point;
pub mod reduction;

pub use error::{Error, Result};
pub use point::{centroid, Point, WeightedPoint};
pub use reduction::{validate_points, Cluster, PointReduction, Reduction, ReductionConfig};
