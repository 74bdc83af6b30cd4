//! Strategy selection and the name-dispatching entry points.

use crate::{ConnectivityReduction, GridReduction, KMeansReduction, VoronoiReduction};
use pointreduce_core::error::{Error, Result};
use pointreduce_core::{Point, PointReduction, Reduction, ReductionConfig, WeightedPoint};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The available reduction strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Strategy {
    /// Uniform grid bucketing.
    Grid,
    /// Radius-connected components (single linkage).
    Hierarchical,
    /// Constrained k-means.
    KMeans,
    /// Voronoi partitioning with merge and split passes.
    Voronoi,
}

impl Strategy {
    /// Every strategy, in dispatcher order.
    pub const ALL: [Strategy; 4] = [
        Strategy::Grid,
        Strategy::Hierarchical,
        Strategy::KMeans,
        Strategy::Voronoi,
    ];

    /// Name accepted by the dispatcher.
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Grid => "grid",
            Strategy::Hierarchical => "hierarchical",
            Strategy::KMeans => "kmeans",
            Strategy::Voronoi => "voronoi",
        }
    }

    /// Whether every input point is guaranteed to appear in the output weights.
    pub fn conserves_weight(self) -> bool {
        matches!(self, Strategy::Grid | Strategy::Hierarchical)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "grid" => Ok(Strategy::Grid),
            "hierarchical" | "connectivity" => Ok(Strategy::Hierarchical),
            "kmeans" => Ok(Strategy::KMeans),
            "voronoi" => Ok(Strategy::Voronoi),
            other => Err(Error::UnknownStrategy(other.to_string())),
        }
    }
}

/// Builds the reduction for `strategy` with the given configuration.
pub fn strategy_for(strategy: Strategy, config: ReductionConfig) -> Box<dyn PointReduction> {
    match strategy {
        Strategy::Grid => Box::new(GridReduction::new(config)),
        Strategy::Hierarchical => Box::new(ConnectivityReduction::new(config)),
        Strategy::KMeans => Box::new(KMeansReduction::new(config)),
        Strategy::Voronoi => Box::new(VoronoiReduction::new(config)),
    }
}

/// Reduces `points` with the chosen strategy, returning the full result.
///
/// # Errors
/// Fails on an invalid configuration, a non-finite point, or (in strict mode)
/// dropped points.
pub fn reduce_with(
    points: &[Point],
    strategy: Strategy,
    config: &ReductionConfig,
) -> Result<Reduction> {
    strategy_for(strategy, config.clone()).reduce(points)
}

/// Reduces `points` with the strategy named `strategy_name`.
///
/// Accepted names are `grid`, `hierarchical`, `kmeans` and `voronoi`. The
/// k-means and Voronoi strategies are randomly seeded and may leave out points
/// that never come within `radius` of a site, so their weights can sum to
/// less than `points.len()`; use [`reduce_with`] to see the dropped count.
///
/// # Errors
/// Returns [`Error::UnknownStrategy`] for any other name and
/// [`Error::InvalidRadius`] for a non-positive radius.
pub fn reduce(points: &[Point], radius: f64, strategy_name: &str) -> Result<Vec<WeightedPoint>> {
    let strategy: Strategy = strategy_name.parse()?;
    reduce_with(points, strategy, &ReductionConfig::new(radius)).map(Reduction::into_clusters)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_names_round_trip() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.as_str().parse::<Strategy>().unwrap(), strategy);
            assert_eq!(strategy.to_string(), strategy.as_str());
        }
        assert_eq!(
            "connectivity".parse::<Strategy>().unwrap(),
            Strategy::Hierarchical
        );
    }

    #[test]
    fn test_unknown_strategy() {
        let err = reduce(&[Point::new(0.0, 0.0)], 1.0, "bogus").unwrap_err();
        assert_eq!(err, Error::UnknownStrategy("bogus".to_string()));
        assert!("Grid".parse::<Strategy>().is_err());
    }

    #[test]
    fn test_strategy_for_names() {
        for strategy in Strategy::ALL {
            let algo = strategy_for(strategy, ReductionConfig::new(1.0));
            assert_eq!(algo.name(), strategy.as_str());
        }
    }

    #[test]
    fn test_reduce_rejects_bad_radius() {
        for strategy in Strategy::ALL {
            let err = reduce(&[Point::new(0.0, 0.0)], -1.0, strategy.as_str()).unwrap_err();
            assert!(matches!(err, Error::InvalidRadius(_)));
        }
    }

    #[test]
    fn test_strict_mode_reports_dropped_points() {
        // Seeded from the origin, the single centroid drifts right and loses
        // the leftmost point.
        let points = [
            Point::new(0.0, 0.0),
            Point::new(0.9, 0.0),
            Point::new(0.9, 0.1),
            Point::new(0.9, -0.1),
            Point::new(-0.9, 0.0),
        ];
        for seed in 0..16 {
            for strategy in [Strategy::KMeans, Strategy::Voronoi] {
                let config = ReductionConfig::new(1.0).with_seed(seed);
                let lenient = reduce_with(&points, strategy, &config).unwrap();
                let strict = reduce_with(&points, strategy, &config.with_strict(true));
                if lenient.dropped == 0 {
                    assert_eq!(strict.unwrap(), lenient);
                } else {
                    assert_eq!(
                        strict.unwrap_err(),
                        Error::PointsDropped {
                            dropped: lenient.dropped,
                            total: points.len()
                        }
                    );
                }
            }
        }
    }
}
