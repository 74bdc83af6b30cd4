use approx::assert_relative_eq;
use pointreduce_algorithms::{
    reduce, reduce_with, ConnectivityReduction, GridReduction, Point, PointReduction,
    ReductionConfig, Strategy,
};

fn points(coords: &[(f64, f64)]) -> Vec<Point> {
    coords.iter().copied().map(Point::from).collect()
}

fn tight_cluster() -> Vec<Point> {
    points(&[(1.0, 1.0), (1.1, 1.1), (1.2, 0.9), (0.9, 1.2)])
}

#[test]
fn test_tight_cluster_collapses() {
    let input = tight_cluster();

    for name in ["hierarchical", "kmeans", "voronoi"] {
        let clusters = reduce(&input, 0.5, name).unwrap();
        assert_eq!(clusters.len(), 1, "{name} found {} clusters", clusters.len());
        assert_eq!(clusters[0].weight, 4);
        assert_relative_eq!(clusters[0].x, 1.05, epsilon = 1e-9);
        assert_relative_eq!(clusters[0].y, 1.05, epsilon = 1e-9);
    }
}

#[test]
fn test_tight_cluster_grid_follows_cell_boundaries() {
    let input = tight_cluster();

    // The points straddle the x = 1.0 and y = 1.0 cell edges.
    let clusters = reduce(&input, 0.5, "grid").unwrap();
    assert_eq!(clusters.len(), 3);
    assert_eq!(clusters[0].weight, 2);
    assert_eq!(clusters.iter().map(|c| c.weight).sum::<u64>(), 4);

    let clusters = reduce(&input, 2.0, "grid").unwrap();
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0].weight, 4);
}

#[test]
fn test_two_separated_pairs() {
    let input = points(&[(1.0, 1.0), (1.1, 1.1), (15.0, 15.0), (15.2, 15.2)]);

    for strategy in Strategy::ALL {
        for seed in 0..8 {
            let config = ReductionConfig::new(0.5).with_seed(seed);
            let reduction = reduce_with(&input, strategy, &config).unwrap();
            assert_eq!(reduction.len(), 2, "{strategy} with seed {seed}");
            assert!(reduction.clusters.iter().all(|c| c.weight == 2));
            assert_eq!(reduction.dropped, 0);
        }
    }
}

#[test]
fn test_pair_wider_than_radius_is_split() {
    let input = points(&[(1.0, 1.0), (1.1, 1.1), (15.0, 15.0), (15.5, 15.5)]);
    let clusters = reduce(&input, 0.5, "hierarchical").unwrap();
    let weights: Vec<u64> = clusters.iter().map(|c| c.weight).collect();
    assert_eq!(weights, vec![2, 1, 1]);
}

#[test]
fn test_isolated_outlier() {
    let mut input = tight_cluster();
    input.push(Point::new(10.0, 10.0));

    for strategy in [Strategy::Grid, Strategy::Hierarchical] {
        let reduction = reduce_with(&input, strategy, &ReductionConfig::new(0.5)).unwrap();
        let outlier = reduction
            .clusters
            .iter()
            .find(|c| (c.x - 10.0).abs() < 1e-9 && (c.y - 10.0).abs() < 1e-9)
            .expect("outlier cluster");
        assert_eq!(outlier.weight, 1);
        assert_eq!(reduction.total_weight(), 5);
    }

    for strategy in [Strategy::KMeans, Strategy::Voronoi] {
        for seed in 0..8 {
            let config = ReductionConfig::new(0.5).with_seed(seed);
            let reduction = reduce_with(&input, strategy, &config).unwrap();
            assert!(reduction.total_weight() <= 5);
            assert_eq!(reduction.total_weight() as usize + reduction.dropped, 5);
        }
    }
}

#[test]
fn test_empty_input_all_strategies() {
    for strategy in Strategy::ALL {
        let clusters = reduce(&[], 0.5, strategy.as_str()).unwrap();
        assert!(clusters.is_empty());
    }
}

#[test]
fn test_radius_larger_than_diameter() {
    let input = points(&[
        (0.0, 0.0),
        (3.0, 0.0),
        (3.0, 3.0),
        (0.0, 3.0),
        (1.5, 1.5),
    ]);

    for strategy in Strategy::ALL {
        let config = ReductionConfig::new(100.0).with_seed(5);
        let reduction = reduce_with(&input, strategy, &config).unwrap();
        assert_eq!(reduction.len(), 1, "{strategy}");
        assert_eq!(reduction.clusters[0].weight, 5);
        assert_relative_eq!(reduction.clusters[0].x, 1.5, epsilon = 1e-9);
        assert_relative_eq!(reduction.clusters[0].y, 1.5, epsilon = 1e-9);
    }
}

#[test]
fn test_unknown_strategy_fails() {
    let input = tight_cluster();
    assert!(reduce(&input, 0.5, "bogus").is_err());
    // A failed call leaves nothing behind that affects later calls.
    assert_eq!(reduce(&input, 0.5, "hierarchical").unwrap().len(), 1);
}

#[test]
fn test_non_finite_point_rejected() {
    let mut input = tight_cluster();
    input.push(Point::new(f64::NAN, 0.0));
    assert!(GridReduction::with_radius(0.5).reduce(&input).is_err());
    assert!(ConnectivityReduction::with_radius(0.5).reduce(&input).is_err());
}

#[test]
fn test_grid_keeps_distant_cells_apart_at_tiny_radius() {
    let input = points(&[(1e10, 0.0), (2e10, 0.0)]);
    let clusters = reduce(&input, 1e-10, "grid").unwrap();

    assert_eq!(clusters.len(), 2);
    for (cluster, point) in clusters.iter().zip(&input) {
        assert_eq!(cluster.weight, 1);
        assert_relative_eq!(cluster.x, point.x);
        assert_relative_eq!(cluster.y, point.y);
    }
}
