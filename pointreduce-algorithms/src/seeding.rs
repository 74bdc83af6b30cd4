//! Site selection shared by the iterative strategies.

use pointreduce_core::{Point, ReductionConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Sites that move no further than this between iterations are considered settled.
pub const CONVERGENCE_TOLERANCE: f64 = 1e-6;

/// Random source for a reduction: seeded when the configuration pins a seed,
/// OS entropy otherwise.
pub fn rng_for(config: &ReductionConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Picks a random first site, then greedily adds every point that is at
/// least `radius` from all sites chosen so far.
///
/// Sites are pairwise at least `radius` apart. Returns an empty list for
/// empty input.
pub fn seed_sites<R: Rng>(points: &[Point], radius: f64, rng: &mut R) -> Vec<Point> {
    if points.is_empty() {
        return Vec::new();
    }
    let first = rng.random_range(0..points.len());
    seed_sites_from(points, radius, first)
}

/// Deterministic form of [`seed_sites`] with an explicit first site index.
///
/// Returns an empty list when `first` is not an index into `points`.
pub fn seed_sites_from(points: &[Point], radius: f64, first: usize) -> Vec<Point> {
    let Some(&start) = points.get(first) else {
        return Vec::new();
    };

    let mut sites = vec![start];
    for (i, point) in points.iter().enumerate() {
        if i == first {
            continue;
        }
        if sites.iter().all(|site| point.distance(site) >= radius) {
            sites.push(*point);
        }
    }
    sites
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(0.2, 0.0),
            Point::new(5.0, 5.0),
            Point::new(5.1, 5.0),
            Point::new(10.0, 0.0),
        ]
    }

    #[test]
    fn test_seed_sites_from_first() {
        let sites = seed_sites_from(&sample(), 1.0, 0);
        assert_eq!(
            sites,
            vec![
                Point::new(0.0, 0.0),
                Point::new(5.0, 5.0),
                Point::new(10.0, 0.0)
            ]
        );
    }

    #[test]
    fn test_seed_sites_from_middle() {
        let sites = seed_sites_from(&sample(), 1.0, 3);
        assert_eq!(sites[0], Point::new(5.1, 5.0));
        assert_eq!(sites.len(), 3);
    }

    #[test]
    fn test_sites_are_separated() {
        let points: Vec<Point> = (0..50)
            .map(|i| Point::new(f64::from(i % 7) * 0.3, f64::from(i / 7) * 0.3))
            .collect();
        let mut rng = StdRng::seed_from_u64(11);
        let sites = seed_sites(&points, 0.5, &mut rng);

        for (i, a) in sites.iter().enumerate() {
            for b in &sites[i + 1..] {
                assert!(a.distance(b) >= 0.5);
            }
        }
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let config = ReductionConfig::new(1.0).with_seed(42);
        let a = seed_sites(&sample(), 1.0, &mut rng_for(&config));
        let b = seed_sites(&sample(), 1.0, &mut rng_for(&config));
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_input() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(seed_sites(&[], 1.0, &mut rng).is_empty());
        assert!(seed_sites_from(&[], 1.0, 0).is_empty());
    }

    #[test]
    fn test_first_out_of_range() {
        let points = sample();
        assert!(seed_sites_from(&points, 1.0, points.len()).is_empty());
        assert!(seed_sites_from(&points, 1.0, usize::MAX).is_empty());
    }
}
