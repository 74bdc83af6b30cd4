//! Voronoi partitioning with radius constraint.
//!
//! Key characteristics:
//! - Sites are seeded like constrained k-means, then moved to the centroid of
//!   their Voronoi cell each iteration
//! - Points farther than `radius` from their nearest site are left out
//! - Empty cells are removed and sites closer than `radius * merge_factor`
//!   are merged in a single left-to-right pass
//! - Every surviving cell is finally split into radius-connected components,
//!   so one cell may yield several weighted points

use crate::connectivity::connected_components;
use crate::seeding::{rng_for, seed_sites, CONVERGENCE_TOLERANCE};
use log::{debug, trace};
use pointreduce_core::{centroid, Cluster, Point, PointReduction, Reduction, ReductionConfig};

/// Iteration cap used when the configuration does not set one.
pub const DEFAULT_MAX_ITERATIONS: usize = 50;

/// A site and the points currently assigned to it.
#[derive(Clone, Debug)]
struct VoronoiCell {
    site: Point,
    members: Vec<Point>,
}

impl VoronoiCell {
    fn new(site: Point) -> Self {
        Self {
            site,
            members: Vec::new(),
        }
    }
}

/// Voronoi-based reduction.
#[derive(Debug, Clone, Default)]
pub struct VoronoiReduction {
    config: ReductionConfig,
}

impl VoronoiReduction {
    /// Create with custom configuration.
    pub fn new(config: ReductionConfig) -> Self {
        Self { config }
    }

    /// Create with default configuration and the given radius.
    pub fn with_radius(radius: f64) -> Self {
        Self::new(ReductionConfig::new(radius))
    }

    /// Runs the iteration from explicit starting sites instead of random
    /// seeding.
    pub fn reduce_from_sites(&self, points: &[Point], sites: Vec<Point>) -> Reduction {
        let (clusters, iterations) = self.clusters_from_sites(points, sites);
        let reduction = Reduction::from_clusters(&clusters, points.len(), iterations);

        debug!(
            "voronoi: {} points -> {} clusters, {} dropped, {} iterations",
            points.len(),
            reduction.len(),
            reduction.dropped,
            iterations
        );
        reduction
    }

    /// Iterates from `sites` and returns the radius-connected groups of every
    /// surviving cell, in cell order, with the number of iterations run.
    pub fn clusters_from_sites(
        &self,
        points: &[Point],
        sites: Vec<Point>,
    ) -> (Vec<Cluster>, usize) {
        let radius = self.config.radius;
        let merge_distance = radius * self.config.merge_factor;
        let max_iterations = self.config.iterations_or(DEFAULT_MAX_ITERATIONS);

        let mut cells: Vec<VoronoiCell> = sites.into_iter().map(VoronoiCell::new).collect();
        let mut iterations = 0;

        while iterations < max_iterations && !cells.is_empty() {
            iterations += 1;

            partition(points, &mut cells, radius);
            let moved = update_sites(&mut cells);

            let before = cells.len();
            cells.retain(|cell| !cell.members.is_empty());
            let removed = before - cells.len();
            let merged = merge_close_sites(&mut cells, merge_distance);

            trace!(
                "voronoi iteration {iterations}: {} cells, {removed} emptied, {merged} merged, moved: {moved}",
                cells.len()
            );

            if !moved && removed == 0 && merged == 0 {
                break;
            }
        }

        trace!("voronoi settled on {} cells", cells.len());
        let subclusters = cells
            .iter()
            .flat_map(|cell| split_large_cell(cell, radius))
            .collect();
        (subclusters, iterations)
    }
}

/// Rebuilds cell membership: each point joins its nearest site, unless that
/// site is farther than `radius`. Ties go to the earlier cell.
fn partition(points: &[Point], cells: &mut [VoronoiCell], radius: f64) {
    for cell in cells.iter_mut() {
        cell.members.clear();
    }

    for point in points {
        let nearest = cells
            .iter()
            .enumerate()
            .map(|(i, cell)| (i, point.distance(&cell.site)))
            .fold(None, |best: Option<(usize, f64)>, (i, dist)| match best {
                Some((_, min)) if min <= dist => best,
                _ => Some((i, dist)),
            });

        if let Some((i, dist)) = nearest {
            if dist <= radius {
                cells[i].members.push(*point);
            }
        }
    }
}

/// Moves each non-empty cell's site to its members' centroid. Returns true if
/// any site moved more than the convergence tolerance.
fn update_sites(cells: &mut [VoronoiCell]) -> bool {
    let mut moved = false;
    for cell in cells.iter_mut() {
        if let Some(site) = centroid(&cell.members) {
            if cell.site.distance(&site) > CONVERGENCE_TOLERANCE {
                moved = true;
            }
            cell.site = site;
        }
    }
    moved
}

/// Single left-to-right pass folding each cell into the first earlier cell
/// whose site is closer than `merge_distance`. Returns the number of cells
/// absorbed.
fn merge_close_sites(cells: &mut Vec<VoronoiCell>, merge_distance: f64) -> usize {
    let mut alive = vec![true; cells.len()];
    let mut merged = 0;

    for i in 0..cells.len() {
        if !alive[i] {
            continue;
        }
        for j in (i + 1)..cells.len() {
            if !alive[j] || cells[i].site.distance(&cells[j].site) >= merge_distance {
                continue;
            }

            let absorbed = std::mem::take(&mut cells[j].members);
            let target = &mut cells[i];
            target.members.extend(absorbed);
            if let Some(site) = centroid(&target.members) {
                target.site = site;
            }
            alive[j] = false;
            merged += 1;
        }
    }

    if merged > 0 {
        let mut flags = alive.into_iter();
        cells.retain(|_| flags.next().unwrap_or(true));
    }
    merged
}

/// Splits a cell's members into radius-connected groups.
fn split_large_cell(cell: &VoronoiCell, radius: f64) -> Vec<Cluster> {
    connected_components(&cell.members, radius)
}

impl PointReduction for VoronoiReduction {
    fn name(&self) -> &'static str {
        "voronoi"
    }

    fn config(&self) -> &ReductionConfig {
        &self.config
    }

    fn reduce_points(&self, points: &[Point]) -> Reduction {
        if points.is_empty() {
            return Reduction::default();
        }

        let mut rng = rng_for(&self.config);
        let sites = seed_sites(points, self.config.radius, &mut rng);
        self.reduce_from_sites(points, sites)
    }
}
