//! Poisson-disk sampling by weighted sample elimination.
//!
//! An oversampled candidate set is thinned greedily. Every candidate carries
//! a weight summing how crowded its neighborhood is; the most crowded
//! candidate is removed and its neighbors are reweighted, until the target
//! count remains.
//!
//! # Algorithm
//!
//! ```text
//! r_max = 2 * sqrt((area / N) / (2 * sqrt(3)))
//! r_min = r_max * beta * (1 - (N / M)^gamma)
//! w(d)  = (1 - max(d, r_min) / r_max)^alpha       for d <= r_max
//! ```
//!
//! with `M` candidates and `alpha = 8`, `beta = 0.5`, `gamma = 1.5`. The
//! priority queue is never updated in place: reweighted candidates are
//! pushed again and stale entries are skipped when popped.
//!
//! # Reference
//!
//! Yuksel, C. (2015). "Sample Elimination for Generating Poisson Disk Sample
//! Sets". Computer Graphics Forum 34(2).

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use mesh_types::{PointCloud, TriangleMesh};
use tracing::debug;

use super::grid::{RadiusIndex, SpatialGrid};
use super::uniform::{check_sampling_input, make_rng, sample_with_areas, warn_on_error};
use crate::error::{ScanError, ScanResult};

const ALPHA: f64 = 8.0;
const BETA: f64 = 0.5;
const GAMMA: f64 = 1.5;

/// Parameters for Poisson-disk sampling.
///
/// # Example
///
/// ```
/// use mesh_scan::sample::PoissonDiskParams;
///
/// let params = PoissonDiskParams::new(1000).with_init_factor(8.0).with_seed(42);
/// assert_eq!(params.number_of_points, 1000);
/// assert_eq!(params.seed, Some(42));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoissonDiskParams {
    /// Target number of points.
    pub number_of_points: usize,

    /// Candidates drawn per target point when no candidate cloud is given.
    /// Must be at least 1. Default: 5.
    pub init_factor: f64,

    /// Seed for candidate generation. `None` seeds from system entropy.
    pub seed: Option<u64>,
}

impl PoissonDiskParams {
    /// Target `number_of_points` with the default oversampling factor.
    #[must_use]
    pub const fn new(number_of_points: usize) -> Self {
        Self {
            number_of_points,
            init_factor: 5.0,
            seed: None,
        }
    }

    /// Sets the oversampling factor.
    #[must_use]
    pub const fn with_init_factor(mut self, init_factor: f64) -> Self {
        self.init_factor = init_factor;
        self
    }

    /// Sets a fixed seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Queue entry; the heap pops the largest weight first.
#[derive(Debug, Clone, Copy)]
struct WeightedSample {
    index: usize,
    weight: f64,
}

impl PartialEq for WeightedSample {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for WeightedSample {}

impl PartialOrd for WeightedSample {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WeightedSample {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .partial_cmp(&other.weight)
            .unwrap_or(Ordering::Equal)
    }
}

/// Evenly spaced samples over the surface.
///
/// Invalid input yields an empty cloud and a warning; see
/// [`try_sample_points_poisson_disk`].
///
/// # Example
///
/// ```
/// use mesh_types::unit_cube;
/// use mesh_scan::sample::{sample_points_poisson_disk, PoissonDiskParams};
///
/// let cloud = sample_points_poisson_disk(&unit_cube(), &PoissonDiskParams::new(200), None);
/// assert_eq!(cloud.len(), 200);
/// ```
#[must_use]
pub fn sample_points_poisson_disk(
    mesh: &TriangleMesh,
    params: &PoissonDiskParams,
    candidates: Option<&PointCloud>,
) -> PointCloud {
    warn_on_error(try_sample_points_poisson_disk(mesh, params, candidates))
}

/// Thin a candidate set down to `params.number_of_points` evenly spaced
/// samples.
///
/// Candidates come from `candidates` when given, otherwise from uniform
/// sampling of `init_factor * number_of_points` points. Surviving points
/// keep their relative order and their normals and colors.
///
/// # Errors
///
/// - [`ScanError::InvalidParameter`] if `number_of_points` is zero, if
///   `init_factor < 1` without candidates, or if the surface area is zero.
/// - [`ScanError::EmptyMesh`] if the mesh has no triangles.
/// - [`ScanError::InsufficientPoints`] if `candidates` holds fewer than
///   `number_of_points` points.
/// - [`ScanError::Repair`] if a triangle index is out of range.
pub fn try_sample_points_poisson_disk(
    mesh: &TriangleMesh,
    params: &PoissonDiskParams,
    candidates: Option<&PointCloud>,
) -> ScanResult<PointCloud> {
    let target = params.number_of_points;
    check_sampling_input(mesh, target)?;
    match candidates {
        None if !(params.init_factor >= 1.0 && params.init_factor.is_finite()) => {
            return Err(ScanError::invalid(format!(
                "init_factor must be at least 1 without candidates, got {}",
                params.init_factor
            )));
        }
        Some(cloud) if cloud.len() < target => {
            return Err(ScanError::InsufficientPoints {
                required: target,
                actual: cloud.len(),
            });
        }
        _ => {}
    }

    let (surface_area, triangle_areas) = mesh.surface_area_with_triangle_areas();
    if !(surface_area.is_finite() && surface_area > 0.0) {
        return Err(ScanError::invalid("mesh has zero surface area"));
    }

    let mut cloud = if let Some(cloud) = candidates {
        cloud.clone()
    } else {
        let count = (params.init_factor * target as f64) as usize;
        let mut rng = make_rng(params.seed);
        sample_with_areas(mesh, count, &triangle_areas, surface_area, &mut rng)?
    };

    let deleted = eliminate(&cloud, target, surface_area);
    let before = cloud.len();
    cloud.retain_indices(|i| !deleted[i]);
    debug!(
        "Eliminated {} of {} candidates down to {} samples",
        before - cloud.len(),
        before,
        cloud.len()
    );
    Ok(cloud)
}

/// Run the elimination and return the tombstone mask.
#[allow(clippy::float_cmp)]
fn eliminate(cloud: &PointCloud, target: usize, surface_area: f64) -> Vec<bool> {
    let points = &cloud.points;
    let count = points.len();
    let ratio = target as f64 / count as f64;
    let r_max = 2.0 * ((surface_area / target as f64) / (2.0 * 3.0_f64.sqrt())).sqrt();
    let r_min = r_max * BETA * (1.0 - ratio.powf(GAMMA));

    let index = SpatialGrid::new(points, r_max);
    let mut weights = vec![0.0; count];
    let mut deleted = vec![false; count];

    let weight_of = |d2: f64| -> f64 {
        let d = d2.sqrt().max(r_min);
        (1.0 - d / r_max).powf(ALPHA)
    };
    let point_weight = |pidx: usize, deleted: &[bool]| -> f64 {
        index
            .search_radius(&points[pidx], r_max)
            .into_iter()
            .filter(|&(nb, _)| nb != pidx && !deleted[nb])
            .map(|(_, d2)| weight_of(d2))
            .sum()
    };

    let mut queue = BinaryHeap::with_capacity(count);
    for (pidx, weight) in weights.iter_mut().enumerate() {
        *weight = point_weight(pidx, &deleted);
        queue.push(WeightedSample {
            index: pidx,
            weight: *weight,
        });
    }

    let mut live = count;
    while live > target {
        let Some(WeightedSample { index: pidx, weight }) = queue.pop() else {
            break;
        };
        // Superseded by a later push, or already gone.
        if deleted[pidx] || weight != weights[pidx] {
            continue;
        }

        deleted[pidx] = true;
        live -= 1;

        for (nb, _) in index.search_radius(&points[pidx], r_max) {
            if deleted[nb] {
                continue;
            }
            weights[nb] = point_weight(nb, &deleted);
            queue.push(WeightedSample {
                index: nb,
                weight: weights[nb],
            });
        }
    }

    deleted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::sample_points_uniformly_seeded;
    use mesh_types::{unit_cube, Point3, Vector3};

    fn unit_square() -> TriangleMesh {
        TriangleMesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        )
    }

    fn min_spacing(cloud: &PointCloud) -> f64 {
        let mut best = f64::INFINITY;
        for (i, p) in cloud.points.iter().enumerate() {
            for q in &cloud.points[i + 1..] {
                best = best.min((p - q).norm());
            }
        }
        best
    }

    #[test]
    fn exact_target_count() {
        let params = PoissonDiskParams::new(150).with_seed(9);
        let cloud = try_sample_points_poisson_disk(&unit_cube(), &params, None).unwrap();
        assert_eq!(cloud.len(), 150);
    }

    #[test]
    fn spacing_beats_uniform_sampling() {
        let mesh = unit_square();
        let params = PoissonDiskParams::new(100).with_seed(4);
        let poisson = try_sample_points_poisson_disk(&mesh, &params, None).unwrap();
        let uniform = sample_points_uniformly_seeded(&mesh, 100, 4);
        assert!(min_spacing(&poisson) > min_spacing(&uniform));
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let params = PoissonDiskParams::new(80).with_seed(1);
        let a = try_sample_points_poisson_disk(&unit_square(), &params, None).unwrap();
        let b = try_sample_points_poisson_disk(&unit_square(), &params, None).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn supplied_candidates_keep_order_and_attributes() {
        let mesh = unit_square();
        let mut candidates = sample_points_uniformly_seeded(&mesh, 400, 2);
        candidates.colors = (0..400).map(|i| Vector3::new(f64::from(i), 0.0, 0.0)).collect();

        let params = PoissonDiskParams::new(60);
        let cloud = try_sample_points_poisson_disk(&mesh, &params, Some(&candidates)).unwrap();
        assert_eq!(cloud.len(), 60);
        assert!(cloud.has_colors());
        assert!(cloud.colors.windows(2).all(|w| w[0].x < w[1].x));
        for (p, c) in cloud.points.iter().zip(&cloud.colors) {
            assert_eq!(*p, candidates.points[c.x as usize]);
        }
    }

    #[test]
    fn exact_candidate_count_keeps_everything() {
        let mesh = unit_square();
        let candidates = sample_points_uniformly_seeded(&mesh, 30, 8);
        let cloud =
            try_sample_points_poisson_disk(&mesh, &PoissonDiskParams::new(30), Some(&candidates))
                .unwrap();
        assert_eq!(cloud, candidates);
    }

    #[test]
    fn heap_pops_heaviest_first() {
        let mut heap = BinaryHeap::new();
        for (index, weight) in [(0, 0.5), (1, 2.0), (2, 1.0)] {
            heap.push(WeightedSample { index, weight });
        }
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|e| e.index)).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn invalid_input_is_reported() {
        let mesh = unit_square();
        assert!(matches!(
            try_sample_points_poisson_disk(&mesh, &PoissonDiskParams::new(0), None),
            Err(ScanError::InvalidParameter { .. })
        ));
        assert!(matches!(
            try_sample_points_poisson_disk(
                &mesh,
                &PoissonDiskParams::new(10).with_init_factor(0.5),
                None
            ),
            Err(ScanError::InvalidParameter { .. })
        ));
        let few = sample_points_uniformly_seeded(&mesh, 5, 0);
        assert_eq!(
            try_sample_points_poisson_disk(&mesh, &PoissonDiskParams::new(10), Some(&few)),
            Err(ScanError::InsufficientPoints {
                required: 10,
                actual: 5
            })
        );
        assert_eq!(
            try_sample_points_poisson_disk(&TriangleMesh::new(), &PoissonDiskParams::new(10), None),
            Err(ScanError::EmptyMesh)
        );
    }

    #[test]
    fn invalid_input_yields_empty_cloud() {
        let params = PoissonDiskParams::new(10).with_init_factor(0.0);
        assert!(sample_points_poisson_disk(&unit_square(), &params, None).is_empty());
    }
}
