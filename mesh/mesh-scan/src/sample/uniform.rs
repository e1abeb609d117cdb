//! Area-proportional uniform sampling.
//!
//! Triangle areas are turned into a cumulative distribution. Walking the
//! triangles in order, triangle `t` receives points until the running count
//! reaches `round(cdf[t] * N)`, so each triangle gets a deterministic,
//! area-proportional share. Inside a triangle the barycentric weights
//!
//! ```text
//! (1 - sqrt(r1), sqrt(r1) * (1 - r2), sqrt(r1) * r2)
//! ```
//!
//! with `r1, r2` uniform in `[0, 1)` give a uniform point. Vertex normals and
//! colors are interpolated with the same weights when the mesh has them.

use mesh_repair::check_indices;
use mesh_types::{PointCloud, Triangle, TriangleMesh};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::error::{ScanError, ScanResult};

/// Draw `number_of_points` points uniformly over the surface.
///
/// Invalid input yields an empty cloud and a warning; see
/// [`try_sample_points_uniformly`] for the reason.
///
/// # Example
///
/// ```
/// use mesh_types::unit_cube;
/// use mesh_scan::sample::sample_points_uniformly;
///
/// let cloud = sample_points_uniformly(&unit_cube(), 500);
/// assert_eq!(cloud.len(), 500);
/// ```
#[must_use]
pub fn sample_points_uniformly(mesh: &TriangleMesh, number_of_points: usize) -> PointCloud {
    warn_on_error(try_sample_points_uniformly(mesh, number_of_points, None))
}

/// [`sample_points_uniformly`] with a fixed seed for reproducible output.
#[must_use]
pub fn sample_points_uniformly_seeded(
    mesh: &TriangleMesh,
    number_of_points: usize,
    seed: u64,
) -> PointCloud {
    warn_on_error(try_sample_points_uniformly(mesh, number_of_points, Some(seed)))
}

/// Draw exactly `number_of_points` points uniformly over the surface.
///
/// Without a `seed` the generator is seeded from system entropy.
///
/// # Errors
///
/// - [`ScanError::InvalidParameter`] if `number_of_points` is zero or the
///   surface area is zero.
/// - [`ScanError::EmptyMesh`] if the mesh has no triangles.
/// - [`ScanError::Repair`] if a triangle index is out of range.
///
/// # Example
///
/// ```
/// use mesh_types::unit_cube;
/// use mesh_scan::sample::try_sample_points_uniformly;
///
/// let a = try_sample_points_uniformly(&unit_cube(), 64, Some(3))?;
/// let b = try_sample_points_uniformly(&unit_cube(), 64, Some(3))?;
/// assert_eq!(a, b);
/// # Ok::<(), mesh_scan::ScanError>(())
/// ```
pub fn try_sample_points_uniformly(
    mesh: &TriangleMesh,
    number_of_points: usize,
    seed: Option<u64>,
) -> ScanResult<PointCloud> {
    check_sampling_input(mesh, number_of_points)?;
    let (surface_area, triangle_areas) = mesh.surface_area_with_triangle_areas();
    let mut rng = make_rng(seed);
    sample_with_areas(mesh, number_of_points, &triangle_areas, surface_area, &mut rng)
}

/// Shared input checks for both samplers.
pub(crate) fn check_sampling_input(mesh: &TriangleMesh, number_of_points: usize) -> ScanResult<()> {
    if number_of_points == 0 {
        return Err(ScanError::invalid("number_of_points must be positive"));
    }
    if mesh.triangles.is_empty() {
        return Err(ScanError::EmptyMesh);
    }
    check_indices(mesh)?;
    Ok(())
}

pub(crate) fn make_rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
}

pub(crate) fn warn_on_error(result: ScanResult<PointCloud>) -> PointCloud {
    result.unwrap_or_else(|err| {
        warn!("Sampling skipped: {}", err);
        PointCloud::new()
    })
}

/// Sample with precomputed per-triangle areas.
pub(crate) fn sample_with_areas(
    mesh: &TriangleMesh,
    number_of_points: usize,
    triangle_areas: &[f64],
    surface_area: f64,
    rng: &mut StdRng,
) -> ScanResult<PointCloud> {
    if !(surface_area.is_finite() && surface_area > 0.0) {
        return Err(ScanError::invalid("mesh has zero surface area"));
    }

    let has_normals = mesh.has_vertex_normals();
    let has_colors = mesh.has_vertex_colors();
    let mut cloud = PointCloud::with_capacity(number_of_points, has_normals, has_colors);

    let mut cdf = 0.0;
    for (tidx, &area) in triangle_areas.iter().enumerate() {
        cdf += area / surface_area;
        let target = ((cdf * number_of_points as f64).round() as usize).min(number_of_points);
        while cloud.points.len() < target {
            push_sample(mesh, tidx, has_normals, has_colors, rng, &mut cloud);
        }
    }

    // Rounding can leave the last boundary short of N.
    let shortfall = number_of_points - cloud.points.len();
    if shortfall > 0 {
        if let Some(last) = triangle_areas.iter().rposition(|&a| a > 0.0) {
            for _ in 0..shortfall {
                push_sample(mesh, last, has_normals, has_colors, rng, &mut cloud);
            }
        }
        debug!("Assigned {} rounding leftovers to the last triangle", shortfall);
    }

    Ok(cloud)
}

fn push_sample(
    mesh: &TriangleMesh,
    tidx: usize,
    has_normals: bool,
    has_colors: bool,
    rng: &mut StdRng,
    cloud: &mut PointCloud,
) {
    let r1: f64 = rng.gen();
    let r2: f64 = rng.gen();
    let s = r1.sqrt();
    let (a, b, c) = (1.0 - s, s * (1.0 - r2), s * r2);

    let [i0, i1, i2] = mesh.triangles[tidx].map(|v| v as usize);
    let corners = Triangle::new(mesh.vertices[i0], mesh.vertices[i1], mesh.vertices[i2]);
    cloud.points.push(corners.interpolate(a, b, c));
    if has_normals {
        let n = &mesh.vertex_normals;
        cloud.normals.push(n[i0] * a + n[i1] * b + n[i2] * c);
    }
    if has_colors {
        let col = &mesh.vertex_colors;
        cloud.colors.push(col[i0] * a + col[i1] * b + col[i2] * c);
    }
}
