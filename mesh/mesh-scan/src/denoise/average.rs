//! Simple averaging.
//!
//! Each vertex becomes the unweighted mean of itself and its neighbors.

use mesh_types::TriangleMesh;

use super::relax::{relax, Kernel};
use super::{FilterResult, FilterScope};

/// Average the channels selected by `scope` for `iterations` passes.
///
/// # Example
///
/// ```
/// use mesh_types::{TriangleMesh, Point3};
/// use mesh_scan::denoise::{filter_smooth_simple, FilterScope};
///
/// let mut mesh = TriangleMesh::from_parts(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(3.0, 0.0, 0.0),
///         Point3::new(0.0, 3.0, 0.0),
///     ],
///     vec![[0, 1, 2]],
/// );
/// filter_smooth_simple(&mut mesh, 1, FilterScope::Vertex);
///
/// // A lone triangle collapses onto its centroid.
/// assert!((mesh.vertices[0] - Point3::new(1.0, 1.0, 0.0)).norm() < 1e-12);
/// ```
pub fn filter_smooth_simple(
    mesh: &mut TriangleMesh,
    iterations: u32,
    scope: FilterScope,
) -> FilterResult {
    relax(mesh, iterations, Kernel::Average, scope)
}
