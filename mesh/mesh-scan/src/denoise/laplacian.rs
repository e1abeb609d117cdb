//! Laplacian smoothing with inverse-distance weights.
//!
//! Each vertex moves toward the weighted mean of its neighbors:
//!
//! ```text
//! w_n   = 1 / (|v - v_n| + eps)
//! v_new = v + lambda * (sum(w_n * v_n) / sum(w_n) - v)
//! ```
//!
//! Close neighbors pull harder than distant ones. Repeated application
//! shrinks the surface; see [`filter_smooth_taubin`](super::filter_smooth_taubin)
//! for the shrink-free variant.
//! Vertices without neighbors are left as they are.

use mesh_types::TriangleMesh;

use super::relax::{relax, Kernel};
use super::{FilterResult, FilterScope};

/// Smooth the channels selected by `scope` for `iterations` passes.
///
/// `lambda` is usually in `(0, 1]`; a negative value inflates instead.
///
/// # Example
///
/// ```
/// use mesh_types::unit_cube;
/// use mesh_scan::denoise::{filter_smooth_laplacian, FilterScope};
///
/// let mut cube = unit_cube();
/// let before = cube.surface_area();
/// filter_smooth_laplacian(&mut cube, 3, 0.5, FilterScope::All);
/// assert!(cube.surface_area() < before);
/// ```
pub fn filter_smooth_laplacian(
    mesh: &mut TriangleMesh,
    iterations: u32,
    lambda: f64,
    scope: FilterScope,
) -> FilterResult {
    relax(mesh, iterations, Kernel::Laplacian { lambda }, scope)
}
