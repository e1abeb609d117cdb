//! Uniform sharpening.
//!
//! Each vertex is pushed away from the sum of its neighbors:
//!
//! ```text
//! v_new = v + strength * (v * |N| - sum(N))
//! ```
//!
//! High-frequency detail is amplified. Large strengths diverge quickly.

use mesh_types::TriangleMesh;

use super::relax::{relax, Kernel};
use super::{FilterResult, FilterScope};

/// Sharpen the channels selected by `scope` for `iterations` passes.
///
/// Adjacency is computed if the mesh does not have it.
///
/// # Example
///
/// ```
/// use mesh_types::unit_cube;
/// use mesh_scan::denoise::{filter_sharpen, FilterScope};
///
/// let mut cube = unit_cube();
/// let result = filter_sharpen(&mut cube, 1, 1.0, FilterScope::All);
/// assert_eq!(result.iterations_performed, 1);
/// assert!(result.max_displacement > 0.0);
/// ```
pub fn filter_sharpen(
    mesh: &mut TriangleMesh,
    iterations: u32,
    strength: f64,
    scope: FilterScope,
) -> FilterResult {
    relax(mesh, iterations, Kernel::Sharpen { strength }, scope)
}
