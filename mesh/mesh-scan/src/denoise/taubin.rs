//! Taubin smoothing (shrink-free).
//!
//! Each iteration is one Laplacian pass with a positive factor `lambda`
//! followed by one with a negative factor `mu`. With `|mu|` slightly larger
//! than `lambda` the inflating pass cancels the shrinkage of the smoothing
//! pass while high frequencies are still damped.
//!
//! # Reference
//!
//! Taubin, G. (1995). "A signal processing approach to fair surface design"
//! Proceedings of SIGGRAPH 1995.

use mesh_types::TriangleMesh;

use super::relax::{relax, Kernel};
use super::{FilterResult, FilterScope};

/// Parameters for Taubin smoothing.
///
/// # Example
///
/// ```
/// use mesh_scan::denoise::{TaubinParams, FilterScope};
///
/// let params = TaubinParams::default()
///     .with_iterations(10)
///     .with_scope(FilterScope::Vertex);
/// assert_eq!(params.lambda, 0.5);
/// assert_eq!(params.mu, -0.53);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaubinParams {
    /// Number of lambda/mu pass pairs. Default: 1.
    pub iterations: u32,
    /// Smoothing factor, positive. Default: 0.5.
    pub lambda: f64,
    /// Inflation factor, negative. Default: -0.53.
    pub mu: f64,
    /// Channels to filter. Default: all.
    pub scope: FilterScope,
}

impl Default for TaubinParams {
    fn default() -> Self {
        Self {
            iterations: 1,
            lambda: 0.5,
            mu: -0.53,
            scope: FilterScope::All,
        }
    }
}

impl TaubinParams {
    /// Sets the number of iterations.
    #[must_use]
    pub const fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the smoothing factor.
    #[must_use]
    pub const fn with_lambda(mut self, lambda: f64) -> Self {
        self.lambda = lambda;
        self
    }

    /// Sets the inflation factor.
    #[must_use]
    pub const fn with_mu(mut self, mu: f64) -> Self {
        self.mu = mu;
        self
    }

    /// Sets the filtered channels.
    #[must_use]
    pub const fn with_scope(mut self, scope: FilterScope) -> Self {
        self.scope = scope;
        self
    }
}

/// Apply Taubin smoothing in place.
///
/// `max_displacement` covers both passes of every iteration. Adjacency is
/// computed if absent, even when no iteration runs.
///
/// # Example
///
/// ```
/// use mesh_types::unit_cube;
/// use mesh_scan::denoise::{filter_smooth_taubin, TaubinParams};
///
/// let mut cube = unit_cube();
/// let result = filter_smooth_taubin(&mut cube, &TaubinParams::default().with_iterations(5));
/// assert_eq!(result.iterations_performed, 5);
/// ```
pub fn filter_smooth_taubin(mesh: &mut TriangleMesh, params: &TaubinParams) -> FilterResult {
    if !mesh.has_adjacency_list() {
        mesh.compute_adjacency_list();
    }
    let mut max_displacement = 0.0_f64;
    for _ in 0..params.iterations {
        let shrink = relax(mesh, 1, Kernel::Laplacian { lambda: params.lambda }, params.scope);
        let inflate = relax(mesh, 1, Kernel::Laplacian { lambda: params.mu }, params.scope);
        max_displacement = max_displacement
            .max(shrink.max_displacement)
            .max(inflate.max_displacement);
    }

    FilterResult {
        iterations_performed: params.iterations,
        max_displacement,
    }
}
