//! Neighbor-averaging mesh filters.
//!
//! Every filter runs a fixed number of passes over the vertex adjacency.
//! A pass reads only values from the previous pass, so results do not
//! depend on vertex order. A [`FilterScope`] picks which of positions,
//! normals and colors are rewritten; normals and colors are filtered only
//! when the mesh carries them.
//!
//! - **Sharpen** - Push vertices away from their neighbors
//! - **Simple** - Unweighted mean of a vertex and its neighbors
//! - **Laplacian** - Inverse-distance weighted relaxation (shrinks)
//! - **Taubin** - Alternating Laplacian passes that cancel shrinkage
//!
//! # Quick Start
//!
//! ```
//! use mesh_types::unit_cube;
//! use mesh_scan::denoise::{denoise_mesh, DenoiseParams};
//!
//! let mut mesh = unit_cube();
//! let result = denoise_mesh(&mut mesh, &DenoiseParams::for_scans())?;
//! println!("{}", result);
//! # Ok::<(), mesh_scan::ScanError>(())
//! ```
//!
//! # Algorithm Selection
//!
//! | Filter | Preserves Volume | Weighting | Effect |
//! |--------|------------------|-----------|--------|
//! | Sharpen | No | Uniform | Amplifies detail |
//! | Simple | No (shrinks) | Uniform | Strong blur |
//! | Laplacian | No (shrinks) | Inverse distance | Smooths |
//! | Taubin | Approximately | Inverse distance | Smooths |

mod average;
mod laplacian;
mod relax;
mod sharpen;
mod taubin;

pub use average::filter_smooth_simple;
pub use laplacian::filter_smooth_laplacian;
pub use sharpen::filter_sharpen;
pub use taubin::{filter_smooth_taubin, TaubinParams};

use mesh_types::TriangleMesh;
use tracing::debug;

use crate::error::{ScanError, ScanResult};

/// Which per-vertex attributes a filter rewrites.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FilterScope {
    /// Positions, and normals and colors when present.
    #[default]
    All,
    /// Positions only.
    Vertex,
    /// Vertex normals only.
    Normal,
    /// Vertex colors only.
    Color,
}

/// Outcome of a filter run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FilterResult {
    /// Number of iterations performed.
    pub iterations_performed: u32,

    /// Largest single vertex move in any pass. Zero when positions were not
    /// filtered.
    pub max_displacement: f64,
}

impl FilterResult {
    /// Returns true if any vertex moved noticeably.
    #[must_use]
    pub fn had_significant_change(&self) -> bool {
        self.max_displacement > 1e-10
    }
}

impl std::fmt::Display for FilterResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Filter: {} iterations, max displacement: {:.6}",
            self.iterations_performed, self.max_displacement
        )
    }
}

/// Filter to run and its factors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DenoiseMethod {
    /// Sharpening.
    Sharpen {
        /// Push-away factor. Default: 1.0.
        strength: f64,
    },

    /// Unweighted averaging.
    Simple,

    /// Inverse-distance Laplacian smoothing.
    Laplacian {
        /// Smoothing factor. Default: 0.5.
        lambda: f64,
    },

    /// Taubin shrink-free smoothing.
    Taubin {
        /// Smoothing factor. Default: 0.5.
        lambda: f64,
        /// Inflation factor. Default: -0.53.
        mu: f64,
    },
}

impl Default for DenoiseMethod {
    fn default() -> Self {
        Self::Taubin {
            lambda: 0.5,
            mu: -0.53,
        }
    }
}

/// Parameters for [`denoise_mesh`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DenoiseParams {
    /// The filter to run.
    pub method: DenoiseMethod,

    /// Number of iterations. Default: 5.
    pub iterations: u32,

    /// Channels to filter. Default: all.
    pub scope: FilterScope,
}

impl Default for DenoiseParams {
    fn default() -> Self {
        Self {
            method: DenoiseMethod::default(),
            iterations: 5,
            scope: FilterScope::All,
        }
    }
}

impl DenoiseParams {
    /// Creates new parameters with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sharpening with strength 1.
    #[must_use]
    pub const fn sharpen(iterations: u32) -> Self {
        Self {
            method: DenoiseMethod::Sharpen { strength: 1.0 },
            iterations,
            scope: FilterScope::All,
        }
    }

    /// Unweighted averaging.
    #[must_use]
    pub const fn simple(iterations: u32) -> Self {
        Self {
            method: DenoiseMethod::Simple,
            iterations,
            scope: FilterScope::All,
        }
    }

    /// Laplacian smoothing with lambda 0.5.
    #[must_use]
    pub const fn laplacian(iterations: u32) -> Self {
        Self {
            method: DenoiseMethod::Laplacian { lambda: 0.5 },
            iterations,
            scope: FilterScope::All,
        }
    }

    /// Taubin smoothing with lambda 0.5 and mu -0.53.
    #[must_use]
    pub const fn taubin(iterations: u32) -> Self {
        Self {
            method: DenoiseMethod::Taubin {
                lambda: 0.5,
                mu: -0.53,
            },
            iterations,
            scope: FilterScope::All,
        }
    }

    /// Parameters suited to raw scan data.
    ///
    /// Taubin smoothing on positions only, so scanner normals and colors
    /// survive untouched.
    #[must_use]
    pub const fn for_scans() -> Self {
        Self {
            method: DenoiseMethod::Taubin {
                lambda: 0.5,
                mu: -0.53,
            },
            iterations: 10,
            scope: FilterScope::Vertex,
        }
    }

    /// Minimal smoothing that keeps fine detail.
    #[must_use]
    pub const fn gentle() -> Self {
        Self {
            method: DenoiseMethod::Laplacian { lambda: 0.25 },
            iterations: 2,
            scope: FilterScope::All,
        }
    }

    /// Sets the filter.
    #[must_use]
    pub const fn with_method(mut self, method: DenoiseMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets the number of iterations.
    #[must_use]
    pub const fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the filtered channels.
    #[must_use]
    pub const fn with_scope(mut self, scope: FilterScope) -> Self {
        self.scope = scope;
        self
    }
}

/// Run the filter described by `params` in place.
///
/// A mesh without triangles has no adjacency to filter over and is
/// returned unchanged with zero iterations performed.
///
/// # Errors
///
/// [`ScanError::EmptyMesh`] if the mesh has no vertices.
///
/// # Example
///
/// ```
/// use mesh_types::unit_cube;
/// use mesh_scan::denoise::{denoise_mesh, DenoiseParams};
///
/// let mut mesh = unit_cube();
/// let result = denoise_mesh(&mut mesh, &DenoiseParams::laplacian(3))?;
/// assert_eq!(result.iterations_performed, 3);
/// # Ok::<(), mesh_scan::ScanError>(())
/// ```
pub fn denoise_mesh(mesh: &mut TriangleMesh, params: &DenoiseParams) -> ScanResult<FilterResult> {
    if mesh.vertices.is_empty() {
        return Err(ScanError::EmptyMesh);
    }
    if mesh.triangles.is_empty() {
        return Ok(FilterResult::default());
    }

    let result = match params.method {
        DenoiseMethod::Sharpen { strength } => {
            filter_sharpen(mesh, params.iterations, strength, params.scope)
        }
        DenoiseMethod::Simple => filter_smooth_simple(mesh, params.iterations, params.scope),
        DenoiseMethod::Laplacian { lambda } => {
            filter_smooth_laplacian(mesh, params.iterations, lambda, params.scope)
        }
        DenoiseMethod::Taubin { lambda, mu } => {
            let taubin = TaubinParams {
                iterations: params.iterations,
                lambda,
                mu,
                scope: params.scope,
            };
            filter_smooth_taubin(mesh, &taubin)
        }
    };

    debug!("{}", result);
    Ok(result)
}
