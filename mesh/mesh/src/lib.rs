//! Triangle mesh toolkit.
//!
//! This umbrella crate re-exports the mesh-* crates behind one dependency.
//!
//! # Quick Start
//!
//! ```
//! use mesh::prelude::*;
//!
//! let mut mesh = unit_cube();
//! mesh.compute_vertex_normals(true);
//!
//! // Validate and repair
//! let report = validate_mesh(&mesh)?;
//! assert!(report.is_closed_manifold());
//! let summary = repair_mesh(&mut mesh, &RepairParams::default());
//! assert_eq!(summary.final_triangles, 12);
//!
//! // Smooth and sample
//! denoise_mesh(&mut mesh, &DenoiseParams::gentle())?;
//! let cloud = sample_points_uniformly(&mesh, 256);
//! assert_eq!(cloud.len(), 256);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - `TriangleMesh`, `PointCloud`, `Triangle`, `Aabb`, normals and adjacency
//! - [`repair`] - Cleanup passes, manifold and orientation analysis,
//!   intersection tests, validation
//! - [`scan`] - Relaxation filters and point sampling
//!
//! # Feature Flags
//!
//! - `serde` - Serialize and deserialize the mesh containers

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![doc(html_root_url = "https://docs.rs/mesh/0.7.0")]

// =============================================================================
// Re-exports
// =============================================================================

/// Core containers: `TriangleMesh`, `PointCloud`, `Triangle`, `Aabb`.
pub use mesh_types as types;

/// Topology cleanup, manifold and orientation analysis, validation.
pub use mesh_repair as repair;

/// Relaxation filters and surface point sampling.
pub use mesh_scan as scan;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for mesh processing.
///
/// # Usage
///
/// ```
/// use mesh::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use mesh_types::{
        unit_cube, Aabb, MeshBounds, MeshTopology, Point3, PointCloud, Triangle, TriangleMesh,
        Vector3,
    };

    // Repair and analysis
    pub use mesh_repair::{
        is_edge_manifold, is_orientable, is_vertex_manifold, orient_triangles, repair_mesh,
        validate_mesh, MeshReport, RepairParams,
    };

    // Filtering and sampling
    pub use mesh_scan::denoise::{denoise_mesh, DenoiseParams, FilterScope};
    pub use mesh_scan::sample::{
        sample_points_poisson_disk, sample_points_uniformly, PoissonDiskParams,
    };
}

// =============================================================================
// Tests
// =============================================================================
