//! Topology cleanup and analysis for triangle meshes.
//!
//! This crate provides tools for:
//! - Cleanup passes (duplicate vertices and triangles, degenerate triangles,
//!   unreferenced vertices, non-manifold edges)
//! - Manifold queries on edges and vertices, and the Euler characteristic
//! - Consistent triangle orientation
//! - Triangle-triangle, self and mesh-mesh intersection tests
//! - A combined validation report
//!
//! Every pass operates in place on a [`mesh_types::TriangleMesh`] and keeps
//! per-vertex and per-triangle attributes aligned with the geometry they
//! describe. An adjacency list is rebuilt after a structural change only if
//! the mesh carried one beforehand.
//!
//! # Example
//!
//! ```
//! use mesh_types::{TriangleMesh, Point3};
//! use mesh_repair::{validate_mesh, repair_mesh, RepairParams};
//!
//! let mut mesh = TriangleMesh::from_parts(
//!     vec![
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.0),
//!         Point3::new(0.0, 1.0, 0.0),
//!         Point3::new(0.0, 1.0, 0.0),
//!     ],
//!     vec![[0, 1, 2], [0, 1, 3]],
//! );
//!
//! let report = validate_mesh(&mesh)?;
//! assert_eq!(report.triangle_count, 2);
//!
//! let summary = repair_mesh(&mut mesh, &RepairParams::default());
//! assert_eq!(summary.duplicate_vertices_removed, 1);
//! assert_eq!(summary.duplicate_triangles_removed, 1);
//! assert_eq!(mesh.triangles.len(), 1);
//! # Ok::<(), mesh_repair::RepairError>(())
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod adjacency;
mod error;
pub mod intersect;
pub mod manifold;
mod repair;
mod validate;
pub mod winding;

pub use adjacency::{edge_key, EdgeTriangleMap};
pub use error::{RepairError, RepairResult};
pub use repair::{
    remove_degenerate_triangles, remove_duplicated_triangles, remove_duplicated_vertices,
    remove_non_manifold_edges, remove_unreferenced_vertices, repair_mesh, RepairParams,
    RepairSummary,
};
pub use validate::{
    check_indices, validate_mesh, validate_mesh_with_options, MeshReport, ValidationOptions,
};

pub use intersect::{
    get_self_intersecting_triangles, is_bounding_box_intersecting, is_intersecting,
    is_self_intersecting, triangles_intersect,
};
pub use manifold::{
    euler_poincare_characteristic, get_non_manifold_edges, get_non_manifold_vertices,
    is_edge_manifold, is_vertex_manifold,
};
pub use winding::{is_orientable, orient_triangles, try_orient_triangles};
