//! Error types for mesh repair operations.

use thiserror::Error;

/// Result type for repair operations.
pub type RepairResult<T> = Result<T, RepairError>;

/// Errors that can occur during mesh repair and analysis.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepairError {
    /// Mesh has no vertices or no triangles.
    #[error("mesh is empty")]
    EmptyMesh,

    /// A triangle references a vertex that does not exist.
    #[error("triangle {triangle} references vertex {index} (mesh has {vertex_count} vertices)")]
    InvalidIndex {
        /// Triangle holding the bad index.
        triangle: usize,
        /// The invalid index.
        index: u32,
        /// Total number of vertices in the mesh.
        vertex_count: usize,
    },

    /// Triangle windings cannot be made consistent.
    #[error("mesh is not orientable: winding conflict at triangle {triangle}")]
    NonOrientable {
        /// Triangle at which propagation found a conflict.
        triangle: usize,
    },
}
