//! Error types for filtering and sampling operations.

use thiserror::Error;

/// Result type for scan processing operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Errors that can occur during filtering and sampling.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScanError {
    /// Mesh has no vertices, or sampling was asked of a mesh without triangles.
    #[error("mesh is empty")]
    EmptyMesh,

    /// Not enough candidate points for the requested operation.
    #[error("insufficient points: need at least {required}, got {actual}")]
    InsufficientPoints {
        /// Minimum number of points required.
        required: usize,
        /// Actual number of points provided.
        actual: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {reason}")]
    InvalidParameter {
        /// Description of why the parameter is invalid.
        reason: String,
    },

    /// The mesh failed a structural check.
    #[error("repair error: {0}")]
    Repair(#[from] mesh_repair::RepairError),
}

impl ScanError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            reason: reason.into(),
        }
    }
}
