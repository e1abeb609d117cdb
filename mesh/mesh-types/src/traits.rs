//! Read-only views shared by algorithms that accept any indexed mesh.

use crate::{Aabb, Triangle};

/// Index-level access to a triangle mesh.
pub trait MeshTopology {
    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// Number of triangles.
    fn triangle_count(&self) -> usize;

    /// Triangles as vertex index triples.
    fn triangle_indices(&self) -> &[[u32; 3]];

    /// Triangle `index` with resolved positions, `None` if out of range.
    fn resolve_triangle(&self, index: usize) -> Option<Triangle>;

    /// Iterate resolved triangles in index order.
    fn iter_triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        (0..self.triangle_count()).filter_map(|i| self.resolve_triangle(i))
    }
}

/// Types with an axis-aligned extent.
pub trait MeshBounds {
    /// Bounding box, empty when there are no points.
    fn bounds(&self) -> Aabb;
}
