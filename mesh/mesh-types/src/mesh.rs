//! Indexed triangle mesh with optional per-vertex and per-triangle attributes.

use std::ops::{Add, AddAssign};

use hashbrown::HashSet;
use nalgebra::{Matrix3, Matrix4, Point3, Vector3, Vector4};

use crate::{Aabb, MeshBounds, MeshTopology, Triangle};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An indexed triangle mesh.
///
/// Attribute arrays run parallel to their parent array. An attribute is
/// present exactly when its length matches the parent length; there are no
/// separate flags. `adjacency_list` is a cache rebuilt by
/// [`TriangleMesh::compute_adjacency_list`] and is only considered present
/// while it has one entry per vertex.
///
/// # Example
///
/// ```
/// use mesh_types::{TriangleMesh, Point3};
///
/// let mut mesh = TriangleMesh::from_parts(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///     ],
///     vec![[0, 1, 2]],
/// );
///
/// assert!(mesh.has_triangles());
/// assert!(!mesh.has_vertex_normals());
///
/// mesh.compute_vertex_normals(true);
/// assert!(mesh.has_vertex_normals());
/// assert!((mesh.surface_area() - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TriangleMesh {
    /// Vertex positions. A vertex is identified by its index.
    pub vertices: Vec<Point3<f64>>,

    /// Per-vertex normals, parallel to `vertices` when present.
    pub vertex_normals: Vec<Vector3<f64>>,

    /// Per-vertex RGB colors in `[0, 1]`, parallel to `vertices` when present.
    pub vertex_colors: Vec<Vector3<f64>>,

    /// Triangles as vertex index triples, counter-clockwise seen from the
    /// front.
    pub triangles: Vec<[u32; 3]>,

    /// Per-triangle normals, parallel to `triangles` when present.
    pub triangle_normals: Vec<Vector3<f64>>,

    /// Neighbor sets per vertex, derived from `triangles`.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub adjacency_list: Vec<HashSet<u32>>,
}

impl TriangleMesh {
    /// Create an empty mesh.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh from positions and triangles, without attributes.
    #[must_use]
    pub fn from_parts(vertices: Vec<Point3<f64>>, triangles: Vec<[u32; 3]>) -> Self {
        Self {
            vertices,
            triangles,
            ..Self::default()
        }
    }

    /// Drop all geometry, attributes and the adjacency cache.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.vertex_normals.clear();
        self.vertex_colors.clear();
        self.triangles.clear();
        self.triangle_normals.clear();
        self.adjacency_list.clear();
    }

    /// True when the mesh has no vertices.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.has_vertices()
    }

    /// At least one vertex.
    #[inline]
    #[must_use]
    pub fn has_vertices(&self) -> bool {
        !self.vertices.is_empty()
    }

    /// At least one vertex and one triangle.
    #[inline]
    #[must_use]
    pub fn has_triangles(&self) -> bool {
        self.has_vertices() && !self.triangles.is_empty()
    }

    /// Vertex normals present for every vertex.
    #[inline]
    #[must_use]
    pub fn has_vertex_normals(&self) -> bool {
        self.has_vertices() && self.vertex_normals.len() == self.vertices.len()
    }

    /// Vertex colors present for every vertex.
    #[inline]
    #[must_use]
    pub fn has_vertex_colors(&self) -> bool {
        self.has_vertices() && self.vertex_colors.len() == self.vertices.len()
    }

    /// Triangle normals present for every triangle.
    #[inline]
    #[must_use]
    pub fn has_triangle_normals(&self) -> bool {
        self.has_triangles() && self.triangle_normals.len() == self.triangles.len()
    }

    /// Adjacency cache matches the current vertex count.
    #[inline]
    #[must_use]
    pub fn has_adjacency_list(&self) -> bool {
        self.has_vertices() && self.adjacency_list.len() == self.vertices.len()
    }

    /// Componentwise minimum of the vertices, or the origin when empty.
    #[must_use]
    pub fn min_bound(&self) -> Point3<f64> {
        if self.is_empty() {
            Point3::origin()
        } else {
            self.bounds().min
        }
    }

    /// Componentwise maximum of the vertices, or the origin when empty.
    #[must_use]
    pub fn max_bound(&self) -> Point3<f64> {
        if self.is_empty() {
            Point3::origin()
        } else {
            self.bounds().max
        }
    }

    /// Mean of the vertex positions, or the origin when empty.
    #[must_use]
    pub fn vertex_centroid(&self) -> Point3<f64> {
        if self.vertices.is_empty() {
            return Point3::origin();
        }
        let sum = self
            .vertices
            .iter()
            .fold(Vector3::zeros(), |acc, v| acc + v.coords);
        Point3::from(sum / self.vertices.len() as f64)
    }

    /// Apply a homogeneous transform.
    ///
    /// Positions are transformed as points (`w = 1`), vertex and triangle
    /// normals as directions (`w = 0`). Normals are not renormalized.
    pub fn transform(&mut self, transformation: &Matrix4<f64>) -> &mut Self {
        for v in &mut self.vertices {
            let p = transformation * v.to_homogeneous();
            *v = Point3::new(p.x, p.y, p.z);
        }
        let as_direction = |n: &mut Vector3<f64>| {
            let d = transformation * Vector4::new(n.x, n.y, n.z, 0.0);
            *n = d.xyz();
        };
        self.vertex_normals.iter_mut().for_each(as_direction);
        self.triangle_normals.iter_mut().for_each(as_direction);
        self
    }

    /// Shift every vertex by `offset`.
    pub fn translate(&mut self, offset: &Vector3<f64>) -> &mut Self {
        for v in &mut self.vertices {
            *v += offset;
        }
        self
    }

    /// Scale positions by `factor`, about the vertex centroid when `center`
    /// is set and about the origin otherwise.
    pub fn scale(&mut self, factor: f64, center: bool) -> &mut Self {
        let pivot = self.pivot(center);
        for v in &mut self.vertices {
            *v = pivot + (*v - pivot) * factor;
        }
        self
    }

    /// Rotate positions and normals by `rotation`, about the vertex
    /// centroid when `center` is set and about the origin otherwise.
    pub fn rotate(&mut self, rotation: &Matrix3<f64>, center: bool) -> &mut Self {
        let pivot = self.pivot(center);
        for v in &mut self.vertices {
            *v = pivot + rotation * (*v - pivot);
        }
        for n in self
            .vertex_normals
            .iter_mut()
            .chain(self.triangle_normals.iter_mut())
        {
            *n = rotation * *n;
        }
        self
    }

    fn pivot(&self, center: bool) -> Point3<f64> {
        if center {
            self.vertex_centroid()
        } else {
            Point3::origin()
        }
    }

    /// Append `other`, shifting its triangle indices past the current
    /// vertices.
    ///
    /// An attribute array survives only when both meshes carry it, or when
    /// `self` had nothing to attach it to. The adjacency cache is rebuilt
    /// if it was present.
    #[allow(clippy::cast_possible_truncation)] // vertex counts fit in u32 indices
    pub fn merge(&mut self, other: &Self) {
        if other.is_empty() {
            return;
        }
        let keep_vertex_normals =
            (!self.has_vertices() || self.has_vertex_normals()) && other.has_vertex_normals();
        let keep_vertex_colors =
            (!self.has_vertices() || self.has_vertex_colors()) && other.has_vertex_colors();
        let keep_triangle_normals = (!self.has_triangles() || self.has_triangle_normals())
            && other.has_triangle_normals();
        let had_adjacency = self.has_adjacency_list();

        if keep_vertex_normals {
            self.vertex_normals.truncate(self.vertices.len());
            self.vertex_normals.extend_from_slice(&other.vertex_normals);
        } else {
            self.vertex_normals.clear();
        }
        if keep_vertex_colors {
            self.vertex_colors.truncate(self.vertices.len());
            self.vertex_colors.extend_from_slice(&other.vertex_colors);
        } else {
            self.vertex_colors.clear();
        }
        if keep_triangle_normals {
            self.triangle_normals.truncate(self.triangles.len());
            self.triangle_normals
                .extend_from_slice(&other.triangle_normals);
        } else {
            self.triangle_normals.clear();
        }

        let shift = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.triangles.extend(
            other
                .triangles
                .iter()
                .map(|t| [t[0] + shift, t[1] + shift, t[2] + shift]),
        );

        if had_adjacency {
            self.compute_adjacency_list();
        }
    }

    /// Set every vertex color to `color`.
    pub fn paint_uniform_color(&mut self, color: Vector3<f64>) -> &mut Self {
        self.vertex_colors = vec![color; self.vertices.len()];
        self
    }

    /// Triangle `index` with resolved positions.
    ///
    /// Returns `None` if `index` is out of range. Panics if the triangle
    /// references a vertex that does not exist.
    #[must_use]
    pub fn triangle(&self, index: usize) -> Option<Triangle> {
        self.triangles.get(index).map(|t| self.resolve(t))
    }

    #[inline]
    fn resolve(&self, t: &[u32; 3]) -> Triangle {
        Triangle::new(
            self.vertices[t[0] as usize],
            self.vertices[t[1] as usize],
            self.vertices[t[2] as usize],
        )
    }

    /// Area of triangle `index`, zero if out of range.
    #[must_use]
    pub fn triangle_area(&self, index: usize) -> f64 {
        self.triangle(index).map_or(0.0, |t| t.area())
    }

    /// Supporting plane of triangle `index` as `(a, b, c, d)`.
    ///
    /// Zero for a degenerate or out-of-range triangle.
    #[must_use]
    pub fn triangle_plane(&self, index: usize) -> Vector4<f64> {
        self.triangle(index)
            .map_or_else(Vector4::zeros, |t| t.plane())
    }

    /// Sum of all triangle areas.
    #[must_use]
    pub fn surface_area(&self) -> f64 {
        self.triangles.iter().map(|t| self.resolve(t).area()).sum()
    }

    /// Total area together with the area of every triangle, in triangle
    /// order.
    #[must_use]
    pub fn surface_area_with_triangle_areas(&self) -> (f64, Vec<f64>) {
        let areas: Vec<f64> = self
            .triangles
            .iter()
            .map(|t| self.resolve(t).area())
            .collect();
        (areas.iter().sum(), areas)
    }
}

impl AddAssign<&TriangleMesh> for TriangleMesh {
    fn add_assign(&mut self, rhs: &TriangleMesh) {
        self.merge(rhs);
    }
}

impl Add<&TriangleMesh> for &TriangleMesh {
    type Output = TriangleMesh;

    fn add(self, rhs: &TriangleMesh) -> TriangleMesh {
        let mut out = self.clone();
        out.merge(rhs);
        out
    }
}

impl MeshTopology for TriangleMesh {
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    fn triangle_indices(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    fn resolve_triangle(&self, index: usize) -> Option<Triangle> {
        self.triangle(index)
    }
}

impl MeshBounds for TriangleMesh {
    fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter())
    }
}

/// Axis-aligned unit cube `[0, 1]^3` with 8 vertices and 12 outward-facing
/// triangles.
///
/// # Example
///
/// ```
/// use mesh_types::unit_cube;
///
/// let cube = unit_cube();
/// assert_eq!(cube.vertices.len(), 8);
/// assert_eq!(cube.triangles.len(), 12);
/// assert!((cube.surface_area() - 6.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn unit_cube() -> TriangleMesh {
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0), // 0
        Point3::new(1.0, 0.0, 0.0), // 1
        Point3::new(1.0, 1.0, 0.0), // 2
        Point3::new(0.0, 1.0, 0.0), // 3
        Point3::new(0.0, 0.0, 1.0), // 4
        Point3::new(1.0, 0.0, 1.0), // 5
        Point3::new(1.0, 1.0, 1.0), // 6
        Point3::new(0.0, 1.0, 1.0), // 7
    ];
    let triangles = vec![
        // z = 0
        [0, 2, 1],
        [0, 3, 2],
        // z = 1
        [4, 5, 6],
        [4, 6, 7],
        // y = 0
        [0, 1, 5],
        [0, 5, 4],
        // y = 1
        [3, 7, 6],
        [3, 6, 2],
        // x = 0
        [0, 4, 7],
        [0, 7, 3],
        // x = 1
        [1, 2, 6],
        [1, 6, 5],
    ];
    TriangleMesh::from_parts(vertices, triangles)
}
