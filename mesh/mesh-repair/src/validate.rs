//! Mesh validation and health reporting.
//!
//! Collects the topology queries of this crate into one report so callers
//! can decide which cleanup passes a mesh needs.

use hashbrown::HashSet;
use mesh_types::TriangleMesh;

use crate::adjacency::EdgeTriangleMap;
use crate::error::{RepairError, RepairResult};
use crate::intersect::is_self_intersecting;
use crate::manifold::{euler_poincare_characteristic, get_non_manifold_vertices};
use crate::repair::canonical_triangle;
use crate::winding::is_orientable;

/// Report of mesh validation results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)] // one flag per topological property
pub struct MeshReport {
    /// Total number of vertices.
    pub vertex_count: usize,
    /// Total number of triangles.
    pub triangle_count: usize,
    /// Number of distinct undirected edges.
    pub edge_count: usize,

    /// Edges with exactly one incident triangle.
    pub boundary_edge_count: usize,
    /// Edges with more than two incident triangles.
    pub non_manifold_edge_count: usize,
    /// Vertices whose triangle fan is split into several sheets.
    pub non_manifold_vertex_count: usize,
    /// Triangles repeating a vertex index.
    pub degenerate_triangle_count: usize,
    /// Triangles over the same vertex set as an earlier triangle.
    pub duplicate_triangle_count: usize,

    /// `V + F - E`.
    pub euler_characteristic: i64,

    /// No edge has more than two triangles.
    pub is_edge_manifold: bool,
    /// Every vertex fan is a single sheet.
    pub is_vertex_manifold: bool,
    /// No boundary edges.
    pub is_watertight: bool,
    /// A consistent winding exists. `None` when not checked.
    pub is_orientable: Option<bool>,
    /// Two non-adjacent triangles intersect. `None` when not checked.
    pub is_self_intersecting: Option<bool>,
}

impl MeshReport {
    /// Closed, manifold and orientable.
    #[must_use]
    pub fn is_closed_manifold(&self) -> bool {
        self.is_watertight
            && self.is_edge_manifold
            && self.is_vertex_manifold
            && self.is_orientable != Some(false)
    }

    /// True if any defect was counted or detected.
    #[must_use]
    pub fn has_issues(&self) -> bool {
        self.issue_count() > 0
            || self.is_orientable == Some(false)
            || self.is_self_intersecting == Some(true)
    }

    /// Sum of the defect counters.
    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.boundary_edge_count
            + self.non_manifold_edge_count
            + self.non_manifold_vertex_count
            + self.degenerate_triangle_count
            + self.duplicate_triangle_count
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

fn checked(flag: Option<bool>) -> &'static str {
    flag.map_or("Not checked", yes_no)
}

impl std::fmt::Display for MeshReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Mesh Report:")?;
        writeln!(f, "  Vertices: {}", self.vertex_count)?;
        writeln!(f, "  Triangles: {}", self.triangle_count)?;
        writeln!(f, "  Edges: {}", self.edge_count)?;
        writeln!(f, "  Euler characteristic: {}", self.euler_characteristic)?;
        writeln!(f)?;
        writeln!(f, "  Status:")?;
        writeln!(f, "    Watertight: {}", yes_no(self.is_watertight))?;
        writeln!(f, "    Edge manifold: {}", yes_no(self.is_edge_manifold))?;
        writeln!(f, "    Vertex manifold: {}", yes_no(self.is_vertex_manifold))?;
        writeln!(f, "    Orientable: {}", checked(self.is_orientable))?;
        writeln!(f, "    Self-intersecting: {}", checked(self.is_self_intersecting))?;

        if self.issue_count() > 0 {
            writeln!(f)?;
            writeln!(f, "  Issues:")?;
            let counters = [
                ("Boundary edges", self.boundary_edge_count),
                ("Non-manifold edges", self.non_manifold_edge_count),
                ("Non-manifold vertices", self.non_manifold_vertex_count),
                ("Degenerate triangles", self.degenerate_triangle_count),
                ("Duplicate triangles", self.duplicate_triangle_count),
            ];
            for (label, count) in counters.into_iter().filter(|&(_, c)| c > 0) {
                writeln!(f, "    {label}: {count}")?;
            }
        }

        Ok(())
    }
}

/// Options for mesh validation.
///
/// # Example
///
/// ```
/// use mesh_repair::ValidationOptions;
///
/// let options = ValidationOptions::thorough();
/// assert!(options.check_self_intersection);
///
/// let options = ValidationOptions::default().with_check_orientation(false);
/// assert!(!options.check_orientation);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Run orientation propagation.
    ///
    /// Default: `true`
    pub check_orientation: bool,
    /// Test all non-adjacent triangle pairs for intersection. Quadratic.
    ///
    /// Default: `false`
    pub check_self_intersection: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            check_orientation: true,
            check_self_intersection: false,
        }
    }
}

impl ValidationOptions {
    /// Every check enabled.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            check_orientation: true,
            check_self_intersection: true,
        }
    }

    /// Enable or disable the orientation check.
    #[must_use]
    pub fn with_check_orientation(mut self, enabled: bool) -> Self {
        self.check_orientation = enabled;
        self
    }

    /// Enable or disable the self-intersection check.
    #[must_use]
    pub fn with_check_self_intersection(mut self, enabled: bool) -> Self {
        self.check_self_intersection = enabled;
        self
    }
}

/// Verify that every triangle index refers to an existing vertex.
///
/// # Errors
///
/// [`RepairError::InvalidIndex`] for the first offending index.
///
/// # Example
///
/// ```
/// use mesh_types::{TriangleMesh, Point3};
/// use mesh_repair::{check_indices, RepairError};
///
/// let mesh = TriangleMesh::from_parts(vec![Point3::origin(); 3], vec![[0, 1, 3]]);
/// assert_eq!(
///     check_indices(&mesh),
///     Err(RepairError::InvalidIndex { triangle: 0, index: 3, vertex_count: 3 })
/// );
/// ```
pub fn check_indices(mesh: &TriangleMesh) -> RepairResult<()> {
    let vertex_count = mesh.vertices.len();
    for (triangle, t) in mesh.triangles.iter().enumerate() {
        if let Some(&index) = t.iter().find(|&&v| v as usize >= vertex_count) {
            return Err(RepairError::InvalidIndex {
                triangle,
                index,
                vertex_count,
            });
        }
    }
    Ok(())
}

/// Validate a mesh with [`ValidationOptions::default`].
///
/// # Errors
///
/// [`RepairError::InvalidIndex`] if a triangle references a missing vertex.
///
/// # Example
///
/// ```
/// use mesh_types::{TriangleMesh, Point3};
/// use mesh_repair::validate_mesh;
///
/// let mesh = TriangleMesh::from_parts(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///     ],
///     vec![[0, 1, 2]],
/// );
///
/// let report = validate_mesh(&mesh)?;
/// assert_eq!(report.triangle_count, 1);
/// assert_eq!(report.boundary_edge_count, 3);
/// assert_eq!(report.euler_characteristic, 1);
/// # Ok::<(), mesh_repair::RepairError>(())
/// ```
pub fn validate_mesh(mesh: &TriangleMesh) -> RepairResult<MeshReport> {
    validate_mesh_with_options(mesh, &ValidationOptions::default())
}

/// Validate a mesh with custom options.
///
/// # Errors
///
/// [`RepairError::InvalidIndex`] if a triangle references a missing vertex.
pub fn validate_mesh_with_options(
    mesh: &TriangleMesh,
    options: &ValidationOptions,
) -> RepairResult<MeshReport> {
    check_indices(mesh)?;

    let edges = EdgeTriangleMap::build(&mesh.triangles);
    let non_manifold_edge_count = edges.iter().filter(|(_, tris)| tris.len() > 2).count();
    let non_manifold_vertex_count = get_non_manifold_vertices(mesh).len();

    let degenerate_triangle_count = mesh
        .triangles
        .iter()
        .filter(|&&[a, b, c]| a == b || b == c || c == a)
        .count();
    let mut seen: HashSet<[u32; 3]> = HashSet::with_capacity(mesh.triangles.len());
    let duplicate_triangle_count = mesh
        .triangles
        .iter()
        .filter(|&&t| !seen.insert(canonical_triangle(t)))
        .count();

    Ok(MeshReport {
        vertex_count: mesh.vertices.len(),
        triangle_count: mesh.triangles.len(),
        edge_count: edges.edge_count(),
        boundary_edge_count: edges.boundary_edge_count(),
        non_manifold_edge_count,
        non_manifold_vertex_count,
        degenerate_triangle_count,
        duplicate_triangle_count,
        euler_characteristic: euler_poincare_characteristic(mesh),
        is_edge_manifold: non_manifold_edge_count == 0,
        is_vertex_manifold: non_manifold_vertex_count == 0,
        is_watertight: edges.is_watertight(),
        is_orientable: options.check_orientation.then(|| is_orientable(mesh)),
        is_self_intersecting: options
            .check_self_intersection
            .then(|| is_self_intersecting(mesh)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::{unit_cube, Point3};

    fn single_triangle() -> TriangleMesh {
        TriangleMesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(10.0, 0.0, 0.0),
                Point3::new(0.0, 10.0, 0.0),
            ],
            vec![[0, 1, 2]],
        )
    }

    #[test]
    fn cube_report() {
        let report = validate_mesh_with_options(&unit_cube(), &ValidationOptions::thorough())
            .unwrap();
        assert_eq!(report.vertex_count, 8);
        assert_eq!(report.triangle_count, 12);
        assert_eq!(report.edge_count, 18);
        assert_eq!(report.euler_characteristic, 2);
        assert!(report.is_watertight);
        assert!(report.is_edge_manifold);
        assert!(report.is_vertex_manifold);
        assert_eq!(report.is_orientable, Some(true));
        assert_eq!(report.is_self_intersecting, Some(false));
        assert!(report.is_closed_manifold());
        assert!(!report.has_issues());
    }

    #[test]
    fn single_triangle_has_open_boundary() {
        let report = validate_mesh(&single_triangle()).unwrap();
        assert_eq!(report.boundary_edge_count, 3);
        assert!(!report.is_watertight);
        assert!(report.is_edge_manifold);
        assert_eq!(report.is_self_intersecting, None);
        assert!(report.has_issues());
        assert!(!report.is_closed_manifold());
    }

    #[test]
    fn counts_degenerate_and_duplicate_triangles() {
        let mut mesh = single_triangle();
        mesh.triangles.push([1, 2, 0]);
        mesh.triangles.push([0, 0, 1]);
        let report = validate_mesh(&mesh).unwrap();
        assert_eq!(report.duplicate_triangle_count, 1);
        assert_eq!(report.degenerate_triangle_count, 1);
        assert_eq!(report.issue_count(), 2);
    }

    #[test]
    fn reversed_winding_is_not_counted_as_duplicate() {
        let mut mesh = single_triangle();
        mesh.triangles.push([2, 1, 0]);
        let report = validate_mesh(&mesh).unwrap();
        assert_eq!(report.duplicate_triangle_count, 0);
    }

    #[test]
    fn invalid_index_is_an_error() {
        let mut mesh = single_triangle();
        mesh.triangles.push([0, 1, 7]);
        assert_eq!(
            validate_mesh(&mesh),
            Err(RepairError::InvalidIndex {
                triangle: 1,
                index: 7,
                vertex_count: 3
            })
        );
    }

    #[test]
    fn empty_mesh_is_valid() {
        let report = validate_mesh(&TriangleMesh::new()).unwrap();
        assert_eq!(report, MeshReport {
            is_edge_manifold: true,
            is_vertex_manifold: true,
            is_watertight: true,
            is_orientable: Some(true),
            ..MeshReport::default()
        });
    }

    #[test]
    fn report_display() {
        let report = validate_mesh(&single_triangle()).unwrap();
        let text = report.to_string();
        assert!(text.contains("Triangles: 1"));
        assert!(text.contains("Watertight: No"));
        assert!(text.contains("Boundary edges: 3"));
        assert!(text.contains("Self-intersecting: Not checked"));
    }
}
