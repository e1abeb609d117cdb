//! Topology cleanup passes.
//!
//! Every pass compacts the mesh arrays in place, keeps present attribute
//! arrays in step with their parent array and reports how many elements it
//! removed. Finding nothing to remove is a success with a zero count. The
//! adjacency cache is rebuilt only if it was present and the pass changed
//! something.

use hashbrown::{HashMap, HashSet};
use mesh_types::TriangleMesh;
use tracing::{debug, info};

use crate::adjacency::EdgeTriangleMap;

/// Which cleanup passes [`repair_mesh`] runs.
///
/// # Example
///
/// ```
/// use mesh_repair::RepairParams;
///
/// let params = RepairParams::default();
/// assert!(params.merge_duplicate_vertices);
/// assert!(!params.repair_non_manifold_edges);
///
/// let params = RepairParams::for_scans().with_remove_unreferenced(false);
/// assert!(params.repair_non_manifold_edges);
/// assert!(!params.remove_unreferenced);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)] // one switch per pass
pub struct RepairParams {
    /// Drop triangles that repeat a vertex index.
    ///
    /// Default: `true`
    pub remove_degenerate: bool,

    /// Merge vertices with bit-identical coordinates.
    ///
    /// Default: `true`
    pub merge_duplicate_vertices: bool,

    /// Drop triangles over the same vertex set as an earlier one.
    ///
    /// Default: `true`
    pub remove_duplicate_triangles: bool,

    /// Drop vertices no triangle references.
    ///
    /// Default: `true`
    pub remove_unreferenced: bool,

    /// Delete the smallest triangles around edges shared by more than two.
    ///
    /// Default: `false`, since it discards geometry.
    pub repair_non_manifold_edges: bool,
}

impl Default for RepairParams {
    fn default() -> Self {
        Self {
            remove_degenerate: true,
            merge_duplicate_vertices: true,
            remove_duplicate_triangles: true,
            remove_unreferenced: true,
            repair_non_manifold_edges: false,
        }
    }
}

impl RepairParams {
    /// Every pass enabled, including non-manifold edge repair.
    ///
    /// Raw scans routinely contain fins and overlapping patches.
    #[must_use]
    pub fn for_scans() -> Self {
        Self {
            repair_non_manifold_edges: true,
            ..Default::default()
        }
    }

    /// Index-only passes. Vertices are never merged or dropped, so external
    /// per-vertex data stays aligned.
    #[must_use]
    pub fn triangles_only() -> Self {
        Self {
            merge_duplicate_vertices: false,
            remove_unreferenced: false,
            ..Default::default()
        }
    }

    /// Enable or disable degenerate triangle removal.
    #[must_use]
    pub fn with_remove_degenerate(mut self, enabled: bool) -> Self {
        self.remove_degenerate = enabled;
        self
    }

    /// Enable or disable duplicate vertex merging.
    #[must_use]
    pub fn with_merge_duplicate_vertices(mut self, enabled: bool) -> Self {
        self.merge_duplicate_vertices = enabled;
        self
    }

    /// Enable or disable duplicate triangle removal.
    #[must_use]
    pub fn with_remove_duplicate_triangles(mut self, enabled: bool) -> Self {
        self.remove_duplicate_triangles = enabled;
        self
    }

    /// Enable or disable unreferenced vertex removal.
    #[must_use]
    pub fn with_remove_unreferenced(mut self, enabled: bool) -> Self {
        self.remove_unreferenced = enabled;
        self
    }

    /// Enable or disable non-manifold edge repair.
    #[must_use]
    pub fn with_repair_non_manifold_edges(mut self, enabled: bool) -> Self {
        self.repair_non_manifold_edges = enabled;
        self
    }
}

/// Merge vertices with exactly equal coordinates into their first
/// occurrence.
///
/// `-0.0` and `0.0` compare equal. Triangles are remapped to the surviving
/// vertex; the triangles themselves are kept even if they become
/// degenerate.
///
/// Returns the number of vertices removed.
///
/// # Example
///
/// ```
/// use mesh_types::{TriangleMesh, Point3};
/// use mesh_repair::remove_duplicated_vertices;
///
/// let mut mesh = TriangleMesh::from_parts(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0), // same as 1
///         Point3::new(1.0, 1.0, 0.0),
///     ],
///     vec![[0, 1, 2], [3, 4, 2]],
/// );
///
/// assert_eq!(remove_duplicated_vertices(&mut mesh), 1);
/// assert_eq!(mesh.triangles, vec![[0, 1, 2], [1, 3, 2]]);
/// ```
#[allow(clippy::cast_possible_truncation)] // vertex counts fit in u32 indices
pub fn remove_duplicated_vertices(mesh: &mut TriangleMesh) -> usize {
    let vertex_count = mesh.vertices.len();
    let mut first_seen: HashMap<[u64; 3], u32> = HashMap::with_capacity(vertex_count);
    let mut keep = vec![false; vertex_count];
    let mut old_to_new = vec![0_u32; vertex_count];
    let mut next = 0_u32;

    for (i, v) in mesh.vertices.iter().enumerate() {
        let key = [coord_bits(v.x), coord_bits(v.y), coord_bits(v.z)];
        if let Some(&existing) = first_seen.get(&key) {
            old_to_new[i] = old_to_new[existing as usize];
        } else {
            first_seen.insert(key, i as u32);
            keep[i] = true;
            old_to_new[i] = next;
            next += 1;
        }
    }

    let removed = vertex_count - next as usize;
    if removed > 0 {
        compact_vertices(mesh, &keep, &old_to_new);
    }
    debug!("Removed {} duplicated vertices", removed);
    removed
}

/// Bits of a coordinate with negative zero folded into positive zero.
#[inline]
fn coord_bits(x: f64) -> u64 {
    (x + 0.0).to_bits()
}

/// Drop triangles over the same three vertices as an earlier triangle.
///
/// Rotations of a triangle are duplicates. A reversed winding is a
/// different triangle and is kept. The first occurrence wins.
///
/// Returns the number of triangles removed.
///
/// # Example
///
/// ```
/// use mesh_types::{TriangleMesh, Point3};
/// use mesh_repair::remove_duplicated_triangles;
///
/// let mut mesh = TriangleMesh::from_parts(
///     vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
///     vec![[0, 1, 2], [1, 2, 0], [2, 1, 0]],
/// );
///
/// assert_eq!(remove_duplicated_triangles(&mut mesh), 1);
/// assert_eq!(mesh.triangles, vec![[0, 1, 2], [2, 1, 0]]);
/// ```
pub fn remove_duplicated_triangles(mesh: &mut TriangleMesh) -> usize {
    let mut seen: HashSet<[u32; 3]> = HashSet::with_capacity(mesh.triangles.len());
    let keep: Vec<bool> = mesh
        .triangles
        .iter()
        .map(|&t| seen.insert(canonical_triangle(t)))
        .collect();

    let removed = compact_triangles(mesh, &keep);
    debug!("Removed {} duplicated triangles", removed);
    removed
}

/// Rotate so the smallest index comes first. Winding is preserved.
pub(crate) fn canonical_triangle(t: [u32; 3]) -> [u32; 3] {
    let start = if t[0] <= t[1] && t[0] <= t[2] {
        0
    } else if t[1] <= t[2] {
        1
    } else {
        2
    };
    [t[start], t[(start + 1) % 3], t[(start + 2) % 3]]
}

/// Drop vertices that no triangle references and remap indices.
///
/// Returns the number of vertices removed.
///
/// # Example
///
/// ```
/// use mesh_types::{TriangleMesh, Point3};
/// use mesh_repair::remove_unreferenced_vertices;
///
/// let mut mesh = TriangleMesh::from_parts(
///     vec![
///         Point3::new(9.0, 9.0, 9.0), // unused
///         Point3::origin(),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.0, 1.0, 0.0),
///     ],
///     vec![[1, 2, 3]],
/// );
///
/// assert_eq!(remove_unreferenced_vertices(&mut mesh), 1);
/// assert_eq!(mesh.triangles, vec![[0, 1, 2]]);
/// ```
pub fn remove_unreferenced_vertices(mesh: &mut TriangleMesh) -> usize {
    let vertex_count = mesh.vertices.len();
    let mut keep = vec![false; vertex_count];
    for t in &mesh.triangles {
        for &v in t {
            keep[v as usize] = true;
        }
    }

    let mut old_to_new = vec![0_u32; vertex_count];
    let mut next = 0_u32;
    for (slot, &k) in old_to_new.iter_mut().zip(&keep) {
        if k {
            *slot = next;
            next += 1;
        }
    }

    let removed = vertex_count - next as usize;
    if removed > 0 {
        compact_vertices(mesh, &keep, &old_to_new);
    }
    debug!("Removed {} unreferenced vertices", removed);
    removed
}

/// Drop triangles that use the same vertex index twice.
///
/// Triangles with three distinct but collinear vertices are kept.
///
/// Returns the number of triangles removed.
pub fn remove_degenerate_triangles(mesh: &mut TriangleMesh) -> usize {
    let keep: Vec<bool> = mesh
        .triangles
        .iter()
        .map(|&[a, b, c]| a != b && b != c && c != a)
        .collect();

    let removed = compact_triangles(mesh, &keep);
    debug!("Removed {} degenerate triangles", removed);
    removed
}

/// Make every edge manifold by deleting triangles.
///
/// Each round scans the non-manifold edges in key order. For an edge with
/// more than two live incident triangles, the smallest-area ones are
/// tombstoned until two remain. Tombstoned triangles are then compacted out
/// and the round repeats, since deletions can change other edges. Zero-area
/// triangles are only removed if tombstoned.
///
/// Returns the total number of triangles removed. Afterwards every edge
/// has one or two incident triangles.
///
/// # Example
///
/// ```
/// use mesh_types::{TriangleMesh, Point3};
/// use mesh_repair::{remove_non_manifold_edges, is_edge_manifold};
///
/// // Three fins on the edge 0-1; the smallest one goes.
/// let mut mesh = TriangleMesh::from_parts(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 0.0, 0.0),
///         Point3::new(0.5, 1.0, 0.0),
///         Point3::new(0.5, -1.0, 0.0),
///         Point3::new(0.5, 0.0, 0.1),
///     ],
///     vec![[0, 1, 2], [1, 0, 3], [0, 1, 4]],
/// );
///
/// assert_eq!(remove_non_manifold_edges(&mut mesh), 1);
/// assert!(is_edge_manifold(&mesh, true));
/// assert_eq!(mesh.triangles, vec![[0, 1, 2], [1, 0, 3]]);
/// ```
pub fn remove_non_manifold_edges(mesh: &mut TriangleMesh) -> usize {
    let had_adjacency = mesh.has_adjacency_list();
    let initial = mesh.triangles.len();
    let (_, mut areas) = mesh.surface_area_with_triangle_areas();

    loop {
        let map = EdgeTriangleMap::build(&mesh.triangles);
        let bad_edges = map.non_manifold_edges(true);
        if bad_edges.is_empty() {
            break;
        }

        let mut deleted = vec![false; mesh.triangles.len()];
        for (a, b) in bad_edges {
            let Some(incident) = map.triangles_for_edge(a, b) else {
                continue;
            };
            let live = incident.iter().filter(|&&t| !deleted[t]).count();
            for _ in 2..live {
                let smallest = incident
                    .iter()
                    .copied()
                    .filter(|&t| !deleted[t])
                    .min_by(|&x, &y| areas[x].total_cmp(&areas[y]));
                match smallest {
                    Some(t) => deleted[t] = true,
                    None => break,
                }
            }
        }

        let keep: Vec<bool> = deleted.iter().map(|d| !d).collect();
        retain_by_mask(&mut areas, &keep);
        if compact_triangles_quiet(mesh, &keep) == 0 {
            break;
        }
    }

    let removed = initial - mesh.triangles.len();
    if removed > 0 && had_adjacency {
        mesh.compute_adjacency_list();
    }
    debug!("Removed {} triangles around non-manifold edges", removed);
    removed
}

/// Run the enabled cleanup passes in a fixed order.
///
/// Order: degenerate triangles, duplicate vertices, duplicate triangles,
/// non-manifold edges, unreferenced vertices. Merging vertices can create
/// new degenerate triangles, so degenerate removal runs again after the
/// merge when both passes are enabled.
///
/// # Example
///
/// ```
/// use mesh_types::{unit_cube, TriangleMesh};
/// use mesh_repair::{repair_mesh, RepairParams};
///
/// let mut soup = unit_cube();
/// soup += &unit_cube();
///
/// let summary = repair_mesh(&mut soup, &RepairParams::default());
/// assert_eq!(summary.duplicate_vertices_removed, 8);
/// assert_eq!(summary.duplicate_triangles_removed, 12);
/// assert_eq!(soup.vertices.len(), 8);
/// assert_eq!(soup.triangles.len(), 12);
/// ```
pub fn repair_mesh(mesh: &mut TriangleMesh, params: &RepairParams) -> RepairSummary {
    let mut summary = RepairSummary {
        initial_vertices: mesh.vertices.len(),
        initial_triangles: mesh.triangles.len(),
        ..RepairSummary::default()
    };

    if params.remove_degenerate {
        summary.degenerate_triangles_removed += remove_degenerate_triangles(mesh);
    }
    if params.merge_duplicate_vertices {
        summary.duplicate_vertices_removed = remove_duplicated_vertices(mesh);
        if params.remove_degenerate && summary.duplicate_vertices_removed > 0 {
            summary.degenerate_triangles_removed += remove_degenerate_triangles(mesh);
        }
    }
    if params.remove_duplicate_triangles {
        summary.duplicate_triangles_removed = remove_duplicated_triangles(mesh);
    }
    if params.repair_non_manifold_edges {
        summary.non_manifold_triangles_removed = remove_non_manifold_edges(mesh);
    }
    if params.remove_unreferenced {
        summary.unreferenced_vertices_removed = remove_unreferenced_vertices(mesh);
    }

    summary.final_vertices = mesh.vertices.len();
    summary.final_triangles = mesh.triangles.len();
    info!("{}", summary);
    summary
}

/// Counts reported by [`repair_mesh`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairSummary {
    /// Vertices before repair.
    pub initial_vertices: usize,
    /// Triangles before repair.
    pub initial_triangles: usize,
    /// Vertices after repair.
    pub final_vertices: usize,
    /// Triangles after repair.
    pub final_triangles: usize,
    /// Triangles dropped for repeating a vertex index.
    pub degenerate_triangles_removed: usize,
    /// Vertices merged into an identical earlier vertex.
    pub duplicate_vertices_removed: usize,
    /// Triangles dropped as repeats of an earlier triangle.
    pub duplicate_triangles_removed: usize,
    /// Triangles deleted to make edges manifold.
    pub non_manifold_triangles_removed: usize,
    /// Vertices dropped for having no triangle.
    pub unreferenced_vertices_removed: usize,
}

impl RepairSummary {
    /// True if any pass removed something.
    #[must_use]
    pub fn had_changes(&self) -> bool {
        self.degenerate_triangles_removed > 0
            || self.duplicate_vertices_removed > 0
            || self.duplicate_triangles_removed > 0
            || self.non_manifold_triangles_removed > 0
            || self.unreferenced_vertices_removed > 0
    }
}

impl std::fmt::Display for RepairSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Repair: {} verts ({} merged, {} unreferenced), {} triangles ({} degenerate, {} duplicate, {} non-manifold)",
            self.final_vertices,
            self.duplicate_vertices_removed,
            self.unreferenced_vertices_removed,
            self.final_triangles,
            self.degenerate_triangles_removed,
            self.duplicate_triangles_removed,
            self.non_manifold_triangles_removed
        )
    }
}

/// Keep the vertices marked in `keep`, then rewrite triangle indices
/// through `old_to_new`.
fn compact_vertices(mesh: &mut TriangleMesh, keep: &[bool], old_to_new: &[u32]) {
    let had_normals = mesh.has_vertex_normals();
    let had_colors = mesh.has_vertex_colors();
    let had_adjacency = mesh.has_adjacency_list();

    retain_by_mask(&mut mesh.vertices, keep);
    if had_normals {
        retain_by_mask(&mut mesh.vertex_normals, keep);
    }
    if had_colors {
        retain_by_mask(&mut mesh.vertex_colors, keep);
    }
    for t in &mut mesh.triangles {
        for v in t.iter_mut() {
            *v = old_to_new[*v as usize];
        }
    }
    if had_adjacency {
        mesh.compute_adjacency_list();
    }
}

/// Keep the triangles marked in `keep`; rebuild adjacency if anything went.
fn compact_triangles(mesh: &mut TriangleMesh, keep: &[bool]) -> usize {
    let had_adjacency = mesh.has_adjacency_list();
    let removed = compact_triangles_quiet(mesh, keep);
    if removed > 0 && had_adjacency {
        mesh.compute_adjacency_list();
    }
    removed
}

fn compact_triangles_quiet(mesh: &mut TriangleMesh, keep: &[bool]) -> usize {
    let before = mesh.triangles.len();
    let had_normals = mesh.has_triangle_normals();
    retain_by_mask(&mut mesh.triangles, keep);
    if had_normals {
        retain_by_mask(&mut mesh.triangle_normals, keep);
    }
    before - mesh.triangles.len()
}

fn retain_by_mask<T>(values: &mut Vec<T>, keep: &[bool]) {
    let mut i = 0;
    values.retain(|_| {
        let k = keep[i];
        i += 1;
        k
    });
}
