//! Edge and vertex manifoldness, and the Euler characteristic.

use std::collections::VecDeque;

use hashbrown::{HashMap, HashSet};
use mesh_types::TriangleMesh;

use crate::adjacency::{edge_key, EdgeTriangleMap};

/// Edges with a non-manifold triangle count, sorted by key.
///
/// With `allow_boundary_edges`, edges used by one triangle are fine;
/// otherwise only edges used by exactly two are.
///
/// # Example
///
/// ```
/// use mesh_types::unit_cube;
/// use mesh_repair::get_non_manifold_edges;
///
/// assert!(get_non_manifold_edges(&unit_cube(), false).is_empty());
/// ```
#[must_use]
pub fn get_non_manifold_edges(mesh: &TriangleMesh, allow_boundary_edges: bool) -> Vec<(u32, u32)> {
    EdgeTriangleMap::build(&mesh.triangles).non_manifold_edges(allow_boundary_edges)
}

/// True when [`get_non_manifold_edges`] would be empty.
#[must_use]
pub fn is_edge_manifold(mesh: &TriangleMesh, allow_boundary_edges: bool) -> bool {
    EdgeTriangleMap::build(&mesh.triangles).is_edge_manifold(allow_boundary_edges)
}

/// Vertices whose triangle fan is not a single connected sheet, ascending.
///
/// For each vertex, the opposite edges of its incident triangles form the
/// link graph. The vertex is manifold when a breadth-first walk from any
/// link vertex reaches every other. Vertices without triangles are skipped.
///
/// # Example
///
/// ```
/// use mesh_types::{TriangleMesh, Point3};
/// use mesh_repair::get_non_manifold_vertices;
///
/// // Two triangles touching only at vertex 0 (a bow tie).
/// let mesh = TriangleMesh::from_parts(
///     vec![
///         Point3::new(0.0, 0.0, 0.0),
///         Point3::new(1.0, 1.0, 0.0),
///         Point3::new(-1.0, 1.0, 0.0),
///         Point3::new(1.0, -1.0, 0.0),
///         Point3::new(-1.0, -1.0, 0.0),
///     ],
///     vec![[0, 1, 2], [0, 4, 3]],
/// );
///
/// assert_eq!(get_non_manifold_vertices(&mesh), vec![0]);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)] // vertex counts fit in u32 indices
pub fn get_non_manifold_vertices(mesh: &TriangleMesh) -> Vec<u32> {
    let mut vertex_to_triangles: Vec<Vec<usize>> = vec![Vec::new(); mesh.vertices.len()];
    for (tidx, t) in mesh.triangles.iter().enumerate() {
        for &v in t {
            let incident = &mut vertex_to_triangles[v as usize];
            if incident.last() != Some(&tidx) {
                incident.push(tidx);
            }
        }
    }

    let mut non_manifold = Vec::new();
    for (vidx, incident) in vertex_to_triangles.iter().enumerate() {
        let pivot = vidx as u32;
        let mut link: HashMap<u32, HashSet<u32>> = HashMap::new();
        for &tidx in incident {
            if let Some((a, b)) = opposite_edge(mesh.triangles[tidx], pivot) {
                link.entry(a).or_default().insert(b);
                link.entry(b).or_default().insert(a);
            }
        }
        if !link_is_connected(&link) {
            non_manifold.push(pivot);
        }
    }
    non_manifold
}

/// The two corners of `t` other than `pivot`, if `pivot` occurs once.
fn opposite_edge(t: [u32; 3], pivot: u32) -> Option<(u32, u32)> {
    match t {
        [p, a, b] | [b, p, a] | [a, b, p] if p == pivot && a != pivot && b != pivot => {
            Some((a, b))
        }
        _ => None,
    }
}

fn link_is_connected(link: &HashMap<u32, HashSet<u32>>) -> bool {
    let Some(&start) = link.keys().next() else {
        return true;
    };
    let mut visited: HashSet<u32> = HashSet::with_capacity(link.len());
    let mut queue = VecDeque::from([start]);
    visited.insert(start);
    while let Some(v) = queue.pop_front() {
        for &nb in link.get(&v).into_iter().flatten() {
            if visited.insert(nb) {
                queue.push_back(nb);
            }
        }
    }
    visited.len() == link.len()
}

/// True when [`get_non_manifold_vertices`] would be empty.
#[must_use]
pub fn is_vertex_manifold(mesh: &TriangleMesh) -> bool {
    get_non_manifold_vertices(mesh).is_empty()
}

/// `V + F - E`, with `E` the number of distinct undirected edges.
///
/// Every vertex counts, referenced or not.
///
/// # Example
///
/// ```
/// use mesh_types::unit_cube;
/// use mesh_repair::euler_poincare_characteristic;
///
/// assert_eq!(euler_poincare_characteristic(&unit_cube()), 2);
/// ```
#[must_use]
#[allow(clippy::cast_possible_wrap)] // element counts are far below i64::MAX
pub fn euler_poincare_characteristic(mesh: &TriangleMesh) -> i64 {
    let edges: HashSet<(u32, u32)> = mesh
        .triangles
        .iter()
        .flat_map(|&[a, b, c]| [edge_key(a, b), edge_key(b, c), edge_key(c, a)])
        .collect();
    mesh.vertices.len() as i64 + mesh.triangles.len() as i64 - edges.len() as i64
}
