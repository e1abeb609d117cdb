//! Edge to triangle incidence.
//!
//! Every structural analysis in this crate starts from the same map: each
//! undirected edge, keyed as `(min, max)`, to the triangles that use it in
//! triangle order.

use hashbrown::HashMap;

/// Canonical key of the undirected edge between `a` and `b`.
#[inline]
#[must_use]
pub fn edge_key(a: u32, b: u32) -> (u32, u32) {
    if a < b { (a, b) } else { (b, a) }
}

/// Undirected edge to incident triangle indices.
///
/// # Example
///
/// ```
/// use mesh_repair::EdgeTriangleMap;
///
/// let triangles = vec![[0, 1, 2], [1, 3, 2]];
/// let map = EdgeTriangleMap::build(&triangles);
///
/// assert_eq!(map.edge_count(), 5);
/// assert_eq!(map.triangles_for_edge(2, 1), Some(&[0, 1][..]));
/// assert_eq!(map.boundary_edge_count(), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EdgeTriangleMap {
    edge_to_triangles: HashMap<(u32, u32), Vec<usize>>,
}

impl EdgeTriangleMap {
    /// Aggregate edges of `triangles` in a single pass.
    #[must_use]
    pub fn build(triangles: &[[u32; 3]]) -> Self {
        let mut edge_to_triangles: HashMap<(u32, u32), Vec<usize>> =
            HashMap::with_capacity(triangles.len() * 3 / 2);

        for (tidx, &[a, b, c]) in triangles.iter().enumerate() {
            for (u, v) in [(a, b), (b, c), (c, a)] {
                edge_to_triangles.entry(edge_key(u, v)).or_default().push(tidx);
            }
        }

        Self { edge_to_triangles }
    }

    /// Triangles incident to the edge `a`-`b`, in either direction.
    ///
    /// Returns `None` if no triangle uses the edge.
    #[must_use]
    pub fn triangles_for_edge(&self, a: u32, b: u32) -> Option<&[usize]> {
        self.edge_to_triangles
            .get(&edge_key(a, b))
            .map(Vec::as_slice)
    }

    /// Iterate `(edge, incident triangles)` in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = ((u32, u32), &[usize])> + '_ {
        self.edge_to_triangles
            .iter()
            .map(|(&edge, tris)| (edge, tris.as_slice()))
    }

    /// Number of distinct undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_to_triangles.len()
    }

    /// Edges used by exactly one triangle.
    #[must_use]
    pub fn boundary_edge_count(&self) -> usize {
        self.edge_to_triangles
            .values()
            .filter(|tris| tris.len() == 1)
            .count()
    }

    /// Edges that are not manifold, sorted by key.
    ///
    /// An edge is manifold when it has exactly two incident triangles, or
    /// exactly one if `allow_boundary_edges` is set.
    #[must_use]
    pub fn non_manifold_edges(&self, allow_boundary_edges: bool) -> Vec<(u32, u32)> {
        let mut edges: Vec<(u32, u32)> = self
            .edge_to_triangles
            .iter()
            .filter(|(_, tris)| !is_manifold_count(tris.len(), allow_boundary_edges))
            .map(|(&edge, _)| edge)
            .collect();
        edges.sort_unstable();
        edges
    }

    /// True when every edge is manifold.
    #[must_use]
    pub fn is_edge_manifold(&self, allow_boundary_edges: bool) -> bool {
        self.edge_to_triangles
            .values()
            .all(|tris| is_manifold_count(tris.len(), allow_boundary_edges))
    }

    /// True when no edge is a boundary.
    #[must_use]
    pub fn is_watertight(&self) -> bool {
        self.edge_to_triangles.values().all(|tris| tris.len() >= 2)
    }
}

#[inline]
fn is_manifold_count(count: usize, allow_boundary_edges: bool) -> bool {
    count == 2 || (allow_boundary_edges && count == 1)
}
