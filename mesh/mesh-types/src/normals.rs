//! Normal and adjacency derivation.

use hashbrown::HashSet;
use nalgebra::Vector3;

use crate::TriangleMesh;

impl TriangleMesh {
    /// Compute one normal per triangle as `(v1 - v0) x (v2 - v0)`.
    ///
    /// With `normalize`, each normal is divided by its length. Degenerate
    /// triangles keep a zero normal.
    pub fn compute_triangle_normals(&mut self, normalize: bool) {
        let normals: Vec<Vector3<f64>> = self
            .triangles
            .iter()
            .map(|t| {
                let v0 = self.vertices[t[0] as usize];
                (self.vertices[t[1] as usize] - v0).cross(&(self.vertices[t[2] as usize] - v0))
            })
            .collect();
        self.triangle_normals = normals;
        if normalize {
            normalize_in_place(&mut self.triangle_normals);
        }
    }

    /// Accumulate triangle normals into their three vertices.
    ///
    /// Missing triangle normals are computed unnormalized first, so larger
    /// triangles weigh more. Accumulators start from zero on every call.
    pub fn compute_vertex_normals(&mut self, normalize: bool) {
        if !self.has_triangle_normals() {
            self.compute_triangle_normals(false);
        }
        let mut normals = vec![Vector3::zeros(); self.vertices.len()];
        for (t, n) in self.triangles.iter().zip(&self.triangle_normals) {
            for &v in t {
                normals[v as usize] += n;
            }
        }
        self.vertex_normals = normals;
        if normalize {
            self.normalize_normals();
        }
    }

    /// Rebuild the per-vertex neighbor sets from scratch.
    ///
    /// ```
    /// use mesh_types::unit_cube;
    ///
    /// let mut cube = unit_cube();
    /// cube.compute_adjacency_list();
    /// assert!(cube.has_adjacency_list());
    /// assert!(cube.adjacency_list[0].contains(&1));
    /// ```
    pub fn compute_adjacency_list(&mut self) {
        let mut adjacency = vec![HashSet::new(); self.vertices.len()];
        for &[a, b, c] in &self.triangles {
            for (from, to) in [(a, b), (b, c), (c, a)] {
                adjacency[from as usize].insert(to);
                adjacency[to as usize].insert(from);
            }
        }
        self.adjacency_list = adjacency;
    }

    /// Normalize vertex and triangle normals. Zero normals stay zero.
    pub fn normalize_normals(&mut self) -> &mut Self {
        normalize_in_place(&mut self.vertex_normals);
        normalize_in_place(&mut self.triangle_normals);
        self
    }
}

fn normalize_in_place(normals: &mut [Vector3<f64>]) {
    for n in normals {
        let len = n.norm();
        if len > 0.0 {
            *n /= len;
        }
    }
}
