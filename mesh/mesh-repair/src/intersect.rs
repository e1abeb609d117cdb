//! Triangle intersection queries.
//!
//! The triangle-triangle predicate is a separating axis test over both face
//! normals and the nine edge-edge cross products. When the two triangles
//! are coplanar those axes cannot separate them, so the in-plane edge
//! normals of all six edges are tested as well. Touching counts as
//! intersecting.

use mesh_types::{Aabb, MeshTopology, Point3, Triangle, TriangleMesh, Vector3};

/// Relative tolerance for projections and degenerate axes.
const EPSILON: f64 = 1e-12;

/// True if the two closed triangles share at least one point.
///
/// # Example
///
/// ```
/// use mesh_types::{Triangle, Point3};
/// use mesh_repair::triangles_intersect;
///
/// let flat = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(2.0, 0.0, 0.0),
///     Point3::new(0.0, 2.0, 0.0),
/// );
/// let piercing = Triangle::new(
///     Point3::new(0.5, 0.5, -1.0),
///     Point3::new(0.5, 0.5, 1.0),
///     Point3::new(3.0, 3.0, 0.5),
/// );
/// let above = Triangle::new(
///     Point3::new(0.0, 0.0, 1.0),
///     Point3::new(2.0, 0.0, 1.0),
///     Point3::new(0.0, 2.0, 1.0),
/// );
///
/// assert!(triangles_intersect(&flat, &piercing));
/// assert!(!triangles_intersect(&flat, &above));
/// ```
#[must_use]
pub fn triangles_intersect(a: &Triangle, b: &Triangle) -> bool {
    if !a.bounds().intersects(&b.bounds()) {
        return false;
    }

    let pa = a.vertices();
    let pb = b.vertices();
    let scale = pa
        .iter()
        .chain(pb.iter())
        .map(|p| p.coords.amax())
        .fold(1.0, f64::max);
    let tolerance = EPSILON * scale;

    let edges_a = a.edge_vectors();
    let edges_b = b.edge_vectors();
    let normal_a = a.normal_unnormalized();
    let normal_b = b.normal_unnormalized();

    let separates = |axis: &Vector3<f64>, reference: f64| -> bool {
        let len = axis.norm();
        if len <= EPSILON * reference {
            return false;
        }
        let axis = axis / len;
        let (min_a, max_a) = project(&pa, &axis);
        let (min_b, max_b) = project(&pb, &axis);
        max_a < min_b - tolerance || max_b < min_a - tolerance
    };

    let area_scale = scale * scale;
    if separates(&normal_a, area_scale) || separates(&normal_b, area_scale) {
        return false;
    }

    for ea in &edges_a {
        for eb in &edges_b {
            if separates(&ea.cross(eb), ea.norm() * eb.norm()) {
                return false;
            }
        }
    }

    let coplanar = normal_a.cross(&normal_b).norm()
        <= EPSILON * normal_a.norm() * normal_b.norm();
    if coplanar {
        let normal = if normal_a.norm_squared() >= normal_b.norm_squared() {
            normal_a
        } else {
            normal_b
        };
        for e in edges_a.iter().chain(edges_b.iter()) {
            if separates(&normal.cross(e), normal.norm() * e.norm()) {
                return false;
            }
        }
    }

    true
}

fn project(points: &[Point3<f64>; 3], axis: &Vector3<f64>) -> (f64, f64) {
    points
        .iter()
        .map(|p| p.coords.dot(axis))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), d| {
            (lo.min(d), hi.max(d))
        })
}

/// Pairs `(i, j)` with `i < j` of intersecting triangles that share no
/// vertex, in lexicographic order.
///
/// Quadratic in the triangle count.
///
/// # Example
///
/// ```
/// use mesh_types::unit_cube;
/// use mesh_repair::get_self_intersecting_triangles;
///
/// assert!(get_self_intersecting_triangles(&unit_cube()).is_empty());
/// ```
#[must_use]
pub fn get_self_intersecting_triangles(mesh: &TriangleMesh) -> Vec<(usize, usize)> {
    let resolved = resolve_all(mesh);
    let mut pairs = Vec::new();
    for i in 0..resolved.len() {
        for j in (i + 1)..resolved.len() {
            if shares_vertex(mesh.triangles[i], mesh.triangles[j]) {
                continue;
            }
            if triangles_intersect(&resolved[i], &resolved[j]) {
                pairs.push((i, j));
            }
        }
    }
    pairs
}

/// True if any two triangles without a shared vertex intersect.
///
/// Stops at the first hit.
#[must_use]
pub fn is_self_intersecting(mesh: &TriangleMesh) -> bool {
    let resolved = resolve_all(mesh);
    (0..resolved.len()).any(|i| {
        ((i + 1)..resolved.len()).any(|j| {
            !shares_vertex(mesh.triangles[i], mesh.triangles[j])
                && triangles_intersect(&resolved[i], &resolved[j])
        })
    })
}

/// True if the vertex bounding boxes of the two meshes overlap.
///
/// An empty mesh has the degenerate box at the origin.
#[must_use]
pub fn is_bounding_box_intersecting(a: &TriangleMesh, b: &TriangleMesh) -> bool {
    let box_a = Aabb::new(a.min_bound(), a.max_bound());
    let box_b = Aabb::new(b.min_bound(), b.max_bound());
    box_a.intersects(&box_b)
}

/// True if any triangle of `a` intersects any triangle of `b`.
///
/// Disjoint bounding boxes short-circuit to `false`; otherwise every pair
/// is tested until the first hit.
///
/// # Example
///
/// ```
/// use mesh_types::{unit_cube, Vector3};
/// use mesh_repair::is_intersecting;
///
/// let a = unit_cube();
/// let mut b = unit_cube();
/// b.translate(&Vector3::new(0.5, 0.5, 0.5));
/// assert!(is_intersecting(&a, &b));
///
/// b.translate(&Vector3::new(5.0, 0.0, 0.0));
/// assert!(!is_intersecting(&a, &b));
/// ```
#[must_use]
pub fn is_intersecting(a: &TriangleMesh, b: &TriangleMesh) -> bool {
    if !is_bounding_box_intersecting(a, b) {
        return false;
    }
    let tris_b = resolve_all(b);
    resolve_all(a)
        .iter()
        .any(|ta| tris_b.iter().any(|tb| triangles_intersect(ta, tb)))
}

fn resolve_all(mesh: &TriangleMesh) -> Vec<Triangle> {
    mesh.iter_triangles().collect()
}

#[inline]
fn shares_vertex(p: [u32; 3], q: [u32; 3]) -> bool {
    p.iter().any(|v| q.contains(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::{unit_cube, Point3};

    fn tri(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> Triangle {
        Triangle::new(
            Point3::new(a[0], a[1], a[2]),
            Point3::new(b[0], b[1], b[2]),
            Point3::new(c[0], c[1], c[2]),
        )
    }

    #[test]
    fn crossing_triangles() {
        let a = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let b = tri([0.2, 0.2, -1.0], [0.2, 0.2, 1.0], [0.2, -1.0, 0.0]);
        assert!(triangles_intersect(&a, &b));
        assert!(triangles_intersect(&b, &a));
    }

    #[test]
    fn bounding_boxes_overlap_but_triangles_miss() {
        let a = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        // Vertical triangle beyond the hypotenuse, inside a's bounding box.
        let b = tri([0.9, 0.9, -1.0], [0.9, 0.9, 1.0], [0.6, 0.9, 0.0]);
        assert!(a.bounds().intersects(&b.bounds()));
        assert!(!triangles_intersect(&a, &b));
    }

    #[test]
    fn coplanar_overlap_and_separation() {
        let a = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let overlapping = tri([0.2, 0.2, 0.0], [2.0, 0.2, 0.0], [0.2, 2.0, 0.0]);
        let disjoint = tri([0.8, 0.8, 0.0], [2.0, 0.8, 0.0], [0.8, 2.0, 0.0]);
        assert!(triangles_intersect(&a, &overlapping));
        assert!(!triangles_intersect(&a, &disjoint));
    }

    #[test]
    fn touching_at_a_corner_counts() {
        let a = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let b = tri([1.0, 0.0, 0.0], [2.0, 0.0, 1.0], [2.0, 1.0, 0.0]);
        assert!(triangles_intersect(&a, &b));
    }

    #[test]
    fn closed_cube_does_not_self_intersect() {
        let cube = unit_cube();
        assert!(!is_self_intersecting(&cube));
    }

    #[test]
    fn spike_through_cube_self_intersects() {
        let mut mesh = unit_cube();
        let base = mesh.vertices.len() as u32;
        mesh.vertices.extend([
            Point3::new(0.5, 0.5, 0.5),
            Point3::new(0.6, 0.5, 0.5),
            Point3::new(0.5, 0.5, 3.0),
        ]);
        mesh.triangles.push([base, base + 1, base + 2]);
        let spike = mesh.triangles.len() - 1;

        let pairs = get_self_intersecting_triangles(&mesh);
        // The spike crosses both top triangles' shared diagonal region.
        assert!(!pairs.is_empty());
        assert!(pairs.iter().all(|&(i, j)| i < j && j == spike));
        assert!(pairs.iter().any(|&(i, _)| i == 2 || i == 3));
        assert!(is_self_intersecting(&mesh));
    }

    #[test]
    fn neighbours_sharing_a_vertex_are_skipped() {
        // Two triangles folded onto each other around vertex 0.
        let mesh = TriangleMesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(1.0, 0.1, 0.0),
                Point3::new(0.1, 1.0, 0.0),
            ],
            vec![[0, 1, 2], [0, 3, 4]],
        );
        assert!(!is_self_intersecting(&mesh));
    }

    #[test]
    fn bounding_box_pretest() {
        let a = unit_cube();
        let mut b = unit_cube();
        b.translate(&Vector3::new(1.0, 0.0, 0.0));
        assert!(is_bounding_box_intersecting(&a, &b));
        b.translate(&Vector3::new(0.5, 0.0, 0.0));
        assert!(!is_bounding_box_intersecting(&a, &b));
        assert!(!is_intersecting(&a, &b));
    }

    #[test]
    fn nested_cubes_do_not_intersect() {
        let outer = unit_cube();
        let mut inner = unit_cube();
        inner.scale(0.5, true);
        assert!(is_bounding_box_intersecting(&outer, &inner));
        assert!(!is_intersecting(&outer, &inner));
    }
}
