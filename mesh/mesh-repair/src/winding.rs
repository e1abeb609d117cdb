//! Consistent triangle orientation.
//!
//! Orientation propagates breadth-first across shared edges. Each undirected
//! edge remembers the direction in which the first triangle to reach it
//! traversed it; a neighbor agrees when it traverses the edge the other way.
//! A triangle may be flipped once to agree with what is already
//! established. If it still disagrees afterwards, the mesh cannot be
//! oriented.

use std::collections::VecDeque;

use hashbrown::HashMap;
use mesh_types::TriangleMesh;
use tracing::{debug, warn};

use crate::adjacency::{edge_key, EdgeTriangleMap};
use crate::error::{RepairError, RepairResult};

/// Run the propagation over `triangles`, calling `swap(t, i, j)` whenever
/// corners `i` and `j` of triangle `t` must be exchanged.
///
/// Returns the number of flips, or the triangle where a conflict was found.
fn propagate_orientation<F>(triangles: &[[u32; 3]], mut swap: F) -> Result<usize, usize>
where
    F: FnMut(usize, usize, usize),
{
    let edges = EdgeTriangleMap::build(triangles);
    let mut direction: HashMap<(u32, u32), (u32, u32)> =
        HashMap::with_capacity(edges.edge_count());
    let mut visited = vec![false; triangles.len()];
    let mut queue: VecDeque<usize> = VecDeque::new();
    let mut next_seed = 0;
    let mut flips = 0;

    loop {
        let tidx = if let Some(t) = queue.pop_front() {
            t
        } else {
            while next_seed < triangles.len() && visited[next_seed] {
                next_seed += 1;
            }
            if next_seed == triangles.len() {
                break;
            }
            next_seed
        };
        if visited[tidx] {
            continue;
        }
        visited[tidx] = true;

        let [mut v0, mut v1, mut v2] = triangles[tidx];
        let (k01, k12, k20) = (edge_key(v0, v1), edge_key(v1, v2), edge_key(v2, v0));
        let d01 = direction.get(&k01).copied();
        let d12 = direction.get(&k12).copied();
        let d20 = direction.get(&k20).copied();

        if d01.is_none() && d12.is_none() && d20.is_none() {
            direction.insert(k01, (v0, v1));
            direction.insert(k12, (v1, v2));
            direction.insert(k20, (v2, v0));
        } else {
            if d01.is_some_and(|(from, _)| from == v0) {
                std::mem::swap(&mut v0, &mut v1);
                swap(tidx, 0, 1);
                flips += 1;
            } else if d12.is_some_and(|(from, _)| from == v1) {
                std::mem::swap(&mut v1, &mut v2);
                swap(tidx, 1, 2);
                flips += 1;
            } else if d20.is_some_and(|(from, _)| from == v2) {
                std::mem::swap(&mut v2, &mut v0);
                swap(tidx, 2, 0);
                flips += 1;
            }

            if !verify_and_add(&mut direction, v0, v1)
                || !verify_and_add(&mut direction, v1, v2)
                || !verify_and_add(&mut direction, v2, v0)
            {
                return Err(tidx);
            }
        }

        for key in [k01, k12, k20] {
            if let Some(neighbors) = edges.triangles_for_edge(key.0, key.1) {
                queue.extend(neighbors.iter().copied().filter(|&n| !visited[n]));
            }
        }
    }

    Ok(flips)
}

/// Record the directed edge `a -> b`; false if that direction is already
/// taken by another triangle.
fn verify_and_add(direction: &mut HashMap<(u32, u32), (u32, u32)>, a: u32, b: u32) -> bool {
    match direction.get(&edge_key(a, b)) {
        Some(&(from, _)) => from != a,
        None => {
            direction.insert(edge_key(a, b), (a, b));
            true
        }
    }
}

/// True when all triangles can be given a consistent winding.
///
/// The mesh is not modified.
///
/// # Example
///
/// ```
/// use mesh_types::unit_cube;
/// use mesh_repair::is_orientable;
///
/// assert!(is_orientable(&unit_cube()));
/// ```
#[must_use]
pub fn is_orientable(mesh: &TriangleMesh) -> bool {
    propagate_orientation(&mesh.triangles, |_, _, _| {}).is_ok()
}

/// Flip triangles until neighbors agree on every shared edge.
///
/// The first triangle of each connected patch keeps its winding. Triangle
/// normals of flipped triangles are negated when present. On failure the
/// mesh is left exactly as it was.
///
/// Returns the number of flipped triangles.
///
/// # Errors
///
/// [`RepairError::NonOrientable`] if no consistent winding exists, for
/// example on a Möbius strip or when three triangles share an edge.
///
/// # Example
///
/// ```
/// use mesh_types::unit_cube;
/// use mesh_repair::try_orient_triangles;
///
/// let mut cube = unit_cube();
/// cube.triangles[3].swap(1, 2);
/// cube.triangles[7].swap(0, 2);
///
/// assert_eq!(try_orient_triangles(&mut cube), Ok(2));
/// assert_eq!(try_orient_triangles(&mut cube), Ok(0));
/// ```
pub fn try_orient_triangles(mesh: &mut TriangleMesh) -> RepairResult<usize> {
    let mut oriented = mesh.triangles.clone();
    let mut flipped = vec![false; oriented.len()];
    let result = propagate_orientation(&mesh.triangles, |t, i, j| {
        oriented[t].swap(i, j);
        flipped[t] = !flipped[t];
    });

    match result {
        Ok(flips) => {
            if mesh.has_triangle_normals() {
                for (n, &f) in mesh.triangle_normals.iter_mut().zip(&flipped) {
                    if f {
                        *n = -*n;
                    }
                }
            }
            mesh.triangles = oriented;
            debug!("Flipped {} triangles to orient mesh", flips);
            Ok(flips)
        }
        Err(triangle) => {
            warn!("Mesh is not orientable: conflict at triangle {}", triangle);
            Err(RepairError::NonOrientable { triangle })
        }
    }
}

/// Boolean form of [`try_orient_triangles`].
///
/// Returns `false` and leaves the mesh untouched if it is not orientable.
pub fn orient_triangles(mesh: &mut TriangleMesh) -> bool {
    try_orient_triangles(mesh).is_ok()
}
