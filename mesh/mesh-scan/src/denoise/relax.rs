//! Shared neighbor-averaging pass used by every filter.

use mesh_types::{Point3, TriangleMesh, Vector3};

use super::{FilterResult, FilterScope};

/// Guards the inverse-distance weight against coincident neighbors.
const DISTANCE_EPSILON: f64 = 1e-12;

/// Per-vertex update rule.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Kernel {
    /// `v + strength * (v * |N| - sum)`
    Sharpen { strength: f64 },
    /// `(v + sum) / (|N| + 1)`
    Average,
    /// `v + lambda * (weighted_mean - v)` with inverse-distance weights.
    Laplacian { lambda: f64 },
}

impl Kernel {
    #[inline]
    fn weight(self, p: &Point3<f64>, q: &Point3<f64>) -> f64 {
        match self {
            Self::Laplacian { .. } => 1.0 / ((p - q).norm() + DISTANCE_EPSILON),
            Self::Sharpen { .. } | Self::Average => 1.0,
        }
    }

    #[inline]
    fn apply(self, own: Vector3<f64>, sum: Vector3<f64>, total_weight: f64) -> Vector3<f64> {
        match self {
            Self::Sharpen { strength } => own + (own * total_weight - sum) * strength,
            Self::Average => (own + sum) / (total_weight + 1.0),
            // Isolated vertex: nothing to average toward.
            Self::Laplacian { .. } if total_weight <= 0.0 => own,
            Self::Laplacian { lambda } => own + (sum / total_weight - own) * lambda,
        }
    }
}

/// Which attribute arrays a pass rewrites.
#[derive(Debug, Clone, Copy)]
struct Channels {
    vertex: bool,
    normal: bool,
    color: bool,
}

impl Channels {
    fn select(scope: FilterScope, mesh: &TriangleMesh) -> Self {
        let all = scope == FilterScope::All;
        Self {
            vertex: all || scope == FilterScope::Vertex,
            normal: (all || scope == FilterScope::Normal) && mesh.has_vertex_normals(),
            color: (all || scope == FilterScope::Color) && mesh.has_vertex_colors(),
        }
    }
}

/// Run `iterations` passes of `kernel` over the channels picked by `scope`.
///
/// Each pass reads a snapshot of the previous pass. Adjacency is computed
/// once if the mesh does not carry it.
pub(crate) fn relax(
    mesh: &mut TriangleMesh,
    iterations: u32,
    kernel: Kernel,
    scope: FilterScope,
) -> FilterResult {
    if !mesh.has_adjacency_list() {
        mesh.compute_adjacency_list();
    }
    let channels = Channels::select(scope, mesh);

    let mut max_displacement = 0.0_f64;
    for _ in 0..iterations {
        max_displacement = max_displacement.max(relax_once(mesh, kernel, channels));
    }

    FilterResult {
        iterations_performed: iterations,
        max_displacement,
    }
}

/// One pass; returns the largest vertex move.
fn relax_once(mesh: &mut TriangleMesh, kernel: Kernel, channels: Channels) -> f64 {
    let prev_vertices = mesh.vertices.clone();
    let prev_normals = if channels.normal {
        mesh.vertex_normals.clone()
    } else {
        Vec::new()
    };
    let prev_colors = if channels.color {
        mesh.vertex_colors.clone()
    } else {
        Vec::new()
    };

    let mut max_displacement = 0.0_f64;
    for (vidx, neighbors) in mesh.adjacency_list.iter().enumerate() {
        let own = &prev_vertices[vidx];
        let mut total_weight = 0.0;
        let mut vertex_sum = Vector3::zeros();
        let mut normal_sum = Vector3::zeros();
        let mut color_sum = Vector3::zeros();

        for &nb in neighbors {
            let nb = nb as usize;
            let w = kernel.weight(own, &prev_vertices[nb]);
            total_weight += w;
            if channels.vertex {
                vertex_sum += prev_vertices[nb].coords * w;
            }
            if channels.normal {
                normal_sum += prev_normals[nb] * w;
            }
            if channels.color {
                color_sum += prev_colors[nb] * w;
            }
        }

        if channels.vertex {
            let moved = kernel.apply(own.coords, vertex_sum, total_weight);
            max_displacement = max_displacement.max((moved - own.coords).norm());
            mesh.vertices[vidx] = Point3::from(moved);
        }
        if channels.normal {
            mesh.vertex_normals[vidx] = kernel.apply(prev_normals[vidx], normal_sum, total_weight);
        }
        if channels.color {
            mesh.vertex_colors[vidx] = kernel.apply(prev_colors[vidx], color_sum, total_weight);
        }
    }

    max_displacement
}
