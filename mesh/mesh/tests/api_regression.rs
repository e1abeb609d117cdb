//! API Regression Tests for Mesh Crate Ecosystem
//!
//! These tests pin the public API and the headline behavior of the mesh
//! crates. They are organized in tiers of increasing scope:
//!
//! - Tier 1: Foundation (mesh-types: store, normals, adjacency, queries)
//! - Tier 2: Topology (mesh-repair: cleanup, manifold, orientation)
//! - Tier 3: Surface processing (mesh-scan: filters, sampling)
//! - Tier 4: Pipelines spanning several crates
//!
//! If any of these tests fail after API changes, it indicates a breaking change
//! that needs documentation in CHANGELOG.md and a version bump.

// Allow test-specific patterns
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::uninlined_format_args)]

use approx::assert_relative_eq;
use mesh::{prelude::*, repair, scan, types};

/// Two triangles sharing edge (0, 1), plus a third fin on the same edge.
fn fin_mesh() -> TriangleMesh {
    TriangleMesh::from_parts(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, -1.0, 0.0),
            Point3::new(0.5, 0.0, 1.0),
        ],
        vec![[0, 1, 2], [1, 0, 3], [0, 1, 4]],
    )
}

fn mobius_strip(n: u32) -> TriangleMesh {
    let mut vertices = Vec::new();
    for i in 0..n {
        let angle = f64::from(i) / f64::from(n) * std::f64::consts::TAU;
        let half = angle / 2.0;
        for s in [-0.3, 0.3] {
            let r = 1.0 + s * half.cos();
            vertices.push(Point3::new(r * angle.cos(), r * angle.sin(), s * half.sin()));
        }
    }
    let mut triangles = Vec::new();
    for i in 0..n {
        let (a, b) = (2 * i, 2 * i + 1);
        let (c, d) = if i + 1 == n { (1, 0) } else { (2 * i + 2, 2 * i + 3) };
        triangles.push([a, c, b]);
        triangles.push([b, c, d]);
    }
    TriangleMesh::from_parts(vertices, triangles)
}

// =============================================================================
// TIER 1: Foundation - Mesh Store, Normals, Adjacency
// =============================================================================

mod tier1_foundation {
    use super::*;

    #[test]
    fn triangle_mesh_construction() {
        let mesh = TriangleMesh::new();
        assert!(mesh.is_empty());
        assert!(!mesh.has_vertices());

        let mesh = TriangleMesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2]],
        );
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert!(!mesh.has_vertex_normals());
        assert!(!mesh.has_adjacency_list());
    }

    #[test]
    fn unit_cube_measurements() {
        let cube = unit_cube();
        assert_eq!(cube.vertex_count(), 8);
        assert_eq!(cube.triangle_count(), 12);
        assert_relative_eq!(cube.surface_area(), 6.0, epsilon = 1e-12);

        let bounds = cube.bounds();
        assert_eq!(bounds.min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(bounds.max, Point3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn vertex_normals_are_unit_length() {
        let mut cube = unit_cube();
        cube.compute_vertex_normals(true);
        assert!(cube.has_vertex_normals());
        assert!(cube.has_triangle_normals());
        for n in &cube.vertex_normals {
            assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn adjacency_is_symmetric() {
        let mut cube = unit_cube();
        cube.compute_adjacency_list();
        for (u, neighbors) in cube.adjacency_list.iter().enumerate() {
            for &v in neighbors {
                assert!(cube.adjacency_list[v as usize].contains(&(u as u32)));
            }
        }
    }

    #[test]
    fn merge_shifts_indices() {
        let mut a = unit_cube();
        let mut b = unit_cube();
        b.translate(&Vector3::new(2.0, 0.0, 0.0));
        a += &b;
        assert_eq!(a.vertex_count(), 16);
        assert_eq!(a.triangles[12], [
            b.triangles[0][0] + 8,
            b.triangles[0][1] + 8,
            b.triangles[0][2] + 8
        ]);
        assert_relative_eq!(a.surface_area(), 12.0, epsilon = 1e-12);
    }

    #[test]
    fn point_cloud_presence_rules() {
        let cloud = types::PointCloud::from_points(vec![Point3::origin(); 4]);
        assert_eq!(cloud.len(), 4);
        assert!(!cloud.has_normals());
        assert!(!cloud.has_colors());
    }
}

// =============================================================================
// TIER 2: Topology - Cleanup, Manifold and Orientation Analysis
// =============================================================================

mod tier2_topology {
    use super::*;
    use mesh::repair::{RepairParams, RepairSummary, ValidationOptions};

    #[test]
    fn unit_cube_is_closed_and_orientable() {
        let cube = unit_cube();
        assert_eq!(repair::euler_poincare_characteristic(&cube), 2);
        assert!(is_edge_manifold(&cube, false));
        assert!(is_vertex_manifold(&cube));
        assert!(is_orientable(&cube));

        let report = validate_mesh(&cube).unwrap();
        assert!(report.is_closed_manifold());
        assert!(report.is_watertight);
        assert_eq!(report.boundary_edge_count, 0);
        assert!(!report.has_issues());
    }

    #[test]
    fn fin_edge_is_reported_then_repaired() {
        let mut mesh = fin_mesh();
        assert_eq!(repair::get_non_manifold_edges(&mesh, true), vec![(0, 1)]);

        let removed = repair::remove_non_manifold_edges(&mut mesh);
        assert_eq!(removed, 1);
        assert!(repair::get_non_manifold_edges(&mesh, true).is_empty());
        assert!(is_edge_manifold(&mesh, true));
    }

    #[test]
    fn repair_params_builder_pattern() {
        let params = RepairParams::default()
            .with_remove_degenerate(false)
            .with_repair_non_manifold_edges(true);
        assert!(!params.remove_degenerate);
        assert!(params.repair_non_manifold_edges);

        let scans = RepairParams::for_scans();
        assert!(scans.merge_duplicate_vertices);
    }

    #[test]
    fn repair_summary_usage() {
        let summary = RepairSummary::default();
        assert!(!summary.had_changes());

        let mut cube = unit_cube();
        let summary = repair_mesh(&mut cube, &RepairParams::default());
        assert!(!summary.had_changes());
        assert_eq!(summary.final_vertices, 8);
        assert!(!format!("{}", summary).is_empty());
    }

    #[test]
    fn validation_options() {
        let report = repair::validate_mesh_with_options(
            &unit_cube(),
            &ValidationOptions::thorough(),
        )
        .unwrap();
        assert_eq!(report.is_self_intersecting, Some(false));
        assert_eq!(report.is_orientable, Some(true));
    }

    #[test]
    fn out_of_range_index_is_an_error() {
        let mesh = TriangleMesh::from_parts(vec![Point3::origin(); 3], vec![[0, 1, 9]]);
        assert!(repair::check_indices(&mesh).is_err());
        assert!(validate_mesh(&mesh).is_err());
    }

    #[test]
    fn mobius_strip_orientation_fails_cleanly() {
        let mut strip = mobius_strip(10);
        let before = strip.clone();
        assert!(!is_orientable(&strip));
        assert!(!orient_triangles(&mut strip));
        assert_eq!(strip, before);
    }

    #[test]
    fn flipped_triangle_is_reoriented() {
        let mut cube = unit_cube();
        cube.triangles[3].swap(0, 1);
        assert!(orient_triangles(&mut cube));
        assert_eq!(repair::try_orient_triangles(&mut cube), Ok(0));
    }

    #[test]
    fn separated_cubes_do_not_intersect() {
        let a = unit_cube();
        let mut b = unit_cube();
        b.translate(&Vector3::new(3.0, 0.0, 0.0));
        assert!(!repair::is_bounding_box_intersecting(&a, &b));
        assert!(!repair::is_intersecting(&a, &b));
        assert!(!repair::is_self_intersecting(&a));
    }
}

// =============================================================================
// TIER 3: Surface Processing - Filters and Sampling
// =============================================================================

mod tier3_surface_processing {
    use super::*;
    use mesh::scan::denoise::{DenoiseMethod, FilterResult};
    use mesh::scan::ScanError;

    #[test]
    fn denoise_params_presets() {
        let params = DenoiseParams::default();
        assert!(matches!(params.method, DenoiseMethod::Taubin { .. }));

        let scans = DenoiseParams::for_scans();
        assert_eq!(scans.scope, FilterScope::Vertex);

        let params = DenoiseParams::laplacian(2).with_iterations(4);
        assert_eq!(params.iterations, 4);
    }

    #[test]
    fn laplacian_shrinks_the_cube() {
        let mut cube = unit_cube();
        let result: FilterResult =
            scan::denoise::filter_smooth_laplacian(&mut cube, 3, 0.5, FilterScope::Vertex);
        assert_eq!(result.iterations_performed, 3);
        assert!(result.had_significant_change());
        assert!(cube.surface_area() < 6.0);
    }

    #[test]
    fn denoise_rejects_empty_mesh() {
        let mut mesh = TriangleMesh::new();
        assert_eq!(
            denoise_mesh(&mut mesh, &DenoiseParams::default()),
            Err(ScanError::EmptyMesh)
        );
    }

    #[test]
    fn uniform_sampling_counts() {
        let cube = unit_cube();
        for n in [1, 10, 1000] {
            assert_eq!(sample_points_uniformly(&cube, n).len(), n);
        }
        assert!(sample_points_uniformly(&cube, 0).is_empty());
        assert!(sample_points_uniformly(&TriangleMesh::new(), 10).is_empty());
    }

    #[test]
    fn poisson_disk_sampling_counts() {
        let cube = unit_cube();
        let params = PoissonDiskParams::new(120).with_seed(3);
        assert_eq!(sample_points_poisson_disk(&cube, &params, None).len(), 120);

        let candidates = scan::sample::sample_points_uniformly_seeded(&cube, 50, 3);
        let params = PoissonDiskParams::new(120);
        assert!(sample_points_poisson_disk(&cube, &params, Some(&candidates)).is_empty());
        assert!(matches!(
            scan::sample::try_sample_points_poisson_disk(&cube, &params, Some(&candidates)),
            Err(ScanError::InsufficientPoints { .. })
        ));
    }
}

// =============================================================================
// TIER 4: Pipelines
// =============================================================================

mod tier4_pipelines {
    use super::*;

    #[test]
    fn scan_cleanup_pipeline() {
        // Soup: every triangle carries its own vertices.
        let cube = unit_cube();
        let mut soup = TriangleMesh::new();
        for t in &cube.triangles {
            let base = soup.vertices.len() as u32;
            soup.vertices.extend(t.iter().map(|&v| cube.vertices[v as usize]));
            soup.triangles.push([base, base + 1, base + 2]);
        }
        assert_eq!(soup.vertex_count(), 36);
        assert!(!is_edge_manifold(&soup, false));

        let summary = repair_mesh(&mut soup, &RepairParams::for_scans());
        assert_eq!(summary.final_vertices, 8);
        let report = validate_mesh(&soup).unwrap();
        assert!(report.is_closed_manifold());
        assert_eq!(report.euler_characteristic, 2);

        soup.compute_vertex_normals(true);
        denoise_mesh(&mut soup, &DenoiseParams::for_scans()).unwrap();
        assert_eq!(soup.vertex_count(), 8);
        assert!(soup.has_vertex_normals());

        let cloud = sample_points_uniformly(&soup, 64);
        assert_eq!(cloud.len(), 64);
        assert!(cloud.has_normals());
    }
}
