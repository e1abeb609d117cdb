//! Benchmarks for mesh-repair operations.
//!
//! Run with: cargo bench -p mesh-repair
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p mesh-repair -- --save-baseline main
//! 2. After changes: cargo bench -p mesh-repair -- --baseline main

#![allow(missing_docs, clippy::cast_possible_truncation)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hashbrown::HashMap;
use mesh_repair::{
    get_non_manifold_vertices, is_self_intersecting, orient_triangles, repair_mesh,
    validate_mesh, RepairParams,
};
use mesh_types::{unit_cube, Point3, TriangleMesh};

// =============================================================================
// Test Mesh Generation
// =============================================================================

/// Create an icosphere mesh with the given subdivision level.
fn create_sphere(subdivisions: u32) -> TriangleMesh {
    let phi = (1.0 + 5.0_f64.sqrt()) / 2.0;
    let a = 1.0;
    let b = 1.0 / phi;

    let ico_verts = [
        [0.0, b, -a],
        [b, a, 0.0],
        [-b, a, 0.0],
        [0.0, b, a],
        [0.0, -b, a],
        [-a, 0.0, b],
        [0.0, -b, -a],
        [a, 0.0, -b],
        [a, 0.0, b],
        [-a, 0.0, -b],
        [b, -a, 0.0],
        [-b, -a, 0.0],
    ];
    let vertices = ico_verts
        .iter()
        .map(|&[x, y, z]| Point3::from(Point3::new(x, y, z).coords.normalize()))
        .collect();

    let triangles = vec![
        [0, 1, 2],
        [3, 2, 1],
        [3, 4, 5],
        [3, 8, 4],
        [0, 6, 7],
        [0, 9, 6],
        [4, 10, 11],
        [6, 11, 10],
        [2, 5, 9],
        [11, 9, 5],
        [1, 7, 8],
        [10, 8, 7],
        [3, 5, 2],
        [3, 1, 8],
        [0, 2, 9],
        [0, 7, 1],
        [6, 9, 11],
        [6, 10, 7],
        [4, 11, 5],
        [4, 8, 10],
    ];

    let mut mesh = TriangleMesh::from_parts(vertices, triangles);
    for _ in 0..subdivisions {
        mesh = subdivide_sphere(&mesh);
    }
    mesh
}

fn subdivide_sphere(mesh: &TriangleMesh) -> TriangleMesh {
    let mut vertices = mesh.vertices.clone();
    let mut triangles = Vec::with_capacity(mesh.triangles.len() * 4);
    let mut edge_midpoints: HashMap<(u32, u32), u32> = HashMap::new();

    for &[v0, v1, v2] in &mesh.triangles {
        let m01 = get_midpoint(v0, v1, &mut vertices, &mut edge_midpoints);
        let m12 = get_midpoint(v1, v2, &mut vertices, &mut edge_midpoints);
        let m20 = get_midpoint(v2, v0, &mut vertices, &mut edge_midpoints);

        triangles.push([v0, m01, m20]);
        triangles.push([v1, m12, m01]);
        triangles.push([v2, m20, m12]);
        triangles.push([m01, m12, m20]);
    }

    TriangleMesh::from_parts(vertices, triangles)
}

fn get_midpoint(
    v1: u32,
    v2: u32,
    vertices: &mut Vec<Point3<f64>>,
    edge_midpoints: &mut HashMap<(u32, u32), u32>,
) -> u32 {
    let key = mesh_repair::edge_key(v1, v2);
    if let Some(&idx) = edge_midpoints.get(&key) {
        return idx;
    }

    let mid = (vertices[v1 as usize].coords + vertices[v2 as usize].coords) / 2.0;
    let idx = vertices.len() as u32;
    vertices.push(Point3::from(mid.normalize()));
    edge_midpoints.insert(key, idx);
    idx
}

/// The sphere with every triangle duplicated as a separate soup.
fn create_soup(subdivisions: u32) -> TriangleMesh {
    let sphere = create_sphere(subdivisions);
    let mut vertices = Vec::with_capacity(sphere.triangles.len() * 3);
    let mut triangles = Vec::with_capacity(sphere.triangles.len());
    for t in &sphere.triangles {
        let base = vertices.len() as u32;
        vertices.extend(t.iter().map(|&v| sphere.vertices[v as usize]));
        triangles.push([base, base + 1, base + 2]);
    }
    TriangleMesh::from_parts(vertices, triangles)
}

// =============================================================================
// Validation Benchmarks
// =============================================================================

fn bench_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("Validation");

    let test_cases = [
        ("cube_12tri", unit_cube()),
        ("sphere_80tri", create_sphere(1)),
        ("sphere_320tri", create_sphere(2)),
        ("sphere_1280tri", create_sphere(3)),
        ("sphere_5120tri", create_sphere(4)),
    ];

    for (name, mesh) in &test_cases {
        group.throughput(Throughput::Elements(mesh.triangles.len() as u64));

        group.bench_with_input(BenchmarkId::new("validate", name), mesh, |b, mesh| {
            b.iter(|| validate_mesh(black_box(mesh)));
        });

        group.bench_with_input(
            BenchmarkId::new("non_manifold_vertices", name),
            mesh,
            |b, mesh| b.iter(|| get_non_manifold_vertices(black_box(mesh))),
        );
    }

    group.finish();
}

// =============================================================================
// Repair Benchmarks
// =============================================================================

fn bench_repair(c: &mut Criterion) {
    let mut group = c.benchmark_group("Repair");

    let test_cases = [
        ("soup_320tri", create_soup(2)),
        ("soup_1280tri", create_soup(3)),
        ("soup_5120tri", create_soup(4)),
    ];

    for (name, mesh) in &test_cases {
        group.throughput(Throughput::Elements(mesh.triangles.len() as u64));

        group.bench_with_input(BenchmarkId::new("full_repair", name), mesh, |b, mesh| {
            let params = RepairParams::for_scans();
            b.iter_batched(
                || mesh.clone(),
                |mut m| repair_mesh(&mut m, &params),
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

// =============================================================================
// Orientation Benchmarks
// =============================================================================

fn bench_orientation(c: &mut Criterion) {
    let mut group = c.benchmark_group("Orientation");

    for subdivisions in [2, 3, 4] {
        let mut mesh = create_sphere(subdivisions);
        for t in mesh.triangles.iter_mut().step_by(2) {
            t.swap(1, 2);
        }
        group.throughput(Throughput::Elements(mesh.triangles.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("orient_triangles", mesh.triangles.len()),
            &mesh,
            |b, mesh| {
                b.iter_batched(
                    || mesh.clone(),
                    |mut m| orient_triangles(&mut m),
                    criterion::BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

// =============================================================================
// Intersection Detection Benchmarks
// =============================================================================

fn bench_intersection(c: &mut Criterion) {
    let mut group = c.benchmark_group("Intersection");

    let test_cases = [
        ("sphere_80tri", create_sphere(1)),
        ("sphere_320tri", create_sphere(2)),
    ];

    for (name, mesh) in &test_cases {
        group.throughput(Throughput::Elements(mesh.triangles.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("self_intersection", name),
            mesh,
            |b, mesh| b.iter(|| is_self_intersecting(black_box(mesh))),
        );
    }

    group.finish();
}

// =============================================================================
// Criterion Setup
// =============================================================================

criterion_group!(
    benches,
    bench_validation,
    bench_repair,
    bench_orientation,
    bench_intersection,
);

criterion_main!(benches);
