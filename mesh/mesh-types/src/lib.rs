//! Core mesh types.
//!
//! This crate provides the containers every other mesh crate operates on:
//!
//! - [`TriangleMesh`] - Indexed triangle mesh with optional vertex normals,
//!   vertex colors, triangle normals and a vertex adjacency cache
//! - [`PointCloud`] - Points with optional normals and colors
//! - [`Triangle`] - A triangle with resolved corner positions
//! - [`Aabb`] - Axis-aligned bounding box
//!
//! It also derives the per-mesh data that later stages rely on: triangle
//! and vertex normals ([`TriangleMesh::compute_vertex_normals`]) and the
//! vertex adjacency ([`TriangleMesh::compute_adjacency_list`]).
//!
//! # Attribute presence
//!
//! Every optional array is parallel to its parent array. It counts as
//! present only while the lengths match; resizing the parent silently
//! makes the attribute absent.
//!
//! # Coordinate System
//!
//! Right-handed. Triangles wind counter-clockwise when viewed from the side
//! their normal points to.
//!
//! # Example
//!
//! ```
//! use mesh_types::{unit_cube, MeshTopology};
//!
//! let mut cube = unit_cube();
//! cube.compute_vertex_normals(true);
//! cube.compute_adjacency_list();
//!
//! assert_eq!(cube.triangle_count(), 12);
//! assert!(cube.has_vertex_normals());
//! assert_eq!(cube.adjacency_list[0].len(), 6);
//! ```
//!
//! # Quality Standards
//!
//! This crate holds itself to:
//! - ≥90% test coverage
//! - Zero clippy/doc warnings
//! - Zero `unwrap`/`expect` in library code

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod bounds;
mod mesh;
mod normals;
mod pointcloud;
mod traits;
mod triangle;

pub use bounds::Aabb;
pub use mesh::{unit_cube, TriangleMesh};
pub use pointcloud::PointCloud;
pub use traits::{MeshBounds, MeshTopology};
pub use triangle::Triangle;

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix3, Matrix4, Point3, Vector3, Vector4};
