//! Surface filters and point sampling for triangle meshes.
//!
//! This crate provides:
//!
//! - **Denoising** - Sharpen, simple average, Laplacian and Taubin filters
//!   over vertex positions, normals and colors
//! - **Sampling** - Uniform and Poisson-disk point clouds drawn from a
//!   surface
//!
//! # Quick Start
//!
//! ## Mesh Denoising
//!
//! ```
//! use mesh_types::unit_cube;
//! use mesh_scan::denoise::{denoise_mesh, DenoiseParams};
//!
//! let mut mesh = unit_cube();
//! let result = denoise_mesh(&mut mesh, &DenoiseParams::gentle())?;
//! println!("{}", result);
//! # Ok::<(), mesh_scan::ScanError>(())
//! ```
//!
//! ## Surface Sampling
//!
//! ```
//! use mesh_types::unit_cube;
//! use mesh_scan::sample::{try_sample_points_poisson_disk, PoissonDiskParams};
//!
//! let params = PoissonDiskParams::new(100).with_seed(7);
//! let cloud = try_sample_points_poisson_disk(&unit_cube(), &params, None)?;
//! assert_eq!(cloud.len(), 100);
//! # Ok::<(), mesh_scan::ScanError>(())
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

pub mod denoise;
mod error;
pub mod sample;

pub use error::{ScanError, ScanResult};
