//! Point sampling on triangle surfaces.
//!
//! - **Uniform** - Area-proportional random samples
//! - **Poisson disk** - Evenly spaced samples by weighted elimination of an
//!   oversampled candidate set
//!
//! Every sampler has a plain form that logs a warning and returns an empty
//! [`PointCloud`](mesh_types::PointCloud) on bad input, and a `try_` form
//! that reports the [`ScanError`](crate::ScanError) instead.
//!
//! # Quick Start
//!
//! ```
//! use mesh_types::unit_cube;
//! use mesh_scan::sample::{sample_points_poisson_disk, sample_points_uniformly, PoissonDiskParams};
//!
//! let cube = unit_cube();
//! let dense = sample_points_uniformly(&cube, 2000);
//! let even = sample_points_poisson_disk(&cube, &PoissonDiskParams::new(300), Some(&dense));
//! assert_eq!(even.len(), 300);
//! ```

mod grid;
mod poisson;
mod uniform;

pub use grid::{RadiusIndex, SpatialGrid};
pub use poisson::{sample_points_poisson_disk, try_sample_points_poisson_disk, PoissonDiskParams};
pub use uniform::{
    sample_points_uniformly, sample_points_uniformly_seeded, try_sample_points_uniformly,
};
