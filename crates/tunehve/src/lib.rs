//! Hard vicinal estimates (HVE) of a one-dimensional label sample.
//!
//! The pipeline turns raw labels into three aligned sequences over a finite
//! domain:
//! 1. a uniform grid ([`UniformGrid`]),
//! 2. the Gaussian-smoothed density: nearest-bin mass ([`MassGrid`])
//!    convolved with a Gaussian of bandwidth `sigma`,
//! 3. the coverage density: the Gaussian-smoothed density convolved again
//!    with a box of half-width `kappa`.
//!
//! Comparing the two smoothed curves for candidate `(kappa, sigma)` pairs is
//! how the bandwidths of a vicinal (soft-label) regression loss are chosen.
//!
//! ```no_run
//! let (grid, gaussian, coverage) =
//!     tunehve::compute_hve_densities(&[45.0], 0.0, 90.0, 10_000, 0.3, 2.0).unwrap();
//! assert_eq!(grid.len(), gaussian.len());
//! assert_eq!(grid.len(), coverage.len());
//! ```

mod histogram;
mod pipeline;

pub use hve_core::*;
pub use hve_smooth::*;

pub use histogram::{Histogram, histogram};
pub use pipeline::{HveConfig, HveDensities, compute_hve_densities};
