//! Domain discretization and empirical mass for hard vicinal estimates (HVE).
//!
//! ## Grid
//! [`UniformGrid`] holds `G` evenly spaced points over a finite domain
//! `[min, max]`, both ends included. The grid size is always an explicit
//! argument; nothing in this crate keeps process-wide defaults.
//!
//! ## Nearest-bin mass
//! [`MassGrid`] assigns every sample to its nearest grid point (ties go to the
//! lower index) and adds `1/n` there. This differs from half-open histogram
//! binning: values beyond the domain are clamped to the nearest boundary
//! point instead of being dropped.

mod error;
mod grid;
mod mass;

pub use error::Error;
pub use grid::UniformGrid;
pub use mass::MassGrid;
