//! Kernels and "same"-aligned 1D convolution for hard vicinal estimates.
//!
//! Kernels are laid out on the same step as the [`hve_core::UniformGrid`]
//! they smooth:
//! - [`GaussianKernel1D`] samples the Gaussian density over every grid
//!   offset and scales it by the step.
//! - [`BoxKernel1D`] is a flat kernel of `trunc(2 * kappa / step)` taps, each
//!   `1 / len`.
//!
//! [`conv1d::convolve_same_f64`] returns the central slice of the full
//! convolution, starting at `(kernel_len - 1) / 2`, so its output always has
//! the signal's length. Values outside the signal are zero.

pub mod conv1d;
pub mod kernels1d;

pub use conv1d::{convolve_same, convolve_same_f64, same_offset};
pub use kernels1d::{BoxKernel1D, GaussianKernel1D, gaussian_pdf};
