use std::f64::consts::PI;

use hve_core::{Error, UniformGrid};

/// Gaussian probability density with standard deviation `sigma`, at `x`.
///
/// No validation: callers building kernels go through [`GaussianKernel1D`].
#[inline]
pub fn gaussian_pdf(x: f64, sigma: f64) -> f64 {
    (-(x * x) / (2.0 * sigma * sigma)).exp() / (2.0 * PI).sqrt() / sigma
}

/// Gaussian kernel sampled over a whole [`UniformGrid`].
///
/// Conventions:
/// - one weight per grid point, offsets measured from
///   `points[grid.center_index()]`, so `anchor == len / 2`.
/// - `weights[i] = gaussian_pdf(offset_i, sigma) * step`, which makes the
///   discrete convolution approximate the continuous one.
/// - no renormalization: `sum(weights) ~= 1` only while the window covers the
///   bulk of the Gaussian.
#[derive(Debug, Clone)]
pub struct GaussianKernel1D {
    pub sigma: f64,
    pub anchor: usize,
    pub weights: Vec<f64>,
}

impl GaussianKernel1D {
    pub fn new(grid: &UniformGrid, sigma: f64) -> Result<Self, Error> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(Error::InvalidBandwidth {
                name: "sigma",
                value: sigma,
            });
        }

        let step = grid.step();
        let weights: Vec<f64> = grid
            .centered_offsets()
            .into_iter()
            .map(|x| gaussian_pdf(x, sigma) * step)
            .collect();

        tracing::debug!(sigma, len = weights.len(), "built gaussian kernel");

        Ok(Self {
            sigma,
            anchor: grid.center_index(),
            weights,
        })
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Normalized uniform (box) kernel covering `2 * kappa` in domain units.
///
/// Length is `trunc(2 * kappa / step)` and every weight is `1 / len`.
#[derive(Debug, Clone)]
pub struct BoxKernel1D {
    pub kappa: f64,
    pub weights: Vec<f64>,
}

impl BoxKernel1D {
    /// Fails when `kappa` is not a positive finite number or when it is too
    /// small to cover a single grid step. A box wider than the grid is valid;
    /// the "same" convolution keeps the signal length regardless.
    pub fn new(grid: &UniformGrid, kappa: f64) -> Result<Self, Error> {
        let invalid = Error::InvalidBandwidth {
            name: "kappa",
            value: kappa,
        };
        if !kappa.is_finite() || kappa <= 0.0 {
            return Err(invalid);
        }

        let width = (2.0 * kappa / grid.step()).trunc();
        if !width.is_finite() || width < 1.0 {
            return Err(invalid);
        }

        let len = width as usize;
        let weights = vec![1.0 / len as f64; len];

        tracing::debug!(kappa, len, "built box kernel");

        Ok(Self { kappa, weights })
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}
