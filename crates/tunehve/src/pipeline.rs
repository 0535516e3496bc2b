use hve_core::{Error, MassGrid, UniformGrid};
use hve_smooth::{BoxKernel1D, GaussianKernel1D, convolve_same_f64};
use serde::Serialize;

/// Parameters of one HVE run.
///
/// Defaults match the command-line tool: domain `[-4, 4]`, `10_000` grid
/// points and `sigma = kappa = 0.5`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HveConfig {
    pub domain_min: f64,
    pub domain_max: f64,
    pub grid_size: usize,
    pub sigma: f64,
    pub kappa: f64,
}

impl Default for HveConfig {
    fn default() -> Self {
        Self {
            domain_min: -4.0,
            domain_max: 4.0,
            grid_size: 10_000,
            sigma: 0.5,
            kappa: 0.5,
        }
    }
}

impl HveConfig {
    /// Runs the full pipeline over `samples`.
    ///
    /// Every parameter is validated before the first convolution: the domain
    /// when the grid is built, the sample set when mass is accumulated, then
    /// `sigma` and `kappa` when their kernels are built.
    pub fn estimate(&self, samples: &[f64]) -> Result<HveDensities, Error> {
        let grid = UniformGrid::new(self.domain_min, self.domain_max, self.grid_size)?;
        let mass = MassGrid::accumulate(&grid, samples)?;
        let gaussian_kernel = GaussianKernel1D::new(&grid, self.sigma)?;
        let box_kernel = BoxKernel1D::new(&grid, self.kappa)?;

        let mut gaussian = vec![0.0f64; grid.len()];
        convolve_same_f64(mass.values(), &gaussian_kernel.weights, &mut gaussian);

        // The box smooths the Gaussian-smoothed density, not the raw mass.
        let mut coverage = vec![0.0f64; grid.len()];
        convolve_same_f64(&gaussian, &box_kernel.weights, &mut coverage);

        tracing::debug!(
            sigma = self.sigma,
            kappa = self.kappa,
            box_len = box_kernel.len(),
            "computed hve densities"
        );

        Ok(HveDensities {
            config: *self,
            grid,
            mass,
            gaussian,
            coverage,
            box_len: box_kernel.len(),
        })
    }
}

/// Output of [`HveConfig::estimate`]: the grid, the empirical mass and both
/// smoothed densities, all index-aligned.
///
/// Densities carry the same units as the mass (probability per grid point).
/// They are non-negative but not renormalized; mass that the "same" crop
/// pushes past either end of the grid is simply lost.
#[derive(Debug, Clone)]
pub struct HveDensities {
    config: HveConfig,
    grid: UniformGrid,
    mass: MassGrid,
    gaussian: Vec<f64>,
    coverage: Vec<f64>,
    box_len: usize,
}

impl HveDensities {
    pub fn config(&self) -> &HveConfig {
        &self.config
    }

    pub fn grid(&self) -> &UniformGrid {
        &self.grid
    }

    pub fn mass(&self) -> &MassGrid {
        &self.mass
    }

    /// Mass convolved with the Gaussian kernel.
    pub fn gaussian(&self) -> &[f64] {
        &self.gaussian
    }

    /// Gaussian-smoothed density convolved with the box kernel.
    pub fn coverage(&self) -> &[f64] {
        &self.coverage
    }

    pub fn box_len(&self) -> usize {
        self.box_len
    }

    /// [`Self::gaussian`] divided by the grid step, i.e. per unit of `y`.
    pub fn gaussian_per_unit(&self) -> Vec<f64> {
        per_unit(&self.gaussian, self.grid.step())
    }

    /// [`Self::coverage`] divided by the grid step, i.e. per unit of `y`.
    pub fn coverage_per_unit(&self) -> Vec<f64> {
        per_unit(&self.coverage, self.grid.step())
    }

    /// Grid location of the largest Gaussian-smoothed value.
    pub fn gaussian_peak(&self) -> f64 {
        self.grid.points()[argmax(&self.gaussian)]
    }

    /// Grid location of the largest coverage value.
    pub fn coverage_peak(&self) -> f64 {
        self.grid.points()[argmax(&self.coverage)]
    }

    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        (self.grid.into_points(), self.gaussian, self.coverage)
    }
}

/// Returns `(grid, gaussian_density, box_density)`, each `grid_size` long.
pub fn compute_hve_densities(
    samples: &[f64],
    domain_min: f64,
    domain_max: f64,
    grid_size: usize,
    sigma: f64,
    kappa: f64,
) -> Result<(Vec<f64>, Vec<f64>, Vec<f64>), Error> {
    let config = HveConfig {
        domain_min,
        domain_max,
        grid_size,
        sigma,
        kappa,
    };
    Ok(config.estimate(samples)?.into_parts())
}

fn per_unit(values: &[f64], step: f64) -> Vec<f64> {
    values.iter().map(|v| v / step).collect()
}

/// First index of the maximum.
fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate() {
        if v > values[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use hve_core::Error;
    use hve_smooth::{BoxKernel1D, convolve_same};

    use super::{HveConfig, argmax, compute_hve_densities};

    fn reference_config() -> HveConfig {
        HveConfig {
            domain_min: 0.0,
            domain_max: 90.0,
            grid_size: 10_000,
            sigma: 0.3,
            kappa: 2.0,
        }
    }

    #[test]
    fn single_label_scenario() {
        let cfg = reference_config();
        let out = cfg.estimate(&[45.0]).unwrap();
        let grid = out.grid();

        assert_eq!(grid.len(), 10_000);
        assert_eq!(grid.points()[0], 0.0);
        assert_eq!(grid.points()[9_999], 90.0);
        assert_eq!(out.gaussian().len(), 10_000);
        assert_eq!(out.coverage().len(), 10_000);

        // The grid-wide kernel is anchored at index len/2 while the "same"
        // crop starts at (len-1)/2, so for an even grid the peak sits one
        // index to the right of the sample's bin.
        let bin = grid.nearest_index(45.0);
        assert_eq!(argmax(out.gaussian()), bin + 1);
        assert!((out.gaussian_peak() - 45.0).abs() < 2.0 * grid.step());

        assert!(out.gaussian().iter().all(|&v| v >= 0.0));
        assert!(out.coverage().iter().all(|&v| v >= 0.0));

        let gaussian_total: f64 = out.gaussian().iter().sum();
        let coverage_total: f64 = out.coverage().iter().sum();
        assert_abs_diff_eq!(gaussian_total, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(coverage_total, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn coverage_is_wider_and_flatter_than_gaussian() {
        let out = reference_config().estimate(&[45.0]).unwrap();

        let peak_g = out.gaussian().iter().cloned().fold(0.0, f64::max);
        let peak_c = out.coverage().iter().cloned().fold(0.0, f64::max);
        assert!(peak_c < peak_g);

        let support = |v: &[f64]| v.iter().filter(|&&x| x > 1e-9).count();
        assert!(support(out.coverage()) > support(out.gaussian()));
        assert!((out.coverage_peak() - 45.0).abs() < 2.0);
    }

    #[test]
    fn box_smooths_the_gaussian_density_not_the_mass() {
        let cfg = HveConfig {
            domain_min: -4.0,
            domain_max: 4.0,
            grid_size: 1_025,
            sigma: 0.2,
            kappa: 0.25,
        };
        let out = cfg.estimate(&[-1.0, 0.25, 0.25, 2.0]).unwrap();
        let box_kernel = BoxKernel1D::new(out.grid(), cfg.kappa).unwrap();

        assert_eq!(out.box_len(), 64);
        assert_eq!(
            out.coverage(),
            convolve_same(out.gaussian(), &box_kernel.weights).as_slice()
        );
    }

    #[test]
    fn per_unit_densities_integrate_to_one() {
        let cfg = HveConfig {
            grid_size: 2_001,
            ..HveConfig::default()
        };
        let out = cfg.estimate(&[-0.5, 0.0, 0.1, 0.8]).unwrap();
        let step = out.grid().step();

        let integral: f64 = out.gaussian_per_unit().iter().map(|v| v * step).sum();
        assert_abs_diff_eq!(integral, 1.0, epsilon = 1e-6);
        let integral: f64 = out.coverage_per_unit().iter().map(|v| v * step).sum();
        assert_abs_diff_eq!(integral, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn sample_at_domain_max_is_kept() {
        let cfg = reference_config();
        let out = cfg.estimate(&[90.0]).unwrap();

        assert_eq!(out.mass().values()[9_999], 1.0);
        assert_eq!(out.mass().clamped(), 0);
        assert!(out.gaussian()[9_999] > 0.0);
        assert!(out.coverage().iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn box_wider_than_domain_keeps_grid_length() {
        let cfg = HveConfig {
            grid_size: 1_025,
            kappa: 5.0,
            ..HveConfig::default()
        };
        let out = cfg.estimate(&[0.0]).unwrap();
        assert_eq!(out.box_len(), 1_280);
        assert_eq!(out.coverage().len(), 1_025);
        assert!(out.coverage().iter().all(|&v| v >= 0.0));

        let (grid, gaussian, coverage) =
            compute_hve_densities(&[0.0], -4.0, 4.0, 1_025, 0.5, 5.0).unwrap();
        assert_eq!(grid.len(), 1_025);
        assert_eq!(gaussian.len(), 1_025);
        assert_eq!(coverage.len(), 1_025);
    }

    #[test]
    fn invalid_inputs_fail_before_smoothing() {
        assert_eq!(
            compute_hve_densities(&[1.0], 5.0, 5.0, 100, 0.5, 0.5),
            Err(Error::InvalidDomain { min: 5.0, max: 5.0 })
        );
        assert_eq!(
            compute_hve_densities(&[], 0.0, 1.0, 100, 0.5, 0.5),
            Err(Error::EmptySample)
        );
        assert_eq!(
            compute_hve_densities(&[0.5], 0.0, 1.0, 100, 0.0, 0.5),
            Err(Error::InvalidBandwidth {
                name: "sigma",
                value: 0.0
            })
        );
        assert_eq!(
            compute_hve_densities(&[0.5], 0.0, 1.0, 100, 0.1, 1e-4),
            Err(Error::InvalidBandwidth {
                name: "kappa",
                value: 1e-4
            })
        );
        assert_eq!(
            compute_hve_densities(&[0.5], 0.0, 1.0, 1, 0.1, 0.1),
            Err(Error::InvalidGridSize { grid_size: 1 })
        );
    }

    #[test]
    fn tuple_api_matches_config_api() {
        let (grid, gaussian, coverage) =
            compute_hve_densities(&[0.3, -1.2], -4.0, 4.0, 500, 0.4, 0.25).unwrap();
        let cfg = HveConfig {
            grid_size: 500,
            sigma: 0.4,
            kappa: 0.25,
            ..HveConfig::default()
        };
        let out = cfg.estimate(&[0.3, -1.2]).unwrap();

        assert_eq!(grid.as_slice(), out.grid().points());
        assert_eq!(gaussian.as_slice(), out.gaussian());
        assert_eq!(coverage.as_slice(), out.coverage());
    }
}
