use crate::{Error, UniformGrid};

/// Nearest-bin empirical distribution of a sample over a [`UniformGrid`].
///
/// Every sample adds `1/n` to the entry of its nearest grid point, so the
/// entries sum to one. Samples outside the domain are not rejected; they land
/// on the closest boundary point and are counted in [`MassGrid::clamped`].
#[derive(Debug, Clone, PartialEq)]
pub struct MassGrid {
    values: Vec<f64>,
    samples: usize,
    clamped: usize,
}

impl MassGrid {
    pub fn accumulate(grid: &UniformGrid, samples: &[f64]) -> Result<Self, Error> {
        if samples.is_empty() {
            return Err(Error::EmptySample);
        }
        if let Some((index, &value)) = samples.iter().enumerate().find(|(_, y)| !y.is_finite()) {
            return Err(Error::NonFiniteSample { index, value });
        }

        let weight = 1.0 / samples.len() as f64;
        let mut values = vec![0.0f64; grid.len()];
        let mut clamped = 0usize;

        for &y in samples {
            if !grid.contains(y) {
                clamped += 1;
            }
            values[grid.nearest_index(y)] += weight;
        }

        if clamped > 0 {
            tracing::warn!(
                clamped,
                min = grid.min(),
                max = grid.max(),
                "samples outside the domain were assigned to boundary grid points"
            );
        }
        tracing::debug!(samples = samples.len(), clamped, "accumulated empirical mass");

        Ok(Self {
            values,
            samples: samples.len(),
            clamped,
        })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of samples that were accumulated.
    pub fn sample_count(&self) -> usize {
        self.samples
    }

    /// Number of samples that fell outside `[min, max]`.
    pub fn clamped(&self) -> usize {
        self.clamped
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::MassGrid;
    use crate::{Error, UniformGrid};

    #[test]
    fn single_sample_on_grid_point_yields_one_entry() {
        let grid = UniformGrid::new(0.0, 10.0, 11).unwrap();
        let mass = MassGrid::accumulate(&grid, &[3.0]).unwrap();

        for (i, &m) in mass.values().iter().enumerate() {
            if i == 3 {
                assert_eq!(m, 1.0);
            } else {
                assert_eq!(m, 0.0);
            }
        }
    }

    #[test]
    fn repeated_samples_sum_to_one() {
        let grid = UniformGrid::new(-4.0, 4.0, 10_000).unwrap();
        let samples = vec![1.234; 7];
        let mass = MassGrid::accumulate(&grid, &samples).unwrap();

        assert_abs_diff_eq!(mass.total(), 1.0, epsilon = 1e-9);
        let nonzero: Vec<usize> = mass
            .values()
            .iter()
            .enumerate()
            .filter(|(_, m)| **m != 0.0)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(nonzero, vec![grid.nearest_index(1.234)]);
    }

    #[test]
    fn weights_are_one_over_n_per_sample() {
        let grid = UniformGrid::new(0.0, 4.0, 5).unwrap();
        let mass = MassGrid::accumulate(&grid, &[0.0, 1.0, 1.0, 4.0]).unwrap();
        assert_eq!(mass.values(), &[0.25, 0.5, 0.0, 0.0, 0.25]);
        assert_eq!(mass.sample_count(), 4);
    }

    #[test]
    fn sample_at_domain_max_lands_on_last_index() {
        let grid = UniformGrid::new(0.0, 90.0, 10_000).unwrap();
        let mass = MassGrid::accumulate(&grid, &[90.0]).unwrap();
        assert_eq!(mass.values()[9_999], 1.0);
        assert_eq!(mass.clamped(), 0);
    }

    #[test]
    fn out_of_domain_samples_are_clamped_not_rejected() {
        let grid = UniformGrid::new(0.0, 1.0, 11).unwrap();
        let mass = MassGrid::accumulate(&grid, &[-5.0, 0.5, 7.0]).unwrap();
        assert_eq!(mass.clamped(), 2);
        assert_abs_diff_eq!(mass.values()[0], 1.0 / 3.0, epsilon = 1e-15);
        assert_abs_diff_eq!(mass.values()[10], 1.0 / 3.0, epsilon = 1e-15);
        assert_abs_diff_eq!(mass.total(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn empty_and_non_finite_samples_are_errors() {
        let grid = UniformGrid::new(0.0, 1.0, 11).unwrap();
        assert_eq!(MassGrid::accumulate(&grid, &[]), Err(Error::EmptySample));
        assert!(matches!(
            MassGrid::accumulate(&grid, &[0.2, f64::NAN]),
            Err(Error::NonFiniteSample { index: 1, .. })
        ));
    }
}
