use crate::Error;

/// Evenly spaced points over `[min, max]`, both ends included.
///
/// `points[i] = min + i * step` for every interior index and the last point
/// is pinned to `max` exactly, so a sample equal to `max` always lands on the
/// final index.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformGrid {
    min: f64,
    max: f64,
    step: f64,
    points: Vec<f64>,
}

impl UniformGrid {
    pub fn new(min: f64, max: f64, grid_size: usize) -> Result<Self, Error> {
        if !min.is_finite() || !max.is_finite() || max <= min {
            return Err(Error::InvalidDomain { min, max });
        }
        if grid_size < 2 {
            return Err(Error::InvalidGridSize { grid_size });
        }

        let step = (max - min) / (grid_size - 1) as f64;
        if step <= 0.0 || !step.is_finite() {
            return Err(Error::InvalidDomain { min, max });
        }

        let mut points: Vec<f64> = (0..grid_size).map(|i| min + i as f64 * step).collect();
        points[grid_size - 1] = max;

        tracing::debug!(min, max, grid_size, step, "built uniform grid");

        Ok(Self {
            min,
            max,
            step,
            points,
        })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn into_points(self) -> Vec<f64> {
        self.points
    }

    /// Index of the grid point used as the zero offset for kernels laid over
    /// the whole grid: `len / 2`.
    pub fn center_index(&self) -> usize {
        self.points.len() / 2
    }

    /// Offsets `points[i] - points[center_index()]` for every grid index.
    pub fn centered_offsets(&self) -> Vec<f64> {
        let origin = self.points[self.center_index()];
        self.points.iter().map(|&p| p - origin).collect()
    }

    /// Returns `true` when `y` lies inside `[min, max]`.
    pub fn contains(&self, y: f64) -> bool {
        y >= self.min && y <= self.max
    }

    /// Index of the grid point closest to `y`.
    ///
    /// Equivalent to an argmin of `|points[i] - y|` over the whole grid with
    /// ties resolved to the lowest index. Values outside the domain map to
    /// the nearest boundary point.
    pub fn nearest_index(&self, y: f64) -> usize {
        let last = self.points.len() - 1;

        let est = ((y - self.min) / self.step).floor();
        let est = if est.is_nan() || est <= 0.0 {
            0
        } else {
            (est as usize).min(last)
        };

        // The rounded estimate can be off by one in either direction; the
        // true argmin is among its immediate neighbours.
        let lo = est.saturating_sub(1);
        let hi = (est + 2).min(last);

        let mut best = lo;
        let mut best_dist = (self.points[lo] - y).abs();
        for (i, &p) in self.points.iter().enumerate().take(hi + 1).skip(lo + 1) {
            let dist = (p - y).abs();
            if dist < best_dist {
                best = i;
                best_dist = dist;
            }
        }
        best
    }
}
