use hve_core::Error;

/// Equal-width counts over the sample range.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `bins + 1` bin edges, ascending.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// Counts `samples` into `bins` equal-width bins spanning `[min, max]` of the
/// data. Bins are half-open except the last, which also takes `max`. A
/// constant sample is given the range `[v - 0.5, v + 0.5]`.
pub fn histogram(samples: &[f64], bins: usize) -> Result<Histogram, Error> {
    assert!(bins > 0, "histogram needs at least one bin");

    if samples.is_empty() {
        return Err(Error::EmptySample);
    }
    if let Some((index, &value)) = samples.iter().enumerate().find(|(_, y)| !y.is_finite()) {
        return Err(Error::NonFiniteSample { index, value });
    }

    let mut lo = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let mut edges: Vec<f64> = (0..=bins).map(|i| lo + i as f64 * width).collect();
    edges[bins] = hi;

    let mut counts = vec![0usize; bins];
    for &y in samples {
        let mut idx = (((y - lo) / (hi - lo)) * bins as f64) as usize;
        idx = idx.min(bins - 1);
        // Keep the assignment consistent with the stored edges.
        if idx > 0 && y < edges[idx] {
            idx -= 1;
        } else if idx + 1 < bins && y >= edges[idx + 1] {
            idx += 1;
        }
        counts[idx] += 1;
    }

    Ok(Histogram { edges, counts })
}
