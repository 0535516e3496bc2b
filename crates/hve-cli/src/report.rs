use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tunehve::{HveConfig, HveDensities};

/// Summary written next to each rendered figure.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub config: HveConfig,
    pub sample_count: usize,
    pub clamped_samples: usize,
    pub grid_step: f64,
    pub box_kernel_len: usize,
    pub gaussian_peak: f64,
    pub coverage_peak: f64,
    pub image: PathBuf,
}

impl RunReport {
    pub fn new(densities: &HveDensities, image: &Path) -> Self {
        Self {
            config: *densities.config(),
            sample_count: densities.mass().sample_count(),
            clamped_samples: densities.mass().clamped(),
            grid_step: densities.grid().step(),
            box_kernel_len: densities.box_len(),
            gaussian_peak: densities.gaussian_peak(),
            coverage_peak: densities.coverage_peak(),
            image: image.to_path_buf(),
        }
    }
}

/// `figure.png` -> `figure.json`.
pub fn report_path(image: &Path) -> PathBuf {
    image.with_extension("json")
}

/// Inserts `_kappa{kappa}_sigma{sigma}` before the extension, used when one
/// invocation sweeps several bandwidth pairs.
pub fn suffixed_path(path: &Path, kappa: f64, sigma: f64) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "hve".to_string());
    let name = match path.extension() {
        Some(ext) => format!("{stem}_kappa{kappa}_sigma{sigma}.{}", ext.to_string_lossy()),
        None => format!("{stem}_kappa{kappa}_sigma{sigma}"),
    };
    path.with_file_name(name)
}

pub fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(path, bytes).with_context(|| format!("writing json {}", path.display()))
}

/// Writes `y,mass,gaussian,coverage` rows, one per grid point.
pub fn write_densities_csv(path: &Path, densities: &HveDensities) -> Result<()> {
    let file = fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);

    writeln!(out, "y,mass,gaussian,coverage").context("writing csv header")?;
    let rows = densities
        .grid()
        .points()
        .iter()
        .zip(densities.mass().values())
        .zip(densities.gaussian())
        .zip(densities.coverage());
    for (((y, m), g), c) in rows {
        writeln!(out, "{y},{m},{g},{c}").context("writing csv row")?;
    }
    out.flush().context("flushing csv")
}
