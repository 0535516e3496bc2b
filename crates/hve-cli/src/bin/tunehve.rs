use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use hve_cli::{
    FigureOptions, RunReport, read_first_column, render_figure, report_path, save_figure,
    suffixed_path, write_densities_csv, write_json,
};
use tracing::Level;
use tunehve::HveConfig;

#[derive(Parser, Debug)]
#[command(name = "tunehve")]
#[command(about = "Visualize hard vicinal estimates (HVE) of regression labels to tune kappa and sigma")]
struct Cli {
    /// Data file; the first column holds the labels
    data: PathBuf,

    /// Output image path (format follows the extension)
    output: PathBuf,

    /// Upper bound of the label domain
    #[arg(long, default_value_t = 4.0, allow_negative_numbers = true)]
    max: f64,

    /// Lower bound of the label domain
    #[arg(long, default_value_t = -4.0, allow_negative_numbers = true)]
    min: f64,

    /// Box half-width; repeat to sweep several values
    #[arg(long, default_values_t = [0.5])]
    kappa: Vec<f64>,

    /// Gaussian bandwidth; repeat to sweep several values
    #[arg(long, default_values_t = [0.5])]
    sigma: Vec<f64>,

    /// Number of grid points over [min, max]
    #[arg(long, default_value_t = 10_000)]
    grid_size: usize,

    /// Treat the first line of the data file as data
    #[arg(long)]
    no_header: bool,

    /// Also write the grid and densities as CSV
    #[arg(long)]
    densities_csv: Option<PathBuf>,

    /// Figure width in pixels
    #[arg(long, default_value_t = 600)]
    width: u32,

    /// Figure height in pixels
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(cli)
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    if cli.max <= cli.min {
        bail!("max ({}) must be greater than min ({})", cli.max, cli.min);
    }
    ensure_file_exists(&cli.data, "data")?;

    let samples = read_first_column(&cli.data, !cli.no_header)?;
    tracing::info!(samples = samples.len(), data = %cli.data.display(), "loaded samples");

    let figure = FigureOptions {
        width: cli.width,
        height: cli.height,
        ..FigureOptions::default()
    };
    let sweep = cli.kappa.len() * cli.sigma.len() > 1;

    for &kappa in &cli.kappa {
        for &sigma in &cli.sigma {
            let cfg = HveConfig {
                domain_min: cli.min,
                domain_max: cli.max,
                grid_size: cli.grid_size,
                sigma,
                kappa,
            };
            let (image_path, csv_path) = if sweep {
                (
                    suffixed_path(&cli.output, kappa, sigma),
                    cli.densities_csv
                        .as_deref()
                        .map(|p| suffixed_path(p, kappa, sigma)),
                )
            } else {
                (cli.output.clone(), cli.densities_csv.clone())
            };

            run_one(&cfg, &samples, &figure, &image_path, csv_path.as_deref())?;
        }
    }

    Ok(())
}

fn run_one(
    cfg: &HveConfig,
    samples: &[f64],
    figure: &FigureOptions,
    image_path: &Path,
    csv_path: Option<&Path>,
) -> Result<()> {
    let densities = cfg
        .estimate(samples)
        .with_context(|| format!("estimating HVE for kappa={}, sigma={}", cfg.kappa, cfg.sigma))?;

    let img = render_figure(&densities, samples, figure)?;
    save_figure(&img, image_path)?;

    let report = RunReport::new(&densities, image_path);
    let json_path = report_path(image_path);
    write_json(&json_path, &report)?;

    if let Some(csv_path) = csv_path {
        write_densities_csv(csv_path, &densities)?;
        tracing::info!(path = %csv_path.display(), "wrote densities");
    }

    tracing::info!(
        kappa = cfg.kappa,
        sigma = cfg.sigma,
        image = %image_path.display(),
        report = %json_path.display(),
        "wrote figure"
    );
    Ok(())
}

fn ensure_file_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} file does not exist: {}", what, path.display());
    }
    if !path.is_file() {
        bail!("{} path is not a file: {}", what, path.display());
    }
    Ok(())
}
