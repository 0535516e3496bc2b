use std::fs;
use std::ops::Range;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result, bail};
use image::RgbImage;
use plotters::coord::Shift;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::register_font;
use tunehve::{Histogram, HveDensities, histogram};

const FONT_FAMILY: &str = "sans-serif";
static FONT_DATA: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
const SLATE_BLUE: RGBColor = RGBColor(106, 90, 205);
const MARKER_RED: RGBColor = RGBColor(220, 20, 20);

const MIN_WIDTH: u32 = 200;
const MIN_HEIGHT: u32 = 240;

/// Figure geometry. The three panels share the x axis and split the height
/// 2:4:4 (sample histogram, Gaussian-smoothed density, coverage density).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FigureOptions {
    pub width: u32,
    pub height: u32,
    pub bins: usize,
}

impl Default for FigureOptions {
    fn default() -> Self {
        Self {
            width: 600,
            height: 600,
            bins: 50,
        }
    }
}

/// Renders the three-panel HVE figure.
///
/// Densities are drawn per unit of `y`. The shared x axis spans the grid
/// domain widened to every sample, so out-of-domain samples keep their
/// markers and histogram bars where they actually lie.
pub fn render_figure(
    densities: &HveDensities,
    samples: &[f64],
    opts: &FigureOptions,
) -> Result<RgbImage> {
    if opts.width < MIN_WIDTH || opts.height < MIN_HEIGHT {
        bail!(
            "figure {}x{} is too small, need at least {MIN_WIDTH}x{MIN_HEIGHT}",
            opts.width,
            opts.height,
        );
    }
    ensure_font()?;

    let hist = histogram(samples, opts.bins).context("binning samples for the histogram")?;
    let (w, h) = (opts.width, opts.height);
    let mut buf = vec![255u8; w as usize * h as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (w, h)).into_drawing_area();
        draw_figure(&root, densities, samples, &hist)?;
        root.present()?;
    }
    RgbImage::from_raw(w, h, buf).context("figure buffer does not match its dimensions")
}

pub fn save_figure(img: &RgbImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {}", parent.display()))?;
    }
    img.save(path)
        .with_context(|| format!("saving image {}", path.display()))
}

fn ensure_font() -> Result<()> {
    static REGISTERED: OnceLock<bool> = OnceLock::new();
    if !*REGISTERED.get_or_init(|| register_font(FONT_FAMILY, FontStyle::Normal, FONT_DATA).is_ok())
    {
        bail!("bundled font could not be loaded");
    }
    Ok(())
}

/// Shared x range: the grid domain, widened to cover every sample.
fn x_range(densities: &HveDensities, samples: &[f64]) -> Range<f64> {
    let grid = densities.grid();
    let (lo, hi) = samples
        .iter()
        .fold((grid.min(), grid.max()), |(lo, hi), &y| (lo.min(y), hi.max(y)));
    lo..hi
}

fn y_limit(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(0.0f64, f64::max);
    if max > 0.0 { max * 1.1 } else { 1.0 }
}

fn draw_figure<DB>(
    root: &DrawingArea<DB, Shift>,
    densities: &HveDensities,
    samples: &[f64],
    hist: &Histogram,
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let cfg = densities.config();
    let body = root.titled(
        &format!("κ = {}, σ = {}", cfg.kappa, cfg.sigma),
        (FONT_FAMILY, 18),
    )?;

    let (_, h) = body.dim_in_pixel();
    let (top, rest) = body.split_vertically(h * 2 / 10);
    let (middle, bottom) = rest.split_vertically(h * 4 / 10);

    let x = x_range(densities, samples);
    draw_histogram_panel(&top, x.clone(), hist, samples)?;
    draw_density_panel(
        &middle,
        "theoretical label density added gaussian noise",
        x.clone(),
        densities,
        &densities.gaussian_per_unit(),
        samples,
    )?;
    draw_density_panel(
        &bottom,
        "theoretical label coverage",
        x,
        densities,
        &densities.coverage_per_unit(),
        samples,
    )?;
    Ok(())
}

fn draw_histogram_panel<DB>(
    area: &DrawingArea<DB, Shift>,
    x: Range<f64>,
    hist: &Histogram,
    samples: &[f64],
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let y_max = hist.max_count().max(1) as f64 * 1.05;
    let mut chart = ChartBuilder::on(area)
        .caption("empirical label distribution", (FONT_FAMILY, 14))
        .margin(6)
        .x_label_area_size(28)
        .y_label_area_size(44)
        .build_cartesian_2d(x, 0.0..y_max)?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(6)
        .y_labels(3)
        .label_style((FONT_FAMILY, 11))
        .x_desc("y")
        .y_desc("count")
        .draw()?;

    let bars = hist
        .counts
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count > 0)
        .map(|(i, &count)| [(hist.edges[i], 0.0), (hist.edges[i + 1], count as f64)]);
    chart.draw_series(bars.clone().map(|r| Rectangle::new(r, RED.filled())))?;
    chart.draw_series(bars.map(|r| Rectangle::new(r, BLACK.stroke_width(1))))?;
    draw_markers(&mut chart, samples)?;
    Ok(())
}

fn draw_density_panel<DB>(
    area: &DrawingArea<DB, Shift>,
    title: &str,
    x: Range<f64>,
    densities: &HveDensities,
    values: &[f64],
    samples: &[f64],
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let mut chart = ChartBuilder::on(area)
        .caption(title, (FONT_FAMILY, 14))
        .margin(6)
        .x_label_area_size(28)
        .y_label_area_size(44)
        .build_cartesian_2d(x, 0.0..y_limit(values))?;
    chart
        .configure_mesh()
        .x_labels(8)
        .y_labels(4)
        .light_line_style(WHITE)
        .bold_line_style(BLACK.mix(0.15))
        .label_style((FONT_FAMILY, 11))
        .x_desc("y")
        .y_desc("density")
        .draw()?;

    let curve = || densities.grid().points().iter().copied().zip(values.iter().copied());
    chart.draw_series(AreaSeries::new(curve(), 0.0, SKY_BLUE.mix(0.4)))?;
    chart.draw_series(LineSeries::new(curve(), SLATE_BLUE.mix(0.6).stroke_width(2)))?;
    draw_markers(&mut chart, samples)?;
    Ok(())
}

fn draw_markers<DB>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    samples: &[f64],
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    chart.draw_series(
        samples
            .iter()
            .map(|&y| Circle::new((y, 0.0), 2, MARKER_RED.filled())),
    )?;
    Ok(())
}
