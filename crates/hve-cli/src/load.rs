use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

/// Reads the first column of a comma-separated file as `f64` samples.
pub fn read_first_column(path: &Path, has_header: bool) -> Result<Vec<f64>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_first_column(&text, has_header).with_context(|| format!("parsing {}", path.display()))
}

/// Parses the first comma-separated cell of every non-blank line.
///
/// With `has_header` the first non-blank line is skipped. Cells are trimmed
/// and may be wrapped in double quotes.
pub fn parse_first_column(text: &str, has_header: bool) -> Result<Vec<f64>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());
    if has_header {
        lines.next();
    }

    let mut values = Vec::new();
    for (i, line) in lines {
        let cell = line.split(',').next().unwrap_or_default().trim();
        let cell = cell.trim_matches('"').trim();
        let value: f64 = cell
            .parse()
            .with_context(|| format!("line {}: '{cell}' is not a number", i + 1))?;
        if !value.is_finite() {
            bail!("line {}: sample must be finite, got '{cell}'", i + 1);
        }
        values.push(value);
    }

    if values.is_empty() {
        bail!("no samples found");
    }
    Ok(values)
}
