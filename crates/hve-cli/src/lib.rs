//! Collaborators of the `tunehve` binary: the sample loader, the figure
//! renderer and the run report writers.

pub mod load;
pub mod render;
pub mod report;

pub use load::{parse_first_column, read_first_column};
pub use render::{FigureOptions, render_figure, save_figure};
pub use report::{RunReport, report_path, suffixed_path, write_densities_csv, write_json};
