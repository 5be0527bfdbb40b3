//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::chart::ChartKind;
use crate::pipeline::PlotRequest;

/// Dataset read when `--data` is not given.
pub const DEFAULT_DATA_FILE: &str = "dielectron.csv";

/// Command-line arguments for dielectron-viz
#[derive(Clone, Parser, Debug)]
#[command(
    name = "dielectron-viz",
    version,
    about = "Visualize CERN electron collision data before and after IQR outlier filtering"
)]
pub struct Args {
    /// Type of graph to plot
    #[arg(value_enum, value_name = "CHART")]
    pub chart: ChartKind,

    /// Name of the x column to plot
    #[arg(value_name = "X_COLUMN")]
    pub x_column: String,

    /// Name of the y column to plot (required for scatter and line)
    #[arg(value_name = "Y_COLUMN")]
    pub y_column: Option<String>,

    /// Dataset to read (.csv, .json or .parquet)
    #[arg(long = "data", value_name = "PATH", default_value = DEFAULT_DATA_FILE)]
    pub data: PathBuf,

    /// Print both plot instructions as JSON instead of opening a window
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

impl Args {
    pub fn request(&self) -> PlotRequest {
        PlotRequest {
            kind: self.chart,
            x_column: self.x_column.clone(),
            y_column: self.y_column.clone(),
        }
    }
}
