use thiserror::Error;

use crate::chart::ChartKind;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Every failure the pipeline can raise. All of them abort the run.
#[derive(Debug, Error)]
pub enum VizError {
    /// Source file missing, unreadable, malformed or empty.
    #[error("failed to load dataset: {0}")]
    Load(String),

    #[error("column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// The chart kind needs a y column and none was supplied.
    #[error("{0} plot requires a y column")]
    MissingColumn(ChartKind),

    #[error("unrecognized chart kind '{0}' (expected histogram, scatter or line)")]
    InvalidChartKind(String),

    /// Outlier filtering needs numbers; the column holds text or nothing at all.
    #[error("column '{0}' has no numeric values to filter on")]
    ColumnNotNumeric(String),
}

pub type Result<T> = std::result::Result<T, VizError>;
