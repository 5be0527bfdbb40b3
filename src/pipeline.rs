use std::path::Path;

use serde::Serialize;

use crate::chart::{ChartKind, PlotInstruction, PlotResolver, Stage};
use crate::data::filter::filter_columns;
use crate::data::loader;
use crate::data::model::Table;
use crate::error::Result;
use crate::units::UnitCatalog;

/// The user's chart request, as parsed from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotRequest {
    pub kind: ChartKind,
    pub x_column: String,
    pub y_column: Option<String>,
}

impl PlotRequest {
    /// Columns outliers are removed from, x first.
    pub fn filter_columns(&self) -> Vec<&str> {
        std::iter::once(self.x_column.as_str())
            .chain(self.y_column.as_deref())
            .collect()
    }
}

/// One chart ready to hand to the renderer.
#[derive(Debug, Clone)]
pub struct Figure {
    pub instruction: PlotInstruction,
    pub table: Table,
}

/// The two charts of a run: before and after outlier removal.
#[derive(Debug, Clone)]
pub struct PlotPair {
    pub raw: Figure,
    pub filtered: Figure,
}

/// Serializable summary of a [`PlotPair`], printed by `--dry-run`.
#[derive(Debug, Serialize)]
pub struct PlotSummary<'a> {
    pub raw: &'a PlotInstruction,
    pub raw_rows: usize,
    pub filtered: &'a PlotInstruction,
    pub filtered_rows: usize,
}

impl PlotPair {
    pub fn figures(&self) -> [&Figure; 2] {
        [&self.raw, &self.filtered]
    }

    pub fn summary(&self) -> PlotSummary<'_> {
        PlotSummary {
            raw: &self.raw.instruction,
            raw_rows: self.raw.table.len(),
            filtered: &self.filtered.instruction,
            filtered_rows: self.filtered.table.len(),
        }
    }
}

/// Resolve the raw chart, filter outliers, and resolve the filtered chart.
///
/// The raw instruction is resolved before any filtering so a bad request
/// fails before work is done.
pub fn build_plots(table: Table, request: &PlotRequest, catalog: &UnitCatalog) -> Result<PlotPair> {
    let resolver = PlotResolver::new(catalog);
    let y_column = request.y_column.as_deref();

    let raw = resolver.resolve(&table, request.kind, &request.x_column, y_column, Stage::Raw)?;
    if request.kind == ChartKind::Histogram {
        if let Some(y) = y_column {
            log::warn!("Histogram ignores y column '{y}'; it is only used for outlier filtering");
        }
    }

    let filtered_table = filter_columns(&table, request.filter_columns().as_slice())?;
    let filtered = resolver.resolve(
        &filtered_table,
        request.kind,
        &request.x_column,
        y_column,
        Stage::Filtered,
    )?;

    Ok(PlotPair {
        raw: Figure {
            instruction: raw,
            table,
        },
        filtered: Figure {
            instruction: filtered,
            table: filtered_table,
        },
    })
}

/// Load `path`, clean it and build both charts.
pub fn run(path: &Path, request: &PlotRequest, catalog: &UnitCatalog) -> Result<PlotPair> {
    let table = loader::load(path)?;
    log::info!("Cleaned dataset has {} rows", table.len());
    build_plots(table, request, catalog)
}
