use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::Serialize;

use crate::data::model::HasColumns;
use crate::error::{Result, VizError};
use crate::units::UnitCatalog;

// ---------------------------------------------------------------------------
// Chart kind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Distribution of a single column
    Histogram,
    /// Y column against x column as points
    Scatter,
    /// Y column against x column as a line
    Line,
}

impl ChartKind {
    /// Scatter and line plots need a second column.
    pub fn requires_y(self) -> bool {
        matches!(self, ChartKind::Scatter | ChartKind::Line)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ChartKind::Histogram => "histogram",
            ChartKind::Scatter => "scatter",
            ChartKind::Line => "line",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "histogram" => Ok(ChartKind::Histogram),
            "scatter" => Ok(ChartKind::Scatter),
            "line" => Ok(ChartKind::Line),
            other => Err(VizError::InvalidChartKind(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Stage: raw data or IQR-filtered data
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Raw,
    Filtered,
}

impl Stage {
    pub fn title_suffix(self) -> &'static str {
        match self {
            Stage::Raw => "",
            Stage::Filtered => " (Filtered)",
        }
    }

    /// Heading of the figure this stage is drawn in.
    pub fn window_title(self) -> &'static str {
        match self {
            Stage::Raw => "Raw Data",
            Stage::Filtered => "IQR Filtered Data",
        }
    }
}

// ---------------------------------------------------------------------------
// Plot instruction
// ---------------------------------------------------------------------------

/// Everything the renderer needs to know about one chart, except the data.
///
/// `y_column` and `y_label` are set exactly when the kind is scatter or line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotInstruction {
    pub kind: ChartKind,
    pub stage: Stage,
    pub x_column: String,
    pub y_column: Option<String>,
    pub x_label: String,
    pub y_label: Option<String>,
    pub title: String,
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// Turns a chart request into a [`PlotInstruction`], labelling axes from an
/// injected [`UnitCatalog`].
#[derive(Debug, Clone, Copy)]
pub struct PlotResolver<'a> {
    catalog: &'a UnitCatalog,
}

impl<'a> PlotResolver<'a> {
    pub fn new(catalog: &'a UnitCatalog) -> Self {
        PlotResolver { catalog }
    }

    /// Validate the request against `table` and build the instruction.
    ///
    /// Checks, in order: a y column is supplied when the kind needs one, the
    /// x column exists, the y column (if supplied) exists. A y column given
    /// for a histogram is validated but not drawn.
    pub fn resolve(
        &self,
        table: &impl HasColumns,
        kind: ChartKind,
        x_column: &str,
        y_column: Option<&str>,
        stage: Stage,
    ) -> Result<PlotInstruction> {
        // Only scatter and line plots draw a y column; a histogram's y is
        // checked for presence but left out of the instruction.
        let suffix = stage.title_suffix();
        let required_y = || y_column.ok_or(VizError::MissingColumn(kind));
        let (drawn_y, title) = match kind {
            ChartKind::Histogram => (None, format!("Distribution of {x_column}{suffix}")),
            ChartKind::Scatter => {
                let y = required_y()?;
                (Some(y), format!("Scatter Plot of {y} vs {x_column}{suffix}"))
            }
            ChartKind::Line => {
                let y = required_y()?;
                (Some(y), format!("Line Plot of {y} vs {x_column}{suffix}"))
            }
        };
        for column in std::iter::once(x_column).chain(y_column) {
            if !table.has_column(column) {
                return Err(VizError::ColumnNotFound(column.to_string()));
            }
        }

        let instruction = PlotInstruction {
            kind,
            stage,
            x_column: x_column.to_string(),
            y_column: drawn_y.map(str::to_string),
            x_label: self.catalog.axis_label(x_column),
            y_label: drawn_y.map(|y| self.catalog.axis_label(y)),
            title,
        };

        log::info!("Resolved {} plot: {}", instruction.kind, instruction.title);
        Ok(instruction)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    /// Stand-in table that only knows its column names.
    struct FakeTable(BTreeSet<&'static str>);

    impl FakeTable {
        fn with(names: &[&'static str]) -> Self {
            FakeTable(names.iter().copied().collect())
        }
    }

    impl HasColumns for FakeTable {
        fn has_column(&self, name: &str) -> bool {
            self.0.contains(name)
        }
    }

    fn dielectron_table() -> FakeTable {
        FakeTable::with(&["E1", "pt1", "pt2", "phi1", "eta1", "M"])
    }

    #[test]
    fn histogram_labels_and_title() {
        let catalog = UnitCatalog::dielectron();
        let resolver = PlotResolver::new(&catalog);
        let plot = resolver
            .resolve(&dielectron_table(), ChartKind::Histogram, "pt1", None, Stage::Raw)
            .unwrap();
        assert_eq!(plot.x_label, "pt1 (GeV)");
        assert_eq!(plot.title, "Distribution of pt1");
        assert_eq!(plot.y_column, None);
        assert_eq!(plot.y_label, None);
    }

    #[test]
    fn filtered_stage_adds_suffix() {
        let catalog = UnitCatalog::dielectron();
        let resolver = PlotResolver::new(&catalog);
        let plot = resolver
            .resolve(&dielectron_table(), ChartKind::Histogram, "M", None, Stage::Filtered)
            .unwrap();
        assert_eq!(plot.title, "Distribution of M (Filtered)");
    }

    #[test]
    fn scatter_requires_y_column() {
        let catalog = UnitCatalog::dielectron();
        let resolver = PlotResolver::new(&catalog);
        for kind in [ChartKind::Scatter, ChartKind::Line] {
            let err = resolver
                .resolve(&dielectron_table(), kind, "pt1", None, Stage::Raw)
                .unwrap_err();
            assert!(matches!(err, VizError::MissingColumn(k) if k == kind));
        }
    }

    #[test]
    fn scatter_labels_and_title() {
        let catalog = UnitCatalog::dielectron();
        let resolver = PlotResolver::new(&catalog);
        let plot = resolver
            .resolve(&dielectron_table(), ChartKind::Scatter, "pt1", Some("pt2"), Stage::Raw)
            .unwrap();
        assert_eq!(plot.title, "Scatter Plot of pt2 vs pt1");
        assert_eq!(plot.x_label, "pt1 (GeV)");
        assert_eq!(plot.y_label.as_deref(), Some("pt2 (GeV)"));
    }

    #[test]
    fn line_title_with_unknown_unit() {
        let catalog = UnitCatalog::dielectron();
        let resolver = PlotResolver::new(&catalog);
        let plot = resolver
            .resolve(&dielectron_table(), ChartKind::Line, "eta1", Some("phi1"), Stage::Filtered)
            .unwrap();
        assert_eq!(plot.title, "Line Plot of phi1 vs eta1 (Filtered)");
        assert_eq!(plot.x_label, "eta1 ()");
        assert_eq!(plot.y_label.as_deref(), Some("phi1 (rad)"));
    }

    #[test]
    fn unknown_columns_are_reported() {
        let catalog = UnitCatalog::dielectron();
        let resolver = PlotResolver::new(&catalog);
        let table = dielectron_table();
        let err = resolver
            .resolve(&table, ChartKind::Histogram, "E9", None, Stage::Raw)
            .unwrap_err();
        assert!(matches!(err, VizError::ColumnNotFound(c) if c == "E9"));

        let err = resolver
            .resolve(&table, ChartKind::Scatter, "pt1", Some("pt9"), Stage::Raw)
            .unwrap_err();
        assert!(matches!(err, VizError::ColumnNotFound(c) if c == "pt9"));
    }

    #[test]
    fn missing_y_is_reported_before_unknown_x() {
        let catalog = UnitCatalog::dielectron();
        let resolver = PlotResolver::new(&catalog);
        let err = resolver
            .resolve(&FakeTable::with(&[]), ChartKind::Line, "E9", None, Stage::Raw)
            .unwrap_err();
        assert!(matches!(err, VizError::MissingColumn(ChartKind::Line)));
    }

    #[test]
    fn histogram_ignores_y_column() {
        let catalog = UnitCatalog::dielectron();
        let resolver = PlotResolver::new(&catalog);
        let plot = resolver
            .resolve(&dielectron_table(), ChartKind::Histogram, "pt1", Some("pt2"), Stage::Raw)
            .unwrap();
        assert_eq!(plot.y_column, None);
        assert_eq!(plot.title, "Distribution of pt1");
    }

    #[test]
    fn resolver_uses_injected_catalog() {
        let catalog = UnitCatalog::new([("pt1", "MeV")]);
        let resolver = PlotResolver::new(&catalog);
        let plot = resolver
            .resolve(&dielectron_table(), ChartKind::Histogram, "pt1", None, Stage::Raw)
            .unwrap();
        assert_eq!(plot.x_label, "pt1 (MeV)");
    }

    #[test]
    fn instruction_keeps_requested_kind() {
        let catalog = UnitCatalog::dielectron();
        let resolver = PlotResolver::new(&catalog);
        for kind in [ChartKind::Histogram, ChartKind::Scatter, ChartKind::Line] {
            let plot = resolver
                .resolve(&dielectron_table(), kind, "pt1", Some("pt2"), Stage::Raw)
                .unwrap();
            assert_eq!(plot.kind, kind);
            assert_eq!(plot.y_column.is_some(), kind.requires_y());
            assert_eq!(plot.y_label.is_some(), kind.requires_y());
        }
    }

    #[test]
    fn chart_kind_parsing() {
        assert_eq!("scatter".parse::<ChartKind>().unwrap(), ChartKind::Scatter);
        assert!(matches!(
            "pie".parse::<ChartKind>(),
            Err(VizError::InvalidChartKind(s)) if s == "pie"
        ));
    }
}
