//! Plot CERN dielectron collision data before and after IQR outlier filtering.

pub mod app;
pub mod chart;
pub mod cli;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod ui;
pub mod units;

pub use chart::{ChartKind, PlotInstruction, PlotResolver, Stage};
pub use data::model::{Column, HasColumns, Table, Value};
pub use error::VizError;
pub use pipeline::{PlotPair, PlotRequest};
pub use units::UnitCatalog;
