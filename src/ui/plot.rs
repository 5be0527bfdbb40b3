use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use crate::chart::ChartKind;
use crate::pipeline::Figure;

/// Number of histogram bins.
pub const HISTOGRAM_BINS: usize = 50;

// ---------------------------------------------------------------------------
// Histogram binning
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub center: f64,
    pub width: f64,
    pub count: usize,
}

/// Split `values` into `n_bins` equal-width bins spanning their range.
/// A constant column yields a single unit-width bin.
pub fn histogram_bins(values: &[f64], n_bins: usize) -> Vec<Bin> {
    if values.is_empty() || n_bins == 0 {
        return Vec::new();
    }
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    if range.abs() < f64::EPSILON {
        return vec![Bin {
            center: min,
            width: 1.0,
            count: values.len(),
        }];
    }

    let width = range / n_bins as f64;
    let mut counts = vec![0usize; n_bins];
    for &v in values {
        // The maximum lands in the last bin rather than one past it.
        let idx = (((v - min) / width) as usize).min(n_bins - 1);
        counts[idx] += 1;
    }
    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| Bin {
            center: min + width * (i as f64 + 0.5),
            width,
            count,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Chart rendering
// ---------------------------------------------------------------------------

/// Render one figure: heading, then the plot filling the remaining space.
pub fn chart(ui: &mut Ui, figure: &Figure) {
    let plot = &figure.instruction;
    ui.heading(&plot.title);

    let y_axis = plot.y_label.clone().unwrap_or_else(|| "Frequency".to_string());

    Plot::new(plot.stage.window_title())
        .legend(Legend::default())
        .x_axis_label(plot.x_label.clone())
        .y_axis_label(y_axis)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| match (plot.kind, plot.y_column.as_deref()) {
            (ChartKind::Scatter, Some(y)) => {
                let points: PlotPoints = figure
                    .table
                    .xy_points(&plot.x_column, y)
                    .unwrap_or_default()
                    .into();
                plot_ui.points(Points::new(points).name(y).color(Color32::RED).radius(2.0));
            }
            (ChartKind::Line, Some(y)) => {
                let mut xy = figure
                    .table
                    .xy_points(&plot.x_column, y)
                    .unwrap_or_default();
                xy.sort_by(|a, b| a[0].total_cmp(&b[0]));
                let points: PlotPoints = xy.into();
                plot_ui.line(Line::new(points).name(y).color(Color32::GREEN).width(1.5));
            }
            _ => {
                let values: Vec<f64> = figure
                    .table
                    .column(&plot.x_column)
                    .map(|c| c.numbers_iter().collect())
                    .unwrap_or_default();
                let bars = histogram_bins(&values, HISTOGRAM_BINS)
                    .into_iter()
                    .map(|bin| Bar::new(bin.center, bin.count as f64).width(bin.width))
                    .collect();
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .name(&plot.x_column)
                        .color(Color32::BLUE),
                );
            }
        });
}
