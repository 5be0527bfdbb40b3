use eframe::egui::{self, RichText, Ui};

use crate::pipeline::PlotPair;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top summary bar: source file and row counts per stage.
pub fn top_bar(ui: &mut Ui, source: &str, pair: &PlotPair) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.label(RichText::new(source).strong());

        ui.separator();

        let raw = pair.raw.table.len();
        let kept = pair.filtered.table.len();
        ui.label(format!(
            "{raw} rows loaded, {kept} within IQR bounds ({} removed)",
            raw - kept
        ));
    });
}

// ---------------------------------------------------------------------------
// Chart columns
// ---------------------------------------------------------------------------

/// Raw and filtered charts side by side.
pub fn chart_columns(ui: &mut Ui, pair: &PlotPair) {
    ui.columns(2, |columns| {
        for (column, figure) in columns.iter_mut().zip(pair.figures()) {
            column.label(RichText::new(figure.instruction.stage.window_title()).weak());
            super::plot::chart(column, figure);
        }
    });
}
