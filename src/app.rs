use eframe::egui;

use crate::pipeline::PlotPair;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

/// Window showing one run's raw and filtered charts.
pub struct DielectronApp {
    source: String,
    pair: PlotPair,
}

impl DielectronApp {
    pub fn new(source: impl Into<String>, pair: PlotPair) -> Self {
        Self {
            source: source.into(),
            pair,
        }
    }
}

impl eframe::App for DielectronApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: summary ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.source, &self.pair);
        });

        // ---- Central panel: raw and filtered plots ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::chart_columns(ui, &self.pair);
        });
    }
}

/// Open the plot window and block until it is closed.
pub fn show(source: &str, pair: PlotPair) -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 700.0])
            .with_min_inner_size([700.0, 400.0]),
        ..Default::default()
    };

    let app = DielectronApp::new(source, pair);
    eframe::run_native(
        "CERN Data Visualization",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("plot window failed: {e}"))
}
