//! Histogram window
//!
//! Displays the millisecond latency histogram of one input file as a bar
//! chart in a native egui window, with the summary statistics above it.

use crate::config::PlotSettings;
use crate::report::PlotReport;
use anyhow::{anyhow, Result};
use egui_plot::{Bar, BarChart, Plot};
use rtlatency_core::Histogram;

/// Bar fill, matplotlib's default blue
const BAR_COLOR: egui::Color32 = egui::Color32::from_rgb(31, 119, 180);

/// One bar per bin, centered on the bin and as wide as it
pub fn histogram_bars(histogram: &Histogram) -> Vec<Bar> {
    histogram
        .bins()
        .map(|bin| Bar::new(bin.center(), bin.count as f64).width(bin.width()))
        .collect()
}

/// Histogram window state
pub struct HistogramWindow {
    /// Window heading, the input path
    title: String,
    /// Report being displayed
    report: PlotReport,
    /// Pre-built bars, the histogram never changes while open
    bars: Vec<Bar>,
}

impl HistogramWindow {
    /// Create a window for a report
    pub fn new(report: PlotReport) -> Self {
        Self {
            title: report.source.clone(),
            bars: histogram_bars(&report.histogram),
            report,
        }
    }

    /// Window heading
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Bars that will be drawn
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Render the summary header
    fn render_header(&self, ui: &mut egui::Ui) {
        ui.heading(&self.title);
        ui.label(self.report.summary_line());

        let h = &self.report.histogram;
        let outside = h.underflow() + h.overflow();
        if outside > 0 {
            ui.colored_label(egui::Color32::YELLOW, self.report.range_line());
        } else {
            ui.label(self.report.range_line());
        }
    }

    /// Render the bar chart
    fn render_plot(&self, ui: &mut egui::Ui) {
        let h = &self.report.histogram;
        let chart = BarChart::new(self.bars.clone())
            .name("count")
            .color(BAR_COLOR);

        Plot::new("latency_histogram")
            .x_axis_label("latency (ms)")
            .y_axis_label("count")
            .show_grid(true)
            .include_x(h.min())
            .include_x(h.max())
            .include_y(0.0)
            .include_y(h.peak() as f64)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(chart);
            });
    }
}

impl eframe::App for HistogramWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("summary").show(ctx, |ui| {
            self.render_header(ui);
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_plot(ui);
        });
    }
}

/// Open the histogram window and block until it is closed
pub fn show(report: PlotReport, settings: &PlotSettings) -> Result<()> {
    let title = report.source.clone();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([settings.window_width, settings.window_height])
            .with_title(&title),
        ..Default::default()
    };

    tracing::info!(title = %title, bins = report.histogram.bin_count(), "opening histogram window");

    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(HistogramWindow::new(report)))),
    )
    .map_err(|e| anyhow!("Failed to open histogram window: {}", e))
}
