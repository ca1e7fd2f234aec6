//! Control Panel Widget
//! Left side panel with data source, plot options summary and export controls.

use crate::charts::PlotConfig;
use crate::dashboard::CHARTS;
use crate::data::Dataset;
use crate::export::ExportFormat;
use egui::{Color32, RichText};
use std::path::PathBuf;

/// User settings for the session
#[derive(Default, Clone)]
pub struct UserSettings {
    pub data_path: Option<PathBuf>,
    pub export_format: ExportFormat,
}

/// Left side control panel with file selection and export controls.
pub struct ControlPanel {
    pub settings: UserSettings,
    /// Sample count per chart, in dashboard order.
    pub sample_counts: Vec<usize>,
    pub progress: f32,
    pub status: String,
    pub export_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            settings: UserSettings::default(),
            sample_counts: Vec::new(),
            progress: 0.0,
            status: "Ready".to_string(),
            export_enabled: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh the summary after a dataset load
    pub fn update_dataset(&mut self, dataset: &Dataset) {
        self.sample_counts = CHARTS
            .iter()
            .map(|c| dataset.series(c.metric).len())
            .collect();
        self.export_enabled = true;
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui, plot_config: &PlotConfig) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🚲 Bike Share Charts")
                    .size(22.0)
                    .color(plot_config.color.to_egui()),
            );
            ui.label(RichText::new("Weekly activity").size(11.0).color(Color32::GRAY));
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .settings
                        .data_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.settings.data_path.is_some() {
                            Color32::WHITE
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseData;
                        }
                    });
                });

                if !self.sample_counts.is_empty() {
                    ui.add_space(5.0);
                    egui::Grid::new("series_summary")
                        .striped(true)
                        .spacing([8.0, 2.0])
                        .show(ui, |ui| {
                            for (chart, count) in CHARTS.iter().zip(&self.sample_counts) {
                                ui.label(RichText::new(chart.title).size(11.0));
                                ui.label(RichText::new(format!("{} weeks", count)).size(11.0));
                                ui.end_row();
                            }
                        });
                }
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Plot Options Section =====
        ui.label(RichText::new("⚙️ Plot Options").size(14.0).strong());
        ui.add_space(5.0);

        egui::Grid::new("plot_options")
            .spacing([8.0, 4.0])
            .show(ui, |ui| {
                ui.label("X axis:");
                ui.label(format!("{:?}", plot_config.x_axis_mode));
                ui.end_row();
                ui.label("Legend:");
                ui.label(format!("{:?}", plot_config.legend_position));
                ui.end_row();
                ui.label("Hover tooltips:");
                ui.label(if plot_config.grid_hoverable { "on" } else { "off" });
                ui.end_row();
                ui.label("Series color:");
                ui.label(RichText::new(plot_config.color.to_string()).color(plot_config.color.to_egui()));
                ui.end_row();
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export Section =====
        ui.label(RichText::new("🖼 Export").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.radio_value(&mut self.settings.export_format, ExportFormat::Png, "PNG");
            ui.radio_value(&mut self.settings.export_format, ExportFormat::Svg, "SVG");
        });

        ui.add_space(8.0);
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("💾 Export Charts").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::Export;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Progress Section =====
        ui.label(RichText::new("📊 Progress").size(14.0).strong());
        ui.add_space(5.0);

        ui.add(
            egui::ProgressBar::new(self.progress / 100.0)
                .show_percentage()
                .animate(self.progress > 0.0 && self.progress < 100.0),
        );

        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Complete") || self.status.starts_with("Loaded") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set progress and status
    pub fn set_progress(&mut self, progress: f32, status: &str) {
        self.progress = progress;
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseData,
    Export,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Series;

    #[test]
    fn test_update_dataset_counts_in_chart_order() {
        let dataset = Dataset {
            trips_per_week: Series::from(vec![[0.0, 1.0], [1.0, 2.0]]),
            bikes_per_week: Series::from(vec![[0.0, 3.0]]),
            ..Dataset::default()
        };
        let mut panel = ControlPanel::new();
        assert!(!panel.export_enabled);
        panel.update_dataset(&dataset);
        assert_eq!(panel.sample_counts, vec![2, 0, 1, 0]);
        assert!(panel.export_enabled);
    }
}
