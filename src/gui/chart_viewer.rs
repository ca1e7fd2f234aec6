//! Chart Viewer Widget
//! Right side scrollable panel with the four weekly charts and the shared tooltip.

use crate::charts::{ChartPlotter, HoverEvent, Page, PlotConfig, TooltipState, TooltipStyle};
use crate::dashboard::{dashboard_page, headline, render_dashboard, CHARTS};
use crate::data::Dataset;
use egui::{RichText, ScrollArea};

/// Chart card configuration
const CHART_SPACING: f32 = 15.0;
const PLOT_HEIGHT: f32 = 260.0;

/// Scrollable chart display area.
pub struct ChartViewer {
    /// Containers with the plots bound to them
    page: Option<Page>,
    dataset: Option<Dataset>,
    tooltip: TooltipState,
}

impl Default for ChartViewer {
    fn default() -> Self {
        Self {
            page: None,
            dataset: None,
            tooltip: TooltipState::new(),
        }
    }
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all charts
    pub fn clear(&mut self) {
        self.page = None;
        self.dataset = None;
        self.tooltip.hide();
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn tooltip(&self) -> &TooltipState {
        &self.tooltip
    }

    /// Bind a freshly loaded dataset to the four charts
    pub fn set_dataset(
        &mut self,
        dataset: Dataset,
        config: &PlotConfig,
        style: &TooltipStyle,
    ) -> Result<(), crate::charts::RenderError> {
        let mut page = dashboard_page(style.clone());
        render_dashboard(&mut page, &dataset, config)?;
        self.page = Some(page);
        self.dataset = Some(dataset);
        self.tooltip.hide();
        Ok(())
    }

    /// Apply this frame's hover outcome: the event from the plot under the
    /// pointer, or `None` when the pointer is over no plot.
    pub fn apply_hover(&mut self, event: Option<HoverEvent>, style: &TooltipStyle) {
        match event {
            Some(event) => self.tooltip.on_hover(&event, style.offset),
            None => self.tooltip.hide(),
        }
    }

    /// Draw the chart viewer
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        ui: &mut egui::Ui,
        config: &PlotConfig,
        style: &TooltipStyle,
    ) {
        let (Some(page), Some(dataset)) = (&self.page, &self.dataset) else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        let mut hovered: Option<HoverEvent> = None;

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for chart in &CHARTS {
                    let Some(instance) = page.mount(chart.mount_id).and_then(|m| m.plot.as_ref())
                    else {
                        continue;
                    };

                    egui::Frame::none()
                        .rounding(8.0)
                        .stroke(egui::Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color))
                        .fill(ui.visuals().widgets.noninteractive.bg_fill)
                        .inner_margin(12.0)
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                ui.label(RichText::new(chart.title).size(18.0).strong());
                                if let Some(text) = headline(chart, dataset.series(chart.metric)) {
                                    ui.label(
                                        RichText::new(format!("last week: {}", text))
                                            .size(13.0)
                                            .color(config.color.to_egui()),
                                    );
                                }
                            });
                            ui.add_space(8.0);

                            if let Some(event) =
                                ChartPlotter::draw_series_chart(ui, instance, config, PLOT_HEIGHT)
                            {
                                hovered = Some(event);
                            }
                        });
                    ui.add_space(CHART_SPACING);
                }
            });

        self.apply_hover(hovered, style);
        ChartPlotter::draw_tooltip(ctx, &self.tooltip, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::tooltip::HoverItem;
    use crate::data::Series;

    #[test]
    fn test_set_dataset_binds_all_charts() {
        let dataset = Dataset {
            trips_per_week: Series::from(vec![[0.0, 10.0], [1000.0, 12.6]]),
            ..Dataset::default()
        };
        let mut viewer = ChartViewer::new();
        viewer
            .set_dataset(dataset, &PlotConfig::default(), &TooltipStyle::default())
            .unwrap();

        let page = viewer.page.as_ref().unwrap();
        for chart in &CHARTS {
            assert!(page.mount(chart.mount_id).and_then(|m| m.plot.as_ref()).is_some());
        }
        viewer.clear();
        assert!(viewer.dataset().is_none());
    }

    #[test]
    fn test_leaving_plots_hides_tooltip() {
        let style = TooltipStyle::default();
        let mut viewer = ChartViewer::new();
        viewer.apply_hover(
            Some(HoverEvent {
                page_x: 10.0,
                page_y: 20.0,
                item: Some(HoverItem {
                    datapoint: [1000.0, 12.6],
                    series_label: "trips".to_string(),
                    index: 1,
                }),
            }),
            &style,
        );
        assert_eq!(viewer.tooltip().text(), "13 trips");
        assert_eq!(viewer.tooltip().position(), [15.0, 25.0]);

        viewer.apply_hover(None, &style);
        assert!(!viewer.tooltip().is_visible());
    }
}
