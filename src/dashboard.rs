//! Dashboard
//! The four weekly charts: which series goes into which container, under which label.

use crate::charts::{format_rounded, ChartRenderer, Page, PlotConfig, RenderError, TooltipStyle};
use crate::data::{Dataset, Metric, Series};

/// Page geometry of the stacked containers.
pub const CHART_WIDTH: f64 = 800.0;
pub const CHART_HEIGHT: f64 = 300.0;
pub const CHART_GAP: f64 = 40.0;

/// One chart on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSpec {
    pub mount_id: &'static str,
    pub metric: Metric,
    /// Series label shown in the legend and the tooltip.
    pub label: &'static str,
    pub title: &'static str,
    /// Output file stem for static export.
    pub file_stem: &'static str,
}

pub const CHARTS: [ChartSpec; 4] = [
    ChartSpec {
        mount_id: "placeholder",
        metric: Metric::TripsPerWeek,
        label: "trips",
        title: "Trips per week",
        file_stem: "trips",
    },
    ChartSpec {
        mount_id: "placeholder-2",
        metric: Metric::StationsPerWeek,
        label: "stations",
        title: "Stations per week",
        file_stem: "stations",
    },
    ChartSpec {
        mount_id: "placeholder-3",
        metric: Metric::BikesPerWeek,
        label: "bikes",
        title: "Bikes per week",
        file_stem: "bikes",
    },
    ChartSpec {
        mount_id: "placeholder-4",
        metric: Metric::TripsPerBikePerWeek,
        label: "trips/bike",
        title: "Trips per bike per week",
        file_stem: "trips-per-bike",
    },
];

/// A page with the four containers stacked top to bottom.
pub fn dashboard_page(style: TooltipStyle) -> Page {
    let mut page = Page::with_tooltip_style(style);
    for (i, chart) in CHARTS.iter().enumerate() {
        let top = i as f64 * (CHART_HEIGHT + CHART_GAP);
        page.add_mount(chart.mount_id, [0.0, top], [CHART_WIDTH, CHART_HEIGHT]);
    }
    page
}

/// Draw every chart once.
pub fn render_dashboard(
    page: &mut Page,
    dataset: &Dataset,
    config: &PlotConfig,
) -> Result<(), RenderError> {
    for chart in &CHARTS {
        ChartRenderer::render(
            page,
            chart.mount_id,
            dataset.series(chart.metric),
            chart.label,
            config,
        )?;
    }
    tracing::info!(charts = CHARTS.len(), "dashboard rendered");
    Ok(())
}

/// Latest week's figure, e.g. `"30120 trips"` or `"4.4 trips/bike"`.
pub fn headline(chart: &ChartSpec, series: &Series) -> Option<String> {
    let latest = series.latest()?;
    let value = if chart.metric.is_ratio() {
        format!("{:.1}", latest.value)
    } else {
        format_rounded(latest.value)
    };
    Some(format!("{} {}", value, chart.label))
}
