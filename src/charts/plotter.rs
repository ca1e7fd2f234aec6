//! Chart Plotter Module
//! Plot instances, hover hit-testing, and interactive drawing with egui_plot.

use crate::charts::config::{HexColor, PlotConfig, TooltipStyle};
use crate::charts::tooltip::{HoverEvent, HoverItem, TooltipState};
use crate::data::Series;
use egui::{Color32, RichText};
use egui_plot::{Legend, Line, Plot, PlotPoint, PlotPoints};

/// Pointer distance (pixels, per axis and radial) within which a sample is hit.
pub const HOVER_RADIUS: f64 = 10.0;

/// Data-space extent of a plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            x_min: 0.0,
            x_max: 1.0,
            y_min: 0.0,
            y_max: 1.0,
        }
    }
}

impl Bounds {
    /// Tight extent of finite points, `None` when there are none.
    pub fn of(points: &[[f64; 2]]) -> Option<Self> {
        let mut bounds: Option<Bounds> = None;
        for &[x, y] in points {
            if !x.is_finite() || !y.is_finite() {
                continue;
            }
            let b = bounds.get_or_insert(Bounds {
                x_min: x,
                x_max: x,
                y_min: y,
                y_max: y,
            });
            b.x_min = b.x_min.min(x);
            b.x_max = b.x_max.max(x);
            b.y_min = b.y_min.min(y);
            b.y_max = b.y_max.max(y);
        }
        bounds
    }

    /// Extent used for drawing: y gets a small margin, zero spans are widened.
    pub fn padded(points: &[[f64; 2]]) -> Self {
        let Some(mut b) = Self::of(points) else {
            return Self::default();
        };

        if b.x_max == b.x_min {
            b.x_min -= 1.0;
            b.x_max += 1.0;
        }
        let pad = (b.y_max - b.y_min) * 0.05;
        if pad == 0.0 {
            b.y_min -= 1.0;
            b.y_max += 1.0;
        } else {
            b.y_min -= pad;
            b.y_max += pad;
        }
        b
    }
}

/// Maps data coordinates onto a pixel rectangle (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub bounds: Bounds,
    pub origin: [f64; 2],
    pub size: [f64; 2],
}

impl Viewport {
    pub fn project(&self, [x, y]: [f64; 2]) -> [f64; 2] {
        let b = &self.bounds;
        let fx = (x - b.x_min) / (b.x_max - b.x_min);
        let fy = (y - b.y_min) / (b.y_max - b.y_min);
        [
            self.origin[0] + fx * self.size[0],
            self.origin[1] + (1.0 - fy) * self.size[1],
        ]
    }
}

/// A series as drawn into one container.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotInstance {
    pub label: String,
    pub color: HexColor,
    pub points: Vec<[f64; 2]>,
    pub bounds: Bounds,
}

impl PlotInstance {
    pub fn new(series: &Series, label: &str, config: &PlotConfig) -> Self {
        let points = series.points();
        let bounds = Bounds::padded(&points);
        Self {
            label: label.to_string(),
            color: config.color,
            points,
            bounds,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Nearest sample to `pointer` once projected to screen space.
    ///
    /// A sample qualifies when it is within `radius` on both axes and radially;
    /// among qualifying samples the closest wins, the earliest on ties.
    /// Samples that do not project to a finite position never qualify.
    pub fn nearest(
        &self,
        pointer: [f64; 2],
        radius: f64,
        project: impl Fn([f64; 2]) -> [f64; 2],
    ) -> Option<HoverItem> {
        let mut best: Option<(f64, usize)> = None;

        for (i, &point) in self.points.iter().enumerate() {
            let [sx, sy] = project(point);
            if !sx.is_finite() || !sy.is_finite() {
                continue;
            }
            let dx = (sx - pointer[0]).abs();
            let dy = (sy - pointer[1]).abs();
            if dx > radius || dy > radius {
                continue;
            }
            let dist = dx * dx + dy * dy;
            if dist > radius * radius {
                continue;
            }
            if best.map_or(true, |(d, _)| dist < d) {
                best = Some((dist, i));
            }
        }

        best.map(|(_, i)| HoverItem {
            datapoint: self.points[i],
            series_label: self.label.clone(),
            index: i,
        })
    }
}

/// Interactive charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw one time-series chart.
    ///
    /// Returns the hover event for this frame when the pointer is over the plot,
    /// `None` when it is elsewhere.
    pub fn draw_series_chart(
        ui: &mut egui::Ui,
        instance: &PlotInstance,
        config: &PlotConfig,
        height: f32,
    ) -> Option<HoverEvent> {
        let axis_mode = config.x_axis_mode;
        let hoverable = config.grid_hoverable;

        let response = Plot::new(format!("series_{}", instance.label))
            .height(height)
            .legend(Legend::default().position(config.legend_position.to_egui()))
            .show_background(config.grid_border_width > 0)
            .show_x(false)
            .show_y(false)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .include_x(instance.bounds.x_min)
            .include_x(instance.bounds.x_max)
            .include_y(instance.bounds.y_min)
            .include_y(instance.bounds.y_max)
            .x_axis_formatter(move |mark, _range| axis_mode.format_tick(mark.value))
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::new(instance.points.clone()))
                        .color(instance.color.to_egui())
                        .width(2.0)
                        .name(&instance.label),
                );

                if !hoverable {
                    return None;
                }

                let pointer = plot_ui.response().hover_pos()?;
                let transform = plot_ui.transform();
                let item = instance.nearest(
                    [pointer.x as f64, pointer.y as f64],
                    HOVER_RADIUS,
                    |[x, y]| {
                        let pos = transform.position_from_point(&PlotPoint::new(x, y));
                        [pos.x as f64, pos.y as f64]
                    },
                );

                Some(HoverEvent {
                    page_x: pointer.x as f64,
                    page_y: pointer.y as f64,
                    item,
                })
            });

        response.inner
    }

    /// Draw the shared overlay when visible.
    pub fn draw_tooltip(ctx: &egui::Context, tooltip: &TooltipState, style: &TooltipStyle) {
        if !tooltip.is_visible() {
            return;
        }

        let [x, y] = tooltip.position();
        egui::Area::new(egui::Id::new("plot_tooltip"))
            .order(egui::Order::Tooltip)
            .fixed_pos(egui::pos2(x as f32, y as f32))
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::none()
                    .fill(style.background.to_egui().gamma_multiply(style.opacity))
                    .stroke(egui::Stroke::new(
                        style.border_width,
                        style.border_color.to_egui().gamma_multiply(style.opacity),
                    ))
                    .inner_margin(style.padding)
                    .show(ui, |ui| {
                        ui.label(RichText::new(tooltip.text()).color(Color32::BLACK));
                    });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance(points: Vec<[f64; 2]>) -> PlotInstance {
        PlotInstance::new(&Series::from(points), "trips", &PlotConfig::default())
    }

    #[test]
    fn test_instance_keeps_every_point_in_order() {
        let points = vec![[0.0, 10.0], [1000.0, 12.6], [2000.0, 11.0]];
        let plot = instance(points.clone());
        assert_eq!(plot.len(), 3);
        assert_eq!(plot.points, points);
        assert_eq!(plot.color.to_string(), "#002267");
    }

    #[test]
    fn test_bounds_padding() {
        assert_eq!(Bounds::padded(&[]), Bounds::default());

        let single = Bounds::padded(&[[5.0, 3.0]]);
        assert_eq!((single.x_min, single.x_max), (4.0, 6.0));
        assert_eq!((single.y_min, single.y_max), (2.0, 4.0));

        let b = Bounds::padded(&[[0.0, 0.0], [10.0, 100.0]]);
        assert_eq!((b.x_min, b.x_max), (0.0, 10.0));
        assert_eq!((b.y_min, b.y_max), (-5.0, 105.0));
    }

    #[test]
    fn test_bounds_skip_non_finite() {
        let b = Bounds::of(&[[f64::NAN, 1.0], [2.0, 3.0]]).unwrap();
        assert_eq!((b.x_min, b.y_min), (2.0, 3.0));
    }

    #[test]
    fn test_viewport_projection() {
        let viewport = Viewport {
            bounds: Bounds::default(),
            origin: [10.0, 20.0],
            size: [100.0, 50.0],
        };
        assert_eq!(viewport.project([0.0, 0.0]), [10.0, 70.0]);
        assert_eq!(viewport.project([1.0, 1.0]), [110.0, 20.0]);
    }

    #[test]
    fn test_nearest_within_radius() {
        let plot = instance(vec![[0.0, 0.0], [100.0, 0.0], [104.0, 0.0]]);
        let identity = |p: [f64; 2]| p;

        let hit = plot.nearest([103.0, 2.0], HOVER_RADIUS, identity).unwrap();
        assert_eq!(hit.index, 2);
        assert_eq!(hit.series_label, "trips");

        assert!(plot.nearest([50.0, 0.0], HOVER_RADIUS, identity).is_none());
        // inside the per-axis box but outside the circle
        assert!(plot.nearest([9.0, 9.0], HOVER_RADIUS, identity).is_none());
    }

    #[test]
    fn test_nearest_tie_goes_to_earliest() {
        let plot = instance(vec![[0.0, 0.0], [10.0, 0.0]]);
        let hit = plot.nearest([5.0, 0.0], HOVER_RADIUS, |p| p).unwrap();
        assert_eq!(hit.index, 0);
    }

    #[test]
    fn test_nearest_skips_non_finite_samples() {
        let plot = instance(vec![[0.0, f64::NAN], [0.0, 10.0], [f64::INFINITY, 10.0]]);
        let identity = |p: [f64; 2]| p;

        assert!(plot.nearest([2.0, 5000.0], HOVER_RADIUS, identity).is_none());
        let hit = plot.nearest([0.0, 11.0], HOVER_RADIUS, identity).unwrap();
        assert_eq!(hit.index, 1);
    }

    #[test]
    fn test_empty_instance_never_matches() {
        let plot = instance(vec![]);
        assert!(plot.is_empty());
        assert!(plot.nearest([0.0, 0.0], 1e9, |p| p).is_none());
    }
}
