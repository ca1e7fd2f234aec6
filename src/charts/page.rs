//! Page Module
//! Mount points on a page, the plot bound to each, and the shared tooltip.

use crate::charts::plotter::{PlotInstance, Viewport, HOVER_RADIUS};
use crate::charts::renderer::RenderError;
use crate::charts::tooltip::{HoverEvent, TooltipState};
use crate::charts::TooltipStyle;
use std::collections::BTreeMap;

/// A container a chart is drawn into.
#[derive(Debug, Clone, PartialEq)]
pub struct MountPoint {
    pub id: String,
    /// Top-left corner in page pixels.
    pub origin: [f64; 2],
    pub size: [f64; 2],
    pub plot: Option<PlotInstance>,
    /// Set once a hover listener is registered for this container.
    pub hover_bound: bool,
}

impl MountPoint {
    fn viewport(&self, plot: &PlotInstance) -> Viewport {
        Viewport {
            bounds: plot.bounds,
            origin: self.origin,
            size: self.size,
        }
    }
}

/// Headless host page.
#[derive(Debug, Clone, Default)]
pub struct Page {
    mounts: BTreeMap<String, MountPoint>,
    tooltip: TooltipState,
    tooltip_style: TooltipStyle,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tooltip_style(style: TooltipStyle) -> Self {
        Self {
            tooltip_style: style,
            ..Self::default()
        }
    }

    /// Add (or replace) an empty container.
    pub fn add_mount(&mut self, id: &str, origin: [f64; 2], size: [f64; 2]) {
        self.mounts.insert(
            id.to_string(),
            MountPoint {
                id: id.to_string(),
                origin,
                size,
                plot: None,
                hover_bound: false,
            },
        );
    }

    pub fn mount(&self, id: &str) -> Option<&MountPoint> {
        self.mounts.get(id)
    }

    pub(crate) fn mount_mut(&mut self, id: &str) -> Result<&mut MountPoint, RenderError> {
        self.mounts
            .get_mut(id)
            .ok_or_else(|| RenderError::MissingMountPoint(id.to_string()))
    }

    pub fn mount_ids(&self) -> impl Iterator<Item = &str> {
        self.mounts.keys().map(String::as_str)
    }

    pub fn tooltip(&self) -> &TooltipState {
        &self.tooltip
    }

    /// Pointer moved to `pointer` (page pixels) over container `mount_id`.
    ///
    /// Containers without a hover listener leave the tooltip untouched.
    pub fn hover(&mut self, mount_id: &str, pointer: [f64; 2]) -> Result<&TooltipState, RenderError> {
        let mount = self
            .mounts
            .get(mount_id)
            .ok_or_else(|| RenderError::MissingMountPoint(mount_id.to_string()))?;

        if !mount.hover_bound {
            return Ok(&self.tooltip);
        }

        let item = mount.plot.as_ref().and_then(|plot| {
            let viewport = mount.viewport(plot);
            plot.nearest(pointer, HOVER_RADIUS, |p| viewport.project(p))
        });

        let event = HoverEvent {
            page_x: pointer[0],
            page_y: pointer[1],
            item,
        };
        self.tooltip.on_hover(&event, self.tooltip_style.offset);
        Ok(&self.tooltip)
    }

    /// Pointer left container `mount_id`.
    pub fn leave(&mut self, mount_id: &str) -> Result<(), RenderError> {
        let mount = self
            .mounts
            .get(mount_id)
            .ok_or_else(|| RenderError::MissingMountPoint(mount_id.to_string()))?;
        if mount.hover_bound {
            self.tooltip.hide();
        }
        Ok(())
    }

    /// Page position of sample `index` in `mount_id`, if drawn.
    pub fn point_position(&self, mount_id: &str, index: usize) -> Option<[f64; 2]> {
        let mount = self.mounts.get(mount_id)?;
        let plot = mount.plot.as_ref()?;
        let point = plot.points.get(index)?;
        Some(mount.viewport(plot).project(*point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{ChartRenderer, PlotConfig};
    use crate::data::Series;

    fn page_with(series: &Series, label: &str) -> Page {
        let mut page = Page::new();
        page.add_mount("placeholder", [0.0, 100.0], [600.0, 300.0]);
        ChartRenderer::render(&mut page, "placeholder", series, label, &PlotConfig::default())
            .unwrap();
        page
    }

    #[test]
    fn test_hover_second_point() {
        let series: Series = serde_json::from_str("[[0,10],[1000,12.6]]").unwrap();
        let mut page = page_with(&series, "trips");

        let [x, y] = page.point_position("placeholder", 1).unwrap();
        let tooltip = page.hover("placeholder", [x - 2.0, y + 1.0]).unwrap();
        assert!(tooltip.is_visible());
        assert_eq!(tooltip.text(), "13 trips");
        assert_eq!(tooltip.position(), [x - 2.0 + 5.0, y + 1.0 + 5.0]);
    }

    #[test]
    fn test_hover_off_data_hides() {
        let series = Series::from(vec![[0.0, 10.0], [1000.0, 12.6]]);
        let mut page = page_with(&series, "trips");

        let [x, y] = page.point_position("placeholder", 0).unwrap();
        assert!(page.hover("placeholder", [x, y]).unwrap().is_visible());

        let far = [300.0, 250.0];
        assert!(!page.hover("placeholder", far).unwrap().is_visible());
    }

    #[test]
    fn test_nan_sample_never_shows_tooltip() {
        let series = Series::from(vec![[0.0, f64::NAN], [0.0, 10.0], [1000.0, 12.6]]);
        let mut page = page_with(&series, "trips");

        let [x, _] = page.point_position("placeholder", 1).unwrap();
        let tooltip = page.hover("placeholder", [x + 2.0, 5000.0]).unwrap();
        assert!(!tooltip.is_visible());
    }

    #[test]
    fn test_leave_hides() {
        let series = Series::from(vec![[0.0, 1.0]]);
        let mut page = page_with(&series, "bikes");
        let [x, y] = page.point_position("placeholder", 0).unwrap();
        page.hover("placeholder", [x, y]).unwrap();
        page.leave("placeholder").unwrap();
        assert!(!page.tooltip().is_visible());
    }

    #[test]
    fn test_empty_series_never_shows_tooltip() {
        let mut page = page_with(&Series::default(), "stations");
        assert_eq!(page.mount("placeholder").and_then(|m| m.plot.as_ref()).map(|p| p.len()), Some(0));

        for x in (0..600).step_by(25) {
            for y in (100..400).step_by(25) {
                let tooltip = page.hover("placeholder", [x as f64, y as f64]).unwrap();
                assert!(!tooltip.is_visible());
            }
        }
    }

    #[test]
    fn test_not_hoverable_ignores_events() {
        let mut page = Page::new();
        page.add_mount("placeholder", [0.0, 0.0], [100.0, 100.0]);
        let config = PlotConfig {
            grid_hoverable: false,
            ..PlotConfig::default()
        };
        let series = Series::from(vec![[0.0, 1.0]]);
        ChartRenderer::render(&mut page, "placeholder", &series, "trips", &config).unwrap();

        let [x, y] = page.point_position("placeholder", 0).unwrap();
        assert!(!page.hover("placeholder", [x, y]).unwrap().is_visible());
    }

    #[test]
    fn test_hover_unknown_mount() {
        let mut page = Page::new();
        assert!(matches!(
            page.hover("nowhere", [0.0, 0.0]),
            Err(RenderError::MissingMountPoint(ref id)) if id == "nowhere"
        ));
    }
}
