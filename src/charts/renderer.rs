//! Chart Renderer
//! Binds series to page mount points, and draws the same charts as static
//! SVG/PNG images with plotters.
//!
//! Static layout:
//! 1. Line in the configured series color
//! 2. Legend box in the configured corner
//! 3. Date labels on x in time mode, plain numbers otherwise
//! 4. No axis border when the grid border width is 0

use crate::charts::config::{AxisMode, PlotConfig};
use crate::charts::page::Page;
use crate::charts::plotter::{Bounds, PlotInstance};
use crate::data::Series;
use image::{DynamicImage, ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::io::Cursor;
use thiserror::Error;

// Colors
const MESH_LIGHT: RGBColor = RGBColor(240, 240, 240);
const MESH_BOLD: RGBColor = RGBColor(220, 220, 220);
const AXIS: RGBColor = RGBColor(84, 84, 84);

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("No mount point with id {0:?}")]
    MissingMountPoint(String),
    #[error("Failed to draw chart: {0}")]
    Draw(String),
    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
}

pub struct ChartRenderer;

impl ChartRenderer {
    /// Draw `series` into container `mount_id` and register its hover listener.
    ///
    /// Drawing again into the same container replaces the previous plot.
    pub fn render(
        page: &mut Page,
        mount_id: &str,
        series: &Series,
        label: &str,
        config: &PlotConfig,
    ) -> Result<(), RenderError> {
        let mount = page.mount_mut(mount_id)?;
        let instance = PlotInstance::new(series, label, config);

        tracing::debug!(mount = mount_id, label, points = instance.len(), "render chart");
        mount.plot = Some(instance);
        mount.hover_bound = config.grid_hoverable;
        Ok(())
    }

    /// Render one chart as an SVG document.
    pub fn render_svg(
        series: &Series,
        label: &str,
        config: &PlotConfig,
        size: (u32, u32),
    ) -> Result<String, RenderError> {
        let instance = PlotInstance::new(series, label, config);
        let mut buffer = String::new();
        {
            let root = SVGBackend::with_string(&mut buffer, size).into_drawing_area();
            Self::draw_chart(&root, &instance, config)
                .map_err(|e| RenderError::Draw(e.to_string()))?;
            root.present()
                .map_err(|e| RenderError::Draw(e.to_string()))?;
        }
        Ok(buffer)
    }

    /// Render one chart as PNG bytes.
    pub fn render_png(
        series: &Series,
        label: &str,
        config: &PlotConfig,
        size: (u32, u32),
    ) -> Result<Vec<u8>, RenderError> {
        let instance = PlotInstance::new(series, label, config);
        let (width, height) = size;
        let mut pixels = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut pixels, size).into_drawing_area();
            Self::draw_chart(&root, &instance, config)
                .map_err(|e| RenderError::Draw(e.to_string()))?;
            root.present()
                .map_err(|e| RenderError::Draw(e.to_string()))?;
        }

        Self::encode_png(width, height, pixels)
    }

    /// Encode a packed RGB buffer as PNG.
    fn encode_png(width: u32, height: u32, pixels: Vec<u8>) -> Result<Vec<u8>, RenderError> {
        let img = RgbImage::from_raw(width, height, pixels)
            .ok_or_else(|| RenderError::Draw("pixel buffer size mismatch".to_string()))?;
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(img).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    fn draw_chart<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        instance: &PlotInstance,
        config: &PlotConfig,
    ) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
        root.fill(&WHITE)?;

        let Bounds {
            x_min,
            x_max,
            y_min,
            y_max,
        } = instance.bounds;

        let mut chart = ChartBuilder::on(root)
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(50)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

        let axis_mode = config.x_axis_mode;
        let x_formatter = move |x: &f64| axis_mode.format_tick(*x);
        let y_formatter = |y: &f64| AxisMode::Linear.format_tick(*y);
        let axis_style = Self::axis_style(config.grid_border_width);

        chart
            .configure_mesh()
            .light_line_style(MESH_LIGHT)
            .bold_line_style(MESH_BOLD)
            .axis_style(axis_style)
            .x_labels(6)
            .y_labels(6)
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter)
            .draw()?;

        let color = instance.color.to_plotters();
        chart
            .draw_series(LineSeries::new(
                instance.points.iter().map(|&[x, y]| (x, y)),
                color.stroke_width(2),
            ))?
            .label(instance.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

        chart
            .configure_series_labels()
            .position(config.legend_position.to_plotters())
            .background_style(WHITE.mix(0.85))
            .border_style(MESH_BOLD)
            .draw()?;

        Ok(())
    }

    fn axis_style(border_width: u32) -> ShapeStyle {
        if border_width == 0 {
            RGBAColor(0, 0, 0, 0.0).stroke_width(0)
        } else {
            AXIS.stroke_width(border_width)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_binds_every_point() {
        let mut page = Page::new();
        page.add_mount("placeholder", [0.0, 0.0], [400.0, 200.0]);
        let series = Series::from(vec![[0.0, 10.0], [1000.0, 12.6], [2000.0, 9.0]]);

        ChartRenderer::render(&mut page, "placeholder", &series, "trips", &PlotConfig::default())
            .unwrap();

        let mount = page.mount("placeholder").unwrap();
        let plot = mount.plot.as_ref().unwrap();
        assert_eq!(plot.points, series.points());
        assert_eq!(plot.label, "trips");
        assert!(mount.hover_bound);
    }

    #[test]
    fn test_render_twice_is_idempotent() {
        let mut page = Page::new();
        page.add_mount("placeholder-4", [0.0, 0.0], [400.0, 200.0]);
        let series = Series::from(vec![[0.0, 4.1], [604_800_000.0, 4.4]]);
        let config = PlotConfig::default();

        ChartRenderer::render(&mut page, "placeholder-4", &series, "trips/bike", &config).unwrap();
        let once = page.mount("placeholder-4").cloned();
        ChartRenderer::render(&mut page, "placeholder-4", &series, "trips/bike", &config).unwrap();

        assert_eq!(page.mount("placeholder-4").cloned(), once);
        assert_eq!(page.mount("placeholder-4").and_then(|m| m.plot.as_ref()).map(|p| p.len()), Some(2));
    }

    #[test]
    fn test_missing_mount_point() {
        let mut page = Page::new();
        let err = ChartRenderer::render(
            &mut page,
            "placeholder",
            &Series::default(),
            "trips",
            &PlotConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, RenderError::MissingMountPoint(ref id) if id == "placeholder"));
    }

    #[test]
    fn test_axis_hidden_without_border() {
        assert_eq!(ChartRenderer::axis_style(0).stroke_width, 0);
        assert_eq!(ChartRenderer::axis_style(2).stroke_width, 2);
    }

    #[test]
    fn test_encode_png() {
        let png = ChartRenderer::encode_png(4, 2, vec![255; 4 * 2 * 3]).unwrap();
        assert_eq!(&png[1..4], b"PNG");

        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (4, 2));
    }

    #[test]
    fn test_encode_png_short_buffer() {
        let err = ChartRenderer::encode_png(4, 2, vec![0; 5]).unwrap_err();
        assert!(matches!(err, RenderError::Draw(_)));
    }

    #[test]
    fn test_static_render_never_panics() {
        // without a usable font the label drawing fails and surfaces as Draw
        let series = Series::from(vec![[0.0, 10.0], [1000.0, 11.0], [2000.0, 12.6]]);
        let config = PlotConfig::default();

        match ChartRenderer::render_svg(&series, "trips", &config, (320, 160)) {
            Ok(svg) => assert!(svg.starts_with("<svg")),
            Err(err) => assert!(matches!(err, RenderError::Draw(_)), "{err}"),
        }
        match ChartRenderer::render_png(&Series::default(), "bikes", &config, (320, 160)) {
            Ok(png) => assert_eq!(&png[1..4], b"PNG"),
            Err(err) => assert!(matches!(err, RenderError::Draw(_)), "{err}"),
        }
    }

    #[test]
    #[ignore = "needs a system sans-serif font"]
    fn test_svg_contains_label() {
        let series = Series::from(vec![[1_514_678_400_000.0, 30120.0], [1_515_283_200_000.0, 31000.0]]);
        let svg = ChartRenderer::render_svg(&series, "trips", &PlotConfig::default(), (640, 320))
            .unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("trips"));
        assert!(svg.contains("Dec 31, 2017"));
    }

    #[test]
    #[ignore = "needs a system sans-serif font"]
    fn test_png_of_empty_series() {
        let png = ChartRenderer::render_png(&Series::default(), "bikes", &PlotConfig::default(), (320, 160))
            .unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }
}
