//! Static export of the dashboard charts to image files.

use crate::charts::{ChartRenderer, PlotConfig, RenderError};
use crate::dashboard::{ChartSpec, CHARTS};
use crate::data::Dataset;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to render {chart}: {source}")]
    Render { chart: String, source: RenderError },
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ExportFormat {
    #[default]
    Png,
    Svg,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Svg => "svg",
        }
    }
}

/// Output file for one chart.
pub fn chart_path(out_dir: &Path, chart: &ChartSpec, format: ExportFormat) -> PathBuf {
    out_dir.join(format!("{}.{}", chart.file_stem, format.extension()))
}

/// Render all four charts in parallel and write them into `out_dir`.
pub fn export_dashboard(
    dataset: &Dataset,
    config: &PlotConfig,
    out_dir: &Path,
    format: ExportFormat,
    size: (u32, u32),
) -> Result<Vec<PathBuf>, ExportError> {
    fs::create_dir_all(out_dir).map_err(|source| ExportError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let rendered: Vec<(PathBuf, Vec<u8>)> = CHARTS
        .par_iter()
        .map(|chart| -> Result<(PathBuf, Vec<u8>), ExportError> {
            let series = dataset.series(chart.metric);
            let bytes = match format {
                ExportFormat::Png => ChartRenderer::render_png(series, chart.label, config, size),
                ExportFormat::Svg => {
                    ChartRenderer::render_svg(series, chart.label, config, size).map(String::into_bytes)
                }
            }
            .map_err(|source| ExportError::Render {
                chart: chart.title.to_string(),
                source,
            })?;
            Ok((chart_path(out_dir, chart, format), bytes))
        })
        .collect::<Result<_, _>>()?;

    let mut written = Vec::with_capacity(rendered.len());
    for (path, bytes) in rendered {
        fs::write(&path, bytes).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), "wrote chart");
        written.push(path);
    }
    Ok(written)
}
