//! Dataset Loader Module
//! Reads the materialized weekly arrays (JSON) or a tabular export (CSV via Polars).

use super::{Dataset, Metric, Sample, Series};
use polars::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the timestamp column in CSV exports.
pub const TIMESTAMP_COLUMN: &str = "timestamp";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Malformed series data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Missing column: {0}")]
    MissingColumn(String),
    #[error("Unsupported dataset format: {0}")]
    UnsupportedFormat(String),
    #[error("No data loaded")]
    NoData,
}

/// Loads datasets and remembers the last one read.
pub struct DataLoader {
    dataset: Option<Dataset>,
    file_path: Option<PathBuf>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            dataset: None,
            file_path: None,
        }
    }

    /// Load a dataset, picking the reader from the file extension.
    pub fn load(&mut self, path: &Path) -> Result<&Dataset, LoaderError> {
        let dataset = Self::read(path)?;
        self.file_path = Some(path.to_path_buf());
        self.dataset = Some(dataset);
        self.dataset.as_ref().ok_or(LoaderError::NoData)
    }

    /// Read without touching loader state (used from the background thread).
    pub fn read(path: &Path) -> Result<Dataset, LoaderError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let dataset = match extension.as_str() {
            "json" => Self::read_json(path)?,
            "csv" => Self::read_csv(path)?,
            other => return Err(LoaderError::UnsupportedFormat(other.to_string())),
        };

        tracing::info!(
            path = %path.display(),
            samples = dataset.sample_count(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    /// Read the four arrays as the page template receives them.
    pub fn read_json(path: &Path) -> Result<Dataset, LoaderError> {
        let text = fs::read_to_string(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Read a table with a timestamp column and one column per series.
    ///
    /// Rows where either cell is null or NaN are dropped from that series only.
    pub fn read_csv(path: &Path) -> Result<Dataset, LoaderError> {
        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .finish()?
            .collect()?;

        let timestamps = Self::float_column(&df, TIMESTAMP_COLUMN)?;
        let timestamps = timestamps.f64()?;

        let mut dataset = Dataset::default();
        for metric in Metric::ALL {
            let values = Self::float_column(&df, metric.column())?;
            let values = values.f64()?;

            let series: Series = timestamps
                .into_iter()
                .zip(values.into_iter())
                .filter_map(|(t, v)| match (t, v) {
                    (Some(t), Some(v)) if !t.is_nan() && !v.is_nan() => Some(Sample::new(t, v)),
                    _ => None,
                })
                .collect();

            if series.len() < df.height() {
                tracing::debug!(
                    column = metric.column(),
                    dropped = df.height() - series.len(),
                    "skipped empty cells"
                );
            }
            *dataset.series_mut(metric) = series;
        }

        Ok(dataset)
    }

    fn float_column(df: &DataFrame, name: &str) -> Result<Column, LoaderError> {
        let column = df
            .column(name)
            .map_err(|_| LoaderError::MissingColumn(name.to_string()))?;
        Ok(column.cast(&DataType::Float64)?)
    }

    /// Get a reference to the loaded dataset.
    pub fn get_dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    /// Get file path.
    #[allow(dead_code)]
    pub fn get_file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }

    /// Set dataset directly (used for async loading)
    pub fn set_dataset(&mut self, path: PathBuf, dataset: Dataset) {
        self.file_path = Some(path);
        self.dataset = Some(dataset);
    }
}
