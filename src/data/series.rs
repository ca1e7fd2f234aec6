//! Series Module
//! Ordered (timestamp, value) samples as produced by the upstream aggregation.

use serde::{Deserialize, Serialize};

/// One weekly sample. Serialized as `[timestampMillis, value]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Sample {
    pub timestamp_ms: f64,
    pub value: f64,
}

impl Sample {
    pub fn new(timestamp_ms: f64, value: f64) -> Self {
        Self {
            timestamp_ms,
            value,
        }
    }

    pub fn as_point(&self) -> [f64; 2] {
        [self.timestamp_ms, self.value]
    }
}

impl From<[f64; 2]> for Sample {
    fn from([timestamp_ms, value]: [f64; 2]) -> Self {
        Self::new(timestamp_ms, value)
    }
}

impl From<Sample> for [f64; 2] {
    fn from(sample: Sample) -> Self {
        sample.as_point()
    }
}

/// Chronologically ordered samples. Order is whatever the producer emitted;
/// nothing here sorts or deduplicates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series {
    samples: Vec<Sample>,
}

impl Series {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Most recent sample, i.e. the last one emitted.
    pub fn latest(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Points in `[x, y]` form, as the plotting crates take them.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.samples.iter().map(Sample::as_point).collect()
    }
}

impl FromIterator<Sample> for Series {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl From<Vec<[f64; 2]>> for Series {
    fn from(points: Vec<[f64; 2]>) -> Self {
        points.into_iter().map(Sample::from).collect()
    }
}
