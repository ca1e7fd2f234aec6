//! Data module - weekly series model and loading

mod dataset;
mod loader;
mod series;

pub use dataset::{Dataset, Metric};
pub use loader::DataLoader;
pub use series::{Sample, Series};
