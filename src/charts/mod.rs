//! Charts module - Chart configuration, rendering and hover tooltips

pub mod config;
mod page;
mod plotter;
mod renderer;
pub mod tooltip;

pub use config::{PlotConfig, TooltipStyle};
pub use page::Page;
pub use plotter::ChartPlotter;
pub use renderer::{ChartRenderer, RenderError};
pub use tooltip::{format_rounded, HoverEvent, TooltipState};
