use crate::charts::{PlotConfig, TooltipStyle};
use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file looked up when `--config` is not given (extension optional).
pub const DEFAULT_CONFIG_FILE: &str = "config/charts";
pub const ENV_PREFIX: &str = "BIKESHARE_CHARTS";

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub plot: PlotConfig,
    pub tooltip: TooltipStyle,
    pub export: ExportSettings,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ExportSettings {
    pub width: u32,
    pub height: u32,
    pub out_dir: PathBuf,
    /// Open the output directory after an export from the GUI.
    pub open_after: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 300,
            out_dir: PathBuf::from("charts"),
            open_after: true,
        }
    }
}

/// Layer defaults, the config file, then `BIKESHARE_CHARTS__*` variables.
///
/// An explicit `path` must exist; the default file is optional.
pub fn load_app_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    load_with_env_prefix(path, ENV_PREFIX)
}

fn load_with_env_prefix(path: Option<&Path>, env_prefix: &str) -> anyhow::Result<AppConfig> {
    let file = match path {
        Some(p) => config::File::from(p).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let settings = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(env_prefix)
                .prefix_separator("__")
                .separator("__"),
        )
        .build()
        .context("reading configuration")?;

    let app: AppConfig = settings
        .try_deserialize()
        .context("invalid configuration")?;
    tracing::debug!(?app, "configuration loaded");
    Ok(app)
}
