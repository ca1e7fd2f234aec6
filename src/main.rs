//! Bike Share Charts - Weekly time-series charts with hover tooltips
//!
//! Draws trips, stations, bikes and trips-per-bike per week, either in an
//! interactive window or as static image files.

mod charts;
mod config;
mod dashboard;
mod data;
mod export;
mod gui;

use anyhow::Context;
use clap::{Parser, Subcommand};
use eframe::egui;
use export::ExportFormat;
use gui::ChartsApp;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bikeshare-charts", version, about)]
struct Cli {
    /// Configuration file (TOML); defaults to config/charts.toml when present
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the chart window
    View {
        /// Dataset to load on startup (.json or .csv)
        data: Option<PathBuf>,
    },
    /// Write the four charts as image files
    Export {
        /// Dataset to render (.json or .csv)
        data: PathBuf,
        /// Output directory (defaults to the configured one)
        #[arg(short, long)]
        out: Option<PathBuf>,
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Png)]
        format: ExportFormat,
        #[arg(long)]
        width: Option<u32>,
        #[arg(long)]
        height: Option<u32>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let app_config = config::load_app_config(cli.config.as_deref())?;

    match cli.command.unwrap_or(Command::View { data: None }) {
        Command::View { data } => run_viewer(app_config, data),
        Command::Export {
            data,
            out,
            format,
            width,
            height,
        } => {
            let mut loader = data::DataLoader::new();
            let dataset = loader
                .load(&data)
                .with_context(|| format!("loading {}", data.display()))?;
            let out_dir = out.unwrap_or_else(|| app_config.export.out_dir.clone());
            let size = (
                width.unwrap_or(app_config.export.width),
                height.unwrap_or(app_config.export.height),
            );
            let written =
                export::export_dashboard(dataset, &app_config.plot, &out_dir, format, size)?;
            tracing::info!(count = written.len(), dir = %out_dir.display(), "export finished");
            Ok(())
        }
    }
}

fn run_viewer(app_config: config::AppConfig, data: Option<PathBuf>) -> anyhow::Result<()> {
    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("Bike Share Charts"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Bike Share Charts",
        options,
        Box::new(|cc| Ok(Box::new(ChartsApp::new(cc, app_config, data)))),
    )
    .map_err(|e| anyhow::anyhow!("window error: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_export_args() {
        let cli = Cli::parse_from([
            "bikeshare-charts",
            "export",
            "weekly.json",
            "--format",
            "svg",
            "--width",
            "640",
        ]);
        match cli.command {
            Some(Command::Export {
                data,
                format,
                width,
                height,
                out,
            }) => {
                assert_eq!(data, PathBuf::from("weekly.json"));
                assert_eq!(format, ExportFormat::Svg);
                assert_eq!(width, Some(640));
                assert_eq!(height, None);
                assert_eq!(out, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_no_subcommand_means_view() {
        let cli = Cli::parse_from(["bikeshare-charts"]);
        assert!(cli.command.is_none());
    }
}
