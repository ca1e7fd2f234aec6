//! Bike Share Charts Main Application
//! Main window with control panel and chart viewer.

use crate::config::AppConfig;
use crate::data::{DataLoader, Dataset};
use crate::export::export_dashboard;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::thread;

/// Dataset loading result from background thread
enum LoadResult {
    Progress(String),
    Complete { path: PathBuf, dataset: Dataset },
    Error(String),
}

/// Main application window.
pub struct ChartsApp {
    config: AppConfig,
    loader: DataLoader,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Async dataset loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl ChartsApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: AppConfig,
        initial_data: Option<PathBuf>,
    ) -> Self {
        let mut app = Self {
            config,
            loader: DataLoader::new(),
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
            load_rx: None,
            is_loading: false,
        };
        if let Some(path) = initial_data {
            app.start_loading(path);
        }
        app
    }

    /// Handle dataset file selection
    fn handle_browse_data(&mut self) {
        if self.is_loading {
            return; // Already loading
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Weekly series", &["json", "csv"])
            .pick_file()
        {
            self.start_loading(path);
        }
    }

    /// Read the dataset on a background thread
    fn start_loading(&mut self, path: PathBuf) {
        // Clear previous charts
        self.chart_viewer.clear();
        self.control_panel.settings.data_path = Some(path.clone());
        self.control_panel.set_progress(0.0, "Loading dataset...");
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        thread::spawn(move || {
            let _ = tx.send(LoadResult::Progress(format!("Reading {}...", path.display())));

            match DataLoader::read(&path) {
                Ok(dataset) => {
                    let _ = tx.send(LoadResult::Complete { path, dataset });
                }
                Err(e) => {
                    let _ = tx.send(LoadResult::Error(e.to_string()));
                }
            }
        });
    }

    /// Check for dataset loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(status) => {
                        self.control_panel.set_progress(10.0, &status);
                    }
                    LoadResult::Complete { path, dataset } => {
                        self.finish_loading(path, dataset);
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(error) => {
                        tracing::warn!(%error, "dataset load failed");
                        self.control_panel
                            .set_progress(0.0, &format!("Error: {}", error));
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    fn finish_loading(&mut self, path: PathBuf, dataset: Dataset) {
        self.control_panel.update_dataset(&dataset);
        let samples = dataset.sample_count();

        match self
            .chart_viewer
            .set_dataset(dataset.clone(), &self.config.plot, &self.config.tooltip)
        {
            Ok(()) => {
                self.loader.set_dataset(path, dataset);
                self.control_panel
                    .set_progress(100.0, &format!("Loaded {} weekly samples", samples));
            }
            Err(e) => {
                tracing::warn!(error = %e, "render failed");
                self.control_panel
                    .set_progress(0.0, &format!("Error: {}", e));
            }
        }
    }

    /// Handle export - render the four charts into a chosen directory
    fn handle_export(&mut self) {
        let Some(dataset) = self.loader.get_dataset() else {
            self.control_panel.set_progress(0.0, "No charts to export");
            return;
        };

        // Ask user for output location
        let out_dir = match rfd::FileDialog::new()
            .set_directory(&self.config.export.out_dir)
            .pick_folder()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        self.control_panel.set_progress(10.0, "Rendering charts...");

        let format = self.control_panel.settings.export_format;
        let size = (self.config.export.width, self.config.export.height);
        match export_dashboard(dataset, &self.config.plot, &out_dir, format, size) {
            Ok(written) => {
                self.control_panel.set_progress(
                    100.0,
                    &format!("Export Complete: {} charts", written.len()),
                );
                if self.config.export.open_after {
                    if let Err(e) = open::that(&out_dir) {
                        tracing::warn!(error = %e, dir = %out_dir.display(), "could not open export directory");
                    }
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "export failed");
                self.control_panel
                    .set_progress(0.0, &format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for ChartsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();

        // Request repaint while loading
        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui, &self.config.plot);

                    match action {
                        ControlPanelAction::BrowseData => self.handle_browse_data(),
                        ControlPanelAction::Export => self.handle_export(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer
                .show(ctx, ui, &self.config.plot, &self.config.tooltip);
        });
    }
}
