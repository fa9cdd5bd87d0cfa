use eframe::egui;
use std::path::{Path, PathBuf};
use std::time::Duration;
use crate::core::{AppConfig, ExtractionOutcome};
use crate::gui::strings::{Language, Strings};
use crate::video::{ExtractionHandle, ExtractionTask, FrameExtractor};

const VIDEO_EXTENSIONS: [&str; 4] = ["mp4", "avi", "mov", "mkv"];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ShellError {
    #[error("no video has been selected")]
    NoSourceSelected,
    #[error("an extraction is already running")]
    AlreadyRunning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Information,
    Warning,
    Error,
}

/// A message box shown on top of the main window until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDialog {
    pub kind: DialogKind,
    pub title: String,
    pub body: String,
}

pub struct FrameExtractorApp {
    pub config: AppConfig,
    pub strings: &'static Strings,
    pub video_path: Option<PathBuf>,
    pub video_label: String,
    pub status_message: String,
    pub extraction: Option<ExtractionHandle>,
    pub dialog: Option<MessageDialog>,
}

impl FrameExtractorApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> anyhow::Result<Self> {
        let config = AppConfig::load()?;
        let app = Self::with_config(config);

        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        cc.egui_ctx
            .send_viewport_cmd(egui::ViewportCommand::Title(app.strings.window_title.to_string()));

        Ok(app)
    }

    pub fn with_config(config: AppConfig) -> Self {
        let language = Language::detect(config.language.as_deref());
        log::info!("Using interface language '{}'", language.code());
        let strings = language.strings();

        Self {
            config,
            strings,
            video_path: None,
            video_label: strings.no_video_selected.to_string(),
            status_message: String::new(),
            extraction: None,
            dialog: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.extraction.is_some()
    }

    /// Record the result of the file dialog. `None` means it was cancelled.
    pub fn set_video(&mut self, path: Option<PathBuf>) {
        match path {
            Some(path) => {
                let filename = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                self.video_label = self.strings.video_selected(&filename);
                log::info!("Video selected: {}", path.display());
                self.video_path = Some(path);
            }
            None => {
                self.video_label = self.strings.no_video_selected.to_string();
            }
        }
    }

    fn select_video(&mut self) {
        let mut dialog = rfd::FileDialog::new()
            .set_title(self.strings.select_video)
            .add_filter(self.strings.video_files, &VIDEO_EXTENSIONS[..])
            .add_filter(self.strings.all_files, &["*"][..]);
        if let Some(dir) = self.config.last_source_directory.as_deref().filter(|d| d.is_dir()) {
            dialog = dialog.set_directory(dir);
        }

        let picked = dialog.pick_file();
        if let Some(parent) = picked.as_deref().and_then(Path::parent) {
            self.config.last_source_directory = Some(parent.to_path_buf());
            if let Err(e) = self.config.save() {
                log::warn!("Failed to remember video directory: {}", e);
            }
        }
        self.set_video(picked);
    }

    /// Launch the background extraction for the selected video.
    /// `on_complete` runs on the worker once the outcome is ready.
    pub fn start_extraction<F>(&mut self, on_complete: F) -> Result<(), ShellError>
    where
        F: FnOnce() + Send + 'static,
    {
        if self.is_running() {
            return Err(ShellError::AlreadyRunning);
        }

        let Some(video_path) = self.video_path.clone() else {
            self.dialog = Some(MessageDialog {
                kind: DialogKind::Warning,
                title: self.strings.warning.to_string(),
                body: self.strings.please_select_video.to_string(),
            });
            return Err(ShellError::NoSourceSelected);
        };

        let extractor = FrameExtractor::from_config(&self.config);
        let handle = ExtractionTask::new(video_path, extractor).spawn(on_complete);

        self.extraction = Some(handle);
        self.status_message = self.strings.extraction_in_progress.to_string();
        Ok(())
    }

    /// Collect the outcome of the running extraction, if it has finished.
    pub fn poll_extraction(&mut self) -> Option<ExtractionOutcome> {
        let outcome = self.extraction.as_mut()?.try_outcome()?;
        self.on_extraction_finished(&outcome);
        Some(outcome)
    }

    fn on_extraction_finished(&mut self, outcome: &ExtractionOutcome) {
        if let Some(handle) = self.extraction.take() {
            log::debug!(
                "Extraction of {} reported {:?}",
                handle.source().display(),
                handle.state()
            );
        }

        self.dialog = Some(match outcome {
            ExtractionOutcome::Succeeded(_) => {
                self.status_message = self.strings.extraction_success.to_string();
                MessageDialog {
                    kind: DialogKind::Information,
                    title: self.strings.extraction_success.to_string(),
                    body: self.strings.extraction_complete_msg.to_string(),
                }
            }
            ExtractionOutcome::Failed(message) => {
                self.status_message = self.strings.extraction_error.to_string();
                MessageDialog {
                    kind: DialogKind::Error,
                    title: self.strings.extraction_error.to_string(),
                    body: self.strings.extraction_error_msg(message),
                }
            }
        });
    }

    fn show_controls(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        let enabled = !self.is_running() && self.dialog.is_none();

        ui.vertical(|ui| {
            if ui
                .add_enabled(enabled, egui::Button::new(self.strings.select_video))
                .clicked()
            {
                self.select_video();
            }

            ui.label(&self.video_label);
            ui.add_space(8.0);

            if ui
                .add_enabled(enabled, egui::Button::new(self.strings.start_extraction))
                .clicked()
            {
                let repaint_ctx = ctx.clone();
                match self.start_extraction(move || repaint_ctx.request_repaint()) {
                    Ok(()) => {}
                    Err(ShellError::NoSourceSelected) => log::warn!("Extraction requested without a video"),
                    Err(e) => log::error!("Failed to start extraction: {}", e),
                }
            }

            ui.add_space(8.0);
            if self.is_running() {
                ui.spinner();
            }
            ui.label(&self.status_message);
        });
    }

    fn show_dialog(&mut self, ctx: &egui::Context) {
        let Some(dialog) = &self.dialog else {
            return;
        };

        let mut dismissed = false;
        let color = match dialog.kind {
            DialogKind::Information => ctx.style().visuals.text_color(),
            DialogKind::Warning => ctx.style().visuals.warn_fg_color,
            DialogKind::Error => ctx.style().visuals.error_fg_color,
        };

        egui::Window::new(dialog.title.as_str())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().max_height(240.0).show(ui, |ui| {
                    ui.colored_label(color, &dialog.body);
                });
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button(self.strings.ok).clicked() {
                        dismissed = true;
                    }
                });
            });

        if dismissed {
            self.dialog = None;
        }
    }
}

impl eframe::App for FrameExtractorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_extraction();

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_controls(ctx, ui);
        });

        self.show_dialog(ctx);

        // Keep the spinner moving; completion also wakes us up
        if self.is_running() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
