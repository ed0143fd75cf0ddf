//! Main application module for Papyr
//!
//! This module implements the eframe App trait for the application shell:
//! the menu bar, the document view, the status bar with toast notices, and
//! the wiring between user commands and the export flow.

use crate::document::Document;
use crate::export::{ExportRequest, PreviewSurface};
use crate::files::dialogs::open_markdown_dialog;
use crate::markdown;
use crate::state::AppState;
use crate::ui::SettingsPanel;
use eframe::egui;
use log::{debug, info, warn};
use std::path::PathBuf;

/// How long notices stay visible, in seconds.
const TOAST_SHORT: f64 = 2.0;
/// Extended duration for failure notices that include an error message.
const TOAST_ERROR: f64 = 8.0;

/// User commands that are detected during rendering or input handling and
/// executed afterwards to avoid borrow conflicts.
#[derive(Debug, Clone)]
enum Command {
    /// Open a file via the native picker (Ctrl+O)
    OpenFile,
    /// Open a specific file (recent-files menu)
    OpenPath(PathBuf),
    /// Export the current document to PDF (Ctrl+Shift+E)
    ExportCurrent,
    /// Pick a file and export it to PDF
    ExportPicked,
    /// Open the settings panel (Ctrl+,)
    OpenSettings,
    /// Quit the application
    Quit,
}

/// The main application struct that holds all state and implements eframe::App.
pub struct PapyrApp {
    /// Central application state
    state: AppState,
    /// Settings panel component
    settings_panel: SettingsPanel,
    /// The preview surface for the export in progress, if one is open
    surface: Option<PreviewSurface>,
    /// Last known window size (for detecting changes)
    last_window_size: Option<egui::Vec2>,
    /// Application start time for timing toast messages
    start_time: std::time::Instant,
}

impl PapyrApp {
    /// Create a new PapyrApp instance with settings loaded from config.
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        info!("Initializing Papyr");

        Self {
            state: AppState::new(),
            settings_panel: SettingsPanel::new(),
            surface: None,
            last_window_size: None,
            start_time: std::time::Instant::now(),
        }
    }

    /// Get elapsed time since app start in seconds.
    fn get_app_time(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Command Handling
    // ─────────────────────────────────────────────────────────────────────────

    fn handle_command(&mut self, ctx: &egui::Context, command: Command) {
        match command {
            Command::OpenFile => {
                let initial = self
                    .state
                    .document()
                    .and_then(|d| d.path.parent().map(|p| p.to_path_buf()));
                if let Some(path) = open_markdown_dialog(initial.as_deref()) {
                    self.open_path(path);
                }
            }
            Command::OpenPath(path) => self.open_path(path),
            Command::ExportCurrent => self.export_current_document(),
            Command::ExportPicked => self.export_picked_file(),
            Command::OpenSettings => self.state.toggle_settings(),
            Command::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
        }
    }

    fn open_path(&mut self, path: PathBuf) {
        let time = self.get_app_time();
        match self.state.open_document(path) {
            Ok(()) => {
                let title = self.state.document().map(|d| d.title.clone());
                if let Some(title) = title {
                    self.state.show_toast(format!("Opened: {}", title), time, TOAST_SHORT);
                }
            }
            Err(e) => {
                warn!("Failed to open document: {}", e);
                self.state.show_toast(e.to_string(), time, TOAST_ERROR);
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Export Flow
    // ─────────────────────────────────────────────────────────────────────────

    /// Export the currently open document, or show a notice if there is none.
    fn export_current_document(&mut self) {
        let time = self.get_app_time();

        let Some(document) = self.state.document() else {
            self.state.show_toast("No document open", time, TOAST_SHORT);
            return;
        };

        let content = document.content.clone();
        let title = document.title.clone();

        self.state.show_toast("Preparing PDF preview…", time, 1.5);
        self.open_preview(&content, title);
    }

    /// Pick any markdown file and export it, without opening it in the viewer.
    fn export_picked_file(&mut self) {
        let initial = self
            .state
            .document()
            .and_then(|d| d.path.parent().map(|p| p.to_path_buf()));
        let Some(path) = open_markdown_dialog(initial.as_deref()) else {
            return;
        };

        let time = self.get_app_time();
        match Document::load(path) {
            Ok(document) => {
                self.state.show_toast("Preparing PDF preview…", time, 1.5);
                self.open_preview(&document.content, document.title);
            }
            Err(e) => {
                warn!("PDF export aborted: {}", e);
                self.state
                    .show_toast(format!("PDF export failed: {}", e), time, TOAST_ERROR);
            }
        }
    }

    /// Render the markdown and open the preview surface over the result.
    ///
    /// Opening a new preview drops any previous one, so at most one surface
    /// exists at a time.
    fn open_preview(&mut self, markdown_source: &str, title: String) {
        let fragment = markdown::render_to_html(markdown_source);
        let request = ExportRequest::new(fragment, title, self.state.settings.print_style());
        self.surface = Some(PreviewSurface::open(request));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Input Handling
    // ─────────────────────────────────────────────────────────────────────────

    fn keyboard_command(&self, ctx: &egui::Context) -> Option<Command> {
        ctx.input(|i| {
            if i.modifiers.command && i.modifiers.shift && i.key_pressed(egui::Key::E) {
                Some(Command::ExportCurrent)
            } else if i.modifiers.command && i.key_pressed(egui::Key::O) {
                Some(Command::OpenFile)
            } else if i.modifiers.command && i.key_pressed(egui::Key::Comma) {
                Some(Command::OpenSettings)
            } else {
                None
            }
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // UI Rendering
    // ─────────────────────────────────────────────────────────────────────────

    fn render_menu_bar(&mut self, ctx: &egui::Context) -> Option<Command> {
        let mut command = None;
        let recent_files = self.state.settings.recent_files.clone();
        let has_document = self.state.document().is_some();

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open…").clicked() {
                        command = Some(Command::OpenFile);
                        ui.close_menu();
                    }

                    ui.add_enabled_ui(!recent_files.is_empty(), |ui| {
                        ui.menu_button("Open Recent", |ui| {
                            for path in &recent_files {
                                let name = path
                                    .file_name()
                                    .and_then(|n| n.to_str())
                                    .unwrap_or("(unnamed)");
                                if ui.button(name).on_hover_text(path.display().to_string()).clicked() {
                                    command = Some(Command::OpenPath(path.clone()));
                                    ui.close_menu();
                                }
                            }
                        });
                    });

                    ui.separator();

                    if ui
                        .add_enabled(has_document, egui::Button::new("Export to PDF…"))
                        .on_hover_text("Preview and print the current document (Ctrl+Shift+E)")
                        .clicked()
                    {
                        command = Some(Command::ExportCurrent);
                        ui.close_menu();
                    }

                    if ui.button("Export File to PDF…").clicked() {
                        command = Some(Command::ExportPicked);
                        ui.close_menu();
                    }

                    ui.separator();

                    if ui.button("Settings…").clicked() {
                        command = Some(Command::OpenSettings);
                        ui.close_menu();
                    }

                    ui.separator();

                    if ui.button("Quit").clicked() {
                        command = Some(Command::Quit);
                        ui.close_menu();
                    }
                });
            });
        });

        command
    }

    fn render_document_view(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            match self.state.document() {
                Some(document) => {
                    ui.heading(&document.title);
                    ui.separator();

                    egui::ScrollArea::vertical()
                        .auto_shrink([false, false])
                        .show(ui, |ui| {
                            let mut content = document.content.as_str();
                            ui.add(
                                egui::TextEdit::multiline(&mut content)
                                    .font(egui::TextStyle::Monospace)
                                    .desired_width(f32::INFINITY),
                            );
                        });
                }
                None => {
                    ui.centered_and_justified(|ui| {
                        ui.label(
                            egui::RichText::new(
                                "Open a markdown file to get started (Ctrl+O)\n\
                                 Then export it with Ctrl+Shift+E",
                            )
                            .weak()
                            .size(16.0),
                        );
                    });
                }
            }
        });
    }

    fn render_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                match self.state.document() {
                    Some(document) => {
                        ui.label(document.path.display().to_string());
                    }
                    None => {
                        ui.label(egui::RichText::new("No document").weak());
                    }
                }

                // Center: Toast message (temporary notifications)
                if let Some(toast) = &self.state.ui.toast_message {
                    ui.with_layout(
                        egui::Layout::centered_and_justified(egui::Direction::LeftToRight),
                        |ui| {
                            ui.label(egui::RichText::new(toast).italics());
                        },
                    );
                }
            });
        });
    }

    fn render_settings_panel(&mut self, ctx: &egui::Context) {
        if !self.state.ui.show_settings {
            return;
        }

        let output = self.settings_panel.show(ctx, &mut self.state.settings);

        if output.changed {
            self.state.mark_settings_dirty();
        }

        if output.reset_requested {
            self.state.update_settings(|s| {
                let defaults = crate::config::Settings::default();
                s.font_size = defaults.font_size;
                s.line_height = defaults.line_height;
                s.include_title = defaults.include_title;
            });
            debug!("Print style reset to defaults");
        }

        if output.close_requested {
            self.state.ui.show_settings = false;
            self.state.save_settings_if_dirty();
        }
    }

    fn render_preview_surface(&mut self, ctx: &egui::Context) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        let output = surface.show(ctx);

        let time = self.get_app_time();
        for notice in output.notices {
            self.state.show_toast(notice.message, time, notice.seconds);
        }

        if output.close_requested {
            // Dropping the surface releases the synthesized document and the
            // preview temp file together.
            self.surface = None;
            debug!("Preview surface closed");
        }
    }

    /// Track window size changes for persistence.
    fn update_window_state(&mut self, ctx: &egui::Context) {
        ctx.input(|i| {
            if let Some(rect) = i.viewport().inner_rect {
                let current_size = rect.size();
                let changed = self
                    .last_window_size
                    .map(|s| (s - current_size).length() > 1.0)
                    .unwrap_or(true);

                if changed {
                    self.last_window_size = Some(current_size);
                    let maximized = i.viewport().maximized.unwrap_or(false);

                    if !maximized {
                        self.state.settings.window_size.width = current_size.x;
                        self.state.settings.window_size.height = current_size.y;
                    }
                    self.state.settings.window_size.maximized = maximized;
                }
            }
        });
    }

    /// Get the window title based on current state.
    fn window_title(&self) -> String {
        const APP_NAME: &str = "Papyr";

        match self.state.document() {
            Some(document) => format!("{} - {}", document.title, APP_NAME),
            None => APP_NAME.to_string(),
        }
    }
}

impl eframe::App for PapyrApp {
    /// Called each time the UI needs repainting.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Update toast message (clear if expired)
        let current_time = self.get_app_time();
        self.state.update_toast(current_time);

        // Update window title if it changed
        ctx.send_viewport_cmd(egui::ViewportCommand::Title(self.window_title()));

        // Track window size changes for persistence
        self.update_window_state(ctx);

        // Render the main UI; menu clicks and shortcuts are deferred commands
        let mut command = self.render_menu_bar(ctx);
        self.render_document_view(ctx);
        self.render_status_bar(ctx);
        self.render_settings_panel(ctx);
        self.render_preview_surface(ctx);

        // Keyboard shortcuts are suppressed while the preview is open; the
        // modal owns the keyboard then (Escape closes it).
        if command.is_none() && self.surface.is_none() {
            command = self.keyboard_command(ctx);
        }

        if let Some(command) = command {
            debug!("Executing command: {:?}", command);
            self.handle_command(ctx, command);
        }
    }

    /// Called when the application is about to close.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application exiting");
        self.state.save_settings();
    }

    /// Save persistent state.
    fn save(&mut self, _storage: &mut dyn eframe::Storage) {
        debug!("Saving application state");
        self.state.save_settings_if_dirty();
    }
}
