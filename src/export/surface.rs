//! Preview/Export Surface
//!
//! A modal surface that owns one synthesized document for the duration of an
//! export: it shows the document, and drives the three affordances (copy as
//! data URL, trigger the native print flow, close).
//!
//! The synthesized document is materialized into an isolated rendering
//! context — a private temporary `.html` file that only the user's browser
//! ever interprets. The host UI displays the document as inert text and never
//! executes it, so nothing in an exported document can reach the
//! application's own UI. Closing the surface drops the document string and
//! deletes the temp file.

use super::clipboard::{spawn_copy, CopyResult};
use super::synthesis::{synthesize_document, ExportRequest};
use eframe::egui::{self, Color32, RichText};
use log::{debug, warn};
use std::io::Write;
use std::path::Path;
use std::sync::mpsc;

// ─────────────────────────────────────────────────────────────────────────────
// Isolated Rendering Context
// ─────────────────────────────────────────────────────────────────────────────

/// A synthesized document written to a private temporary file.
///
/// The file is deleted when the context is dropped, which happens no later
/// than the surface closing.
#[derive(Debug)]
pub struct IsolatedContext {
    file: tempfile::NamedTempFile,
}

impl IsolatedContext {
    /// Write the document into a fresh temp file.
    fn load(document: &str) -> std::io::Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("papyr-preview-")
            .suffix(".html")
            .tempfile()?;

        file.write_all(document.as_bytes())?;
        file.flush()?;

        Ok(Self { file })
    }

    /// Path of the backing file, for handing to the browser.
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Surface Output
// ─────────────────────────────────────────────────────────────────────────────

/// A user-visible notice the surface wants shown on the status bar.
#[derive(Debug, Clone)]
pub struct SurfaceNotice {
    pub message: String,
    /// How long to keep the notice visible, in seconds
    pub seconds: f64,
}

impl SurfaceNotice {
    fn new(message: impl Into<String>, seconds: f64) -> Self {
        Self {
            message: message.into(),
            seconds,
        }
    }
}

/// Result of showing the surface for one frame.
#[derive(Debug, Default)]
pub struct SurfaceOutput {
    /// Whether the surface should be closed (dropped) by the caller
    pub close_requested: bool,
    /// Notices to show on the status bar
    pub notices: Vec<SurfaceNotice>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Preview Surface
// ─────────────────────────────────────────────────────────────────────────────

/// The modal preview for one export. `Closed → Open → Closed`: the surface
/// exists only while open — the owner holds it in an `Option` and drops it to
/// close, which releases the document and the isolated context together.
#[derive(Debug)]
pub struct PreviewSurface {
    title: String,
    document: String,
    context: Option<IsolatedContext>,
    /// Outcome channel of an in-flight clipboard write, if any
    copy_rx: Option<mpsc::Receiver<CopyResult>>,
}

impl PreviewSurface {
    /// Synthesize the document for `request` and open the surface over it.
    pub fn open(request: ExportRequest) -> Self {
        let document =
            synthesize_document(&request.content_fragment, &request.title, &request.style);

        let context = match IsolatedContext::load(&document) {
            Ok(ctx) => {
                debug!("Preview context loaded at {}", ctx.path().display());
                Some(ctx)
            }
            Err(e) => {
                warn!("Failed to write preview file: {}. Print will be unavailable.", e);
                None
            }
        };

        Self::new(request.title, document, context)
    }

    fn new(title: String, document: String, context: Option<IsolatedContext>) -> Self {
        Self {
            title,
            document,
            context,
            copy_rx: None,
        }
    }

    /// Whether the isolated context is loaded and printable.
    pub fn is_loaded(&self) -> bool {
        self.context.is_some()
    }

    /// The synthesized document owned by this surface.
    pub fn document(&self) -> &str {
        &self.document
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Export Affordances
    // ─────────────────────────────────────────────────────────────────────────

    /// Start a clipboard write of the document on a worker thread.
    ///
    /// No-op while a previous write is still in flight.
    pub fn copy_export(&mut self) {
        if self.copy_rx.is_some() {
            return;
        }
        self.copy_rx = Some(spawn_copy(self.document.clone()));
    }

    /// Hand the document to the system print pipeline by opening the
    /// isolated context in the default browser.
    ///
    /// Returns `false` without doing anything when the context is not
    /// loaded; an early click is a timing race, not an error.
    pub fn trigger_print(&self) -> bool {
        match &self.context {
            Some(ctx) => {
                if let Err(e) = open::that(ctx.path()) {
                    warn!("Failed to open preview in browser: {}", e);
                }
                true
            }
            None => {
                debug!("Print requested before the preview context was ready; ignoring");
                false
            }
        }
    }

    /// Collect the outcome of an in-flight clipboard write, if it finished.
    fn poll_copy(&mut self) -> Option<CopyResult> {
        let Some(rx) = &self.copy_rx else {
            return None;
        };

        match rx.try_recv() {
            Ok(result) => {
                self.copy_rx = None;
                Some(result)
            }
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => {
                self.copy_rx = None;
                None
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    /// Show the surface for one frame.
    pub fn show(&mut self, ctx: &egui::Context) -> SurfaceOutput {
        let mut output = SurfaceOutput::default();

        if let Some(result) = self.poll_copy() {
            let notice = match result {
                Ok(outcome) => SurfaceNotice::new(outcome.notice(), 3.0),
                Err(e) => SurfaceNotice::new(format!("Copy failed: {}", e), 6.0),
            };
            output.notices.push(notice);
        }

        // Dim the host UI behind the modal
        let screen_rect = ctx.screen_rect();
        egui::Area::new(egui::Id::new("preview_surface_overlay"))
            .order(egui::Order::Middle)
            .fixed_pos(screen_rect.min)
            .show(ctx, |ui| {
                ui.painter().rect_filled(
                    screen_rect,
                    0.0,
                    Color32::from_rgba_unmultiplied(0, 0, 0, 140),
                );
            });

        let mut copy_clicked = false;
        let mut print_clicked = false;
        let window_size = screen_rect.size() * 0.92;

        egui::Window::new(format!("Export \"{}\" to PDF", self.title))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .fixed_size(window_size)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                    output.close_requested = true;
                }

                // Toolbar: instructions on the left, actions on the right
                ui.horizontal(|ui| {
                    ui.label(RichText::new(self.instructions()).size(13.0));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("✕ Close").clicked() {
                            output.close_requested = true;
                        }

                        let printable = self.is_loaded();
                        if ui
                            .add_enabled(printable, egui::Button::new("🖨 Print…"))
                            .on_hover_text("Open in your browser and print to PDF")
                            .clicked()
                        {
                            print_clicked = true;
                        }

                        let idle = self.copy_rx.is_none();
                        if ui
                            .add_enabled(idle, egui::Button::new("📋 Copy Data URL"))
                            .on_hover_text("Copy the document for pasting into a browser")
                            .clicked()
                        {
                            copy_clicked = true;
                        }
                    });
                });

                ui.separator();

                // Inert preview of the synthesized document. Shown as text:
                // the host never interprets the markup.
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        let mut preview = self.document.as_str();
                        ui.add(
                            egui::TextEdit::multiline(&mut preview)
                                .font(egui::TextStyle::Monospace)
                                .desired_width(f32::INFINITY),
                        );
                    });
            });

        if copy_clicked {
            self.copy_export();
            output
                .notices
                .push(SurfaceNotice::new("Copying to clipboard…", 1.5));
        }

        if print_clicked && self.trigger_print() {
            output.notices.push(SurfaceNotice::new(
                "Opening the document in your browser — print from there",
                3.0,
            ));
        }

        output
    }

    /// Toolbar instructions, depending on whether the print path is
    /// available on this device or only the copy-and-paste route.
    fn instructions(&self) -> String {
        if self.is_loaded() {
            format!(
                "Print opens the document in your browser — press {} there and choose \"Save as PDF\".",
                print_shortcut()
            )
        } else {
            "Preview file unavailable — copy the data URL and paste it into a browser address bar, then print from there.".to_string()
        }
    }
}

/// The browser print shortcut on this platform.
fn print_shortcut() -> &'static str {
    if cfg!(target_os = "macos") {
        "⌘P"
    } else {
        "Ctrl+P"
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PrintStyle;
    use crate::export::clipboard::CopyOutcome;
    use std::path::PathBuf;

    fn request() -> ExportRequest {
        ExportRequest::new(
            "<p>body</p>".to_string(),
            "Notes".to_string(),
            PrintStyle::default(),
        )
    }

    #[test]
    fn test_open_loads_isolated_context() {
        let surface = PreviewSurface::open(request());

        assert!(surface.is_loaded());
        let path = surface.context.as_ref().unwrap().path().to_path_buf();
        assert!(path.exists());

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, surface.document());
        assert!(written.contains("<p>body</p>"));
    }

    #[test]
    fn test_close_releases_context_file() {
        let surface = PreviewSurface::open(request());
        let path: PathBuf = surface.context.as_ref().unwrap().path().to_path_buf();
        assert!(path.exists());

        drop(surface);
        assert!(!path.exists());
    }

    #[test]
    fn test_trigger_print_is_noop_without_context() {
        // An unready surface swallows the print request instead of erroring.
        let surface = PreviewSurface::new(
            "Notes".to_string(),
            "<!DOCTYPE html><html></html>".to_string(),
            None,
        );

        assert!(!surface.is_loaded());
        assert!(!surface.trigger_print());
    }

    #[test]
    fn test_copy_export_is_single_flight() {
        let mut surface = PreviewSurface::new("t".to_string(), "<p>d</p>".to_string(), None);

        let (tx, rx) = mpsc::channel();
        surface.copy_rx = Some(rx);

        // A request while one is in flight is ignored, not queued: the
        // original channel stays wired up.
        surface.copy_export();
        tx.send(Ok(CopyOutcome::PlainHtml)).unwrap();
        assert!(matches!(
            surface.poll_copy(),
            Some(Ok(CopyOutcome::PlainHtml))
        ));
    }

    #[test]
    fn test_poll_copy_consumes_pending_result() {
        let mut surface = PreviewSurface::new("t".to_string(), "<p>d</p>".to_string(), None);

        let (tx, rx) = mpsc::channel();
        surface.copy_rx = Some(rx);
        assert!(surface.poll_copy().is_none());

        tx.send(Ok(CopyOutcome::DataUrl)).unwrap();
        assert!(matches!(surface.poll_copy(), Some(Ok(CopyOutcome::DataUrl))));

        // Channel is released after the result is taken
        assert!(surface.copy_rx.is_none());
    }

    #[test]
    fn test_instructions_depend_on_context() {
        let ready = PreviewSurface::open(request());
        let unready = PreviewSurface::new("t".to_string(), String::new(), None);

        assert!(ready.instructions().contains("Print"));
        assert!(unready.instructions().contains("data URL"));
    }

    #[test]
    fn test_document_is_synthesized_from_request() {
        let surface = PreviewSurface::open(ExportRequest::new(
            "<p>x</p>".to_string(),
            "My <Notes> & Ideas".to_string(),
            PrintStyle::default(),
        ));

        assert!(surface.document().contains("My &lt;Notes&gt; &amp; Ideas"));
        assert!(surface.document().contains("<p>x</p>"));
    }
}
