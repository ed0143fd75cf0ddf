//! Settings Panel Component for Papyr
//!
//! This module implements a modal settings panel for the print-style
//! options used by document synthesis, with live preview of the values.

use crate::config::Settings;
use eframe::egui::{self, Color32, RichText, Ui};

/// Result of showing the settings panel.
#[derive(Debug, Clone, Default)]
pub struct SettingsPanelOutput {
    /// Whether settings were modified.
    pub changed: bool,
    /// Whether the panel should be closed.
    pub close_requested: bool,
    /// Whether a reset to defaults was requested.
    pub reset_requested: bool,
}

/// Settings panel rendering.
#[derive(Debug, Clone, Default)]
pub struct SettingsPanel;

impl SettingsPanel {
    /// Create a new settings panel instance.
    pub fn new() -> Self {
        Self
    }

    /// Show the settings panel as a modal window.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The egui context
    /// * `settings` - The current settings (mutable for live preview)
    ///
    /// # Returns
    ///
    /// Output indicating what actions to take
    pub fn show(&mut self, ctx: &egui::Context, settings: &mut Settings) -> SettingsPanelOutput {
        let mut output = SettingsPanelOutput::default();

        // Semi-transparent overlay
        let screen_rect = ctx.screen_rect();
        egui::Area::new(egui::Id::new("settings_overlay"))
            .order(egui::Order::Middle)
            .fixed_pos(screen_rect.min)
            .show(ctx, |ui| {
                let response = ui.allocate_response(screen_rect.size(), egui::Sense::click());
                ui.painter().rect_filled(
                    screen_rect,
                    0.0,
                    Color32::from_rgba_unmultiplied(0, 0, 0, 120),
                );

                // Close on click outside
                if response.clicked() {
                    output.close_requested = true;
                }
            });

        // Settings modal window
        egui::Window::new("⚙ PDF Export Settings")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .min_width(380.0)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                    output.close_requested = true;
                }

                ui.label(
                    RichText::new(
                        "PDFs are produced by your system's print dialog, \
                         so exports have no size limits.",
                    )
                    .weak(),
                );
                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                if self.show_print_style_section(ui, settings) {
                    output.changed = true;
                }

                ui.add_space(8.0);
                ui.separator();

                // Bottom buttons
                ui.horizontal(|ui| {
                    if ui
                        .button("↺ Reset")
                        .on_hover_text("Reset print style to defaults")
                        .clicked()
                    {
                        output.reset_requested = true;
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Close").clicked() {
                            output.close_requested = true;
                        }
                        ui.label(
                            RichText::new("Settings are saved automatically")
                                .small()
                                .weak(),
                        );
                    });
                });
            });

        output
    }

    /// Show the print style controls.
    ///
    /// Returns true if any setting was changed.
    fn show_print_style_section(&mut self, ui: &mut Ui, settings: &mut Settings) -> bool {
        let mut changed = false;

        // Font size slider
        ui.horizontal(|ui| {
            ui.label(RichText::new("Font Size").strong());
            ui.add_space(8.0);
            ui.label(format!("{}px", settings.font_size));
        });
        ui.label(RichText::new("Base font size in exported documents").weak().small());
        ui.add_space(4.0);

        let font_slider = ui.add(
            egui::Slider::new(
                &mut settings.font_size,
                Settings::MIN_FONT_SIZE..=Settings::MAX_FONT_SIZE,
            )
            .show_value(false)
            .step_by(1.0),
        );
        if font_slider.changed() {
            changed = true;
        }

        ui.add_space(12.0);

        // Line height slider
        ui.horizontal(|ui| {
            ui.label(RichText::new("Line Height").strong());
            ui.add_space(8.0);
            ui.label(format!("{:.1}", settings.line_height));
        });
        ui.label(RichText::new("Line height multiplier for body text").weak().small());
        ui.add_space(4.0);

        let line_slider = ui.add(
            egui::Slider::new(
                &mut settings.line_height,
                Settings::MIN_LINE_HEIGHT..=Settings::MAX_LINE_HEIGHT,
            )
            .show_value(false)
            .step_by(0.1),
        );
        if line_slider.changed() {
            changed = true;
        }

        ui.add_space(12.0);

        // Title toggle
        if ui
            .checkbox(&mut settings.include_title, "Include document title")
            .on_hover_text("Show the document title as a heading at the top of the PDF")
            .changed()
        {
            changed = true;
        }

        changed
    }
}
