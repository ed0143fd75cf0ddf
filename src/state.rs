//! Application state management for Papyr
//!
//! This module defines the central `AppState` struct holding the currently
//! open document, user settings, and transient UI state (settings panel
//! visibility, status-bar toasts).

use crate::config::{load_config, save_config_silent, Settings};
use crate::document::Document;
use crate::error::Result;
use log::{debug, info, warn};
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// UI State
// ─────────────────────────────────────────────────────────────────────────────

/// UI-related state flags.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Whether the settings panel is open
    pub show_settings: bool,
    /// Temporary toast message (shown in the status bar)
    pub toast_message: Option<String>,
    /// When the toast message should expire (as seconds since app start)
    pub toast_expires_at: Option<f64>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Application State
// ─────────────────────────────────────────────────────────────────────────────

/// Central application state.
///
/// Holds the open document (if any), user settings loaded from config, and
/// transient UI state. The preview surface is owned by the app shell, not
/// here: it exists only while an export is being previewed.
#[derive(Debug)]
pub struct AppState {
    /// The currently open document, if any
    document: Option<Document>,
    /// User settings (loaded from config)
    pub settings: Settings,
    /// UI-related state
    pub ui: UiState,
    /// Whether settings have been modified and need saving
    settings_dirty: bool,
}

impl AppState {
    /// Create a new AppState with settings loaded from config.
    pub fn new() -> Self {
        let settings = load_config();
        info!("AppState initialized with settings");
        debug!(
            "Print style: {}px / {} line height, include title: {}",
            settings.font_size, settings.line_height, settings.include_title
        );

        Self {
            document: None,
            settings,
            ui: UiState::default(),
            settings_dirty: false,
        }
    }

    /// Create AppState with custom settings (useful for testing).
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            document: None,
            settings,
            ui: UiState::default(),
            settings_dirty: false,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Document Management
    // ─────────────────────────────────────────────────────────────────────────

    /// The currently open document.
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// Open a markdown file as the current document.
    pub fn open_document(&mut self, path: PathBuf) -> Result<()> {
        let document = Document::load(path.clone())?;
        self.document = Some(document);

        self.settings.add_recent_file(path);
        self.settings_dirty = true;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Settings Management
    // ─────────────────────────────────────────────────────────────────────────

    /// Update settings and mark as dirty.
    pub fn update_settings<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Settings),
    {
        f(&mut self.settings);
        self.settings_dirty = true;
    }

    /// Mark settings as dirty (needing to be saved).
    pub fn mark_settings_dirty(&mut self) {
        self.settings_dirty = true;
    }

    /// Save settings to the config file if modified.
    ///
    /// Returns `true` if settings were saved.
    pub fn save_settings_if_dirty(&mut self) -> bool {
        if self.settings_dirty {
            if save_config_silent(&self.settings) {
                self.settings_dirty = false;
                info!("Settings saved");
                return true;
            }
            warn!("Failed to save settings");
        }
        false
    }

    /// Force save settings to the config file.
    pub fn save_settings(&mut self) -> bool {
        self.settings_dirty = true;
        self.save_settings_if_dirty()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // UI State Helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Toggle the settings panel.
    pub fn toggle_settings(&mut self) {
        self.ui.show_settings = !self.ui.show_settings;
    }

    /// Show a temporary toast message (disappears after duration).
    ///
    /// `current_time` should be the current app time in seconds.
    /// `duration` is how long to show the message in seconds.
    pub fn show_toast(&mut self, message: impl Into<String>, current_time: f64, duration: f64) {
        self.ui.toast_message = Some(message.into());
        self.ui.toast_expires_at = Some(current_time + duration);
    }

    /// Update toast state - clears expired toasts.
    ///
    /// Call this each frame with the current time.
    pub fn update_toast(&mut self, current_time: f64) {
        if let Some(expires_at) = self.ui.toast_expires_at {
            if current_time >= expires_at {
                self.ui.toast_message = None;
                self.ui.toast_expires_at = None;
            }
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_new_state_has_no_document() {
        let state = AppState::with_settings(Settings::default());
        assert!(state.document().is_none());
    }

    #[test]
    fn test_open_document_sets_current_and_recent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plan.md");
        fs::write(&path, "# Plan").unwrap();

        let mut state = AppState::with_settings(Settings::default());
        state.open_document(path.clone()).unwrap();

        assert_eq!(state.document().unwrap().title, "plan");
        assert_eq!(state.settings.recent_files[0], path);
        assert!(state.settings_dirty);
    }

    #[test]
    fn test_open_missing_document_leaves_state_untouched() {
        let dir = TempDir::new().unwrap();
        let mut state = AppState::with_settings(Settings::default());

        let result = state.open_document(dir.path().join("nope.md"));
        assert!(result.is_err());
        assert!(state.document().is_none());
        assert!(state.settings.recent_files.is_empty());
    }

    #[test]
    fn test_update_settings_marks_dirty() {
        let mut state = AppState::with_settings(Settings::default());
        assert!(!state.settings_dirty);

        state.update_settings(|s| s.font_size = 18);

        assert_eq!(state.settings.font_size, 18);
        assert!(state.settings_dirty);
    }

    #[test]
    fn test_toggle_settings() {
        let mut state = AppState::with_settings(Settings::default());
        assert!(!state.ui.show_settings);

        state.toggle_settings();
        assert!(state.ui.show_settings);

        state.toggle_settings();
        assert!(!state.ui.show_settings);
    }

    #[test]
    fn test_toast_lifecycle() {
        let mut state = AppState::with_settings(Settings::default());

        state.show_toast("Copied", 10.0, 2.0);
        assert_eq!(state.ui.toast_message.as_deref(), Some("Copied"));

        state.update_toast(11.0);
        assert!(state.ui.toast_message.is_some());

        state.update_toast(12.5);
        assert!(state.ui.toast_message.is_none());
        assert!(state.ui.toast_expires_at.is_none());
    }
}
