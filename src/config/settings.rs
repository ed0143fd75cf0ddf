//! User settings and preferences for Papyr
//!
//! This module defines the `Settings` struct that holds all user-configurable
//! options, with serde support for JSON persistence. The three print-style
//! fields are persisted under their historical camelCase keys (`fontSize`,
//! `lineHeight`, `includeTitle`); keys the current version does not recognize
//! are carried through load/save untouched.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Print Style
// ─────────────────────────────────────────────────────────────────────────────

/// The style inputs to document synthesis.
///
/// A transient value derived from [`Settings`] at export time. The settings
/// layer guarantees the numeric fields fall within the slider bounds; the
/// synthesizer uses them verbatim.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrintStyle {
    /// Base font size of the exported document, in pixels
    pub font_size_px: u8,
    /// Line height multiplier for body text
    pub line_height: f32,
    /// Whether to render the document title as a leading heading
    pub include_title: bool,
}

impl Default for PrintStyle {
    fn default() -> Self {
        Self {
            font_size_px: 14,
            line_height: 1.6,
            include_title: true,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Window Size Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Window dimensions persisted across sessions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowSize {
    /// Window width in pixels
    pub width: f32,
    /// Window height in pixels
    pub height: f32,
    /// Whether the window was maximized
    #[serde(default)]
    pub maximized: bool,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 760.0,
            maximized: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Main Settings Struct
// ─────────────────────────────────────────────────────────────────────────────

/// User preferences and application settings.
///
/// This struct is serialized to JSON and persisted to the user's config
/// directory. All fields have defaults via the `Default` trait and
/// `#[serde(default)]`, so a partial or missing file merges cleanly with
/// the default configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    // ─────────────────────────────────────────────────────────────────────────
    // Print Style
    // ─────────────────────────────────────────────────────────────────────────
    /// Base font size for exported documents, in pixels
    pub font_size: u8,

    /// Line height multiplier for exported documents
    pub line_height: f32,

    /// Whether exported documents start with the document title as a heading
    pub include_title: bool,

    // ─────────────────────────────────────────────────────────────────────────
    // Session & History
    // ─────────────────────────────────────────────────────────────────────────
    /// Recently opened files (most recent first)
    pub recent_files: Vec<PathBuf>,

    /// Maximum number of recent files to remember
    pub max_recent_files: usize,

    // ─────────────────────────────────────────────────────────────────────────
    // Window State
    // ─────────────────────────────────────────────────────────────────────────
    /// Window size for session restoration
    pub window_size: WindowSize,

    /// Keys written by other versions of the application. Preserved verbatim
    /// so a round-trip through this version does not discard them.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_size: 14,
            line_height: 1.6,
            include_title: true,
            recent_files: Vec::new(),
            max_recent_files: 10,
            window_size: WindowSize::default(),
            extra: serde_json::Map::new(),
        }
    }
}

impl Settings {
    // ─────────────────────────────────────────────────────────────────────────
    // Validation Constants and Sanitization
    // ─────────────────────────────────────────────────────────────────────────

    /// Minimum allowed export font size (px).
    pub const MIN_FONT_SIZE: u8 = 10;
    /// Maximum allowed export font size (px).
    pub const MAX_FONT_SIZE: u8 = 24;
    /// Minimum allowed line height multiplier.
    pub const MIN_LINE_HEIGHT: f32 = 1.2;
    /// Maximum allowed line height multiplier.
    pub const MAX_LINE_HEIGHT: f32 = 2.0;
    /// Minimum window dimension.
    pub const MIN_WINDOW_SIZE: f32 = 200.0;
    /// Maximum window dimension.
    pub const MAX_WINDOW_SIZE: f32 = 10000.0;

    /// Sanitize settings by clamping values to valid ranges.
    ///
    /// This is useful after loading settings from a file that might have
    /// been manually edited with invalid values.
    pub fn sanitize(&mut self) {
        self.font_size = self
            .font_size
            .clamp(Self::MIN_FONT_SIZE, Self::MAX_FONT_SIZE);

        self.line_height = self
            .line_height
            .clamp(Self::MIN_LINE_HEIGHT, Self::MAX_LINE_HEIGHT);

        self.window_size.width = self
            .window_size
            .width
            .clamp(Self::MIN_WINDOW_SIZE, Self::MAX_WINDOW_SIZE);
        self.window_size.height = self
            .window_size
            .height
            .clamp(Self::MIN_WINDOW_SIZE, Self::MAX_WINDOW_SIZE);

        // Ensure max_recent_files is reasonable
        if self.max_recent_files == 0 {
            self.max_recent_files = 10;
        } else if self.max_recent_files > 100 {
            self.max_recent_files = 100;
        }

        self.recent_files.truncate(self.max_recent_files);
    }

    /// Load settings and sanitize them to ensure validity.
    ///
    /// This is a convenience method that deserializes and then sanitizes.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Derived Values
    // ─────────────────────────────────────────────────────────────────────────

    /// The print style currently configured for export.
    pub fn print_style(&self) -> PrintStyle {
        PrintStyle {
            font_size_px: self.font_size,
            line_height: self.line_height,
            include_title: self.include_title,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Recent Files
    // ─────────────────────────────────────────────────────────────────────────

    /// Add a file to the recent files list.
    ///
    /// If the file already exists in the list, it's moved to the front.
    /// The list is trimmed to `max_recent_files`.
    pub fn add_recent_file(&mut self, path: PathBuf) {
        self.recent_files.retain(|p| p != &path);
        self.recent_files.insert(0, path);
        self.recent_files.truncate(self.max_recent_files);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
