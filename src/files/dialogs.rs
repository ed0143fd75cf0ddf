//! Native file dialog integration using the rfd crate
//!
//! This module provides functions to open native file picker dialogs
//! for choosing markdown documents.

use rfd::FileDialog;
use std::path::{Path, PathBuf};

/// File extension filter for markdown documents.
const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown", "mdown", "mkd", "mkdn"];

/// Opens a native file dialog for selecting a markdown document.
///
/// Returns `Some(PathBuf)` if a file was selected, `None` if cancelled.
pub fn open_markdown_dialog(initial_dir: Option<&Path>) -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Open Markdown File")
        .add_filter("Markdown Files", MARKDOWN_EXTENSIONS)
        .add_filter("All Files", &["*"]);

    if let Some(dir) = initial_dir {
        dialog = dialog.set_directory(dir);
    }

    dialog.pick_file()
}
