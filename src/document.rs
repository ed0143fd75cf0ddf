//! Document model for Papyr
//!
//! A document is a markdown file loaded into the viewer: its path, the title
//! derived from the file stem, and the raw markdown content.

use crate::error::{Error, Result};
use log::info;
use std::path::{Path, PathBuf};

/// A markdown document loaded from disk.
#[derive(Debug, Clone)]
pub struct Document {
    /// Where the document was loaded from
    pub path: PathBuf,
    /// Display title, derived from the file stem
    pub title: String,
    /// Raw markdown content
    pub content: String,
}

impl Document {
    /// Load a document from a markdown file.
    ///
    /// # Errors
    ///
    /// Returns `Error::ContentRead` if the file cannot be read.
    pub fn load(path: PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| Error::ContentRead {
            path: path.clone(),
            source: e,
        })?;

        let title = title_from_path(&path);
        info!("Loaded document: {} ({} bytes)", path.display(), content.len());

        Ok(Self {
            path,
            title,
            content,
        })
    }
}

/// Derive a display title from a file path (the file stem, or "Untitled").
fn title_from_path(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Untitled")
        .to_string()
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
    fn test_title_from_path() {
        assert_eq!(title_from_path(Path::new("/notes/weekly plan.md")), "weekly plan");
        assert_eq!(title_from_path(Path::new("README.markdown")), "README");
        assert_eq!(title_from_path(Path::new("/")), "Untitled");
    }

    #[test]
    fn test_load_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("meeting notes.md");
        fs::write(&path, "# Agenda\n\n- item").unwrap();

        let doc = Document::load(path.clone()).unwrap();
        assert_eq!(doc.path, path);
        assert_eq!(doc.title, "meeting notes");
        assert!(doc.content.starts_with("# Agenda"));
    }

    #[test]
    fn test_load_missing_file_is_content_read_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("does-not-exist.md");

        let err = Document::load(path.clone()).unwrap_err();
        assert!(matches!(err, Error::ContentRead { path: p, .. } if p == path));
    }
}
