//! Markdown rendering for Papyr
//!
//! Thin wrapper around comrak that turns raw markdown text into the HTML
//! fragment consumed by document synthesis. The rest of the application
//! treats the produced fragment as opaque markup.

use comrak::{markdown_to_html, Options};

/// Render markdown source to an HTML fragment.
///
/// The fragment has no doctype or head; it is body content only. Raw HTML in
/// the source is passed through, matching how the fragment is later embedded
/// verbatim into the synthesized document.
pub fn render_to_html(markdown: &str) -> String {
    let mut options = Options::default();

    // Enable common extensions
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.footnotes = true;
    options.extension.header_ids = Some(String::new());

    // Render options
    options.render.unsafe_ = true; // Allow raw HTML

    markdown_to_html(markdown, &options)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
