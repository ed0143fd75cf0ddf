//! Print Document Synthesis
//!
//! This module builds a complete standalone HTML document from an
//! already-rendered content fragment, a title, and the configured print
//! style. The output embeds a fixed print-oriented stylesheet so the
//! document renders the same in any browser and paginates cleanly when
//! handed to the system print dialog.

use crate::config::PrintStyle;

// ─────────────────────────────────────────────────────────────────────────────
// Export Request
// ─────────────────────────────────────────────────────────────────────────────

/// Everything needed to produce and preview one export.
///
/// Created per export action and consumed by the preview surface; nothing
/// here outlives the surface that displays it.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    /// Rendered HTML body content, embedded verbatim
    pub content_fragment: String,
    /// Document title, escaped wherever it is embedded
    pub title: String,
    /// Print style captured from settings at the moment of export
    pub style: PrintStyle,
}

impl ExportRequest {
    pub fn new(content_fragment: String, title: String, style: PrintStyle) -> Self {
        Self {
            content_fragment,
            title,
            style,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Document Synthesis
// ─────────────────────────────────────────────────────────────────────────────

/// Build a complete standalone HTML document.
///
/// The content fragment is embedded verbatim, exactly once; it is trusted
/// pre-rendered markup. The title is escaped for both the `<title>` element
/// and the optional leading heading, so a title can never inject markup.
///
/// Style values are used verbatim: range enforcement belongs to the settings
/// layer, and any numeric value formats without failing here.
///
/// This function is pure; identical inputs yield byte-identical output.
pub fn synthesize_document(content_fragment: &str, title: &str, style: &PrintStyle) -> String {
    let escaped_title = html_escape(title);

    let heading = if style.include_title {
        format!(
            "    <h1 class=\"document-title\">{}</h1>\n",
            escaped_title
        )
    } else {
        String::new()
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="generator" content="Papyr">
    <title>{title}</title>
    <style>
{print_css}
body {{
    font-size: {font_size}px;
    line-height: {line_height};
}}
    </style>
</head>
<body>
{heading}    <div class="markdown-content">{content}</div>
</body>
</html>"#,
        title = escaped_title,
        print_css = PRINT_CSS,
        font_size = style.font_size_px,
        line_height = style.line_height,
        heading = heading,
        content = content_fragment,
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Stylesheet
// ─────────────────────────────────────────────────────────────────────────────

/// Fixed print-oriented stylesheet.
///
/// Static except for the body font-size/line-height rule appended at
/// synthesis time. The `@media print` block keeps headings attached to the
/// content that follows them and holds block elements together across page
/// boundaries where the layout engine can manage it.
const PRINT_CSS: &str = r#"* { box-sizing: border-box; }

body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", "Noto Sans", "Helvetica Neue", Helvetica, Arial, sans-serif;
    color: #000;
    background: #fff;
    margin: 0;
    padding: 20px;
}

h1, h2, h3, h4, h5, h6 {
    margin-top: 1.5em;
    margin-bottom: 0.5em;
    font-weight: 600;
    line-height: 1.3;
}

h1 { font-size: 2em; border-bottom: 2px solid #333; padding-bottom: 0.3em; }
h2 { font-size: 1.5em; border-bottom: 1px solid #666; padding-bottom: 0.3em; }
h3 { font-size: 1.25em; }
h4 { font-size: 1.1em; }
h5 { font-size: 1em; }
h6 { font-size: 0.9em; color: #666; }

p { margin: 1em 0; }

a { color: #0366d6; text-decoration: none; }

code {
    font-family: "SF Mono", Monaco, Menlo, Consolas, monospace;
    font-size: 0.9em;
    background-color: #f6f8fa;
    padding: 0.2em 0.4em;
    border-radius: 3px;
}

pre {
    background-color: #f6f8fa;
    border: 1px solid #d1d5da;
    border-radius: 6px;
    padding: 16px;
    overflow-x: auto;
    font-size: 0.85em;
    line-height: 1.45;
}

pre code {
    background: none;
    padding: 0;
    font-size: inherit;
}

blockquote {
    margin: 1em 0;
    padding: 0.5em 1em;
    border-left: 4px solid #dfe2e5;
    color: #6a737d;
    background-color: #f8f9fa;
}

ul, ol {
    margin: 1em 0;
    padding-left: 2em;
}

li { margin: 0.25em 0; }

table {
    border-collapse: collapse;
    width: 100%;
    margin: 1em 0;
}

th, td {
    border: 1px solid #dfe2e5;
    padding: 8px 12px;
    text-align: left;
}

th {
    background-color: #f6f8fa;
    font-weight: 600;
}

tr:nth-child(even) { background-color: #f8f9fa; }

hr {
    border: none;
    border-top: 2px solid #dfe2e5;
    margin: 2em 0;
}

img { max-width: 100%; height: auto; }

.document-title {
    font-size: 2.2em;
    font-weight: 700;
    margin-bottom: 1em;
    padding-bottom: 0.5em;
    border-bottom: 3px solid #333;
}

@media print {
    body { padding: 0; }
    h1, h2, h3, h4, h5, h6 { page-break-after: avoid; }
    pre, blockquote, table, img { page-break-inside: avoid; }
}
"#;

// ─────────────────────────────────────────────────────────────────────────────
// Utility Functions
// ─────────────────────────────────────────────────────────────────────────────

/// HTML-escape a string.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> PrintStyle {
        PrintStyle::default()
    }

    /// Extract the text between the document-title heading tags.
    fn heading_text(document: &str) -> Option<&str> {
        let open = "<h1 class=\"document-title\">";
        let start = document.find(open)? + open.len();
        let end = document[start..].find("</h1>")? + start;
        Some(&document[start..end])
    }

    /// Reverse of `html_escape`, for round-trip checks.
    fn html_unescape(s: &str) -> String {
        s.replace("&#39;", "'")
            .replace("&quot;", "\"")
            .replace("&gt;", ">")
            .replace("&lt;", "<")
            .replace("&amp;", "&")
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        let fragment = "<p>Same input</p>";
        let a = synthesize_document(fragment, "Title", &style());
        let b = synthesize_document(fragment, "Title", &style());
        assert_eq!(a, b);
    }

    #[test]
    fn test_document_structure() {
        let doc = synthesize_document("<p>body</p>", "Doc", &style());

        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert_eq!(doc.matches("<title>").count(), 1);
        assert!(doc.contains("<title>Doc</title>"));
        assert!(doc.ends_with("</html>"));
    }

    #[test]
    fn test_title_is_escaped_in_title_and_heading() {
        let doc = synthesize_document(
            "<p>x</p>",
            "a < b > c & \"d\"",
            &style(),
        );

        // The raw title must not appear anywhere; only its escaped form does.
        assert!(!doc.contains("a < b > c"));
        assert!(doc.contains("<title>a &lt; b &gt; c &amp; &quot;d&quot;</title>"));
        assert_eq!(
            heading_text(&doc),
            Some("a &lt; b &gt; c &amp; &quot;d&quot;")
        );
    }

    #[test]
    fn test_heading_round_trips_to_original_title() {
        let title = "Q3 <draft> — R&D \"final\"";
        let doc = synthesize_document("<p>x</p>", title, &style());

        let heading = heading_text(&doc).expect("heading present");
        assert_eq!(html_unescape(heading), title);
    }

    #[test]
    fn test_spec_scenario_notes_and_ideas() {
        let doc = synthesize_document("<p>x</p>", "My <Notes> & Ideas", &style());
        assert_eq!(heading_text(&doc), Some("My &lt;Notes&gt; &amp; Ideas"));
    }

    #[test]
    fn test_include_title_false_omits_heading_keeps_fragment() {
        let fragment = "<p>kept <em>verbatim</em></p>";
        let doc = synthesize_document(
            fragment,
            "Hidden",
            &PrintStyle {
                include_title: false,
                ..PrintStyle::default()
            },
        );

        assert!(!doc.contains("document-title"));
        assert!(doc.contains(fragment));
        // The title still appears in the head for the browser tab / print header
        assert!(doc.contains("<title>Hidden</title>"));
    }

    #[test]
    fn test_fragment_embedded_verbatim_exactly_once() {
        // A fragment full of characters that escaping would mangle
        let fragment = "<div class=\"markdown\">&amp; already-encoded &lt;kept&gt;</div>";
        let doc = synthesize_document(fragment, "t", &style());

        assert_eq!(doc.matches(fragment).count(), 1);
    }

    #[test]
    fn test_style_injection_points() {
        let doc = synthesize_document(
            "<p>x</p>",
            "t",
            &PrintStyle {
                font_size_px: 18,
                line_height: 1.4,
                include_title: true,
            },
        );

        assert!(doc.contains("font-size: 18px;"));
        assert!(doc.contains("line-height: 1.4;"));
    }

    #[test]
    fn test_out_of_range_style_passes_through() {
        // The synthesizer does not re-validate; it must still produce a document.
        let doc = synthesize_document(
            "<p>x</p>",
            "t",
            &PrintStyle {
                font_size_px: 200,
                line_height: 0.1,
                include_title: true,
            },
        );

        assert!(doc.contains("font-size: 200px;"));
        assert!(doc.contains("line-height: 0.1;"));
    }

    #[test]
    fn test_print_media_rules_present() {
        let doc = synthesize_document("<p>x</p>", "t", &style());

        assert!(doc.contains("@media print"));
        assert!(doc.contains("h1, h2, h3, h4, h5, h6 { page-break-after: avoid; }"));
        assert!(doc.contains("pre, blockquote, table, img { page-break-inside: avoid; }"));
    }

    #[test]
    fn test_empty_inputs_do_not_fail() {
        let doc = synthesize_document("", "", &style());
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<title></title>"));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("plain"), "plain");
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
        assert_eq!(html_escape("\"quoted\""), "&quot;quoted&quot;");
        assert_eq!(html_escape("it's"), "it&#39;s");
    }
}
