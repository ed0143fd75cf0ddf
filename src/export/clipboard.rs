//! Clipboard Export
//!
//! Copies a synthesized document to the system clipboard, preferring a
//! `data:` URL (openable directly from a browser address bar) and falling
//! back to the raw HTML text when the URL form cannot be written. The
//! write runs on a worker thread so a slow clipboard never stalls the UI;
//! the outcome is reported over a channel the preview surface polls.

use arboard::Clipboard;
use log::warn;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::sync::mpsc;
use std::thread;

// ─────────────────────────────────────────────────────────────────────────────
// Clipboard Error
// ─────────────────────────────────────────────────────────────────────────────

/// Errors that can occur during clipboard operations.
#[derive(Debug)]
pub enum ClipboardError {
    /// Failed to access the system clipboard
    Access(String),
    /// Failed to write clipboard content
    Write(String),
}

impl std::fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClipboardError::Access(msg) => write!(f, "Clipboard access error: {}", msg),
            ClipboardError::Write(msg) => write!(f, "Clipboard write error: {}", msg),
        }
    }
}

impl std::error::Error for ClipboardError {}

// ─────────────────────────────────────────────────────────────────────────────
// Copy Outcome
// ─────────────────────────────────────────────────────────────────────────────

/// Which encoding ended up on the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The `data:text/html` URL was written
    DataUrl,
    /// The raw HTML document text was written (fallback)
    PlainHtml,
}

impl CopyOutcome {
    /// User-facing notice for this outcome.
    pub fn notice(&self) -> &'static str {
        match self {
            CopyOutcome::DataUrl => {
                "Copied as data URL — paste it into a browser address bar to open"
            }
            CopyOutcome::PlainHtml => "Copied as plain HTML",
        }
    }
}

/// The result a clipboard worker reports back to the surface.
pub type CopyResult = Result<CopyOutcome, ClipboardError>;

// ─────────────────────────────────────────────────────────────────────────────
// Data URL Encoding
// ─────────────────────────────────────────────────────────────────────────────

/// Characters percent-encoded in the data-URL payload. Everything outside
/// `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is encoded, so the URL survives address
/// bars and plain-text transports unchanged.
const DATA_URL_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Encode a document as a `data:text/html;charset=utf-8,...` URL.
pub fn encode_data_url(document: &str) -> String {
    format!(
        "data:text/html;charset=utf-8,{}",
        utf8_percent_encode(document, DATA_URL_SET)
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Copy with Fallback
// ─────────────────────────────────────────────────────────────────────────────

/// Abstraction over a writable clipboard, so the fallback chain is testable
/// without a windowing system.
pub trait ClipboardTarget {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

impl ClipboardTarget for Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.set_text(text)
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }
}

/// Write the document to the clipboard, data URL first, raw HTML second.
///
/// The fallback is attempted exactly once, and only after the data-URL
/// write fails. If both writes fail, the error of the fallback attempt is
/// returned so the caller can surface a visible failure notice.
pub fn copy_with_fallback(
    target: &mut impl ClipboardTarget,
    document: &str,
) -> CopyResult {
    let data_url = encode_data_url(document);

    match target.write_text(&data_url) {
        Ok(()) => Ok(CopyOutcome::DataUrl),
        Err(first) => {
            warn!("Data URL clipboard write failed: {}. Falling back to plain HTML.", first);
            target
                .write_text(document)
                .map(|()| CopyOutcome::PlainHtml)
        }
    }
}

/// Copy the document on a worker thread.
///
/// Returns the receiving end of a one-shot channel carrying the outcome.
/// If the receiver is dropped before the worker finishes (the surface was
/// closed), the worker's send fails and the result is discarded without
/// touching any released state.
pub fn spawn_copy(document: String) -> mpsc::Receiver<CopyResult> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let result = match Clipboard::new() {
            Ok(mut clipboard) => copy_with_fallback(&mut clipboard, &document),
            Err(e) => Err(ClipboardError::Access(e.to_string())),
        };
        let _ = tx.send(result);
    });

    rx
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Clipboard stand-in that fails its first `failures` writes and records
    /// every attempted payload.
    struct FakeClipboard {
        failures: usize,
        writes: Vec<String>,
        attempts: usize,
    }

    impl FakeClipboard {
        fn failing(failures: usize) -> Self {
            Self {
                failures,
                writes: Vec::new(),
                attempts: 0,
            }
        }
    }

    impl ClipboardTarget for FakeClipboard {
        fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            self.attempts += 1;
            if self.attempts <= self.failures {
                return Err(ClipboardError::Write("simulated failure".to_string()));
            }
            self.writes.push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_encode_data_url_prefix_and_encoding() {
        let url = encode_data_url("<p>a b&c</p>");

        assert!(url.starts_with("data:text/html;charset=utf-8,"));
        assert!(url.contains("%3Cp%3E"));
        assert!(url.contains("a%20b%26c"));
    }

    #[test]
    fn test_encode_data_url_payload_has_no_reserved_characters() {
        let url = encode_data_url("<html>&\"'?#</html>");
        let payload = url.strip_prefix("data:text/html;charset=utf-8,").unwrap();

        assert!(!payload.contains('<'));
        assert!(!payload.contains('&'));
        assert!(!payload.contains('"'));
        assert!(!payload.contains('?'));
        assert!(!payload.contains('#'));
    }

    #[test]
    fn test_encode_data_url_keeps_unreserved_characters() {
        let url = encode_data_url("abc-_.!~*'()123");
        assert!(url.ends_with("abc-_.!~*'()123"));
    }

    #[test]
    fn test_primary_path_copies_data_url() {
        let mut clipboard = FakeClipboard::failing(0);
        let outcome = copy_with_fallback(&mut clipboard, "<p>doc</p>").unwrap();

        assert_eq!(outcome, CopyOutcome::DataUrl);
        assert_eq!(clipboard.writes.len(), 1);
        assert!(clipboard.writes[0].starts_with("data:text/html"));
    }

    #[test]
    fn test_fallback_invoked_exactly_once() {
        let mut clipboard = FakeClipboard::failing(1);
        let outcome = copy_with_fallback(&mut clipboard, "<p>doc</p>").unwrap();

        assert_eq!(outcome, CopyOutcome::PlainHtml);
        assert_eq!(clipboard.attempts, 2);
        assert_eq!(clipboard.writes, vec!["<p>doc</p>".to_string()]);
    }

    #[test]
    fn test_both_paths_failing_is_an_error() {
        let mut clipboard = FakeClipboard::failing(2);
        let result = copy_with_fallback(&mut clipboard, "<p>doc</p>");

        assert!(result.is_err());
        // No third attempt after the fallback fails
        assert_eq!(clipboard.attempts, 2);
        assert!(clipboard.writes.is_empty());
    }

    #[test]
    fn test_outcome_notices_are_distinct() {
        assert_ne!(CopyOutcome::DataUrl.notice(), CopyOutcome::PlainHtml.notice());
    }

    #[test]
    fn test_worker_completion_after_receiver_dropped() {
        // Models the surface closing while a write is in flight: the worker's
        // send fails quietly and nothing else is touched.
        let (tx, rx) = mpsc::channel::<CopyResult>();
        drop(rx);

        let worker = thread::spawn(move || tx.send(Ok(CopyOutcome::DataUrl)).is_err());
        assert!(worker.join().unwrap());
    }

    #[test]
    fn test_clipboard_error_display() {
        let err = ClipboardError::Access("denied".to_string());
        assert!(err.to_string().contains("denied"));

        let err = ClipboardError::Write("busy".to_string());
        assert!(err.to_string().contains("busy"));
    }
}
