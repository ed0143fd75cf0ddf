//! PDF Export Module for Papyr
//!
//! This module turns an already-rendered document into a standalone
//! print-ready HTML document and drives the export flow around it.
//!
//! # Architecture
//!
//! - `synthesis.rs` - Pure synthesis of the standalone document
//! - `clipboard.rs` - Data-URL clipboard export with plain-HTML fallback
//! - `surface.rs` - Modal preview surface and the isolated rendering context

pub mod clipboard;
pub mod surface;
pub mod synthesis;

pub use surface::{PreviewSurface, SurfaceNotice};
pub use synthesis::{synthesize_document, ExportRequest};
