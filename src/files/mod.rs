//! File operations module for Papyr
//!
//! This module provides native file dialogs for choosing markdown
//! documents to view or export.

pub mod dialogs;
