//! UI components for Papyr
//!
//! This module contains reusable UI widgets and components.

mod settings;

pub use settings::{SettingsPanel, SettingsPanelOutput};
