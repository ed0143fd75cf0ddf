// Hide console window on Windows in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! Papyr - Main Entry Point
//!
//! A small desktop utility that turns markdown documents into print-ready
//! HTML and exports PDFs through the system print dialog. Built with Rust
//! and egui.

mod app;
mod config;
mod document;
mod error;
mod export;
mod files;
mod markdown;
mod state;
mod ui;

use app::PapyrApp;
use config::load_config;
use log::info;

/// Application name constant.
const APP_NAME: &str = "Papyr";

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting {}", APP_NAME);

    // Load settings to get window configuration
    let settings = load_config();
    let window_size = &settings.window_size;

    info!(
        "Window configuration: {}x{}, maximized: {}",
        window_size.width, window_size.height, window_size.maximized
    );

    // Configure the native window options
    let mut viewport = eframe::egui::ViewportBuilder::default()
        .with_title(APP_NAME)
        .with_inner_size([window_size.width, window_size.height])
        .with_min_inner_size([400.0, 300.0]);

    if window_size.maximized {
        viewport = viewport.with_maximized(true);
    }

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        APP_NAME,
        native_options,
        Box::new(|cc| Ok(Box::new(PapyrApp::new(cc)))),
    )
}
