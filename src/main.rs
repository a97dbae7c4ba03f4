// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! FOLIO - portfolio page viewer
//!
//! A desktop host for scroll-driven portfolio pages: stacked project
//! sections with galleries whose videos play only while their project is
//! in focus.

mod app;
mod ui;

use anyhow::Result;
use app::FolioApp;
use std::path::PathBuf;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let manifest = std::env::args_os().nth(1).map(PathBuf::from);

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("FOLIO"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "FOLIO",
        options,
        Box::new(|_cc| Ok(Box::new(FolioApp::new(manifest)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
