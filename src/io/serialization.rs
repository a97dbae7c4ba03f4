// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Page manifest loading.
//!
//! This module reads page manifests in YAML and JSON formats and checks
//! the parts the playback layer relies on.

use crate::models::page::Page;
use anyhow::{bail, Context, Result};
use std::path::Path;

/// Parse a manifest from YAML text.
pub fn parse_yaml(text: &str) -> Result<Page> {
    let page: Page = serde_yaml::from_str(text).context("Invalid YAML manifest")?;
    validate(&page)?;
    Ok(page)
}

/// Parse a manifest from JSON text.
pub fn parse_json(text: &str) -> Result<Page> {
    let page: Page = serde_json::from_str(text).context("Invalid JSON manifest")?;
    validate(&page)?;
    Ok(page)
}

/// Load a manifest, choosing the format from the file extension.
pub fn load_page(path: &Path) -> Result<Page> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let extension = path.extension().and_then(|s| s.to_str());
    let page = match extension {
        Some("yaml") | Some("yml") => parse_yaml(&text)?,
        Some("json") => parse_json(&text)?,
        _ => bail!("Unsupported file extension: {:?}", extension),
    };

    log::info!(
        "Loaded manifest {} ({} projects, {} videos)",
        path.display(),
        page.projects.len(),
        page.videos().count()
    );
    Ok(page)
}

fn validate(page: &Page) -> Result<()> {
    page.playback.validate()?;

    for (index, project) in page.projects.iter().enumerate() {
        for (g, gallery) in project.galleries.iter().enumerate() {
            if gallery.items.is_empty() {
                log::warn!("Project {} ({}) gallery {} has no items", index, project.title, g);
            }
        }
        for video in project.galleries.iter().flat_map(|g| &g.items).flat_map(|i| &i.videos) {
            if !video.duration.is_finite() || video.duration <= 0.0 {
                bail!(
                    "Video {} in project {} has invalid duration {}",
                    video.src,
                    project.title,
                    video.duration
                );
            }
        }
    }
    Ok(())
}
