// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Poster and still image loading.
//!
//! Gallery stills and video posters are decoded to RGBA8 so a host can
//! upload them as textures.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// A decoded image ready for upload.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    /// RGBA8, row major.
    pub pixels: Vec<u8>,
}

/// Decode an image file.
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let image = image::open(path)
        .with_context(|| format!("Failed to decode {}", path.display()))?
        .to_rgba8();
    let (width, height) = image.dimensions();
    Ok(LoadedImage {
        width,
        height,
        pixels: image.into_raw(),
    })
}

/// Resolve a manifest-relative asset path.
pub fn resolve_asset(manifest: &Path, asset: &str) -> PathBuf {
    let asset = Path::new(asset);
    if asset.is_absolute() {
        return asset.to_path_buf();
    }
    manifest
        .parent()
        .map(|dir| dir.join(asset))
        .unwrap_or_else(|| asset.to_path_buf())
}
