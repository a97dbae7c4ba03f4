// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Playback tuning.
//!
//! Geometry thresholds are kept here rather than inline so hosts and tests
//! can inject their own viewport assumptions.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Fraction of the viewport height at which a section counts as settled.
pub const DEFAULT_FOCUS_THRESHOLD: f32 = 0.15;

/// Pixels the viewport is grown by before a video counts as having left it.
pub const DEFAULT_WATCH_MARGIN: f32 = 100.0;

/// When the host lets a video start without a prior user gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoplayPolicy {
    /// Everything may start.
    Allow,
    /// Muted videos may start; unmuted ones wait for a gesture.
    #[default]
    AllowMuted,
    /// Nothing starts before a gesture.
    RequireGesture,
}

/// Playback coordination settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub focus_threshold: f32,
    pub watch_margin: f32,
    pub autoplay: AutoplayPolicy,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            focus_threshold: DEFAULT_FOCUS_THRESHOLD,
            watch_margin: DEFAULT_WATCH_MARGIN,
            autoplay: AutoplayPolicy::default(),
        }
    }
}

impl PlaybackConfig {
    /// Reject values the geometry heuristics cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !self.focus_threshold.is_finite() || !(0.0..=1.0).contains(&self.focus_threshold) {
            bail!(
                "focus_threshold must be within 0..=1, got {}",
                self.focus_threshold
            );
        }
        if !self.watch_margin.is_finite() || self.watch_margin < 0.0 {
            bail!("watch_margin must be non-negative, got {}", self.watch_margin);
        }
        Ok(())
    }

    /// Pixel offset from the viewport top where sections settle.
    pub fn settle_offset(&self, viewport_height: f32) -> f32 {
        viewport_height * self.focus_threshold
    }
}
