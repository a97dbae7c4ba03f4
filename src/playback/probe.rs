// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometry reads.
//!
//! The playback layer never measures anything itself. It asks a
//! [`GeometryProbe`] for the current rectangle of a project or a video and
//! for a video's computed display state. Reads are pure and may be repeated.

use crate::models::page::VideoId;
use crate::util::geometry::ViewRect;
use std::collections::{HashMap, HashSet};

/// Read-only view of the current layout.
pub trait GeometryProbe {
    /// Height of the visible viewport in pixels.
    fn viewport_height(&self) -> f32;

    /// Current rectangle of the project section at `index`, if laid out.
    fn project_rect(&self, index: usize) -> Option<ViewRect>;

    /// Current rectangle of a video element, if laid out.
    fn video_rect(&self, id: VideoId) -> Option<ViewRect>;

    /// `false` when the video's computed display is "none".
    fn is_displayed(&self, id: VideoId) -> bool;
}

/// A layout captured at one instant.
///
/// Hosts fill one of these per frame; tests build them by hand.
#[derive(Debug, Clone, Default)]
pub struct GeometrySnapshot {
    viewport_height: f32,
    projects: Vec<ViewRect>,
    videos: HashMap<VideoId, ViewRect>,
    hidden: HashSet<VideoId>,
}

impl GeometrySnapshot {
    pub fn new(viewport_height: f32) -> Self {
        Self {
            viewport_height,
            ..Default::default()
        }
    }

    /// Append the next project's rectangle (document order).
    pub fn push_project(&mut self, rect: ViewRect) -> &mut Self {
        self.projects.push(rect);
        self
    }

    pub fn set_video(&mut self, id: VideoId, rect: ViewRect) -> &mut Self {
        self.videos.insert(id, rect);
        self
    }

    /// Mark a video as `display: none` (or clear the mark).
    pub fn set_hidden(&mut self, id: VideoId, hidden: bool) -> &mut Self {
        if hidden {
            self.hidden.insert(id);
        } else {
            self.hidden.remove(&id);
        }
        self
    }

    pub fn project_count(&self) -> usize {
        self.projects.len()
    }
}

impl GeometryProbe for GeometrySnapshot {
    fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    fn project_rect(&self, index: usize) -> Option<ViewRect> {
        self.projects.get(index).copied()
    }

    fn video_rect(&self, id: VideoId) -> Option<ViewRect> {
        self.videos.get(&id).copied()
    }

    fn is_displayed(&self, id: VideoId) -> bool {
        !self.hidden.contains(&id)
    }
}
