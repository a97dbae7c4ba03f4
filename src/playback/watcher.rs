// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Viewport exit backstop.
//!
//! Pauses any video that leaves the margin-expanded viewport, whatever the
//! gallery or focus state. It never starts playback.

use crate::models::page::VideoId;
use crate::playback::media::{MediaBackend, MediaPlaybackManager};
use crate::playback::probe::GeometryProbe;
use crate::util::geometry::intersects_viewport;
use std::collections::HashMap;

/// Tracks the last known intersection state of every observed video.
#[derive(Debug, Clone)]
pub struct VisibilityWatcher {
    margin: f32,
    observed: Vec<VideoId>,
    /// Absent until the first observation.
    intersecting: HashMap<VideoId, bool>,
}

impl VisibilityWatcher {
    pub fn new(margin: f32) -> Self {
        Self {
            margin,
            observed: Vec::new(),
            intersecting: HashMap::new(),
        }
    }

    /// Subscribe videos; already observed ids are ignored.
    pub fn observe(&mut self, ids: impl IntoIterator<Item = VideoId>) {
        for id in ids {
            if !self.observed.contains(&id) {
                self.observed.push(id);
            }
        }
    }

    pub fn observed(&self) -> &[VideoId] {
        &self.observed
    }

    /// Feed one intersection notification from the host.
    ///
    /// Returns `true` when the video was paused as a result.
    pub fn on_intersection<B: MediaBackend>(
        &mut self,
        id: VideoId,
        intersecting: bool,
        media: &mut MediaPlaybackManager<B>,
    ) -> bool {
        if !self.observed.contains(&id) {
            return false;
        }
        let previous = self.intersecting.insert(id, intersecting);
        if intersecting || previous == Some(false) {
            return false;
        }
        log::debug!("{} left the viewport, pausing", id);
        media.request_pause(id);
        true
    }

    /// Evaluate intersection from geometry for hosts without a native observer.
    ///
    /// Returns how many videos were paused.
    pub fn poll<B, P>(&mut self, probe: &P, media: &mut MediaPlaybackManager<B>) -> usize
    where
        B: MediaBackend,
        P: GeometryProbe + ?Sized,
    {
        let height = probe.viewport_height();
        let changes: Vec<(VideoId, bool)> = self
            .observed
            .iter()
            .filter_map(|&id| {
                let rect = probe.video_rect(id)?;
                Some((id, intersects_viewport(&rect, height, self.margin)))
            })
            .collect();

        let mut paused = 0;
        for (id, intersecting) in changes {
            if self.on_intersection(id, intersecting, media) {
                paused += 1;
            }
        }
        paused
    }
}
