// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Sticky stacking page layout.
//!
//! Project sections are laid out one after another in a single container.
//! While scrolling, each section sticks at the settle line and the next
//! one slides over it; once the container ends they all scroll away
//! together. Rectangles are reported relative to the viewport so they can
//! feed the playback probe directly.

use folio::config::PlaybackConfig;
use folio::models::page::{Page, VideoId};
use folio::models::theme::Theme;
use folio::playback::GeometrySnapshot;
use folio::util::geometry::ViewRect;

/// Height of the title band at the top of each section.
pub const TITLE_BAND: f32 = 56.0;

/// Inner padding around galleries.
pub const SECTION_PADDING: f32 = 16.0;

const MIN_SECTION_HEIGHT: f32 = 320.0;

/// Geometry of the stacked page for one viewport size.
#[derive(Debug, Clone, PartialEq)]
pub struct StackLayout {
    pub viewport_height: f32,
    pub width: f32,
    /// Distance from the viewport top where sections stick.
    pub settle: f32,
    /// Space above the first section.
    pub header: f32,
    /// Space after the last section.
    pub footer: f32,
    pub section_height: f32,
    pub count: usize,
}

impl StackLayout {
    pub fn new(count: usize, viewport_height: f32, width: f32, config: &PlaybackConfig) -> Self {
        let settle = config.settle_offset(viewport_height);
        Self {
            viewport_height,
            width,
            settle,
            header: settle,
            footer: viewport_height * 0.5,
            section_height: (viewport_height - settle).max(MIN_SECTION_HEIGHT),
            count,
        }
    }

    /// Total scrollable height.
    pub fn content_height(&self) -> f32 {
        self.container_bottom() + self.footer
    }

    fn container_bottom(&self) -> f32 {
        self.header + self.section_height * self.count as f32
    }

    /// Top of section `index` in content coordinates, before sticking.
    pub fn natural_top(&self, index: usize) -> f32 {
        self.header + self.section_height * index as f32
    }

    /// Viewport-relative rectangle of section `index` at scroll offset `scroll`.
    pub fn project_rect(&self, index: usize, scroll: f32) -> ViewRect {
        let flowing = self.natural_top(index) - scroll;
        let last_stuck = self.container_bottom() - scroll - self.section_height;
        let top = flowing.max(self.settle).min(last_stuck);
        ViewRect::span(top, top + self.section_height, self.width)
    }

    /// Part of section `index` not painted over by the following section.
    pub fn visible_rect(&self, index: usize, scroll: f32) -> ViewRect {
        let mut rect = self.project_rect(index, scroll);
        if index + 1 < self.count {
            let next_top = self.project_rect(index + 1, scroll).top;
            rect.bottom = rect.bottom.min(next_top).max(rect.top);
        }
        rect
    }

    /// Area of gallery `gallery` out of `galleries` inside a section rectangle.
    pub fn gallery_rect(&self, section: &ViewRect, gallery: usize, galleries: usize) -> ViewRect {
        let galleries = galleries.max(1) as f32;
        let top = section.top + TITLE_BAND;
        let band = (section.bottom - SECTION_PADDING - top) / galleries;
        let g_top = top + band * gallery as f32;
        ViewRect::new(
            section.left + SECTION_PADDING,
            g_top,
            section.right - SECTION_PADDING,
            g_top + band - if gallery as f32 + 1.0 < galleries { SECTION_PADDING } else { 0.0 },
        )
    }

    /// Scroll offset that brings section `index` to the settle line.
    pub fn scroll_target(&self, index: usize) -> f32 {
        (self.natural_top(index) - self.settle).max(0.0)
    }

    /// Capture the geometry the coordinator needs at scroll offset `scroll`.
    pub fn snapshot(&self, page: &Page, scroll: f32, theme: Theme) -> GeometrySnapshot {
        let mut snapshot = GeometrySnapshot::new(self.viewport_height);

        for (index, project) in page.projects.iter().enumerate() {
            let section = self.project_rect(index, scroll);
            snapshot.push_project(section);

            let count = project.galleries.len();
            for (g, gallery) in project.galleries.iter().enumerate() {
                let area = self.gallery_rect(&section, g, count);
                for (i, item) in gallery.items.iter().enumerate() {
                    for (v, video) in item.videos.iter().enumerate() {
                        let id = VideoId {
                            project: index,
                            gallery: g,
                            item: i,
                            video: v,
                        };
                        snapshot
                            .set_video(id, area)
                            .set_hidden(id, !video.is_displayed(theme));
                    }
                }
            }
        }
        snapshot
    }
}
