// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Page markup model.
//!
//! This module defines the static description of a portfolio page: the
//! ordered projects, their galleries, gallery items and videos. The
//! structure is read once and never changes afterwards; only the active
//! item of each gallery and the mute flag of each video move at runtime,
//! and those live in the playback layer.

use crate::config::PlaybackConfig;
use crate::models::theme::Theme;
use serde::{Deserialize, Serialize};

/// Stable address of a gallery: (project index, gallery index within project).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GalleryKey {
    pub project: usize,
    pub gallery: usize,
}

/// Stable address of a video in the page tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VideoId {
    pub project: usize,
    pub gallery: usize,
    pub item: usize,
    pub video: usize,
}

impl VideoId {
    /// The gallery this video belongs to.
    pub fn gallery_key(&self) -> GalleryKey {
        GalleryKey {
            project: self.project,
            gallery: self.gallery,
        }
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "video {}.{}.{}.{}",
            self.project, self.gallery, self.item, self.video
        )
    }
}

/// Which visual mode a video is displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShowIn {
    #[default]
    Any,
    Dark,
    Light,
}

/// A video element inside a gallery item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub src: String,
    #[serde(default)]
    pub poster: Option<String>,
    /// Whether the video carries an audio track the visitor may unmute.
    #[serde(default, rename = "sound")]
    pub sound_enabled: bool,
    #[serde(default = "default_duration")]
    pub duration: f32,
    #[serde(default)]
    pub show_in: ShowIn,
    #[serde(default)]
    pub hidden: bool,
}

fn default_duration() -> f32 {
    10.0
}

impl Video {
    /// Computed display state under the given theme: `false` means "display: none".
    pub fn is_displayed(&self, theme: Theme) -> bool {
        if self.hidden {
            return false;
        }
        match self.show_in {
            ShowIn::Any => true,
            ShowIn::Dark => theme == Theme::Dark,
            ShowIn::Light => theme == Theme::Light,
        }
    }
}

/// One slide of a gallery.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GalleryItem {
    #[serde(default)]
    pub caption: Option<String>,
    /// Still image shown behind (or instead of) the videos.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub videos: Vec<Video>,
}

/// An ordered, circular set of gallery items.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Gallery {
    #[serde(default)]
    pub items: Vec<GalleryItem>,
}

impl Gallery {
    /// Index of the initially active item.
    ///
    /// The first item marked active wins; with none marked the first item is used.
    /// Returns `None` for an empty gallery.
    pub fn initial_active(&self) -> Option<usize> {
        if self.items.is_empty() {
            return None;
        }
        Some(self.items.iter().position(|item| item.active).unwrap_or(0))
    }

    /// Number of items flagged active in the markup.
    pub fn marked_active_count(&self) -> usize {
        self.items.iter().filter(|item| item.active).count()
    }
}

/// A stacked page section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    /// Short label for the tab strip; falls back to the title.
    #[serde(default)]
    pub tab: Option<String>,
    /// Section background as `#rrggbb`.
    #[serde(default)]
    pub accent: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub galleries: Vec<Gallery>,
}

impl Project {
    pub fn tab_label(&self) -> &str {
        self.tab.as_deref().unwrap_or(&self.title)
    }
}

/// Complete page document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl Page {
    /// Gallery lookup by key.
    pub fn gallery(&self, key: GalleryKey) -> Option<&Gallery> {
        self.projects.get(key.project)?.galleries.get(key.gallery)
    }

    /// Video lookup by id.
    pub fn video(&self, id: VideoId) -> Option<&Video> {
        self.gallery(id.gallery_key())?
            .items
            .get(id.item)?
            .videos
            .get(id.video)
    }

    /// Every video in document order with its address.
    pub fn videos(&self) -> impl Iterator<Item = (VideoId, &Video)> + '_ {
        self.projects.iter().enumerate().flat_map(|(p, project)| {
            project.galleries.iter().enumerate().flat_map(move |(g, gallery)| {
                gallery.items.iter().enumerate().flat_map(move |(i, item)| {
                    item.videos.iter().enumerate().map(move |(v, video)| {
                        (
                            VideoId {
                                project: p,
                                gallery: g,
                                item: i,
                                video: v,
                            },
                            video,
                        )
                    })
                })
            })
        })
    }

    /// Videos belonging to one project, in document order.
    pub fn project_videos(&self, project: usize) -> Vec<VideoId> {
        self.videos()
            .filter(|(id, _)| id.project == project)
            .map(|(id, _)| id)
            .collect()
    }
}
