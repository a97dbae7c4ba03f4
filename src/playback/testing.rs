// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Page builders shared by the playback tests.

use crate::config::PlaybackConfig;
use crate::models::page::{Gallery, GalleryItem, Page, Project, ShowIn, Video, VideoId};

pub fn vid(project: usize, gallery: usize, item: usize, video: usize) -> VideoId {
    VideoId {
        project,
        gallery,
        item,
        video,
    }
}

/// A four second clip without an audio toggle.
pub fn silent_video() -> Video {
    Video {
        src: "clip.mp4".to_string(),
        poster: None,
        sound_enabled: false,
        duration: 4.0,
        show_in: ShowIn::Any,
        hidden: false,
    }
}

pub fn sound_video() -> Video {
    Video {
        sound_enabled: true,
        ..silent_video()
    }
}

pub fn hidden_video() -> Video {
    Video {
        hidden: true,
        ..silent_video()
    }
}

pub fn item(videos: Vec<Video>) -> GalleryItem {
    GalleryItem {
        videos,
        ..Default::default()
    }
}

pub fn gallery(items: Vec<GalleryItem>) -> Gallery {
    Gallery { items }
}

/// One project per entry, each holding the given galleries.
pub fn page(projects: Vec<Vec<Gallery>>) -> Page {
    Page {
        title: "test".to_string(),
        playback: PlaybackConfig::default(),
        projects: projects
            .into_iter()
            .enumerate()
            .map(|(index, galleries)| Project {
                title: format!("project {}", index),
                tab: None,
                accent: None,
                description: None,
                galleries,
            })
            .collect(),
    }
}
