// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Media playback requests.
//!
//! [`MediaPlaybackManager`] sits between the coordination logic and the
//! host's media elements. Every request is best effort: starting playback
//! may be refused by the host, pausing is idempotent, and none of it ever
//! surfaces an error to the caller.

use crate::models::page::{Page, VideoId};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Why a host refused to start playback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayError {
    /// Autoplay policy: no user gesture yet.
    #[error("playback of {0} not allowed before a user gesture")]
    NotAllowed(VideoId),
    /// The host has no element for this id.
    #[error("no media element for {0}")]
    Missing(VideoId),
}

/// Host-side media elements.
///
/// `play` may fail; everything else is infallible. Unknown ids are
/// reported as paused and ignored by `pause`/`set_muted`.
pub trait MediaBackend {
    fn play(&mut self, id: VideoId) -> Result<(), PlayError>;
    fn pause(&mut self, id: VideoId);
    fn is_paused(&self, id: VideoId) -> bool;
    fn set_muted(&mut self, id: VideoId, muted: bool);
}

/// What a UI layer needs to draw the sound toggle of one video.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundAffordance {
    pub muted: bool,
}

impl SoundAffordance {
    pub fn icon(&self) -> &'static str {
        if self.muted {
            "🔇"
        } else {
            "🔊"
        }
    }

    /// Tooltip describing what a click does.
    pub fn title(&self) -> &'static str {
        if self.muted {
            "Unmute"
        } else {
            "Mute"
        }
    }
}

/// Owns per-video mute preferences and issues play/pause requests.
#[derive(Debug)]
pub struct MediaPlaybackManager<B> {
    backend: B,
    muted: HashMap<VideoId, bool>,
    sound_enabled: HashSet<VideoId>,
}

impl<B: MediaBackend> MediaPlaybackManager<B> {
    /// Register every video of `page`.
    ///
    /// Sound-enabled videos start muted; videos without sound start unmuted.
    pub fn new(page: &Page, mut backend: B) -> Self {
        let mut muted = HashMap::new();
        let mut sound_enabled = HashSet::new();

        for (id, video) in page.videos() {
            backend.set_muted(id, video.sound_enabled);
            muted.insert(id, video.sound_enabled);
            if video.sound_enabled {
                sound_enabled.insert(id);
            }
        }

        log::debug!(
            "Registered {} videos, {} with sound",
            muted.len(),
            sound_enabled.len()
        );

        Self {
            backend,
            muted,
            sound_enabled,
        }
    }

    /// Ask the host to start `id`. Refusals are dropped here.
    ///
    /// A video that is already playing is left alone.
    pub fn request_play(&mut self, id: VideoId) {
        if !self.backend.is_paused(id) {
            return;
        }
        if let Err(err) = self.backend.play(id) {
            // The next tick or navigation will ask again.
            log::debug!("Play request ignored: {}", err);
        }
    }

    /// Ask the host to stop `id`. No-op when already paused.
    pub fn request_pause(&mut self, id: VideoId) {
        if self.backend.is_paused(id) {
            return;
        }
        self.backend.pause(id);
    }

    pub fn is_playing(&self, id: VideoId) -> bool {
        !self.backend.is_paused(id)
    }

    /// Flip the mute flag of a sound-enabled video and return the new state.
    ///
    /// Returns `None` for videos without a sound toggle.
    pub fn toggle_mute(&mut self, id: VideoId) -> Option<bool> {
        if !self.sound_enabled.contains(&id) {
            return None;
        }
        let muted = self.muted.get_mut(&id)?;
        *muted = !*muted;
        let now = *muted;
        self.backend.set_muted(id, now);
        log::info!("{} {}", id, if now { "muted" } else { "unmuted" });
        Some(now)
    }

    pub fn is_muted(&self, id: VideoId) -> Option<bool> {
        self.muted.get(&id).copied()
    }

    /// Sound toggle state, present only for sound-enabled videos.
    pub fn affordance(&self, id: VideoId) -> Option<SoundAffordance> {
        if !self.sound_enabled.contains(&id) {
            return None;
        }
        self.is_muted(id).map(|muted| SoundAffordance { muted })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}
