// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! In-process media backend.
//!
//! Stands in for real video elements on hosts without a decoder. Each
//! element keeps a playhead that advances while playing and loops at the
//! clip duration. Start requests obey an [`AutoplayPolicy`] the same way a
//! browser does, so refusals can be exercised without one.

use crate::config::AutoplayPolicy;
use crate::models::page::{Page, VideoId};
use crate::playback::media::{MediaBackend, PlayError};
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct Element {
    playing: bool,
    muted: bool,
    /// Has an audio track; silent clips never count as audible.
    audible: bool,
    position: f32,
    duration: f32,
    play_attempts: usize,
    pauses: usize,
}

impl Element {
    fn new(duration: f32, audible: bool) -> Self {
        Self {
            playing: false,
            muted: audible,
            audible,
            position: 0.0,
            duration: duration.max(0.1),
            play_attempts: 0,
            pauses: 0,
        }
    }
}

/// Simulated video elements keyed by [`VideoId`].
#[derive(Debug, Clone)]
pub struct SimulatedMedia {
    elements: HashMap<VideoId, Element>,
    policy: AutoplayPolicy,
    gesture_seen: bool,
}

impl SimulatedMedia {
    /// One element per video of the page, paused at zero.
    ///
    /// Videos with sound start muted.
    pub fn from_page(page: &Page, policy: AutoplayPolicy) -> Self {
        let elements = page
            .videos()
            .map(|(id, video)| (id, Element::new(video.duration, video.sound_enabled)))
            .collect();
        Self {
            elements,
            policy,
            gesture_seen: false,
        }
    }

    /// Record a user activation; unlocks gated playback from now on.
    pub fn note_user_gesture(&mut self) {
        if !self.gesture_seen {
            log::debug!("User gesture seen, autoplay unlocked");
        }
        self.gesture_seen = true;
    }

    /// Move every playing playhead forward by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        for element in self.elements.values_mut().filter(|e| e.playing) {
            element.position = (element.position + dt) % element.duration;
        }
    }

    /// Playhead as a fraction of the clip, `0.0..1.0`.
    pub fn progress(&self, id: VideoId) -> Option<f32> {
        self.elements
            .get(&id)
            .map(|e| e.position / e.duration)
    }

    pub fn is_muted(&self, id: VideoId) -> bool {
        self.elements.get(&id).map_or(true, |e| e.muted)
    }

    /// Number of `play` calls that reached this element.
    pub fn play_attempts(&self, id: VideoId) -> usize {
        self.elements.get(&id).map_or(0, |e| e.play_attempts)
    }

    /// Number of playing → paused transitions.
    pub fn pause_count(&self, id: VideoId) -> usize {
        self.elements.get(&id).map_or(0, |e| e.pauses)
    }

    /// Ids of every element currently playing, sorted.
    pub fn playing(&self) -> Vec<VideoId> {
        let mut ids: Vec<VideoId> = self
            .elements
            .iter()
            .filter(|(_, e)| e.playing)
            .map(|(id, _)| *id)
            .collect();
        ids.sort();
        ids
    }

    fn allowed(&self, inaudible: bool) -> bool {
        match self.policy {
            AutoplayPolicy::Allow => true,
            AutoplayPolicy::AllowMuted => inaudible || self.gesture_seen,
            AutoplayPolicy::RequireGesture => self.gesture_seen,
        }
    }
}

impl MediaBackend for SimulatedMedia {
    fn play(&mut self, id: VideoId) -> Result<(), PlayError> {
        let element = self.elements.get(&id).ok_or(PlayError::Missing(id))?;
        let allowed = self.allowed(element.muted || !element.audible);
        let element = self.elements.get_mut(&id).ok_or(PlayError::Missing(id))?;

        element.play_attempts += 1;
        if !allowed {
            return Err(PlayError::NotAllowed(id));
        }
        element.playing = true;
        Ok(())
    }

    fn pause(&mut self, id: VideoId) {
        if let Some(element) = self.elements.get_mut(&id) {
            if element.playing {
                element.playing = false;
                element.pauses += 1;
            }
        }
    }

    fn is_paused(&self, id: VideoId) -> bool {
        self.elements.get(&id).map_or(true, |e| !e.playing)
    }

    fn set_muted(&mut self, id: VideoId, muted: bool) {
        if let Some(element) = self.elements.get_mut(&id) {
            element.muted = muted;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::testing::{gallery, item, page, silent_video, sound_video, vid};

    fn media(policy: AutoplayPolicy) -> SimulatedMedia {
        let page = page(vec![vec![gallery(vec![item(vec![silent_video(), sound_video()])])]]);
        SimulatedMedia::from_page(&page, policy)
    }

    #[test]
    fn test_allow_muted_policy() {
        let mut media = media(AutoplayPolicy::AllowMuted);
        let id = vid(0, 0, 0, 1);
        assert!(media.is_muted(id));

        assert!(media.play(id).is_ok());
        media.pause(id);

        media.set_muted(id, false);
        assert_eq!(media.play(id), Err(PlayError::NotAllowed(id)));
        media.note_user_gesture();
        assert!(media.play(id).is_ok());
        assert_eq!(media.play_attempts(id), 3);
    }

    #[test]
    fn test_silent_video_autoplays_unmuted() {
        let mut media = media(AutoplayPolicy::AllowMuted);
        let id = vid(0, 0, 0, 0);

        assert!(!media.is_muted(id));
        assert!(media.play(id).is_ok());
    }

    #[test]
    fn test_unknown_id_is_missing() {
        let mut media = media(AutoplayPolicy::Allow);
        let unknown = vid(5, 0, 0, 0);
        assert_eq!(media.play(unknown), Err(PlayError::Missing(unknown)));
        assert!(media.is_paused(unknown));
        media.pause(unknown);
    }

    #[test]
    fn test_advance_loops_at_duration() {
        let mut media = media(AutoplayPolicy::Allow);
        let id = vid(0, 0, 0, 0);

        media.advance(1.0);
        assert_eq!(media.progress(id), Some(0.0));

        media.play(id).unwrap();
        media.advance(3.0);
        let progress = media.progress(id).unwrap();
        assert!((progress - 0.75).abs() < 0.001);

        media.advance(2.0);
        let progress = media.progress(id).unwrap();
        assert!((progress - 0.25).abs() < 0.001);
        assert_eq!(media.playing(), vec![id]);
    }
}
