// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Scroll-driven playback coordination.
//!
//! [`OverlapCoordinator`] is the single owner of playback state for a page.
//! Hosts forward their events to it:
//!
//! - `on_load` once the first layout is known,
//! - `on_scroll` for every scroll event, then `on_frame` once per rendered frame,
//! - `on_theme_change` after a visual mode switch,
//! - `on_click` / `on_navigate` for gallery navigation,
//! - `on_intersection` when the host has a native intersection observer.
//!
//! Each recompute classifies every project as focused, covered by the next
//! section, or off screen. Unfocused projects get all their videos paused;
//! focused projects get the videos of their active gallery items started.

use crate::config::PlaybackConfig;
use crate::models::page::{GalleryKey, Page, VideoId};
use crate::playback::gallery::{GalleryController, NavDirection, NavigationOutcome};
use crate::playback::media::{MediaBackend, MediaPlaybackManager, SoundAffordance};
use crate::playback::probe::GeometryProbe;
use crate::playback::watcher::VisibilityWatcher;
use crate::util::geometry::{classify_focus, FocusState};

/// Coalesces scroll events into at most one recompute per frame.
#[derive(Debug, Clone, Default)]
pub struct FrameThrottle {
    scheduled: bool,
}

impl FrameThrottle {
    /// Request a recompute on the next frame. Returns `false` if one is already pending.
    pub fn schedule(&mut self) -> bool {
        if self.scheduled {
            log::trace!("Scroll coalesced into pending frame");
            return false;
        }
        self.scheduled = true;
        true
    }

    /// Consume the pending request, if any.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.scheduled)
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }
}

#[derive(Debug)]
struct ProjectSlot {
    galleries: Vec<GalleryController>,
    videos: Vec<VideoId>,
}

/// Top-level playback driver for one page.
#[derive(Debug)]
pub struct OverlapCoordinator<B> {
    config: PlaybackConfig,
    projects: Vec<ProjectSlot>,
    media: MediaPlaybackManager<B>,
    watcher: VisibilityWatcher,
    throttle: FrameThrottle,
    focus: Vec<FocusState>,
}

impl<B: MediaBackend> OverlapCoordinator<B> {
    /// Build with the page's own playback settings.
    pub fn new(page: &Page, backend: B) -> Self {
        Self::with_config(page, backend, page.playback)
    }

    pub fn with_config(page: &Page, backend: B, config: PlaybackConfig) -> Self {
        let projects: Vec<ProjectSlot> = page
            .projects
            .iter()
            .enumerate()
            .map(|(p, project)| ProjectSlot {
                galleries: project
                    .galleries
                    .iter()
                    .enumerate()
                    .map(|(g, gallery)| {
                        GalleryController::from_gallery(
                            GalleryKey {
                                project: p,
                                gallery: g,
                            },
                            gallery,
                        )
                    })
                    .collect(),
                videos: page.project_videos(p),
            })
            .collect();

        let mut watcher = VisibilityWatcher::new(config.watch_margin);
        watcher.observe(page.videos().map(|(id, _)| id));

        let focus = vec![FocusState::OffScreen; projects.len()];

        Self {
            config,
            projects,
            media: MediaPlaybackManager::new(page, backend),
            watcher,
            throttle: FrameThrottle::default(),
            focus,
        }
    }

    /// First evaluation, before any event has fired.
    pub fn on_load<P: GeometryProbe + ?Sized>(&mut self, probe: &P) {
        log::info!(
            "Coordinating {} projects, {} videos",
            self.projects.len(),
            self.watcher.observed().len()
        );
        self.recompute(probe);
    }

    /// Scroll event. Schedules a recompute for the next frame.
    pub fn on_scroll(&mut self) -> bool {
        self.throttle.schedule()
    }

    /// Frame callback: runs a scheduled recompute and the viewport backstop.
    ///
    /// Returns `true` if a recompute ran.
    pub fn on_frame<P: GeometryProbe + ?Sized>(&mut self, probe: &P) -> bool {
        let ran = self.throttle.take();
        if ran {
            self.recompute(probe);
        }
        self.watcher.poll(probe, &mut self.media);
        ran
    }

    /// Visual mode switch; layout and display may have changed without scrolling.
    pub fn on_theme_change<P: GeometryProbe + ?Sized>(&mut self, probe: &P) {
        log::debug!("Visual mode changed, rechecking");
        self.recompute(probe);
    }

    /// Step a gallery. Not throttled.
    pub fn on_navigate<P: GeometryProbe + ?Sized>(
        &mut self,
        key: GalleryKey,
        direction: NavDirection,
        probe: &P,
    ) -> Option<NavigationOutcome> {
        let controller = self
            .projects
            .get_mut(key.project)?
            .galleries
            .get_mut(key.gallery)?;
        controller.navigate(direction, &mut self.media, probe)
    }

    /// Click on a gallery's navigation surface at `offset_x` within `width`.
    pub fn on_click<P: GeometryProbe + ?Sized>(
        &mut self,
        key: GalleryKey,
        offset_x: f32,
        width: f32,
        probe: &P,
    ) -> Option<NavigationOutcome> {
        self.on_navigate(key, NavDirection::from_click(offset_x, width), probe)
    }

    /// Native intersection notification. Returns `true` if the video was paused.
    pub fn on_intersection(&mut self, id: VideoId, intersecting: bool) -> bool {
        self.watcher.on_intersection(id, intersecting, &mut self.media)
    }

    pub fn toggle_mute(&mut self, id: VideoId) -> Option<bool> {
        self.media.toggle_mute(id)
    }

    pub fn affordance(&self, id: VideoId) -> Option<SoundAffordance> {
        self.media.affordance(id)
    }

    /// Classify every project from the latest geometry and nudge playback.
    pub fn recompute<P: GeometryProbe + ?Sized>(&mut self, probe: &P) -> &[FocusState] {
        let height = probe.viewport_height();
        let threshold = self.config.focus_threshold;

        for (index, slot) in self.projects.iter().enumerate() {
            // No geometry means not rendered; treat as off screen.
            let state = match probe.project_rect(index) {
                Some(rect) => {
                    let next_top = probe.project_rect(index + 1).map(|next| next.top);
                    classify_focus(&rect, next_top, height, threshold)
                }
                None => FocusState::OffScreen,
            };
            self.focus[index] = state;

            if !state.is_focused() {
                for &id in &slot.videos {
                    self.media.request_pause(id);
                }
                continue;
            }

            for controller in &slot.galleries {
                for &id in controller.active_videos() {
                    if probe.is_displayed(id) {
                        self.media.request_play(id);
                    } else {
                        self.media.request_pause(id);
                    }
                }
            }
        }

        log::debug!("Focus: {:?}", self.focus);
        &self.focus
    }

    /// Classification from the last recompute.
    pub fn focus_states(&self) -> &[FocusState] {
        &self.focus
    }

    /// First focused project, if any.
    pub fn focused_project(&self) -> Option<usize> {
        self.focus.iter().position(|state| state.is_focused())
    }

    pub fn gallery(&self, key: GalleryKey) -> Option<&GalleryController> {
        self.projects.get(key.project)?.galleries.get(key.gallery)
    }

    pub fn active_index(&self, key: GalleryKey) -> Option<usize> {
        self.gallery(key)?.active_index()
    }

    pub fn is_scroll_pending(&self) -> bool {
        self.throttle.is_scheduled()
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    pub fn media(&self) -> &MediaPlaybackManager<B> {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut MediaPlaybackManager<B> {
        &mut self.media
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AutoplayPolicy;
    use crate::models::page::Page;
    use crate::playback::probe::GeometrySnapshot;
    use crate::playback::simulated::SimulatedMedia;
    use crate::playback::testing::{
        gallery, hidden_video, item, page, silent_video, sound_video, vid,
    };
    use crate::util::geometry::ViewRect;

    const H: f32 = 1000.0;
    const WIDTH: f32 = 1200.0;

    /// Two projects, each with one gallery of two items holding one video.
    fn two_project_page() -> Page {
        let project = || {
            vec![gallery(vec![
                item(vec![silent_video()]),
                item(vec![silent_video()]),
            ])]
        };
        page(vec![project(), project()])
    }

    fn coordinator(page: &Page, policy: AutoplayPolicy) -> OverlapCoordinator<SimulatedMedia> {
        OverlapCoordinator::new(page, SimulatedMedia::from_page(page, policy))
    }

    fn snapshot(spans: &[(f32, f32)]) -> GeometrySnapshot {
        let mut probe = GeometrySnapshot::new(H);
        for &(top, bottom) in spans {
            probe.push_project(ViewRect::span(top, bottom, WIDTH));
        }
        probe
    }

    fn playing(coordinator: &OverlapCoordinator<SimulatedMedia>) -> Vec<VideoId> {
        coordinator.media().backend().playing()
    }

    #[test]
    fn test_focused_project_plays_active_item_only() {
        let page = two_project_page();
        let mut coordinator = coordinator(&page, AutoplayPolicy::Allow);

        coordinator.on_load(&snapshot(&[(50.0, 800.0), (850.0, 1600.0)]));

        assert_eq!(
            coordinator.focus_states(),
            &[FocusState::Focused, FocusState::Focused]
        );
        assert_eq!(playing(&coordinator), vec![vid(0, 0, 0, 0), vid(1, 0, 0, 0)]);
    }

    #[test]
    fn test_covered_project_pauses_everything() {
        let page = two_project_page();
        let mut coordinator = coordinator(&page, AutoplayPolicy::Allow);
        coordinator.on_load(&snapshot(&[(0.0, 900.0), (400.0, 1300.0)]));

        // Start a non-active item by hand to check the covered path reaches it.
        coordinator.media_mut().request_play(vid(0, 0, 1, 0));
        assert!(coordinator.media().is_playing(vid(0, 0, 0, 0)));

        coordinator.recompute(&snapshot(&[(0.0, 900.0), (150.0, 1050.0)]));
        assert_eq!(
            coordinator.focus_states(),
            &[FocusState::CoveredByNext, FocusState::Focused]
        );
        assert_eq!(coordinator.focused_project(), Some(1));
        assert_eq!(playing(&coordinator), vec![vid(1, 0, 0, 0)]);
    }

    #[test]
    fn test_cover_boundary() {
        let page = two_project_page();
        let mut coordinator = coordinator(&page, AutoplayPolicy::Allow);

        coordinator.recompute(&snapshot(&[(0.0, 900.0), (151.0, 1051.0)]));
        assert_eq!(coordinator.focus_states()[0], FocusState::Focused);

        coordinator.recompute(&snapshot(&[(0.0, 900.0), (149.0, 1049.0)]));
        assert_eq!(coordinator.focus_states()[0], FocusState::CoveredByNext);
    }

    #[test]
    fn test_off_screen_boundaries() {
        let page = two_project_page();
        let mut coordinator = coordinator(&page, AutoplayPolicy::Allow);

        coordinator.recompute(&snapshot(&[(-900.0, 0.0), (H, 1900.0)]));
        assert_eq!(
            coordinator.focus_states(),
            &[FocusState::Focused, FocusState::Focused]
        );

        coordinator.recompute(&snapshot(&[(-900.0, -1.0), (H + 1.0, 1900.0)]));
        assert_eq!(
            coordinator.focus_states(),
            &[FocusState::OffScreen, FocusState::OffScreen]
        );
        assert!(playing(&coordinator).is_empty());
    }

    #[test]
    fn test_hidden_video_never_plays() {
        let page = page(vec![vec![gallery(vec![item(vec![silent_video(), hidden_video()])])]]);
        let mut coordinator = coordinator(&page, AutoplayPolicy::Allow);
        let mut probe = snapshot(&[(0.0, 900.0)]);
        probe.set_hidden(vid(0, 0, 0, 1), true);

        coordinator.on_load(&probe);
        coordinator.recompute(&probe);

        assert_eq!(playing(&coordinator), vec![vid(0, 0, 0, 0)]);
        assert_eq!(coordinator.media().backend().play_attempts(vid(0, 0, 0, 1)), 0);
    }

    #[test]
    fn test_theme_change_swaps_visible_variant() {
        let page = page(vec![vec![gallery(vec![item(vec![silent_video(), silent_video()])])]]);
        let mut coordinator = coordinator(&page, AutoplayPolicy::Allow);
        let dark = vid(0, 0, 0, 0);
        let light = vid(0, 0, 0, 1);

        let mut probe = snapshot(&[(0.0, 900.0)]);
        probe.set_hidden(light, true);
        coordinator.on_load(&probe);
        assert_eq!(playing(&coordinator), vec![dark]);

        probe.set_hidden(light, false).set_hidden(dark, true);
        coordinator.on_theme_change(&probe);
        assert_eq!(playing(&coordinator), vec![light]);
    }

    #[test]
    fn test_scroll_is_frame_throttled() {
        let page = two_project_page();
        let mut coordinator = coordinator(&page, AutoplayPolicy::Allow);
        let probe = snapshot(&[(0.0, 900.0), (1200.0, 2100.0)]);

        assert!(!coordinator.on_frame(&probe));
        assert!(playing(&coordinator).is_empty());

        assert!(coordinator.on_scroll());
        assert!(!coordinator.on_scroll());
        assert!(!coordinator.on_scroll());
        assert!(coordinator.is_scroll_pending());

        assert!(coordinator.on_frame(&probe));
        assert!(!coordinator.on_frame(&probe));
        assert_eq!(playing(&coordinator), vec![vid(0, 0, 0, 0)]);
    }

    #[test]
    fn test_steady_state_does_not_replay() {
        let page = two_project_page();
        let mut coordinator = coordinator(&page, AutoplayPolicy::Allow);
        let probe = snapshot(&[(0.0, 900.0), (1200.0, 2100.0)]);

        for _ in 0..5 {
            coordinator.recompute(&probe);
        }
        assert_eq!(coordinator.media().backend().play_attempts(vid(0, 0, 0, 0)), 1);
    }

    #[test]
    fn test_rejected_autoplay_retried_on_next_tick() {
        let page = two_project_page();
        let mut coordinator = coordinator(&page, AutoplayPolicy::RequireGesture);
        let probe = snapshot(&[(0.0, 900.0), (1200.0, 2100.0)]);

        coordinator.on_load(&probe);
        assert!(playing(&coordinator).is_empty());

        coordinator.media_mut().backend_mut().note_user_gesture();
        coordinator.on_scroll();
        coordinator.on_frame(&probe);
        assert_eq!(playing(&coordinator), vec![vid(0, 0, 0, 0)]);
    }

    #[test]
    fn test_click_navigation_end_to_end() {
        let page = page(vec![vec![gallery(vec![
            item(vec![silent_video()]),
            item(vec![sound_video()]),
            item(vec![silent_video()]),
        ])]]);
        let mut coordinator = coordinator(&page, AutoplayPolicy::Allow);
        let key = GalleryKey {
            project: 0,
            gallery: 0,
        };
        let probe = snapshot(&[(0.0, 900.0)]);
        coordinator.on_load(&probe);

        let outcome = coordinator.on_click(key, 700.0, 1000.0, &probe);
        assert_eq!(outcome, Some(NavigationOutcome { from: 0, to: 1 }));
        assert_eq!(coordinator.active_index(key), Some(1));
        assert_eq!(playing(&coordinator), vec![vid(0, 0, 1, 0)]);
        assert_eq!(
            coordinator.affordance(vid(0, 0, 1, 0)),
            Some(SoundAffordance { muted: true })
        );

        let outcome = coordinator.on_click(key, 200.0, 1000.0, &probe);
        assert_eq!(outcome, Some(NavigationOutcome { from: 1, to: 0 }));
        assert_eq!(playing(&coordinator), vec![vid(0, 0, 0, 0)]);

        // Next tick keeps the navigated state.
        coordinator.recompute(&probe);
        assert_eq!(playing(&coordinator), vec![vid(0, 0, 0, 0)]);
    }

    #[test]
    fn test_watcher_pauses_fast_scroll_miss() {
        let page = two_project_page();
        let mut coordinator = coordinator(&page, AutoplayPolicy::Allow);
        let mut probe = snapshot(&[(0.0, 900.0), (1200.0, 2100.0)]);
        probe.set_video(vid(0, 0, 0, 0), ViewRect::span(100.0, 600.0, WIDTH));
        coordinator.on_load(&probe);
        coordinator.on_frame(&probe);
        assert!(coordinator.media().is_playing(vid(0, 0, 0, 0)));

        // Video scrolled far away with no recompute scheduled.
        probe.set_video(vid(0, 0, 0, 0), ViewRect::span(-2000.0, -1500.0, WIDTH));
        assert!(!coordinator.on_frame(&probe));
        assert!(!coordinator.media().is_playing(vid(0, 0, 0, 0)));
    }

    #[test]
    fn test_native_intersection_notification() {
        let page = two_project_page();
        let mut coordinator = coordinator(&page, AutoplayPolicy::Allow);
        coordinator.on_load(&snapshot(&[(0.0, 900.0), (1200.0, 2100.0)]));

        assert!(coordinator.on_intersection(vid(0, 0, 0, 0), false));
        assert!(playing(&coordinator).is_empty());
    }

    #[test]
    fn test_missing_project_rect_pauses_project() {
        let page = two_project_page();
        let mut coordinator = coordinator(&page, AutoplayPolicy::Allow);
        coordinator.on_load(&snapshot(&[(0.0, 900.0), (850.0, 1750.0)]));
        assert_eq!(playing(&coordinator), vec![vid(0, 0, 0, 0), vid(1, 0, 0, 0)]);

        // Second project dropped out of the layout.
        coordinator.recompute(&snapshot(&[(0.0, 900.0)]));
        assert_eq!(
            coordinator.focus_states(),
            &[FocusState::Focused, FocusState::OffScreen]
        );
        assert_eq!(playing(&coordinator), vec![vid(0, 0, 0, 0)]);
        assert_eq!(coordinator.media().backend().pause_count(vid(1, 0, 0, 0)), 1);
    }

    #[test]
    fn test_navigate_unknown_gallery_is_noop() {
        let page = two_project_page();
        let mut coordinator = coordinator(&page, AutoplayPolicy::Allow);
        let key = GalleryKey {
            project: 7,
            gallery: 0,
        };

        let outcome = coordinator.on_navigate(key, NavDirection::Next, &snapshot(&[]));
        assert_eq!(outcome, None);
    }

    #[test]
    fn test_focused_project_leaves_manual_play_running() {
        let page = two_project_page();
        let mut coordinator = coordinator(&page, AutoplayPolicy::Allow);
        let probe = snapshot(&[(0.0, 900.0), (1200.0, 2100.0)]);
        coordinator.on_load(&probe);

        // A non-active item started by hand in a focused project.
        coordinator.media_mut().request_play(vid(0, 0, 1, 0));
        coordinator.recompute(&probe);

        assert_eq!(coordinator.focus_states()[0], FocusState::Focused);
        assert_eq!(playing(&coordinator), vec![vid(0, 0, 0, 0), vid(0, 0, 1, 0)]);
        assert_eq!(coordinator.media().backend().pause_count(vid(0, 0, 1, 0)), 0);
    }
}
