// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Gallery navigation.
//!
//! Each gallery has its own [`GalleryController`] holding the active item
//! index. Navigation is circular and drives playback of the two affected
//! items straight away, without waiting for the next coordinator tick.

use crate::models::page::{Gallery, GalleryKey, VideoId};
use crate::playback::media::{MediaBackend, MediaPlaybackManager};
use crate::playback::probe::GeometryProbe;
use crate::util::geometry::is_left_half;

/// Direction of a gallery step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDirection {
    Previous,
    Next,
}

impl NavDirection {
    /// Left half of the control steps back, right half steps forward.
    pub fn from_click(offset_x: f32, width: f32) -> Self {
        if is_left_half(offset_x, width) {
            NavDirection::Previous
        } else {
            NavDirection::Next
        }
    }

    /// Index reached from `current` in a ring of `len` items.
    pub fn step(self, current: usize, len: usize) -> usize {
        debug_assert!(len > 0);
        match self {
            NavDirection::Previous => (current + len - 1) % len,
            NavDirection::Next => (current + 1) % len,
        }
    }

    /// Arrow shown next to the pointer.
    pub fn arrow(self) -> &'static str {
        match self {
            NavDirection::Previous => "←",
            NavDirection::Next => "→",
        }
    }
}

/// Indices touched by one navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationOutcome {
    pub from: usize,
    pub to: usize,
}

/// Active-item state of one gallery.
#[derive(Debug, Clone)]
pub struct GalleryController {
    key: GalleryKey,
    /// Video ids per item, in item order.
    items: Vec<Vec<VideoId>>,
    active: usize,
}

impl GalleryController {
    /// Build from markup, picking the initially active item.
    pub fn from_gallery(key: GalleryKey, gallery: &Gallery) -> Self {
        let marked = gallery.marked_active_count();
        if marked > 1 {
            log::warn!(
                "Gallery {}.{} marks {} items active, keeping the first",
                key.project,
                key.gallery,
                marked
            );
        }

        let items = gallery
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                (0..item.videos.len())
                    .map(|v| VideoId {
                        project: key.project,
                        gallery: key.gallery,
                        item: i,
                        video: v,
                    })
                    .collect()
            })
            .collect();

        Self {
            key,
            items,
            active: gallery.initial_active().unwrap_or(0),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the active item; `None` only for an empty gallery.
    pub fn active_index(&self) -> Option<usize> {
        (!self.items.is_empty()).then_some(self.active)
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active_index() == Some(index)
    }

    /// Videos of the active item.
    pub fn active_videos(&self) -> &[VideoId] {
        self.items.get(self.active).map_or(&[], Vec::as_slice)
    }

    /// Every video of the gallery, all items.
    pub fn videos(&self) -> impl Iterator<Item = VideoId> + '_ {
        self.items.iter().flatten().copied()
    }

    /// Step the active item and update playback of the outgoing and incoming items.
    ///
    /// Outgoing videos are always paused. Incoming videos are started when
    /// displayed and paused when not. A single-item gallery re-applies both
    /// steps to the same item. Empty galleries do nothing.
    pub fn navigate<B, P>(
        &mut self,
        direction: NavDirection,
        media: &mut MediaPlaybackManager<B>,
        probe: &P,
    ) -> Option<NavigationOutcome>
    where
        B: MediaBackend,
        P: GeometryProbe + ?Sized,
    {
        if self.items.is_empty() {
            return None;
        }

        let from = self.active;
        let to = direction.step(from, self.items.len());

        for &id in &self.items[from] {
            media.request_pause(id);
        }

        self.active = to;

        for &id in &self.items[to] {
            if probe.is_displayed(id) {
                media.request_play(id);
            } else {
                media.request_pause(id);
            }
        }

        log::info!(
            "Gallery {}.{}: {:?} {} -> {}",
            self.key.project,
            self.key.gallery,
            direction,
            from,
            to
        );
        Some(NavigationOutcome { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AutoplayPolicy;
    use crate::models::page::Page;
    use crate::playback::probe::GeometrySnapshot;
    use crate::playback::simulated::SimulatedMedia;
    use crate::playback::testing::{gallery, hidden_video, item, page, silent_video, vid};

    const KEY: GalleryKey = GalleryKey {
        project: 0,
        gallery: 0,
    };

    fn three_item_page() -> Page {
        page(vec![vec![gallery(vec![
            item(vec![silent_video(), silent_video()]),
            item(vec![silent_video(), hidden_video()]),
            item(vec![]),
        ])]])
    }

    type Fixture = (
        GalleryController,
        MediaPlaybackManager<SimulatedMedia>,
        GeometrySnapshot,
    );

    fn setup(page: &Page) -> Fixture {
        let controller = GalleryController::from_gallery(KEY, &page.projects[0].galleries[0]);
        let backend = SimulatedMedia::from_page(page, AutoplayPolicy::Allow);
        let media = MediaPlaybackManager::new(page, backend);
        let mut probe = GeometrySnapshot::new(1000.0);
        for (id, video) in page.videos() {
            probe.set_hidden(id, video.hidden);
        }
        (controller, media, probe)
    }

    fn active_count(controller: &GalleryController) -> usize {
        (0..controller.len()).filter(|&i| controller.is_active(i)).count()
    }

    #[test]
    fn test_step_is_circular() {
        assert_eq!(NavDirection::Next.step(2, 3), 0);
        assert_eq!(NavDirection::Previous.step(0, 3), 2);
        assert_eq!(NavDirection::Next.step(0, 1), 0);
        assert_eq!(NavDirection::Previous.step(0, 1), 0);
    }

    #[test]
    fn test_next_n_times_returns_home() {
        let page = three_item_page();
        let (mut controller, mut media, probe) = setup(&page);

        for _ in 0..controller.len() {
            controller.navigate(NavDirection::Next, &mut media, &probe);
            assert_eq!(active_count(&controller), 1);
        }
        assert_eq!(controller.active_index(), Some(0));
    }

    #[test]
    fn test_previous_inverts_next() {
        let page = three_item_page();
        let (mut controller, mut media, probe) = setup(&page);

        for start in 0..3 {
            while controller.active_index() != Some(start) {
                controller.navigate(NavDirection::Next, &mut media, &probe);
            }
            controller.navigate(NavDirection::Next, &mut media, &probe);
            controller.navigate(NavDirection::Previous, &mut media, &probe);
            assert_eq!(controller.active_index(), Some(start));
        }
    }

    #[test]
    fn test_click_scenario() {
        let page = three_item_page();
        let (mut controller, mut media, probe) = setup(&page);
        for &id in controller.active_videos() {
            media.request_play(id);
        }

        let direction = NavDirection::from_click(300.0, 400.0);
        let outcome = controller.navigate(direction, &mut media, &probe);
        assert_eq!(outcome, Some(NavigationOutcome { from: 0, to: 1 }));
        assert!(!media.is_playing(vid(0, 0, 0, 0)));
        assert!(!media.is_playing(vid(0, 0, 0, 1)));
        assert!(media.is_playing(vid(0, 0, 1, 0)));
        assert!(!media.is_playing(vid(0, 0, 1, 1)));
        assert_eq!(media.backend().play_attempts(vid(0, 0, 1, 1)), 0);

        let direction = NavDirection::from_click(100.0, 400.0);
        let outcome = controller.navigate(direction, &mut media, &probe);
        assert_eq!(outcome, Some(NavigationOutcome { from: 1, to: 0 }));
        assert!(!media.is_playing(vid(0, 0, 1, 0)));
        assert!(media.is_playing(vid(0, 0, 0, 0)));
        assert!(media.is_playing(vid(0, 0, 0, 1)));
    }

    #[test]
    fn test_outgoing_paused_even_when_displayed() {
        let page = three_item_page();
        let (mut controller, mut media, probe) = setup(&page);
        let outgoing = vid(0, 0, 0, 0);
        media.request_play(outgoing);
        assert!(probe.is_displayed(outgoing));

        controller.navigate(NavDirection::Next, &mut media, &probe);
        assert!(!media.is_playing(outgoing));
    }

    #[test]
    fn test_single_item_reapplies_playback() {
        let page = page(vec![vec![gallery(vec![item(vec![silent_video()])])]]);
        let (mut controller, mut media, probe) = setup(&page);
        let id = vid(0, 0, 0, 0);

        let outcome = controller.navigate(NavDirection::Next, &mut media, &probe);
        assert_eq!(outcome, Some(NavigationOutcome { from: 0, to: 0 }));
        assert!(media.is_playing(id));
    }

    #[test]
    fn test_empty_gallery_is_noop() {
        let page = page(vec![vec![gallery(vec![])]]);
        let (mut controller, mut media, probe) = setup(&page);

        assert!(controller.is_empty());
        assert_eq!(controller.active_index(), None);
        assert!(controller.active_videos().is_empty());
        assert_eq!(controller.navigate(NavDirection::Next, &mut media, &probe), None);
    }

    #[test]
    fn test_marked_item_starts_active() {
        let mut page = three_item_page();
        page.projects[0].galleries[0].items[2].active = true;
        let (controller, _, _) = setup(&page);
        assert_eq!(controller.active_index(), Some(2));
        assert_eq!(active_count(&controller), 1);
    }
}
