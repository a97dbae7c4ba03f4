// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Playback coordination: gallery state, media requests and scroll focus.

pub mod coordinator;
pub mod gallery;
pub mod media;
pub mod probe;
pub mod simulated;
pub mod watcher;

#[cfg(test)]
pub(crate) mod testing;

pub use coordinator::{FrameThrottle, OverlapCoordinator};
pub use gallery::{GalleryController, NavDirection, NavigationOutcome};
pub use media::{MediaBackend, MediaPlaybackManager, PlayError, SoundAffordance};
pub use probe::{GeometryProbe, GeometrySnapshot};
pub use simulated::SimulatedMedia;
pub use watcher::VisibilityWatcher;
