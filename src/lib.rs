// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! FOLIO - scroll-driven portfolio pages
//!
//! Core library for pages made of stacked project sections with image and
//! video galleries. It decides which project is in focus as the page
//! scrolls and keeps only the selected media of that project playing.
//! Rendering and media decoding are left to the host, which talks to the
//! core through [`playback::GeometryProbe`] and [`playback::MediaBackend`].

pub mod config;
pub mod io;
pub mod models;
pub mod playback;
pub mod util;
