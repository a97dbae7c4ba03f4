// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the viewport heuristics used by playback
//! coordination. All rectangles are viewport-relative, in logical pixels,
//! with `y` growing downwards (top of the viewport is 0).

/// An on-screen rectangle relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl ViewRect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle spanning the full width `0..width` between `top` and `bottom`.
    pub fn span(top: f32, bottom: f32, width: f32) -> Self {
        Self::new(0.0, top, width, bottom)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Shift vertically by `dy` pixels.
    pub fn translated(&self, dy: f32) -> Self {
        Self::new(self.left, self.top + dy, self.right, self.bottom + dy)
    }
}

/// Per-project focus classification, recomputed on every coordinator tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusState {
    Focused,
    CoveredByNext,
    OffScreen,
}

impl FocusState {
    pub fn is_focused(self) -> bool {
        matches!(self, FocusState::Focused)
    }
}

/// Entirely above (`bottom < 0`) or entirely below (`top > viewport_height`) the viewport.
pub fn is_off_screen(rect: &ViewRect, viewport_height: f32) -> bool {
    rect.bottom < 0.0 || rect.top > viewport_height
}

/// The next section has reached its settle line, inclusive.
pub fn is_covered_by_next(next_top: Option<f32>, viewport_height: f32, threshold: f32) -> bool {
    next_top.is_some_and(|top| top <= viewport_height * threshold)
}

/// Classify one project from its own rectangle and the top edge of the next project.
///
/// Only the following project is consulted; a previous section sliding back
/// over this one does not count as covering.
pub fn classify_focus(
    rect: &ViewRect,
    next_top: Option<f32>,
    viewport_height: f32,
    threshold: f32,
) -> FocusState {
    if is_covered_by_next(next_top, viewport_height, threshold) {
        FocusState::CoveredByNext
    } else if is_off_screen(rect, viewport_height) {
        FocusState::OffScreen
    } else {
        FocusState::Focused
    }
}

/// Whether `rect` touches the viewport grown by `margin` on the vertical axis.
///
/// Edge contact counts as intersecting, like a zero threshold intersection observer.
pub fn intersects_viewport(rect: &ViewRect, viewport_height: f32, margin: f32) -> bool {
    rect.bottom >= -margin && rect.top <= viewport_height + margin
}

/// Whether a click at `offset_x` inside a control of `width` lands in its left half.
pub fn is_left_half(offset_x: f32, width: f32) -> bool {
    offset_x < width / 2.0
}
