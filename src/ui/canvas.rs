// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Scrolling page canvas.
//!
//! This module paints the stacked project sections, their active gallery
//! items and simulated videos, and turns pointer input into gallery
//! navigation and sound toggle actions.

use crate::ui::layout::{StackLayout, TITLE_BAND};
use folio::models::page::{GalleryKey, Page, Video, VideoId};
use folio::models::theme::Theme;
use folio::playback::{NavDirection, OverlapCoordinator, SimulatedMedia};
use folio::util::geometry::ViewRect;
use std::collections::HashMap;

const SOUND_BUTTON: f32 = 32.0;
const PROGRESS_HEIGHT: f32 = 4.0;

const PALETTE: [(u8, u8, u8); 4] = [(38, 50, 72), (72, 40, 52), (34, 62, 54), (66, 58, 34)];

/// Result of canvas interaction.
pub enum CanvasAction {
    None,
    Navigate {
        gallery: GalleryKey,
        offset_x: f32,
        width: f32,
    },
    ToggleMute(VideoId),
}

/// Scroll position and size of the page viewport for this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasView {
    pub scroll: f32,
    pub viewport_height: f32,
    pub width: f32,
}

/// Everything the canvas needs to read for one frame.
pub struct CanvasContext<'a> {
    pub page: &'a Page,
    pub coordinator: &'a OverlapCoordinator<SimulatedMedia>,
    pub textures: &'a HashMap<String, egui::TextureHandle>,
    pub theme: Theme,
    /// Forced scroll offset for this frame (tab scrolling).
    pub scroll_to: Option<f32>,
}

/// Display the page and handle pointer interaction.
pub fn show(ui: &mut egui::Ui, cx: &CanvasContext<'_>) -> (CanvasAction, CanvasView) {
    let mut action = CanvasAction::None;
    let mut view = CanvasView {
        scroll: 0.0,
        viewport_height: 0.0,
        width: 0.0,
    };

    let mut area = egui::ScrollArea::vertical()
        .id_source("page")
        .auto_shrink([false, false]);
    if let Some(offset) = cx.scroll_to {
        area = area.vertical_scroll_offset(offset);
    }

    area.show_viewport(ui, |ui, viewport| {
        let layout = StackLayout::new(
            cx.page.projects.len(),
            viewport.height(),
            viewport.width(),
            cx.coordinator.config(),
        );
        ui.set_min_height(layout.content_height());
        ui.set_min_width(viewport.width());

        let scroll = viewport.min.y;
        view = CanvasView {
            scroll,
            viewport_height: viewport.height(),
            width: viewport.width(),
        };

        // Screen position of the viewport's top-left corner.
        let origin = ui.max_rect().min + egui::vec2(0.0, scroll);
        let to_screen = |r: &ViewRect| {
            egui::Rect::from_min_max(
                origin + egui::vec2(r.left, r.top),
                origin + egui::vec2(r.right, r.bottom),
            )
        };

        for (index, project) in cx.page.projects.iter().enumerate() {
            let section = layout.project_rect(index, scroll);
            if section.bottom < 0.0 || section.top > layout.viewport_height {
                continue;
            }
            let visible = layout.visible_rect(index, scroll);
            let section_screen = to_screen(&section);

            let background = project
                .accent
                .as_deref()
                .and_then(parse_hex_color)
                .unwrap_or_else(|| palette_color(index, cx.theme));
            ui.painter().rect_filled(section_screen, 12.0, background);
            ui.painter().text(
                section_screen.min + egui::vec2(20.0, TITLE_BAND / 2.0),
                egui::Align2::LEFT_CENTER,
                &project.title,
                egui::FontId::proportional(22.0),
                text_color(cx.theme),
            );
            if let Some(description) = &project.description {
                let anchor = egui::pos2(
                    section_screen.max.x - 20.0,
                    section_screen.min.y + TITLE_BAND / 2.0,
                );
                ui.painter().text(
                    anchor,
                    egui::Align2::RIGHT_CENTER,
                    description,
                    egui::FontId::proportional(14.0),
                    text_color(cx.theme).gamma_multiply(0.7),
                );
            }

            let count = project.galleries.len();
            for (g, gallery) in project.galleries.iter().enumerate() {
                let key = GalleryKey {
                    project: index,
                    gallery: g,
                };
                let area = layout.gallery_rect(&section, g, count);
                let area_screen = to_screen(&area);
                ui.painter()
                    .rect_filled(area_screen, 8.0, egui::Color32::from_black_alpha(60));

                let Some(active) = cx.coordinator.active_index(key) else {
                    continue;
                };
                let item = &gallery.items[active];

                if let Some(texture) = item.image.as_ref().and_then(|p| cx.textures.get(p)) {
                    let size = texture.size();
                    paint_texture(ui.painter(), texture, fit_rect(size, area_screen));
                }

                let displayed: Vec<(VideoId, &Video)> = item
                    .videos
                    .iter()
                    .enumerate()
                    .map(|(v, video)| {
                        (
                            VideoId {
                                project: index,
                                gallery: g,
                                item: active,
                                video: v,
                            },
                            video,
                        )
                    })
                    .filter(|(_, video)| video.is_displayed(cx.theme))
                    .collect();

                let mut sound_buttons = Vec::new();
                let slot_width = area_screen.width() / displayed.len().max(1) as f32;
                for (slot, (id, video)) in displayed.iter().enumerate() {
                    let slot_rect = egui::Rect::from_min_size(
                        area_screen.min + egui::vec2(slot_width * slot as f32, 0.0),
                        egui::vec2(slot_width, area_screen.height()),
                    );
                    if let Some(button) = paint_video(ui.painter(), cx, *id, video, slot_rect) {
                        sound_buttons.push((button, *id));
                    }
                }

                if let Some(caption) = &item.caption {
                    ui.painter().text(
                        area_screen.left_bottom() + egui::vec2(12.0, -14.0),
                        egui::Align2::LEFT_BOTTOM,
                        caption,
                        egui::FontId::proportional(14.0),
                        egui::Color32::WHITE,
                    );
                }
                if gallery.items.len() > 1 {
                    ui.painter().text(
                        area_screen.right_bottom() + egui::vec2(-12.0, -14.0),
                        egui::Align2::RIGHT_BOTTOM,
                        format!("{} / {}", active + 1, gallery.items.len()),
                        egui::FontId::monospace(13.0),
                        egui::Color32::WHITE,
                    );
                }

                // Only the part not covered by the next section takes input.
                let clickable = ViewRect::new(
                    area.left,
                    area.top.max(visible.top),
                    area.right,
                    area.bottom.min(visible.bottom),
                );
                if clickable.height() <= 0.0 {
                    continue;
                }
                let response = ui.interact(
                    to_screen(&clickable),
                    ui.id().with(("gallery", index, g)),
                    egui::Sense::click(),
                );

                if let Some(pos) = response.hover_pos() {
                    let over_button = sound_buttons.iter().any(|(rect, _)| rect.contains(pos));
                    if !over_button && gallery.items.len() > 1 {
                        let offset_x = pos.x - area_screen.left();
                        let direction = NavDirection::from_click(offset_x, area_screen.width());
                        ui.painter().text(
                            pos + egui::vec2(18.0, 18.0),
                            egui::Align2::LEFT_TOP,
                            direction.arrow(),
                            egui::FontId::proportional(28.0),
                            egui::Color32::WHITE,
                        );
                    }
                }

                if response.clicked() {
                    if let Some(pos) = response.interact_pointer_pos() {
                        action = match sound_buttons.iter().find(|(rect, _)| rect.contains(pos)) {
                            Some((_, id)) => CanvasAction::ToggleMute(*id),
                            None => CanvasAction::Navigate {
                                gallery: key,
                                offset_x: pos.x - area_screen.left(),
                                width: area_screen.width(),
                            },
                        };
                    }
                }
            }
        }
    });

    (action, view)
}

/// Paint one displayed video; returns the sound button rectangle if it has one.
fn paint_video(
    painter: &egui::Painter,
    cx: &CanvasContext<'_>,
    id: VideoId,
    video: &Video,
    rect: egui::Rect,
) -> Option<egui::Rect> {
    let media = cx.coordinator.media();
    let inner = rect.shrink(6.0);

    match video.poster.as_ref().and_then(|p| cx.textures.get(p)) {
        Some(texture) => paint_texture(painter, texture, fit_rect(texture.size(), inner)),
        None => {
            painter.rect_filled(inner, 6.0, egui::Color32::from_gray(24));
            painter.text(
                inner.center(),
                egui::Align2::CENTER_CENTER,
                &video.src,
                egui::FontId::monospace(13.0),
                egui::Color32::from_gray(160),
            );
        }
    }

    let playing = media.is_playing(id);
    painter.text(
        inner.left_top() + egui::vec2(10.0, 10.0),
        egui::Align2::LEFT_TOP,
        if playing { "▶" } else { "⏸" },
        egui::FontId::proportional(18.0),
        egui::Color32::WHITE,
    );

    let progress = media.backend().progress(id).unwrap_or(0.0);
    let track = egui::Rect::from_min_max(
        egui::pos2(inner.min.x, inner.max.y - PROGRESS_HEIGHT),
        inner.max,
    );
    painter.rect_filled(track, 0.0, egui::Color32::from_white_alpha(40));
    let mut filled = track;
    filled.set_width(track.width() * progress);
    painter.rect_filled(filled, 0.0, egui::Color32::from_white_alpha(200));

    let affordance = cx.coordinator.affordance(id)?;
    let button = egui::Rect::from_min_size(
        egui::pos2(inner.max.x - SOUND_BUTTON - 8.0, inner.min.y + 8.0),
        egui::vec2(SOUND_BUTTON, SOUND_BUTTON),
    );
    painter.rect_filled(button, SOUND_BUTTON / 2.0, egui::Color32::from_black_alpha(140));
    painter.text(
        button.center(),
        egui::Align2::CENTER_CENTER,
        affordance.icon(),
        egui::FontId::proportional(16.0),
        egui::Color32::WHITE,
    );
    Some(button)
}

fn paint_texture(painter: &egui::Painter, texture: &egui::TextureHandle, rect: egui::Rect) {
    painter.image(
        texture.id(),
        rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
}

/// Largest rectangle with the image's aspect ratio centered inside `bounds`.
pub fn fit_rect(image_size: [usize; 2], bounds: egui::Rect) -> egui::Rect {
    let [img_width, img_height] = image_size;
    if img_width == 0 || img_height == 0 {
        return bounds;
    }
    let img_aspect = img_width as f32 / img_height as f32;
    let available_aspect = bounds.width() / bounds.height();

    let (display_width, display_height) = if img_aspect > available_aspect {
        // Image is wider - fit to width
        (bounds.width(), bounds.width() / img_aspect)
    } else {
        // Image is taller - fit to height
        (bounds.height() * img_aspect, bounds.height())
    };

    egui::Rect::from_center_size(bounds.center(), egui::vec2(display_width, display_height))
}

/// Parse `#rrggbb`.
pub fn parse_hex_color(text: &str) -> Option<egui::Color32> {
    let hex = text.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(egui::Color32::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

fn palette_color(index: usize, theme: Theme) -> egui::Color32 {
    let (r, g, b) = PALETTE[index % PALETTE.len()];
    match theme {
        Theme::Dark => egui::Color32::from_rgb(r, g, b),
        Theme::Light => egui::Color32::from_rgb(255 - r / 2, 255 - g / 2, 255 - b / 2),
    }
}

fn text_color(theme: Theme) -> egui::Color32 {
    match theme {
        Theme::Dark => egui::Color32::from_gray(235),
        Theme::Light => egui::Color32::from_gray(20),
    }
}
