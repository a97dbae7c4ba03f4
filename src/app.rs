// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait. It owns the loaded page and its playback
//! coordinator, forwards scroll, theme and click events to the coordinator,
//! and drives the simulated media clock.

use crate::ui::canvas::{self, CanvasAction, CanvasContext, CanvasView};
use crate::ui::layout::StackLayout;
use crate::ui::toolbar::{self, ToolbarAction};
use folio::io::media::{load_image, resolve_asset, LoadedImage};
use folio::models::page::Page;
use folio::models::theme::Theme;
use folio::playback::{GeometrySnapshot, OverlapCoordinator, SimulatedMedia};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};

/// Fraction of the remaining distance covered per frame while tab scrolling.
const SCROLL_EASING: f32 = 0.25;

/// Messages from the background loader.
enum LoaderMessage {
    Page(Result<(Page, PathBuf), String>),
    Image(String, LoadedImage),
}

/// A page with its live playback state.
struct LoadedPage {
    page: Page,
    coordinator: OverlapCoordinator<SimulatedMedia>,
    /// Viewport of the last rendered frame; `None` until first paint.
    view: Option<CanvasView>,
}

impl LoadedPage {
    fn new(page: Page) -> Self {
        let backend = SimulatedMedia::from_page(&page, page.playback.autoplay);
        let coordinator = OverlapCoordinator::new(&page, backend);
        Self {
            page,
            coordinator,
            view: None,
        }
    }

    /// Geometry of the last rendered frame.
    fn snapshot(&self, view: CanvasView, theme: Theme) -> GeometrySnapshot {
        let layout = StackLayout::new(
            self.page.projects.len(),
            view.viewport_height,
            view.width,
            self.coordinator.config(),
        );
        layout.snapshot(&self.page, view.scroll, theme)
    }

    fn scroll_target(&self, index: usize) -> Option<f32> {
        let view = self.view?;
        let layout = StackLayout::new(
            self.page.projects.len(),
            view.viewport_height,
            view.width,
            self.coordinator.config(),
        );
        Some(layout.scroll_target(index))
    }
}

/// Main application state.
pub struct FolioApp {
    /// Currently displayed page (if one is loaded)
    loaded: Option<LoadedPage>,

    /// Current visual mode
    theme: Theme,

    /// Decoded stills and posters keyed by their manifest path
    textures: HashMap<String, egui::TextureHandle>,

    /// Receiver for background page and image loading
    loader: Option<Receiver<LoaderMessage>>,

    /// Loading state message
    loading_message: Option<String>,

    /// Last load error, shown in place of the page
    error_message: Option<String>,

    /// Tab scroll animation target
    scroll_target: Option<f32>,
}

impl Default for FolioApp {
    fn default() -> Self {
        Self::new(None)
    }
}

impl FolioApp {
    /// Create a new application, optionally loading a manifest right away.
    pub fn new(manifest: Option<PathBuf>) -> Self {
        let mut app = Self {
            loaded: None,
            theme: Theme::default(),
            textures: HashMap::new(),
            loader: None,
            loading_message: None,
            error_message: None,
            scroll_target: None,
        };
        if let Some(path) = manifest {
            app.open_manifest(path);
        }
        app
    }

    /// Load a manifest and its images on a background thread.
    pub fn open_manifest(&mut self, path: PathBuf) {
        let (sender, receiver) = channel();
        self.loader = Some(receiver);
        self.loading_message = Some(format!("Loading {}...", path.display()));
        self.error_message = None;

        std::thread::spawn(move || {
            let page = match folio::io::serialization::load_page(&path) {
                Ok(page) => page,
                Err(e) => {
                    let _ = sender.send(LoaderMessage::Page(Err(format!("{:#}", e))));
                    return;
                }
            };

            let mut assets: Vec<String> = page
                .projects
                .iter()
                .flat_map(|p| &p.galleries)
                .flat_map(|g| &g.items)
                .flat_map(|item| {
                    item.image
                        .iter()
                        .chain(item.videos.iter().filter_map(|v| v.poster.as_ref()))
                })
                .cloned()
                .collect();
            assets.sort();
            assets.dedup();

            if sender.send(LoaderMessage::Page(Ok((page, path.clone())))).is_err() {
                return;
            }

            for asset in assets {
                match load_image(&resolve_asset(&path, &asset)) {
                    Ok(image) => {
                        if sender.send(LoaderMessage::Image(asset, image)).is_err() {
                            return;
                        }
                    }
                    Err(e) => log::warn!("Skipping image {}: {:#}", asset, e),
                }
            }
        });
    }

    fn poll_loader(&mut self, ctx: &egui::Context) {
        let Some(receiver) = &self.loader else {
            return;
        };

        let mut finished = false;
        loop {
            match receiver.try_recv() {
                Ok(LoaderMessage::Page(Ok((page, path)))) => {
                    log::info!("Opened {}", path.display());
                    self.loading_message = None;
                    self.textures.clear();
                    self.scroll_target = Some(0.0);
                    self.loaded = Some(LoadedPage::new(page));
                }
                Ok(LoaderMessage::Page(Err(e))) => {
                    log::error!("Failed to load manifest: {}", e);
                    self.loading_message = None;
                    self.error_message = Some(e);
                }
                Ok(LoaderMessage::Image(key, image)) => {
                    let size = [image.width as usize, image.height as usize];
                    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &image.pixels);
                    let texture = ctx.load_texture(&key, color_image, egui::TextureOptions::LINEAR);
                    self.textures.insert(key, texture);
                }
                Err(std::sync::mpsc::TryRecvError::Empty) => break,
                Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                    finished = true;
                    break;
                }
            }
        }

        if finished {
            self.loader = None;
            self.loading_message = None;
        }
    }

    fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.theme = self.theme.toggled();
        ctx.set_visuals(match self.theme {
            Theme::Dark => egui::Visuals::dark(),
            Theme::Light => egui::Visuals::light(),
        });
        log::info!("Theme: {:?}", self.theme);

        if let Some(loaded) = &mut self.loaded {
            if let Some(view) = loaded.view {
                let snapshot = loaded.snapshot(view, self.theme);
                loaded.coordinator.on_theme_change(&snapshot);
            }
        }
    }

    /// Next forced scroll offset while a tab scroll is animating.
    fn step_scroll(&mut self, ctx: &egui::Context) -> Option<f32> {
        let target = self.scroll_target?;
        let current = self
            .loaded
            .as_ref()
            .and_then(|l| l.view)
            .map_or(target, |view| view.scroll);

        let distance = target - current;
        if distance.abs() < 1.0 {
            self.scroll_target = None;
            return Some(target);
        }
        ctx.request_repaint();
        Some(current + distance * SCROLL_EASING)
    }
}

impl eframe::App for FolioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_loader(ctx);

        // Request repaint if still loading (to update spinner)
        if self.loading_message.is_some() {
            ctx.request_repaint();
        }

        if let Some(loaded) = &mut self.loaded {
            if ctx.input(|i| i.pointer.any_click()) {
                loaded.coordinator.media_mut().backend_mut().note_user_gesture();
            }
            let dt = ctx.input(|i| i.unstable_dt).min(0.1);
            loaded.coordinator.media_mut().backend_mut().advance(dt);
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Manifest...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Manifest", &["yaml", "yml", "json"])
                            .pick_file()
                        {
                            self.open_manifest(path);
                        }
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });

        // Project tabs
        let toolbar_action = match &self.loaded {
            Some(loaded) => {
                egui::TopBottomPanel::top("tabs")
                    .show(ctx, |ui| {
                        toolbar::show(
                            ui,
                            &loaded.page,
                            loaded.coordinator.focused_project(),
                            self.theme,
                        )
                    })
                    .inner
            }
            None => ToolbarAction::None,
        };

        match toolbar_action {
            ToolbarAction::ScrollTo(index) => {
                self.scroll_target = self.loaded.as_ref().and_then(|l| l.scroll_target(index));
            }
            ToolbarAction::ToggleTheme => self.toggle_theme(ctx),
            ToolbarAction::None => {}
        }

        let scroll_to = self.step_scroll(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(ref message) = self.loading_message {
                if self.loaded.is_none() {
                    ui.centered_and_justified(|ui| {
                        ui.vertical_centered(|ui| {
                            ui.add_space(20.0);
                            ui.spinner();
                            ui.add_space(10.0);
                            ui.label(egui::RichText::new(message).size(16.0));
                        });
                    });
                    return;
                }
            }

            let Some(loaded) = &mut self.loaded else {
                ui.centered_and_justified(|ui| {
                    let text = self
                        .error_message
                        .as_deref()
                        .unwrap_or("Open a page manifest with File → Open Manifest...");
                    ui.label(egui::RichText::new(text).weak());
                });
                return;
            };

            let (action, view) = canvas::show(
                ui,
                &CanvasContext {
                    page: &loaded.page,
                    coordinator: &loaded.coordinator,
                    textures: &self.textures,
                    theme: self.theme,
                    scroll_to,
                },
            );

            let snapshot = loaded.snapshot(view, self.theme);
            match loaded.view.replace(view) {
                None => loaded.coordinator.on_load(&snapshot),
                Some(previous) if previous != view => {
                    loaded.coordinator.on_scroll();
                }
                Some(_) => {}
            }

            match action {
                CanvasAction::Navigate {
                    gallery,
                    offset_x,
                    width,
                } => {
                    loaded.coordinator.on_click(gallery, offset_x, width, &snapshot);
                }
                CanvasAction::ToggleMute(id) => {
                    loaded.coordinator.toggle_mute(id);
                }
                CanvasAction::None => {}
            }

            loaded.coordinator.on_frame(&snapshot);
        });

        let playing = self
            .loaded
            .as_ref()
            .is_some_and(|l| !l.coordinator.media().backend().playing().is_empty());
        if playing {
            ctx.request_repaint();
        }
    }
}
