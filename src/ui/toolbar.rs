// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Project tabs and the theme toggle.
//!
//! One tab per project, highlighted while its project is in focus.
//! Clicking a tab asks the page to scroll that project to the settle line.

use folio::models::page::Page;
use folio::models::theme::Theme;

/// Result of toolbar interaction.
pub enum ToolbarAction {
    None,
    ScrollTo(usize),
    ToggleTheme,
}

/// Display the tab strip.
pub fn show(ui: &mut egui::Ui, page: &Page, focused: Option<usize>, theme: Theme) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        if !page.title.is_empty() {
            ui.label(egui::RichText::new(&page.title).strong());
            ui.separator();
        }

        for (index, project) in page.projects.iter().enumerate() {
            let label = format!("{:02} {}", index + 1, project.tab_label());
            if ui.selectable_label(focused == Some(index), label).clicked() {
                action = ToolbarAction::ScrollTo(index);
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .button(theme.icon())
                .on_hover_text(theme.toggle_label())
                .clicked()
            {
                action = ToolbarAction::ToggleTheme;
            }
        });
    });

    action
}
