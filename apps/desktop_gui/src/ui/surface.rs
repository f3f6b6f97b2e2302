//! Widget state for the item form and list, plus the surface operations the coordinator drives.

use std::collections::VecDeque;

use eframe::egui;
use shared::domain::{Item, ItemId};

use crate::controller::events::{Notice, NoticeSeverity, ViewEvent};

/// What the coordinator can read from and write to the GUI.
pub trait PresentationSurface {
    /// Replaces the visible rows. Each row shows the item name and keeps its id.
    fn populate(&mut self, items: &[Item]);

    fn selected_id(&self) -> Option<ItemId>;

    fn read_inputs(&self) -> (String, String);

    fn set_inputs(&mut self, name: &str, description: &str);

    fn clear_inputs(&mut self);

    /// Shows a modal notice; the rest of the window is blocked until it is dismissed.
    fn notify(&mut self, notice: Notice);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub item_id: ItemId,
    pub label: String,
}

#[derive(Debug, Default)]
pub struct EguiSurface {
    name_input: String,
    description_input: String,
    rows: Vec<ItemRow>,
    selected: Option<usize>,
    notices: VecDeque<Notice>,
    pending_events: Vec<ViewEvent>,
}

impl EguiSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[ItemRow] {
        &self.rows
    }

    pub fn active_notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    pub fn dismiss_notice(&mut self) {
        self.notices.pop_front();
    }

    pub fn press(&mut self, event: ViewEvent) {
        self.pending_events.push(event);
    }

    /// Moves the highlight. Emits `SelectionChanged` only when the highlighted row changes.
    pub fn select_row(&mut self, index: Option<usize>) {
        let index = index.filter(|index| *index < self.rows.len());
        if self.selected != index {
            self.selected = index;
            self.pending_events.push(ViewEvent::SelectionChanged);
        }
    }

    pub fn edit_inputs(&mut self, name: &str, description: &str) {
        self.name_input = name.to_string();
        self.description_input = description.to_string();
    }

    /// Events raised since the last call, in the order they happened.
    pub fn take_events(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn show(&mut self, ctx: &egui::Context) -> Vec<ViewEvent> {
        let interactive = self.notices.is_empty();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(interactive, |ui| self.show_form(ui));
        });
        self.show_notice(ctx);
        self.take_events()
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        ui.add(
            egui::TextEdit::singleline(&mut self.name_input)
                .id_salt("item_name_input")
                .hint_text("Enter name")
                .desired_width(f32::INFINITY),
        );
        ui.add(
            egui::TextEdit::singleline(&mut self.description_input)
                .id_salt("item_description_input")
                .hint_text("Enter description")
                .desired_width(f32::INFINITY),
        );

        ui.horizontal(|ui| {
            if ui.button("Add").clicked() {
                self.press(ViewEvent::AddClicked);
            }
            if ui.button("Update").clicked() {
                self.press(ViewEvent::UpdateClicked);
            }
            if ui.button("Delete").clicked() {
                self.press(ViewEvent::DeleteClicked);
            }
        });
        ui.separator();

        egui::ScrollArea::vertical()
            .id_salt("item_list_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let mut clicked = None;
                for (index, row) in self.rows().iter().enumerate() {
                    let highlighted = self.selected == Some(index);
                    let response = ui.add_sized(
                        [ui.available_width(), 22.0],
                        egui::Button::selectable(highlighted, row.label.as_str()),
                    );
                    if response.clicked() {
                        // Clicking the highlighted row again clears the highlight.
                        clicked = Some((!highlighted).then_some(index));
                    }
                }
                if let Some(index) = clicked {
                    self.select_row(index);
                }
            });
    }

    fn show_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.active_notice() else {
            return;
        };

        let title_color = match notice.severity {
            NoticeSeverity::Success => ctx.style().visuals.text_color(),
            NoticeSeverity::Warning => ctx.style().visuals.warn_fg_color,
            NoticeSeverity::Error => ctx.style().visuals.error_fg_color,
        };

        let mut acknowledged = false;
        let response = egui::Modal::new(egui::Id::new("item_notice_modal")).show(ctx, |ui| {
            ui.set_min_width(260.0);
            ui.label(
                egui::RichText::new(notice.title())
                    .strong()
                    .color(title_color),
            );
            ui.add_space(6.0);
            ui.label(notice.message.as_str());
            ui.add_space(8.0);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("OK").clicked() {
                    acknowledged = true;
                }
            });
        });

        if acknowledged || response.should_close() {
            self.dismiss_notice();
        }
    }
}

impl PresentationSurface for EguiSurface {
    fn populate(&mut self, items: &[Item]) {
        self.rows = items
            .iter()
            .map(|item| ItemRow {
                item_id: item.id,
                label: item.name.clone(),
            })
            .collect();
        // Rebuilding the list drops the highlight.
        if self.selected.take().is_some() {
            self.pending_events.push(ViewEvent::SelectionChanged);
        }
    }

    fn selected_id(&self) -> Option<ItemId> {
        self.selected
            .and_then(|index| self.rows.get(index))
            .map(|row| row.item_id)
    }

    fn read_inputs(&self) -> (String, String) {
        (self.name_input.clone(), self.description_input.clone())
    }

    fn set_inputs(&mut self, name: &str, description: &str) {
        self.edit_inputs(name, description);
    }

    fn clear_inputs(&mut self) {
        self.name_input.clear();
        self.description_input.clear();
    }

    fn notify(&mut self, notice: Notice) {
        tracing::debug!(title = notice.title(), message = %notice.message, "queued notice");
        self.notices.push_back(notice);
    }
}

#[cfg(test)]
#[path = "../tests/surface_tests.rs"]
mod tests;
