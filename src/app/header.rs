//! Header strip: home word, pinned slot and pile, painted at their laid-out
//! positions plus the running animation's transforms.

use std::time::Instant;

use eframe::egui;

use wordplay::Session;

use crate::ui::word_rect;

use super::ViewerApp;

enum HeaderClick {
    Word(String),
    Home,
}

impl ViewerApp {
    pub fn draw_header(&mut self, ui: &mut egui::Ui, now: Instant) {
        // Pages without the header markup get no strip at all.
        let Some(coordinator) = self.session.as_mut().and_then(Session::coordinator_mut) else {
            return;
        };
        coordinator
            .renderer_mut()
            .set_width(ui.available_width());

        let renderer = coordinator.renderer();
        let lang = renderer.language();
        let geometry = renderer.geometry();
        let view = renderer.view();
        let interactivity = coordinator.interactivity();
        let sense = if interactivity.accepts_input() {
            egui::Sense::click()
        } else {
            egui::Sense::hover()
        };

        let (area, _) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), geometry.height),
            egui::Sense::hover(),
        );
        let painter = ui.painter_at(area);
        let visuals = ui.visuals().clone();
        let font = egui::FontId::monospace(15.0);
        let mut clicked = None;

        if let (Some(b), Some(home)) = (geometry.home, renderer.registry().home()) {
            let rect = word_rect(area.min, &b, Default::default());
            let response = ui.interact(rect, ui.id().with("home-word"), sense);
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                home.label(lang),
                font.clone(),
                visuals.strong_text_color(),
            );
            if response.clicked() {
                clicked = Some(HeaderClick::Home);
            }
        }

        for id in view.all_ids() {
            let (Some(b), Some(word)) = (geometry.words.get(id), renderer.registry().get(id))
            else {
                continue;
            };
            let rect = word_rect(area.min, b, coordinator.transform_of(id));
            let pinned = view.pinned.as_deref() == Some(id);
            let response = ui.interact(rect, ui.id().with(("word", id)), sense);

            let fill = if pinned {
                visuals.selection.bg_fill
            } else if response.hovered() && interactivity.accepts_input() {
                visuals.widgets.hovered.weak_bg_fill
            } else {
                egui::Color32::TRANSPARENT
            };
            painter.rect_filled(rect, 4.0, fill);
            let color = if pinned {
                visuals.selection.stroke.color
            } else {
                visuals.hyperlink_color
            };
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                word.label(lang),
                font.clone(),
                color,
            );
            if response.clicked() {
                clicked = Some(HeaderClick::Word(id.to_string()));
            }
        }

        match clicked {
            Some(HeaderClick::Word(id)) => {
                let outcome = coordinator.click_word(&id, now);
                log::debug!("click {id}: {outcome:?}");
            }
            Some(HeaderClick::Home) => {
                let outcome = coordinator.click_home(now);
                log::debug!("click home: {outcome:?}");
            }
            None => {}
        }
    }
}
