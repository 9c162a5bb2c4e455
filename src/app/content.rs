//! Main viewport (page body with the container fade) and the stats panel.

use std::time::Instant;

use eframe::egui;

use wordplay::language::Direction;
use wordplay::transition::adapter::ContentFade;
use wordplay::transition::coordinator::Phase;
use wordplay::TransitionCoordinator;

use crate::ui::truncate_str;

use super::ViewerApp;

impl ViewerApp {
    pub fn draw_content(&mut self, ui: &mut egui::Ui, now: Instant) {
        if let Some(ref error) = self.error {
            ui.colored_label(egui::Color32::RED, error);
            ui.separator();
        }

        let Some(session) = self.session.as_ref() else {
            ui.centered_and_justified(|ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(100.0);
                    ui.heading("Wordplay Header");
                    ui.label("Enter a site URL or a built site directory");
                });
            });
            return;
        };

        let page = session.page();
        let lang = session.language();
        let fade = session
            .coordinator()
            .map_or(ContentFade::VISIBLE, |c| c.content_fade(now));
        let mut follow = None;

        let rect = ui
            .available_rect_before_wrap()
            .translate(egui::vec2(fade.offset_x, 0.0));
        ui.allocate_ui_at_rect(rect, |ui| {
            ui.set_opacity(fade.alpha);
            let layout = match lang.dir() {
                Direction::Ltr => egui::Layout::top_down(egui::Align::Min),
                Direction::Rtl => egui::Layout::top_down(egui::Align::Max),
            };
            ui.with_layout(layout, |ui| {
                // Without the header, the page's own links are how you get
                // around; each one is a full load.
                if !session.has_header() {
                    ui.horizontal_wrapped(|ui| {
                        for (label, target) in page.links() {
                            if ui.link(label).on_hover_text(target.as_str()).clicked() {
                                follow = Some(target);
                            }
                        }
                    });
                    ui.separator();
                }
                if !page.title.is_empty() {
                    ui.heading(&page.title);
                    ui.separator();
                }
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.label(page.content.get(lang));
                });
            });
        });

        if let Some(target) = follow {
            self.open(target, now);
        }
    }

    // ── Stats side panel ─────────────────────────────────────────────────────

    /// Render the right-side session panel.
    pub fn draw_stats_panel(&self, ui: &mut egui::Ui, now: Instant) {
        let Some(session) = self.session.as_ref() else {
            return;
        };

        ui.heading("Header");
        ui.separator();
        match session.coordinator() {
            Some(coordinator) => Self::draw_header_stats(ui, coordinator, now),
            None => {
                ui.label("No header on this page");
                ui.label(format!("Language: {}", session.language()));
            }
        }

        ui.separator();
        ui.heading("Page");
        ui.label(format!("Namespace: {}", session.page().namespace));
        if session.page().status != 200 {
            ui.colored_label(
                egui::Color32::from_rgb(255, 160, 0),
                format!("HTTP {}", session.page().status),
            );
        }
        ui.label(truncate_str(session.page().url.as_str(), 40));

        if !self.event_log.is_empty() {
            ui.separator();
            ui.heading("Events");
            for line in &self.event_log {
                ui.small(line);
            }
        }
    }

    fn draw_header_stats(ui: &mut egui::Ui, coordinator: &TransitionCoordinator, now: Instant) {
        let view = coordinator.header_view();
        let state = coordinator.renderer().state();
        ui.label(format!(
            "Pinned: {}",
            view.pinned.as_deref().unwrap_or("(home)")
        ));
        ui.label(format!(
            "Previous: {}",
            state.prev_pinned().unwrap_or("-")
        ));
        ui.label(format!("Pile: {}", view.pile.join(", ")));
        ui.label(format!("Language: {}", coordinator.renderer().language()));

        ui.separator();
        ui.heading("Transition");
        let (phase, color) = match coordinator.phase() {
            Phase::Idle => ("Idle", egui::Color32::from_rgb(0, 180, 0)),
            Phase::Preparing => ("Preparing", egui::Color32::from_rgb(255, 160, 0)),
            Phase::Coordinating => ("Coordinating", egui::Color32::from_rgb(100, 150, 255)),
            Phase::Complete => ("Complete", egui::Color32::from_rgb(0, 180, 0)),
        };
        ui.colored_label(color, format!("Phase: {phase}"));
        match coordinator.lock().info() {
            Some(info) => ui.colored_label(
                egui::Color32::from_rgb(255, 80, 80),
                format!(
                    "Locked {}ms: {}",
                    now.saturating_duration_since(info.engaged_at).as_millis(),
                    info.reason
                ),
            ),
            None => ui.label("Unlocked"),
        };
        if let Some(animation) = coordinator.animation() {
            ui.label(format!(
                "Animation: {:?} {:.0}%",
                animation.status(),
                animation.progress() * 100.0
            ));
        }
    }
}
