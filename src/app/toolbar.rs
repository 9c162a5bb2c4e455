//! Toolbar rendering for `ViewerApp`.
//!
//! Draws the address bar, back/forward buttons, the language toggle, the
//! stats toggle and the dark-mode toggle.

use std::time::Instant;

use eframe::egui;

use wordplay::Language;

use super::ViewerApp;

impl ViewerApp {
    /// Render the top toolbar strip.
    pub fn draw_toolbar(&mut self, ui: &mut egui::Ui, now: Instant) {
        ui.horizontal(|ui| {
            ui.add_space(4.0);

            // Back / Forward
            if ui
                .add_enabled(
                    self.can_go_back(),
                    egui::Button::new("\u{25C0}").min_size(egui::vec2(28.0, 24.0)),
                )
                .clicked()
            {
                self.go_back(now);
            }
            if ui
                .add_enabled(
                    self.can_go_forward(),
                    egui::Button::new("\u{25B6}").min_size(egui::vec2(28.0, 24.0)),
                )
                .clicked()
            {
                self.go_forward(now);
            }

            // URL bar
            let response = ui.add_sized(
                [(ui.available_width() - 220.0).max(120.0), 24.0],
                egui::TextEdit::singleline(&mut self.url_input)
                    .hint_text("Site URL or path...")
                    .font(egui::TextStyle::Monospace),
            );
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                self.open_input(now);
            }
            if ui.button("Go").clicked() {
                self.open_input(now);
            }

            // Language toggle, blocked with the rest of the header while a
            // transition runs.
            if let Some(session) = self.session.as_mut() {
                let label = match session.language() {
                    Language::En => "עב",
                    Language::He => "EN",
                };
                let enabled = session
                    .coordinator()
                    .map_or(true, |c| c.interactivity().accepts_input());
                if ui
                    .add_enabled(enabled, egui::Button::new(label))
                    .on_hover_text("Switch language")
                    .clicked()
                    && !session.toggle_language(now)
                {
                    log::debug!("language toggle dropped");
                }
            }

            ui.toggle_value(&mut self.show_stats, "Stats");

            let dark_label = if self.dark_mode { "\u{263E}" } else { "\u{2600}" };
            if ui.button(dark_label).clicked() {
                self.dark_mode = !self.dark_mode;
            }
        });
    }
}
