//! `ViewerApp`, the egui host for a header session.
//!
//! Methods are split across the sibling sub-modules:
//!
//! - `navigation` for session loading, history and coordinator events
//! - `toolbar` for the address bar and controls
//! - `header` for painting and clicking header words
//! - `content` for the page body and the stats panel

pub mod content;
pub mod header;
pub mod navigation;
pub mod toolbar;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use eframe::egui;
use url::Url;

use wordplay::config::WordplayConfig;
use wordplay::net::source::PageSource;
use wordplay::Session;

pub struct ViewerApp {
    pub url_input: String,
    pub session: Option<Session>,
    pub error: Option<String>,
    pub source: Arc<dyn PageSource>,
    pub config: WordplayConfig,
    pub store_path: PathBuf,
    pub show_stats: bool,
    pub dark_mode: bool,
    // History (back / forward)
    pub history: Vec<Url>,
    pub history_idx: usize,
    /// Last few coordinator events, newest first, for the stats panel.
    pub event_log: Vec<String>,
}

impl ViewerApp {
    pub fn new(
        source: Arc<dyn PageSource>,
        start: Url,
        config: WordplayConfig,
        store_path: PathBuf,
    ) -> Self {
        let mut app = Self {
            url_input: start.to_string(),
            session: None,
            error: None,
            source,
            config,
            store_path,
            show_stats: true,
            dark_mode: false,
            history: Vec::new(),
            history_idx: 0,
            event_log: Vec::new(),
        };
        app.open(start, Instant::now());
        app
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.tick(now);

        if self.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui, now);
        });

        if self.show_stats {
            egui::SidePanel::right("stats")
                .default_width(240.0)
                .show(ctx, |ui| {
                    self.draw_stats_panel(ui, now);
                });
        }

        if self.session.as_ref().is_some_and(Session::has_header) {
            egui::TopBottomPanel::top("header").show(ctx, |ui| {
                self.draw_header(ui, now);
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_content(ui, now);
        });

        // Keep frames coming while anything is in motion; the coordinator
        // only advances on ticks.
        if self.is_busy() {
            ctx.request_repaint();
        }
    }
}
