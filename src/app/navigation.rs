//! Navigation methods for `ViewerApp`.
//!
//! Covers session loading (`open`, which matches a full page load), history
//! management (`go_back`, `go_forward`) and per-frame event handling.

use std::time::Instant;

use url::Url;

use wordplay::store::{JsonFileStore, KeyValueStore, MemoryStore};
use wordplay::{ClickOutcome, CoordinatorEvent, Session};

use super::ViewerApp;

/// Entries kept in the stats panel's event log.
const EVENT_LOG_LEN: usize = 12;

impl ViewerApp {
    fn open_store(&self) -> Box<dyn KeyValueStore> {
        match JsonFileStore::open(&self.store_path) {
            Ok(store) => Box::new(store),
            Err(e) => {
                log::warn!(
                    "preferences at {} unavailable ({e}), using memory",
                    self.store_path.display()
                );
                Box::new(MemoryStore::new())
            }
        }
    }

    /// Full page load: a fresh session on `url`, replacing the current one.
    /// A failed load leaves the current page in place.
    pub fn open(&mut self, url: Url, now: Instant) {
        let opened = if let Some(session) = self.session.as_mut() {
            session.reopen(&url, now)
        } else {
            let store = self.open_store();
            Session::open(&url, self.source.clone(), store, self.config.clone(), now)
                .map(|session| self.session = Some(session))
        };
        match opened {
            Ok(()) => {
                self.error = None;
                if let Some(loaded) = self.session.as_ref().map(|s| s.page().url.clone()) {
                    self.url_input = loaded.to_string();
                    self.record_history(loaded);
                }
            }
            Err(e) => {
                log::error!("could not open {url}: {e}");
                self.error = Some(format!("{url}: {e}"));
            }
        }
    }

    /// Load whatever is typed in the address bar.
    pub fn open_input(&mut self, now: Instant) {
        let base = self.session.as_ref().map(|s| s.page().url.clone());
        let parsed = match &base {
            Some(base) => base.join(self.url_input.trim()),
            None => Url::parse(self.url_input.trim()),
        };
        match parsed {
            Ok(url) => self.open(url, now),
            Err(e) => self.error = Some(format!("Invalid URL: {e}")),
        }
    }

    fn record_history(&mut self, url: Url) {
        if self.history.get(self.history_idx) == Some(&url) {
            return;
        }
        // Truncate forward history before pushing
        if !self.history.is_empty() {
            self.history.truncate(self.history_idx + 1);
        }
        self.history.push(url);
        self.history_idx = self.history.len() - 1;
    }

    pub fn can_go_back(&self) -> bool {
        self.history_idx > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.history_idx + 1 < self.history.len()
    }

    pub fn go_back(&mut self, now: Instant) {
        if self.can_go_back() {
            self.traverse(self.history_idx - 1, now);
        }
    }

    pub fn go_forward(&mut self, now: Instant) {
        if self.can_go_forward() {
            self.traverse(self.history_idx + 1, now);
        }
    }

    fn traverse(&mut self, idx: usize, now: Instant) {
        let Some(url) = self.history.get(idx).cloned() else {
            return;
        };
        let Some(coordinator) = self.session.as_mut().and_then(Session::coordinator_mut) else {
            self.history_idx = idx;
            self.open(url, now);
            return;
        };
        match coordinator.navigate_history(&url, now) {
            ClickOutcome::Started(_) => self.history_idx = idx,
            ClickOutcome::Ignored(reason) => log::debug!("history step ignored: {reason:?}"),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.session
            .as_ref()
            .and_then(Session::coordinator)
            .is_some_and(|c| c.is_locked() || c.animation().is_some_and(|a| a.is_running()))
    }

    /// Advance the session and react to what happened this frame.
    pub fn tick(&mut self, now: Instant) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let events = session.tick(now);
        let mut reload = None;
        for event in events {
            self.log_event(&event);
            match event {
                CoordinatorEvent::PageEntering(page) => {
                    self.url_input = page.url.to_string();
                    self.record_history(page.url.clone());
                }
                CoordinatorEvent::HardNavigation(url) => reload = Some(url),
                _ => {}
            }
        }
        if let Some(url) = reload {
            self.open(url, now);
        }
    }

    fn log_event(&mut self, event: &CoordinatorEvent) {
        let line = match event {
            CoordinatorEvent::HeaderChanged => "header changed".to_string(),
            CoordinatorEvent::ContentLeaving => "content leaving".to_string(),
            CoordinatorEvent::PageEntering(page) => format!("entering {}", page.namespace),
            CoordinatorEvent::PageEntered { namespace } => format!("entered {namespace}"),
            CoordinatorEvent::HardNavigation(url) => format!("reload {url}"),
            CoordinatorEvent::LanguageChanged(lang) => format!("language {lang}"),
        };
        self.event_log.insert(0, line);
        self.event_log.truncate(EVENT_LOG_LEN);
    }
}
