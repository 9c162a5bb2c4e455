//! One browsing session on the site: the page currently shown plus the
//! coordinator driving its header. A full page load replaces the session
//! with one on the target, carrying the preference store over.
//!
//! Pages without the header markup still open. They get no coordinator;
//! the host shows their links as plain links and every navigation is a
//! full load.

use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use url::Url;

use crate::config::WordplayConfig;
use crate::dom::page::{Page, PageError};
use crate::header::registry::WordRegistry;
use crate::header::renderer::HeaderRenderer;
use crate::language::Language;
use crate::net::barba::FetchTransitionAdapter;
use crate::net::fetch::FetchError;
use crate::net::source::PageSource;
use crate::store::{KeyValueStore, MemoryStore};
use crate::transition::coordinator::{ClickOutcome, CoordinatorEvent, TransitionCoordinator};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Page(#[from] PageError),
}

enum Widget {
    Header(Box<TransitionCoordinator>),
    /// No header on this page. The store is only held for the next load.
    Plain {
        store: Box<dyn KeyValueStore>,
        language: Language,
    },
}

pub struct Session {
    page: Page,
    widget: Widget,
    source: Arc<dyn PageSource>,
    config: WordplayConfig,
}

impl Session {
    /// Load `url` from `source` and wire up the header for it.
    ///
    /// Fails only when no page could be loaded. A page without the header
    /// opens in plain mode; a site's 404 page opens like any other.
    pub fn open(
        url: &Url,
        source: Arc<dyn PageSource>,
        store: Box<dyn KeyValueStore>,
        config: WordplayConfig,
        now: Instant,
    ) -> Result<Self, SessionError> {
        let page = load_page(url, source.as_ref(), &config)?;
        Ok(Self::assemble(page, source, store, config, now))
    }

    /// Start over on `url` after a full page load. When the load fails the
    /// current page, header and store stay as they were.
    pub fn reopen(&mut self, url: &Url, now: Instant) -> Result<(), SessionError> {
        let page = load_page(url, self.source.as_ref(), &self.config)?;
        let store = self.take_store();
        *self = Self::assemble(page, Arc::clone(&self.source), store, self.config.clone(), now);
        Ok(())
    }

    fn assemble(
        page: Page,
        source: Arc<dyn PageSource>,
        store: Box<dyn KeyValueStore>,
        config: WordplayConfig,
        now: Instant,
    ) -> Self {
        let language = Language::detect(page.html_root(), store.as_ref(), &config.storage.lang);
        let widget = match WordRegistry::build(&page.document.root, &config.markup, &config.home_slug)
        {
            Ok(registry) => {
                log::info!(
                    "session on {} ({} words, {language})",
                    page.url,
                    registry.len()
                );
                let renderer = HeaderRenderer::new(registry, store, &config, language);
                let adapter =
                    FetchTransitionAdapter::new(Arc::clone(&source), page.url.clone(), &config);
                let mut coordinator = TransitionCoordinator::new(
                    renderer,
                    Box::new(adapter),
                    page.url.clone(),
                    config.timing.clone(),
                );
                coordinator.init(now);
                Widget::Header(Box::new(coordinator))
            }
            Err(e) => {
                log::warn!("{}: {e}; links stay plain", page.url);
                Widget::Plain { store, language }
            }
        };
        Self {
            page,
            widget,
            source,
            config,
        }
    }

    fn take_store(&mut self) -> Box<dyn KeyValueStore> {
        let placeholder: Box<dyn KeyValueStore> = Box::new(MemoryStore::new());
        match &mut self.widget {
            Widget::Header(coordinator) => coordinator.renderer_mut().replace_store(placeholder),
            Widget::Plain { store, .. } => std::mem::replace(store, placeholder),
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn config(&self) -> &WordplayConfig {
        &self.config
    }

    /// Whether the page carries the header widget.
    pub fn has_header(&self) -> bool {
        matches!(self.widget, Widget::Header(_))
    }

    /// The header's coordinator; `None` on a page without the header.
    pub fn coordinator(&self) -> Option<&TransitionCoordinator> {
        match &self.widget {
            Widget::Header(coordinator) => Some(&**coordinator),
            Widget::Plain { .. } => None,
        }
    }

    pub fn coordinator_mut(&mut self) -> Option<&mut TransitionCoordinator> {
        match &mut self.widget {
            Widget::Header(coordinator) => Some(&mut **coordinator),
            Widget::Plain { .. } => None,
        }
    }

    pub fn language(&self) -> Language {
        match &self.widget {
            Widget::Header(coordinator) => coordinator.renderer().language(),
            Widget::Plain { language, .. } => *language,
        }
    }

    /// Flip the page language. With a header this is the coordinated
    /// toggle and is dropped while a sequence runs; without one it applies
    /// at once. Returns whether the language changed or started changing.
    pub fn toggle_language(&mut self, now: Instant) -> bool {
        match &mut self.widget {
            Widget::Header(coordinator) => {
                matches!(coordinator.toggle_language(now), ClickOutcome::Started(_))
            }
            Widget::Plain { store, language } => {
                *language = language.toggle();
                language.save(store.as_mut(), &self.config.storage.lang);
                true
            }
        }
    }

    /// Advance the coordinator and adopt any page it swapped in. Returns
    /// the events of this tick for the host.
    pub fn tick(&mut self, now: Instant) -> Vec<CoordinatorEvent> {
        let Widget::Header(coordinator) = &mut self.widget else {
            return Vec::new();
        };
        coordinator.tick(now);
        let events = coordinator.drain_events();
        for event in &events {
            if let CoordinatorEvent::PageEntering(page) = event {
                self.page = page.as_ref().clone();
            }
        }
        events
    }
}

fn load_page(url: &Url, source: &dyn PageSource, config: &WordplayConfig) -> Result<Page, SessionError> {
    let fetched = source.load(url)?;
    if !fetched.is_success() {
        log::info!("{} served with HTTP {}", fetched.url, fetched.status);
    }
    Ok(Page::from_fetch(&fetched, &config.markup, &config.home_slug)?)
}
