//! The seam between the coordinator and whatever swaps page content.
//!
//! An adapter is injected into the coordinator: the SPA-style fetch adapter
//! in normal operation, or [`DirectNavigation`] when content cannot be
//! swapped in place and every navigation has to be a full reload.

use std::collections::VecDeque;
use std::time::Instant;

use thiserror::Error;
use url::Url;

use crate::dom::page::Page;
use crate::language::Language;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("cannot navigate to {url}: {reason}")]
    Rejected { url: String, reason: String },
    #[error("a navigation to {0} is already in flight")]
    Busy(String),
}

/// Lifecycle signals an adapter reports back, in order, for a navigation.
#[derive(Debug, Clone)]
pub enum Lifecycle {
    /// The current container started fading out.
    Leave { from: Url },
    /// The next page is fetched and about to be shown; the header re-syncs
    /// to its namespace here.
    BeforeEnter { page: Box<Page> },
    /// The next page has settled.
    Enter { namespace: String },
    /// Fetching or swapping failed; nothing was shown.
    Failed { url: Url, reason: String },
    /// A full page load was performed instead of a swap.
    Reload { url: Url },
}

/// Fade state of the content container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentFade {
    pub alpha: f32,
    pub offset_x: f32,
}

impl ContentFade {
    pub const VISIBLE: ContentFade = ContentFade {
        alpha: 1.0,
        offset_x: 0.0,
    };
}

pub trait PageTransitionAdapter {
    /// Start navigating to `url`. Lifecycle signals follow through
    /// [`PageTransitionAdapter::poll`].
    fn navigate(&mut self, url: &Url, now: Instant) -> Result<(), NavigationError>;

    /// Next pending lifecycle signal, if any.
    fn poll(&mut self, now: Instant) -> Option<Lifecycle>;

    fn name(&self) -> &'static str;

    /// Container fade at `now`, for hosts that paint the transition.
    fn content_fade(&self, _now: Instant) -> ContentFade {
        ContentFade::VISIBLE
    }

    /// Language drives the slide direction of content fades.
    fn set_language(&mut self, _language: Language) {}
}

/// Navigation by full page load. There is nothing to swap, so the only
/// signal is [`Lifecycle::Reload`]; the host discards its state and starts
/// over on the new page.
#[derive(Debug, Default)]
pub struct DirectNavigation {
    pending: VecDeque<Lifecycle>,
}

impl DirectNavigation {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PageTransitionAdapter for DirectNavigation {
    fn navigate(&mut self, url: &Url, _now: Instant) -> Result<(), NavigationError> {
        log::info!("direct navigation to {url}");
        self.pending.push_back(Lifecycle::Reload { url: url.clone() });
        Ok(())
    }

    fn poll(&mut self, _now: Instant) -> Option<Lifecycle> {
        self.pending.pop_front()
    }

    fn name(&self) -> &'static str {
        "direct"
    }
}
