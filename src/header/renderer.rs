use std::time::{Duration, Instant};

use crate::config::{StorageKeys, WordplayConfig};
use crate::header::registry::WordRegistry;
use crate::header::state::HeaderState;
use crate::header::word::Word;
use crate::language::Language;
use crate::render::animator::{AnimationHandle, SwapAnimator};
use crate::render::layout::{HeaderGeometry, HeaderLayout, Positions};
use crate::store::{load_order, save_order, KeyValueStore};

/// Zone projection of the header state: what sits in the pinned slot and
/// the pile, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderView {
    pub pinned: Option<String>,
    pub pile: Vec<String>,
}

impl HeaderView {
    /// Ids across both zones, pinned first.
    pub fn all_ids(&self) -> Vec<&str> {
        self.pinned
            .iter()
            .chain(self.pile.iter())
            .map(String::as_str)
            .collect()
    }
}

/// What a slug resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A registered word (possibly reached through its parent segment).
    Word(String),
    /// The home route: nothing pinned.
    Home,
    /// Unmapped route.
    NotFound,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub animate: bool,
}

impl RenderOptions {
    pub fn animated() -> Self {
        Self { animate: true }
    }

    pub fn instant() -> Self {
        Self { animate: false }
    }
}

#[derive(Debug)]
pub enum RenderOutcome {
    /// Same slug again inside the debounce window; nothing happened.
    Debounced,
    /// 404 fallback: pinned zone cleared, every word in the pile.
    NotFound,
    Rendered {
        target: Target,
        /// Whether the zones differ from before the call.
        changed: bool,
        animation: Option<AnimationHandle>,
    },
}

impl RenderOutcome {
    pub fn take_animation(self) -> Option<AnimationHandle> {
        match self {
            RenderOutcome::Rendered { animation, .. } => animation,
            _ => None,
        }
    }
}

/// Partitions words into the pinned slot and the pile for a slug, persists
/// the pile order, and produces the flip animation between layouts.
pub struct HeaderRenderer {
    registry: WordRegistry,
    state: HeaderState,
    store: Box<dyn KeyValueStore>,
    keys: StorageKeys,
    home_slug: String,
    debounce: Duration,
    last_render: Option<(String, Instant)>,
    rendered_once: bool,
    layout: HeaderLayout,
    animator: SwapAnimator,
    language: Language,
}

impl HeaderRenderer {
    pub fn new(
        registry: WordRegistry,
        store: Box<dyn KeyValueStore>,
        config: &WordplayConfig,
        language: Language,
    ) -> Self {
        let saved = load_order(store.as_ref(), &config.storage.pile_order);
        let state = if saved.is_empty() {
            HeaderState::new(&registry)
        } else {
            log::debug!("restoring saved pile order {saved:?}");
            HeaderState::with_saved_order(&registry, &saved)
        };
        Self {
            registry,
            state,
            store,
            keys: config.storage.clone(),
            home_slug: config.home_slug.clone(),
            debounce: config.timing.render_debounce(),
            last_render: None,
            rendered_once: false,
            layout: HeaderLayout::new(config.layout.clone()),
            animator: SwapAnimator::new(config.timing.clone()),
            language,
        }
    }

    /// Every word the header knows, in markup order.
    pub fn registry(&self) -> &WordRegistry {
        &self.registry
    }

    /// Pinned word, previous pin and pile order.
    pub fn state(&self) -> &HeaderState {
        &self.state
    }

    pub fn animator(&self) -> &SwapAnimator {
        &self.animator
    }

    /// Slug of the home page (the place word's own page).
    pub fn home_slug(&self) -> &str {
        &self.home_slug
    }

    /// Language the labels are currently shown in.
    pub fn language(&self) -> Language {
        self.language
    }

    /// Preference store holding the pile order and language.
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Swap in another store and hand back the current one, so preferences
    /// can be carried into a rebuilt session.
    pub fn replace_store(&mut self, store: Box<dyn KeyValueStore>) -> Box<dyn KeyValueStore> {
        std::mem::replace(&mut self.store, store)
    }

    /// Switch label language and direction, persisting the preference.
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        language.save(self.store.as_mut(), &self.keys.lang);
    }

    /// Available width for the pile row; wider headers wrap later.
    pub fn set_width(&mut self, width: f32) {
        self.layout.set_width(width);
    }

    /// Current zone contents.
    pub fn view(&self) -> HeaderView {
        HeaderView {
            pinned: self.state.get_pinned().map(str::to_string),
            pile: self.state.pile_order().to_vec(),
        }
    }

    /// Laid-out boxes for the current view.
    pub fn geometry(&self) -> HeaderGeometry {
        self.layout.compute(&self.view(), &self.registry, self.language)
    }

    pub fn positions(&self) -> Positions {
        self.geometry().words
    }

    /// Resolve a page slug: exact match, home, the first path segment of a
    /// nested slug, or not found.
    pub fn resolve(&self, slug: &str) -> Target {
        let slug = normalize_slug(slug, &self.home_slug);
        if slug == self.home_slug {
            return Target::Home;
        }
        if self.registry.contains(&slug) {
            return Target::Word(slug);
        }
        if let Some((parent, _)) = slug.split_once('/') {
            if parent == self.home_slug {
                return Target::Home;
            }
            if self.registry.contains(parent) {
                return Target::Word(parent.to_string());
            }
        }
        Target::NotFound
    }

    /// Word a target navigates to (the home word for [`Target::Home`]).
    pub fn word_for(&self, target: &Target) -> Option<&Word> {
        match target {
            Target::Word(id) => self.registry.get(id),
            Target::Home => self.registry.home(),
            Target::NotFound => None,
        }
    }

    /// Re-project the header for `slug`.
    ///
    /// With `animate` set (and after the first render since load), the
    /// before-layout is captured ahead of any state change and a flip
    /// animation to the new layout is returned.
    pub fn render(&mut self, slug: &str, options: RenderOptions, now: Instant) -> RenderOutcome {
        if let Some((last, at)) = &self.last_render {
            if last == slug && now.saturating_duration_since(*at) < self.debounce {
                log::debug!("render({slug:?}) debounced");
                return RenderOutcome::Debounced;
            }
        }
        self.last_render = Some((slug.to_string(), now));

        let before_view = self.view();
        let before = (options.animate && self.rendered_once).then(|| self.positions());
        let first = !self.rendered_once;
        self.rendered_once = true;

        let target = self.resolve(slug);
        log::debug!("render({slug:?}) -> {target:?}");
        match &target {
            Target::NotFound => {
                log::info!("no header word for {slug:?}, showing full pile");
                self.state.reset();
                return RenderOutcome::NotFound;
            }
            Target::Word(id) => {
                self.state.set_pinned(id);
            }
            Target::Home => self.state.unpin(),
        }

        save_order(
            self.store.as_mut(),
            &self.keys.pile_order,
            self.state.pile_order(),
        );

        let after_view = self.view();
        let changed = first || after_view != before_view;
        let animation = match before {
            Some(before) if after_view != before_view => {
                let landing = match &target {
                    Target::Word(id) if before_view.pinned.as_deref() != Some(id) => {
                        Some(id.as_str())
                    }
                    _ => None,
                };
                Some(
                    self.animator
                        .animate_swap(&before, &self.positions(), landing, now),
                )
            }
            _ => None,
        };

        RenderOutcome::Rendered {
            target,
            changed,
            animation,
        }
    }
}

/// Namespace → slug: trimmed, surrounding slashes removed, empty means home.
pub fn normalize_slug(raw: &str, home_slug: &str) -> String {
    let slug = raw.trim().trim_matches('/');
    if slug.is_empty() {
        home_slug.to_string()
    } else {
        slug.to_string()
    }
}
