//! Orchestrates a click-to-navigate sequence end to end.
//!
//! A sequence engages the lock, blocks header input, runs the header swap,
//! starts navigation partway through the animation, re-syncs the header when
//! the next page arrives, and releases the lock once that page has entered.
//! Only one sequence runs at a time; intents arriving while the lock is held
//! are dropped.
//!
//! Time never comes from the system clock here. Every entry point takes
//! `now`, and the host drives progress through [`TransitionCoordinator::tick`].

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use url::Url;

use crate::config::TimingConfig;
use crate::dom::page::{slug_from_url, Page};
use crate::header::renderer::{HeaderRenderer, HeaderView, RenderOptions, RenderOutcome};
use crate::language::Language;
use crate::render::animator::{AnimationHandle, Transform};
use crate::transition::adapter::{
    ContentFade, DirectNavigation, Lifecycle, PageTransitionAdapter,
};
use crate::transition::interaction::Interactivity;
use crate::transition::lock::TransitionLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Lock engaged, header swap running, navigation not yet started.
    Preparing,
    /// Navigation in flight.
    Coordinating,
    /// Sequence finished; back to idle on the next tick.
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The clicked word is already pinned.
    AlreadyPinned,
    /// Another sequence holds the lock.
    Locked,
    UnknownWord,
    /// The word's link does not resolve to a URL.
    BadHref,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Started(u64),
    Ignored(IgnoreReason),
}

impl ClickOutcome {
    pub fn is_started(self) -> bool {
        matches!(self, ClickOutcome::Started(_))
    }
}

/// Notifications for the host, drained with
/// [`TransitionCoordinator::drain_events`].
#[derive(Debug, Clone)]
pub enum CoordinatorEvent {
    HeaderChanged,
    ContentLeaving,
    PageEntering(Box<Page>),
    PageEntered { namespace: String },
    /// A full page load happened; the host should rebuild from `Url`.
    HardNavigation(Url),
    LanguageChanged(Language),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Intent {
    Word(String),
    Home,
    Language(Language),
    History,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NavState {
    /// Header-only sequence.
    None,
    Scheduled { at: Instant },
    InFlight,
    Fallback { at: Instant },
    Direct,
}

#[derive(Debug)]
struct Sequence {
    id: u64,
    intent: Intent,
    url: Option<Url>,
    started_at: Instant,
    nav: NavState,
}

pub struct TransitionCoordinator {
    renderer: HeaderRenderer,
    adapter: Box<dyn PageTransitionAdapter>,
    fallback: DirectNavigation,
    lock: TransitionLock,
    timing: TimingConfig,
    current_url: Url,
    phase: Phase,
    sequence: Option<Sequence>,
    animation: Option<AnimationHandle>,
    events: VecDeque<CoordinatorEvent>,
    next_id: u64,
}

impl TransitionCoordinator {
    /// Wire a header to a page adapter. Call [`init`](Self::init) before
    /// the first tick.
    pub fn new(
        renderer: HeaderRenderer,
        adapter: Box<dyn PageTransitionAdapter>,
        current_url: Url,
        timing: TimingConfig,
    ) -> Self {
        log::info!("coordinator using {} adapter", adapter.name());
        Self {
            renderer,
            adapter,
            fallback: DirectNavigation::new(),
            lock: TransitionLock::new(timing.lock_ceiling()),
            timing,
            current_url,
            phase: Phase::Idle,
            sequence: None,
            animation: None,
            events: VecDeque::new(),
            next_id: 1,
        }
    }

    /// Render the header for the page the session opened on.
    pub fn init(&mut self, now: Instant) {
        let slug = slug_from_url(&self.current_url, self.renderer.home_slug());
        let lang = self.renderer.language();
        self.adapter.set_language(lang);
        self.renderer.render(&slug, RenderOptions::instant(), now);
        self.events.push_back(CoordinatorEvent::HeaderChanged);
    }

    /// Where the running sequence is, or `Idle`.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether a sequence holds the lock.
    pub fn is_locked(&self) -> bool {
        self.lock.is_engaged()
    }

    /// The sequence lock, for inspecting who holds it and since when.
    pub fn lock(&self) -> &TransitionLock {
        &self.lock
    }

    /// The header this coordinator drives.
    pub fn renderer(&self) -> &HeaderRenderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut HeaderRenderer {
        &mut self.renderer
    }

    /// URL of the page currently shown (or being entered).
    pub fn current_url(&self) -> &Url {
        &self.current_url
    }

    /// Current zone contents of the header.
    pub fn header_view(&self) -> HeaderView {
        self.renderer.view()
    }

    /// The latest swap animation, running or finished.
    pub fn animation(&self) -> Option<&AnimationHandle> {
        self.animation.as_ref()
    }

    /// Offset and scale to paint word `id` with this frame.
    pub fn transform_of(&self, id: &str) -> Transform {
        self.animation
            .as_ref()
            .map(|a| a.transform(id))
            .unwrap_or(Transform::IDENTITY)
    }

    /// How the page container should be drawn at `now`.
    pub fn content_fade(&self, now: Instant) -> ContentFade {
        self.adapter.content_fade(now)
    }

    /// Input is blocked on the header root and every word for as long as
    /// the lock is held.
    pub fn interactivity(&self) -> Interactivity {
        if self.lock.is_engaged() {
            Interactivity::BLOCKED
        } else {
            Interactivity::ENABLED
        }
    }

    /// Take the events queued since the last call, oldest first.
    pub fn drain_events(&mut self) -> Vec<CoordinatorEvent> {
        self.events.drain(..).collect()
    }

    /// A click on a header word.
    pub fn click_word(&mut self, slug: &str, now: Instant) -> ClickOutcome {
        let Some(word) = self.renderer.registry().get(slug) else {
            log::warn!("click on unknown word {slug:?}");
            return ClickOutcome::Ignored(IgnoreReason::UnknownWord);
        };
        if self.renderer.state().get_pinned() == Some(slug) {
            log::debug!("{slug:?} is already pinned");
            return ClickOutcome::Ignored(IgnoreReason::AlreadyPinned);
        }
        let url = match self.current_url.join(&word.href) {
            Ok(url) => url,
            Err(e) => {
                log::error!("word {slug:?} has unusable href {:?}: {e}", word.href);
                return ClickOutcome::Ignored(IgnoreReason::BadHref);
            }
        };
        if !self.lock.try_acquire(format!("click {slug}"), now) {
            return ClickOutcome::Ignored(IgnoreReason::Locked);
        }

        let slug = slug.to_string();
        let id = self.begin(Intent::Word(slug.clone()), Some(url), now);
        self.swap_header(&slug, Some(&slug), now);
        self.schedule_navigation(now);
        ClickOutcome::Started(id)
    }

    /// A click on the home word. On the home page already this only
    /// replays the header; elsewhere it navigates home.
    pub fn click_home(&mut self, now: Instant) -> ClickOutcome {
        let home_slug = self.renderer.home_slug().to_string();
        let href = self
            .renderer
            .registry()
            .home()
            .map(|w| w.href.clone())
            .unwrap_or_else(|| "/".to_string());
        let url = match self.current_url.join(&href) {
            Ok(url) => url,
            Err(e) => {
                log::error!("home word has unusable href {href:?}: {e}");
                return ClickOutcome::Ignored(IgnoreReason::BadHref);
            }
        };
        let at_home = slug_from_url(&self.current_url, &home_slug) == home_slug;
        if !self.lock.try_acquire("click home", now) {
            return ClickOutcome::Ignored(IgnoreReason::Locked);
        }

        let id = self.begin(Intent::Home, (!at_home).then_some(url), now);
        self.swap_header(&home_slug, None, now);
        self.schedule_navigation(now);
        ClickOutcome::Started(id)
    }

    /// Flip the label language. Dropped while a sequence runs.
    pub fn toggle_language(&mut self, now: Instant) -> ClickOutcome {
        if !self.lock.try_acquire("language toggle", now) {
            return ClickOutcome::Ignored(IgnoreReason::Locked);
        }
        let lang = self.renderer.language().toggle();
        let id = self.begin(Intent::Language(lang), None, now);

        let before = self.renderer.positions();
        self.renderer.set_language(lang);
        self.adapter.set_language(lang);
        let after = self.renderer.positions();
        self.animation = Some(
            self.renderer
                .animator()
                .animate_swap(&before, &after, None, now),
        );
        self.events.push_back(CoordinatorEvent::LanguageChanged(lang));
        self.events.push_back(CoordinatorEvent::HeaderChanged);
        ClickOutcome::Started(id)
    }

    /// Back/forward navigation. The header is not touched up front; it
    /// re-syncs when the page arrives.
    pub fn navigate_history(&mut self, url: &Url, now: Instant) -> ClickOutcome {
        if !self.lock.try_acquire(format!("history {url}"), now) {
            return ClickOutcome::Ignored(IgnoreReason::Locked);
        }
        let id = self.begin(Intent::History, Some(url.clone()), now);
        if let Some(seq) = self.sequence.as_mut() {
            seq.nav = NavState::Scheduled { at: now };
        }
        ClickOutcome::Started(id)
    }

    /// Advance animations, timers and adapter signals to `now`.
    pub fn tick(&mut self, now: Instant) {
        if self.phase == Phase::Complete {
            self.phase = Phase::Idle;
        }

        if self.lock.release_if_stale(now) {
            if let Some(seq) = self.sequence.take() {
                log::warn!("abandoning sequence {} ({:?})", seq.id, seq.intent);
            }
            if let Some(anim) = self.animation.as_mut() {
                anim.interrupt();
            }
            self.phase = Phase::Idle;
        }

        if let Some(anim) = self.animation.as_mut() {
            anim.tick(now);
        }

        self.advance_sequence(now);

        while let Some(signal) = self.adapter.poll(now) {
            self.on_lifecycle(signal, now);
        }
        while let Some(signal) = self.fallback.poll(now) {
            self.on_lifecycle(signal, now);
        }

        let header_only_done = self.sequence.as_ref().is_some_and(|seq| {
            seq.nav == NavState::None
                && self.animation.as_ref().map_or(true, |a| !a.is_running())
        });
        if header_only_done {
            self.complete(now);
        }
    }

    fn begin(&mut self, intent: Intent, url: Option<Url>, now: Instant) -> u64 {
        if let Some(anim) = self.animation.as_mut() {
            anim.interrupt();
        }
        if let Some(stale) = self.sequence.take() {
            log::warn!("dropping unfinished sequence {}", stale.id);
        }
        let id = self.next_id;
        self.next_id += 1;
        log::info!("sequence {id} started: {intent:?} -> {url:?}");
        self.sequence = Some(Sequence {
            id,
            intent,
            url,
            started_at: now,
            nav: NavState::None,
        });
        self.phase = Phase::Preparing;
        id
    }

    /// Capture positions, re-project the header for `slug`, and animate
    /// from the old layout to the new one.
    fn swap_header(&mut self, slug: &str, landing: Option<&str>, now: Instant) {
        let before = self.renderer.positions();
        self.renderer.render(slug, RenderOptions::instant(), now);
        let after = self.renderer.positions();
        self.animation = Some(
            self.renderer
                .animator()
                .animate_swap(&before, &after, landing, now),
        );
        self.events.push_back(CoordinatorEvent::HeaderChanged);
    }

    fn schedule_navigation(&mut self, now: Instant) {
        let lead = self
            .animation
            .as_ref()
            .map(|a| a.duration().mul_f32(self.timing.navigate_at))
            .unwrap_or(Duration::ZERO);
        if let Some(seq) = self.sequence.as_mut() {
            if seq.url.is_some() {
                seq.nav = NavState::Scheduled { at: now + lead };
            }
        }
    }

    fn advance_sequence(&mut self, now: Instant) {
        let Some(seq) = self.sequence.as_ref() else {
            return;
        };
        if self.phase == Phase::Preparing {
            let base = self
                .animation
                .as_ref()
                .map(|a| a.duration())
                .filter(|d| !d.is_zero())
                .unwrap_or_else(|| self.timing.swap());
            if now.saturating_duration_since(seq.started_at) >= base.mul_f32(self.timing.coordinating_at)
            {
                self.phase = Phase::Coordinating;
            }
        }

        let (nav, url) = (seq.nav, seq.url.clone());
        let Some(url) = url else {
            return;
        };
        match nav {
            NavState::Scheduled { at } if now >= at => self.start_navigation(&url, now),
            NavState::Fallback { at } if now >= at => {
                log::warn!("falling back to direct navigation for {url}");
                match self.fallback.navigate(&url, now) {
                    Ok(()) => self.set_nav(NavState::Direct),
                    Err(e) => {
                        log::error!("direct navigation to {url} failed: {e}");
                        self.complete(now);
                    }
                }
            }
            _ => {}
        }
    }

    fn start_navigation(&mut self, url: &Url, now: Instant) {
        self.phase = Phase::Coordinating;
        match self.adapter.navigate(url, now) {
            Ok(()) => {
                log::debug!("{} adapter navigating to {url}", self.adapter.name());
                self.set_nav(NavState::InFlight);
            }
            Err(e) => {
                log::error!("navigation to {url} failed to start: {e}");
                self.set_nav(NavState::Fallback {
                    at: now + self.timing.fallback_grace(),
                });
            }
        }
    }

    fn set_nav(&mut self, nav: NavState) {
        if let Some(seq) = self.sequence.as_mut() {
            seq.nav = nav;
        }
    }

    fn on_lifecycle(&mut self, signal: Lifecycle, now: Instant) {
        match signal {
            Lifecycle::Leave { from } => {
                log::debug!("leaving {from}");
                self.events.push_back(CoordinatorEvent::ContentLeaving);
            }
            Lifecycle::BeforeEnter { page } => {
                self.current_url = page.url.clone();
                self.sync_header(&page.namespace, now);
                self.events.push_back(CoordinatorEvent::PageEntering(page));
            }
            Lifecycle::Enter { namespace } => {
                self.events
                    .push_back(CoordinatorEvent::PageEntered { namespace });
                if self.in_flight() {
                    self.complete(now);
                } else {
                    log::debug!("page entered outside a sequence");
                }
            }
            Lifecycle::Failed { url, reason } => {
                log::error!("transition to {url} failed: {reason}");
                if self.in_flight() {
                    self.set_nav(NavState::Fallback {
                        at: now + self.timing.fallback_grace(),
                    });
                }
            }
            Lifecycle::Reload { url } => {
                self.current_url = url.clone();
                self.events.push_back(CoordinatorEvent::HardNavigation(url));
                if self.sequence.is_some() {
                    self.complete(now);
                }
            }
        }
    }

    fn in_flight(&self) -> bool {
        self.sequence
            .as_ref()
            .is_some_and(|seq| seq.nav == NavState::InFlight)
    }

    /// Header re-sync on page arrival. A click sequence already shows the
    /// target, so this is usually a no-op and the click animation keeps
    /// running.
    fn sync_header(&mut self, namespace: &str, now: Instant) {
        match self.renderer.render(namespace, RenderOptions::animated(), now) {
            RenderOutcome::Debounced => {}
            RenderOutcome::NotFound => {
                if let Some(anim) = self.animation.as_mut() {
                    anim.interrupt();
                }
                self.events.push_back(CoordinatorEvent::HeaderChanged);
            }
            RenderOutcome::Rendered {
                target,
                changed,
                animation,
            } => {
                if let Some(next) = animation {
                    if let Some(anim) = self.animation.as_mut() {
                        anim.interrupt();
                    }
                    self.animation = Some(next);
                }
                if changed {
                    log::debug!("header re-synced to {target:?}");
                    self.events.push_back(CoordinatorEvent::HeaderChanged);
                }
            }
        }
    }

    fn complete(&mut self, now: Instant) {
        if let Some(seq) = self.sequence.take() {
            log::info!(
                "sequence {} complete after {}ms",
                seq.id,
                now.saturating_duration_since(seq.started_at).as_millis()
            );
            match &seq.intent {
                Intent::Word(slug) if self.renderer.state().get_pinned() != Some(slug.as_str()) => {
                    log::warn!(
                        "sequence {} for {slug:?} ended with {:?} pinned",
                        seq.id,
                        self.renderer.state().get_pinned()
                    );
                }
                Intent::Language(lang) if self.renderer.language() != *lang => {
                    log::warn!("sequence {} ended in {}, expected {lang}", seq.id, self.renderer.language());
                }
                _ => {}
            }
        }
        self.lock.release(now);
        self.phase = Phase::Complete;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::config::WordplayConfig;
    use crate::header::registry::WordRegistry;
    use crate::header::word::{Labels, Word};
    use crate::store::MemoryStore;
    use crate::transition::adapter::NavigationError;

    #[derive(Default)]
    struct Script {
        navigations: Vec<Url>,
        queued: VecDeque<Lifecycle>,
        refuse: bool,
    }

    struct ScriptedAdapter(Rc<RefCell<Script>>);

    impl PageTransitionAdapter for ScriptedAdapter {
        fn navigate(&mut self, url: &Url, _now: Instant) -> Result<(), NavigationError> {
            let mut script = self.0.borrow_mut();
            if script.refuse {
                return Err(NavigationError::Rejected {
                    url: url.to_string(),
                    reason: "offline".into(),
                });
            }
            script.navigations.push(url.clone());
            Ok(())
        }

        fn poll(&mut self, _now: Instant) -> Option<Lifecycle> {
            self.0.borrow_mut().queued.pop_front()
        }

        fn name(&self) -> &'static str {
            "scripted"
        }
    }

    fn page(slug: &str) -> Box<Page> {
        let url = Url::parse(&format!("https://site.test/{slug}/")).unwrap();
        let html = format!(
            r#"<html><body><main data-barba="container" data-barba-namespace="{slug}"><p>{slug}</p></main></body></html>"#
        );
        Box::new(Page::from_html(&html, &url, &WordplayConfig::default().markup, "place").unwrap())
    }

    fn setup(start: &str) -> (TransitionCoordinator, Rc<RefCell<Script>>, Instant) {
        let config = WordplayConfig::default();
        let registry = WordRegistry::new(
            ["home", "about", "contact"]
                .iter()
                .map(|id| Word::new(*id, format!("/{id}/"), Labels::same(*id)))
                .collect(),
        )
        .with_home(Word::new("place", "/", Labels::same("place")));
        let renderer =
            HeaderRenderer::new(registry, Box::new(MemoryStore::new()), &config, Language::En);
        let script = Rc::new(RefCell::new(Script::default()));
        let url = Url::parse(&format!("https://site.test/{start}")).unwrap();
        let mut coordinator = TransitionCoordinator::new(
            renderer,
            Box::new(ScriptedAdapter(script.clone())),
            url,
            config.timing,
        );
        let now = Instant::now();
        coordinator.init(now);
        (coordinator, script, now)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn click_runs_full_sequence() {
        let (mut c, script, t0) = setup("home/");
        assert_eq!(c.header_view().pinned.as_deref(), Some("home"));

        assert!(c.click_word("about", t0).is_started());
        assert!(c.is_locked());
        assert!(!c.interactivity().accepts_input());
        assert_eq!(c.phase(), Phase::Preparing);
        assert_eq!(c.header_view().pinned.as_deref(), Some("about"));

        // Navigation waits for 60% of the 600ms swap.
        c.tick(t0 + ms(300));
        assert!(script.borrow().navigations.is_empty());
        c.tick(t0 + ms(370));
        assert_eq!(script.borrow().navigations.len(), 1);
        assert_eq!(c.phase(), Phase::Coordinating);

        script.borrow_mut().queued.extend([
            Lifecycle::Leave {
                from: Url::parse("https://site.test/home/").unwrap(),
            },
            Lifecycle::BeforeEnter { page: page("about") },
            Lifecycle::Enter {
                namespace: "about".into(),
            },
        ]);
        c.tick(t0 + ms(800));
        assert!(!c.is_locked());
        assert_eq!(c.phase(), Phase::Complete);
        assert!(c.interactivity().accepts_input());
        assert_eq!(c.current_url().path(), "/about/");
        c.tick(t0 + ms(816));
        assert_eq!(c.phase(), Phase::Idle);
    }

    #[test]
    fn clicking_pinned_word_does_nothing() {
        let (mut c, script, t0) = setup("about/");
        let outcome = c.click_word("about", t0);
        assert_eq!(outcome, ClickOutcome::Ignored(IgnoreReason::AlreadyPinned));
        assert!(!c.is_locked());
        c.tick(t0 + ms(1000));
        assert!(script.borrow().navigations.is_empty());
        assert!(c.drain_events().iter().all(|e| matches!(e, CoordinatorEvent::HeaderChanged)));
    }

    #[test]
    fn second_click_while_locked_is_dropped() {
        let (mut c, script, t0) = setup("home/");
        assert!(c.click_word("about", t0).is_started());
        assert_eq!(
            c.click_word("contact", t0 + ms(10)),
            ClickOutcome::Ignored(IgnoreReason::Locked)
        );
        assert_eq!(c.header_view().pinned.as_deref(), Some("about"));
        c.tick(t0 + ms(400));
        assert_eq!(script.borrow().navigations.len(), 1);
        assert_eq!(script.borrow().navigations[0].path(), "/about/");
    }

    #[test]
    fn failed_navigation_falls_back_after_grace() {
        let (mut c, script, t0) = setup("home/");
        c.click_word("contact", t0);
        c.tick(t0 + ms(400));
        script.borrow_mut().queued.push_back(Lifecycle::Failed {
            url: Url::parse("https://site.test/contact/").unwrap(),
            reason: "500".into(),
        });
        c.tick(t0 + ms(450));
        assert!(c.is_locked());
        c.tick(t0 + ms(700));
        let events = c.drain_events();
        let hard = events.iter().find_map(|e| match e {
            CoordinatorEvent::HardNavigation(url) => Some(url.path().to_string()),
            _ => None,
        });
        assert_eq!(hard.as_deref(), Some("/contact/"));
        assert!(!c.is_locked());
    }

    #[test]
    fn refused_navigation_falls_back() {
        let (mut c, script, t0) = setup("home/");
        script.borrow_mut().refuse = true;
        c.click_word("about", t0);
        c.tick(t0 + ms(400));
        c.tick(t0 + ms(650));
        assert!(c
            .drain_events()
            .iter()
            .any(|e| matches!(e, CoordinatorEvent::HardNavigation(_))));
        assert!(!c.is_locked());
    }

    #[test]
    fn stale_lock_is_released_and_sequence_abandoned() {
        let (mut c, _script, t0) = setup("home/");
        c.click_word("about", t0);
        c.tick(t0 + ms(400));
        // No lifecycle signals ever arrive.
        c.tick(t0 + Duration::from_secs(5));
        assert!(c.is_locked());
        c.tick(t0 + Duration::from_secs(11));
        assert!(!c.is_locked());
        assert_eq!(c.phase(), Phase::Idle);
        assert!(c.click_word("contact", t0 + Duration::from_secs(11)).is_started());
    }

    #[test]
    fn history_navigation_resyncs_header_on_arrival() {
        let (mut c, script, t0) = setup("about/");
        let back = Url::parse("https://site.test/contact/").unwrap();
        assert!(c.navigate_history(&back, t0).is_started());
        assert_eq!(c.header_view().pinned.as_deref(), Some("about"));
        c.tick(t0 + ms(16));
        assert_eq!(script.borrow().navigations, [back]);

        script.borrow_mut().queued.extend([
            Lifecycle::BeforeEnter {
                page: page("contact"),
            },
            Lifecycle::Enter {
                namespace: "contact".into(),
            },
        ]);
        c.tick(t0 + ms(600));
        assert_eq!(c.header_view().pinned.as_deref(), Some("contact"));
        assert!(c.animation().is_some_and(|a| a.is_running()));
        assert!(!c.is_locked());
    }

    #[test]
    fn home_click_on_home_page_only_animates() {
        let (mut c, script, t0) = setup("");
        assert!(c.click_home(t0).is_started());
        assert!(c.is_locked());
        let mut now = t0;
        for _ in 0..40 {
            now += ms(16);
            c.tick(now);
        }
        assert!(script.borrow().navigations.is_empty());
        assert!(!c.is_locked());
    }

    #[test]
    fn language_toggle_is_dropped_while_locked() {
        let (mut c, _script, t0) = setup("home/");
        c.click_word("about", t0);
        assert_eq!(
            c.toggle_language(t0 + ms(5)),
            ClickOutcome::Ignored(IgnoreReason::Locked)
        );
        assert_eq!(c.renderer().language(), Language::En);
    }

    #[test]
    fn language_toggle_completes_with_its_animation() {
        let (mut c, _script, t0) = setup("home/");
        assert!(c.toggle_language(t0).is_started());
        assert_eq!(c.renderer().language(), Language::He);
        let mut now = t0;
        for _ in 0..40 {
            now += ms(16);
            c.tick(now);
        }
        assert!(!c.is_locked());
        assert!(c
            .drain_events()
            .iter()
            .any(|e| matches!(e, CoordinatorEvent::LanguageChanged(Language::He))));
    }
}
