//! SPA-style page transitions: fade the current container out, fetch the
//! next page on a worker thread, swap containers, fade back in.

use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::time::{Duration, Instant};

use url::Url;

use crate::config::{MarkupConfig, WordplayConfig};
use crate::dom::page::Page;
use crate::language::Language;
use crate::net::fetch::{FetchError, FetchResult};
use crate::net::source::PageSource;
use crate::transition::adapter::{ContentFade, Lifecycle, NavigationError, PageTransitionAdapter};

/// Horizontal travel of the container during a fade.
pub const SLIDE_DISTANCE_PX: f32 = 24.0;

struct Flight {
    url: Url,
    leave_started: Instant,
    rx: Receiver<Result<FetchResult, FetchError>>,
    fetched: Option<Result<Page, String>>,
}

struct Entering {
    started: Instant,
    namespace: String,
}

pub struct FetchTransitionAdapter {
    source: Arc<dyn PageSource>,
    markup: MarkupConfig,
    home_slug: String,
    fade: Duration,
    language: Language,
    current: Url,
    pending: VecDeque<Lifecycle>,
    flight: Option<Flight>,
    entering: Option<Entering>,
}

impl FetchTransitionAdapter {
    pub fn new(source: Arc<dyn PageSource>, current: Url, config: &WordplayConfig) -> Self {
        Self {
            source,
            markup: config.markup.clone(),
            home_slug: config.home_slug.clone(),
            fade: config.timing.fade(),
            language: Language::default(),
            current,
            pending: VecDeque::new(),
            flight: None,
            entering: None,
        }
    }

    pub fn current_url(&self) -> &Url {
        &self.current
    }

    pub fn is_busy(&self) -> bool {
        self.flight.is_some() || self.entering.is_some()
    }

    fn fade_progress(&self, since: Instant, now: Instant) -> f32 {
        if self.fade.is_zero() {
            return 1.0;
        }
        (now.saturating_duration_since(since).as_secs_f32() / self.fade.as_secs_f32())
            .clamp(0.0, 1.0)
    }

    fn page_from(&self, result: Result<FetchResult, FetchError>) -> Result<Page, String> {
        let fetched = result.map_err(|e| e.to_string())?;
        Page::from_fetch(&fetched, &self.markup, &self.home_slug).map_err(|e| e.to_string())
    }

    fn poll_flight(&mut self, now: Instant) -> Option<Lifecycle> {
        let flight = self.flight.as_mut()?;
        if flight.fetched.is_none() {
            let received = match flight.rx.try_recv() {
                Ok(result) => Some(result),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => Some(Err(FetchError::NotFound(format!(
                    "{} (fetch thread exited)",
                    flight.url
                )))),
            };
            if let Some(result) = received {
                let page = self.page_from(result);
                if let Some(flight) = self.flight.as_mut() {
                    flight.fetched = Some(page);
                }
            }
        }

        let flight = self.flight.as_ref()?;
        let entered = match &flight.fetched {
            None => return None,
            Some(Err(_)) => false,
            Some(Ok(_)) if now >= flight.leave_started + self.fade => true,
            Some(Ok(_)) => return None,
        };

        let flight = self.flight.take()?;
        match flight.fetched {
            Some(Ok(page)) if entered => {
                self.current = page.url.clone();
                self.entering = Some(Entering {
                    started: now,
                    namespace: page.namespace.clone(),
                });
                Some(Lifecycle::BeforeEnter {
                    page: Box::new(page),
                })
            }
            Some(Err(reason)) => {
                log::warn!("fetch of {} failed: {reason}", flight.url);
                Some(Lifecycle::Failed {
                    url: flight.url,
                    reason,
                })
            }
            _ => None,
        }
    }
}

impl PageTransitionAdapter for FetchTransitionAdapter {
    fn navigate(&mut self, url: &Url, now: Instant) -> Result<(), NavigationError> {
        if let Some(flight) = &self.flight {
            return Err(NavigationError::Busy(flight.url.to_string()));
        }
        if url.origin() != self.current.origin() {
            return Err(NavigationError::Rejected {
                url: url.to_string(),
                reason: "different origin".into(),
            });
        }

        let (tx, rx) = mpsc::channel();
        let source = Arc::clone(&self.source);
        let target = url.clone();
        std::thread::spawn(move || {
            let result = source.load(&target);
            let _ = tx.send(result);
        });

        log::debug!("leaving {} for {url}", self.current);
        self.entering = None;
        self.pending.push_back(Lifecycle::Leave {
            from: self.current.clone(),
        });
        self.flight = Some(Flight {
            url: url.clone(),
            leave_started: now,
            rx,
            fetched: None,
        });
        Ok(())
    }

    fn poll(&mut self, now: Instant) -> Option<Lifecycle> {
        if let Some(signal) = self.pending.pop_front() {
            return Some(signal);
        }
        if let Some(signal) = self.poll_flight(now) {
            return Some(signal);
        }
        let entering = self.entering.as_ref()?;
        if now >= entering.started + self.fade {
            let entering = self.entering.take()?;
            return Some(Lifecycle::Enter {
                namespace: entering.namespace,
            });
        }
        None
    }

    fn name(&self) -> &'static str {
        "fetch"
    }

    fn content_fade(&self, now: Instant) -> ContentFade {
        let travel = SLIDE_DISTANCE_PX * self.language.slide_sign();
        if let Some(flight) = &self.flight {
            let p = self.fade_progress(flight.leave_started, now);
            return ContentFade {
                alpha: 1.0 - p,
                offset_x: travel * p,
            };
        }
        if let Some(entering) = &self.entering {
            let p = self.fade_progress(entering.started, now);
            return ContentFade {
                alpha: p,
                offset_x: -travel * (1.0 - p),
            };
        }
        ContentFade::VISIBLE
    }

    fn set_language(&mut self, language: Language) {
        self.language = language;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::source::MemorySource;

    const ABOUT: &str = r#"<html><body><main data-barba="container" data-barba-namespace="about"><p>About</p></main></body></html>"#;

    fn adapter(source: MemorySource) -> FetchTransitionAdapter {
        FetchTransitionAdapter::new(
            Arc::new(source),
            Url::parse("https://site.test/").unwrap(),
            &WordplayConfig::default(),
        )
    }

    /// Poll at `now` until a signal arrives; the fetch runs on a real thread.
    fn wait(adapter: &mut FetchTransitionAdapter, now: Instant) -> Option<Lifecycle> {
        for _ in 0..200 {
            if let Some(signal) = adapter.poll(now) {
                return Some(signal);
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        None
    }

    #[test]
    fn runs_leave_before_enter_enter() {
        let mut a = adapter(MemorySource::new().with_page("/about/", ABOUT));
        let t0 = Instant::now();
        let url = Url::parse("https://site.test/about/").unwrap();
        a.navigate(&url, t0).unwrap();

        assert!(matches!(a.poll(t0), Some(Lifecycle::Leave { .. })));
        assert!(matches!(
            a.navigate(&url, t0),
            Err(NavigationError::Busy(_))
        ));

        // Fetched, but the leave fade is still running.
        let mid = t0 + Duration::from_millis(100);
        assert!(wait(&mut a, mid).is_none());
        let fade = a.content_fade(mid);
        assert!(fade.alpha < 1.0 && fade.offset_x > 0.0);

        let after_leave = t0 + Duration::from_millis(500);
        match wait(&mut a, after_leave) {
            Some(Lifecycle::BeforeEnter { page }) => assert_eq!(page.namespace, "about"),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(a.current_url().path(), "/about/");
        assert!(a.poll(after_leave + Duration::from_millis(100)).is_none());
        assert!(matches!(
            a.poll(after_leave + Duration::from_millis(500)),
            Some(Lifecycle::Enter { namespace }) if namespace == "about"
        ));
        assert!(!a.is_busy());
        assert_eq!(a.content_fade(after_leave + Duration::from_secs(1)), ContentFade::VISIBLE);
    }

    #[test]
    fn missing_page_fails() {
        let mut a = adapter(MemorySource::new());
        let t0 = Instant::now();
        a.navigate(&Url::parse("https://site.test/nope/").unwrap(), t0)
            .unwrap();
        assert!(matches!(a.poll(t0), Some(Lifecycle::Leave { .. })));
        assert!(matches!(wait(&mut a, t0), Some(Lifecycle::Failed { .. })));
        assert!(!a.is_busy());
    }

    #[test]
    fn not_found_page_is_entered_like_any_page() {
        let lost = r#"<html><body><main data-barba="container" data-barba-namespace="404"><p>Lost</p></main></body></html>"#;
        let mut a = adapter(MemorySource::new().with_not_found(lost));
        let t0 = Instant::now();
        a.navigate(&Url::parse("https://site.test/nope/").unwrap(), t0)
            .unwrap();
        a.poll(t0);
        match wait(&mut a, t0 + Duration::from_millis(500)) {
            Some(Lifecycle::BeforeEnter { page }) => {
                assert_eq!(page.status, 404);
                assert_eq!(page.namespace, "404");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn page_without_container_fails() {
        let mut a = adapter(MemorySource::new().with_page("/plain/", "<html><body><p>x</p></body></html>"));
        let t0 = Instant::now();
        a.navigate(&Url::parse("https://site.test/plain/").unwrap(), t0)
            .unwrap();
        a.poll(t0);
        match wait(&mut a, t0) {
            Some(Lifecycle::Failed { reason, .. }) => assert!(reason.contains("container")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn cross_origin_is_rejected() {
        let mut a = adapter(MemorySource::new());
        let err = a
            .navigate(&Url::parse("https://elsewhere.test/").unwrap(), Instant::now())
            .unwrap_err();
        assert!(matches!(err, NavigationError::Rejected { .. }));
    }

    #[test]
    fn hebrew_slides_the_other_way() {
        let mut a = adapter(MemorySource::new().with_page("/about/", ABOUT));
        a.set_language(Language::He);
        let t0 = Instant::now();
        a.navigate(&Url::parse("https://site.test/about/").unwrap(), t0)
            .unwrap();
        assert!(a.content_fade(t0 + Duration::from_millis(250)).offset_x < 0.0);
    }
}
