//! Property-based checks of the header model and coordinator.
//!
//! 1. **Partition**: pinned zone plus pile is exactly the registry, once each.
//! 2. **Single pin**: at most one word is ever pinned.
//! 3. **Reorder bias**: the word pinned just before the current one leads
//!    the pile.
//! 4. **Mutual exclusion**: two clicks in one tick start one sequence.
//! 5. **Idempotent render**: a repeated render inside the debounce window
//!    leaves the header as a single render did.
//! 6. **Cleanup**: a terminal animation leaves every word untransformed.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use proptest::prelude::*;
use url::Url;

use wordplay::config::{TimingConfig, WordplayConfig};
use wordplay::header::registry::WordRegistry;
use wordplay::header::renderer::{HeaderRenderer, RenderOptions};
use wordplay::header::state::HeaderState;
use wordplay::header::word::{Labels, Word};
use wordplay::render::animator::{SwapAnimator, Transform};
use wordplay::render::layout::{LayoutBox, Positions};
use wordplay::store::MemoryStore;
use wordplay::transition::adapter::DirectNavigation;
use wordplay::{Language, TransitionCoordinator};

fn registry(n: usize) -> WordRegistry {
    WordRegistry::new(
        (0..n)
            .map(|i| {
                let id = format!("w{i}");
                Word::new(id.clone(), format!("/{id}/"), Labels::same(id))
            })
            .collect(),
    )
    .with_home(Word::new("place", "/", Labels::same("place")))
}

#[derive(Debug, Clone)]
enum Op {
    Pin(usize),
    Unpin,
    Reset,
}

fn op(n: usize) -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (0..n).prop_map(Op::Pin),
        1 => Just(Op::Unpin),
        1 => Just(Op::Reset),
    ]
}

fn ops() -> impl Strategy<Value = (usize, Vec<Op>)> {
    (1usize..8).prop_flat_map(|n| (Just(n), prop::collection::vec(op(n), 0..40)))
}

// ═════════════════════════════════════════════════════════════════════════
// 1–3. HeaderState invariants under arbitrary pin sequences
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn zones_partition_the_registry((n, ops) in ops()) {
        let reg = registry(n);
        let all: HashSet<String> = reg.ids().into_iter().collect();
        let mut state = HeaderState::new(&reg);
        for op in ops {
            match op {
                Op::Pin(i) => { state.set_pinned(&format!("w{i}")); }
                Op::Unpin => state.unpin(),
                Op::Reset => state.reset(),
            }
            let mut seen: Vec<&str> = state.pile_order().iter().map(String::as_str).collect();
            seen.extend(state.get_pinned());
            let unique: HashSet<String> = seen.iter().map(|s| s.to_string()).collect();
            prop_assert_eq!(seen.len(), unique.len());
            prop_assert_eq!(&unique, &all);
            prop_assert!(state.get_pinned().map_or(true, |p| !state.pile_order().iter().any(|id| id == p)));
        }
    }

    #[test]
    fn previous_pin_leads_the_pile((n, ops) in ops()) {
        let reg = registry(n);
        let mut state = HeaderState::new(&reg);
        for op in ops {
            let before = state.get_pinned().map(str::to_string);
            match op {
                Op::Pin(i) => {
                    let target = format!("w{i}");
                    state.set_pinned(&target);
                    if let Some(prev) = before.filter(|p| *p != target) {
                        prop_assert_eq!(state.pile_order().first(), Some(&prev));
                    }
                }
                Op::Unpin => state.unpin(),
                Op::Reset => state.reset(),
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. One sequence per tick
// ═════════════════════════════════════════════════════════════════════════

fn coordinator(n: usize, now: Instant) -> TransitionCoordinator {
    let config = WordplayConfig::default();
    let renderer = HeaderRenderer::new(
        registry(n),
        Box::new(MemoryStore::new()),
        &config,
        Language::En,
    );
    let mut c = TransitionCoordinator::new(
        renderer,
        Box::new(DirectNavigation::new()),
        Url::parse("https://site.test/").unwrap(),
        config.timing,
    );
    c.init(now);
    c
}

proptest! {
    #[test]
    fn two_clicks_in_one_tick_start_one_sequence(n in 2usize..8, a in 0usize..8, b in 0usize..8) {
        let now = Instant::now();
        let mut c = coordinator(n, now);
        let first = c.click_word(&format!("w{}", a % n), now);
        let second = c.click_word(&format!("w{}", b % n), now);
        prop_assert!(first.is_started());
        prop_assert!(!second.is_started());
        prop_assert_eq!(c.header_view().pinned, Some(format!("w{}", a % n)));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Debounced repeat render
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn repeat_render_inside_window_matches_single(n in 1usize..8, first in 0usize..8, target in 0usize..8, gap_ms in 0u64..100) {
        let config = WordplayConfig::default();
        let make = || HeaderRenderer::new(registry(n), Box::new(MemoryStore::new()), &config, Language::En);
        let now = Instant::now();
        let slug_a = format!("w{}", first % n);
        let slug_b = format!("w{}", target % n);
        let later = now + Duration::from_secs(1);

        let mut once = make();
        once.render(&slug_a, RenderOptions::instant(), now);
        once.render(&slug_b, RenderOptions::animated(), later);

        let mut twice = make();
        twice.render(&slug_a, RenderOptions::instant(), now);
        twice.render(&slug_b, RenderOptions::animated(), later);
        twice.render(&slug_b, RenderOptions::animated(), later + Duration::from_millis(gap_ms));

        prop_assert_eq!(once.view(), twice.view());
        prop_assert_eq!(once.state().prev_pinned(), twice.state().prev_pinned());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Terminal animations leave no transforms behind
// ═════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy)]
enum Ending {
    Interrupt,
    Complete,
    Stall,
    Frames,
}

fn positions(ids: usize) -> impl Strategy<Value = Positions> {
    prop::collection::vec((0.0f32..900.0, 0.0f32..90.0), ids).prop_map(|coords| {
        coords
            .into_iter()
            .enumerate()
            .map(|(i, (x, y))| (format!("w{i}"), LayoutBox::new(x, y, 60.0, 22.0)))
            .collect()
    })
}

fn ending() -> impl Strategy<Value = Ending> {
    prop_oneof![
        Just(Ending::Interrupt),
        Just(Ending::Complete),
        Just(Ending::Stall),
        Just(Ending::Frames),
    ]
}

proptest! {
    #[test]
    fn terminal_animation_is_identity(
        (before, after, landing) in (1usize..8).prop_flat_map(|n| (positions(n), positions(n), prop::option::of(0..n))),
        ending in ending(),
    ) {
        let animator = SwapAnimator::new(TimingConfig::default());
        let now = Instant::now();
        let landing = landing.map(|i| format!("w{i}"));
        let mut handle = animator.animate_swap(&before, &after, landing.as_deref(), now);

        match ending {
            Ending::Interrupt => handle.interrupt(),
            Ending::Complete => handle.complete(),
            // One frame long after the deadline: clamped progress, forced out.
            Ending::Stall => { handle.tick(now + Duration::from_secs(5)); }
            Ending::Frames => {
                let mut t = now;
                for _ in 0..200 {
                    t += Duration::from_millis(16);
                    handle.tick(t);
                }
            }
        }

        prop_assert!(handle.status().is_terminal());
        for (_, transform) in handle.transforms() {
            prop_assert_eq!(transform, Transform::IDENTITY);
        }
        for id in after.keys() {
            prop_assert!(handle.transform(id).is_identity());
        }
    }
}
