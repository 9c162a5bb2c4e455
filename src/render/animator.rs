//! Flip-style header animation.
//!
//! Words are laid out at their final position immediately; each animated
//! word then carries a transform that starts at `before - after` and decays
//! to identity:
//! - Hop: the word landing in the pinned slot descends, slides across,
//!   then ascends into place.
//! - Slide: straight interpolation for words that visibly moved.
//! - Settle: a short nudge and scale pulse for pile words that were
//!   reordered without moving.
//!
//! Progress is advanced by frame ticks with each step clamped to
//! `max_frame`, so a stalled frame loop slows the animation down instead of
//! skipping it. A wall-clock deadline of `duration + safety_buffer` forces
//! completion if frames stall for too long.

use std::f32::consts::PI;
use std::time::{Duration, Instant};

use crate::config::TimingConfig;
use crate::render::layout::Positions;

/// Visual offset applied on top of a word's laid-out box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub dx: f32,
    pub dy: f32,
    pub scale: f32,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        dx: 0.0,
        dy: 0.0,
        scale: 1.0,
    };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    /// Descend by `dip`, slide to zero x offset, ascend to zero y offset.
    Hop { from: (f32, f32), dip: f32 },
    /// Straight interpolation from `from` to zero.
    Slide { from: (f32, f32) },
    /// Nudge + scale pulse, no net movement.
    Settle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub id: String,
    pub motion: Motion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStatus {
    Running,
    Completed,
    Interrupted,
    TimedOut,
}

impl AnimationStatus {
    pub fn is_terminal(self) -> bool {
        self != AnimationStatus::Running
    }
}

/// Shape parameters copied out of the timing config at creation.
#[derive(Debug, Clone, Copy)]
struct Shape {
    hop_split: [f32; 3],
    nudge: f32,
    pulse: f32,
    max_frame: Duration,
}

/// A running (or finished) header animation.
///
/// Once terminal, every word reports [`Transform::IDENTITY`].
#[derive(Debug, Clone)]
pub struct AnimationHandle {
    tracks: Vec<Track>,
    duration: Duration,
    progress: Duration,
    started_at: Instant,
    last_tick: Instant,
    deadline: Instant,
    status: AnimationStatus,
    shape: Shape,
}

impl AnimationHandle {
    /// A handle that is already complete and animates nothing.
    pub fn resolved(now: Instant) -> Self {
        Self {
            tracks: Vec::new(),
            duration: Duration::ZERO,
            progress: Duration::ZERO,
            started_at: now,
            last_tick: now,
            deadline: now,
            status: AnimationStatus::Completed,
            shape: Shape {
                hop_split: [0.25, 0.5, 0.25],
                nudge: 0.0,
                pulse: 0.0,
                max_frame: Duration::ZERO,
            },
        }
    }

    pub fn status(&self) -> AnimationStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == AnimationStatus::Running
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Normalised progress in `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        if self.status.is_terminal() || self.duration.is_zero() {
            return 1.0;
        }
        (self.progress.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Advance to `now`.
    pub fn tick(&mut self, now: Instant) -> AnimationStatus {
        if self.status.is_terminal() {
            return self.status;
        }
        let step = now
            .saturating_duration_since(self.last_tick)
            .min(self.shape.max_frame);
        self.last_tick = self.last_tick.max(now);
        self.progress += step;

        if self.progress >= self.duration {
            self.status = AnimationStatus::Completed;
        } else if now >= self.deadline {
            log::warn!(
                "header animation stalled at {:.0}%, forcing completion",
                self.progress() * 100.0
            );
            self.status = AnimationStatus::TimedOut;
        }
        self.status
    }

    /// Stop immediately; every word snaps to its laid-out position.
    pub fn interrupt(&mut self) {
        if self.status == AnimationStatus::Running {
            log::debug!("header animation interrupted");
            self.status = AnimationStatus::Interrupted;
        }
    }

    /// Finish immediately as if the timeline had run out.
    pub fn complete(&mut self) {
        if self.status == AnimationStatus::Running {
            self.progress = self.duration;
            self.status = AnimationStatus::Completed;
        }
    }

    /// Current transform for word `id`.
    pub fn transform(&self, id: &str) -> Transform {
        if self.status.is_terminal() {
            return Transform::IDENTITY;
        }
        let t = self.progress();
        self.tracks
            .iter()
            .find(|track| track.id == id)
            .map(|track| self.sample(track.motion, t))
            .unwrap_or(Transform::IDENTITY)
    }

    /// Transforms of every animated word.
    pub fn transforms(&self) -> Vec<(&str, Transform)> {
        self.tracks
            .iter()
            .map(|track| (track.id.as_str(), self.transform(&track.id)))
            .collect()
    }

    fn sample(&self, motion: Motion, t: f32) -> Transform {
        match motion {
            Motion::Hop { from, dip } => {
                let [descend, slide, _] = self.shape.hop_split;
                let (fx, fy) = from;
                if t < descend {
                    let p = ease_in_out(segment(t, 0.0, descend));
                    Transform {
                        dx: fx,
                        dy: fy + dip * p,
                        scale: 1.0,
                    }
                } else if t < descend + slide {
                    let p = ease_in_out(segment(t, descend, descend + slide));
                    Transform {
                        dx: fx * (1.0 - p),
                        dy: fy + dip,
                        scale: 1.0,
                    }
                } else {
                    let p = ease_out_back(segment(t, descend + slide, 1.0));
                    Transform {
                        dx: 0.0,
                        dy: (fy + dip) * (1.0 - p),
                        scale: 1.0,
                    }
                }
            }
            Motion::Slide { from: (fx, fy) } => {
                let p = ease_in_out(t);
                Transform {
                    dx: fx * (1.0 - p),
                    dy: fy * (1.0 - p),
                    scale: 1.0,
                }
            }
            Motion::Settle => {
                let pulse = (PI * t).sin();
                Transform {
                    dx: self.shape.nudge * pulse,
                    dy: 0.0,
                    scale: 1.0 + self.shape.pulse * pulse,
                }
            }
        }
    }
}

/// Position of `t` within `[start, end]`, as a fraction.
fn segment(t: f32, start: f32, end: f32) -> f32 {
    let len = end - start;
    if len <= f32::EPSILON {
        return 1.0;
    }
    ((t - start) / len).clamp(0.0, 1.0)
}

/// power1.inOut
fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Slight overshoot on landing.
fn ease_out_back(t: f32) -> f32 {
    const C1: f32 = 1.70158;
    const C3: f32 = C1 + 1.0;
    1.0 + C3 * (t - 1.0).powi(3) + C1 * (t - 1.0).powi(2)
}

/// Builds animation handles from before/after layouts.
#[derive(Debug, Clone)]
pub struct SwapAnimator {
    timing: TimingConfig,
}

impl SwapAnimator {
    pub fn new(timing: TimingConfig) -> Self {
        Self { timing }
    }

    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    /// Start animating every word in `after` from its `before` box.
    ///
    /// `landing` names the word entering the pinned slot; if it is given but
    /// absent from `after`, nothing is animated and an already-resolved
    /// handle is returned. Words without a before box appear in place.
    pub fn animate_swap(
        &self,
        before: &Positions,
        after: &Positions,
        landing: Option<&str>,
        now: Instant,
    ) -> AnimationHandle {
        if let Some(id) = landing {
            if !after.contains_key(id) {
                log::warn!("swap target {id:?} is not laid out, skipping animation");
                return AnimationHandle::resolved(now);
            }
        }

        let epsilon = self.timing.move_epsilon_px;
        let mut ids: Vec<&String> = after.keys().collect();
        ids.sort();
        let tracks: Vec<Track> = ids
            .into_iter()
            .filter_map(|id| {
                let to = after.get(id)?;
                let from = before.get(id)?;
                let (dx, dy) = from.delta_from(to);
                let motion = if landing == Some(id.as_str()) {
                    Motion::Hop {
                        from: (dx, dy),
                        dip: to.height * self.timing.dip_factor,
                    }
                } else if dx.hypot(dy) > epsilon {
                    Motion::Slide { from: (dx, dy) }
                } else {
                    Motion::Settle
                };
                Some(Track {
                    id: id.clone(),
                    motion,
                })
            })
            .collect();

        let duration = if landing.is_some() {
            self.timing.swap()
        } else {
            self.timing.header()
        };
        if tracks.is_empty() {
            return AnimationHandle::resolved(now);
        }

        AnimationHandle {
            tracks,
            duration,
            progress: Duration::ZERO,
            started_at: now,
            last_tick: now,
            deadline: now + duration + self.timing.safety_buffer(),
            status: AnimationStatus::Running,
            shape: Shape {
                hop_split: self.timing.hop_split,
                nudge: self.timing.settle_nudge_px,
                pulse: self.timing.settle_scale,
                max_frame: self.timing.max_frame(),
            },
        }
    }
}
