use std::time::{Duration, Instant};

/// Metadata of an engaged lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockInfo {
    pub reason: String,
    pub engaged_at: Instant,
}

/// The single coordinator lock serializing transition sequences.
///
/// Acquisition is a test-and-set: it fails immediately when the lock is
/// held, so overlapping intents are dropped rather than queued. A lock older
/// than the staleness ceiling is force-released on the next acquisition
/// attempt or [`TransitionLock::release_if_stale`] call.
#[derive(Debug, Clone)]
pub struct TransitionLock {
    held: Option<LockInfo>,
    ceiling: Duration,
}

impl TransitionLock {
    pub fn new(ceiling: Duration) -> Self {
        Self {
            held: None,
            ceiling,
        }
    }

    pub fn is_engaged(&self) -> bool {
        self.held.is_some()
    }

    pub fn info(&self) -> Option<&LockInfo> {
        self.held.as_ref()
    }

    pub fn reason(&self) -> Option<&str> {
        self.held.as_ref().map(|h| h.reason.as_str())
    }

    pub fn age(&self, now: Instant) -> Option<Duration> {
        self.held
            .as_ref()
            .map(|h| now.saturating_duration_since(h.engaged_at))
    }

    pub fn is_stale(&self, now: Instant) -> bool {
        self.age(now).is_some_and(|age| age > self.ceiling)
    }

    /// Engage the lock. Returns `false` if it is already held and not stale.
    pub fn try_acquire(&mut self, reason: impl Into<String>, now: Instant) -> bool {
        self.release_if_stale(now);
        if let Some(held) = &self.held {
            log::debug!("lock already engaged: {}", held.reason);
            return false;
        }
        let reason = reason.into();
        log::debug!("lock engaged: {reason}");
        self.held = Some(LockInfo {
            reason,
            engaged_at: now,
        });
        true
    }

    pub fn release(&mut self, now: Instant) {
        match self.held.take() {
            Some(held) => log::debug!(
                "lock released after {}ms ({})",
                now.saturating_duration_since(held.engaged_at).as_millis(),
                held.reason
            ),
            None => log::debug!("lock already released"),
        }
    }

    /// Force-release a lock held past the ceiling. Returns whether it did.
    pub fn release_if_stale(&mut self, now: Instant) -> bool {
        if !self.is_stale(now) {
            return false;
        }
        if let Some(held) = self.held.take() {
            log::warn!(
                "stale lock force-released after {}ms: {}",
                now.saturating_duration_since(held.engaged_at).as_millis(),
                held.reason
            );
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_fails_while_held() {
        let mut lock = TransitionLock::new(Duration::from_secs(10));
        let now = Instant::now();
        assert!(lock.try_acquire("click about", now));
        assert!(!lock.try_acquire("click contact", now));
        assert_eq!(lock.reason(), Some("click about"));
        lock.release(now);
        assert!(lock.try_acquire("click contact", now));
    }

    #[test]
    fn stale_lock_is_force_released_on_acquire() {
        let mut lock = TransitionLock::new(Duration::from_secs(10));
        let now = Instant::now();
        assert!(lock.try_acquire("stuck", now));
        assert!(!lock.try_acquire("early", now + Duration::from_secs(5)));
        assert!(lock.try_acquire("late", now + Duration::from_secs(11)));
        assert_eq!(lock.reason(), Some("late"));
    }

    #[test]
    fn release_if_stale_only_fires_past_ceiling() {
        let mut lock = TransitionLock::new(Duration::from_millis(100));
        let now = Instant::now();
        lock.try_acquire("x", now);
        assert!(!lock.release_if_stale(now + Duration::from_millis(100)));
        assert!(lock.is_engaged());
        assert!(lock.release_if_stale(now + Duration::from_millis(101)));
        assert!(!lock.is_engaged());
    }
}
