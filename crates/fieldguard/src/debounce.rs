#![forbid(unsafe_code)]

//! Latest-wins call coalescing for interactive re-validation.
//!
//! A [`Debouncer`] owns one pending slot. Each call replaces whatever is in
//! the slot and pushes the deadline to `now + wait`; the slot fires once the
//! owner polls at or after the deadline. Superseded arguments are dropped.
//!
//! The owner drives time. A UI loop calls [`Debouncer::poll`] (or
//! [`Debounced::tick`]) every frame and can use
//! [`Debouncer::time_until_fire`] as its sleep timeout. The `*_at` variants
//! take an explicit instant so behavior is reproducible in tests.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use fieldguard::debounce::debounce;
//! use web_time::Instant;
//!
//! let mut seen = Vec::new();
//! let start = Instant::now();
//! let ms = |n| start + Duration::from_millis(n);
//!
//! let mut check = debounce(|value: String| seen.push(value), Duration::from_millis(50));
//! check.call_at("a".into(), ms(0));
//! check.call_at("ab".into(), ms(10));
//! check.call_at("abc".into(), ms(20));
//!
//! assert!(!check.tick_at(ms(69)));
//! assert!(check.tick_at(ms(70)));
//! drop(check);
//! assert_eq!(seen, vec!["abc".to_string()]);
//! ```
//!
//! # Invariants
//!
//! - At most one invocation is pending per debouncer.
//! - A pending invocation always carries the most recent arguments.
//! - An invocation never fires before `wait` has passed since the last call.

use std::fmt;
use std::time::Duration;

use web_time::Instant;

#[inline]
fn duration_since_or_zero(now: Instant, earlier: Instant) -> Duration {
    now.checked_duration_since(earlier)
        .unwrap_or(Duration::ZERO)
}

/// Counters for a debouncer's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebounceStats {
    /// Calls received.
    pub calls: u64,
    /// Pending invocations replaced by a newer call.
    pub superseded: u64,
    /// Invocations released by poll or flush.
    pub fired: u64,
    /// Pending invocations dropped by `cancel`.
    pub cancelled: u64,
}

struct Pending<A> {
    args: A,
    /// `None` when `now + wait` is not representable; such calls only leave by
    /// `flush` or `cancel`.
    deadline: Option<Instant>,
}

// ---------------------------------------------------------------------------
// Debouncer
// ---------------------------------------------------------------------------

/// A single pending-call slot with a quiet-period deadline.
pub struct Debouncer<A> {
    wait: Duration,
    pending: Option<Pending<A>>,
    stats: DebounceStats,
}

impl<A> fmt::Debug for Debouncer<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("wait", &self.wait)
            .field("deadline", &self.deadline())
            .field("stats", &self.stats)
            .finish()
    }
}

impl<A> Debouncer<A> {
    /// Create a debouncer that waits `wait` after the last call.
    #[must_use]
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: None,
            stats: DebounceStats::default(),
        }
    }

    /// The quiet period.
    #[must_use]
    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Schedule `args`, replacing any pending call.
    pub fn call(&mut self, args: A) {
        self.call_at(args, Instant::now());
    }

    /// Schedule `args` as of `now`, replacing any pending call.
    pub fn call_at(&mut self, args: A, now: Instant) {
        self.stats.calls += 1;
        let deadline = now.checked_add(self.wait);
        if self.pending.replace(Pending { args, deadline }).is_some() {
            self.stats.superseded += 1;
            tracing::trace!(superseded = self.stats.superseded, "debounced call superseded");
        }
    }

    /// Take the pending arguments if their deadline has passed.
    pub fn poll(&mut self) -> Option<A> {
        self.poll_at(Instant::now())
    }

    /// Take the pending arguments if their deadline is at or before `now`.
    pub fn poll_at(&mut self, now: Instant) -> Option<A> {
        let due = self
            .pending
            .as_ref()
            .and_then(|p| p.deadline)
            .is_some_and(|deadline| now >= deadline);
        if !due {
            return None;
        }
        let pending = self.pending.take()?;
        self.stats.fired += 1;
        tracing::trace!(fired = self.stats.fired, "debounced call fired");
        Some(pending.args)
    }

    /// Take the pending arguments regardless of the deadline.
    pub fn flush(&mut self) -> Option<A> {
        let pending = self.pending.take()?;
        self.stats.fired += 1;
        tracing::trace!(fired = self.stats.fired, "debounced call fired");
        Some(pending.args)
    }

    /// Drop the pending call without firing it, returning its arguments.
    pub fn cancel(&mut self) -> Option<A> {
        let pending = self.pending.take()?;
        self.stats.cancelled += 1;
        Some(pending.args)
    }

    /// Returns `true` if a call is waiting to fire.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending call becomes due.
    ///
    /// `None` if nothing is pending or the wait overflows the clock.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().and_then(|p| p.deadline)
    }

    /// Time left before the pending call is due, zero if already due.
    ///
    /// A pending call whose deadline overflowed reports `Duration::MAX`.
    #[must_use]
    pub fn time_until_fire(&self, now: Instant) -> Option<Duration> {
        self.pending.as_ref().map(|p| {
            p.deadline
                .map_or(Duration::MAX, |deadline| duration_since_or_zero(deadline, now))
        })
    }

    /// Lifetime counters.
    #[must_use]
    pub fn stats(&self) -> DebounceStats {
        self.stats
    }
}

// ---------------------------------------------------------------------------
// Debounced
// ---------------------------------------------------------------------------

/// A function paired with its own [`Debouncer`].
///
/// The function's return value is discarded.
pub struct Debounced<A, F> {
    slot: Debouncer<A>,
    f: F,
}

/// Wrap `f` so that bursts of calls run it once, with the last arguments,
/// after `wait` of quiet.
#[must_use]
pub fn debounce<A, F>(f: F, wait: Duration) -> Debounced<A, F>
where
    F: FnMut(A),
{
    Debounced {
        slot: Debouncer::new(wait),
        f,
    }
}

impl<A, F> fmt::Debug for Debounced<A, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debounced")
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}

impl<A, F> Debounced<A, F>
where
    F: FnMut(A),
{
    /// Schedule a call with `args`.
    pub fn call(&mut self, args: A) {
        self.slot.call(args);
    }

    /// Schedule a call with `args` as of `now`.
    pub fn call_at(&mut self, args: A, now: Instant) {
        self.slot.call_at(args, now);
    }

    /// Run the function if the pending call is due. Returns `true` if it ran.
    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    /// Run the function if the pending call is due at `now`.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        match self.slot.poll_at(now) {
            Some(args) => {
                (self.f)(args);
                true
            }
            None => false,
        }
    }

    /// Run the pending call immediately, if any.
    pub fn flush(&mut self) -> bool {
        match self.slot.flush() {
            Some(args) => {
                (self.f)(args);
                true
            }
            None => false,
        }
    }

    /// Drop the pending call without running it.
    pub fn cancel(&mut self) -> bool {
        self.slot.cancel().is_some()
    }

    /// Returns `true` if a call is waiting to run.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.slot.is_pending()
    }

    /// The underlying slot.
    #[must_use]
    pub fn debouncer(&self) -> &Debouncer<A> {
        &self.slot
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
