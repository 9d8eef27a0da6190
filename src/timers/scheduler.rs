//! Virtual-time timer queue with cancellable handles.
//!
//! The scheduler never reads a wall clock. Time only moves when the host
//! calls [`Scheduler::pop_due`] with a target instant, which makes every
//! timer firing reproducible in tests.
//!
//! ## Ordering
//!
//! Due timers fire in `(deadline, id)` order: earliest first, and timers
//! sharing a deadline fire in the order they were scheduled. A repeating
//! timer keeps its id across firings.
//!
//! A repeating timer that falls several periods behind catches up in one
//! firing, as long as no other timer is due in between. The firing reports
//! how many periods it covers in [`FiredTimer::periods`]. A repeating timer
//! whose next deadline would overflow `u64` is retired.
//!
//! ```
//! use memory_match::timers::Scheduler;
//!
//! let mut scheduler: Scheduler<&str> = Scheduler::new();
//! let tick = scheduler.schedule_repeating(1, 1000, "tick");
//! let once = scheduler.schedule_once(1, 1500, "once");
//!
//! let fired: Vec<_> = std::iter::from_fn(|| scheduler.pop_due(2500))
//!     .map(|timer| (timer.kind, timer.periods))
//!     .collect();
//! assert_eq!(fired, vec![("tick", 1), ("once", 1), ("tick", 1)]);
//!
//! scheduler.cancel(tick);
//! assert!(!scheduler.is_pending(tick));
//! assert!(!scheduler.is_pending(once));
//! ```

use serde::{Deserialize, Serialize};

/// Unique timer identifier within one scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(pub u64);

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timer({})", self.0)
    }
}

/// Handle returned when scheduling. Needed to cancel the timer.
///
/// The `epoch` stamps which session scheduled the timer, so a firing can be
/// checked against the session that is current when it arrives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerHandle {
    pub id: TimerId,
    pub epoch: u64,
}

/// A timer that came due.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FiredTimer<K> {
    pub handle: TimerHandle,
    pub kind: K,
    /// Virtual instant (ms) of the last period this firing covers.
    pub deadline_ms: u64,
    /// Periods covered. Always 1 for one-shot timers.
    pub periods: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct PendingTimer<K> {
    handle: TimerHandle,
    kind: K,
    deadline_ms: u64,
    period_ms: Option<u64>,
}

/// Cancellable one-shot and repeating timers over a virtual clock.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheduler<K> {
    now_ms: u64,
    next_id: u64,
    pending: Vec<PendingTimer<K>>,
}

impl<K> Default for Scheduler<K> {
    fn default() -> Self {
        Self {
            now_ms: 0,
            next_id: 0,
            pending: Vec::new(),
        }
    }
}

impl<K: Clone> Scheduler<K> {
    /// Create an empty scheduler at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Fire once, `delay_ms` from now.
    pub fn schedule_once(&mut self, epoch: u64, delay_ms: u64, kind: K) -> TimerHandle {
        self.insert(epoch, delay_ms, None, kind)
    }

    /// Fire every `period_ms` until cancelled. A zero period is treated as 1ms.
    pub fn schedule_repeating(&mut self, epoch: u64, period_ms: u64, kind: K) -> TimerHandle {
        let period_ms = period_ms.max(1);
        self.insert(epoch, period_ms, Some(period_ms), kind)
    }

    fn insert(&mut self, epoch: u64, delay_ms: u64, period_ms: Option<u64>, kind: K) -> TimerHandle {
        let handle = TimerHandle {
            id: TimerId(self.next_id),
            epoch,
        };
        self.next_id += 1;
        self.pending.push(PendingTimer {
            handle,
            kind,
            deadline_ms: self.now_ms.saturating_add(delay_ms),
            period_ms,
        });
        handle
    }

    /// Cancel a timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|timer| timer.handle != handle);
        self.pending.len() != before
    }

    /// Cancel every timer stamped with `epoch`. Returns how many were removed.
    pub fn cancel_epoch(&mut self, epoch: u64) -> usize {
        let before = self.pending.len();
        self.pending.retain(|timer| timer.handle.epoch != epoch);
        before - self.pending.len()
    }

    /// Is the timer still waiting to fire?
    #[must_use]
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|timer| timer.handle == handle)
    }

    /// Number of pending timers.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// The earliest pending deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.pending.iter().map(|timer| timer.deadline_ms).min()
    }

    /// Pop the next timer due at or before `until_ms`.
    ///
    /// Moves the clock to that timer's deadline. Repeating timers are
    /// re-armed after the last period covered. Returns `None` once nothing
    /// else is due, after moving the clock to `until_ms`.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<FiredTimer<K>> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.deadline_ms <= until_ms)
            .min_by_key(|(_, timer)| (timer.deadline_ms, timer.handle.id))
            .map(|(index, _)| index);

        let Some(index) = index else {
            self.now_ms = self.now_ms.max(until_ms);
            return None;
        };

        let deadline_ms = self.pending[index].deadline_ms;
        let Some(period) = self.pending[index].period_ms.map(|period| period.max(1)) else {
            self.now_ms = self.now_ms.max(deadline_ms);
            let timer = self.pending.swap_remove(index);
            return Some(FiredTimer {
                handle: timer.handle,
                kind: timer.kind,
                deadline_ms,
                periods: 1,
            });
        };

        // Catch up without overtaking any other pending timer.
        let limit = self
            .pending
            .iter()
            .enumerate()
            .filter(|(other, _)| *other != index)
            .map(|(_, timer)| timer.deadline_ms.saturating_sub(1))
            .min()
            .map_or(until_ms, |next| next.min(until_ms));
        let periods = limit.saturating_sub(deadline_ms) / period + 1;
        let last_ms = deadline_ms + (periods - 1) * period;
        self.now_ms = self.now_ms.max(last_ms);

        let timer = &self.pending[index];
        let fired = FiredTimer {
            handle: timer.handle,
            kind: timer.kind.clone(),
            deadline_ms: last_ms,
            periods,
        };

        match last_ms.checked_add(period) {
            Some(next) => self.pending[index].deadline_ms = next,
            None => {
                self.pending.swap_remove(index);
            }
        }

        Some(fired)
    }
}
