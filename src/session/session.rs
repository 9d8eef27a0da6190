//! Per-game session state.
//!
//! A `Session` is built fresh by every game start and owns everything that
//! must not leak between games: counters, the face-up set, and the handles
//! of the timers it scheduled.
//!
//! ```text
//! Idle ──start──▶ Running ──last pair matched──▶ Won
//!                    ▲                            │
//!                    └───────────start────────────┘
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::CardPosition;
use crate::timers::TimerHandle;

use super::event::WinEvent;

/// Lifecycle of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionPhase {
    /// No game dealt yet.
    #[default]
    Idle,
    /// Clock running, reveals accepted.
    Running,
    /// Every pair found. Clock stopped.
    Won,
}

/// Counters and pending work for one game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Session id. Timers scheduled by this session carry it.
    pub epoch: u64,

    /// Lifecycle phase.
    pub phase: SessionPhase,

    /// Completed two-card comparisons.
    pub moves: u32,

    /// Game-clock milliseconds, advanced by each tick.
    pub elapsed_ms: u64,

    /// Pairs found so far.
    pub matched_pairs: usize,

    /// Pairs in the deck.
    pub total_pairs: usize,

    /// Face-up cards that are not yet matched. Never more than two.
    pub revealed: SmallVec<[CardPosition; 2]>,

    /// Handle of the running game clock.
    pub clock: Option<TimerHandle>,

    /// Handle of the pending flip-back, while a mismatched pair is showing.
    pub pending_hide: Option<TimerHandle>,
}

impl Session {
    /// Start a running session.
    #[must_use]
    pub fn new(epoch: u64, total_pairs: usize) -> Self {
        Self {
            epoch,
            phase: SessionPhase::Running,
            total_pairs,
            ..Self::default()
        }
    }

    /// Is the game running?
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    /// Are two cards face-up and waiting?
    #[must_use]
    pub fn is_comparison_pending(&self) -> bool {
        self.revealed.len() >= 2
    }

    /// Have all pairs been found?
    #[must_use]
    pub fn all_pairs_found(&self) -> bool {
        self.total_pairs > 0 && self.matched_pairs == self.total_pairs
    }

    /// Count one completed comparison and return the new total.
    pub fn record_move(&mut self) -> u32 {
        self.moves += 1;
        self.moves
    }

    /// Whole seconds on the game clock.
    #[must_use]
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_ms / 1000
    }

    /// Advance the clock by `elapsed_ms` and return the whole seconds.
    pub fn tick(&mut self, elapsed_ms: u64) -> u64 {
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        self.elapsed_seconds()
    }

    /// Move to `Won`, returning the win payload.
    pub fn finish(&mut self) -> WinEvent {
        self.phase = SessionPhase::Won;
        self.clock = None;
        WinEvent {
            elapsed_seconds: self.elapsed_seconds(),
            moves: self.moves,
        }
    }

    /// Timer handles this session still owns.
    pub fn timer_handles(&self) -> impl Iterator<Item = TimerHandle> {
        self.clock.into_iter().chain(self.pending_hide)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timers::TimerId;

    #[test]
    fn test_default_is_idle() {
        let session = Session::default();
        assert_eq!(session.phase, SessionPhase::Idle);
        assert!(!session.is_running());
        assert!(!session.all_pairs_found());
    }

    #[test]
    fn test_new_session() {
        let session = Session::new(3, 6);
        assert_eq!(session.epoch, 3);
        assert!(session.is_running());
        assert_eq!(session.moves, 0);
        assert_eq!(session.elapsed_seconds(), 0);
        assert!(session.revealed.is_empty());
    }

    #[test]
    fn test_counters() {
        let mut session = Session::new(1, 2);
        assert_eq!(session.record_move(), 1);
        assert_eq!(session.record_move(), 2);
        assert_eq!(session.tick(1000), 1);
        assert_eq!(session.tick(500), 1);
        assert_eq!(session.tick(500), 2);
        assert_eq!(session.tick(u64::MAX), u64::MAX / 1000);

        session.matched_pairs = 2;
        assert!(session.all_pairs_found());
    }

    #[test]
    fn test_comparison_pending() {
        let mut session = Session::new(1, 2);
        session.revealed.push(CardPosition::new(0));
        assert!(!session.is_comparison_pending());
        session.revealed.push(CardPosition::new(1));
        assert!(session.is_comparison_pending());
    }

    #[test]
    fn test_finish() {
        let mut session = Session::new(1, 1);
        session.clock = Some(TimerHandle {
            id: TimerId(0),
            epoch: 1,
        });
        session.tick(1000);
        session.record_move();

        let win = session.finish();
        assert_eq!(win, WinEvent { elapsed_seconds: 1, moves: 1 });
        assert_eq!(session.phase, SessionPhase::Won);
        assert_eq!(session.clock, None);
    }

    #[test]
    fn test_timer_handles() {
        let mut session = Session::new(1, 1);
        assert_eq!(session.timer_handles().count(), 0);

        let clock = TimerHandle { id: TimerId(0), epoch: 1 };
        let hide = TimerHandle { id: TimerId(1), epoch: 1 };
        session.clock = Some(clock);
        session.pending_hide = Some(hide);

        let handles: Vec<_> = session.timer_handles().collect();
        assert_eq!(handles, vec![clock, hide]);
    }
}
