//! Cancellable timers over a virtual clock.
//!
//! The engine keeps two kinds of timer: the one-second game clock and
//! the delayed flip-back of a mismatched pair. Both go through a
//! [`Scheduler`] so a restart can cancel them by handle.

pub mod scheduler;

pub use scheduler::{FiredTimer, Scheduler, TimerHandle, TimerId};
