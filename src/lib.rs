//! # memory-match
//!
//! A headless engine for the memory-matching card game: shuffle a deck of
//! pairs, flip two cards at a time, keep the ones that match, and finish
//! when every pair is found.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: A seed fixes every deal, and time only moves when
//!    the host calls `advance`. The same inputs always replay the same game.
//!
//! 2. **Owned Sessions**: Every game start builds a fresh `Session`. Timers
//!    are stamped with the session that scheduled them and cancelled on
//!    restart, so nothing from an old game can touch a new one.
//!
//! 3. **Permissive Input**: Invalid reveals are no-ops. Callers who want to
//!    know why can use `try_reveal_card`.
//!
//! ## Modules
//!
//! - `core`: Tokens, RNG, configuration, errors
//! - `cards`: Cards and decks
//! - `timers`: Cancellable virtual-time scheduler
//! - `session`: Session lifecycle and engine events
//! - `engine`: The match engine, snapshots, observations
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use memory_match::{MatchEngine, TokenSet};
//!
//! let mut engine = MatchEngine::with_seed(42);
//! engine.start_game(&TokenSet::classic());
//! assert_eq!(engine.deck().len(), 12);
//!
//! engine.advance(Duration::from_secs(3));
//! assert_eq!(engine.elapsed_seconds(), 3);
//! ```

pub mod core;
pub mod cards;
pub mod timers;
pub mod session;
pub mod engine;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    DeckRng, DeckRngState,
    EngineConfig, ConfigError,
    Token, TokenSet, TokenSetError,
    EngineError, SnapshotError,
};

pub use crate::cards::{Card, CardPosition, CardStatus, Deck};

pub use crate::timers::{Scheduler, TimerHandle, TimerId, FiredTimer};

pub use crate::session::{Session, SessionPhase, EngineEvent, WinEvent};

pub use crate::engine::{
    MatchEngine, RevealOutcome, EngineTimer,
    EngineSnapshot, ObservationEncoder,
};
