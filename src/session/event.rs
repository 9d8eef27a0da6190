//! Events the engine emits for renderers, status bars and notifications.
//!
//! Events queue up inside the engine in the order they happen and are
//! handed out by `MatchEngine::drain_events`.

use serde::{Deserialize, Serialize};

use crate::cards::CardPosition;

/// Terminal event of a session: every pair was found.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinEvent {
    /// Whole seconds on the clock when the last pair matched.
    pub elapsed_seconds: u64,
    /// Completed comparisons, including the winning one.
    pub moves: u32,
}

impl std::fmt::Display for WinEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "You win! Time: {} seconds, Moves: {}",
            self.elapsed_seconds, self.moves
        )
    }
}

/// Something observable that happened in the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// A new deck was dealt and the clock started.
    GameStarted { total_pairs: usize },

    /// The clock advanced one second.
    Tick { elapsed_seconds: u64 },

    /// A card turned face-up.
    CardRevealed { position: CardPosition },

    /// Two face-up cards shared a token and are now matched.
    PairMatched {
        first: CardPosition,
        second: CardPosition,
        moves: u32,
    },

    /// Two face-up cards differed. They flip back after the mismatch delay.
    PairMismatched {
        first: CardPosition,
        second: CardPosition,
        moves: u32,
    },

    /// A mismatched pair turned face-down again.
    PairHidden {
        first: CardPosition,
        second: CardPosition,
    },

    /// All pairs found. Emitted once per session.
    Won(WinEvent),
}

impl EngineEvent {
    /// The win payload, if this is a win.
    #[must_use]
    pub fn as_win(&self) -> Option<WinEvent> {
        match self {
            EngineEvent::Won(win) => Some(*win),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_win_message() {
        let win = WinEvent {
            elapsed_seconds: 42,
            moves: 9,
        };
        assert_eq!(win.to_string(), "You win! Time: 42 seconds, Moves: 9");
    }

    #[test]
    fn test_as_win() {
        let win = WinEvent {
            elapsed_seconds: 1,
            moves: 1,
        };
        assert_eq!(EngineEvent::Won(win).as_win(), Some(win));
        assert_eq!(EngineEvent::Tick { elapsed_seconds: 1 }.as_win(), None);
    }

    #[test]
    fn test_event_serde() {
        let event = EngineEvent::PairMismatched {
            first: CardPosition::new(0),
            second: CardPosition::new(3),
            moves: 1,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: EngineEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
