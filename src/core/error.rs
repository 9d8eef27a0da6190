//! Reasons the engine refuses an operation.

use thiserror::Error;

use crate::cards::CardPosition;

/// Why a reveal was refused.
///
/// `MatchEngine::reveal_card` treats all of these as no-ops;
/// `MatchEngine::try_reveal_card` hands them back to the caller.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("no game has been started")]
    NoActiveSession,

    #[error("the game is already won")]
    SessionFinished,

    #[error("cannot start a game with an empty deck")]
    EmptyDeck,

    #[error("{position} is outside a deck of {len} cards")]
    PositionOutOfRange { position: CardPosition, len: usize },

    #[error("{0} is already face-up")]
    CardAlreadyRevealed(CardPosition),

    #[error("{0} is already matched")]
    CardAlreadyMatched(CardPosition),

    #[error("two cards are already waiting to be compared")]
    ComparisonPending,
}

/// Snapshot encoding errors.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] bincode::Error),

    #[error("failed to decode snapshot: {0}")]
    Decode(#[source] bincode::Error),
}
