//! Card instances and their flip state.
//!
//! Every card moves through a small state machine:
//!
//! ```text
//! Hidden ──reveal──▶ Revealed ──match──▶ Matched (terminal)
//!    ▲                   │
//!    └────mismatch delay─┘
//! ```

use serde::{Deserialize, Serialize};

use crate::core::Token;

/// Position of a card in the dealt deck. Doubles as the card's identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardPosition(pub usize);

impl CardPosition {
    /// Create a new card position.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for CardPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

impl From<usize> for CardPosition {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// Where a card is in its flip lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardStatus {
    /// Face-down, can be revealed.
    #[default]
    Hidden,
    /// Face-up and waiting to be compared.
    Revealed,
    /// Paired with its twin. Never changes again.
    Matched,
}

impl CardStatus {
    /// Is the card's face visible to the player?
    #[must_use]
    pub const fn is_face_up(self) -> bool {
        matches!(self, Self::Revealed | Self::Matched)
    }

    /// Stable index for encoders.
    #[must_use]
    pub const fn ordinal(self) -> usize {
        match self {
            Self::Hidden => 0,
            Self::Revealed => 1,
            Self::Matched => 2,
        }
    }
}

/// A card in a dealt deck.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Position in the deck.
    pub position: CardPosition,

    /// The face this card shares with exactly one other card.
    pub token: Token,

    /// Current flip state.
    pub status: CardStatus,
}

impl Card {
    /// Create a face-down card.
    pub fn new(position: CardPosition, token: Token) -> Self {
        Self {
            position,
            token,
            status: CardStatus::Hidden,
        }
    }

    /// The token, but only while the card is face-up.
    #[must_use]
    pub fn visible_token(&self) -> Option<&Token> {
        self.status.is_face_up().then_some(&self.token)
    }
}
