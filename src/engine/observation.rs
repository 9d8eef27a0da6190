//! Board encoding for agents.
//!
//! Transforms the deck into a flat `f32` tensor of shape
//! `[cards, 3 + tokens]`. Each row holds:
//!
//! - a one-hot of the card's status (hidden, revealed, matched)
//! - a one-hot of the card's token, set only while the card is face-up
//!
//! Face-down tokens are never encoded, so an agent sees exactly what a
//! player sees.

use crate::cards::Deck;
use crate::core::Token;

/// Width of the status one-hot.
pub const STATUS_FEATURES: usize = 3;

/// Encodes a deck from the player's point of view.
#[derive(Clone, Debug, Default)]
pub struct ObservationEncoder {
    /// Sorted, distinct tokens. Index = token feature column.
    tokens: Vec<Token>,
}

impl ObservationEncoder {
    /// Build an encoder whose token columns cover `deck`.
    ///
    /// Columns are in sorted token order, so they do not depend on the
    /// shuffle.
    #[must_use]
    pub fn for_deck(deck: &Deck) -> Self {
        let mut tokens = deck.layout();
        tokens.sort();
        tokens.dedup();
        Self { tokens }
    }

    /// Features per card.
    #[must_use]
    pub fn features_per_card(&self) -> usize {
        STATUS_FEATURES + self.tokens.len()
    }

    /// Tensor shape for `deck`.
    #[must_use]
    pub fn output_shape(&self, deck: &Deck) -> [usize; 2] {
        [deck.len(), self.features_per_card()]
    }

    /// Encode `deck` as a row-major flat vector.
    #[must_use]
    pub fn encode(&self, deck: &Deck) -> Vec<f32> {
        let width = self.features_per_card();
        let mut tensor = vec![0.0; deck.len() * width];

        for (row, card) in deck.iter().enumerate() {
            let base = row * width;
            tensor[base + card.status.ordinal()] = 1.0;

            if let Some(token) = card.visible_token() {
                if let Ok(column) = self.tokens.binary_search(token) {
                    tensor[base + STATUS_FEATURES + column] = 1.0;
                }
            }
        }

        tensor
    }
}
