//! The dealt deck: an ordered sequence of paired cards.
//!
//! A deck built from N tokens holds 2N cards, exactly two per token.
//! Only the order changes between deals; the multiset of tokens never does.
//!
//! Cards live in an `im::Vector`, so cloning a deck for a snapshot is O(1).

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::card::{Card, CardPosition, CardStatus};
use crate::core::{DeckRng, Token, TokenSet, TokenSetError};

/// An ordered deck of paired cards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vector<Card>,
}

impl Deck {
    /// Deal a fresh, shuffled deck with two face-down cards per token.
    pub fn deal(tokens: &TokenSet, rng: &mut DeckRng) -> Self {
        let mut faces: Vec<Token> = tokens
            .iter()
            .flat_map(|token| [token.clone(), token.clone()])
            .collect();

        rng.shuffle(&mut faces);

        Self::from_faces(faces)
    }

    /// Build a deck in a fixed order.
    ///
    /// Every token must appear exactly twice. Useful for replays and for
    /// hosts that shuffle on their own.
    pub fn from_layout<I, T>(layout: I) -> Result<Self, TokenSetError>
    where
        I: IntoIterator<Item = T>,
        T: Into<Token>,
    {
        let faces: Vec<Token> = layout.into_iter().map(Into::into).collect();
        if faces.is_empty() {
            return Err(TokenSetError::Empty);
        }

        if let Some((token, count)) = first_unpaired(&faces) {
            return Err(TokenSetError::UnpairedToken { token, count });
        }

        Ok(Self::from_faces(faces))
    }

    fn from_faces(faces: Vec<Token>) -> Self {
        let cards = faces
            .into_iter()
            .enumerate()
            .map(|(index, token)| Card::new(CardPosition::new(index), token))
            .collect();
        Self { cards }
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Is the deck empty (no game dealt yet)?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of pairs in the deck.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.cards.len() / 2
    }

    /// Get a card by position.
    #[must_use]
    pub fn get(&self, position: CardPosition) -> Option<&Card> {
        self.cards.get(position.index())
    }

    /// Change a card's status. Returns false if the position is out of range.
    pub fn set_status(&mut self, position: CardPosition, status: CardStatus) -> bool {
        match self.cards.get_mut(position.index()) {
            Some(card) => {
                card.status = status;
                true
            }
            None => false,
        }
    }

    /// Iterate over cards in deck order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Status of every card, in deck order.
    #[must_use]
    pub fn statuses(&self) -> Vec<CardStatus> {
        self.cards.iter().map(|card| card.status).collect()
    }

    /// Tokens in deck order.
    #[must_use]
    pub fn layout(&self) -> Vec<Token> {
        self.cards.iter().map(|card| card.token.clone()).collect()
    }

    /// How many cards carry each token.
    #[must_use]
    pub fn pair_counts(&self) -> FxHashMap<Token, usize> {
        let mut counts = FxHashMap::default();
        for card in &self.cards {
            *counts.entry(card.token.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Count cards in the given status.
    #[must_use]
    pub fn count_status(&self, status: CardStatus) -> usize {
        self.cards.iter().filter(|card| card.status == status).count()
    }
}

/// First token, in layout order, that does not appear exactly twice.
fn first_unpaired(faces: &[Token]) -> Option<(Token, usize)> {
    let mut counts: FxHashMap<&Token, usize> = FxHashMap::default();
    for face in faces {
        *counts.entry(face).or_insert(0) += 1;
    }
    faces.iter().find_map(|face| {
        let count = counts.get(face).copied().unwrap_or(0);
        (count != 2).then(|| (face.clone(), count))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(labels: &[&str]) -> TokenSet {
        TokenSet::new(labels.iter().copied()).unwrap()
    }

    #[test]
    fn test_deal_has_two_of_each() {
        let set = tokens(&["a", "b", "c", "d"]);
        let mut rng = DeckRng::new(42);
        let deck = Deck::deal(&set, &mut rng);

        assert_eq!(deck.len(), 8);
        assert_eq!(deck.pair_count(), 4);

        let counts = deck.pair_counts();
        assert_eq!(counts.len(), 4);
        assert!(counts.values().all(|&n| n == 2));
    }

    #[test]
    fn test_deal_starts_hidden_with_sequential_positions() {
        let mut rng = DeckRng::new(1);
        let deck = Deck::deal(&TokenSet::classic(), &mut rng);

        for (index, card) in deck.iter().enumerate() {
            assert_eq!(card.position, CardPosition::new(index));
            assert_eq!(card.status, CardStatus::Hidden);
        }
        assert_eq!(deck.count_status(CardStatus::Hidden), 12);
    }

    #[test]
    fn test_deal_is_deterministic() {
        let set = TokenSet::classic();
        let deck1 = Deck::deal(&set, &mut DeckRng::new(5));
        let deck2 = Deck::deal(&set, &mut DeckRng::new(5));
        assert_eq!(deck1.layout(), deck2.layout());
    }

    #[test]
    fn test_successive_deals_differ() {
        let set = TokenSet::classic();
        let mut rng = DeckRng::new(5);
        let first = Deck::deal(&set, &mut rng);
        let second = Deck::deal(&set, &mut rng);
        assert_ne!(first.layout(), second.layout());
    }

    #[test]
    fn test_from_layout() {
        let deck = Deck::from_layout(["a", "a", "b", "b"]).unwrap();
        assert_eq!(deck.len(), 4);
        assert_eq!(deck.get(CardPosition::new(2)).unwrap().token, Token::from("b"));
        assert!(deck.get(CardPosition::new(4)).is_none());
    }

    #[test]
    fn test_from_layout_rejects_unpaired() {
        assert_eq!(
            Deck::from_layout(["a", "b", "b"]),
            Err(TokenSetError::UnpairedToken {
                token: Token::from("a"),
                count: 1
            })
        );
        assert_eq!(
            Deck::from_layout(["a", "a", "a", "a"]),
            Err(TokenSetError::UnpairedToken {
                token: Token::from("a"),
                count: 4
            })
        );
        let empty: [&str; 0] = [];
        assert_eq!(Deck::from_layout(empty), Err(TokenSetError::Empty));
    }

    #[test]
    fn test_set_status() {
        let mut deck = Deck::from_layout(["a", "a"]).unwrap();
        assert_eq!(deck.count_status(CardStatus::Matched), 0);

        assert!(deck.set_status(CardPosition::new(0), CardStatus::Matched));
        assert_eq!(deck.count_status(CardStatus::Matched), 1);
        assert!(deck.set_status(CardPosition::new(1), CardStatus::Matched));
        assert_eq!(deck.count_status(CardStatus::Hidden), 0);

        assert!(!deck.set_status(CardPosition::new(9), CardStatus::Hidden));
    }

    #[test]
    fn test_empty_deck() {
        let deck = Deck::default();
        assert!(deck.is_empty());
        assert_eq!(deck.pair_count(), 0);
        assert!(deck.get(CardPosition::new(0)).is_none());
    }

    #[test]
    fn test_clone_is_independent() {
        let mut deck = Deck::from_layout(["a", "a"]).unwrap();
        let snapshot = deck.clone();

        deck.set_status(CardPosition::new(0), CardStatus::Revealed);

        assert_eq!(snapshot.statuses(), vec![CardStatus::Hidden, CardStatus::Hidden]);
        assert_eq!(deck.statuses(), vec![CardStatus::Revealed, CardStatus::Hidden]);
    }
}
