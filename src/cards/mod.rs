//! Cards and decks.
//!
//! - `Card`: a position, a token, and a flip status
//! - `Deck`: the ordered, shuffled collection of paired cards for one game

pub mod card;
pub mod deck;

pub use card::{Card, CardPosition, CardStatus};
pub use deck::Deck;
