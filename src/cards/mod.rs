//! Cards and deck generation.
//!
//! - `Card`: one face on the board (id, symbol, status)
//! - `Deck`: the shuffled board, two cards per symbol

pub mod card;
pub mod deck;

pub use card::{Card, CardId, CardStatus, Symbol};
pub use deck::Deck;
