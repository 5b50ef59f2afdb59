//! Card identity and face state.

use serde::{Deserialize, Serialize};

/// Identifier of a card: its stable position in the deal.
///
/// Ids run `0..deck.len()` and never change while the deck is in play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Position of the card in the deck.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for CardId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// The face of a card. Two cards match when their symbols are equal.
///
/// Symbols are opaque names; the view decides how to draw them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Symbol {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a card is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardStatus {
    /// Face down, can be selected.
    #[default]
    Hidden,
    /// Face up, waiting to be compared or flipped back.
    Selected,
    /// Part of a found pair. Stays face up for the rest of the session.
    Matched,
}

/// A card on the board.
///
/// `status` is the only field that changes after the deal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub symbol: Symbol,
    pub status: CardStatus,
}

impl Card {
    /// Create a face-down card.
    #[must_use]
    pub fn new(id: CardId, symbol: Symbol) -> Self {
        Self {
            id,
            symbol,
            status: CardStatus::Hidden,
        }
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.status == CardStatus::Hidden
    }

    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.status == CardStatus::Selected
    }

    #[must_use]
    pub fn is_matched(&self) -> bool {
        self.status == CardStatus::Matched
    }

    /// Does this card pair with `other`?
    #[must_use]
    pub fn matches(&self, other: &Card) -> bool {
        self.id != other.id && self.symbol == other.symbol
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(5);
        assert_eq!(id.raw(), 5);
        assert_eq!(id.index(), 5);
        assert_eq!(CardId::from(5), id);
        assert_eq!(format!("{}", id), "Card(5)");
    }

    #[test]
    fn test_new_card_is_hidden() {
        let card = Card::new(CardId::new(0), Symbol::new("bolt"));
        assert!(card.is_hidden());
        assert!(!card.is_selected());
        assert!(!card.is_matched());
    }

    #[test]
    fn test_matches() {
        let a = Card::new(CardId::new(0), Symbol::new("bolt"));
        let b = Card::new(CardId::new(1), Symbol::new("bolt"));
        let c = Card::new(CardId::new(2), Symbol::new("leaf"));

        assert!(a.matches(&b));
        assert!(!a.matches(&c));
        // A card never pairs with itself
        assert!(!a.matches(&a));
    }

    #[test]
    fn test_symbol_serializes_as_string() {
        let json = serde_json::to_string(&Symbol::new("cube")).unwrap();
        assert_eq!(json, "\"cube\"");

        let card = Card::new(CardId::new(3), Symbol::new("cube"));
        let json = serde_json::to_string(&card).unwrap();
        let deserialized: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, deserialized);
    }
}
