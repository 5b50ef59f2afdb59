//! Deck generation.
//!
//! A deck holds exactly two cards per symbol, laid out in a uniformly
//! random order. Card ids are positions in that order.
//!
//! ```
//! use rust_concentration::cards::{Deck, Symbol};
//! use rust_concentration::core::GameRng;
//!
//! let symbols: Vec<Symbol> = ["bolt", "leaf", "cube"].into_iter().map(Symbol::new).collect();
//! let deck = Deck::build(&symbols, &mut GameRng::new(42)).unwrap();
//!
//! assert_eq!(deck.len(), 6);
//! assert_eq!(deck.pair_count(), 3);
//! ```

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::card::{Card, CardId, CardStatus, Symbol};
use crate::core::config::validate_symbols;
use crate::core::error::{GameError, Result};
use crate::core::GameRng;

/// The cards of one deal, in board order.
///
/// Backed by `im::Vector` so handing snapshots to the view is O(1).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vector<Card>,
}

impl Deck {
    /// Deal two cards per symbol in a uniformly random order.
    ///
    /// Fails with `InvalidConfig` when `symbols` is empty or has duplicates.
    pub fn build(symbols: &[Symbol], rng: &mut GameRng) -> Result<Self> {
        validate_symbols(symbols)?;

        let mut faces: Vec<Symbol> = symbols
            .iter()
            .flat_map(|symbol| [symbol.clone(), symbol.clone()])
            .collect();
        rng.shuffle(&mut faces);

        Ok(Self::from_faces(faces))
    }

    /// Lay out a deck in a fixed order.
    ///
    /// Every symbol must appear exactly twice. Useful for tutorials and for
    /// replaying a known board.
    pub fn arranged<I, S>(layout: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        let faces: Vec<Symbol> = layout.into_iter().map(Into::into).collect();
        if faces.is_empty() {
            return Err(GameError::config("a deck needs at least one pair"));
        }

        let mut counts: FxHashMap<&Symbol, usize> = FxHashMap::default();
        for face in &faces {
            if face.as_str().is_empty() {
                return Err(GameError::config("symbol names must not be empty"));
            }
            *counts.entry(face).or_default() += 1;
        }
        if let Some((symbol, count)) = counts.iter().find(|(_, count)| **count != 2) {
            return Err(GameError::config(format!(
                "symbol '{symbol}' appears {count} times, expected 2"
            )));
        }

        Ok(Self::from_faces(faces))
    }

    fn from_faces(faces: Vec<Symbol>) -> Self {
        let cards = faces
            .into_iter()
            .enumerate()
            .map(|(i, symbol)| Card::new(CardId::new(i as u32), symbol))
            .collect();
        Self { cards }
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of pairs to find.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.cards.len() / 2
    }

    /// Get a card by id.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.index())
    }

    /// Get a card by id, failing with `InvalidArgument` if it doesn't exist.
    pub fn card(&self, id: CardId) -> Result<&Card> {
        self.get(id).ok_or(GameError::InvalidArgument {
            card: id,
            deck_size: self.len(),
        })
    }

    pub(crate) fn set_status(&mut self, id: CardId, status: CardStatus) {
        if let Some(card) = self.cards.get_mut(id.index()) {
            card.status = status;
        }
    }

    /// Iterate cards in board order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Cheap copy of the cards for rendering.
    #[must_use]
    pub fn snapshot(&self) -> Vector<Card> {
        self.cards.clone()
    }

    /// Symbols in board order.
    #[must_use]
    pub fn layout(&self) -> Vec<Symbol> {
        self.cards.iter().map(|card| card.symbol.clone()).collect()
    }

    /// Count cards in the given status.
    #[must_use]
    pub fn count_status(&self, status: CardStatus) -> usize {
        self.cards.iter().filter(|card| card.status == status).count()
    }
}
