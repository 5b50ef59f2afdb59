//! Game configuration.
//!
//! A `GameConfig` describes one kind of board:
//! - the symbol set (each symbol is dealt twice)
//! - how long a mismatched pair stays face up
//! - the star-rating thresholds
//! - an optional fixed seed for reproducible deals

use std::time::Duration;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::error::{GameError, Result};
use crate::cards::Symbol;
use crate::rules::RatingThresholds;

/// Symbols of the classic 4x4 board.
pub const CLASSIC_SYMBOLS: [&str; 8] = [
    "diamond",
    "bolt",
    "leaf",
    "paper-plane-o",
    "cube",
    "anchor",
    "bicycle",
    "bomb",
];

/// Default time a mismatched pair stays face up.
pub const DEFAULT_REVERT_DELAY_MS: u64 = 800;

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Distinct symbols; the deck holds two cards of each.
    pub symbols: Vec<Symbol>,

    /// Milliseconds a mismatched pair stays face up before flipping back.
    pub revert_delay_ms: u64,

    /// Move thresholds for the star rating.
    pub rating: RatingThresholds,

    /// Fixed RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            symbols: CLASSIC_SYMBOLS.iter().copied().map(Symbol::new).collect(),
            revert_delay_ms: DEFAULT_REVERT_DELAY_MS,
            rating: RatingThresholds::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a configuration for the given symbols, other values default.
    pub fn new<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        Self::default().with_symbols(symbols)
    }

    /// Replace the symbol set.
    #[must_use]
    pub fn with_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        self.symbols = symbols.into_iter().map(Into::into).collect();
        self
    }

    /// Set the mismatch revert delay.
    #[must_use]
    pub fn with_revert_delay(mut self, delay: Duration) -> Self {
        self.revert_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the rating thresholds.
    #[must_use]
    pub fn with_rating_thresholds(mut self, rating: RatingThresholds) -> Self {
        self.rating = rating;
        self
    }

    /// Use a fixed seed for reproducible deals.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn revert_delay(&self) -> Duration {
        Duration::from_millis(self.revert_delay_ms)
    }

    /// Number of pairs on the board.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.symbols.len()
    }

    /// Check the configuration can produce a playable board.
    pub fn validate(&self) -> Result<()> {
        validate_symbols(&self.symbols)?;
        self.rating.validate()
    }
}

/// Symbols must be non-empty, named, and pairwise distinct.
pub(crate) fn validate_symbols(symbols: &[Symbol]) -> Result<()> {
    if symbols.is_empty() {
        return Err(GameError::config("at least one symbol is required"));
    }

    let mut seen = FxHashSet::default();
    for symbol in symbols {
        if symbol.as_str().is_empty() {
            return Err(GameError::config("symbol names must not be empty"));
        }
        if !seen.insert(symbol) {
            return Err(GameError::config(format!("duplicate symbol '{symbol}'")));
        }
    }
    Ok(())
}
