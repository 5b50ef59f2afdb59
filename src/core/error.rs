//! Error types.
//!
//! Errors indicate a caller bug (bad configuration, unknown card). Well-formed
//! actions that simply don't apply, such as flipping a card that is already
//! face up, are not errors; the resolver reports them as ignored.

use thiserror::Error;

use crate::cards::CardId;

/// Errors surfaced by deck building and session commands.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    /// The game configuration (symbol set, thresholds) is unusable.
    #[error("invalid config: {reason}")]
    InvalidConfig { reason: String },

    /// A card id that does not exist in the current deck.
    #[error("invalid argument: {card} is not in a deck of {deck_size} cards")]
    InvalidArgument { card: CardId, deck_size: usize },
}

impl GameError {
    pub(crate) fn config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GameError>;
