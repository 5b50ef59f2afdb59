//! Session events.
//!
//! Events are the only way state changes reach the view. Each command on
//! the controller emits zero or more of these, in the order the changes
//! happened.

use std::time::Duration;

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId, CardStatus};
use crate::rules::Rating;

/// A state change the view may want to render.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A new deck was dealt (start or restart).
    Dealt { cards: Vector<Card>, total_pairs: u32 },

    /// The first card of the session was flipped; the clock is running.
    TimerStarted,

    /// A card changed status.
    CardChanged { card: CardId, status: CardStatus },

    /// A pair comparison completed.
    MovesChanged { moves: u32 },

    /// A pair was found.
    MatchProgressChanged { pairs_matched: u32, total_pairs: u32 },

    /// The star rating dropped.
    RatingChanged { rating: Rating },

    /// Periodic clock update while the session is running.
    TimerTicked { elapsed: Duration },

    /// Every pair has been found.
    GameWon {
        final_moves: u32,
        elapsed: Duration,
        rating: Rating,
    },
}

impl SessionEvent {
    /// Short name for logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            SessionEvent::Dealt { .. } => "dealt",
            SessionEvent::TimerStarted => "timer_started",
            SessionEvent::CardChanged { .. } => "card_changed",
            SessionEvent::MovesChanged { .. } => "moves_changed",
            SessionEvent::MatchProgressChanged { .. } => "match_progress_changed",
            SessionEvent::RatingChanged { .. } => "rating_changed",
            SessionEvent::TimerTicked { .. } => "timer_ticked",
            SessionEvent::GameWon { .. } => "game_won",
        }
    }
}
