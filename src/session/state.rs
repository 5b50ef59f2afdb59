//! Session state.
//!
//! A `Session` is one deal from first flip to last match. It owns its deck,
//! the current selection, the counters and the elapsed-time stopwatch.
//! Restarting never reuses a session; the controller builds a new one.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Card, CardId, Deck};
use crate::core::error::Result;
use crate::core::Stopwatch;

/// Lifecycle of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Dealt, nothing flipped yet.
    #[default]
    Idle,
    /// At least one card flipped, pairs remain.
    Running,
    /// Every pair found. Further selections are ignored.
    Won,
}

/// Face-up cards awaiting comparison. Never more than two.
pub type Selection = SmallVec<[CardId; 2]>;

/// Authoritative state of one deal.
#[derive(Clone, Debug)]
pub struct Session {
    pub(crate) deck: Deck,
    pub(crate) selection: Selection,
    pub(crate) moves_taken: u32,
    pub(crate) pairs_matched: u32,
    pub(crate) timer: Stopwatch,
    pub(crate) status: SessionStatus,
    generation: u64,
}

impl Session {
    /// Start a session on a freshly dealt deck.
    ///
    /// `generation` tags deferred work so it can be told apart from work
    /// belonging to earlier sessions.
    #[must_use]
    pub fn new(deck: Deck, generation: u64) -> Self {
        Self {
            deck,
            selection: Selection::new(),
            moves_taken: 0,
            pairs_matched: 0,
            timer: Stopwatch::new(),
            status: SessionStatus::Idle,
            generation,
        }
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Look up a card, failing with `InvalidArgument` for unknown ids.
    pub fn card(&self, id: CardId) -> Result<&Card> {
        self.deck.card(id)
    }

    #[must_use]
    pub fn selection(&self) -> &[CardId] {
        &self.selection
    }

    /// Completed pair comparisons.
    #[must_use]
    pub fn moves_taken(&self) -> u32 {
        self.moves_taken
    }

    #[must_use]
    pub fn pairs_matched(&self) -> u32 {
        self.pairs_matched
    }

    #[must_use]
    pub fn total_pairs(&self) -> u32 {
        self.deck.pair_count() as u32
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// When the first card was flipped, in clock time.
    #[must_use]
    pub fn started_at(&self) -> Option<Duration> {
        self.timer.started_at()
    }

    /// Time since the first flip, frozen once the session is won.
    #[must_use]
    pub fn elapsed(&self, now: Duration) -> Duration {
        self.timer.elapsed(now)
    }

    /// Is a pair face up and waiting to be resolved?
    #[must_use]
    pub fn pair_pending(&self) -> bool {
        self.selection.len() >= 2
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.status == SessionStatus::Won
    }
}
