//! Selection resolution.
//!
//! Decides what happens when a card is selected:
//! 1. Guard: unknown id is an error; face-up, matched, pending-pair and
//!    game-over selections are ignored without touching state
//! 2. The first flip of a session starts the clock
//! 3. The card turns face up and joins the selection
//! 4. With two cards up, one move is counted and the pair is compared
//!
//! A match resolves at once. A mismatch leaves both cards up; the caller
//! schedules [`revert_mismatch`] after the configured delay, and until then
//! the full selection blocks further flips.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::{CardId, CardStatus};
use crate::core::error::Result;
use crate::session::{Session, SessionStatus};

/// Why a selection was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// The card is already face up.
    AlreadySelected,
    /// The card belongs to a found pair.
    AlreadyMatched,
    /// Two cards are face up and not yet resolved.
    PairPending,
    /// The session is won.
    GameOver,
}

/// Outcome of one selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    /// Nothing changed.
    Ignored(IgnoreReason),

    /// First card of a pair turned face up. `started` is set on the first
    /// flip of the session.
    Opened { card: CardId, started: bool },

    /// The pair matched and stays face up.
    Matched { pair: [CardId; 2], won: bool },

    /// The pair differs. Both stay face up until reverted.
    Mismatched { pair: [CardId; 2] },
}

impl Resolution {
    /// Did this selection complete a pair comparison?
    #[must_use]
    pub fn is_move(&self) -> bool {
        matches!(self, Resolution::Matched { .. } | Resolution::Mismatched { .. })
    }
}

/// Apply a selection of `card` at clock time `now`.
pub fn resolve(session: &mut Session, card: CardId, now: Duration) -> Result<Resolution> {
    let status = session.card(card)?.status;

    if let Some(reason) = ignore_reason(session, status) {
        debug!(card = %card, ?reason, "selection ignored");
        return Ok(Resolution::Ignored(reason));
    }

    let started = session.status == SessionStatus::Idle;
    if started {
        session.status = SessionStatus::Running;
        session.timer.start(now);
    }

    session.deck.set_status(card, CardStatus::Selected);
    session.selection.push(card);

    let [first, second] = match session.selection.as_slice() {
        [first, second] => [*first, *second],
        _ => {
            debug!(card = %card, "card opened");
            return Ok(Resolution::Opened { card, started });
        }
    };

    session.moves_taken += 1;

    let matched = session.deck.card(first)?.matches(session.deck.card(second)?);
    if !matched {
        debug!(%first, %second, moves = session.moves_taken, "mismatch");
        return Ok(Resolution::Mismatched {
            pair: [first, second],
        });
    }

    session.deck.set_status(first, CardStatus::Matched);
    session.deck.set_status(second, CardStatus::Matched);
    session.selection.clear();
    session.pairs_matched += 1;

    let won = session.pairs_matched == session.total_pairs();
    if won {
        session.status = SessionStatus::Won;
        session.timer.stop(now);
    }

    debug!(
        %first,
        %second,
        moves = session.moves_taken,
        pairs_matched = session.pairs_matched,
        won,
        "match"
    );
    Ok(Resolution::Matched {
        pair: [first, second],
        won,
    })
}

fn ignore_reason(session: &Session, status: CardStatus) -> Option<IgnoreReason> {
    if session.status == SessionStatus::Won {
        return Some(IgnoreReason::GameOver);
    }
    match status {
        CardStatus::Matched => Some(IgnoreReason::AlreadyMatched),
        CardStatus::Selected => Some(IgnoreReason::AlreadySelected),
        CardStatus::Hidden if session.pair_pending() => Some(IgnoreReason::PairPending),
        CardStatus::Hidden => None,
    }
}

/// Flip a mismatched pair back face down and clear the selection.
///
/// Only acts if `pair` is exactly the pending selection; returns whether
/// anything changed.
pub fn revert_mismatch(session: &mut Session, pair: [CardId; 2]) -> bool {
    if session.selection.as_slice() != pair.as_slice() {
        return false;
    }

    for card in pair {
        session.deck.set_status(card, CardStatus::Hidden);
    }
    session.selection.clear();
    debug!(first = %pair[0], second = %pair[1], "mismatch reverted");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Deck;
    use crate::core::GameError;

    fn session(layout: &[&str]) -> Session {
        Session::new(Deck::arranged(layout.iter().copied()).unwrap(), 0)
    }

    fn id(i: u32) -> CardId {
        CardId::new(i)
    }

    fn status(session: &Session, i: u32) -> CardStatus {
        session.card(id(i)).unwrap().status
    }

    #[test]
    fn test_first_flip_starts_session() {
        let mut s = session(&["x", "y", "x", "y"]);
        let r = resolve(&mut s, id(0), Duration::from_secs(5)).unwrap();

        assert_eq!(r, Resolution::Opened { card: id(0), started: true });
        assert_eq!(s.status(), SessionStatus::Running);
        assert_eq!(s.started_at(), Some(Duration::from_secs(5)));
        assert_eq!(s.selection(), &[id(0)]);
        assert_eq!(s.moves_taken(), 0);
        assert_eq!(status(&s, 0), CardStatus::Selected);
    }

    #[test]
    fn test_match_resolves_immediately() {
        let mut s = session(&["x", "y", "x", "y"]);
        resolve(&mut s, id(0), Duration::ZERO).unwrap();
        let r = resolve(&mut s, id(2), Duration::ZERO).unwrap();

        assert_eq!(r, Resolution::Matched { pair: [id(0), id(2)], won: false });
        assert!(r.is_move());
        assert_eq!(s.moves_taken(), 1);
        assert_eq!(s.pairs_matched(), 1);
        assert!(s.selection().is_empty());
        assert_eq!(status(&s, 0), CardStatus::Matched);
        assert_eq!(status(&s, 2), CardStatus::Matched);
    }

    #[test]
    fn test_mismatch_holds_pair() {
        let mut s = session(&["x", "y", "x", "y"]);
        resolve(&mut s, id(0), Duration::ZERO).unwrap();
        let r = resolve(&mut s, id(1), Duration::ZERO).unwrap();

        assert_eq!(r, Resolution::Mismatched { pair: [id(0), id(1)] });
        assert_eq!(s.moves_taken(), 1);
        assert_eq!(s.pairs_matched(), 0);
        assert!(s.pair_pending());

        // Third click is blocked while the pair is pending
        let r = resolve(&mut s, id(2), Duration::ZERO).unwrap();
        assert_eq!(r, Resolution::Ignored(IgnoreReason::PairPending));
        assert_eq!(status(&s, 2), CardStatus::Hidden);
        assert_eq!(s.moves_taken(), 1);
    }

    #[test]
    fn test_revert_restores_hidden() {
        let mut s = session(&["x", "y", "x", "y"]);
        resolve(&mut s, id(0), Duration::ZERO).unwrap();
        resolve(&mut s, id(1), Duration::ZERO).unwrap();

        assert!(revert_mismatch(&mut s, [id(0), id(1)]));
        assert!(s.selection().is_empty());
        assert_eq!(status(&s, 0), CardStatus::Hidden);
        assert_eq!(status(&s, 1), CardStatus::Hidden);

        // Second revert has nothing to do
        assert!(!revert_mismatch(&mut s, [id(0), id(1)]));
    }

    #[test]
    fn test_revert_ignores_other_pair() {
        let mut s = session(&["x", "y", "x", "y"]);
        resolve(&mut s, id(0), Duration::ZERO).unwrap();
        resolve(&mut s, id(1), Duration::ZERO).unwrap();

        assert!(!revert_mismatch(&mut s, [id(2), id(3)]));
        assert_eq!(s.selection(), &[id(0), id(1)]);
    }

    #[test]
    fn test_reselect_open_card_ignored() {
        let mut s = session(&["x", "y", "x", "y"]);
        resolve(&mut s, id(0), Duration::ZERO).unwrap();
        let r = resolve(&mut s, id(0), Duration::ZERO).unwrap();

        assert_eq!(r, Resolution::Ignored(IgnoreReason::AlreadySelected));
        assert_eq!(s.selection(), &[id(0)]);
        assert_eq!(s.moves_taken(), 0);
    }

    #[test]
    fn test_matched_card_ignored() {
        let mut s = session(&["x", "y", "x", "y"]);
        resolve(&mut s, id(0), Duration::ZERO).unwrap();
        resolve(&mut s, id(2), Duration::ZERO).unwrap();

        let r = resolve(&mut s, id(0), Duration::ZERO).unwrap();
        assert_eq!(r, Resolution::Ignored(IgnoreReason::AlreadyMatched));
        assert!(s.selection().is_empty());
    }

    #[test]
    fn test_win_stops_timer() {
        let mut s = session(&["x", "x"]);
        resolve(&mut s, id(0), Duration::from_secs(1)).unwrap();
        let r = resolve(&mut s, id(1), Duration::from_secs(4)).unwrap();

        assert_eq!(r, Resolution::Matched { pair: [id(0), id(1)], won: true });
        assert!(s.is_won());
        assert_eq!(s.elapsed(Duration::from_secs(60)), Duration::from_secs(3));
    }

    #[test]
    fn test_unknown_card_leaves_state_untouched() {
        let mut s = session(&["x", "y", "x", "y"]);
        let err = resolve(&mut s, id(4), Duration::ZERO).unwrap_err();

        assert_eq!(err, GameError::InvalidArgument { card: id(4), deck_size: 4 });
        assert_eq!(s.status(), SessionStatus::Idle);
        assert!(s.selection().is_empty());
    }
}
