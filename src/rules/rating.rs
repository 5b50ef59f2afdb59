//! Star rating.
//!
//! The rating is derived from the number of moves (pair comparisons), never
//! stored. Fewer moves, more stars.

use serde::{Deserialize, Serialize};

use crate::core::error::{GameError, Result};

/// Star rating for a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rating {
    OneStar = 1,
    TwoStars = 2,
    ThreeStars = 3,
}

impl Rating {
    /// Number of stars shown.
    #[must_use]
    pub const fn stars(self) -> u8 {
        self as u8
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rating::OneStar => f.write_str("1 star"),
            Rating::TwoStars => f.write_str("2 stars"),
            Rating::ThreeStars => f.write_str("3 stars"),
        }
    }
}

/// Move thresholds for the star rating.
///
/// Fewer than `three_stars_below` moves earns three stars, fewer than
/// `two_stars_below` earns two, anything else earns one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RatingThresholds {
    pub three_stars_below: u32,
    pub two_stars_below: u32,
}

impl Default for RatingThresholds {
    fn default() -> Self {
        Self {
            three_stars_below: 12,
            two_stars_below: 18,
        }
    }
}

impl RatingThresholds {
    #[must_use]
    pub const fn new(three_stars_below: u32, two_stars_below: u32) -> Self {
        Self {
            three_stars_below,
            two_stars_below,
        }
    }

    /// The two-star band can't start before the three-star band ends.
    pub fn validate(&self) -> Result<()> {
        if self.three_stars_below > self.two_stars_below {
            return Err(GameError::config(format!(
                "three-star threshold {} exceeds two-star threshold {}",
                self.three_stars_below, self.two_stars_below
            )));
        }
        Ok(())
    }

    /// Rate a number of moves.
    #[must_use]
    pub fn rate(&self, moves_taken: u32) -> Rating {
        if moves_taken < self.three_stars_below {
            Rating::ThreeStars
        } else if moves_taken < self.two_stars_below {
            Rating::TwoStars
        } else {
            Rating::OneStar
        }
    }
}

/// Rate a number of moves with the default thresholds (12 / 18).
#[must_use]
pub fn rating(moves_taken: u32) -> Rating {
    RatingThresholds::default().rate(moves_taken)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bands() {
        assert_eq!(rating(0), Rating::ThreeStars);
        assert_eq!(rating(11), Rating::ThreeStars);
        assert_eq!(rating(12), Rating::TwoStars);
        assert_eq!(rating(17), Rating::TwoStars);
        assert_eq!(rating(18), Rating::OneStar);
        assert_eq!(rating(1000), Rating::OneStar);
    }

    #[test]
    fn test_monotonic() {
        let thresholds = RatingThresholds::default();
        let mut previous = thresholds.rate(0);
        for moves in 1..100 {
            let current = thresholds.rate(moves);
            assert!(current <= previous);
            previous = current;
        }
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = RatingThresholds::new(2, 2);
        assert_eq!(thresholds.rate(1), Rating::ThreeStars);
        // Empty two-star band
        assert_eq!(thresholds.rate(2), Rating::OneStar);
        assert!(thresholds.validate().is_ok());
    }

    #[test]
    fn test_invalid_thresholds() {
        assert!(RatingThresholds::new(5, 4).validate().is_err());
    }

    #[test]
    fn test_stars() {
        assert_eq!(Rating::OneStar.stars(), 1);
        assert_eq!(Rating::TwoStars.stars(), 2);
        assert_eq!(Rating::ThreeStars.stars(), 3);
        assert_eq!(Rating::TwoStars.to_string(), "2 stars");
    }
}
