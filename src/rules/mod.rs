//! Game rules.
//!
//! - `resolver`: what a selection does (open, match, mismatch, revert)
//! - `rating`: stars derived from moves taken
//!
//! Both are plain functions over `Session` state. The controller decides
//! when to call them; they never schedule or emit anything themselves.

pub mod rating;
pub mod resolver;

pub use rating::{rating, Rating, RatingThresholds};
pub use resolver::{resolve, revert_mismatch, IgnoreReason, Resolution};
