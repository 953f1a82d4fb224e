//! Card primitives for a single hand of hold'em.
//!
//! ## Core Types
//!
//! - [`Card`]: A single playing card (rank + suit), byte-encoded
//! - [`Rank`]: Card rank (2 through Ace)
//! - [`Suit`]: Card suit (clubs, diamonds, hearts, spades)
//! - [`Deck`]: A per-hand shuffled copy of the reference deck
//!
//! ## Evaluation
//!
//! - [`Evaluator`]: Finds the best five-card hand among up to seven cards
//! - [`Strength`]: Hand type plus tie-breaking weight
//! - [`Matcher`]: Comparison contract between two strengths
mod card;
mod deck;
mod evaluator;
mod matcher;
mod rank;
mod strength;
mod suit;

pub use card::*;
pub use deck::*;
pub use evaluator::*;
pub use matcher::*;
pub use rank::*;
pub use strength::*;
pub use suit::*;
