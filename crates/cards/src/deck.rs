use super::card::Card;
use rand::SeedableRng;
use rand::seq::SliceRandom;

/// The full 52-card deck in byte order. Every hand clones this and
/// shuffles its own copy.
pub const REFERENCE: [Card; 52] = {
    let mut cards = [Card::nth(0); 52];
    let mut i = 0;
    while i < 52 {
        cards[i] = Card::nth(i as u8);
        i += 1;
    }
    cards
};

/// Drawing past the last card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckError {
    Exhausted { wanted: usize, left: usize },
}

impl std::fmt::Display for DeckError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Exhausted { wanted, left } => {
                write!(f, "deck exhausted: wanted {} cards, {} left", wanted, left)
            }
        }
    }
}

impl std::error::Error for DeckError {}

/// Something that hands out cards in order.
pub trait CardSource: Send {
    fn dispatch(&mut self, n: usize) -> Result<Vec<Card>, DeckError>;
}

/// A per-hand copy of [`REFERENCE`], drawn from the front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck(Vec<Card>);

impl Default for Deck {
    fn default() -> Self {
        Self::shuffled(&mut rand::rng())
    }
}

impl Deck {
    /// Clones the reference deck and shuffles it with the given rng.
    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut cards = REFERENCE.to_vec();
        cards.shuffle(rng);
        Self(cards)
    }
    /// Reproducible shuffle.
    pub fn seeded(seed: u64) -> Self {
        Self::shuffled(&mut rand::rngs::SmallRng::seed_from_u64(seed))
    }
    /// A deck that deals exactly these cards in this order.
    pub fn stacked(cards: Vec<Card>) -> Self {
        Self(cards)
    }
    pub fn remaining(&self) -> usize {
        self.0.len()
    }
}

impl CardSource for Deck {
    fn dispatch(&mut self, n: usize) -> Result<Vec<Card>, DeckError> {
        match self.0.len() {
            left if left < n => Err(DeckError::Exhausted { wanted: n, left }),
            _ => Ok(self.0.drain(..n).collect()),
        }
    }
}
