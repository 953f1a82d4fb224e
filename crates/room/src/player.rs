use holdem_cards::*;
use holdem_core::*;

/// Marker for player identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct User;

/// Outcome of asking a player to put chips in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wager {
    /// Not enough chips behind; nothing changed.
    Short,
    /// Chips deducted; `all_in` when the stack is now empty.
    Placed { all_in: bool },
}

/// Net result of a hand for one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delta {
    Gain(Chips),
    Loss(Chips),
}

impl Delta {
    pub fn between(before: Chips, after: Chips) -> Self {
        if after >= before {
            Self::Gain(after - before)
        } else {
            Self::Loss(before - after)
        }
    }
    pub fn signed(&self) -> i64 {
        match self {
            Self::Gain(c) => *c as i64,
            Self::Loss(c) => -(*c as i64),
        }
    }
}

impl std::fmt::Display for Delta {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:+}", self.signed())
    }
}

/// A seated participant as seen by the engine.
///
/// The engine drives every mutation; implementations only keep the books.
/// [`Seat`](crate::Seat) is the stock implementation.
pub trait Player: Send + 'static {
    fn id(&self) -> ID<User>;
    fn position(&self) -> Position;
    fn discard(&mut self);
    fn discarded(&self) -> bool;
    fn all_inned(&self) -> bool;
    /// Deducts `amount`. Must not mutate when returning [`Wager::Short`].
    fn bet(&mut self, amount: Chips) -> Wager;
    /// Chips put in so far this hand.
    fn have_bet(&self) -> Chips;
    fn remain_chip(&self) -> Chips;
    /// Stack brought to the hand.
    fn origin_chip(&self) -> Chips;
    fn result(&self) -> Delta;
    fn win_chip(&mut self, chips: Chips);
    fn got_cards(&mut self, cards: Vec<Card>);
    fn cards(&self) -> &[Card];
    /// Strength of the best hand from hole cards plus `board`.
    fn hand(&mut self, board: &[Card]) -> Strength;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_sign() {
        assert_eq!(Delta::between(2000, 2500), Delta::Gain(500));
        assert_eq!(Delta::between(2000, 0), Delta::Loss(2000));
        assert_eq!(Delta::between(100, 100).signed(), 0);
        assert_eq!(Delta::Loss(30).to_string(), "-30");
    }
}
