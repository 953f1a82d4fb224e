use super::player::*;
use holdem_cards::*;
use holdem_core::*;

/// Betting status within a hand.
///
/// - `Betting`: Active and can still make decisions
/// - `Shoving`: All-in, no more decisions but still in the pot
/// - `Folding`: Out of the hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    Betting,
    Shoving,
    Folding,
}

/// The stock [`Player`]: a user's stack at one position for one hand.
///
/// Hole cards are private information; the strength is evaluated once,
/// at showdown, and cached.
#[derive(Debug, Clone)]
pub struct Seat {
    position: Position,
    user: ID<User>,
    bring_in: Chips,
    remain: Chips,
    won: Chips,
    state: State,
    cards: Vec<Card>,
    strength: Option<Strength>,
}

impl Seat {
    /// Brings `min(balance, max_bring_in)` to the table.
    pub fn new(position: Position, user: ID<User>, balance: Chips, max_bring_in: Chips) -> Self {
        let bring_in = balance.min(max_bring_in);
        Self {
            position,
            user,
            bring_in,
            remain: bring_in,
            won: 0,
            state: State::Betting,
            cards: Vec::with_capacity(HOLE_CARDS),
            strength: None,
        }
    }
    pub fn state(&self) -> State {
        self.state
    }
    pub fn won(&self) -> Chips {
        self.won
    }
}

impl Player for Seat {
    fn id(&self) -> ID<User> {
        self.user
    }
    fn position(&self) -> Position {
        self.position
    }
    fn discard(&mut self) {
        self.state = State::Folding;
    }
    fn discarded(&self) -> bool {
        self.state == State::Folding
    }
    fn all_inned(&self) -> bool {
        self.state == State::Shoving
    }
    fn bet(&mut self, amount: Chips) -> Wager {
        if amount > self.remain {
            return Wager::Short;
        }
        self.remain -= amount;
        let all_in = self.remain == 0;
        if all_in {
            log::debug!("[seat P{}] all in", self.position);
            self.state = State::Shoving;
        }
        Wager::Placed { all_in }
    }
    fn have_bet(&self) -> Chips {
        self.bring_in - self.remain
    }
    fn remain_chip(&self) -> Chips {
        self.remain
    }
    fn origin_chip(&self) -> Chips {
        self.bring_in
    }
    fn result(&self) -> Delta {
        Delta::between(self.bring_in, self.remain + self.won)
    }
    fn win_chip(&mut self, chips: Chips) {
        self.won += chips;
    }
    fn got_cards(&mut self, cards: Vec<Card>) {
        self.cards.extend(cards);
    }
    fn cards(&self) -> &[Card] {
        &self.cards
    }
    fn hand(&mut self, board: &[Card]) -> Strength {
        let cards = &self.cards;
        *self.strength.get_or_insert_with(|| {
            let all = cards.iter().chain(board).copied().collect::<Vec<_>>();
            Evaluator::from(all.as_slice()).strength()
        })
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "P{} {:?} ${:>5}", self.position, self.state, self.remain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seat(balance: Chips) -> Seat {
        Seat::new(0, ID::default(), balance, MAX_BRING_IN)
    }

    #[test]
    fn bring_in_is_capped() {
        assert_eq!(seat(5000).origin_chip(), 2000);
        assert_eq!(seat(1500).origin_chip(), 1500);
    }

    #[test]
    fn short_bet_changes_nothing() {
        let mut seat = seat(100);
        assert_eq!(seat.bet(101), Wager::Short);
        assert_eq!(seat.remain_chip(), 100);
        assert_eq!(seat.state(), State::Betting);
    }

    #[test]
    fn exact_bet_is_all_in() {
        let mut seat = seat(100);
        assert_eq!(seat.bet(40), Wager::Placed { all_in: false });
        assert_eq!(seat.bet(60), Wager::Placed { all_in: true });
        assert!(seat.all_inned());
        assert_eq!(seat.have_bet(), 100);
    }

    #[test]
    fn result_counts_winnings() {
        let mut seat = seat(2000);
        seat.bet(500);
        assert_eq!(seat.result(), Delta::Loss(500));
        seat.win_chip(1500);
        assert_eq!(seat.result(), Delta::Gain(1000));
    }

    #[test]
    fn strength_is_cached() {
        let mut seat = seat(2000);
        seat.got_cards(Card::parse("As Ah").unwrap());
        let board = Card::parse("Ad Kc Qs 3d 2c").unwrap();
        let first = seat.hand(&board);
        assert_eq!(first.ranking(), Ranking::ThreeOAK);
        assert_eq!(seat.hand(&[]), first);
    }
}
