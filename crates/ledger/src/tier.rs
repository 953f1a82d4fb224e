use holdem_core::Chips;
use holdem_core::Position;
use holdem_core::Round;
use std::collections::BTreeMap;

/// One side pot.
///
/// Holds every seat's cumulative contribution to this tier, the cap a
/// single seat may put in, and whether any contributor went all-in here.
/// Only the last tier of a [`Ledger`](crate::Ledger) may raise its cap;
/// earlier tiers are frozen once a later tier exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tier {
    round: Round,
    totals: BTreeMap<Position, Chips>,
    cap: Chips,
    all_in: bool,
}

impl Tier {
    pub fn new(round: Round) -> Self {
        Self {
            round,
            totals: BTreeMap::new(),
            cap: 0,
            all_in: false,
        }
    }
    /// Betting round in which this tier was opened.
    pub fn round(&self) -> Round {
        self.round
    }
    pub fn cap(&self) -> Chips {
        self.cap
    }
    pub fn all_in(&self) -> bool {
        self.all_in
    }
    /// Sum of every contribution to this tier.
    pub fn total(&self) -> Chips {
        self.totals.values().sum()
    }
    pub fn contributed(&self, seat: Position) -> Chips {
        self.totals.get(&seat).copied().unwrap_or_default()
    }
    pub fn contains(&self, seat: Position) -> bool {
        self.totals.contains_key(&seat)
    }
    pub fn contributors(&self) -> impl Iterator<Item = Position> + '_ {
        self.totals.keys().copied()
    }

    /// Absorbs `amount` from `seat` and returns whatever must flow on to
    /// the next tier. The second value is a freshly split tier that the
    /// caller must insert directly after this one.
    pub(crate) fn absorb(
        &mut self,
        round: Round,
        seat: Position,
        amount: Chips,
        all_in: bool,
        terminal: bool,
    ) -> (Chips, Option<Tier>) {
        let total = self.contributed(seat) + amount;
        if terminal && self.all_in && total > self.cap {
            return (0, Some(self.split_over(round, seat, total, all_in)));
        }
        if all_in {
            self.all_in = true;
        }
        if total < self.cap {
            (0, Some(self.split_under(round, seat, total)))
        } else if terminal {
            self.cap = total;
            self.totals.insert(seat, total);
            (0, None)
        } else {
            let owed = self.cap - self.contributed(seat);
            self.totals.insert(seat, self.cap);
            (amount - owed, None)
        }
    }

    /// The seat tops this tier up to its cap; the excess opens a new
    /// tier that inherits the seat's all-in status.
    fn split_over(&mut self, round: Round, seat: Position, total: Chips, all_in: bool) -> Tier {
        let excess = total - self.cap;
        self.totals.insert(seat, self.cap);
        Tier {
            round,
            totals: BTreeMap::from([(seat, excess)]),
            cap: excess,
            all_in,
        }
    }

    /// The seat cannot reach the cap, so the cap shrinks to the seat's
    /// total and everyone else's excess moves to a new tier.
    fn split_under(&mut self, round: Round, seat: Position, total: Chips) -> Tier {
        let mut next = Tier::new(round);
        self.cap = total;
        self.totals.insert(seat, total);
        for (&other, chips) in self.totals.iter_mut() {
            if other == seat || *chips <= total {
                continue;
            }
            let excess = *chips - total;
            next.totals.insert(other, excess);
            next.cap = next.cap.max(excess);
            *chips = total;
        }
        next
    }
}
