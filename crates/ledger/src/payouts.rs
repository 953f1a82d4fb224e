use holdem_core::Chips;
use holdem_core::Position;
use std::collections::BTreeMap;

/// Chips won per seat once a ranking has been applied to every tier.
///
/// Seats that win nothing are absent. `residue` counts chips that were not
/// handed out: the remainders of uneven splits, or every tier when the
/// ranking is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Payouts {
    won: BTreeMap<Position, Chips>,
    residue: Chips,
}

impl Payouts {
    pub fn won(&self, seat: Position) -> Chips {
        self.won.get(&seat).copied().unwrap_or_default()
    }
    pub fn residue(&self) -> Chips {
        self.residue
    }
    pub fn winners(&self) -> usize {
        self.won.len()
    }
    /// Sum of all winnings, excluding the residue.
    pub fn total(&self) -> Chips {
        self.won.values().sum()
    }
    pub fn iter(&self) -> impl Iterator<Item = (Position, Chips)> + '_ {
        self.won.iter().map(|(&seat, &chips)| (seat, chips))
    }
    pub(crate) fn credit(&mut self, seat: Position, chips: Chips) {
        if chips > 0 {
            *self.won.entry(seat).or_default() += chips;
        }
    }
    pub(crate) fn drop(&mut self, chips: Chips) {
        self.residue += chips;
    }
}

impl std::fmt::Display for Payouts {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (seat, chips) in self.iter() {
            write!(f, "{}:{} ", seat, chips)?;
        }
        write!(f, "(residue {})", self.residue)
    }
}
