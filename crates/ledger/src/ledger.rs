use super::error::LedgerError;
use super::payouts::Payouts;
use super::tier::Tier;
use holdem_core::Chips;
use holdem_core::MAX_TIER_HOPS;
use holdem_core::Position;
use holdem_core::Round;
use std::collections::BTreeMap;

/// Hand-wide chip accounting.
///
/// Tracks each seat's contribution per betting round and the round maximum,
/// and routes every bet through an ordered chain of [`Tier`]s, splitting
/// tiers whenever an all-in leaves contributors with unequal stakes.
///
/// For every seat, the chips it holds across all tiers always equal the
/// chips it bet across all rounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    round_max: BTreeMap<Round, Chips>,
    round_bets: BTreeMap<Round, BTreeMap<Position, Chips>>,
    tiers: Vec<Tier>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            round_max: BTreeMap::new(),
            round_bets: BTreeMap::new(),
            tiers: vec![Tier::new(1)],
        }
    }
}

impl Ledger {
    /// Records a bet. A zero amount is a check: it is validated and noted
    /// for the round but moves no chips.
    pub fn bet(
        &mut self,
        round: Round,
        seat: Position,
        amount: Chips,
        all_in: bool,
    ) -> Result<(), LedgerError> {
        let max = self.max_bet(round);
        let total = self.round_bet(round, seat) + amount;
        if !all_in && total < max {
            return Err(LedgerError::UnderCall {
                round,
                seat,
                total,
                max,
            });
        }
        self.round_max.insert(round, max.max(total));
        self.round_bets.entry(round).or_default().insert(seat, total);
        let mut remaining = amount;
        let mut index = 0;
        let mut hops = 0;
        while remaining > 0 {
            hops += 1;
            if hops > MAX_TIER_HOPS || index >= self.tiers.len() {
                log::error!("[ledger] seat {} bet {} ran away", seat, amount);
                return Err(LedgerError::Runaway { seat, amount });
            }
            let terminal = index + 1 == self.tiers.len();
            let (rest, split) = self.tiers[index].absorb(round, seat, remaining, all_in, terminal);
            if let Some(tier) = split {
                log::debug!("[ledger] tier {} split at cap {}", index, self.tiers[index].cap());
                self.tiers.insert(index + 1, tier);
            }
            remaining = rest;
            index += 1;
        }
        Ok(())
    }

    /// Distributes every tier to the first ranked group that contributed
    /// to it. Groups are ordered best first; within a tier the winning
    /// contributors split its total evenly. A tier whose contributors all
    /// dropped out of the ranking goes to the best group as a whole, so
    /// only split remainders are left in the residue.
    pub fn finalize(&self, groups: &[Vec<Position>]) -> Payouts {
        let mut payouts = Payouts::default();
        let best = groups.iter().find(|group| !group.is_empty());
        for tier in self.tiers.iter() {
            let winners = groups
                .iter()
                .map(|group| {
                    group
                        .iter()
                        .copied()
                        .filter(|&seat| tier.contains(seat))
                        .collect::<Vec<_>>()
                })
                .find(|winners| !winners.is_empty())
                .or_else(|| best.cloned());
            match winners {
                Some(winners) => Self::split(&mut payouts, tier.total(), &winners),
                None => payouts.drop(tier.total()),
            }
        }
        if payouts.residue() > 0 {
            log::info!("[ledger] {} chips left undistributed", payouts.residue());
        }
        payouts
    }

    /// Hands every chip in the ledger to one seat.
    pub fn sweep(&self, seat: Position) -> Payouts {
        let mut payouts = Payouts::default();
        payouts.credit(seat, self.pot());
        payouts
    }

    fn split(payouts: &mut Payouts, total: Chips, winners: &[Position]) {
        let share = total / winners.len() as Chips;
        winners.iter().for_each(|&seat| payouts.credit(seat, share));
        payouts.drop(total - share * winners.len() as Chips);
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }
    /// Largest round total any seat has reached in `round`.
    pub fn max_bet(&self, round: Round) -> Chips {
        self.round_max.get(&round).copied().unwrap_or_default()
    }
    pub fn round_bet(&self, round: Round, seat: Position) -> Chips {
        self.round_bets
            .get(&round)
            .and_then(|bets| bets.get(&seat))
            .copied()
            .unwrap_or_default()
    }
    pub fn has_matched(&self, round: Round, seat: Position) -> bool {
        self.round_bet(round, seat) == self.max_bet(round)
    }
    /// A seat's stake summed across the tier chain.
    pub fn committed_in_tiers(&self, seat: Position) -> Chips {
        self.tiers.iter().map(|t| t.contributed(seat)).sum()
    }
    /// A seat's stake summed across betting rounds.
    pub fn committed_in_rounds(&self, seat: Position) -> Chips {
        self.round_bets
            .values()
            .filter_map(|bets| bets.get(&seat))
            .sum()
    }
    pub fn pot(&self) -> Chips {
        self.tiers.iter().map(Tier::total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger(bets: &[(Round, Position, Chips, bool)]) -> Ledger {
        let mut ledger = Ledger::default();
        for &(round, seat, amount, all_in) in bets {
            ledger.bet(round, seat, amount, all_in).unwrap();
        }
        ledger
    }

    fn balanced(ledger: &Ledger, seats: usize) {
        for seat in 0..seats {
            assert_eq!(
                ledger.committed_in_tiers(seat),
                ledger.committed_in_rounds(seat),
                "seat {} out of balance",
                seat
            );
        }
    }

    fn totals(ledger: &Ledger) -> Vec<Chips> {
        ledger.tiers().iter().map(Tier::total).collect()
    }

    /// five equal stacks, everyone ends up all-in
    fn equal_all_in() -> Ledger {
        ledger(&[
            (1, 1, 10, false),
            (1, 2, 20, false),
            (1, 3, 2000, true),
            (1, 4, 2000, true),
            (1, 0, 2000, true),
            (2, 1, 1990, true),
            (2, 2, 1980, true),
        ])
    }

    /// stacks 1500, 2000, 2000, 500, 300; big stacks shove first
    fn descending_all_in() -> Ledger {
        ledger(&[
            (1, 1, 10, false),
            (1, 2, 20, false),
            (1, 3, 20, false),
            (1, 4, 20, false),
            (1, 0, 20, false),
            (1, 1, 10, false),
            (2, 1, 1980, true),
            (2, 2, 1980, true),
            (2, 3, 480, true),
            (2, 4, 280, true),
        ])
    }

    #[test]
    fn equal_stacks_single_winner() {
        let ledger = equal_all_in();
        balanced(&ledger, 5);
        let payouts = ledger.finalize(&[vec![1], vec![2, 3], vec![4, 0]]);
        assert_eq!(payouts.winners(), 1);
        assert_eq!(payouts.won(1), 10000);
    }

    #[test]
    fn equal_stacks_split_pots() {
        let ledger = equal_all_in();
        let payouts = ledger.finalize(&[vec![1, 2], vec![3], vec![4, 0]]);
        assert_eq!(payouts.winners(), 2);
        assert_eq!(payouts.won(1), 5000);
        assert_eq!(payouts.won(2), 5000);
        let payouts = ledger.finalize(&[vec![1, 2, 3], vec![4, 0]]);
        assert_eq!(payouts.winners(), 3);
        assert_eq!(payouts.won(1), 3333);
        assert_eq!(payouts.won(2), 3333);
        assert_eq!(payouts.won(3), 3333);
        assert_eq!(payouts.residue(), 1);
        let payouts = ledger.finalize(&[vec![1, 2, 3, 4], vec![0]]);
        assert_eq!(payouts.winners(), 4);
        assert!((1..5).all(|seat| payouts.won(seat) == 2500));
        let payouts = ledger.finalize(&[vec![1, 2, 3, 4, 0]]);
        assert!((0..5).all(|seat| payouts.won(seat) == 2000));
        assert_eq!(payouts.residue(), 0);
    }

    #[test]
    fn partial_all_in_then_late_call() {
        let mut ledger = ledger(&[
            (1, 1, 10, false),
            (1, 2, 20, false),
            (1, 3, 2000, true),
            (1, 4, 2000, true),
        ]);
        assert_eq!(ledger.finalize(&[vec![3], vec![4]]).won(3), 4030);
        let split = ledger.finalize(&[vec![3, 4]]);
        assert_eq!(split.won(3), 2015);
        assert_eq!(split.won(4), 2015);
        ledger.bet(1, 2, 1980, true).unwrap();
        let payouts = ledger.finalize(&[vec![2, 3, 4]]);
        assert_eq!(payouts.winners(), 3);
        assert!((2..5).all(|seat| payouts.won(seat) == 2003));
        balanced(&ledger, 5);
    }

    #[test]
    fn all_in_over_open_bets() {
        let ledger = ledger(&[
            (1, 1, 10, false),
            (1, 2, 20, false),
            (1, 3, 500, false),
            (1, 4, 2000, true),
        ]);
        assert_eq!(ledger.finalize(&[vec![4]]).won(4), 2530);
    }

    #[test]
    fn no_all_in_never_splits() {
        let ledger = ledger(&[
            (1, 1, 10, false),
            (1, 2, 20, false),
            (1, 3, 500, false),
            (1, 4, 1000, false),
            (1, 0, 1500, false),
            (1, 1, 1490, false),
            (1, 3, 1000, false),
            (2, 0, 100, false),
            (2, 3, 100, false),
        ]);
        assert_eq!(ledger.tiers().len(), 1);
        assert_eq!(ledger.finalize(&[vec![0]]).won(0), 5720);
        let split = ledger.finalize(&[vec![0, 3]]);
        assert_eq!(split.won(0), 2860);
        assert_eq!(split.won(3), 2860);
        balanced(&ledger, 5);
    }

    #[test]
    fn descending_stacks_chain_three_tiers() {
        let ledger = descending_all_in();
        balanced(&ledger, 5);
        assert_eq!(totals(&ledger), vec![1220, 600, 3000]);
        assert_eq!(ledger.pot(), 4820);
    }

    #[test]
    fn exclusive_tier_winners_take_tier_totals() {
        let ledger = descending_all_in();
        let [p1, p2, p3] = [1220, 600, 3000];
        let payouts = ledger.finalize(&[vec![4], vec![2, 3], vec![1]]);
        assert_eq!(payouts.won(4), p1);
        assert_eq!(payouts.won(2), p2 / 2 + p3);
        assert_eq!(payouts.won(3), p2 / 2);
        let payouts = ledger.finalize(&[vec![3], vec![1, 2, 4]]);
        assert_eq!(payouts.won(3), p1 + p2);
        assert_eq!(payouts.won(1), p3 / 2);
        assert_eq!(payouts.won(2), p3 / 2);
        assert_eq!(payouts.won(4), 0);
        let payouts = ledger.finalize(&[vec![3, 4], vec![1], vec![2]]);
        assert_eq!(payouts.won(4), p1 / 2);
        assert_eq!(payouts.won(3), p1 / 2 + p2);
        assert_eq!(payouts.won(1), p3);
        let payouts = ledger.finalize(&[vec![2, 4], vec![3], vec![1]]);
        assert_eq!(payouts.won(4), p1 / 2);
        assert_eq!(payouts.won(2), p1 / 2 + p2 + p3);
    }

    #[test]
    fn descending_stacks_multiway_ties() {
        let ledger = descending_all_in();
        let [p1, p2, p3] = [1220, 600, 3000];
        let payouts = ledger.finalize(&[vec![2, 3, 4], vec![1]]);
        assert_eq!(payouts.won(4), p1 / 3);
        assert_eq!(payouts.won(3), p1 / 3 + p2 / 2);
        assert_eq!(payouts.won(2), p1 / 3 + p2 / 2 + p3);
        let payouts = ledger.finalize(&[vec![1, 2, 3], vec![4]]);
        assert_eq!(payouts.won(3), (p1 + p2) / 3);
        assert_eq!(payouts.won(1), (p1 + p2) / 3 + p3 / 2);
        let payouts = ledger.finalize(&[vec![1, 2, 3, 4]]);
        assert_eq!(payouts.won(4), p1 / 4);
        assert_eq!(payouts.won(3), p1 / 4 + p2 / 3);
        assert_eq!(payouts.won(1), p1 / 4 + p2 / 3 + p3 / 2);
        assert_eq!(payouts.total() + payouts.residue(), ledger.pot());
    }

    #[test]
    fn crossed_all_ins_refill_lower_tiers() {
        let ledger = ledger(&[
            (1, 1, 10, false),
            (1, 2, 20, false),
            (1, 3, 20, false),
            (1, 4, 300, true),
            (1, 0, 600, false),
            (1, 1, 590, false),
            (1, 2, 580, false),
            (1, 3, 480, true),
            (2, 0, 900, true),
            (2, 1, 1400, true),
            (2, 2, 1400, true),
        ]);
        balanced(&ledger, 5);
        let tiers = ledger.tiers();
        assert_eq!(tiers.len(), 4);
        assert!((0..5).all(|seat| tiers[0].contributed(seat) == 300));
        assert!((0..4).all(|seat| tiers[1].contributed(seat) == 200));
        assert!((0..3).all(|seat| tiers[2].contributed(seat) == 1000));
        assert!((1..3).all(|seat| tiers[3].contributed(seat) == 500));
        assert_eq!(ledger.pot(), 6300);
    }

    #[test]
    fn ascending_all_ins() {
        let ledger = ledger(&[
            (1, 1, 10, false),
            (1, 2, 20, false),
            (1, 3, 20, false),
            (1, 4, 20, false),
            (1, 0, 100, true),
            (1, 1, 190, true),
            (1, 2, 280, true),
            (1, 3, 380, true),
            (1, 4, 480, true),
        ]);
        balanced(&ledger, 5);
        let tiers = ledger.tiers();
        assert_eq!(tiers.len(), 5);
        for (i, tier) in tiers.iter().enumerate() {
            assert!((i..5).all(|seat| tier.contributed(seat) == 100));
            assert_eq!(tier.contributors().count(), 5 - i);
        }
    }

    #[test]
    fn descending_all_ins() {
        let ledger = ledger(&[
            (1, 1, 10, false),
            (1, 2, 20, false),
            (1, 3, 20, false),
            (1, 4, 20, false),
            (1, 0, 500, true),
            (1, 1, 390, true),
            (1, 2, 280, true),
            (1, 3, 180, true),
            (1, 4, 80, true),
        ]);
        balanced(&ledger, 5);
        let tiers = ledger.tiers();
        assert_eq!(tiers.len(), 5);
        for (i, tier) in tiers.iter().enumerate() {
            assert!((0..5 - i).all(|seat| tier.contributed(seat) == 100));
            assert_eq!(tier.contributors().count(), 5 - i);
        }
    }

    #[test]
    fn caller_over_all_in_opens_side_pot() {
        let ledger = ledger(&[
            (1, 1, 10, false),
            (1, 2, 20, false),
            (1, 3, 1000, true),
            (1, 0, 1500, false),
        ]);
        let tiers = ledger.tiers();
        assert_eq!(tiers.len(), 2);
        assert_eq!(tiers[0].contributed(1), 10);
        assert_eq!(tiers[0].contributed(2), 20);
        assert_eq!(tiers[0].contributed(3), 1000);
        assert_eq!(tiers[0].contributed(0), 1000);
        assert_eq!(tiers[1].contributed(0), 500);
        let payouts = ledger.finalize(&[vec![3], vec![0]]);
        assert_eq!(payouts.won(3), tiers[0].total());
        assert_eq!(payouts.won(0), tiers[1].total());
    }

    #[test]
    fn calls_without_all_in_stay_in_one_tier() {
        let ledger = ledger(&[
            (1, 1, 10, false),
            (1, 2, 20, false),
            (1, 3, 1000, false),
            (1, 4, 1000, false),
            (1, 0, 1000, false),
            (1, 1, 990, false),
            (1, 2, 980, false),
        ]);
        balanced(&ledger, 5);
        assert_eq!(ledger.tiers().len(), 1);
        assert_eq!(ledger.pot(), 5000);
    }

    #[test]
    fn under_call_is_rejected_untouched() {
        let mut ledger = ledger(&[(1, 1, 10, false), (1, 2, 20, false)]);
        let before = ledger.clone();
        assert_eq!(
            ledger.bet(1, 3, 15, false),
            Err(LedgerError::UnderCall {
                round: 1,
                seat: 3,
                total: 15,
                max: 20
            })
        );
        assert_eq!(ledger, before);
        assert!(ledger.bet(1, 3, 15, true).is_ok());
        assert_eq!(ledger.max_bet(1), 20);
    }

    #[test]
    fn checks_are_recorded_without_chips() {
        let mut ledger = Ledger::default();
        ledger.bet(2, 4, 0, false).unwrap();
        assert!(ledger.has_matched(2, 4));
        assert_eq!(ledger.pot(), 0);
        ledger.bet(2, 0, 50, false).unwrap();
        assert!(!ledger.has_matched(2, 4));
        assert!(ledger.bet(2, 4, 0, false).is_err());
    }

    #[test]
    fn round_queries() {
        let ledger = equal_all_in();
        assert_eq!(ledger.max_bet(1), 2000);
        assert_eq!(ledger.max_bet(2), 1990);
        assert_eq!(ledger.round_bet(1, 1), 10);
        assert_eq!(ledger.round_bet(2, 1), 1990);
        assert_eq!(ledger.committed_in_rounds(1), 2000);
        assert!(ledger.has_matched(2, 1));
        assert!(!ledger.has_matched(2, 2));
        assert_eq!(ledger.max_bet(3), 0);
    }

    #[test]
    fn abandoned_tier_goes_to_best_group() {
        let ledger = ledger(&[
            (1, 0, 100, true),
            (1, 1, 100, false),
            (1, 2, 100, false),
            (2, 1, 200, false),
            (2, 2, 200, false),
        ]);
        assert_eq!(totals(&ledger), vec![300, 400]);
        let payouts = ledger.finalize(&[vec![0]]);
        assert_eq!(payouts.won(0), 700);
        assert_eq!(payouts.residue(), 0);
        let payouts = ledger.finalize(&[vec![], vec![0, 3]]);
        assert_eq!(payouts.won(0), 300 + 200);
        assert_eq!(payouts.won(3), 200);
        assert_eq!(payouts.residue(), 0);
    }
    #[test]
    fn sweep_takes_every_tier() {
        let ledger = descending_all_in();
        let payouts = ledger.sweep(4);
        assert_eq!(payouts.won(4), ledger.pot());
        assert_eq!(payouts.winners(), 1);
        assert_eq!(payouts.residue(), 0);
    }
    #[test]
    fn unranked_tiers_become_residue() {
        let ledger = equal_all_in();
        let payouts = ledger.finalize(&[]);
        assert_eq!(payouts.winners(), 0);
        assert_eq!(payouts.residue(), 10000);
    }
}
