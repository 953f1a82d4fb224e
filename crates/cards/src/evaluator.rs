use super::card::Card;
use super::rank::Rank;
use super::strength::Ranking;
use super::strength::Strength;

/// A2345 as a rank bitmask.
const WHEEL: u16 = 0b_1000000001111;

/// Finds the strongest five-card hand among up to seven cards.
///
/// Cards are folded into one rank bitmask per suit plus a count per rank,
/// and each category is searched from strongest to weakest with bitwise
/// operations. The first category found wins.
pub struct Evaluator {
    suits: [u16; 4],
    count: [u8; 13],
}

impl From<&[Card]> for Evaluator {
    fn from(cards: &[Card]) -> Self {
        let mut suits = [0u16; 4];
        let mut count = [0u8; 13];
        for card in cards {
            suits[u8::from(card.suit()) as usize] |= u16::from(card.rank());
            count[u8::from(card.rank()) as usize] += 1;
        }
        Self { suits, count }
    }
}

impl Evaluator {
    pub fn strength(&self) -> Strength {
        None.or_else(|| self.find_straight_flush())
            .or_else(|| self.find_4_oak())
            .or_else(|| self.find_3_oak_2_oak())
            .or_else(|| self.find_flush())
            .or_else(|| self.find_straight())
            .or_else(|| self.find_3_oak())
            .or_else(|| self.find_2_oak_2_oak())
            .or_else(|| self.find_2_oak())
            .unwrap_or_else(|| self.find_1_oak())
    }

    fn find_1_oak(&self) -> Strength {
        Strength::from((Ranking::HighCard, self.kickers(5, &[])))
    }
    fn find_2_oak(&self) -> Option<Strength> {
        self.find_rank_of_n_oak(2, &[]).map(|pair| {
            let ranks = [vec![pair], self.kickers(3, &[pair])].concat();
            Strength::from((Ranking::OnePair, ranks))
        })
    }
    fn find_2_oak_2_oak(&self) -> Option<Strength> {
        self.find_rank_of_n_oak(2, &[]).and_then(|hi| {
            self.find_rank_of_n_oak(2, &[hi]).map(|lo| {
                let ranks = [vec![hi, lo], self.kickers(1, &[hi, lo])].concat();
                Strength::from((Ranking::TwoPair, ranks))
            })
        })
    }
    fn find_3_oak(&self) -> Option<Strength> {
        self.find_rank_of_n_oak(3, &[]).map(|trips| {
            let ranks = [vec![trips], self.kickers(2, &[trips])].concat();
            Strength::from((Ranking::ThreeOAK, ranks))
        })
    }
    fn find_straight(&self) -> Option<Strength> {
        Self::find_rank_of_straight(self.ranks())
            .map(|high| Strength::from((Ranking::Straight, vec![high])))
    }
    fn find_flush(&self) -> Option<Strength> {
        self.find_suit_of_flush().map(|suit| {
            let ranks = Self::highest(self.suits[suit], 5);
            Strength::from((Ranking::Flush, ranks))
        })
    }
    fn find_3_oak_2_oak(&self) -> Option<Strength> {
        self.find_rank_of_n_oak(3, &[]).and_then(|trips| {
            self.find_rank_of_n_oak(2, &[trips])
                .map(|pair| Strength::from((Ranking::FullHouse, vec![trips, pair])))
        })
    }
    fn find_4_oak(&self) -> Option<Strength> {
        self.find_rank_of_n_oak(4, &[]).map(|quads| {
            let ranks = [vec![quads], self.kickers(1, &[quads])].concat();
            Strength::from((Ranking::FourOAK, ranks))
        })
    }
    fn find_straight_flush(&self) -> Option<Strength> {
        self.find_suit_of_flush()
            .and_then(|suit| Self::find_rank_of_straight(self.suits[suit]))
            .map(|high| Strength::from((Ranking::StraightFlush, vec![high])))
    }

    fn ranks(&self) -> u16 {
        self.suits.iter().fold(0, |acc, s| acc | s)
    }
    fn find_suit_of_flush(&self) -> Option<usize> {
        self.suits.iter().position(|s| s.count_ones() >= 5)
    }
    fn find_rank_of_straight(ranks: u16) -> Option<Rank> {
        let mut bits = ranks;
        bits &= bits << 1;
        bits &= bits << 1;
        bits &= bits << 1;
        bits &= bits << 1;
        if bits > 0 {
            Some(Rank::from(bits))
        } else if WHEEL == (WHEEL & ranks) {
            Some(Rank::Five)
        } else {
            None
        }
    }
    fn find_rank_of_n_oak(&self, n: u8, skip: &[Rank]) -> Option<Rank> {
        Rank::all()
            .into_iter()
            .rev()
            .filter(|r| !skip.contains(r))
            .find(|&r| self.count[u8::from(r) as usize] >= n)
    }
    fn kickers(&self, n: usize, skip: &[Rank]) -> Vec<Rank> {
        Self::highest(self.ranks(), 13)
            .into_iter()
            .filter(|r| !skip.contains(r))
            .take(n)
            .collect()
    }
    fn highest(mask: u16, n: usize) -> Vec<Rank> {
        Rank::all()
            .into_iter()
            .rev()
            .filter(|&r| mask & u16::from(r) != 0)
            .take(n)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(s: &str) -> Strength {
        Evaluator::from(Card::parse(s).unwrap().as_slice()).strength()
    }

    #[test]
    fn high_card() {
        assert_eq!(eval("As Kh Qd Jc 9s 3d 2c").ranking(), Ranking::HighCard);
    }

    #[test]
    fn one_pair() {
        assert_eq!(eval("As Ah Kd Qc Js 3d 2c").ranking(), Ranking::OnePair);
    }

    #[test]
    fn two_pair() {
        assert_eq!(eval("As Ah Kd Kc Qs 3d 2c").ranking(), Ranking::TwoPair);
    }

    #[test]
    fn three_oak() {
        assert_eq!(eval("As Ah Ad Kc Qs 3d 2c").ranking(), Ranking::ThreeOAK);
    }

    #[test]
    fn straight() {
        assert_eq!(eval("Ts 9h 8d 7c 6s 2d 2c").ranking(), Ranking::Straight);
    }

    #[test]
    fn wheel() {
        let wheel = eval("As 2h 3d 4c 5s Kd Kc");
        let six = eval("6s 2h 3d 4c 5s Kd Kc");
        assert_eq!(wheel.ranking(), Ranking::Straight);
        assert!(six > wheel);
    }

    #[test]
    fn flush() {
        assert_eq!(eval("As Ks Qs Js 9s 3d 2c").ranking(), Ranking::Flush);
    }

    #[test]
    fn full_house() {
        assert_eq!(eval("As Ah Ad Kc Ks 3d 2c").ranking(), Ranking::FullHouse);
    }

    #[test]
    fn full_house_from_two_trips() {
        let two_trips = eval("Ks Kh Kd Qc Qs Qd 2c");
        let small_pair = eval("Ks Kh Kd Qc Qs 3d 2c");
        assert_eq!(two_trips.ranking(), Ranking::FullHouse);
        assert_eq!(two_trips, small_pair);
    }

    #[test]
    fn four_oak() {
        assert_eq!(eval("As Ah Ad Ac Ks 3d 2c").ranking(), Ranking::FourOAK);
    }

    #[test]
    fn straight_flush() {
        assert_eq!(eval("Ts 9s 8s 7s 6s 2d 2c").ranking(), Ranking::StraightFlush);
    }

    #[test]
    fn kickers_break_ties() {
        assert!(eval("As Ah Kd Qc Js 3d 2c") > eval("As Ah Kd Qc Ts 3d 2c"));
        assert!(eval("As Ah Kd Kc 9s 3d 2c") > eval("As Ah Kd Kc 8s 3d 2c"));
    }

    #[test]
    fn sixth_card_does_not_play() {
        assert_eq!(eval("As Ah Kd Qc Js 4d 2c"), eval("As Ah Kd Qc Js 3d 2c"));
    }

    #[test]
    fn board_plays_for_both() {
        let board = "Ts Js Qs Ks As";
        assert_eq!(
            eval(&format!("{} 2c 3d", board)),
            eval(&format!("{} 4h 5h", board))
        );
    }
}
