use super::rank::Rank;

/// Hand category, weakest first.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Ranking {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOAK = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOAK = 7,
    StraightFlush = 8,
}

impl std::fmt::Display for Ranking {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Ranking::HighCard => write!(f, "HighCard"),
            Ranking::OnePair => write!(f, "OnePair"),
            Ranking::TwoPair => write!(f, "TwoPair"),
            Ranking::ThreeOAK => write!(f, "Trips"),
            Ranking::Straight => write!(f, "Straight"),
            Ranking::Flush => write!(f, "Flush"),
            Ranking::FullHouse => write!(f, "FullHouse"),
            Ranking::FourOAK => write!(f, "Quads"),
            Ranking::StraightFlush => write!(f, "StraightFlush"),
        }
    }
}

/// A fully-evaluated hand: a [`Ranking`] plus a tie-breaking weight.
///
/// The weight packs the deciding ranks (category ranks first, then
/// kickers) into 4-bit nibbles, most significant first, so two hands of
/// the same category compare by plain integer order. Ordering is
/// lexicographic: ranking first, then weight.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Strength {
    ranking: Ranking,
    weight: u32,
}

impl Strength {
    pub fn ranking(&self) -> Ranking {
        self.ranking
    }
    pub fn weight(&self) -> u32 {
        self.weight
    }
}

impl From<(Ranking, Vec<Rank>)> for Strength {
    fn from((ranking, ranks): (Ranking, Vec<Rank>)) -> Self {
        let weight = ranks
            .iter()
            .map(|&r| u8::from(r) as u32)
            .fold(0, |w, r| (w << 4) | r);
        Self { ranking, weight }
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:<14}{:>6x}", self.ranking, self.weight)
    }
}
