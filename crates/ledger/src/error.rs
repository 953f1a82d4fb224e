use holdem_core::Chips;
use holdem_core::Position;
use holdem_core::Round;

/// Ways a bet can fail to enter the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerError {
    /// A non-all-in bet that leaves the seat below the round max.
    /// Nothing is recorded.
    UnderCall {
        round: Round,
        seat: Position,
        total: Chips,
        max: Chips,
    },
    /// Routing did not settle within the hop limit. The ledger is no
    /// longer trustworthy and the hand must be abandoned.
    Runaway { seat: Position, amount: Chips },
}

impl std::fmt::Display for LedgerError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::UnderCall {
                round,
                seat,
                total,
                max,
            } => write!(
                f,
                "seat {} under-calls round {}: {} < {}",
                seat, round, total, max
            ),
            Self::Runaway { seat, amount } => {
                write!(f, "bet of {} by seat {} did not settle", amount, seat)
            }
        }
    }
}

impl std::error::Error for LedgerError {}
