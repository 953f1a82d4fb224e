use holdem_core::*;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Put chips in; zero is a check.
    Bet,
    Discard,
}

/// An inbound move from a client. `amount` is ignored for discards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub seat: Position,
    pub round: Round,
    pub kind: ActionKind,
    #[serde(default)]
    pub amount: Chips,
}

impl Action {
    pub fn bet(seat: Position, round: Round, amount: Chips) -> Self {
        Self {
            seat,
            round,
            kind: ActionKind::Bet,
            amount,
        }
    }
    pub fn check(seat: Position, round: Round) -> Self {
        Self::bet(seat, round, 0)
    }
    pub fn discard(seat: Position, round: Round) -> Self {
        Self {
            seat,
            round,
            kind: ActionKind::Discard,
            amount: 0,
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.kind {
            ActionKind::Bet if self.amount == 0 => write!(f, "P{} r{} check", self.seat, self.round),
            ActionKind::Bet => write!(f, "P{} r{} bet {}", self.seat, self.round, self.amount),
            ActionKind::Discard => write!(f, "P{} r{} fold", self.seat, self.round),
        }
    }
}

/// Parses `"<seat> <round> bet <amount>"`, `"<seat> <round> check"` or
/// `"<seat> <round> fold"`.
impl TryFrom<&str> for Action {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let words = s.split_whitespace().collect::<Vec<_>>();
        match words.as_slice() {
            [seat, round, "bet", amount] => Ok(Self::bet(seat.parse()?, round.parse()?, amount.parse()?)),
            [seat, round, "check"] => Ok(Self::check(seat.parse()?, round.parse()?)),
            [seat, round, "fold"] => Ok(Self::discard(seat.parse()?, round.parse()?)),
            _ => Err(anyhow::anyhow!("invalid action {:?}", s)),
        }
    }
}

/// Why an action was dropped without touching the hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    /// Not this seat's turn, or not this round.
    OutOfTurn { seat: Position, round: Round },
    /// The seat has folded or is all-in.
    Inactive,
    /// More than the seat has behind.
    Insufficient { remain: Chips },
    /// Short of the round max without going all-in.
    UnderCall { to_call: Chips },
}

/// The engine's answer to an [`Action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    Applied,
    Rejected(Rejection),
    /// The hand is over.
    Closed,
}
