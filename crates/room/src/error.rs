use holdem_cards::DeckError;
use holdem_core::Position;
use holdem_core::Round;
use holdem_ledger::LedgerError;

/// Misuse of the decision [`Timer`](crate::Timer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    AlreadyStarted,
    NotRunning,
}

impl std::fmt::Display for TimerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyStarted => write!(f, "timer already started"),
            Self::NotRunning => write!(f, "timer not running"),
        }
    }
}

impl std::error::Error for TimerError {}

/// Invariant violations that abandon a hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandError {
    /// `start` was called on a hand that already began.
    AlreadyStarted,
    /// The seating cannot host a hand.
    Seating(String),
    /// No seat could be found to act.
    NoActor { round: Round, from: Position },
    /// Every inbound queue closed before the hand concluded.
    Stalled,
    Ledger(LedgerError),
    Deck(DeckError),
    Timer(TimerError),
}

impl std::fmt::Display for HandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyStarted => write!(f, "hand already started"),
            Self::Seating(s) => write!(f, "invalid seating: {}", s),
            Self::NoActor { round, from } => {
                write!(f, "no eligible actor after seat {} in round {}", from, round)
            }
            Self::Stalled => write!(f, "hand stalled before completion"),
            Self::Ledger(e) => write!(f, "ledger: {}", e),
            Self::Deck(e) => write!(f, "deck: {}", e),
            Self::Timer(e) => write!(f, "timer: {}", e),
        }
    }
}

impl std::error::Error for HandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Ledger(e) => Some(e),
            Self::Deck(e) => Some(e),
            Self::Timer(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LedgerError> for HandError {
    fn from(e: LedgerError) -> Self {
        Self::Ledger(e)
    }
}
impl From<DeckError> for HandError {
    fn from(e: DeckError) -> Self {
        Self::Deck(e)
    }
}
impl From<TimerError> for HandError {
    fn from(e: TimerError) -> Self {
        Self::Timer(e)
    }
}
