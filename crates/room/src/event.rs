use super::action::ActionKind;
use super::game::Hand;
use holdem_cards::*;
use holdem_core::*;
use holdem_ledger::Payouts;

/// Notifications the engine pushes to an [`Outbox`](crate::Outbox).
/// Delivery is fire-and-forget.
#[derive(Clone, Debug, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// New hand starting with every seat's stack.
    HandStart {
        hand: ID<Hand>,
        dealer: Position,
        small_blind: Chips,
        stacks: Vec<Chips>,
    },
    /// A seat's private hole cards (sent only to them).
    HoleCards {
        hand: ID<Hand>,
        seat: Position,
        cards: Vec<Card>,
    },
    /// Community cards revealed (cumulative board).
    Board {
        hand: ID<Hand>,
        round: Round,
        cards: Vec<Card>,
    },
    /// A seat is on the clock.
    Turn {
        hand: ID<Hand>,
        round: Round,
        seat: Position,
        to_call: Chips,
        timeout_ms: u64,
    },
    /// A bet or fold was applied, by the seat or by its timer.
    Action {
        hand: ID<Hand>,
        round: Round,
        seat: Position,
        kind: ActionKind,
        amount: Chips,
        all_in: bool,
        timed_out: bool,
        pot: Chips,
    },
    /// Hand ended with payouts.
    HandEnd { hand: ID<Hand>, payouts: Payouts },
}

impl Event {
    pub fn hand(&self) -> ID<Hand> {
        match self {
            Event::HandStart { hand, .. }
            | Event::HoleCards { hand, .. }
            | Event::Board { hand, .. }
            | Event::Turn { hand, .. }
            | Event::Action { hand, .. }
            | Event::HandEnd { hand, .. } => *hand,
        }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Event::HandStart { hand, dealer, .. } => {
                write!(f, "Hand {} (dealer P{})", hand, dealer)
            }
            Event::HoleCards { seat, cards, .. } => write!(
                f,
                "P{} hole: {}",
                seat,
                cards.iter().map(|c| c.to_string()).collect::<String>()
            ),
            Event::Board { round, cards, .. } => write!(
                f,
                "Board r{}: {}",
                round,
                cards.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(" ")
            ),
            Event::Turn { seat, to_call, .. } => write!(f, "P{} to act ({} to call)", seat, to_call),
            Event::Action {
                seat,
                kind: ActionKind::Discard,
                timed_out,
                ..
            } => write!(f, "P{}: fold{}", seat, if *timed_out { " (timeout)" } else { "" }),
            Event::Action {
                seat,
                amount: 0,
                timed_out,
                ..
            } => write!(f, "P{}: check{}", seat, if *timed_out { " (timeout)" } else { "" }),
            Event::Action {
                seat,
                amount,
                all_in,
                ..
            } => write!(f, "P{}: bet {}{}", seat, amount, if *all_in { " all-in" } else { "" }),
            Event::HandEnd { payouts, .. } => write!(f, "Winners: {}", payouts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let event = Event::Turn {
            hand: ID::default(),
            round: 2,
            seat: 1,
            to_call: 40,
            timeout_ms: 10_000,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "turn");
        assert_eq!(json["to_call"], 40);
        assert_eq!(json["timeout_ms"], 10_000);
    }
    #[test]
    fn hole_cards_serialize_as_notation() {
        let event = Event::HoleCards {
            hand: ID::default(),
            seat: 0,
            cards: Card::parse("As Td").unwrap(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["cards"], serde_json::json!(["As", "Td"]));
    }
}
