use super::player::User;
use holdem_cards::Card;
use holdem_core::*;
use serde::Serialize;

/// Status of a seat as shown to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Normal,
    Discarded,
    AllInned,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatScene {
    pub id: ID<User>,
    pub position: Position,
    pub remain: Chips,
    pub status: Status,
    /// Only populated for the viewer's own seat.
    pub cards: Vec<Card>,
}

/// Read-only snapshot of a hand from one viewer's perspective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scene {
    pub actor: ID<User>,
    pub actor_seat: Position,
    pub round: Round,
    pub max_bet: Chips,
    pub seats: Vec<SeatScene>,
    pub board: Vec<Card>,
    /// Chip total of each side-pot tier, main pot first.
    pub pots: Vec<Chips>,
}

impl Scene {
    pub fn seat(&self, position: Position) -> Option<&SeatScene> {
        self.seats.iter().find(|s| s.position == position)
    }
    pub fn pot(&self) -> Chips {
        self.pots.iter().sum()
    }
}
