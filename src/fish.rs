use holdem_core::*;
use holdem_room::*;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tokio::sync::mpsc::UnboundedReceiver;

/// Bot that answers its turns at random: mostly calls, sometimes folds,
/// now and then raises or shoves.
///
/// It knows nothing but its own seat and what the outbox tells it, so
/// shoves are found by overbetting and retrying with the stack reported
/// back in the rejection.
pub struct Fish {
    seat: Position,
    handle: Handle,
    rng: SmallRng,
    big_blind: Chips,
}

impl Fish {
    pub fn new(seat: Position, handle: Handle, seed: u64) -> Self {
        Self {
            seat,
            handle,
            rng: SmallRng::seed_from_u64(seed),
            big_blind: 2 * SMALL_BLIND,
        }
    }

    /// Answers turns until the hand ends or the outbox goes away.
    pub async fn play(mut self, mut inbox: UnboundedReceiver<Event>) {
        while let Some(event) = inbox.recv().await {
            match event {
                Event::HandStart { .. } => self.notice(&event),
                Event::Turn {
                    seat, round, to_call, ..
                } if seat == self.seat => self.respond(round, to_call).await,
                Event::HandEnd { .. } => break,
                _ => continue,
            }
        }
        log::trace!("[fish P{}] done", self.seat);
    }

    /// Raises are sized in big blinds, taken from the hand's start event.
    fn notice(&mut self, event: &Event) {
        if let Event::HandStart { small_blind, .. } = event {
            self.big_blind = 2 * small_blind;
        }
    }

    async fn respond(&mut self, round: Round, to_call: Chips) {
        let action = self.decide(round, to_call);
        match self.handle.act(action).await {
            Verdict::Rejected(Rejection::Insufficient { remain }) => {
                log::debug!("[fish P{}] shoving {}", self.seat, remain);
                self.handle.act(Action::bet(self.seat, round, remain)).await;
            }
            Verdict::Rejected(rejection) => {
                log::warn!("[fish P{}] {} rejected: {:?}", self.seat, action, rejection)
            }
            Verdict::Applied | Verdict::Closed => {}
        }
    }

    fn decide(&mut self, round: Round, to_call: Chips) -> Action {
        match self.rng.random_range(0..20) {
            0..3 if to_call > 0 => Action::discard(self.seat, round),
            0..3 => Action::check(self.seat, round),
            3..16 => Action::bet(self.seat, round, to_call),
            16..19 => Action::bet(self.seat, round, to_call + self.big_blind * self.rng.random_range(1..5)),
            _ => Action::bet(self.seat, round, Chips::MAX),
        }
    }
}
