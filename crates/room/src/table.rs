use super::event::Event;
use holdem_core::*;
use tokio::sync::mpsc::UnboundedSender;

/// Outbound delivery for engine events.
pub trait Outbox: Send {
    fn send_to(&self, seat: Position, event: Event);
    fn broadcast(&self, event: Event);
}

/// Per-seat event channels.
#[derive(Debug)]
pub struct Table {
    senders: Vec<Option<UnboundedSender<Event>>>,
}

impl Table {
    /// Creates a table with capacity for n players.
    pub fn new(n: usize) -> Self {
        Self {
            senders: vec![None; n],
        }
    }
    /// Seats a listener at the given position.
    pub fn sit(&mut self, pos: Position, sender: UnboundedSender<Event>) {
        if pos < self.senders.len() {
            self.senders[pos] = Some(sender);
        }
    }
    pub fn seats(&self) -> usize {
        self.senders.len()
    }
    pub fn sender(&self, pos: Position) -> Option<&UnboundedSender<Event>> {
        self.senders.get(pos).and_then(|s| s.as_ref())
    }
}

impl Outbox for Table {
    fn send_to(&self, pos: Position, event: Event) {
        log::debug!("[table] unicast to P{}: {}", pos, event);
        match self.sender(pos).map(|inbox| inbox.send(event)) {
            Some(Ok(())) => {}
            Some(Err(e)) => log::warn!("[table] unicast to P{} failed: {:?}", pos, e),
            None => log::warn!("[table] unicast to P{}: no such player", pos),
        }
    }
    fn broadcast(&self, event: Event) {
        log::debug!("[table] broadcast: {}", event);
        self.senders.iter().enumerate().for_each(|(i, sender)| {
            if let Some(inbox) = sender {
                if let Err(e) = inbox.send(event.clone()) {
                    log::warn!("[table] broadcast to P{} failed: {:?}", i, e);
                }
            }
        });
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new(MAX_SEATS)
    }
}

/// Drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct Mute;

impl Outbox for Mute {
    fn send_to(&self, _: Position, _: Event) {}
    fn broadcast(&self, _: Event) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::unbounded_channel;

    fn event() -> Event {
        Event::HandEnd {
            hand: ID::default(),
            payouts: Default::default(),
        }
    }

    #[test]
    fn table_seats() {
        let table = Table::new(3);
        assert_eq!(table.seats(), 3);
        assert!(table.sender(0).is_none());
        assert!(table.sender(9).is_none());
    }

    #[test]
    fn unicast_reaches_one_seat() {
        let mut table = Table::new(2);
        let (tx0, mut rx0) = unbounded_channel();
        let (tx1, mut rx1) = unbounded_channel();
        table.sit(0, tx0);
        table.sit(1, tx1);
        table.send_to(1, event());
        assert!(rx0.try_recv().is_err());
        assert!(rx1.try_recv().is_ok());
    }

    #[test]
    fn broadcast_survives_closed_inbox() {
        let mut table = Table::new(2);
        let (tx0, rx0) = unbounded_channel();
        let (tx1, mut rx1) = unbounded_channel();
        table.sit(0, tx0);
        table.sit(1, tx1);
        drop(rx0);
        table.broadcast(event());
        assert!(rx1.try_recv().is_ok());
    }
}
