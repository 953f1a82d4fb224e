use super::action::*;
use super::config::TableConfig;
use super::error::HandError;
use super::event::Event;
use super::handle::*;
use super::player::*;
use super::scene::*;
use super::table::Outbox;
use super::timer::Timer;
use holdem_cards::*;
use holdem_core::*;
use holdem_ledger::*;
use std::collections::BTreeSet;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::unbounded_channel;
use tokio::sync::oneshot;

/// Marker for hand identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hand;

/// Payload of a decision timer: whose turn it was, and in which round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Expiry {
    round: Round,
    seat: Position,
}

/// The settled seats of a finished hand.
#[derive(Debug)]
pub struct GameResult<P> {
    id: ID<Hand>,
    players: Vec<P>,
}

impl<P> GameResult<P> {
    pub fn id(&self) -> ID<Hand> {
        self.id
    }
    pub fn players(&self) -> &[P] {
        &self.players
    }
    pub fn into_players(self) -> Vec<P> {
        self.players
    }
}

/// One hand of hold'em, from blinds to payout.
///
/// The dealer sits at seat 0 for the whole hand; seats 1 and 2 post the
/// blinds and seat 3 (modulo the table size) opens round 1. Later rounds
/// open at the first live seat left of the dealer.
///
/// The engine owns every piece of hand state and is driven only by its own
/// loop in [`run`](Game::run): commands from [`Handle`]s and expiries from
/// the decision [`Timer`] are applied one at a time. A seat that lets its
/// clock run out checks when it has matched the round max and folds
/// otherwise.
pub struct Game<P> {
    id: ID<Hand>,
    config: TableConfig,
    players: Vec<P>,
    outbox: Box<dyn Outbox>,
    matcher: Box<dyn Matcher>,
    deck: Box<dyn CardSource>,
    ledger: Ledger,
    timer: Timer<Expiry>,
    expiries: UnboundedReceiver<Expiry>,
    commands: UnboundedReceiver<Command>,
    round: Round,
    actor: Position,
    opener: Position,
    acted: BTreeSet<Position>,
    folded: usize,
    all_in: usize,
    board: Vec<Card>,
    started: bool,
    over: bool,
}

impl<P> Game<P>
where
    P: Player,
{
    /// Seats `players` (ordered by position) and returns the engine with
    /// its first [`Handle`]. The deck is a fresh shuffle of the reference
    /// deck and hands are compared with [`HandMatcher`].
    pub fn new<O>(
        config: TableConfig,
        mut players: Vec<P>,
        outbox: O,
    ) -> Result<(Self, Handle), HandError>
    where
        O: Outbox + 'static,
    {
        players.sort_by_key(P::position);
        Self::check(&players)?;
        let id = ID::default();
        let (commands_tx, commands) = unbounded_channel();
        let (expiries_tx, expiries) = unbounded_channel();
        let first = FIRST_ACTOR_OFFSET % players.len();
        let game = Self {
            id,
            config,
            players,
            outbox: Box::new(outbox),
            matcher: Box::new(HandMatcher),
            deck: Box::new(Deck::default()),
            ledger: Ledger::default(),
            timer: Timer::new(expiries_tx),
            expiries,
            commands,
            round: 1,
            actor: first,
            opener: first,
            acted: BTreeSet::new(),
            folded: 0,
            all_in: 0,
            board: Vec::new(),
            started: false,
            over: false,
        };
        Ok((game, Handle::new(id, commands_tx)))
    }
    pub fn with_deck<D>(mut self, deck: D) -> Self
    where
        D: CardSource + 'static,
    {
        self.deck = Box::new(deck);
        self
    }
    pub fn with_matcher<M>(mut self, matcher: M) -> Self
    where
        M: Matcher + 'static,
    {
        self.matcher = Box::new(matcher);
        self
    }
    pub fn id(&self) -> ID<Hand> {
        self.id
    }

    /// Deals hole cards, posts both blinds, and puts the first seat on the
    /// clock. Must be called from within a tokio runtime.
    pub fn start(&mut self) -> Result<(), HandError> {
        if self.started {
            return Err(HandError::AlreadyStarted);
        }
        self.started = true;
        log::info!("[game {}] starting with {} seats", self.id, self.players.len());
        self.outbox.broadcast(Event::HandStart {
            hand: self.id,
            dealer: DEALER,
            small_blind: self.config.small_blind,
            stacks: self.players.iter().map(P::remain_chip).collect(),
        });
        self.deal()?;
        self.post(SMALL_BLIND_OFFSET, self.config.small_blind)?;
        self.post(BIG_BLIND_OFFSET, self.config.big_blind())?;
        self.timer.start()?;
        self.actor = self.next_actor(BIG_BLIND_OFFSET)?;
        self.opener = self.actor;
        self.arm()
    }

    /// Plays the hand to completion, starting it first if needed, then
    /// hands the settled seats to `done`.
    ///
    /// A [`HandError`] abandons the hand: it is returned here and `done` is
    /// dropped without a result.
    pub async fn run(mut self, done: oneshot::Sender<GameResult<P>>) -> Result<(), HandError> {
        if !self.started {
            self.start()?;
        }
        while !self.over {
            let step = tokio::select! {
                Some(command) = self.commands.recv() => self.handle(command),
                Some(expiry) = self.expiries.recv() => self.timeout(expiry),
                else => break,
            };
            if let Err(e) = step {
                log::error!("[game {}] hand abandoned: {}", self.id, e);
                return Err(e);
            }
        }
        if !self.over {
            log::error!("[game {}] every queue closed mid-hand", self.id);
            return Err(HandError::Stalled);
        }
        if let Err(e) = self.timer.stop() {
            log::debug!("[game {}] timer already stopped: {}", self.id, e);
        }
        let id = self.id;
        log::info!("[game {}] hand over", id);
        let result = GameResult {
            id,
            players: self.players,
        };
        if done.send(result).is_err() {
            log::warn!("[game {}] result dropped, nobody waiting", id);
        }
        Ok(())
    }
}

impl<P> Game<P>
where
    P: Player,
{
    fn check(players: &[P]) -> Result<(), HandError> {
        if !(MIN_SEATS..=MAX_SEATS).contains(&players.len()) {
            return Err(HandError::Seating(format!(
                "{} seats, need {} to {}",
                players.len(),
                MIN_SEATS,
                MAX_SEATS
            )));
        }
        if let Some((i, _)) = players
            .iter()
            .enumerate()
            .find(|(i, p)| p.position() != *i)
        {
            return Err(HandError::Seating(format!("no player at seat {}", i)));
        }
        if let Some(p) = players.iter().find(|p| p.remain_chip() == 0) {
            return Err(HandError::Seating(format!("seat {} has no chips", p.position())));
        }
        Ok(())
    }

    fn handle(&mut self, command: Command) -> Result<(), HandError> {
        match command {
            Command::Act(action, reply) => {
                let verdict = self.act(action)?;
                let _ = reply.send(verdict);
            }
            Command::Scene(viewer, reply) => {
                let _ = reply.send(self.scene(viewer));
            }
            Command::Leave(user, reply) => {
                let _ = reply.send(self.can_leave(user));
            }
        }
        Ok(())
    }

    fn act(&mut self, action: Action) -> Result<Verdict, HandError> {
        let seat = self.actor;
        let round = self.round;
        if action.seat != seat || action.round != round {
            log::debug!("[game {}] {} out of turn, P{} r{} expected", self.id, action, seat, round);
            return Ok(Verdict::Rejected(Rejection::OutOfTurn { seat, round }));
        }
        let player = &mut self.players[seat];
        if player.discarded() || player.all_inned() {
            log::debug!("[game {}] {} from inactive seat", self.id, action);
            return Ok(Verdict::Rejected(Rejection::Inactive));
        }
        match action.kind {
            ActionKind::Bet => {
                let remain = player.remain_chip();
                let owed = self.ledger.max_bet(round) - self.ledger.round_bet(round, seat);
                if action.amount > remain {
                    log::debug!("[game {}] {} exceeds stack {}", self.id, action, remain);
                    return Ok(Verdict::Rejected(Rejection::Insufficient { remain }));
                }
                if action.amount < remain && action.amount < owed {
                    log::debug!("[game {}] {} short of {}", self.id, action, owed);
                    return Ok(Verdict::Rejected(Rejection::UnderCall { to_call: owed }));
                }
                let Wager::Placed { all_in } = player.bet(action.amount) else {
                    return Ok(Verdict::Rejected(Rejection::Insufficient { remain }));
                };
                if all_in {
                    self.all_in += 1;
                }
                self.ledger.bet(round, seat, action.amount, all_in)?;
                log::debug!("[game {}] {}{}", self.id, action, if all_in { " all-in" } else { "" });
                self.announce(seat, ActionKind::Bet, action.amount, all_in, false);
            }
            ActionKind::Discard => {
                player.discard();
                self.folded += 1;
                log::debug!("[game {}] {}", self.id, action);
                self.announce(seat, ActionKind::Discard, 0, false, false);
            }
        }
        self.acted.insert(seat);
        self.advance()?;
        Ok(Verdict::Applied)
    }

    fn timeout(&mut self, expiry: Expiry) -> Result<(), HandError> {
        let seat = self.actor;
        if expiry.seat != seat || expiry.round != self.round {
            log::trace!("[game {}] stale timeout {:?}", self.id, expiry);
            return Ok(());
        }
        let player = &self.players[seat];
        if player.discarded() || player.all_inned() {
            return Ok(());
        }
        if self.ledger.has_matched(self.round, seat) {
            log::debug!("[game {}] P{} timed out, checking", self.id, seat);
            self.announce(seat, ActionKind::Bet, 0, false, true);
        } else {
            log::debug!("[game {}] P{} timed out, folding", self.id, seat);
            self.players[seat].discard();
            self.folded += 1;
            self.announce(seat, ActionKind::Discard, 0, false, true);
        }
        self.acted.insert(seat);
        self.advance()
    }

    /// Moves the turn along after an applied action or timeout, closing
    /// the round or the hand when nobody is left to act.
    fn advance(&mut self) -> Result<(), HandError> {
        let n = self.players.len();
        if self.folded + 1 == n {
            return self.fold_out();
        }
        if self.folded + self.all_in >= n {
            return self.run_out();
        }
        let next = self.next_actor(self.actor)?;
        self.actor = next;
        let closed = match self.ledger.max_bet(self.round) {
            0 => next == self.opener || self.acted.contains(&next),
            max => self.ledger.round_bet(self.round, next) == max,
        };
        if closed {
            self.close_round()?;
        }
        if self.over { Ok(()) } else { self.arm() }
    }

    fn close_round(&mut self) -> Result<(), HandError> {
        if self.folded + self.all_in + 1 >= self.players.len() {
            return self.run_out();
        }
        self.round += 1;
        self.acted.clear();
        if self.round > ROUNDS {
            return self.showdown();
        }
        self.opener = self.next_actor(DEALER)?;
        self.actor = self.opener;
        log::debug!("[game {}] round {} opens at P{}", self.id, self.round, self.opener);
        self.deal()
    }

    /// Seats that can still act, searched clockwise from `from` (exclusive)
    /// all the way around to `from` itself.
    fn next_actor(&self, from: Position) -> Result<Position, HandError> {
        let n = self.players.len();
        (1..=n)
            .map(|step| (from + step) % n)
            .find(|&seat| !self.players[seat].discarded() && !self.players[seat].all_inned())
            .ok_or(HandError::NoActor {
                round: self.round,
                from,
            })
    }

    fn post(&mut self, seat: Position, blind: Chips) -> Result<(), HandError> {
        let player = &mut self.players[seat];
        let amount = blind.min(player.remain_chip());
        let Wager::Placed { all_in } = player.bet(amount) else {
            return Err(HandError::Seating(format!("seat {} cannot post {}", seat, amount)));
        };
        if all_in {
            self.all_in += 1;
        }
        self.ledger.bet(self.round, seat, amount, all_in)?;
        self.announce(seat, ActionKind::Bet, amount, all_in, false);
        Ok(())
    }

    fn deal(&mut self) -> Result<(), HandError> {
        match self.round {
            1 => {
                for player in self.players.iter_mut() {
                    let cards = self.deck.dispatch(HOLE_CARDS)?;
                    player.got_cards(cards.clone());
                    self.outbox.send_to(
                        player.position(),
                        Event::HoleCards {
                            hand: self.id,
                            seat: player.position(),
                            cards,
                        },
                    );
                }
            }
            round @ 2..=ROUNDS => {
                let cards = self.deck.dispatch(community_cards(round))?;
                self.board.extend(cards);
                self.outbox.broadcast(Event::Board {
                    hand: self.id,
                    round,
                    cards: self.board.clone(),
                });
            }
            round => log::warn!("[game {}] nothing to deal in round {}", self.id, round),
        }
        Ok(())
    }

    /// Nobody can act any more: deal every outstanding board card and
    /// go straight to showdown.
    fn run_out(&mut self) -> Result<(), HandError> {
        log::debug!("[game {}] no decisions left, running out the board", self.id);
        while self.round < ROUNDS {
            self.round += 1;
            self.deal()?;
        }
        self.showdown()
    }

    fn showdown(&mut self) -> Result<(), HandError> {
        self.round = ROUNDS + 1;
        let board = self.board.clone();
        let entries = self
            .players
            .iter_mut()
            .filter(|p| !p.discarded())
            .map(|p| (p.position(), p.hand(&board)))
            .collect::<Vec<_>>();
        let groups = standings(self.matcher.as_ref(), entries);
        log::debug!("[game {}] showdown standings {:?}", self.id, groups);
        let payouts = self.ledger.finalize(&groups);
        self.settle(payouts)
    }

    fn fold_out(&mut self) -> Result<(), HandError> {
        let survivor = self
            .players
            .iter()
            .find(|p| !p.discarded())
            .map(P::position)
            .ok_or(HandError::NoActor {
                round: self.round,
                from: self.actor,
            })?;
        log::debug!("[game {}] P{} wins uncontested", self.id, survivor);
        let payouts = self.ledger.sweep(survivor);
        self.settle(payouts)
    }

    fn settle(&mut self, payouts: Payouts) -> Result<(), HandError> {
        for (seat, chips) in payouts.iter() {
            self.players[seat].win_chip(chips);
        }
        for player in self.players.iter() {
            log::info!("[game {}] P{} {}", self.id, player.position(), player.result());
        }
        self.over = true;
        self.outbox.broadcast(Event::HandEnd {
            hand: self.id,
            payouts,
        });
        Ok(())
    }

    fn arm(&mut self) -> Result<(), HandError> {
        let seat = self.actor;
        let round = self.round;
        self.timer.set(self.config.decision, Expiry { round, seat })?;
        self.outbox.broadcast(Event::Turn {
            hand: self.id,
            round,
            seat,
            to_call: self.ledger.max_bet(round) - self.ledger.round_bet(round, seat),
            timeout_ms: self.config.decision.as_millis() as u64,
        });
        Ok(())
    }

    fn announce(&self, seat: Position, kind: ActionKind, amount: Chips, all_in: bool, timed_out: bool) {
        self.outbox.broadcast(Event::Action {
            hand: self.id,
            round: self.round,
            seat,
            kind,
            amount,
            all_in,
            timed_out,
            pot: self.ledger.pot(),
        });
    }

    fn scene(&self, viewer: ID<User>) -> Scene {
        Scene {
            actor: self.players[self.actor].id(),
            actor_seat: self.actor,
            round: self.round,
            max_bet: self.ledger.max_bet(self.round),
            seats: self
                .players
                .iter()
                .map(|p| SeatScene {
                    id: p.id(),
                    position: p.position(),
                    remain: p.remain_chip(),
                    status: match (p.all_inned(), p.discarded()) {
                        (true, _) => Status::AllInned,
                        (_, true) => Status::Discarded,
                        _ => Status::Normal,
                    },
                    cards: match p.id() == viewer {
                        true => p.cards().to_vec(),
                        false => Vec::new(),
                    },
                })
                .collect(),
            board: self.board.clone(),
            pots: self.ledger.tiers().iter().map(Tier::total).collect(),
        }
    }

    fn can_leave(&self, user: ID<User>) -> bool {
        match self.players.iter().find(|p| p.id() == user) {
            Some(p) => p.discarded(),
            None => {
                log::warn!("[game {}] leave check for unseated user {}", self.id, user);
                true
            }
        }
    }
}
