use super::action::*;
use super::game::Hand;
use super::player::User;
use super::scene::Scene;
use holdem_core::ID;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::oneshot;

/// Requests serialized through the engine's queue, each with its reply slot.
#[derive(Debug)]
pub(crate) enum Command {
    Act(Action, oneshot::Sender<Verdict>),
    Scene(ID<User>, oneshot::Sender<Scene>),
    Leave(ID<User>, oneshot::Sender<bool>),
}

/// Client side of a running [`Game`](crate::Game).
///
/// Cheap to clone. Once the hand is over every call resolves immediately:
/// actions are [`Verdict::Closed`], scenes are `None`, and anyone may leave.
#[derive(Debug, Clone)]
pub struct Handle {
    hand: ID<Hand>,
    commands: UnboundedSender<Command>,
}

impl Handle {
    pub(crate) fn new(hand: ID<Hand>, commands: UnboundedSender<Command>) -> Self {
        Self { hand, commands }
    }
    pub fn hand(&self) -> ID<Hand> {
        self.hand
    }
    pub async fn act(&self, action: Action) -> Verdict {
        let (tx, rx) = oneshot::channel();
        match self.commands.send(Command::Act(action, tx)) {
            Ok(()) => rx.await.unwrap_or(Verdict::Closed),
            Err(_) => Verdict::Closed,
        }
    }
    pub async fn scene(&self, viewer: ID<User>) -> Option<Scene> {
        let (tx, rx) = oneshot::channel();
        self.commands.send(Command::Scene(viewer, tx)).ok()?;
        rx.await.ok()
    }
    pub async fn can_leave(&self, user: ID<User>) -> bool {
        let (tx, rx) = oneshot::channel();
        match self.commands.send(Command::Leave(user, tx)) {
            Ok(()) => rx.await.unwrap_or(true),
            Err(_) => true,
        }
    }
}
