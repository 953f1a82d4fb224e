//! Single-hand poker engine.
//!
//! A [`Game`] owns the seats, the [`Ledger`](holdem_ledger::Ledger), the
//! deck and a decision [`Timer`], and runs as one tokio task. Everything
//! that touches the hand (player actions, timer expiries, scene queries,
//! leave checks) is serialized through its command queue, so no state is
//! ever shared behind a lock.
//!
//! ## Flow
//!
//! - [`Game::new`] validates the seating and returns the engine plus a [`Handle`]
//! - [`Game::run`] deals, posts blinds, and drives the hand to completion
//! - [`Handle`] submits [`Action`]s and queries [`Scene`]s while it runs
//! - [`Outbox`] receives every outbound [`Event`]
//! - [`GameResult`] carries the settled players back to the table
mod action;
mod config;
mod error;
mod event;
mod game;
mod handle;
mod player;
mod scene;
mod seat;
mod table;
mod timer;

pub use action::*;
pub use config::*;
pub use error::*;
pub use event::*;
pub use game::*;
pub use handle::*;
pub use player::*;
pub use scene::*;
pub use seat::*;
pub use table::*;
pub use timer::*;
