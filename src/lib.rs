//! Single-hand No-Limit Texas Hold'em engine.
//!
//! This facade crate re-exports the holdem crates for convenient access.
//!
//! ## Crate Organization
//!
//! - [`core`]: Type aliases, identifiers, table constants, logging
//! - [`cards`]: Cards, decks, hand evaluation and comparison
//! - [`ledger`]: Per-round bets and the side-pot tier chain
//! - [`room`]: The async hand engine, its timer, handles and outboxes
//!
//! [`Fish`] is a throwaway bot that drives a seat from its event stream.
mod fish;

pub use fish::Fish;

pub use holdem_cards as cards;
pub use holdem_core as core;
pub use holdem_ledger as ledger;
pub use holdem_room as room;

// Re-export commonly used types at the root
pub use holdem_cards::*;
pub use holdem_core::*;
pub use holdem_ledger::*;
pub use holdem_room::*;
