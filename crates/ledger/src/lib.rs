//! Side-pot accounting for a single hand.
//!
//! ## Core Types
//!
//! - [`Ledger`]: Per-round contributions plus the ordered tier chain
//! - [`Tier`]: One side pot: contributors, cap, and all-in flag
//! - [`Payouts`]: Chips won per seat after a ranking is applied
//! - [`LedgerError`]: Rejected or runaway bets
mod error;
mod ledger;
mod payouts;
mod tier;

pub use error::*;
pub use ledger::*;
pub use payouts::*;
pub use tier::*;
