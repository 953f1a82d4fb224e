//! Core type aliases, identifiers, and table constants for holdem.
//!
//! This crate provides the foundational types shared by the ledger,
//! the card primitives, and the game room.

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Stack sizes and bet amounts in chips.
pub type Chips = u64;
/// Seat index around the table (0 = dealer).
pub type Position = usize;
/// Betting round of a hand, 1 through 4. Round 5 marks the showdown.
pub type Round = u8;

// ============================================================================
// IDENTITY TYPES
// ============================================================================
use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;

/// Generic ID wrapper providing compile-time type safety over uuid::Uuid.
pub struct ID<T> {
    inner: uuid::Uuid,
    marker: PhantomData<T>,
}

impl<T> ID<T> {
    pub fn inner(&self) -> uuid::Uuid {
        self.inner
    }
    /// Cast ID<T> to ID<U> while preserving the underlying UUID.
    pub fn cast<U>(self) -> ID<U> {
        ID {
            inner: self.inner,
            marker: PhantomData,
        }
    }
}

impl<T> From<ID<T>> for uuid::Uuid {
    fn from(id: ID<T>) -> Self {
        id.inner()
    }
}
impl<T> From<uuid::Uuid> for ID<T> {
    fn from(inner: uuid::Uuid) -> Self {
        Self {
            inner,
            marker: PhantomData,
        }
    }
}

/// Fresh v7 ids sort by creation time, which keeps hand logs ordered.
impl<T> Default for ID<T> {
    fn default() -> Self {
        Self {
            inner: uuid::Uuid::now_v7(),
            marker: PhantomData,
        }
    }
}

impl<T> Copy for ID<T> {}
impl<T> Clone for ID<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Eq for ID<T> {}
impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Ord for ID<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<T> PartialOrd for ID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Hash for ID<T> {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.inner.hash(state);
    }
}

impl<T> Debug for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ID").field(&self.inner).finish()
    }
}
impl<T> Display for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

impl<T> serde::Serialize for ID<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.inner.serialize(serializer)
    }
}

// ============================================================================
// TABLE PARAMETERS
// The dealer button never moves within a hand; rotation belongs to the table.
// ============================================================================
/// Seat holding the dealer button for the duration of a hand.
pub const DEALER: Position = 0;
/// Small blind sits immediately left of the dealer.
pub const SMALL_BLIND_OFFSET: Position = 1;
/// Big blind sits two seats left of the dealer.
pub const BIG_BLIND_OFFSET: Position = 2;
/// First to act in round 1 is left of the big blind.
pub const FIRST_ACTOR_OFFSET: Position = 3;
/// Fewest seats that can host blinds plus a distinct first actor.
pub const MIN_SEATS: usize = 3;
/// Most seats a single deck can serve with room for the board.
pub const MAX_SEATS: usize = 10;
/// Number of betting rounds in a hand.
pub const ROUNDS: Round = 4;
/// Hole cards dealt to each seat.
pub const HOLE_CARDS: usize = 2;
/// Upper bound on tier hops while routing one bet through the ledger.
pub const MAX_TIER_HOPS: usize = 20;

// ============================================================================
// DEFAULT TABLE CONFIGURATION
// ============================================================================
/// Small blind unit; the big blind is twice this.
pub const SMALL_BLIND: Chips = 10;
/// Largest stack a player may bring to the table.
pub const MAX_BRING_IN: Chips = 2000;
/// Seconds a seat has to act before the timer resolves its turn.
pub const DECISION_TIMEOUT: u64 = 10;

/// Number of community cards revealed when the given round opens.
pub const fn community_cards(round: Round) -> usize {
    match round {
        2 => 3,
        3 | 4 => 1,
        _ => 0,
    }
}

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, `level` to terminal.
pub fn log(level: log::LevelFilter) -> anyhow::Result<()> {
    std::fs::create_dir_all("logs")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time))?,
    );
    let term = simplelog::TermLogger::new(
        level,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file])?;
    Ok(())
}

/// Parse duration string like "500ms", "30s", "5m", "2h" into Duration.
pub fn parse_duration(s: &str) -> anyhow::Result<std::time::Duration> {
    let s = s.trim();
    if let Some(millis) = s.strip_suffix("ms") {
        return Ok(std::time::Duration::from_millis(millis.parse()?));
    }
    let (num, unit) = s.split_at(s.len().saturating_sub(1));
    let value: u64 = num
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid duration {:?}", s))?;
    match unit {
        "s" => Ok(std::time::Duration::from_secs(value)),
        "m" => Ok(std::time::Duration::from_secs(value * 60)),
        "h" => Ok(std::time::Duration::from_secs(value * 3600)),
        _ => Err(anyhow::anyhow!("unknown duration unit in {:?}", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn durations_parse() {
        assert_eq!(parse_duration("30s").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_duration("5m").unwrap(), Duration::from_secs(300));
        assert_eq!(parse_duration("2h").unwrap(), Duration::from_secs(7200));
        assert_eq!(parse_duration("250ms").unwrap(), Duration::from_millis(250));
    }
    #[test]
    fn durations_reject_garbage() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("10x").is_err());
        assert!(parse_duration("s").is_err());
    }
    #[test]
    fn community_cards_per_round() {
        assert_eq!(community_cards(1), 0);
        assert_eq!(community_cards(2), 3);
        assert_eq!(community_cards(3), 1);
        assert_eq!(community_cards(4), 1);
        assert_eq!(community_cards(5), 0);
    }
    #[test]
    fn ids_are_unique_and_castable() {
        struct A;
        struct B;
        let a = ID::<A>::default();
        let b = ID::<A>::default();
        assert_ne!(a, b);
        let c: ID<B> = a.cast();
        assert_eq!(a.inner(), c.inner());
    }
}
