//! Table Binary
//!
//! Deals one hand between random bots and prints each seat's result.
//! Configuration comes from HOLDEM_* environment variables, overridden
//! by flags.

use clap::Parser;
use holdem::*;
use rand::Rng;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::unbounded_channel;
use tokio::sync::oneshot;

#[derive(Parser, Debug)]
#[command(about = "Deal one hand of hold'em between random bots")]
struct Args {
    /// Number of seats, dealer at seat 0
    #[arg(short, long, default_value_t = 6)]
    seats: usize,
    /// Chips each bot brings, capped by the table's max bring-in
    #[arg(long, default_value_t = MAX_BRING_IN)]
    stack: Chips,
    #[arg(long)]
    small_blind: Option<Chips>,
    /// Decision window such as "500ms" or "10s"
    #[arg(long, value_parser = parse_duration)]
    decision: Option<Duration>,
    #[arg(long)]
    max_bring_in: Option<Chips>,
    /// Seed for the deck and the bots
    #[arg(long)]
    seed: Option<u64>,
    /// Print every event seen from seat 0 as a JSON line
    #[arg(long)]
    json: bool,
}

impl Args {
    fn config(&self) -> anyhow::Result<TableConfig> {
        let mut config = TableConfig::from_env()?;
        if let Some(small_blind) = self.small_blind {
            config.small_blind = small_blind;
        }
        if let Some(decision) = self.decision {
            config.decision = decision;
        }
        if let Some(max_bring_in) = self.max_bring_in {
            config.max_bring_in = max_bring_in;
        }
        Ok(config)
    }
}

/// Echoes a seat's events to stdout before passing them on.
fn tee(mut inbox: UnboundedReceiver<Event>) -> UnboundedReceiver<Event> {
    let (tx, rx) = unbounded_channel();
    tokio::spawn(async move {
        while let Some(event) = inbox.recv().await {
            match serde_json::to_string(&event) {
                Ok(line) => println!("{}", line),
                Err(e) => log::warn!("unprintable event {}: {}", event, e),
            }
            if tx.send(event).is_err() {
                break;
            }
        }
    });
    rx
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    holdem::log(log::LevelFilter::Info)?;
    let args = Args::parse();
    let config = args.config()?;
    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    log::info!("dealing {} seats with seed {}", args.seats, seed);
    let players = (0..args.seats)
        .map(|i| Seat::new(i, ID::default(), args.stack, config.max_bring_in))
        .collect::<Vec<_>>();
    let mut table = Table::new(args.seats);
    let mut inboxes = Vec::with_capacity(args.seats);
    for seat in 0..args.seats {
        let (tx, rx) = unbounded_channel();
        table.sit(seat, tx);
        inboxes.push(rx);
    }
    let (game, handle) = Game::new(config, players, table)?;
    let game = game.with_deck(Deck::seeded(seed));
    for (seat, inbox) in inboxes.into_iter().enumerate() {
        let inbox = match args.json && seat == DEALER {
            true => tee(inbox),
            false => inbox,
        };
        let fish = Fish::new(seat, handle.clone(), seed.wrapping_add(1 + seat as u64));
        tokio::spawn(fish.play(inbox));
    }
    let (done, result) = oneshot::channel();
    tokio::spawn(game.run(done)).await??;
    let result = result.await?;
    println!("hand {}", result.id());
    for player in result.players() {
        println!("{}  {:>+6}", player, player.result().signed());
    }
    Ok(())
}
