//! Headless bomber match runner.
//!
//! Runs agent sessions against the local rules engine without a network
//! or a ledger. Frames render to stdout; logs go to stderr.
//!
//! # Usage
//!
//! ```bash
//! # Run a generated 2-bot match for 80 ticks
//! cargo run -p bomber_headless -- run
//!
//! # Replay a recorded snapshot with a fixed seed
//! cargo run -p bomber_headless -- run --scenario snapshot.json --seed 42
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bomber_core::arena::ArenaStatus;
use bomber_core::session::Session;
use bomber_headless::scenario::load_arena;
use bomber_headless::sim::{generate_arena, ArenaConfig, LocalArena};
use bomber_headless::view::render_with_status;

#[derive(Parser)]
#[command(name = "bomber_headless")]
#[command(about = "Headless bomber match runner for agent testing")]
#[command(version)]
struct Cli {
    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one local match to completion or a tick limit
    Run {
        /// Recorded snapshot JSON to start from instead of a generated arena
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        /// Maximum number of ticks to simulate
        #[arg(short, long, default_value = "80")]
        ticks: u64,

        /// Random seed for arena generation and agent exploration
        #[arg(long, default_value = "12345")]
        seed: u64,

        /// Number of bots in a generated arena (ignored with --scenario)
        #[arg(short, long, default_value = "2")]
        bots: u32,

        /// Print a frame after every tick instead of only the last
        #[arg(long)]
        frames: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    // Logging goes to stderr, frames to stdout. RUST_LOG overrides the
    // verbose flag.
    let default_filter = if cli.verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true),
        )
        .with(filter)
        .init();

    match cli.command {
        Commands::Run {
            scenario,
            ticks,
            seed,
            bots,
            frames,
        } => {
            if let Err(error) = cmd_run(scenario, ticks, seed, bots, frames) {
                tracing::error!(%error, "run failed");
                std::process::exit(1);
            }
        }
    }
}

fn cmd_run(
    scenario: Option<PathBuf>,
    ticks: u64,
    seed: u64,
    bots: u32,
    frames: bool,
) -> Result<(), bomber_headless::scenario::ScenarioError> {
    let arena = match scenario {
        Some(path) => load_arena(&path)?,
        None => generate_arena(&ArenaConfig {
            bots,
            ..ArenaConfig::default().with_seed(seed)
        }),
    };

    // One session per living combatant. The wall-clock cooldown is for
    // live play; locally every tick gets a fresh decision.
    let mut sessions: Vec<Session> = arena
        .living_combatants()
        .enumerate()
        .map(|(index, combatant)| {
            Session::new(combatant.id.clone(), seed.wrapping_add(index as u64))
                .with_cooldown(Duration::ZERO)
        })
        .collect();

    tracing::info!(
        arena = arena.id,
        bots = sessions.len(),
        ticks,
        "starting match"
    );

    let mut sim = LocalArena::new(arena);
    for _ in 0..ticks {
        for session in &mut sessions {
            let action = session.decide(sim.arena());
            tracing::debug!(agent = %session.id(), ?action, mode = ?session.mode(), "acted");
            let id = session.id().clone();
            sim.apply(&id, action);
        }
        sim.tick();

        if frames {
            println!("{}", render_with_status(sim.arena()));
        }
        if let ArenaStatus::Ended { winner } = &sim.arena().status {
            match winner {
                Some(id) => tracing::info!(winner = %id, "match over"),
                None => tracing::info!("match over with no survivor"),
            }
            break;
        }
    }

    println!("{}", render_with_status(sim.arena()));
    Ok(())
}
