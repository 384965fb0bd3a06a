//! Hex-Reversi: Reversi on a hexagonal board.
//!
//! ## Usage
//!
//! - `hex-reversi` - Play a capture-max self-play match on the default board
//! - `hex-reversi selfplay --black random --white capture-max --seed 7`
//! - `hex-reversi --size 4 protocol` - Speak the text protocol on stdin/stdout
//!
//! Logs go to stderr; `--log-level` or `RUST_LOG` picks the filter.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use hex_reversi::constants::{DEFAULT_BOARD_SIZE, DEFAULT_MAX_TURNS};
use hex_reversi::game::Game;
use hex_reversi::playout::play_out;
use hex_reversi::protocol::ProtocolEngine;
use hex_reversi::snapshot::Snapshot;
use hex_reversi::strategy::StrategyKind;

/// Hex-Reversi: Reversi played on a hexagonal board
#[derive(Parser)]
#[command(name = "hex-reversi")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Board edge length
    #[arg(long, global = true, default_value_t = DEFAULT_BOARD_SIZE)]
    size: usize,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play two strategies against each other and print the result
    Selfplay(SelfplayArgs),
    /// Speak the line-based text protocol on stdin/stdout
    Protocol {
        /// Strategy used by `genmove`
        #[arg(long, value_enum, default_value_t = StrategyKind::CaptureMax)]
        strategy: StrategyKind,

        /// Seed for the random strategy
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

#[derive(clap::Args)]
struct SelfplayArgs {
    /// Strategy playing black
    #[arg(long, value_enum, default_value_t = StrategyKind::CaptureMax)]
    black: StrategyKind,

    /// Strategy playing white
    #[arg(long, value_enum, default_value_t = StrategyKind::CaptureMax)]
    white: StrategyKind,

    /// Seed for random strategies
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Resume from a JSON snapshot instead of the opening position
    #[arg(long)]
    resume: Option<PathBuf>,

    /// Write a JSON snapshot of the final position
    #[arg(long)]
    save: Option<PathBuf>,

    /// Stop after this many decisions
    #[arg(long, default_value_t = DEFAULT_MAX_TURNS)]
    max_turns: usize,
}

impl Default for SelfplayArgs {
    fn default() -> Self {
        Self {
            black: StrategyKind::CaptureMax,
            white: StrategyKind::CaptureMax,
            seed: 0,
            resume: None,
            save: None,
            max_turns: DEFAULT_MAX_TURNS,
        }
    }
}

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("invalid log level '{level}'"))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;
    info!(size = cli.size, "starting");

    match cli.command {
        Some(Commands::Protocol { strategy, seed }) => {
            let mut engine = ProtocolEngine::new(cli.size)?.with_strategy(strategy, seed);
            engine.run_stdio().context("protocol I/O failed")?;
        }
        Some(Commands::Selfplay(args)) => run_selfplay(cli.size, &args)?,
        None => run_selfplay(cli.size, &SelfplayArgs::default())?,
    }
    Ok(())
}

fn run_selfplay(size: usize, args: &SelfplayArgs) -> Result<()> {
    let mut game = Game::new(size)?;
    match &args.resume {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("cannot read snapshot {}", path.display()))?;
            game.resume(Snapshot::from_json(&json)?)?;
            info!(path = %path.display(), size = game.size(), "resumed");
        }
        None => game.start_game()?,
    }

    let black = args.black.build(args.seed);
    // White draws from the next seed.
    let white = args.white.build(args.seed.wrapping_add(1));

    println!("{}", game.render()?);
    let record = play_out(&mut game, black.as_ref(), white.as_ref(), args.max_turns)?;
    println!("{}", game.render()?);

    println!(
        "black ({}) {}  white ({}) {}",
        black.name(),
        record.black_score,
        white.name(),
        record.white_score
    );
    println!(
        "{} moves, {} passes",
        record.moves_played(),
        record.decisions.len() - record.moves_played()
    );
    match (record.finished, record.winner()) {
        (false, _) => println!("stopped after {} turns", record.decisions.len()),
        (true, Some(color)) => println!("{color} wins"),
        (true, None) => println!("draw"),
    }

    if let Some(path) = &args.save {
        let json = game.snapshot()?.to_json()?;
        fs::write(path, json).with_context(|| format!("cannot write {}", path.display()))?;
        info!(path = %path.display(), "saved snapshot");
    }
    Ok(())
}
