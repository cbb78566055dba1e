//! Abalone CLI - Command-line interface
//!
//! Commands:
//! - play: Let two AIs play a single game
//! - match: Play a series of games between two difficulty levels
//! - perft: Count the legal move tree of a position

mod match_cmd;
mod perft_cmd;
mod play_cmd;
mod setup;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "abalone")]
#[command(about = "Abalone rules engine and AI")]
struct Cli {
    /// Random seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Let two AIs play a single game
    Play(play_cmd::PlayArgs),
    /// Play a series of games between two difficulty levels
    Match(match_cmd::MatchArgs),
    /// Count the legal move tree of a position
    Perft(perft_cmd::PerftArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play_cmd::run(args, cli.seed),
        Commands::Match(args) => match_cmd::run(args, cli.seed),
        Commands::Perft(args) => perft_cmd::run(args),
    }
}
