//! Perft command - count the legal move tree

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Args;

use abalone_core::{generate_moves, perft, MoveKind};

use crate::setup::load_state;

#[derive(Args)]
pub struct PerftArgs {
    /// Plies to expand
    #[arg(long, default_value = "2")]
    pub depth: u32,

    /// Starting layout JSON file (standard start if omitted)
    #[arg(long, value_name = "FILE")]
    pub layout: Option<PathBuf>,
}

/// Run perft command
pub fn run(args: PerftArgs) -> Result<()> {
    let state = load_state(args.layout.as_deref())?;

    let moves = generate_moves(&state, state.current_player());
    let inline = moves.iter().filter(|m| m.kind == MoveKind::Inline).count();
    println!(
        "{} legal moves for {:?} ({} inline, {} broadside)",
        moves.len(),
        state.current_player(),
        inline,
        moves.len() - inline
    );

    for depth in 1..=args.depth {
        let start = Instant::now();
        let nodes = perft(&state, depth);
        let elapsed = start.elapsed();
        tracing::info!(depth, nodes, ?elapsed, "perft");
        println!("depth {}: {} nodes ({:.2?})", depth, nodes, elapsed);
    }
    Ok(())
}
