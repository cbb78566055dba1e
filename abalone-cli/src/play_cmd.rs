//! Play command - two AIs play one game

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use rand::Rng;

use abalone_core::{play_game, AiConfig, AlphaBetaAI, Difficulty, GameState, Move, Player, Weights};

use crate::setup::{create_rng, load_state, load_weights};

#[derive(Args)]
pub struct PlayArgs {
    /// Black difficulty (easy, medium, hard)
    #[arg(long, default_value = "medium")]
    pub black: Difficulty,

    /// White difficulty (easy, medium, hard)
    #[arg(long, default_value = "medium")]
    pub white: Difficulty,

    /// Stop after this many moves without a winner
    #[arg(long, default_value = "200")]
    pub max_moves: usize,

    /// Starting layout JSON file (standard start if omitted)
    #[arg(long, value_name = "FILE")]
    pub layout: Option<PathBuf>,

    /// Evaluation weights JSON file
    #[arg(long, value_name = "FILE")]
    pub weights: Option<PathBuf>,

    /// Print the board after every move
    #[arg(long)]
    pub show_board: bool,

    /// Output the game as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run play command
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let state = load_state(args.layout.as_deref())?;
    let weights = load_weights(args.weights.as_deref())?;
    let mut rng = create_rng(seed);

    let mut black = create_ai(args.black, weights, rng.gen());
    let mut white = create_ai(args.white, weights, rng.gen());

    tracing::info!("Starting game: black={} white={}", args.black, args.white);

    let (final_state, moves) = play_game(state, &mut black, &mut white, args.max_moves, |state, mv| {
        if args.show_board {
            println!("{:?} -> {}\n{}", mv.selection, mv.target(), state.board());
        }
    });

    if args.json {
        print_json(&final_state, &moves)?;
    } else {
        print_text(&final_state, &moves);
    }
    Ok(())
}

/// Build an AI for one side
pub fn create_ai(difficulty: Difficulty, weights: Weights, seed: u64) -> AlphaBetaAI {
    AlphaBetaAI::new(AiConfig::new(difficulty).with_weights(weights).with_seed(seed))
}

fn print_text(state: &GameState, moves: &[Move]) {
    println!("{}", state.board());
    println!(
        "Score: black {} / white {} after {} moves",
        state.score(Player::Black),
        state.score(Player::White),
        moves.len()
    );
    match state.winner() {
        Some(player) => println!("Winner: {:?}", player),
        None => println!("No winner"),
    }
}

fn print_json(state: &GameState, moves: &[Move]) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        winner: Option<Player>,
        black_score: u8,
        white_score: u8,
        moves: &'a [Move],
    }

    let output = JsonOutput {
        winner: state.winner(),
        black_score: state.score(Player::Black),
        white_score: state.score(Player::White),
        moves,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_ai_carries_settings() {
        let weights = Weights {
            mobility: 0,
            ..Weights::default()
        };
        let ai = create_ai(Difficulty::Hard, weights, 9);
        assert_eq!(ai.config().difficulty, Difficulty::Hard);
        assert_eq!(ai.config().weights, weights);
        assert_eq!(ai.config().seed, Some(9));
    }

    #[test]
    fn test_seeded_games_repeat() {
        let replay = || {
            let mut black = create_ai(Difficulty::Easy, Weights::default(), 1);
            let mut white = create_ai(Difficulty::Easy, Weights::default(), 2);
            play_game(GameState::new(), &mut black, &mut white, 8, |_, _| {})
        };
        let (first_state, first_moves) = replay();
        let (second_state, second_moves) = replay();
        assert_eq!(first_state, second_state);
        assert_eq!(first_moves, second_moves);
    }
}
