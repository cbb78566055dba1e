//! Match command - play a series of games between two difficulty levels
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_match(), report_results()
//! - Level 3: play_single_game(), compute_match_statistics()
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use abalone_core::{play_game, Difficulty, GameState, Player, Weights};

use crate::play_cmd::create_ai;
use crate::setup::{create_rng, load_state, load_weights};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Difficulty of the first player (plays Black in odd games)
    #[arg(long, default_value = "hard")]
    pub first: Difficulty,

    /// Difficulty of the second player
    #[arg(long, default_value = "easy")]
    pub second: Difficulty,

    /// Number of games to play (will alternate colors)
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Maximum moves per game before it is scored a draw
    #[arg(long, default_value = "200")]
    pub max_moves: usize,

    /// Starting layout JSON file (standard start if omitted)
    #[arg(long, value_name = "FILE")]
    pub layout: Option<PathBuf>,

    /// Evaluation weights JSON file
    #[arg(long, value_name = "FILE")]
    pub weights: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    winner: Option<Player>,
    moves: usize,
    /// Color the first player had
    first_color: Player,
}

impl GameRecord {
    fn first_won(&self) -> bool {
        self.winner == Some(self.first_color)
    }

    fn second_won(&self) -> bool {
        self.winner == Some(self.first_color.opponent())
    }
}

/// Aggregated match results
#[derive(Clone, Debug)]
struct MatchResults {
    games: Vec<GameRecord>,
    first_wins: usize,
    second_wins: usize,
    draws: usize,
    avg_moves: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
pub fn run(args: MatchArgs, seed: Option<u64>) -> Result<()> {
    let initial = load_state(args.layout.as_deref())?;
    let weights = load_weights(args.weights.as_deref())?;

    tracing::info!(
        "Starting match: {} vs {} ({} games)",
        args.first,
        args.second,
        args.games
    );

    let results = play_match(initial, weights, &args, seed);

    report_results(&results, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play all games in the match
fn play_match(initial: GameState, weights: Weights, args: &MatchArgs, seed: Option<u64>) -> MatchResults {
    let mut rng = create_rng(seed);
    let mut games = Vec::with_capacity(args.games);

    for game_num in 0..args.games {
        // Alternate colors for fairness
        let first_color = if game_num % 2 == 0 { Player::Black } else { Player::White };

        let record = play_single_game(initial, weights, first_color, game_num + 1, args, &mut rng);

        tracing::info!(
            "Game {}: winner {:?} ({} moves)",
            record.game_number,
            record.winner,
            record.moves
        );

        games.push(record);
    }

    compute_match_statistics(games)
}

/// Report match results
fn report_results(results: &MatchResults, args: &MatchArgs) -> Result<()> {
    if args.json {
        print_json_results(results, args)
    } else {
        print_text_results(results, args);
        Ok(())
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play a single game with the first player on `first_color`
fn play_single_game(
    initial: GameState,
    weights: Weights,
    first_color: Player,
    game_number: usize,
    args: &MatchArgs,
    rng: &mut ChaCha8Rng,
) -> GameRecord {
    let mut first = create_ai(args.first, weights, rng.gen());
    let mut second = create_ai(args.second, weights, rng.gen());

    let (black, white) = match first_color {
        Player::Black => (&mut first, &mut second),
        Player::White => (&mut second, &mut first),
    };
    let (final_state, moves) = play_game(initial, black, white, args.max_moves, |_, _| {});

    GameRecord {
        game_number,
        winner: final_state.winner(),
        moves: moves.len(),
        first_color,
    }
}

/// Compute aggregate statistics from game records
fn compute_match_statistics(games: Vec<GameRecord>) -> MatchResults {
    let first_wins = games.iter().filter(|g| g.first_won()).count();
    let second_wins = games.iter().filter(|g| g.second_won()).count();
    let draws = games.iter().filter(|g| g.winner.is_none()).count();

    let total_moves: usize = games.iter().map(|g| g.moves).sum();
    let avg_moves = if games.is_empty() {
        0.0
    } else {
        total_moves as f32 / games.len() as f32
    };

    MatchResults {
        games,
        first_wins,
        second_wins,
        draws,
        avg_moves,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn percent(count: usize, total: usize) -> f32 {
    if total > 0 {
        count as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

/// Print results as JSON
fn print_json_results(results: &MatchResults, args: &MatchArgs) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        winner: Option<Player>,
        moves: usize,
        first_color: Player,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        first: Difficulty,
        second: Difficulty,
        total_games: usize,
        first_wins: usize,
        second_wins: usize,
        draws: usize,
        avg_moves: f32,
        games: Vec<JsonGame>,
    }

    let output = JsonOutput {
        first: args.first,
        second: args.second,
        total_games: results.games.len(),
        first_wins: results.first_wins,
        second_wins: results.second_wins,
        draws: results.draws,
        avg_moves: results.avg_moves,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                winner: g.winner,
                moves: g.moves,
                first_color: g.first_color,
            })
            .collect(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Print results as text
fn print_text_results(results: &MatchResults, args: &MatchArgs) {
    let total = results.games.len();

    println!("\n=== Match Results ===");
    println!("Total games: {}", total);
    println!(
        "{} (first) wins:  {} ({:.1}%)",
        args.first,
        results.first_wins,
        percent(results.first_wins, total)
    );
    println!(
        "{} (second) wins: {} ({:.1}%)",
        args.second,
        results.second_wins,
        percent(results.second_wins, total)
    );
    println!(
        "Draws:       {} ({:.1}%)",
        results.draws,
        percent(results.draws, total)
    );
    println!("Avg moves:   {:.1}", results.avg_moves);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {}: first as {:?}, winner {:?} in {} moves",
            game.game_number, game.first_color, game.winner, game.moves
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_match_statistics_empty() {
        let results = compute_match_statistics(vec![]);
        assert_eq!(results.first_wins, 0);
        assert_eq!(results.second_wins, 0);
        assert_eq!(results.draws, 0);
        assert_eq!(results.avg_moves, 0.0);
    }

    #[test]
    fn test_compute_match_statistics() {
        let games = vec![
            GameRecord {
                game_number: 1,
                winner: Some(Player::Black),
                moves: 10,
                first_color: Player::Black,
            },
            GameRecord {
                game_number: 2,
                winner: Some(Player::Black),
                moves: 20,
                first_color: Player::White,
            },
            GameRecord {
                game_number: 3,
                winner: None,
                moves: 30,
                first_color: Player::Black,
            },
        ];

        let results = compute_match_statistics(games);
        assert_eq!(results.first_wins, 1);
        assert_eq!(results.second_wins, 1);
        assert_eq!(results.draws, 1);
        assert_eq!(results.avg_moves, 20.0);
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(1, 4), 25.0);
        assert_eq!(percent(3, 0), 0.0);
    }
}
