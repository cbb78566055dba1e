//! CPU-based Alpha-Beta AI

use std::fmt;
use std::str::FromStr;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::eval::{evaluate_position, evaluate_terminal, Weights};
use crate::game::{GameState, Move, Player};
use crate::movegen::generate_moves;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Chance that Easy plays a uniformly random move instead of searching
const EASY_RANDOM_RATE: f64 = 0.7;

/// Seed used when the config does not name one
const DEFAULT_SEED: u64 = 42;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Search strength
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Plies searched, root move included
    pub fn depth(self) -> u32 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 3,
            Difficulty::Hard => 4,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown difficulty '{0}', expected easy, medium or hard")]
pub struct ParseDifficultyError(String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

/// AI configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AiConfig {
    pub difficulty: Difficulty,
    /// Only consulted on Easy
    pub random_move_rate: f64,
    pub weights: Weights,
    /// Random seed for reproducibility (None = fixed default)
    pub seed: Option<u64>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}

impl AiConfig {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            random_move_rate: EASY_RANDOM_RATE,
            weights: Weights::default(),
            seed: None,
        }
    }

    /// Set custom weights
    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

// ============================================================================
// ALPHA-BETA SEARCH
// ============================================================================

/// Outcome of a root search
#[derive(Clone, Debug)]
pub struct SearchResult {
    /// Best move found, `None` when the player cannot move
    pub best_move: Option<Move>,
    /// Score of the best move from the searching player's view
    pub score: i32,
    /// Nodes visited below the root
    pub nodes: u64,
    pub depth: u32,
}

struct Searcher<'a> {
    weights: &'a Weights,
    perspective: Player,
    nodes: u64,
}

impl Searcher<'_> {
    fn minimax(
        &mut self,
        state: &mut GameState,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> i32 {
        self.nodes += 1;

        if let Some(winner) = state.winner() {
            return evaluate_terminal(winner, self.perspective, depth);
        }
        if depth == 0 {
            return evaluate_position(state, self.perspective, self.weights);
        }

        let moves = generate_moves(state, state.current_player());
        if moves.is_empty() {
            return evaluate_position(state, self.perspective, self.weights);
        }

        if maximizing {
            let mut best = i32::MIN;
            for mv in &moves {
                let undo = state.make_move(mv);
                let score = self.minimax(state, depth - 1, alpha, beta, false);
                state.unmake_move(undo);

                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = i32::MAX;
            for mv in &moves {
                let undo = state.make_move(mv);
                let score = self.minimax(state, depth - 1, alpha, beta, true);
                state.unmake_move(undo);

                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }
}

/// Search `depth` plies for `player`. Each root move is scored by a
/// minimizing search of `depth - 1` plies; ties keep the first move found.
pub fn search(state: &GameState, player: Player, depth: u32, weights: &Weights) -> SearchResult {
    let mut scratch = state.with_player(player);
    let moves = generate_moves(&scratch, player);

    let mut searcher = Searcher {
        weights,
        perspective: player,
        nodes: 0,
    };
    let mut best_move = None;
    let mut best_score = i32::MIN;

    for mv in moves {
        let undo = scratch.make_move(&mv);
        let score = searcher.minimax(
            &mut scratch,
            depth.saturating_sub(1),
            best_score,
            i32::MAX,
            false,
        );
        scratch.unmake_move(undo);

        if best_move.is_none() || score > best_score {
            best_score = score;
            best_move = Some(mv);
        }
    }

    SearchResult {
        best_move,
        score: best_score,
        nodes: searcher.nodes,
        depth,
    }
}

// ============================================================================
// AI PLAYER
// ============================================================================

/// Alpha-Beta AI player
pub struct AlphaBetaAI {
    config: AiConfig,
    rng: ChaCha8Rng,
}

impl AlphaBetaAI {
    pub fn new(config: AiConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed.unwrap_or(DEFAULT_SEED));
        Self { config, rng }
    }

    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self::new(AiConfig::new(difficulty))
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// Pick a move for `player`. Does not modify `state`.
    pub fn best_move(&mut self, state: &GameState, player: Player) -> Option<Move> {
        let moves = generate_moves(&state.with_player(player), player);
        if moves.is_empty() {
            return None;
        }

        if self.config.difficulty == Difficulty::Easy && self.rng.gen_bool(self.random_move_rate()) {
            let mv = moves.choose(&mut self.rng).copied();
            tracing::trace!(?mv, "easy: random move");
            return mv;
        }

        let depth = self.config.difficulty.depth();
        let result = search(state, player, depth, &self.config.weights);
        tracing::debug!(
            ?player,
            depth,
            score = result.score,
            nodes = result.nodes,
            mv = ?result.best_move,
            "search complete"
        );
        result.best_move
    }

    /// Configured rate as a probability; non-finite values fall back to the default
    fn random_move_rate(&self) -> f64 {
        let rate = self.config.random_move_rate;
        if rate.is_finite() {
            rate.clamp(0.0, 1.0)
        } else {
            EASY_RANDOM_RATE
        }
    }
}

/// Alternate two AIs until someone wins, a side cannot move, or `max_moves`
/// is reached. Moves go through the same validated entry point a human move would.
pub fn play_game(
    initial: GameState,
    black: &mut AlphaBetaAI,
    white: &mut AlphaBetaAI,
    max_moves: usize,
    mut on_move: impl FnMut(&GameState, &Move),
) -> (GameState, Vec<Move>) {
    let mut state = initial;
    let mut history = Vec::new();

    while !state.is_over() && history.len() < max_moves {
        let player = state.current_player();
        let ai = match player {
            Player::Black => &mut *black,
            Player::White => &mut *white,
        };
        let Some(mv) = ai.best_move(&state, player) else {
            tracing::info!(?player, "no legal moves");
            break;
        };
        if let Err(err) = state.try_execute_move(mv.selection.as_slice(), mv.target()) {
            tracing::warn!(%err, ?mv, "search produced a rejected move");
            break;
        }
        history.push(mv);
        on_move(&state, &mv);
    }

    (state, history)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Hex;
    use crate::eval::WIN_VALUE;
    use crate::layout::Layout;

    fn near_win() -> GameState {
        let layout = Layout::new(
            "near-win",
            vec![Hex::new(0, 1), Hex::new(0, 2), Hex::new(0, 3), Hex::new(-3, 0)],
            vec![Hex::new(0, 4), Hex::new(2, -2), Hex::new(3, -2)],
        )
        .with_scores(5, 0);
        GameState::from_layout(&layout).unwrap()
    }

    #[test]
    fn test_difficulty_depths() {
        assert_eq!(Difficulty::Easy.depth(), 2);
        assert_eq!(Difficulty::Medium.depth(), 3);
        assert_eq!(Difficulty::Hard.depth(), 4);
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("expert".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::Easy.to_string(), "easy");
    }

    #[test]
    fn test_search_finds_winning_push() {
        let game = near_win();
        for depth in 1..=2 {
            let result = search(&game, Player::Black, depth, &Weights::default());
            let mv = result.best_move.unwrap();
            assert_eq!(mv.target(), Hex::new(0, 4));
            assert!(result.score >= WIN_VALUE);
        }
    }

    #[test]
    fn test_ai_takes_win_and_leaves_state() {
        let game = near_win();
        let before = game;
        let mut ai = AlphaBetaAI::new(AiConfig::new(Difficulty::Medium));
        let mv = ai.best_move(&game, Player::Black).unwrap();
        assert_eq!(game, before);

        let mut played = game;
        assert!(played.execute_move(mv.selection.as_slice(), mv.target()));
        assert_eq!(played.winner(), Some(Player::Black));
    }

    #[test]
    fn test_ai_returns_move() {
        let game = GameState::new();
        let config = AiConfig::new(Difficulty::Easy).with_seed(7);
        let mut ai = AlphaBetaAI::new(config);
        let mv = ai.best_move(&game, Player::Black).unwrap();
        assert!(game.legal_targets(mv.selection.as_slice()).contains(&mv.target()));
    }

    #[test]
    fn test_no_moves_returns_none() {
        let layout = Layout::new("alone", vec![Hex::new(0, 0)], vec![]);
        let game = GameState::from_layout(&layout).unwrap();
        let mut ai = AlphaBetaAI::with_difficulty(Difficulty::Hard);
        assert_eq!(ai.best_move(&game, Player::White), None);
        assert!(search(&game, Player::White, 2, &Weights::default()).best_move.is_none());
    }

    #[test]
    fn test_easy_is_reproducible_with_seed() {
        let game = GameState::new();
        let mut a = AlphaBetaAI::new(AiConfig::new(Difficulty::Easy).with_seed(99));
        let mut b = AlphaBetaAI::new(AiConfig::new(Difficulty::Easy).with_seed(99));
        for _ in 0..5 {
            assert_eq!(a.best_move(&game, Player::Black), b.best_move(&game, Player::Black));
        }
    }

    #[test]
    fn test_easy_never_random_at_zero_rate() {
        let game = near_win();
        let mut config = AiConfig::new(Difficulty::Easy);
        config.random_move_rate = 0.0;
        let mut ai = AlphaBetaAI::new(config);
        let mv = ai.best_move(&game, Player::Black).unwrap();
        assert_eq!(mv.target(), Hex::new(0, 4));
    }

    #[test]
    fn test_easy_rate_not_a_number_falls_back() {
        let game = GameState::new();
        for rate in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mut config = AiConfig::new(Difficulty::Easy).with_seed(5);
            config.random_move_rate = rate;
            let mut ai = AlphaBetaAI::new(config);
            assert_eq!(ai.random_move_rate(), EASY_RANDOM_RATE);
            assert!(ai.best_move(&game, Player::Black).is_some());
        }

        let mut config = AiConfig::new(Difficulty::Easy);
        config.random_move_rate = 3.0;
        assert_eq!(AlphaBetaAI::new(config).random_move_rate(), 1.0);
    }

    #[test]
    fn test_play_game_respects_cap() {
        let mut black = AlphaBetaAI::new(AiConfig::new(Difficulty::Easy).with_seed(1));
        let mut white = AlphaBetaAI::new(AiConfig::new(Difficulty::Easy).with_seed(2));
        let mut seen = 0;
        let (state, history) = play_game(GameState::new(), &mut black, &mut white, 6, |_, _| seen += 1);
        assert_eq!(history.len(), 6);
        assert_eq!(seen, 6);
        assert_eq!(state.current_player(), Player::Black);
    }

    #[test]
    fn test_play_game_stops_at_win() {
        let mut black = AlphaBetaAI::with_difficulty(Difficulty::Medium);
        let mut white = AlphaBetaAI::with_difficulty(Difficulty::Medium);
        let (state, history) = play_game(near_win(), &mut black, &mut white, 50, |_, _| {});
        assert_eq!(history.len(), 1);
        assert_eq!(state.winner(), Some(Player::Black));
    }
}
