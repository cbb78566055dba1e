//! Position evaluation

use serde::{Deserialize, Serialize};

use crate::game::{GameState, Player};
use crate::movegen::mobility;

/// Heuristic weights for position evaluation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weights {
    /// Marbles pushed off
    pub score: i32,
    /// Marbles on the seven innermost cells
    pub center: i32,
    /// Same-color neighbor adjacencies
    pub cohesion: i32,
    /// Marbles on perimeter cells (penalty)
    pub edge: i32,
    /// Legal move count
    pub mobility: i32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            score: 200,
            center: 10,
            cohesion: 5,
            edge: 3,
            mobility: 1,
        }
    }
}

impl Weights {
    /// Load from JSON file
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Win value, far above any static evaluation
pub const WIN_VALUE: i32 = 100_000;

/// Static evaluation from `perspective`'s point of view
pub fn evaluate_position(state: &GameState, perspective: Player, weights: &Weights) -> i32 {
    let opponent = perspective.opponent();

    let score = state.score(perspective) as i32 - state.score(opponent) as i32;
    let center = center_control(state, perspective) - center_control(state, opponent);
    let cohesion = cohesion(state, perspective) - cohesion(state, opponent);
    let edge = edge_penalty(state, opponent) - edge_penalty(state, perspective);

    let mut value = weights.score * score
        + weights.center * center
        + weights.cohesion * cohesion
        + weights.edge * edge;

    // Move generation is the expensive term
    if weights.mobility != 0 {
        let moves = mobility(state, perspective) as i32 - mobility(state, opponent) as i32;
        value += weights.mobility * moves;
    }

    value
}

/// Terminal value with depth bonus: win sooner, lose later
pub fn evaluate_terminal(winner: Player, perspective: Player, depth: u32) -> i32 {
    if winner == perspective {
        WIN_VALUE + depth as i32
    } else {
        -WIN_VALUE - depth as i32
    }
}

/// Own marbles among the origin and its six neighbors
pub fn center_control(state: &GameState, player: Player) -> i32 {
    state
        .board()
        .marbles(player)
        .filter(|hex| hex.is_center())
        .count() as i32
}

/// Sum over a player's marbles of same-color neighbors
pub fn cohesion(state: &GameState, player: Player) -> i32 {
    let board = state.board();
    board
        .marbles(player)
        .map(|hex| {
            (0..6u8)
                .filter(|&d| board.is_owned_by(hex.neighbor(d), player))
                .count() as i32
        })
        .sum()
}

/// A player's marbles sitting on perimeter cells
pub fn edge_penalty(state: &GameState, player: Player) -> i32 {
    state
        .board()
        .marbles(player)
        .filter(|hex| hex.is_edge())
        .count() as i32
}
