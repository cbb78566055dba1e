//! Layout - starting marble placement

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::Hex;
use crate::game::Player;

/// Standard start: rows of 5, 6 and 3 along Black's edge
const STANDARD_BLACK: [(i8, i8); 14] = [
    (-4, 0), (-3, -1), (-2, -2), (-1, -3), (0, -4),
    (-4, 1), (-3, 0), (-2, -1), (-1, -2), (0, -3), (1, -4),
    (-2, 0), (-1, -1), (0, -2),
];

/// Black's rows mirrored through the board center
const STANDARD_WHITE: [(i8, i8); 14] = [
    (4, 0), (3, 1), (2, 2), (1, 3), (0, 4),
    (4, -1), (3, 0), (2, 1), (1, 2), (0, 3), (-1, 4),
    (2, 0), (1, 1), (0, 2),
];

/// Named marble placement for both players
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub name: String,
    pub black: Vec<Hex>,
    pub white: Vec<Hex>,
    #[serde(default)]
    pub to_move: Player,
    /// Marbles already pushed off, indexed Black then White
    #[serde(default)]
    pub scores: [u8; 2],
}

impl Layout {
    pub fn new(name: &str, black: Vec<Hex>, white: Vec<Hex>) -> Self {
        Self {
            name: name.to_string(),
            black,
            white,
            to_move: Player::Black,
            scores: [0; 2],
        }
    }

    /// The standard 14-marble opening
    pub fn standard() -> Self {
        Self::new("standard", to_hexes(&STANDARD_BLACK), to_hexes(&STANDARD_WHITE))
    }

    /// Set the side to move
    pub fn with_to_move(mut self, player: Player) -> Self {
        self.to_move = player;
        self
    }

    /// Start from a mid-game score
    pub fn with_scores(mut self, black: u8, white: u8) -> Self {
        self.scores = [black, white];
        self
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let layout = serde_json::from_str(&content)?;
        Ok(layout)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

fn to_hexes(coords: &[(i8, i8)]) -> Vec<Hex> {
    coords.iter().map(|&(q, r)| Hex::new(q, r)).collect()
}

impl Default for Layout {
    fn default() -> Self {
        Self::standard()
    }
}
