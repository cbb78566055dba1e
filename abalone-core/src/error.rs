//! Error types for selections, moves and layouts

use thiserror::Error;

use crate::board::Hex;
use crate::game::Player;

/// Why a selection or move was rejected. The game state is never touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("no marbles selected")]
    EmptySelection,
    #[error("{0} marbles selected, at most 3 may move together")]
    TooManyMarbles(usize),
    #[error("marble {0} selected twice")]
    DuplicateMarble(Hex),
    #[error("{0} does not hold a marble of the player to move")]
    NotOwned(Hex),
    #[error("selected marbles are not in a line")]
    NotInLine,
    #[error("{0} is not a legal target for this selection")]
    IllegalTarget(Hex),
}

/// Invalid starting layout
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("{0} is off the board")]
    OffBoard(Hex),
    #[error("{0} is listed more than once")]
    Overlap(Hex),
    #[error("{player:?} has {count} marbles, at most {max} allowed")]
    TooManyMarbles {
        player: Player,
        count: usize,
        max: usize,
    },
    #[error("{player:?} cannot have pushed off {score} marbles in this layout")]
    InvalidScore { player: Player, score: u8 },
}
