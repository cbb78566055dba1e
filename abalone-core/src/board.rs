//! Hex board geometry with axial coordinates

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::Player;

/// Board radius (distance from center to edge)
pub const BOARD_RADIUS: i8 = 4;

/// Number of cells on a radius-4 hexagon
pub const BOARD_CELLS: usize = 61;

/// Axial hex coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hex {
    pub q: i8,
    pub r: i8,
}

impl Hex {
    pub const fn new(q: i8, r: i8) -> Self {
        Self { q, r }
    }

    /// Check if this hex is on the board
    pub const fn is_valid(&self) -> bool {
        let (q, r) = (self.q as i16, self.r as i16);
        let radius = BOARD_RADIUS as i16;
        q.abs() <= radius && r.abs() <= radius && (q + r).abs() <= radius
    }

    /// Distance from center (0,0)
    pub fn distance_to_center(&self) -> i32 {
        self.distance_to(Hex::new(0, 0))
    }

    /// Distance between two hexes
    pub fn distance_to(&self, other: Hex) -> i32 {
        let dq = (self.q as i32 - other.q as i32).abs();
        let dr = (self.r as i32 - other.r as i32).abs();
        let ds = (axial_sum(*self) - axial_sum(other)).abs();
        (dq + dr + ds) / 2
    }

    /// Get neighbor in direction (0-5). Pure arithmetic, may leave the board;
    /// coordinates wrap at the `i8` limits, which are far off the board.
    pub fn neighbor(&self, direction: u8) -> Hex {
        let (dq, dr) = DIRECTIONS[direction as usize % 6];
        Hex::new(self.q.wrapping_add(dq), self.r.wrapping_add(dr))
    }

    /// Projection onto a direction vector
    pub fn dot(&self, direction: u8) -> i32 {
        let (dq, dr) = DIRECTIONS[direction as usize % 6];
        self.q as i32 * dq as i32 + self.r as i32 * dr as i32
    }

    /// Perimeter cells have fewer than six on-board neighbors
    pub fn is_edge(&self) -> bool {
        self.distance_to_center() == BOARD_RADIUS as i32
    }

    /// Origin and its six neighbors
    pub fn is_center(&self) -> bool {
        self.distance_to_center() <= 1
    }

    /// Position in the cell array, `None` when off the board
    pub fn index(&self) -> Option<usize> {
        if !self.is_valid() {
            return None;
        }
        let row = (self.r + BOARD_RADIUS) as usize;
        let q_min = (-BOARD_RADIUS).max(-BOARD_RADIUS - self.r);
        Some(ROW_START[row] + (self.q - q_min) as usize)
    }
}

fn axial_sum(hex: Hex) -> i32 {
    hex.q as i32 + hex.r as i32
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.q, self.r)
    }
}

/// Direction vectors in axial coordinates (dq, dr).
/// Direction `d` and `(d + 3) % 6` are opposites.
pub const DIRECTIONS: [(i8, i8); 6] = [
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
];

/// Reverse a direction
pub fn opposite(direction: u8) -> u8 {
    (direction + 3) % 6
}

/// Whether two directions lie on the same axis
pub fn is_parallel(a: u8, b: u8) -> bool {
    a % 6 == b % 6 || a % 6 == opposite(b)
}

/// First cell index of each row, rows ordered by r from -4 to 4
const ROW_START: [usize; 9] = [0, 5, 11, 18, 26, 35, 43, 50, 56];

/// Every on-board hex, in cell-index order
pub const ALL_HEXES: [Hex; BOARD_CELLS] = build_hexes();

const fn build_hexes() -> [Hex; BOARD_CELLS] {
    let mut hexes = [Hex::new(0, 0); BOARD_CELLS];
    let mut i = 0;
    let mut r = -BOARD_RADIUS;
    while r <= BOARD_RADIUS {
        let mut q = -BOARD_RADIUS;
        while q <= BOARD_RADIUS {
            let hex = Hex::new(q, r);
            if hex.is_valid() {
                hexes[i] = hex;
                i += 1;
            }
            q += 1;
        }
        r += 1;
    }
    hexes
}

/// Cell contents
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occupancy {
    #[default]
    Empty,
    Black,
    White,
}

impl Occupancy {
    pub fn owner(self) -> Option<Player> {
        match self {
            Occupancy::Empty => None,
            Occupancy::Black => Some(Player::Black),
            Occupancy::White => Some(Player::White),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Occupancy::Empty
    }

    pub fn is(self, player: Player) -> bool {
        self.owner() == Some(player)
    }
}

impl From<Player> for Occupancy {
    fn from(player: Player) -> Self {
        match player {
            Player::Black => Occupancy::Black,
            Player::White => Occupancy::White,
        }
    }
}

/// Fixed 61-cell board. Off-board coordinates have no cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Occupancy; BOARD_CELLS],
}

impl Board {
    /// Empty board
    pub fn new() -> Self {
        Self {
            cells: [Occupancy::Empty; BOARD_CELLS],
        }
    }

    pub fn is_on_board(&self, hex: Hex) -> bool {
        hex.is_valid()
    }

    /// Occupancy of an on-board cell
    pub fn get(&self, hex: Hex) -> Option<Occupancy> {
        hex.index().map(|i| self.cells[i])
    }

    /// Set an on-board cell, returning the previous value
    pub(crate) fn set(&mut self, hex: Hex, value: Occupancy) -> Option<Occupancy> {
        let i = hex.index()?;
        Some(std::mem::replace(&mut self.cells[i], value))
    }

    pub(crate) fn set_index(&mut self, index: usize, value: Occupancy) {
        self.cells[index] = value;
    }

    pub(crate) fn get_index(&self, index: usize) -> Occupancy {
        self.cells[index]
    }

    /// Whether `hex` is on the board and holds `player`'s marble
    pub fn is_owned_by(&self, hex: Hex, player: Player) -> bool {
        matches!(self.get(hex), Some(cell) if cell.is(player))
    }

    /// Whether `hex` is on the board and empty
    pub fn is_empty_cell(&self, hex: Hex) -> bool {
        self.get(hex) == Some(Occupancy::Empty)
    }

    /// Iterate all cells
    pub fn iter(&self) -> impl Iterator<Item = (Hex, Occupancy)> + '_ {
        ALL_HEXES.iter().copied().zip(self.cells.iter().copied())
    }

    /// Coordinates of a player's marbles, in cell-index order
    pub fn marbles(&self, player: Player) -> impl Iterator<Item = Hex> + '_ {
        self.iter()
            .filter(move |(_, cell)| cell.is(player))
            .map(|(hex, _)| hex)
    }

    pub fn count(&self, player: Player) -> usize {
        self.cells.iter().filter(|cell| cell.is(player)).count()
    }

    pub fn len(&self) -> usize {
        BOARD_CELLS
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_empty())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board\n{}", self)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in -BOARD_RADIUS..=BOARD_RADIUS {
            write!(f, "{}", " ".repeat(r.unsigned_abs() as usize))?;
            let row: Vec<&str> = (-BOARD_RADIUS..=BOARD_RADIUS)
                .filter_map(|q| self.get(Hex::new(q, r)))
                .map(|cell| match cell {
                    Occupancy::Empty => ".",
                    Occupancy::Black => "B",
                    Occupancy::White => "W",
                })
                .collect();
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}
