//! Game state, move legality and execution

use std::fmt;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::board::{is_parallel, Board, Hex, Occupancy};
use crate::error::{LayoutError, MoveError};
use crate::layout::Layout;

// ============================================================================
// CONSTANTS
// ============================================================================

/// At most this many marbles move together
pub const MAX_SELECTION: usize = 3;

/// Marbles pushed off needed to win
pub const WIN_SCORE: u8 = 6;

/// Marbles per side in the standard layout
pub const MARBLES_PER_SIDE: usize = 14;

/// Upper bound on cell writes made by one move (pushes plus movers)
const MAX_CHANGES: usize = 4 * MAX_SELECTION;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Player color
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    #[default]
    Black = 0,
    White = 1,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// One to three distinct marbles, in the order they were picked
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<Hex>", try_from = "Vec<Hex>")]
pub struct Selection {
    marbles: [Hex; MAX_SELECTION],
    len: u8,
}

impl Selection {
    pub fn new(marbles: &[Hex]) -> Result<Self, MoveError> {
        if marbles.is_empty() {
            return Err(MoveError::EmptySelection);
        }
        if marbles.len() > MAX_SELECTION {
            return Err(MoveError::TooManyMarbles(marbles.len()));
        }
        let mut selection = Self {
            marbles: [marbles[0]; MAX_SELECTION],
            len: 0,
        };
        for &hex in marbles {
            if selection.contains(hex) {
                return Err(MoveError::DuplicateMarble(hex));
            }
            selection.marbles[selection.len as usize] = hex;
            selection.len += 1;
        }
        Ok(selection)
    }

    pub fn single(hex: Hex) -> Self {
        Self {
            marbles: [hex; MAX_SELECTION],
            len: 1,
        }
    }

    pub fn as_slice(&self) -> &[Hex] {
        &self.marbles[..self.len as usize]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn first(&self) -> Hex {
        self.marbles[0]
    }

    pub fn contains(&self, hex: Hex) -> bool {
        self.as_slice().contains(&hex)
    }

    pub fn iter(&self) -> impl Iterator<Item = Hex> + '_ {
        self.as_slice().iter().copied()
    }

    /// Add the marble if absent, remove it if present
    pub fn toggle(&mut self, hex: Hex) -> Result<(), MoveError> {
        if let Some(pos) = self.as_slice().iter().position(|&m| m == hex) {
            if self.len == 1 {
                return Err(MoveError::EmptySelection);
            }
            let len = self.len as usize;
            self.marbles.copy_within(pos + 1..len, pos);
            self.len -= 1;
            return Ok(());
        }
        if self.len() == MAX_SELECTION {
            return Err(MoveError::TooManyMarbles(MAX_SELECTION + 1));
        }
        self.marbles[self.len as usize] = hex;
        self.len += 1;
        Ok(())
    }

    /// Marble furthest along `direction`
    pub fn lead(&self, direction: u8) -> Hex {
        lead_marble(self.as_slice(), direction).unwrap_or(self.marbles[0])
    }
}

impl fmt::Debug for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl From<Selection> for Vec<Hex> {
    fn from(selection: Selection) -> Self {
        selection.as_slice().to_vec()
    }
}

impl TryFrom<Vec<Hex>> for Selection {
    type Error = MoveError;

    fn try_from(marbles: Vec<Hex>) -> Result<Self, Self::Error> {
        Selection::new(&marbles)
    }
}

/// Movement along the selection's axis, or sideways
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    Inline,
    Broadside,
}

/// A legal move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub selection: Selection,
    pub direction: u8,
    pub kind: MoveKind,
}

impl Move {
    /// Cell a player clicks to request this move
    pub fn target(&self) -> Hex {
        match self.kind {
            MoveKind::Inline => self.selection.lead(self.direction).neighbor(self.direction),
            MoveKind::Broadside => self.selection.first().neighbor(self.direction),
        }
    }

    /// (from, to) for every moved marble of the mover
    pub fn destinations(&self) -> impl Iterator<Item = (Hex, Hex)> + '_ {
        let direction = self.direction;
        self.selection.iter().map(move |hex| (hex, hex.neighbor(direction)))
    }
}

// ============================================================================
// LINE GEOMETRY
// ============================================================================

/// Axis of a 2-3 marble line, as the first matching direction 0..5 stepping
/// from the lexicographically smallest marble. `None` for singles and non-lines.
pub fn line_direction(marbles: &[Hex]) -> Option<u8> {
    if marbles.len() < 2 || marbles.len() > MAX_SELECTION {
        return None;
    }
    let start = *marbles.iter().min()?;
    (0..6u8).find(|&direction| {
        let mut expected = start;
        (1..marbles.len()).all(|_| {
            expected = expected.neighbor(direction);
            marbles.contains(&expected)
        })
    })
}

/// Marble with the largest projection onto `direction`, `None` for no marbles
pub fn lead_marble(marbles: &[Hex], direction: u8) -> Option<Hex> {
    marbles.iter().copied().max_by_key(|hex| hex.dot(direction))
}

// ============================================================================
// UNDO RECORD
// ============================================================================

/// Everything needed to reverse one `make_move`
#[derive(Clone, Copy, Debug)]
pub struct Undo {
    changes: [(u8, Occupancy); MAX_CHANGES],
    len: u8,
    player: Player,
    scores: [u8; 2],
    pushed: u8,
    pushed_off: bool,
}

impl Undo {
    fn new(player: Player, scores: [u8; 2]) -> Self {
        Self {
            changes: [(0, Occupancy::Empty); MAX_CHANGES],
            len: 0,
            player,
            scores,
            pushed: 0,
            pushed_off: false,
        }
    }

    /// Opponent marbles displaced by the move
    pub fn pushed(&self) -> usize {
        self.pushed as usize
    }

    /// Whether an opponent marble left the board
    pub fn pushed_off(&self) -> bool {
        self.pushed_off
    }
}

// ============================================================================
// GAME STATE
// ============================================================================

/// Board, side to move and marbles pushed off per player
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GameState {
    board: Board,
    current_player: Player,
    scores: [u8; 2],
}

impl GameState {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Standard 14-marble start, Black to move
    pub fn new() -> Self {
        Self::from_layout(&Layout::standard()).unwrap_or_else(|_| Self::empty())
    }

    /// Build a position from a custom layout
    pub fn from_layout(layout: &Layout) -> Result<Self, LayoutError> {
        let mut state = Self::empty();
        for (player, marbles) in [(Player::Black, &layout.black), (Player::White, &layout.white)] {
            if marbles.len() > MARBLES_PER_SIDE {
                return Err(LayoutError::TooManyMarbles {
                    player,
                    count: marbles.len(),
                    max: MARBLES_PER_SIDE,
                });
            }
            for &hex in marbles {
                match state.board.set(hex, player.into()) {
                    None => return Err(LayoutError::OffBoard(hex)),
                    Some(Occupancy::Empty) => {}
                    Some(_) => return Err(LayoutError::Overlap(hex)),
                }
            }
        }
        for player in [Player::Black, Player::White] {
            let score = layout.scores[player.index()];
            // Pushed-off marbles come out of the opponent's starting fourteen
            let remaining = state.board.count(player.opponent());
            if score > WIN_SCORE || remaining + score as usize > MARBLES_PER_SIDE {
                return Err(LayoutError::InvalidScore { player, score });
            }
        }
        state.scores = layout.scores;
        state.current_player = layout.to_move;
        Ok(state)
    }

    fn empty() -> Self {
        Self {
            board: Board::new(),
            current_player: Player::Black,
            scores: [0; 2],
        }
    }

    /// Discard the game and start over
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Opponent marbles this player has pushed off
    pub fn score(&self, player: Player) -> u8 {
        self.scores[player.index()]
    }

    pub fn marble_count(&self, player: Player) -> usize {
        self.board.count(player)
    }

    /// The player who has pushed off six marbles, if any
    pub fn winner(&self) -> Option<Player> {
        [Player::Black, Player::White]
            .into_iter()
            .find(|&player| self.score(player) >= WIN_SCORE)
    }

    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }

    /// Same position with a different side to move
    pub(crate) fn with_player(mut self, player: Player) -> Self {
        self.current_player = player;
        self
    }

    // ========================================================================
    // SELECTION VALIDATION
    // ========================================================================

    /// Check that the marbles form a movable group for `player`
    pub fn validate_selection(&self, marbles: &[Hex], player: Player) -> Result<Selection, MoveError> {
        let selection = Selection::new(marbles)?;
        if let Some(hex) = selection.iter().find(|&hex| !self.board.is_owned_by(hex, player)) {
            return Err(MoveError::NotOwned(hex));
        }
        if selection.len() > 1 && line_direction(selection.as_slice()).is_none() {
            return Err(MoveError::NotInLine);
        }
        Ok(selection)
    }

    // ========================================================================
    // LEGALITY
    // ========================================================================

    /// Inline step (or single-marble step) in `direction`, possibly pushing
    pub fn can_move_inline(&self, marbles: &[Hex], direction: u8, player: Player) -> bool {
        if marbles.len() > 1 {
            match line_direction(marbles) {
                Some(line) if is_parallel(line, direction) => {}
                _ => return false,
            }
        }

        let Some(lead) = lead_marble(marbles, direction) else {
            return false;
        };
        let target = lead.neighbor(direction);
        match self.board.get(target) {
            None => false,
            Some(Occupancy::Empty) => true,
            Some(cell) if cell.is(player) => false,
            Some(_) => self.can_push(marbles, direction, player),
        }
    }

    /// Sideways step; every destination must be on the board and empty
    pub fn can_move_broadside(&self, marbles: &[Hex], direction: u8) -> bool {
        if marbles.len() < 2 {
            return false;
        }
        match line_direction(marbles) {
            Some(line) if !is_parallel(line, direction) => {}
            _ => return false,
        }
        marbles
            .iter()
            .all(|hex| self.board.is_empty_cell(hex.neighbor(direction)))
    }

    /// Sumito: strictly outnumber the opponent run, with an open cell behind it
    pub fn can_push(&self, marbles: &[Hex], direction: u8, player: Player) -> bool {
        let Some(lead) = lead_marble(marbles, direction) else {
            return false;
        };
        let opponent = player.opponent();
        let mut run = 0;
        let mut current = lead.neighbor(direction);
        while self.board.is_owned_by(current, opponent) {
            run += 1;
            current = current.neighbor(direction);
        }

        if run == 0 || marbles.len() <= run {
            return false;
        }
        match self.board.get(current) {
            None => true,
            Some(cell) => cell.is_empty(),
        }
    }

    /// Append every legal move of an already validated selection, directions ascending
    pub(crate) fn extend_moves(&self, selection: &Selection, player: Player, moves: &mut Vec<Move>) {
        let marbles = selection.as_slice();
        for direction in 0..6u8 {
            if self.can_move_inline(marbles, direction, player) {
                moves.push(Move {
                    selection: *selection,
                    direction,
                    kind: MoveKind::Inline,
                });
            } else if self.can_move_broadside(marbles, direction) {
                moves.push(Move {
                    selection: *selection,
                    direction,
                    kind: MoveKind::Broadside,
                });
            }
        }
    }

    /// Canonical legal moves of a selection for the player to move
    pub fn moves_for_selection(&self, marbles: &[Hex]) -> Vec<Move> {
        let mut moves = Vec::new();
        if let Ok(selection) = self.validate_selection(marbles, self.current_player) {
            self.extend_moves(&selection, self.current_player, &mut moves);
        }
        moves
    }

    /// Cells the player to move may click to move this selection
    pub fn legal_targets(&self, marbles: &[Hex]) -> FxHashSet<Hex> {
        self.moves_for_selection(marbles)
            .iter()
            .map(Move::target)
            .collect()
    }

    /// Map (selection, target) to the first canonical move landing there
    pub fn resolve_move(&self, marbles: &[Hex], target: Hex) -> Result<Move, MoveError> {
        let selection = self.validate_selection(marbles, self.current_player)?;
        let mut moves = Vec::with_capacity(6);
        self.extend_moves(&selection, self.current_player, &mut moves);
        moves
            .into_iter()
            .find(|mv| mv.target() == target)
            .ok_or(MoveError::IllegalTarget(target))
    }

    // ========================================================================
    // EXECUTION
    // ========================================================================

    /// Validate and play a move. On error nothing changes.
    pub fn try_execute_move(&mut self, marbles: &[Hex], target: Hex) -> Result<Move, MoveError> {
        let mv = self.resolve_move(marbles, target)?;
        self.make_move(&mv);
        Ok(mv)
    }

    /// Boolean form of `try_execute_move`
    pub fn execute_move(&mut self, marbles: &[Hex], target: Hex) -> bool {
        self.try_execute_move(marbles, target).is_ok()
    }

    /// Apply a move produced by move generation and flip the turn.
    /// The move is not re-validated.
    pub fn make_move(&mut self, mv: &Move) -> Undo {
        let mover = self.current_player;
        let mut undo = Undo::new(mover, self.scores);
        let direction = mv.direction;

        if mv.kind == MoveKind::Inline {
            self.push_opponents(mv.selection.lead(direction), direction, &mut undo);
        }

        for hex in mv.selection.iter() {
            self.write(hex, Occupancy::Empty, &mut undo);
        }
        for (_, to) in mv.destinations() {
            self.write(to, mover.into(), &mut undo);
        }

        self.current_player = mover.opponent();
        undo
    }

    /// Reverse a `make_move`
    pub fn unmake_move(&mut self, undo: Undo) {
        for &(index, previous) in undo.changes[..undo.len as usize].iter().rev() {
            self.board.set_index(index as usize, previous);
        }
        self.current_player = undo.player;
        self.scores = undo.scores;
    }

    /// Shift the opponent run ahead of `lead` one step, farthest first
    fn push_opponents(&mut self, lead: Hex, direction: u8, undo: &mut Undo) {
        let mover = self.current_player;
        let opponent = mover.opponent();

        let mut run = [lead; MAX_SELECTION];
        let mut run_len = 0;
        let mut current = lead.neighbor(direction);
        while run_len < MAX_SELECTION && self.board.is_owned_by(current, opponent) {
            run[run_len] = current;
            run_len += 1;
            current = current.neighbor(direction);
        }

        for &marble in run[..run_len].iter().rev() {
            let dest = marble.neighbor(direction);
            self.write(marble, Occupancy::Empty, undo);
            if dest.is_valid() {
                self.write(dest, opponent.into(), undo);
            } else {
                self.scores[mover.index()] += 1;
                undo.pushed_off = true;
            }
            undo.pushed += 1;
        }
    }

    fn write(&mut self, hex: Hex, value: Occupancy, undo: &mut Undo) {
        if let Some(index) = hex.index() {
            if (undo.len as usize) < MAX_CHANGES {
                undo.changes[undo.len as usize] = (index as u8, self.board.get_index(index));
                undo.len += 1;
            }
            self.board.set_index(index, value);
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn custom(black: &[(i8, i8)], white: &[(i8, i8)]) -> GameState {
        let layout = Layout::new(
            "test",
            black.iter().map(|&(q, r)| Hex::new(q, r)).collect(),
            white.iter().map(|&(q, r)| Hex::new(q, r)).collect(),
        );
        GameState::from_layout(&layout).unwrap()
    }

    fn hexes(coords: &[(i8, i8)]) -> Vec<Hex> {
        coords.iter().map(|&(q, r)| Hex::new(q, r)).collect()
    }

    #[test]
    fn test_standard_layout_is_valid() {
        let game = GameState::from_layout(&Layout::standard()).unwrap();
        assert_eq!(game, GameState::new());
        assert_eq!(game.marble_count(Player::Black), MARBLES_PER_SIDE);
        assert_eq!(game.marble_count(Player::White), MARBLES_PER_SIDE);
    }

    #[test]
    fn test_game_creation() {
        let game = GameState::new();
        assert_eq!(game.current_player(), Player::Black);
        assert_eq!(game.marble_count(Player::Black), 14);
        assert_eq!(game.marble_count(Player::White), 14);
        assert_eq!(game.score(Player::Black), 0);
        assert_eq!(game.winner(), None);
    }

    #[test]
    fn test_line_direction_order_independent() {
        let a = hexes(&[(-2, 0), (-1, -1), (0, -2)]);
        let b = hexes(&[(0, -2), (-2, 0), (-1, -1)]);
        let c = hexes(&[(-1, -1), (0, -2), (-2, 0)]);
        assert_eq!(line_direction(&a), Some(1));
        assert_eq!(line_direction(&b), Some(1));
        assert_eq!(line_direction(&c), Some(1));
        assert_eq!(line_direction(&hexes(&[(0, 0), (0, 1)])), Some(5));
        assert_eq!(line_direction(&hexes(&[(0, 0), (2, 0)])), None);
        assert_eq!(line_direction(&hexes(&[(0, 0), (1, 0), (0, 1)])), None);
        assert_eq!(line_direction(&hexes(&[(0, 0)])), None);
        assert_eq!(line_direction(&hexes(&[(0, 0), (1, 0), (2, 0), (3, 0)])), None);
    }

    #[test]
    fn test_lead_marble() {
        let line = hexes(&[(0, 0), (1, 0), (2, 0)]);
        assert_eq!(lead_marble(&line, 0), Some(Hex::new(2, 0)));
        assert_eq!(lead_marble(&line, 3), Some(Hex::new(0, 0)));
        assert_eq!(lead_marble(&[], 0), None);

        let game = custom(&[(0, 0)], &[]);
        assert!(!game.can_move_inline(&[], 0, Player::Black));
        assert!(!game.can_push(&[], 0, Player::Black));
    }

    #[test]
    fn test_line_direction_far_off_board() {
        let line = hexes(&[(i8::MAX, 0), (i8::MAX - 1, 0)]);
        assert_eq!(line_direction(&line), Some(0));
        assert_eq!(line_direction(&hexes(&[(i8::MIN, i8::MIN), (i8::MAX, i8::MAX)])), None);
        assert!(GameState::new().legal_targets(&line).is_empty());
    }

    #[test]
    fn test_single_marble_targets() {
        let game = custom(&[(0, 0)], &[(1, 0)]);
        let targets = game.legal_targets(&[Hex::new(0, 0)]);
        assert_eq!(targets.len(), 5);
        assert!(!targets.contains(&Hex::new(1, 0)));
        for t in &targets {
            assert!(game.board().is_empty_cell(*t));
        }
    }

    #[test]
    fn test_single_marble_cannot_push() {
        let game = custom(&[(0, 0)], &[(0, 1)]);
        assert!(!game.legal_targets(&[Hex::new(0, 0)]).contains(&Hex::new(0, 1)));
    }

    #[test]
    fn test_selection_must_be_owned() {
        let game = GameState::new();
        // White marble while Black is to move
        assert!(game.legal_targets(&[Hex::new(0, 2)]).is_empty());
        assert_eq!(
            game.validate_selection(&[Hex::new(0, 2)], Player::Black),
            Err(MoveError::NotOwned(Hex::new(0, 2)))
        );
        assert!(game.legal_targets(&[]).is_empty());
    }

    #[test]
    fn test_two_push_one_into_empty() {
        let game = custom(&[(0, -1), (0, 0)], &[(0, 1)]);
        let marbles = hexes(&[(0, -1), (0, 0)]);
        assert!(game.can_push(&marbles, 5, Player::Black));
        assert!(game.legal_targets(&marbles).contains(&Hex::new(0, 1)));
    }

    #[test]
    fn test_two_versus_two_is_illegal() {
        let game = custom(&[(0, -1), (0, 0)], &[(0, 1), (0, 2)]);
        let marbles = hexes(&[(0, -1), (0, 0)]);
        assert!(!game.can_push(&marbles, 5, Player::Black));
        assert!(!game.legal_targets(&marbles).contains(&Hex::new(0, 1)));
    }

    #[test]
    fn test_three_push_two() {
        let game = custom(&[(0, -2), (0, -1), (0, 0)], &[(0, 1), (0, 2)]);
        let marbles = hexes(&[(0, -2), (0, -1), (0, 0)]);
        assert!(game.legal_targets(&marbles).contains(&Hex::new(0, 1)));

        let blocked = custom(&[(0, -2), (0, -1), (0, 0)], &[(0, 1), (0, 2), (0, 3)]);
        assert!(!blocked.legal_targets(&marbles).contains(&Hex::new(0, 1)));
    }

    #[test]
    fn test_push_blocked_by_own_marble_behind() {
        let game = custom(&[(0, -1), (0, 0), (0, 2)], &[(0, 1)]);
        let marbles = hexes(&[(0, -1), (0, 0)]);
        assert!(!game.can_push(&marbles, 5, Player::Black));
    }

    #[test]
    fn test_inline_into_own_marble_is_illegal() {
        let game = custom(&[(0, -1), (0, 0), (0, 1)], &[]);
        let marbles = hexes(&[(0, -1), (0, 0)]);
        assert!(!game.can_move_inline(&marbles, 5, Player::Black));
    }

    #[test]
    fn test_broadside_all_or_nothing() {
        let game = custom(&[(0, 0), (1, 0)], &[(1, 1)]);
        let marbles = hexes(&[(0, 0), (1, 0)]);
        // Direction 5 steps to (0,1) and (1,1); (1,1) is taken
        assert!(!game.can_move_broadside(&marbles, 5));
        // Direction 2 steps to (0,-1) and (1,-1), both empty
        assert!(game.can_move_broadside(&marbles, 2));
        // Parallel directions are never broadside
        assert!(!game.can_move_broadside(&marbles, 0));

        let edge = custom(&[(0, 4), (1, 3)], &[]);
        assert!(!edge.can_move_broadside(&hexes(&[(0, 4), (1, 3)]), 5));
    }

    #[test]
    fn test_execute_illegal_target_leaves_state() {
        let mut game = GameState::new();
        let before = game;
        assert!(!game.execute_move(&[Hex::new(-2, 0)], Hex::new(2, 2)));
        assert_eq!(game, before);
        assert_eq!(
            game.try_execute_move(&[], Hex::new(0, 0)),
            Err(MoveError::EmptySelection)
        );
        assert_eq!(game, before);
    }

    #[test]
    fn test_execute_switches_turn() {
        let mut game = GameState::new();
        assert!(game.execute_move(&[Hex::new(-2, 0)], Hex::new(-2, 1)));
        assert_eq!(game.current_player(), Player::White);
        assert!(game.board().is_owned_by(Hex::new(-2, 1), Player::Black));
        assert!(game.board().is_empty_cell(Hex::new(-2, 0)));
    }

    #[test]
    fn test_single_move_round_trip() {
        let mut game = custom(&[(0, 0)], &[(3, -3)]);
        assert!(game.execute_move(&[Hex::new(0, 0)], Hex::new(0, 1)));
        assert!(game.execute_move(&[Hex::new(3, -3)], Hex::new(2, -3)));
        assert!(game.execute_move(&[Hex::new(0, 1)], Hex::new(0, 0)));
        assert!(game.board().is_owned_by(Hex::new(0, 0), Player::Black));
        assert_eq!(game.score(Player::Black), 0);
        assert_eq!(game.score(Player::White), 0);
    }

    #[test]
    fn test_push_off_scores() {
        let mut game = custom(&[(0, 1), (0, 2), (0, 3)], &[(0, 4)]);
        let mv = game
            .try_execute_move(&hexes(&[(0, 1), (0, 2), (0, 3)]), Hex::new(0, 4))
            .unwrap();
        assert_eq!(mv.kind, MoveKind::Inline);
        assert_eq!(mv.direction, 5);
        assert_eq!(game.score(Player::Black), 1);
        assert_eq!(game.marble_count(Player::White), 0);
        assert!(game.board().is_owned_by(Hex::new(0, 4), Player::Black));
        assert!(game.board().is_empty_cell(Hex::new(0, 1)));
    }

    #[test]
    fn test_three_push_two_execution() {
        let mut game = custom(&[(0, -2), (0, -1), (0, 0)], &[(0, 1), (0, 2)]);
        assert!(game.execute_move(&hexes(&[(0, -2), (0, -1), (0, 0)]), Hex::new(0, 1)));
        assert!(game.board().is_owned_by(Hex::new(0, 2), Player::White));
        assert!(game.board().is_owned_by(Hex::new(0, 3), Player::White));
        for q in [-1, 0, 1] {
            assert!(game.board().is_owned_by(Hex::new(0, q), Player::Black));
        }
        assert_eq!(game.score(Player::Black), 0);
    }

    #[test]
    fn test_broadside_execution() {
        let mut game = custom(&[(0, 0), (1, 0), (2, 0)], &[]);
        let mv = game
            .try_execute_move(&hexes(&[(0, 0), (1, 0), (2, 0)]), Hex::new(0, 1))
            .unwrap();
        assert_eq!(mv.kind, MoveKind::Broadside);
        for q in 0..3 {
            assert!(game.board().is_owned_by(Hex::new(q, 1), Player::Black));
            assert!(game.board().is_empty_cell(Hex::new(q, 0)));
        }
    }

    #[test]
    fn test_make_unmake_restores() {
        let mut game = custom(&[(0, 1), (0, 2), (0, 3)], &[(0, 4), (1, 1)]);
        let before = game;
        let mv = game
            .resolve_move(&hexes(&[(0, 1), (0, 2), (0, 3)]), Hex::new(0, 4))
            .unwrap();
        let undo = game.make_move(&mv);
        assert_eq!(undo.pushed(), 1);
        assert!(undo.pushed_off());
        assert_ne!(game, before);
        game.unmake_move(undo);
        assert_eq!(game, before);
    }

    #[test]
    fn test_winner() {
        let mut game = custom(&[(0, 1), (0, 2), (0, 3)], &[(0, 4)]);
        game.scores = [5, 0];
        assert_eq!(game.winner(), None);
        assert!(game.execute_move(&hexes(&[(0, 1), (0, 2), (0, 3)]), Hex::new(0, 4)));
        assert_eq!(game.winner(), Some(Player::Black));
        assert!(game.is_over());
    }

    #[test]
    fn test_reset() {
        let mut game = GameState::new();
        assert!(game.execute_move(&[Hex::new(-2, 0)], Hex::new(-2, 1)));
        game.reset();
        assert_eq!(game, GameState::new());
    }

    #[test]
    fn test_selection_rules() {
        let a = Hex::new(0, 0);
        let b = Hex::new(1, 0);
        assert_eq!(Selection::new(&[]), Err(MoveError::EmptySelection));
        assert_eq!(Selection::new(&[a, a]), Err(MoveError::DuplicateMarble(a)));
        assert_eq!(
            Selection::new(&hexes(&[(0, 0), (1, 0), (2, 0), (3, 0)])),
            Err(MoveError::TooManyMarbles(4))
        );

        let mut selection = Selection::single(a);
        selection.toggle(b).unwrap();
        assert_eq!(selection.as_slice(), &[a, b]);
        selection.toggle(a).unwrap();
        assert_eq!(selection.as_slice(), &[b]);
        assert_eq!(selection.toggle(b), Err(MoveError::EmptySelection));
    }

    #[test]
    fn test_not_in_line() {
        let game = GameState::new();
        let marbles = hexes(&[(-4, 0), (-2, 0)]);
        assert_eq!(
            game.validate_selection(&marbles, Player::Black),
            Err(MoveError::NotInLine)
        );
        assert!(game.legal_targets(&marbles).is_empty());
    }

    #[test]
    fn test_move_target_and_destinations() {
        let game = custom(&[(0, 0), (1, 0)], &[]);
        let moves = game.moves_for_selection(&hexes(&[(1, 0), (0, 0)]));
        // Two inline, four broadside
        assert_eq!(moves.len(), 6);
        let inline = moves.iter().find(|m| m.direction == 0).unwrap();
        assert_eq!(inline.kind, MoveKind::Inline);
        assert_eq!(inline.target(), Hex::new(2, 0));
        let broadside = moves.iter().find(|m| m.direction == 5).unwrap();
        assert_eq!(broadside.target(), Hex::new(1, 1));
        let dests: Vec<_> = broadside.destinations().map(|(_, to)| to).collect();
        assert_eq!(dests, hexes(&[(1, 1), (0, 1)]));
    }
}
