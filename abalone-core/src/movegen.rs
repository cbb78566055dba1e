//! Legal move enumeration

use crate::board::Hex;
use crate::game::{line_direction, GameState, Move, Player, Selection};

/// All legal moves for `player`: singles, then colinear pairs, then colinear
/// triples, each in board order with directions ascending.
pub fn generate_moves(state: &GameState, player: Player) -> Vec<Move> {
    let marbles: Vec<Hex> = state.board().marbles(player).collect();
    let mut moves = Vec::with_capacity(64);

    for &a in &marbles {
        state.extend_moves(&Selection::single(a), player, &mut moves);
    }

    for (i, &a) in marbles.iter().enumerate() {
        for &b in &marbles[i + 1..] {
            push_if_line(state, player, &[a, b], &mut moves);
        }
    }

    for (i, &a) in marbles.iter().enumerate() {
        for (j, &b) in marbles.iter().enumerate().skip(i + 1) {
            // A triple needs at least one adjacent pair
            if a.distance_to(b) > 2 {
                continue;
            }
            for &c in &marbles[j + 1..] {
                push_if_line(state, player, &[a, b, c], &mut moves);
            }
        }
    }

    moves
}

fn push_if_line(state: &GameState, player: Player, group: &[Hex], moves: &mut Vec<Move>) {
    if line_direction(group).is_none() {
        return;
    }
    if let Ok(selection) = Selection::new(group) {
        state.extend_moves(&selection, player, moves);
    }
}

/// Count legal moves for a player (mobility heuristic)
pub fn mobility(state: &GameState, player: Player) -> usize {
    generate_moves(state, player).len()
}

/// Leaf count of the legal move tree, finished games count as leaves
pub fn perft(state: &GameState, depth: u32) -> u64 {
    let mut scratch = *state;
    perft_inner(&mut scratch, depth)
}

fn perft_inner(state: &mut GameState, depth: u32) -> u64 {
    if depth == 0 || state.is_over() {
        return 1;
    }
    let moves = generate_moves(state, state.current_player());
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0;
    for mv in &moves {
        let undo = state.make_move(mv);
        nodes += perft_inner(state, depth - 1);
        state.unmake_move(undo);
    }
    nodes
}
