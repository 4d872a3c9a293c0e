//! Legal move generation
//!
//! Quiet moves: a regular piece steps one square forward (straight or along
//! a drawn diagonal); a sultan slides any distance along an open line.
//!
//! Captures: a regular piece jumps an adjacent enemy in any of the 8
//! directions and lands right behind it. A sultan may travel an empty run
//! before the enemy and pick any empty landing square along the run behind
//! it. After landing, the same piece keeps capturing if it can; each legal
//! move is one jump annotated with the longest chain it starts.
//!
//! If any capture exists, quiet moves are illegal, and only the jumps whose
//! chain reaches the global maximum capture count are kept.

use serde::{Deserialize, Serialize};

use crate::board::{is_adjacent_step, Bitboard, Board, Piece, Pos, Side, DIRECTIONS};

use super::position::Position;

/// One atomic step of a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Pos,
    pub to: Pos,
    /// Enemy piece removed by this step
    pub captured: Option<Pos>,
    pub side: Side,
    /// Enemies removed along the longest chain starting with this step
    pub total_captures: u8,
}

impl Move {
    #[inline]
    pub fn quiet(from: Pos, to: Pos, side: Side) -> Self {
        Self {
            from,
            to,
            captured: None,
            side,
            total_captures: 0,
        }
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

/// All legal moves for the side to move (or for the piece mid-chain).
///
/// Order carries no meaning.
pub fn legal_moves(position: &Position) -> Vec<Move> {
    let board = &position.board;
    let side = position.turn;
    let mut moves = Vec::new();

    match position.phase.jumping_piece() {
        Some(square) => {
            if !square.is_on_board() {
                return moves;
            }
            match board.get(square) {
                Some(piece) if piece.side == side => {
                    collect_captures(board, square, piece, position.phase.captured(), &mut moves);
                }
                _ => return moves,
            }
        }
        None => {
            for (from, piece) in board.pieces_of(side) {
                collect_captures(board, from, piece, Bitboard::new(), &mut moves);
            }
        }
    }

    if !moves.is_empty() {
        let max = moves.iter().map(|m| m.total_captures).max().unwrap_or(0);
        moves.retain(|m| m.total_captures == max);
        return moves;
    }

    // A chain never continues with a quiet step
    if position.phase.jumping_piece().is_some() {
        return moves;
    }

    for (from, piece) in board.pieces_of(side) {
        collect_quiet(board, from, piece, &mut moves);
    }
    moves
}

/// Look up the legal move matching `from` -> `to`.
pub fn find_move(position: &Position, from: Pos, to: Pos) -> Option<Move> {
    if !from.is_on_board() || !to.is_on_board() {
        return None;
    }
    legal_moves(position)
        .into_iter()
        .find(|m| m.from == from && m.to == to)
}

/// Largest `total_captures` among the given moves (0 when none capture)
#[inline]
pub fn max_captures(moves: &[Move]) -> u8 {
    moves.iter().map(|m| m.total_captures).max().unwrap_or(0)
}

/// Whether the piece on `at` has at least one capture available.
pub fn has_capture_from(board: &Board, at: Pos, excluded: Bitboard) -> bool {
    match board.get(at) {
        Some(piece) => !capture_steps(board, at, piece, excluded).is_empty(),
        None => false,
    }
}

fn collect_quiet(board: &Board, from: Pos, piece: Piece, out: &mut Vec<Move>) {
    for &(dr, dc) in &DIRECTIONS {
        if !piece.sultan && dr != piece.side.forward() {
            continue;
        }
        let mut prev = from;
        while let Some(to) = prev.offset(dr, dc) {
            if !is_adjacent_step(prev, to) || !board.is_empty(to) {
                break;
            }
            out.push(Move::quiet(from, to, piece.side));
            if !piece.sultan {
                break;
            }
            prev = to;
        }
    }
}

fn collect_captures(board: &Board, from: Pos, piece: Piece, excluded: Bitboard, out: &mut Vec<Move>) {
    for (to, enemy) in capture_steps(board, from, piece, excluded) {
        let next = after_capture(board, from, to, enemy);
        let total = 1 + longest_chain(&next, to, piece, excluded.with(enemy));
        out.push(Move {
            from,
            to,
            captured: Some(enemy),
            side: piece.side,
            total_captures: total,
        });
    }
}

/// Single-jump captures from `from` as (landing, captured) pairs.
fn capture_steps(board: &Board, from: Pos, piece: Piece, excluded: Bitboard) -> Vec<(Pos, Pos)> {
    let mut steps = Vec::new();
    for &(dr, dc) in &DIRECTIONS {
        let Some(enemy) = find_target(board, from, piece, dr, dc) else {
            continue;
        };
        let mut prev = enemy;
        while let Some(land) = prev.offset(dr, dc) {
            if !is_adjacent_step(prev, land) || !board.is_empty(land) {
                break;
            }
            if !excluded.get(land) {
                steps.push((land, enemy));
            }
            if !piece.sultan {
                break;
            }
            prev = land;
        }
    }
    steps
}

/// First capturable enemy along a direction, if the path to it is open.
///
/// Pieces taken earlier in the chain are already off the board, so their
/// squares are passed over like any empty square.
fn find_target(board: &Board, from: Pos, piece: Piece, dr: i8, dc: i8) -> Option<Pos> {
    let mut prev = from;
    while let Some(sq) = prev.offset(dr, dc) {
        if !is_adjacent_step(prev, sq) {
            return None;
        }
        match board.get(sq) {
            Some(other) => return (other.side != piece.side).then_some(sq),
            None if piece.sultan => prev = sq,
            None => return None,
        }
    }
    None
}

/// Most further captures reachable from `at` (depth-first over every jump).
fn longest_chain(board: &Board, at: Pos, piece: Piece, excluded: Bitboard) -> u8 {
    capture_steps(board, at, piece, excluded)
        .into_iter()
        .map(|(to, enemy)| {
            let next = after_capture(board, at, to, enemy);
            1 + longest_chain(&next, to, piece, excluded.with(enemy))
        })
        .max()
        .unwrap_or(0)
}

#[inline]
fn after_capture(board: &Board, from: Pos, to: Pos, enemy: Pos) -> Board {
    let mut next = *board;
    if let Some(piece) = next.take(from) {
        next.place(to, piece);
    }
    next.remove(enemy);
    next
}
