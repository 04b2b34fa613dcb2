// src/game/search/ordering.rs

//! Move ordering: preferred move first, then captures by victim and
//! attacker, promotions and checks, quiet moves last.

use crate::constants::{CAPTURE_BONUS, GIVES_CHECK_BONUS, PREFERRED_MOVE_PRIORITY, PROMOTION_BONUS};
use crate::game::evaluation::get_piece_value;
use crate::game::GameBoard;
use shakmaty::{Move, MoveList};
use std::cmp::Reverse;

const MAX_MOVES: usize = 256;

pub fn score_move(board: &mut GameBoard, m: Move, preferred: Option<Move>) -> i32 {
    if preferred == Some(m) {
        return PREFERRED_MOVE_PRIORITY;
    }

    let mut score = 0;
    if let Some(victim) = m.capture() {
        score += get_piece_value(victim) - get_piece_value(m.role()) + CAPTURE_BONUS;
    }
    if let Some(promoted) = m.promotion() {
        score += get_piece_value(promoted) + PROMOTION_BONUS;
    }
    if board.gives_check(m) {
        score += GIVES_CHECK_BONUS;
    }
    score
}

/// Sorts `moves` by descending priority in place.
pub fn order_moves(board: &mut GameBoard, moves: &mut [Move], preferred: Option<Move>) {
    debug_assert!(moves.len() <= MAX_MOVES);
    let original: MoveList = moves.iter().copied().collect();
    let mut keyed = [(0i32, 0usize); MAX_MOVES];
    for (slot, (i, &m)) in keyed.iter_mut().zip(original.iter().enumerate()) {
        *slot = (score_move(board, m, preferred), i);
    }

    let keyed = &mut keyed[..original.len()];
    keyed.sort_unstable_by_key(|&(score, _)| Reverse(score));
    for (slot, &(_, i)) in moves.iter_mut().zip(keyed.iter()) {
        *slot = original[i];
    }
}
