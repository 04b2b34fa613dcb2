// src/game/search/null_move.rs

//! Null Move Pruning
//!
//! If the side to move can pass and a reduced search still fails high, the
//! position is assumed good enough to cut off without a full-width search.
//! Passing is never tried in check, at shallow depth, or when the side to
//! move has only pawns left, where zugzwang makes the assumption unsafe.

use super::PvsSearcher;
use crate::constants::{NULL_MOVE_MIN_DEPTH, NULL_MOVE_REDUCTION};
use crate::game::GameBoard;

pub fn is_allowed(board: &GameBoard, depth: i32) -> bool {
    depth >= NULL_MOVE_MIN_DEPTH && !board.is_check() && board.has_non_pawn_material(board.turn())
}

impl PvsSearcher {
    /// Searches the passed position with a zero window at `beta`. True when
    /// the result still reaches `beta`.
    pub(super) fn null_move_cutoff(&mut self, board: &mut GameBoard, depth: i32, ply: u32, beta: i32) -> bool {
        if !board.play_null() {
            return false;
        }
        self.session.null_move_attempts += 1;
        let score = -self.negamax(
            board,
            depth - 1 - NULL_MOVE_REDUCTION,
            ply + 1,
            -beta,
            -beta + 1,
            false,
        );
        board.undo();

        !self.session.is_stopped() && score >= beta
    }
}
