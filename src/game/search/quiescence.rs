// src/game/search/quiescence.rs

use super::{ordering, PvsSearcher};
use crate::constants::{MATE_SCORE, QUIESCENCE_MAX_PLY};
use crate::game::evaluation;
use crate::game::GameBoard;

impl PvsSearcher {
    /// Capture-only search at the frontier, so leaves are never scored in
    /// the middle of an exchange. `qply` counts plies since the frontier and
    /// is capped at `QUIESCENCE_MAX_PLY`.
    pub(super) fn quiescence(
        &mut self,
        board: &mut GameBoard,
        mut alpha: i32,
        beta: i32,
        ply: u32,
        qply: u32,
    ) -> i32 {
        self.session.record_quiescence_ply(qply);
        if qply >= QUIESCENCE_MAX_PLY {
            return self.static_eval(board, ply);
        }
        if self.session.count_node() {
            return alpha;
        }

        let standing_pat = self.static_eval(board, ply);
        if standing_pat >= beta {
            return beta;
        }
        if alpha < standing_pat {
            alpha = standing_pat;
        }

        let mut captures = board.captures();
        ordering::order_moves(board, &mut captures, None);

        for &m in captures.iter() {
            board.play(m);
            let score = -self.quiescence(board, -beta, -alpha, ply + 1, qply + 1);
            board.undo();

            if self.session.is_stopped() {
                return alpha;
            }
            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }

        alpha
    }

    /// Static evaluation with mates pulled closer by the distance from the root.
    pub(super) fn static_eval(&self, board: &GameBoard, ply: u32) -> i32 {
        let score = evaluation::evaluate(board, &self.config.weights);
        if score == -MATE_SCORE {
            score + ply as i32
        } else {
            score
        }
    }
}
