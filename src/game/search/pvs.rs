// src/game/search/pvs.rs

//! Principal Variation Search (PVS)
//!
//! The first move, the best one if ordering is right, is searched with the
//! full window. Every later move gets a zero window `(alpha, alpha + 1)`
//! that only has to prove it is no better; when it unexpectedly lands
//! inside the window it is searched again with the full one.

use super::tt::{score_from_tt, score_to_tt, Bound};
use super::{null_move, ordering, PvsSearcher};
use crate::constants::{DRAW_SCORE, INFINITY, MATE_SCORE};
use crate::game::GameBoard;

impl PvsSearcher {
    pub(super) fn negamax(
        &mut self,
        board: &mut GameBoard,
        depth: i32,
        ply: u32,
        mut alpha: i32,
        beta: i32,
        null_move_allowed: bool,
    ) -> i32 {
        if self.session.is_stopped() {
            return alpha;
        }

        if depth <= 0 {
            if self.config.use_quiescence {
                return self.quiescence(board, alpha, beta, ply, 0);
            }
            return self.static_eval(board, ply);
        }

        if self.session.count_node() {
            return alpha;
        }

        let key = board.key();
        let mut preferred = None;
        if let Some(entry) = self.tt.probe(key).copied() {
            preferred = entry.best_move;
            if entry.depth >= depth {
                let score = score_from_tt(entry.score, ply);
                match entry.bound {
                    Bound::Exact => return score,
                    Bound::Upper if score <= alpha => return alpha,
                    Bound::Lower if score >= beta => return beta,
                    _ => {}
                }
            }
        }

        if ply > 0 && board.is_draw_by_rule() {
            return DRAW_SCORE;
        }

        let mut moves = board.legal_moves();
        if moves.is_empty() {
            return if board.is_check() {
                -MATE_SCORE + ply as i32
            } else {
                DRAW_SCORE
            };
        }

        if null_move_allowed
            && self.config.use_null_move
            && null_move::is_allowed(board, depth)
            && self.null_move_cutoff(board, depth, ply, beta)
        {
            return beta;
        }
        if self.session.is_stopped() {
            return alpha;
        }

        ordering::order_moves(board, &mut moves, preferred);

        let mut best_score = -INFINITY;
        let mut best_move = None;
        let mut raised_alpha = false;

        for (i, &m) in moves.iter().enumerate() {
            board.play(m);
            let score = if i == 0 {
                -self.negamax(board, depth - 1, ply + 1, -beta, -alpha, true)
            } else {
                let zero_window = -self.negamax(board, depth - 1, ply + 1, -alpha - 1, -alpha, true);
                if zero_window > alpha && zero_window < beta {
                    -self.negamax(board, depth - 1, ply + 1, -beta, -alpha, true)
                } else {
                    zero_window
                }
            };
            board.undo();

            if self.session.is_stopped() {
                return alpha;
            }

            if score > best_score {
                best_score = score;
                best_move = Some(m);
            }
            if score >= beta {
                self.tt.store(key, Some(m), depth, score_to_tt(beta, ply), Bound::Lower);
                return beta;
            }
            if score > alpha {
                alpha = score;
                raised_alpha = true;
            }
        }

        let bound = if raised_alpha { Bound::Exact } else { Bound::Upper };
        self.tt.store(key, best_move, depth, score_to_tt(best_score, ply), bound);
        best_score
    }
}
