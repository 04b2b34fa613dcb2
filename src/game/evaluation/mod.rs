//! Evaluation of a chess position.

pub mod king_activity;
pub mod mobility;
pub mod pst;

use crate::config::EvalWeights;
use crate::constants::{
    BISHOP_VALUE, DRAW_SCORE, KING_VALUE, KNIGHT_VALUE, MATE_SCORE, PAWN_VALUE, QUEEN_VALUE,
    ROOK_VALUE,
};
use crate::game::GameBoard;
use shakmaty::{Board, Color, Piece, Position, Role};

pub fn get_piece_value(role: Role) -> i32 {
    match role {
        Role::Pawn => PAWN_VALUE,
        Role::Knight => KNIGHT_VALUE,
        Role::Bishop => BISHOP_VALUE,
        Role::Rook => ROOK_VALUE,
        Role::Queen => QUEEN_VALUE,
        Role::King => KING_VALUE,
    }
}

/// Number of pieces that are neither pawns nor kings.
fn piece_count(board: &Board) -> u32 {
    (board.occupied() & !(board.pawns() | board.kings())).count() as u32
}

pub fn is_endgame(board: &Board, weights: &EvalWeights) -> bool {
    piece_count(board) <= weights.endgame_piece_threshold
}

/// Evaluates the board from the perspective of the side to move.
///
/// Returns a score in centipawns. A side to move that is checkmated scores
/// `-MATE_SCORE`; every drawn position scores `DRAW_SCORE`.
pub fn evaluate(board: &GameBoard, weights: &EvalWeights) -> i32 {
    let mover_moves = board.position().legal_moves().len();
    if let Some(score) = terminal_score(board, mover_moves) {
        return score;
    }

    let total_score = white_relative(board, mover_moves, weights);

    // Return score from the perspective of the current player
    if board.turn() == Color::White {
        total_score
    } else {
        -total_score
    }
}

/// Same terms as [`evaluate`], but always from White's point of view.
/// `None` for mates and draws, which have no colour-independent value.
pub fn evaluate_white(board: &GameBoard, weights: &EvalWeights) -> Option<i32> {
    let mover_moves = board.position().legal_moves().len();
    match terminal_score(board, mover_moves) {
        Some(_) => None,
        None => Some(white_relative(board, mover_moves, weights)),
    }
}

fn terminal_score(board: &GameBoard, mover_moves: usize) -> Option<i32> {
    if mover_moves == 0 {
        return Some(if board.is_check() { -MATE_SCORE } else { DRAW_SCORE });
    }
    if board.is_draw_by_rule() {
        return Some(DRAW_SCORE);
    }
    None
}

fn white_relative(board: &GameBoard, mover_moves: usize, weights: &EvalWeights) -> i32 {
    let pos = board.position();
    let chess_board = pos.board();
    let endgame = is_endgame(chess_board, weights);
    let mut white_score = 0;
    let mut black_score = 0;

    // Evaluate material and PSTs for each piece
    for &color in &Color::ALL {
        for &role in &Role::ALL {
            let piece = Piece { role, color };
            let material_value = get_piece_value(role);

            for square in chess_board.by_piece(piece) {
                let score = material_value + pst::value(color, role, square, endgame);
                if color == Color::White {
                    white_score += score;
                } else {
                    black_score += score;
                }
            }
        }
    }

    let white_pawns = chess_board.by_piece(Piece { role: Role::Pawn, color: Color::White });
    let black_pawns = chess_board.by_piece(Piece { role: Role::Pawn, color: Color::Black });
    let pawn_difference = white_pawns.count() as i32 - black_pawns.count() as i32;
    let mut total_score = white_score - black_score + pawn_difference * weights.pawn_bonus;

    total_score += mobility::evaluate(pos, mover_moves, weights.mobility_weight);

    // Credited to whoever is to move.
    let sign = if pos.turn() == Color::White { 1 } else { -1 };

    if endgame {
        if let (Some(own), Some(opponent)) = (board.king_of(pos.turn()), board.king_of(!pos.turn())) {
            total_score +=
                sign * king_activity::evaluate(own, opponent, weights.king_activity_multiplier);
        }
    }

    if pos.is_check() {
        total_score -= sign * weights.check_penalty;
    }

    total_score
}

#[cfg(test)]
pub mod tests;
