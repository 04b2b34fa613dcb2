// src/game/evaluation/mobility.rs

use shakmaty::{Chess, Color, Position};

/// Legal move counts for White and Black, in that order.
///
/// The side to move is counted directly. The other side is counted on the
/// same position with the turn passed to it, which is not a valid position
/// while the side to move is in check; that side then counts as immobile.
pub fn legal_move_counts(pos: &Chess, mover_moves: usize) -> (i32, i32) {
    let mover = mover_moves as i32;
    let other = pos
        .clone()
        .swap_turn()
        .map_or(0, |passed| passed.legal_moves().len() as i32);

    match pos.turn() {
        Color::White => (mover, other),
        Color::Black => (other, mover),
    }
}

pub fn evaluate(pos: &Chess, mover_moves: usize, weight: i32) -> i32 {
    let (white, black) = legal_move_counts(pos, mover_moves);
    (white - black) * weight
}
