// src/game/evaluation/king_activity.rs

//! Endgame king activity.
//!
//! Once most pieces are off the board, the side with the initiative wants to
//! push the defending king towards the edge and bring its own king close to
//! help deliver mate. Both distances are Manhattan distances.

use shakmaty::Square;

/// Largest possible Manhattan distance between two squares.
const MAX_KING_DISTANCE: i32 = 14;

fn center_distance(sq: Square) -> i32 {
    let file = sq.file() as i32;
    let rank = sq.rank() as i32;
    (3 - file).max(file - 4) + (3 - rank).max(rank - 4)
}

fn king_distance(a: Square, b: Square) -> i32 {
    (a.file() as i32 - b.file() as i32).abs() + (a.rank() as i32 - b.rank() as i32).abs()
}

/// Bonus for the side owning `own_king`, before the multiplier.
pub fn activity(own_king: Square, opponent_king: Square) -> i32 {
    center_distance(opponent_king) + (MAX_KING_DISTANCE - king_distance(own_king, opponent_king))
}

pub fn evaluate(own_king: Square, opponent_king: Square, multiplier: i32) -> i32 {
    activity(own_king, opponent_king) * multiplier
}
