//! Piece-Square Tables (PSTs) for chess evaluation.
//!
//! Tables are laid out as seen from White's side of the board: the first row
//! is the eighth rank. Black uses the vertically mirrored table.

#![allow(clippy::unusual_byte_groupings)]

use shakmaty::{Color, Role, Square};

type Pst = [[i32; 8]; 8];

const fn flip(pst: &Pst) -> Pst {
    let mut flipped = [[0; 8]; 8];
    let mut i = 0;
    while i < 8 {
        let mut j = 0;
        while j < 8 {
            flipped[i][j] = pst[7 - i][j];
            j += 1;
        }
        i += 1;
    }
    flipped
}

#[rustfmt::skip]
const PAWN_PST: Pst = [
    [  0,   0,   0,   0,   0,   0,   0,   0],
    [ 50,  50,  50,  50,  50,  50,  50,  50],
    [ 10,  10,  20,  30,  30,  20,  10,  10],
    [  5,   5,  10,  25,  25,  10,   5,   5],
    [  0,   0,   0,  20,  20,   0,   0,   0],
    [  5,  -5, -10,   0,   0, -10,  -5,   5],
    [  5,  10,  10, -20, -20,  10,  10,   5],
    [  0,   0,   0,   0,   0,   0,   0,   0],
];

#[rustfmt::skip]
const PAWN_PST_ENDGAME: Pst = [
    [  0,   0,   0,   0,   0,   0,   0,   0],
    [ 80,  80,  80,  80,  80,  80,  80,  80],
    [ 60,  60,  60,  60,  60,  60,  60,  60],
    [ 40,  40,  40,  40,  40,  40,  40,  40],
    [ 20,  20,  20,  20,  20,  20,  20,  20],
    [ 10,  10,  10,  10,  10,  10,  10,  10],
    [ 10,  10,  10,  10,  10,  10,  10,  10],
    [  0,   0,   0,   0,   0,   0,   0,   0],
];

#[rustfmt::skip]
const KNIGHT_PST: Pst = [
    [-50, -40, -30, -30, -30, -30, -40, -50],
    [-40, -20,   0,   0,   0,   0, -20, -40],
    [-30,   0,  10,  15,  15,  10,   0, -30],
    [-30,   5,  15,  20,  20,  15,   5, -30],
    [-30,   0,  15,  20,  20,  15,   0, -30],
    [-30,   5,  10,  15,  15,  10,   5, -30],
    [-40, -20,   0,   5,   5,   0, -20, -40],
    [-50, -40, -30, -30, -30, -30, -40, -50],
];

#[rustfmt::skip]
const BISHOP_PST: Pst = [
    [-20, -10, -10, -10, -10, -10, -10, -20],
    [-10,   0,   0,   0,   0,   0,   0, -10],
    [-10,   0,   5,  10,  10,   5,   0, -10],
    [-10,   5,   5,  10,  10,   5,   5, -10],
    [-10,   0,  10,  10,  10,  10,   0, -10],
    [-10,  10,  10,  10,  10,  10,  10, -10],
    [-10,   5,   0,   0,   0,   0,   5, -10],
    [-20, -10, -10, -10, -10, -10, -10, -20],
];

#[rustfmt::skip]
const ROOK_PST: Pst = [
    [  0,   0,   0,   0,   0,   0,   0,   0],
    [  5,  10,  10,  10,  10,  10,  10,   5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [  0,   0,   0,   5,   5,   0,   0,   0],
];

#[rustfmt::skip]
const QUEEN_PST: Pst = [
    [-20, -10, -10,  -5,  -5, -10, -10, -20],
    [-10,   0,   0,   0,   0,   0,   0, -10],
    [-10,   0,   5,   5,   5,   5,   0, -10],
    [ -5,   0,   5,   5,   5,   5,   0,  -5],
    [  0,   0,   5,   5,   5,   5,   0,  -5],
    [-10,   5,   5,   5,   5,   5,   0, -10],
    [-10,   0,   5,   0,   0,   0,   0, -10],
    [-20, -10, -10,  -5,  -5, -10, -10, -20],
];

#[rustfmt::skip]
const KING_PST: Pst = [
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-20, -30, -30, -40, -40, -30, -30, -20],
    [-10, -20, -20, -20, -20, -20, -20, -10],
    [ 20,  20,   0,   0,   0,   0,  20,  20],
    [ 20,  30,  10,   0,   0,  10,  30,  20],
];

#[rustfmt::skip]
const KING_PST_ENDGAME: Pst = [
    [-50, -30, -30, -30, -30, -30, -30, -50],
    [-30, -30,   0,   0,   0,   0, -30, -30],
    [-30, -10,  20,  30,  30,  20, -10, -30],
    [-30, -10,  30,  40,  40,  30, -10, -30],
    [-30, -10,  30,  40,  40,  30, -10, -30],
    [-30, -10,  20,  30,  30,  20, -10, -30],
    [-30, -20, -10,   0,   0, -10, -20, -30],
    [-50, -40, -30, -20, -20, -30, -40, -50],
];

// Flipped PSTs for black pieces
const BLACK_PAWN_PST: Pst = flip(&PAWN_PST);
const BLACK_PAWN_PST_ENDGAME: Pst = flip(&PAWN_PST_ENDGAME);
const BLACK_KNIGHT_PST: Pst = flip(&KNIGHT_PST);
const BLACK_BISHOP_PST: Pst = flip(&BISHOP_PST);
const BLACK_ROOK_PST: Pst = flip(&ROOK_PST);
const BLACK_QUEEN_PST: Pst = flip(&QUEEN_PST);
const BLACK_KING_PST: Pst = flip(&KING_PST);
const BLACK_KING_PST_ENDGAME: Pst = flip(&KING_PST_ENDGAME);

fn table(color: Color, role: Role, endgame: bool) -> &'static Pst {
    match (color, role, endgame) {
        (Color::White, Role::Pawn, false) => &PAWN_PST,
        (Color::White, Role::Pawn, true) => &PAWN_PST_ENDGAME,
        (Color::White, Role::Knight, _) => &KNIGHT_PST,
        (Color::White, Role::Bishop, _) => &BISHOP_PST,
        (Color::White, Role::Rook, _) => &ROOK_PST,
        (Color::White, Role::Queen, _) => &QUEEN_PST,
        (Color::White, Role::King, false) => &KING_PST,
        (Color::White, Role::King, true) => &KING_PST_ENDGAME,
        (Color::Black, Role::Pawn, false) => &BLACK_PAWN_PST,
        (Color::Black, Role::Pawn, true) => &BLACK_PAWN_PST_ENDGAME,
        (Color::Black, Role::Knight, _) => &BLACK_KNIGHT_PST,
        (Color::Black, Role::Bishop, _) => &BLACK_BISHOP_PST,
        (Color::Black, Role::Rook, _) => &BLACK_ROOK_PST,
        (Color::Black, Role::Queen, _) => &BLACK_QUEEN_PST,
        (Color::Black, Role::King, false) => &BLACK_KING_PST,
        (Color::Black, Role::King, true) => &BLACK_KING_PST_ENDGAME,
    }
}

/// Positional value of a piece of `color` and `role` standing on `square`.
pub fn value(color: Color, role: Role, square: Square, endgame: bool) -> i32 {
    let row = 7 - square.rank() as usize;
    let col = square.file() as usize;
    table(color, role, endgame)[row][col]
}
