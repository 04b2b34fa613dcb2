// src/constants.rs

pub const ENGINE_NAME: &str = "rust-chess-uci";
pub const ENGINE_AUTHOR: &str = "the rust-chess-uci developers";

pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

// --- Piece values ---
pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 320;
pub const BISHOP_VALUE: i32 = 330;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;
// Both sides always own exactly one king, so this only matters for move ordering.
pub const KING_VALUE: i32 = 20_000;

// Evaluation defaults
pub const PAWN_COUNT_BONUS: i32 = 10;
pub const MOBILITY_WEIGHT: i32 = 5;
pub const KING_ACTIVITY_MULTIPLIER: i32 = 10;
pub const CHECK_PENALTY: i32 = 20;
pub const ENDGAME_PIECE_THRESHOLD: u32 = 6;

// Search
pub const MATE_SCORE: i32 = 30_000;
pub const DRAW_SCORE: i32 = 0;
pub const INFINITY: i32 = 32_000;
pub const MAX_PLY: i32 = 128;
pub const MAX_DEPTH: i32 = 64;
pub const NODE_POLL_INTERVAL: u64 = 1024;
pub const QUIESCENCE_MAX_PLY: u32 = 10;
pub const NULL_MOVE_MIN_DEPTH: i32 = 3;
pub const NULL_MOVE_REDUCTION: i32 = 2;

// Move ordering
pub const PREFERRED_MOVE_PRIORITY: i32 = 10_000;
pub const CAPTURE_BONUS: i32 = 1_000;
pub const PROMOTION_BONUS: i32 = 500;
pub const GIVES_CHECK_BONUS: i32 = 100;

// Engine defaults
pub const DEFAULT_HASH_MB: usize = 16;
pub const DEFAULT_DEPTH: i32 = 10;
pub const DEFAULT_TIME_MS: u64 = 5_000;
// Share of the remaining clock spent on one move when only wtime/btime is given.
pub const CLOCK_DIVISOR: u64 = 20;
