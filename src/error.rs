// src/error.rs

use shakmaty::fen::ParseFenError;
use std::io;
use thiserror::Error;

/// Errors raised while turning external input into engine state.
///
/// The search itself never fails; everything here is rejected before a
/// position or move reaches it.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid FEN `{fen}`: {source}")]
    InvalidFen {
        fen: String,
        #[source]
        source: ParseFenError,
    },

    #[error("illegal position `{fen}`: {reason}")]
    IllegalPosition { fen: String, reason: String },

    #[error("invalid move text `{0}`")]
    InvalidUciMove(String),

    #[error("illegal move `{0}` in the current position")]
    IllegalMove(String),

    #[error("cannot load profile `{name}`: {source}")]
    Profile {
        name: String,
        #[source]
        source: io::Error,
    },
}
