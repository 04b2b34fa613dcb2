// game/mod.rs

pub mod evaluation;
pub mod search;

use crate::error::EngineError;
use shakmaty::fen::Fen;
use shakmaty::uci::UciMove;
use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{
    CastlingMode, Chess, Color, EnPassantMode, Move, MoveList, Piece, Position, Square,
};
use std::str::FromStr;

const UNDO_STACK_CAPACITY: usize = 256;

struct Undo {
    pos: Chess,
    key: u64,
    null: bool,
}

/// The game being played: the current position, the keys of every position
/// reached so far (for repetition detection) and an undo stack so the search
/// can walk the tree on a single mutable board.
pub struct GameBoard {
    pos: Chess,
    key: u64,
    keys: Vec<u64>,
    undo_stack: Vec<Undo>,
    null_marks: Vec<usize>,
}

impl Default for GameBoard {
    fn default() -> Self {
        Self::from_position(Chess::default())
    }
}

impl GameBoard {
    pub fn from_position(pos: Chess) -> Self {
        let key = zobrist_key(&pos);
        Self {
            pos,
            key,
            keys: vec![key],
            undo_stack: Vec::with_capacity(UNDO_STACK_CAPACITY),
            null_marks: Vec::new(),
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, EngineError> {
        let parsed = Fen::from_str(fen.trim()).map_err(|source| EngineError::InvalidFen {
            fen: fen.to_string(),
            source,
        })?;
        let pos: Chess = parsed.into_position(CastlingMode::Standard).map_err(|err| {
            EngineError::IllegalPosition {
                fen: fen.to_string(),
                reason: err.to_string(),
            }
        })?;
        Ok(Self::from_position(pos))
    }

    /// Plays a move given in UCI notation as part of the game history.
    pub fn apply_uci(&mut self, text: &str) -> Result<Move, EngineError> {
        let uci = UciMove::from_str(text).map_err(|_| EngineError::InvalidUciMove(text.to_string()))?;
        let m = uci
            .to_move(&self.pos)
            .map_err(|_| EngineError::IllegalMove(text.to_string()))?;
        debug_assert!(self.undo_stack.is_empty(), "game move played mid-search");
        self.pos.play_unchecked(m);
        self.key = zobrist_key(&self.pos);
        self.keys.push(self.key);
        Ok(m)
    }

    /// Plays a legal move; must be paired with [`GameBoard::undo`].
    pub fn play(&mut self, m: Move) {
        self.undo_stack.push(Undo {
            pos: self.pos.clone(),
            key: self.key,
            null: false,
        });
        self.pos.play_unchecked(m);
        self.key = zobrist_key(&self.pos);
        self.keys.push(self.key);
    }

    /// Passes the turn. Returns `false` (and changes nothing) when the side to
    /// move is in check, since the resulting position would be invalid.
    pub fn play_null(&mut self) -> bool {
        let Ok(passed) = self.pos.clone().swap_turn() else {
            return false;
        };
        self.undo_stack.push(Undo {
            pos: std::mem::replace(&mut self.pos, passed),
            key: self.key,
            null: true,
        });
        self.key = zobrist_key(&self.pos);
        self.keys.push(self.key);
        self.null_marks.push(self.keys.len() - 1);
        true
    }

    pub fn undo(&mut self) {
        let Some(undo) = self.undo_stack.pop() else {
            debug_assert!(false, "undo without a matching play");
            return;
        };
        self.pos = undo.pos;
        self.key = undo.key;
        self.keys.pop();
        if undo.null {
            self.null_marks.pop();
        }
    }

    /// Whether `m` checks the opponent, found by playing it and taking it back.
    pub fn gives_check(&mut self, m: Move) -> bool {
        self.play(m);
        let check = self.pos.is_check();
        self.undo();
        check
    }

    pub fn position(&self) -> &Chess {
        &self.pos
    }

    pub fn key(&self) -> u64 {
        self.key
    }

    pub fn turn(&self) -> Color {
        self.pos.turn()
    }

    pub fn legal_moves(&self) -> MoveList {
        self.pos.legal_moves()
    }

    pub fn captures(&self) -> MoveList {
        let mut moves = self.pos.legal_moves();
        moves.retain(|m| m.is_capture());
        moves
    }

    pub fn is_legal(&self, m: Move) -> bool {
        self.pos.legal_moves().contains(&m)
    }

    pub fn is_check(&self) -> bool {
        self.pos.is_check()
    }

    pub fn is_checkmate(&self) -> bool {
        self.pos.is_checkmate()
    }

    pub fn is_stalemate(&self) -> bool {
        self.pos.is_stalemate()
    }

    pub fn is_insufficient_material(&self) -> bool {
        self.pos.is_insufficient_material()
    }

    /// The current position occurred before, looking back no further than the
    /// last irreversible move or null move.
    pub fn is_repetition(&self) -> bool {
        let last = self.keys.len() - 1;
        let mut floor = last.saturating_sub(self.pos.halfmoves() as usize);
        if let Some(&mark) = self.null_marks.last() {
            floor = floor.max(mark);
        }
        let mut idx = last;
        while idx >= floor + 2 {
            idx -= 2;
            if self.keys[idx] == self.key {
                return true;
            }
        }
        false
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.pos.halfmoves() >= 100 && !self.pos.is_checkmate()
    }

    /// Draws that do not depend on the side to move running out of moves.
    pub fn is_draw_by_rule(&self) -> bool {
        self.is_insufficient_material() || self.is_fifty_move_draw() || self.is_repetition()
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.pos.board().piece_at(sq)
    }

    pub fn king_of(&self, color: Color) -> Option<Square> {
        self.pos.board().king_of(color)
    }

    pub fn has_non_pawn_material(&self, color: Color) -> bool {
        let board = self.pos.board();
        !(board.by_color(color) & !(board.pawns() | board.kings())).is_empty()
    }

    pub fn to_uci(&self, m: Move) -> String {
        m.to_uci(self.pos.castles().mode()).to_string()
    }

    /// Number of plays currently waiting to be undone.
    pub fn search_depth(&self) -> usize {
        self.undo_stack.len()
    }
}

fn zobrist_key(pos: &Chess) -> u64 {
    pos.zobrist_hash::<Zobrist64>(EnPassantMode::Legal).0
}
