// src/engine.rs

//! The engine as seen by a protocol front end: one game board, one searcher.

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::game::search::session::StopHandle;
use crate::game::search::{PvsSearcher, SearchInfo, SearchOutcome};
use crate::game::GameBoard;
use crossbeam_channel::Sender;
use shakmaty::Move;
use std::time::Duration;
use tracing::{debug, warn};

pub struct Engine {
    board: GameBoard,
    searcher: PvsSearcher,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            board: GameBoard::default(),
            searcher: PvsSearcher::new(config),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        self.searcher.config()
    }

    /// Back to the start position with an empty transposition table.
    pub fn new_game(&mut self) {
        self.board = GameBoard::default();
        self.searcher.clear_cache();
        debug!("new game");
    }

    pub fn set_start_position(&mut self) {
        self.board = GameBoard::default();
    }

    /// Replaces the board with the position described by `fen`. On failure
    /// the board is reset to the start position and the error returned.
    pub fn set_position(&mut self, fen: &str) -> Result<(), EngineError> {
        match GameBoard::from_fen(fen) {
            Ok(board) => {
                self.board = board;
                Ok(())
            }
            Err(err) => {
                warn!(%err, "rejected position, using the start position");
                self.board = GameBoard::default();
                Err(err)
            }
        }
    }

    pub fn apply_external_move(&mut self, uci: &str) -> Result<Move, EngineError> {
        self.board.apply_uci(uci)
    }

    pub fn set_time_budget(&mut self, millis: u64) {
        self.searcher.set_time_budget(Duration::from_millis(millis));
    }

    /// Stops the running search. The request holds until [`Engine::clear_stop`].
    pub fn request_stop(&self) {
        self.searcher.stop_handle().stop();
    }

    pub fn clear_stop(&self) {
        self.searcher.stop_handle().reset();
    }

    /// Handle for stopping a search running on another thread.
    pub fn stop_handle(&self) -> StopHandle {
        self.searcher.stop_handle()
    }

    pub fn set_reporter(&mut self, reporter: Sender<SearchInfo>) {
        self.searcher.set_reporter(reporter);
    }

    pub fn search(&mut self, max_depth: i32) -> Option<Move> {
        self.searcher.search(&mut self.board, max_depth)
    }

    pub fn search_with_outcome(&mut self, max_depth: i32) -> SearchOutcome {
        self.searcher.search_with_outcome(&mut self.board, max_depth)
    }

    pub fn board(&self) -> &GameBoard {
        &self.board
    }

    pub fn move_to_uci(&self, m: Move) -> String {
        self.board.to_uci(m)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
