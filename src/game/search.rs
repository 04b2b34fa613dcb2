// src/game/search.rs

pub mod null_move;
pub mod ordering;
pub mod pvs;
pub mod quiescence;
pub mod session;
pub mod tt;

use crate::config::EngineConfig;
use crate::constants::{INFINITY, MATE_SCORE, MAX_DEPTH, MAX_PLY};
use crate::game::GameBoard;
use crossbeam_channel::Sender;
use session::{SearchSession, StopHandle};
use shakmaty::Move;
use std::time::Duration;
use tracing::{debug, info};
use tt::TranspositionTable;

/// Progress report for one completed iteration.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchInfo {
    pub depth: i32,
    pub score: i32,
    pub nodes: u64,
    pub elapsed: Duration,
    pub best_move: Option<Move>,
    /// Principal variation in UCI notation, read back from the table.
    pub pv: Vec<String>,
    pub hashfull: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SearchOutcome {
    pub best_move: Option<Move>,
    pub score: i32,
    /// Deepest iteration that ran to completion.
    pub depth: i32,
    pub nodes: u64,
    pub elapsed: Duration,
}

/// Signed distance to mate in moves: positive when the side to move mates,
/// negative when it gets mated. `None` for ordinary scores.
pub fn mate_distance(score: i32) -> Option<i32> {
    if score >= MATE_SCORE - MAX_PLY {
        Some((MATE_SCORE - score + 1) / 2)
    } else if score <= -(MATE_SCORE - MAX_PLY) {
        Some(-(MATE_SCORE + score) / 2)
    } else {
        None
    }
}

/// Iterative-deepening PVS searcher. Owns the transposition table and the
/// session state; one search runs at a time.
pub struct PvsSearcher {
    tt: TranspositionTable,
    session: SearchSession,
    config: EngineConfig,
    reporter: Option<Sender<SearchInfo>>,
}

impl PvsSearcher {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            tt: TranspositionTable::new(config.hash_mb),
            session: SearchSession::new(Duration::from_millis(config.default_time_ms)),
            config,
            reporter: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_reporter(&mut self, reporter: Sender<SearchInfo>) {
        self.reporter = Some(reporter);
    }

    pub fn set_time_budget(&mut self, budget: Duration) {
        self.session.set_time_budget(budget);
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.session.stop_handle()
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    pub fn clear_cache(&mut self) {
        self.tt.clear();
    }

    pub fn hashfull(&self) -> u32 {
        self.tt.hashfull()
    }

    pub fn search(&mut self, board: &mut GameBoard, max_depth: i32) -> Option<Move> {
        self.search_with_outcome(board, max_depth).best_move
    }

    /// Deepens from one ply up to `max_depth` until the budget runs out and
    /// returns the best move of the deepest finished iteration. Falls back
    /// to the first legal move when no iteration produced a usable one.
    pub fn search_with_outcome(&mut self, board: &mut GameBoard, max_depth: i32) -> SearchOutcome {
        self.session.begin();
        let legal_moves = board.legal_moves();
        let max_depth = max_depth.clamp(1, MAX_DEPTH);

        let mut best_move = None;
        let mut best_score = 0;
        let mut completed_depth = 0;

        if !legal_moves.is_empty() {
            for depth in 1..=max_depth {
                if self.session.is_stopped() {
                    break;
                }
                let score = self.negamax(board, depth, 0, -INFINITY, INFINITY, true);
                if self.session.is_stopped() {
                    debug!(depth, nodes = self.session.nodes, "iteration aborted");
                    break;
                }

                if let Some(m) = self.tt.probe(board.key()).and_then(|entry| entry.best_move) {
                    best_move = Some(m);
                }
                best_score = score;
                completed_depth = depth;
                self.report(board, depth, score, best_move);
            }
        }

        let chosen = best_move
            .filter(|m| legal_moves.contains(m))
            .or_else(|| legal_moves.first().copied());
        if chosen.is_some() && chosen != best_move {
            debug!("no usable move from the table, falling back to the first legal move");
        }

        let outcome = SearchOutcome {
            best_move: chosen,
            score: best_score,
            depth: completed_depth,
            nodes: self.session.nodes,
            elapsed: self.session.elapsed(),
        };
        info!(
            depth = outcome.depth,
            score = outcome.score,
            nodes = outcome.nodes,
            elapsed_ms = outcome.elapsed.as_millis() as u64,
            "search finished"
        );
        outcome
    }

    fn report(&mut self, board: &mut GameBoard, depth: i32, score: i32, best_move: Option<Move>) {
        let elapsed = self.session.elapsed();
        debug!(
            depth,
            score,
            nodes = self.session.nodes,
            elapsed_ms = elapsed.as_millis() as u64,
            "iteration complete"
        );

        let Some(reporter) = &self.reporter else {
            return;
        };
        let info = SearchInfo {
            depth,
            score,
            nodes: self.session.nodes,
            elapsed,
            best_move,
            pv: self.principal_variation(board, depth),
            hashfull: self.tt.hashfull(),
        };
        if reporter.send(info).is_err() {
            debug!("progress receiver dropped");
            self.reporter = None;
        }
    }

    /// Follows best moves stored in the table from the current position,
    /// stopping at a miss, an illegal move or a repeated position.
    pub fn principal_variation(&self, board: &mut GameBoard, max_len: i32) -> Vec<String> {
        let mut line = Vec::new();
        let mut seen = Vec::new();
        while (line.len() as i32) < max_len {
            let Some(m) = self.tt.probe(board.key()).and_then(|entry| entry.best_move) else {
                break;
            };
            if !board.is_legal(m) || seen.contains(&board.key()) {
                break;
            }
            seen.push(board.key());
            line.push(board.to_uci(m));
            board.play(m);
        }
        for _ in 0..seen.len() {
            board.undo();
        }
        line
    }
}
