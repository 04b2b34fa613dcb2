// src/game/search/session.rs

//! Per-search bookkeeping: node counter, clock and the stop flag.

use crate::constants::NODE_POLL_INTERVAL;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cancellation token shared between a running search and whoever may want
/// to interrupt it. Cloning hands out another reference to the same flag.
/// A stop stays in force until [`StopHandle::reset`], which the code
/// starting a search calls before handing the searcher to its thread.
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

#[derive(Debug)]
pub struct SearchSession {
    pub nodes: u64,
    pub max_qply: u32,
    pub null_move_attempts: u64,
    timed_out: bool,
    stop: StopHandle,
    started: Instant,
    time_budget: Duration,
}

impl SearchSession {
    pub fn new(time_budget: Duration) -> Self {
        Self {
            nodes: 0,
            max_qply: 0,
            null_move_attempts: 0,
            timed_out: false,
            stop: StopHandle::default(),
            started: Instant::now(),
            time_budget,
        }
    }

    /// Resets the counters and starts the clock. The external stop handle
    /// is left alone.
    pub fn begin(&mut self) {
        self.nodes = 0;
        self.max_qply = 0;
        self.null_move_attempts = 0;
        self.timed_out = false;
        self.started = Instant::now();
    }

    /// Counts a visited node and, every `NODE_POLL_INTERVAL` nodes, checks
    /// the clock against the budget. Returns whether the search should stop.
    pub fn count_node(&mut self) -> bool {
        self.nodes += 1;
        if self.nodes % NODE_POLL_INTERVAL == 0 && self.started.elapsed() >= self.time_budget {
            self.timed_out = true;
        }
        self.is_stopped()
    }

    /// Out of time, or stopped from outside.
    pub fn is_stopped(&self) -> bool {
        self.timed_out || self.stop.is_stopped()
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn time_budget(&self) -> Duration {
        self.time_budget
    }

    pub fn set_time_budget(&mut self, budget: Duration) {
        self.time_budget = budget;
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn record_quiescence_ply(&mut self, qply: u32) {
        self.max_qply = self.max_qply.max(qply);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_handle_is_shared() {
        let session = SearchSession::new(Duration::from_secs(1));
        let handle = session.stop_handle();
        assert!(!session.is_stopped());
        handle.stop();
        assert!(session.is_stopped());
        handle.reset();
        assert!(!session.is_stopped());
    }

    #[test]
    fn test_budget_is_only_checked_at_poll_interval() {
        let mut session = SearchSession::new(Duration::ZERO);
        session.begin();
        for _ in 1..NODE_POLL_INTERVAL {
            assert!(!session.count_node());
        }
        assert!(session.count_node());
        assert_eq!(session.nodes, NODE_POLL_INTERVAL);
    }

    #[test]
    fn test_begin_clears_timeout_but_not_external_stop() {
        let mut session = SearchSession::new(Duration::ZERO);
        for _ in 0..NODE_POLL_INTERVAL {
            session.count_node();
        }
        session.record_quiescence_ply(4);
        assert!(session.is_stopped());
        assert!(!session.stop_handle().is_stopped());

        session.set_time_budget(Duration::from_secs(60));
        session.begin();
        assert!(!session.is_stopped());
        assert_eq!(session.nodes, 0);
        assert_eq!(session.max_qply, 0);
        assert_eq!(session.time_budget(), Duration::from_secs(60));

        session.stop_handle().stop();
        session.begin();
        assert!(session.is_stopped());
    }
}
