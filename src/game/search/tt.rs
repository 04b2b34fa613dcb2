// src/game/search/tt.rs

//! Transposition table.
//!
//! A fixed number of slots, a power of two, indexed by the low bits of the
//! position key. Each slot holds at most one entry; a write replaces the
//! resident entry only when it is not deeper than the new one or belongs to
//! the same position. Reads check the full key, so two positions sharing a
//! slot never see each other's data.

use crate::constants::{MATE_SCORE, MAX_PLY};
use shakmaty::Move;
use std::mem;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    /// The stored score is the true value.
    Exact,
    /// The true value is at least the stored score (fail high).
    Lower,
    /// The true value is at most the stored score (fail low).
    Upper,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TTEntry {
    pub key: u64,
    pub best_move: Option<Move>,
    pub depth: i32,
    pub score: i32,
    pub bound: Bound,
}

pub struct TranspositionTable {
    table: Vec<Option<TTEntry>>,
    mask: usize,
}

impl TranspositionTable {
    /// Largest power-of-two table that fits in `size_mb` MiB.
    pub fn new(size_mb: usize) -> Self {
        let entry_size = mem::size_of::<Option<TTEntry>>();
        Self::with_entries(size_mb.saturating_mul(1024 * 1024) / entry_size)
    }

    /// Table with `entries` rounded down to a power of two (at least one).
    pub fn with_entries(entries: usize) -> Self {
        let len = match entries {
            0 | 1 => 1,
            n if n.is_power_of_two() => n,
            n => n.next_power_of_two() >> 1,
        };
        Self {
            table: vec![None; len],
            mask: len - 1,
        }
    }

    #[inline]
    fn index(&self, key: u64) -> usize {
        (key as usize) & self.mask
    }

    pub fn store(&mut self, key: u64, best_move: Option<Move>, depth: i32, score: i32, bound: Bound) {
        let index = self.index(key);
        let slot = &mut self.table[index];
        let replace = match slot {
            None => true,
            Some(entry) => entry.depth <= depth || entry.key == key,
        };
        if replace {
            *slot = Some(TTEntry {
                key,
                best_move,
                depth,
                score,
                bound,
            });
        }
    }

    pub fn probe(&self, key: u64) -> Option<&TTEntry> {
        self.table[self.index(key)]
            .as_ref()
            .filter(|entry| entry.key == key)
    }

    pub fn clear(&mut self) {
        self.table.fill(None);
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.iter().all(Option::is_none)
    }

    /// Occupancy in per-mille, sampled over the first thousand slots.
    pub fn hashfull(&self) -> u32 {
        let sample = self.table.len().min(1000);
        let used = self.table[..sample].iter().filter(|slot| slot.is_some()).count();
        (used * 1000 / sample) as u32
    }
}

fn is_mate_score(score: i32) -> bool {
    score.abs() >= MATE_SCORE - MAX_PLY
}

/// Converts a root-relative mate score into one relative to the node at `ply`.
pub fn score_to_tt(score: i32, ply: u32) -> i32 {
    if !is_mate_score(score) {
        score
    } else if score > 0 {
        score + ply as i32
    } else {
        score - ply as i32
    }
}

/// Inverse of [`score_to_tt`] for a node found at `ply`.
pub fn score_from_tt(score: i32, ply: u32) -> i32 {
    if !is_mate_score(score) {
        score
    } else if score > 0 {
        score - ply as i32
    } else {
        score + ply as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::{Position, Chess};

    fn opening_moves() -> (Move, Move) {
        let moves = Chess::default().legal_moves();
        (moves[0], moves[1])
    }

    #[test]
    fn test_size_is_largest_power_of_two_within_budget() {
        let tt = TranspositionTable::new(1);
        let entry_size = mem::size_of::<Option<TTEntry>>();
        assert!(tt.len().is_power_of_two());
        assert!(tt.len() * entry_size <= 1024 * 1024);
        assert!(tt.len() * 2 * entry_size > 1024 * 1024);

        assert_eq!(TranspositionTable::with_entries(1000).len(), 512);
        assert_eq!(TranspositionTable::with_entries(1024).len(), 1024);
        assert_eq!(TranspositionTable::with_entries(0).len(), 1);
    }

    #[test]
    fn test_store_then_probe() {
        let (m, _) = opening_moves();
        let mut tt = TranspositionTable::with_entries(1024);
        tt.store(42, Some(m), 4, 35, Bound::Lower);

        let entry = tt.probe(42).unwrap();
        assert_eq!(entry.depth, 4);
        assert_eq!(entry.score, 35);
        assert_eq!(entry.bound, Bound::Lower);
        assert_eq!(entry.best_move, Some(m));
        assert!(tt.probe(43).is_none());
    }

    #[test]
    fn test_colliding_key_is_a_miss() {
        let mut tt = TranspositionTable::with_entries(1024);
        let key = 0x1234_5678_9abc_0007;
        let colliding = key + tt.len() as u64;
        tt.store(key, None, 6, 10, Bound::Exact);

        assert!(tt.probe(colliding).is_none());
        assert!(tt.probe(key).is_some());
    }

    #[test]
    fn test_shallower_colliding_write_is_rejected() {
        let (m, m2) = opening_moves();
        let mut tt = TranspositionTable::with_entries(1024);
        let key = 77;
        let colliding = key + tt.len() as u64;

        tt.store(key, Some(m), 5, 120, Bound::Exact);
        tt.store(colliding, Some(m2), 2, 90, Bound::Lower);

        let entry = tt.probe(key).unwrap();
        assert_eq!(entry.depth, 5);
        assert_eq!(entry.score, 120);
        assert_eq!(entry.bound, Bound::Exact);
        assert!(tt.probe(colliding).is_none());
    }

    #[test]
    fn test_deeper_or_equal_colliding_write_replaces() {
        let mut tt = TranspositionTable::with_entries(1024);
        let key = 77;
        let colliding = key + tt.len() as u64;

        tt.store(key, None, 3, 10, Bound::Exact);
        tt.store(colliding, None, 3, 20, Bound::Upper);

        assert!(tt.probe(key).is_none());
        assert_eq!(tt.probe(colliding).unwrap().score, 20);
    }

    #[test]
    fn test_same_key_always_refreshes() {
        let (m, m2) = opening_moves();
        let mut tt = TranspositionTable::with_entries(1024);

        tt.store(9, Some(m), 5, 120, Bound::Exact);
        tt.store(9, Some(m2), 2, 90, Bound::Lower);

        let entry = tt.probe(9).unwrap();
        assert_eq!(entry.depth, 2);
        assert_eq!(entry.score, 90);
        assert_eq!(entry.bound, Bound::Lower);
        assert_eq!(entry.best_move, Some(m2));
    }

    #[test]
    fn test_clear_and_hashfull() {
        let mut tt = TranspositionTable::with_entries(16);
        assert!(tt.is_empty());
        assert_eq!(tt.hashfull(), 0);
        for key in 0..8 {
            tt.store(key, None, 1, 0, Bound::Exact);
        }
        assert_eq!(tt.hashfull(), 500);
        tt.clear();
        assert!(tt.is_empty());
        assert!(tt.probe(3).is_none());
    }

    #[test]
    fn test_mate_scores_are_stored_relative_to_the_node() {
        let mate_in_three_from_root = MATE_SCORE - 5;
        let stored = score_to_tt(mate_in_three_from_root, 2);
        assert_eq!(stored, MATE_SCORE - 3);
        assert_eq!(score_from_tt(stored, 2), mate_in_three_from_root);
        assert_eq!(score_from_tt(stored, 4), MATE_SCORE - 7);

        let mated = -MATE_SCORE + 6;
        assert_eq!(score_from_tt(score_to_tt(mated, 3), 3), mated);
        assert_eq!(score_to_tt(150, 9), 150);
    }
}
