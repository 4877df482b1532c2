//! Transposition table: a bounded map from position fingerprint to search
//! record.
//!
//! Unlike a fixed-size open-addressed array, this is a genuine hash map: a
//! fresh key is always inserted, and eviction happens only when the table is
//! at capacity, at which point a random 10% of entries are dropped. See
//! `DESIGN.md` for why this departs from the single-engine-per-process
//! array layout.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::SeedableRng;
use shakmaty::Move;

use crate::types::{Score, MATE_SCORE, MATE_THRESHOLD};

const DEFAULT_SEED: u64 = 0x2B7E_1516_28AE_D2A6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TTFlag {
    Exact,
    LowerBound,
    UpperBound,
}

#[derive(Clone, Debug)]
pub struct TTEntry {
    pub depth: u8,
    pub score: Score,
    pub flag: TTFlag,
    pub best_move: Option<Move>,
    pub pv: Vec<Move>,
}

pub struct TranspositionTable {
    table: HashMap<u64, TTEntry>,
    max_size: usize,
    rng: StdRng,
}

impl TranspositionTable {
    pub fn new(max_size: usize) -> Self {
        Self::with_seed(max_size, DEFAULT_SEED)
    }

    /// Same as `new`, but with an explicit eviction-PRNG seed, so tests can
    /// make eviction deterministic.
    pub fn with_seed(max_size: usize, seed: u64) -> Self {
        Self {
            table: HashMap::new(),
            max_size,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns `(score, best_move, pv)` on a hit. A hit requires
    /// `stored_depth >= depth` and one of: EXACT; LOWER with
    /// `stored_score >= beta`; UPPER with `stored_score <= alpha`. Any other
    /// case is a miss, even if an entry for this key exists.
    pub fn probe(
        &self,
        hash: u64,
        depth: u8,
        alpha: Score,
        beta: Score,
        ply: u32,
    ) -> Option<(Score, Option<Move>, Vec<Move>)> {
        let entry = self.table.get(&hash)?;
        if entry.depth < depth {
            return None;
        }

        let score = rescale_from_storage(entry.score, ply);
        let is_hit = match entry.flag {
            TTFlag::Exact => true,
            TTFlag::LowerBound => score >= beta,
            TTFlag::UpperBound => score <= alpha,
        };

        is_hit.then(|| (score, entry.best_move.clone(), entry.pv.clone()))
    }

    /// The best-move hint for `hash`, regardless of whether a full probe
    /// would be a hit. Used by move ordering.
    pub fn best_move(&self, hash: u64) -> Option<Move> {
        self.table.get(&hash).and_then(|e| e.best_move.clone())
    }

    pub fn store(
        &mut self,
        hash: u64,
        depth: u8,
        score: Score,
        flag: TTFlag,
        best_move: Option<Move>,
        pv: Vec<Move>,
        ply: u32,
    ) {
        if let Some(existing) = self.table.get(&hash) {
            if depth < existing.depth {
                return;
            }
        } else if self.table.len() >= self.max_size {
            self.evict();
        }

        let score = rescale_for_storage(score, ply);
        self.table.insert(
            hash,
            TTEntry { depth, score, flag, best_move, pv },
        );
    }

    /// Drops a random ~10% of entries. Called only when at capacity, so
    /// steady-state churn stays bounded.
    fn evict(&mut self) {
        use rand::seq::SliceRandom;

        let keys: Vec<u64> = self.table.keys().copied().collect();
        let target = (keys.len() / 10).max(1);
        for key in keys.choose_multiple(&mut self.rng, target) {
            self.table.remove(key);
        }
    }

    pub fn clear(&mut self) {
        self.table.clear();
    }
}

fn rescale_for_storage(score: Score, ply: u32) -> Score {
    if score > MATE_THRESHOLD {
        score + ply as Score
    } else if score < -MATE_THRESHOLD {
        score - ply as Score
    } else {
        score
    }
}

fn rescale_from_storage(score: Score, ply: u32) -> Score {
    if score > MATE_THRESHOLD {
        score - ply as Score
    } else if score < -MATE_THRESHOLD {
        score + ply as Score
    } else {
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SCORE_INFINITY;

    #[test]
    fn store_then_probe_is_a_hit() {
        let mut tt = TranspositionTable::new(1024);
        let hash = 0x1234_5678_9abc_def0;
        tt.store(hash, 5, 100, TTFlag::Exact, None, vec![], 0);

        let hit = tt.probe(hash, 5, -SCORE_INFINITY, SCORE_INFINITY, 0);
        assert_eq!(hit.map(|(s, _, _)| s), Some(100));
    }

    #[test]
    fn probe_at_greater_depth_is_a_miss() {
        let mut tt = TranspositionTable::new(1024);
        let hash = 0xABCDEF;
        tt.store(hash, 3, 100, TTFlag::Exact, None, vec![], 0);
        assert!(tt.probe(hash, 5, -SCORE_INFINITY, SCORE_INFINITY, 0).is_none());
    }

    #[test]
    fn lower_bound_hit_requires_score_above_beta() {
        let mut tt = TranspositionTable::new(1024);
        let hash = 0xBEEF;
        tt.store(hash, 4, 50, TTFlag::LowerBound, None, vec![], 0);
        assert!(tt.probe(hash, 4, -1000, 100, 0).is_none());
        assert!(tt.probe(hash, 4, -1000, 40, 0).is_some());
    }

    #[test]
    fn shallower_store_does_not_overwrite_deeper_entry() {
        let mut tt = TranspositionTable::new(1024);
        let hash = 0x42;
        tt.store(hash, 8, 10, TTFlag::Exact, None, vec![], 0);
        tt.store(hash, 3, 999, TTFlag::Exact, None, vec![], 0);

        let (score, _, _) = tt.probe(hash, 3, -SCORE_INFINITY, SCORE_INFINITY, 0).unwrap();
        assert_eq!(score, 10);
    }

    #[test]
    fn deeper_store_overwrites_shallower_entry() {
        let mut tt = TranspositionTable::new(1024);
        let hash = 0x99;
        tt.store(hash, 3, 50, TTFlag::Exact, None, vec![], 0);
        tt.store(hash, 6, 75, TTFlag::Exact, None, vec![], 0);

        let (score, _, _) = tt.probe(hash, 6, -SCORE_INFINITY, SCORE_INFINITY, 0).unwrap();
        assert_eq!(score, 75);
    }

    #[test]
    fn mate_score_is_rescaled_by_ply_on_round_trip() {
        let mut tt = TranspositionTable::new(1024);
        let hash = 0xABCDEF;
        let mate_score = MATE_SCORE - 3;

        tt.store(hash, 10, mate_score, TTFlag::Exact, None, vec![], 3);
        let (score, _, _) = tt.probe(hash, 10, -SCORE_INFINITY, SCORE_INFINITY, 3).unwrap();
        assert_eq!(score, mate_score);
    }

    #[test]
    fn eviction_keeps_table_within_max_size() {
        let mut tt = TranspositionTable::with_seed(16, 42);
        for i in 0..64u64 {
            tt.store(i, 1, i as Score, TTFlag::Exact, None, vec![], 0);
        }
        assert!(tt.len() <= 16);
    }
}
