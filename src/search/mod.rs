//! Search: transposition-table-backed alpha-beta negamax with quiescence,
//! an iterative-deepening driver, and a parallel root searcher.

pub mod driver;
pub mod heuristics;
pub mod negamax;
pub mod pool;
pub mod quiescence;

use std::time::{Duration, Instant};

use heuristics::{HistoryTable, KillerTable};

use crate::tt::TranspositionTable;
use crate::types::EngineConfig;

pub use driver::{format_score, search};
pub use pool::search_parallel;

/// Per-search mutable state (§3 "Search state"): node counter, killer and
/// history tables, the transposition table, and the clock. Belongs to a
/// single search; reset at the start of each top-level call so bounds never
/// leak across unrelated positions. The parallel root searcher gives each
/// worker its own independent `Engine` rather than sharing one.
pub struct Engine {
    pub tt: TranspositionTable,
    pub killers: KillerTable,
    pub history: HistoryTable,
    pub nodes: u64,
    pub start_time: Instant,
    pub time_limit: Duration,
    /// Set once the 1000-node clock poll finds the time budget exhausted;
    /// every subsequent call short-circuits instead of polling again.
    pub stopped: bool,
    /// Fingerprints of every ancestor position in the current search line,
    /// used for repetition detection (not part of a bare position).
    pub position_history: Vec<u64>,
}

impl Engine {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            tt: TranspositionTable::new(config.max_tt_entries),
            killers: KillerTable::new(),
            history: HistoryTable::new(),
            nodes: 0,
            start_time: Instant::now(),
            time_limit: Duration::from_secs(config.default_time_secs),
            stopped: false,
            position_history: Vec::new(),
        }
    }

    /// Resets everything a top-level search must not leak across positions:
    /// node count, killers, history, and the clock. The TT is intentionally
    /// left intact — it persists across searches within the same engine.
    pub fn new_search(&mut self, time_limit: Duration) {
        self.nodes = 0;
        self.killers.clear();
        self.history.clear();
        self.start_time = Instant::now();
        self.time_limit = time_limit;
        self.stopped = false;
        self.position_history.clear();
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn time_is_up(&self) -> bool {
        self.elapsed() >= self.time_limit
    }
}
