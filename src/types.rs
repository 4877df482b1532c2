//! Shared scalar types and constants used across the engine.

use shakmaty::Move;

/// Centipawn score, signed, from the side-to-move's point of view.
pub type Score = i32;

/// Any `|score| > MATE_SCORE - 10_000` denotes a forced mate; the distance in
/// plies is `MATE_SCORE - |score|`.
pub const MATE_SCORE: Score = 100_000;
pub const MATE_THRESHOLD: Score = MATE_SCORE - 10_000;
pub const SCORE_INFINITY: Score = MATE_SCORE + 1;

/// Ply bound for killer/history tables and recursion depth.
pub const MAX_PLY: usize = 128;

pub const DEFAULT_DEPTH: u8 = 8;
pub const DEFAULT_TIME_SECS: u64 = 30;
pub const DEFAULT_TT_MAX_ENTRIES: usize = 2_000_000;

/// Maximum magnitude of a history-table entry (prevents runaway accumulation).
pub const HISTORY_MAX: Score = 16_384;

/// Base centipawn value per piece kind, indexed by `role_index` (see `eval::pst`).
pub const PIECE_VALUE: [Score; 6] = [100, 320, 330, 500, 900, 0];

/// Per-search mutable configuration (not persisted across searches).
#[derive(Clone, Copy, Debug)]
pub struct EngineConfig {
    pub max_tt_entries: usize,
    pub default_depth: u8,
    pub default_time_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_tt_entries: DEFAULT_TT_MAX_ENTRIES,
            default_depth: DEFAULT_DEPTH,
            default_time_secs: DEFAULT_TIME_SECS,
        }
    }
}

/// Outcome of a top-level search: best move, its score, the PV, and node count.
#[derive(Clone, Debug, Default)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub score: Score,
    pub pv: Vec<Move>,
    pub depth: u8,
    pub nodes: u64,
}

/// `true` if `score` falls in the forced-mate band (see module doc above).
pub fn is_mate_score(score: Score) -> bool {
    score.abs() > MATE_THRESHOLD
}

/// Plies to mate, given a mate-band score (positive regardless of side).
pub fn mate_distance_plies(score: Score) -> Score {
    MATE_SCORE - score.abs()
}

/// Mate distance in full moves, for human-readable display (§4.7 convention).
pub fn mate_distance_moves(score: Score) -> Score {
    (mate_distance_plies(score) + 1) / 2
}
