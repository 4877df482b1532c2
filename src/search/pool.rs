//! Parallel root searcher (§4.8): distributes the first 20 legal root moves
//! across worker threads, each with its own independent `Engine` (no shared
//! TT), reduced by score.
//!
//! Grounded on `CooperBigFoot-cesso`'s `search/pool.rs`
//! (`std::thread::scope`, per-thread search context), adapted from
//! Lazy-SMP-over-one-root (all threads share a TT and search the same
//! moves) to root-splitting (each thread searches different moves with no
//! shared memory) — "worker process" in the source material is read as
//! "worker thread" here; see `DESIGN.md`.

use std::sync::Mutex;
use std::time::Duration;

use shakmaty::{Chess, Move, Position};
use tracing::info;

use crate::types::{EngineConfig, Score, SearchResult, SCORE_INFINITY};

use super::Engine;

const MAX_ROOT_MOVES: usize = 20;

struct RootResult {
    root_index: usize,
    mv: Move,
    score: Score,
    pv: Vec<Move>,
}

/// Evaluates every one of the first 20 legal root moves independently, each
/// on its own worker thread and its own fresh `Engine`, and returns the
/// move with the maximum score. Ties are broken by generation order, not by
/// which worker finishes first.
pub fn search_parallel(
    pos: &Chess,
    max_depth: u8,
    time_limit: Duration,
    workers: usize,
    config: &EngineConfig,
) -> SearchResult {
    let root_moves: Vec<Move> = pos.legal_moves().into_iter().take(MAX_ROOT_MOVES).collect();
    if root_moves.is_empty() {
        return SearchResult::default();
    }

    let workers = workers.max(1);
    let chunk_size = root_moves.len().div_ceil(workers).max(1);
    let results: Mutex<Vec<RootResult>> = Mutex::new(Vec::new());

    std::thread::scope(|scope| {
        for (chunk_start, chunk) in root_moves.chunks(chunk_size).enumerate() {
            let offset = chunk_start * chunk_size;
            scope.spawn(|| {
                for (i, mv) in chunk.iter().enumerate() {
                    let Ok(child) = pos.clone().play(mv) else { continue };

                    let mut engine = Engine::new(config);
                    engine.new_search(time_limit);
                    let (score, sub_pv) =
                        engine.negamax(&child, max_depth as i32 - 1, -SCORE_INFINITY, SCORE_INFINITY, 1, true);

                    let mut pv = vec![mv.clone()];
                    pv.extend(sub_pv);

                    results.lock().unwrap().push(RootResult {
                        root_index: offset + i,
                        mv: mv.clone(),
                        score: -score,
                        pv,
                    });
                }
            });
        }
    });

    let results = results.into_inner().expect("no worker thread panicked");
    info!(workers, moves = root_moves.len(), "parallel root search joined");

    let best = results
        .into_iter()
        .min_by_key(|r| (std::cmp::Reverse(r.score), r.root_index))
        .expect("at least one root move was evaluated");

    SearchResult {
        best_move: Some(best.mv),
        score: best.score,
        pv: best.pv,
        depth: max_depth,
        nodes: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MATE_SCORE;
    use shakmaty::CastlingMode;

    fn pos_from_fen(fen: &str) -> Chess {
        let fen: shakmaty::fen::Fen = fen.parse().unwrap();
        fen.into_position(CastlingMode::Standard).unwrap()
    }

    #[test]
    fn parallel_search_finds_mate_in_one() {
        let pos = pos_from_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1");
        let config = EngineConfig::default();
        let result = search_parallel(&pos, 2, Duration::from_secs(5), 2, &config);
        assert!(result.score >= MATE_SCORE - 10);
    }

    #[test]
    fn parallel_search_returns_a_legal_move_from_startpos() {
        let pos = Chess::default();
        let config = EngineConfig::default();
        let result = search_parallel(&pos, 2, Duration::from_secs(5), 2, &config);
        let mv = result.best_move.expect("a move should be found");
        assert!(pos.legal_moves().iter().any(|m| *m == mv));
    }
}
