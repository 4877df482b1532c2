//! Iterative-deepening driver (§4.7): aspiration windows, an immediate
//! mate check, and a soft time cutoff. Grounded on the teacher's `search()`
//! in `src/search.rs` for the iteration loop and score formatting.

use std::time::Duration;

use shakmaty::{Chess, Position};
use tracing::info;

use crate::types::{mate_distance_moves, Score, SearchResult, MATE_SCORE, SCORE_INFINITY};

use super::Engine;

const ASPIRATION_WINDOW: Score = 50;
const SOFT_TIME_FRACTION: f64 = 0.9;

/// Drives negamax at increasing depth, from 1 to `max_depth`, within
/// `time_limit`. Never returns an illegal move; returns `None` iff `pos` has
/// no legal moves.
pub fn search(engine: &mut Engine, pos: &Chess, max_depth: u8, time_limit: Duration) -> SearchResult {
    engine.new_search(time_limit);

    let legal_moves = pos.legal_moves();
    if legal_moves.is_empty() {
        return SearchResult::default();
    }

    if let Some(mate_move) = immediate_mate(pos, &legal_moves) {
        return SearchResult {
            best_move: Some(mate_move.clone()),
            score: MATE_SCORE - 1,
            pv: vec![mate_move],
            depth: 1,
            nodes: engine.nodes,
        };
    }

    let mut best_move: Option<shakmaty::Move> = None;
    let mut best_score: Score = 0;
    let mut best_pv: Vec<shakmaty::Move> = Vec::new();
    let mut best_depth: u8 = 0;

    for depth in 1..=max_depth {
        if engine.elapsed().as_secs_f64() > SOFT_TIME_FRACTION * time_limit.as_secs_f64() {
            break;
        }

        let alpha = best_score - ASPIRATION_WINDOW;
        let beta = best_score + ASPIRATION_WINDOW;
        let (mut score, mut pv) = engine.negamax(pos, depth as i32, alpha, beta, 0, true);

        if engine.stopped {
            break;
        }

        if score <= alpha || score >= beta {
            let (full_score, full_pv) = engine.negamax(pos, depth as i32, -SCORE_INFINITY, SCORE_INFINITY, 0, true);
            if engine.stopped {
                break;
            }
            score = full_score;
            pv = full_pv;
        }

        if !pv.is_empty() {
            best_move = Some(pv[0].clone());
            best_score = score;
            best_pv = pv;
            best_depth = depth;
            info!(depth, score, nodes = engine.nodes, "completed iteration");
        }
    }

    match best_move {
        Some(mv) => SearchResult {
            best_move: Some(mv),
            score: best_score,
            pv: best_pv,
            depth: best_depth,
            nodes: engine.nodes,
        },
        None => SearchResult {
            best_move: Some(legal_moves[0].clone()),
            score: 0,
            pv: vec![legal_moves[0].clone()],
            depth: 0,
            nodes: engine.nodes,
        },
    }
}

fn immediate_mate(pos: &Chess, legal_moves: &shakmaty::MoveList) -> Option<shakmaty::Move> {
    legal_moves.iter().find_map(|mv| {
        let after = pos.clone().play(mv).ok()?;
        after.is_checkmate().then(|| mv.clone())
    })
}

/// Formats `score` for human display: mate distance in full moves if in the
/// mate band, otherwise a plain centipawn value.
pub fn format_score(score: Score) -> String {
    if crate::types::is_mate_score(score) {
        let moves = mate_distance_moves(score);
        if score > 0 {
            format!("mate {moves}")
        } else {
            format!("mate -{moves}")
        }
    } else {
        format!("cp {score}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Engine;
    use crate::types::EngineConfig;
    use shakmaty::CastlingMode;

    fn pos_from_fen(fen: &str) -> Chess {
        let fen: shakmaty::fen::Fen = fen.parse().unwrap();
        fen.into_position(CastlingMode::Standard).unwrap()
    }

    #[test]
    fn mate_in_one_is_returned_without_deep_search() {
        let pos = pos_from_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1");
        let mut engine = Engine::new(&EngineConfig::default());
        let result = search(&mut engine, &pos, 2, Duration::from_secs(5));
        assert!(result.score >= MATE_SCORE - 10);
    }

    #[test]
    fn startpos_depth_four_is_roughly_balanced() {
        let pos = Chess::default();
        let mut engine = Engine::new(&EngineConfig::default());
        let result = search(&mut engine, &pos, 4, Duration::from_secs(10));
        assert!(result.best_move.is_some());
        assert!(result.score.abs() < 200);
    }

    #[test]
    fn format_score_shows_mate_distance() {
        assert_eq!(format_score(MATE_SCORE - 1), "mate 1");
    }

    #[test]
    fn format_score_shows_centipawns_otherwise() {
        assert_eq!(format_score(35), "cp 35");
    }
}
