//! Move ordering (§4.4): ranks legal moves to maximize alpha-beta cutoffs.
//!
//! Grounded on the teacher's `movegen.rs` (`ScoredMove`, `ArrayVec` buffer,
//! descending sort), adapted to a single pass since `shakmaty` hands back
//! the full legal-move list at once rather than a filterable move stream.

use arrayvec::ArrayVec;
use shakmaty::{Chess, Move, Position, Role};

use crate::eval::pst::piece_value;
use crate::search::heuristics::HistoryTable;
use crate::types::Score;

pub struct ScoredMove {
    pub mv: Move,
    pub score: Score,
}

const TT_MOVE_BONUS: Score = 100_000;
const CAPTURE_BASE: Score = 10_000;
const KILLER_PRIMARY_BONUS: Score = 9_000;
const KILLER_SECONDARY_BONUS: Score = 8_000;
const PROMOTION_BASE: Score = 7_000;
const GIVES_CHECK_BONUS: Score = 50;

fn role_value(role: Role) -> Score {
    piece_value(role)
}

/// MVV-LVA contribution for a capture: `10 * victim - attacker`.
fn mvv_lva(victim: Role, attacker: Role) -> Score {
    10 * role_value(victim) - role_value(attacker)
}

fn center_proximity(mv: &Move) -> Score {
    let to = mv.to();
    let file = to.file() as i32 as f64;
    let rank = to.rank() as i32 as f64;
    let distance = (3.5 - file).abs() + (3.5 - rank).abs();
    (10.0 * (7.0 - distance)).round() as Score
}

fn score_move(
    pos: &Chess,
    mv: &Move,
    hash_move: Option<&Move>,
    killers: &[Option<Move>; 2],
    history: &HistoryTable,
) -> Score {
    let mut score = 0;

    if hash_move == Some(mv) {
        score += TT_MOVE_BONUS;
    }

    if let Some(victim) = mv.capture() {
        let attacker = mv.role();
        score += CAPTURE_BASE + mvv_lva(victim, attacker);
    }

    if killers[0].as_ref() == Some(mv) {
        score += KILLER_PRIMARY_BONUS;
    } else if killers[1].as_ref() == Some(mv) {
        score += KILLER_SECONDARY_BONUS;
    }

    if let Some(promotion) = mv.promotion() {
        score += PROMOTION_BASE + 100 * role_value(promotion);
    }

    if let (Some(from), Some(color)) = (mv.from(), Some(pos.turn())) {
        score += history.get(color, from, mv.to());
    }

    if gives_check(pos, mv) {
        score += GIVES_CHECK_BONUS;
    }

    score += center_proximity(mv);
    score
}

fn gives_check(pos: &Chess, mv: &Move) -> bool {
    pos.clone().play(mv).map(|after| after.is_check()).unwrap_or(false)
}

/// Orders the legal moves of `pos`, highest score first.
pub fn order_moves(
    pos: &Chess,
    hash_move: Option<&Move>,
    killers: &[Option<Move>; 2],
    history: &HistoryTable,
) -> ArrayVec<ScoredMove, 256> {
    let mut scored: ArrayVec<ScoredMove, 256> = ArrayVec::new();

    for mv in pos.legal_moves() {
        let score = score_move(pos, &mv, hash_move, killers, history);
        scored.push(ScoredMove { mv, score });
    }

    scored.sort_unstable_by(|a, b| b.score.cmp(&a.score));
    scored
}
