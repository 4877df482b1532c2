//! Quiescence search (§4.5): extends leaves through tactical sequences only,
//! fail-hard throughout. Grounded on the teacher's `quiescence` in
//! `src/search.rs` (stand-pat, cutoff structure), with the fail-soft
//! returns there corrected to fail-hard and tactical-move generation
//! widened from captures-only to captures/promotions/checks/pawn-pushes.

use shakmaty::{Move, Position, Role};

use crate::eval::{evaluate, pst::piece_value};
use crate::types::Score;

const MAX_QPLY: u32 = 6;

struct TacticalMove {
    mv: Move,
    score: Score,
}

fn mvv_lva(victim: Role, attacker: Role) -> Score {
    10 * piece_value(victim) - piece_value(attacker)
}

fn role_index(role: Role) -> Score {
    match role {
        Role::Pawn => 0,
        Role::Knight => 1,
        Role::Bishop => 2,
        Role::Rook => 3,
        Role::Queen => 4,
        Role::King => 5,
    }
}

fn gives_check(pos: &shakmaty::Chess, mv: &Move) -> bool {
    pos.clone().play(mv).map(|after| after.is_check()).unwrap_or(false)
}

fn is_penultimate_push(pos: &shakmaty::Chess, mv: &Move) -> bool {
    if mv.role() != Role::Pawn || mv.capture().is_some() {
        return false;
    }
    let rank = mv.to().rank() as i32;
    match pos.turn() {
        shakmaty::Color::White => rank == 6,
        shakmaty::Color::Black => rank == 1,
    }
}

fn tactical_moves(pos: &shakmaty::Chess) -> Vec<TacticalMove> {
    let mut tactical = Vec::new();

    for mv in pos.legal_moves() {
        let checks = gives_check(pos, &mv);

        let score = if let Some(promotion) = mv.promotion() {
            15_000 + 100 * role_index(promotion)
        } else if let Some(victim) = mv.capture() {
            10_000 + mvv_lva(victim, mv.role()) + if checks { 1_000 } else { 0 }
        } else if checks {
            8_000
        } else if is_penultimate_push(pos, &mv) {
            7_000
        } else {
            continue;
        };

        tactical.push(TacticalMove { mv, score });
    }

    tactical.sort_unstable_by(|a, b| b.score.cmp(&a.score));
    tactical
}

/// Fail-hard quiescence search. `qply` is the distance from the quiescence
/// entry point (distinct from the full-search ply used for mate encoding).
pub fn quiescence(
    pos: &shakmaty::Chess,
    mut alpha: Score,
    beta: Score,
    qply: u32,
    search_ply: u32,
    history: &[u64],
    nodes: &mut u64,
) -> Score {
    *nodes += 1;

    let stand_pat = evaluate(pos, search_ply, history);
    if stand_pat >= beta {
        return beta;
    }
    if stand_pat > alpha {
        alpha = stand_pat;
    }

    if qply >= MAX_QPLY {
        return alpha;
    }

    for candidate in tactical_moves(pos) {
        let Ok(after) = pos.clone().play(&candidate.mv) else {
            continue;
        };
        let score = -quiescence(&after, -beta, -alpha, qply + 1, search_ply + 1, history, nodes);

        if score >= beta {
            return beta;
        }
        if score > alpha {
            alpha = score;
        }
    }

    alpha
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::{CastlingMode, Chess};

    fn pos_from_fen(fen: &str) -> Chess {
        let fen: shakmaty::fen::Fen = fen.parse().unwrap();
        fen.into_position(CastlingMode::Standard).unwrap()
    }

    #[test]
    fn quiet_position_returns_stand_pat() {
        let pos = Chess::default();
        let mut nodes = 0;
        let score = quiescence(&pos, -100_000, 100_000, 0, 0, &[], &mut nodes);
        assert_eq!(score, evaluate(&pos, 0, &[]));
    }

    #[test]
    fn hanging_queen_is_captured() {
        // black queen on d8 hangs to a white rook on d1 with an open file.
        let pos = pos_from_fen("3qk3/8/8/8/8/8/8/3RK3 w - - 0 1");
        let mut nodes = 0;
        let score = quiescence(&pos, -100_000, 100_000, 0, 0, &[], &mut nodes);
        assert!(score > 500);
    }

    #[test]
    fn depth_cap_is_enforced() {
        let pos = Chess::default();
        let mut nodes = 0;
        // with a cap of 6, the search must terminate quickly even when
        // starting already at the boundary.
        let score = quiescence(&pos, -100_000, 100_000, 6, 0, &[], &mut nodes);
        assert_eq!(score, evaluate(&pos, 0, &[]));
    }
}
