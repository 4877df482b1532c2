//! Static evaluator (§4.3): material + PST, mobility, passed pawns, pawn
//! structure, and king safety, composed into a single side-to-move-relative
//! score.

pub mod king_safety;
pub mod material;
pub mod mobility;
pub mod passed_pawns;
pub mod pawns;
pub mod pst;

use shakmaty::{Chess, Color, Position};

use crate::fingerprint::Fingerprint;
use crate::types::{Score, MATE_SCORE};

/// Returns `true` iff `fingerprint` already occurs at least `n` times in
/// `history` (the ancestor positions of the current search line) — i.e. the
/// current position would be at least its `(n + 1)`th occurrence.
fn is_repetition(history: &[u64], fingerprint: u64, n: usize) -> bool {
    history.iter().filter(|&&h| h == fingerprint).count() >= n
}

/// Terminal short-circuits shared by the evaluator and negamax's own
/// terminal-rule check (§4.3, §4.6 step 3): `Some(score)` if `pos` is a
/// checkmate, stalemate, insufficient-material, fifty-move-claimable, or
/// repeated (n>=2) position; `None` otherwise.
pub fn terminal_score(pos: &Chess, ply: u32, history: &[u64]) -> Option<Score> {
    if pos.is_checkmate() {
        return Some(-MATE_SCORE + ply as Score);
    }

    let fingerprint = Fingerprint::of(pos);
    if pos.is_stalemate()
        || pos.is_insufficient_material()
        || pos.halfmoves() >= 100
        || is_repetition(history, fingerprint, 2)
    {
        return Some(0);
    }

    None
}

/// Evaluates `pos` from the side-to-move viewpoint. `ply` is the distance
/// from the search root, used to encode mate scores. `history` holds the
/// fingerprints of every ancestor position in the current search line (for
/// repetition detection, which is not part of a bare position).
pub fn evaluate(pos: &Chess, ply: u32, history: &[u64]) -> Score {
    if let Some(score) = terminal_score(pos, ply, history) {
        return score;
    }

    let white_centric = material::material_and_pst(pos)
        + mobility::mobility(pos)
        + passed_pawns::passed_pawns(pos)
        + pawns::pawn_structure(pos)
        + king_safety::king_safety(pos);

    if pos.turn() == Color::White {
        white_centric
    } else {
        -white_centric
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_is_near_zero() {
        let score = evaluate(&Chess::default(), 0, &[]);
        assert!(score.abs() < 50, "expected a near-balanced score, got {score}");
    }

    #[test]
    fn checkmate_returns_mate_score_adjusted_by_ply() {
        let fen: shakmaty::fen::Fen = "6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1".parse().unwrap();
        let pos: shakmaty::Chess = fen.into_position(shakmaty::CastlingMode::Standard).unwrap();
        let moves = pos.legal_moves();
        let mate_move = moves
            .iter()
            .find(|mv| mv.from() == Some(shakmaty::Square::A1) && mv.to() == shakmaty::Square::A8)
            .expect("Ra8 should be legal");
        let after = pos.clone().play(mate_move).unwrap();
        assert!(after.is_checkmate());
        assert_eq!(evaluate(&after, 1, &[]), -MATE_SCORE + 1);
    }

    #[test]
    fn stalemate_is_zero() {
        let fen: shakmaty::fen::Fen = "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1".parse().unwrap();
        let pos: shakmaty::Chess = fen.into_position(shakmaty::CastlingMode::Standard).unwrap();
        assert!(pos.is_stalemate());
        assert_eq!(evaluate(&pos, 0, &[]), 0);
    }

    #[test]
    fn repetition_of_two_prior_occurrences_is_a_draw() {
        let pos = Chess::default();
        let fp = Fingerprint::of(&pos);
        assert_eq!(evaluate(&pos, 0, &[fp, fp]), 0);
    }
}
