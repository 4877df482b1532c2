//! SAN move-sequence evaluation (§6 `--move "m1,m2,…"`): apply a
//! comma-separated sequence of SAN moves to the starting position, reporting
//! any tactics the annotator sees on each move, then hand back the resulting
//! position for ordinary analysis to continue from.

use shakmaty::san::San;
use shakmaty::{Chess, Position};

use crate::annotate::{annotate, Tactic};
use crate::error::GambitError;

pub struct SequenceStep {
    pub san: String,
    pub tactics: Vec<Tactic>,
}

pub struct SequenceResult {
    pub steps: Vec<SequenceStep>,
    pub position: Chess,
}

/// Applies `moves`, a comma-separated SAN sequence, to the standard starting
/// position. Fails on the first illegal or unparseable move.
pub fn evaluate_sequence(moves: &str) -> Result<SequenceResult, GambitError> {
    let mut pos = Chess::default();
    let mut steps = Vec::new();

    for san_text in moves.split(',') {
        let san_text = san_text.trim();
        if san_text.is_empty() {
            continue;
        }

        let san: San = san_text
            .parse()
            .map_err(|e| GambitError::ParseMoveSequence(format!("{san_text}: {e}")))?;
        let mv = san
            .to_move(&pos)
            .map_err(|_| GambitError::ParseMoveSequence(format!("illegal move: {san_text}")))?;

        let tactics = annotate(&pos, &mv);
        pos = pos
            .play(&mv)
            .map_err(|e| GambitError::ParseMoveSequence(format!("{san_text}: {e}")))?;

        steps.push(SequenceStep {
            san: san_text.to_string(),
            tactics,
        });
    }

    if steps.is_empty() {
        return Err(GambitError::ParseMoveSequence("no moves given".to_string()));
    }

    Ok(SequenceResult { steps, position: pos })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ruy_lopez_sequence_has_no_tactics_and_reaches_the_right_position() {
        let result = evaluate_sequence("e4,e5,Nf3,Nc6,Bb5").expect("mainline should apply");
        assert_eq!(result.steps.len(), 5);
        assert!(result.steps.iter().all(|step| step.tactics.is_empty()));

        let fen = shakmaty::fen::Fen::from_position(&result.position, shakmaty::EnPassantMode::Legal).to_string();
        assert_eq!(fen, "r1bqkbnr/pppp1ppp/2n5/1B2p3/4P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3");
    }

    #[test]
    fn illegal_move_in_sequence_is_rejected() {
        assert!(evaluate_sequence("e4,e5,Qh8").is_err());
    }

    #[test]
    fn empty_sequence_is_rejected() {
        assert!(evaluate_sequence("").is_err());
    }
}
