//! Mobility term (§4.3 item 2): reward having more legal replies than the
//! opponent would after a null move.

use shakmaty::{Chess, Color, Position};

use crate::position::Position as GambitPosition;
use crate::types::Score;

const MOBILITY_WEIGHT: Score = 5;

/// Signed for white: positive means white has more available moves.
pub fn mobility(pos: &Chess) -> Score {
    let own = pos.legal_moves().len() as Score;
    let opp = GambitPosition::new(pos.clone())
        .null_move()
        .map(|p| p.chess().legal_moves().len() as Score)
        .unwrap_or(own);

    let diff = MOBILITY_WEIGHT * (own - opp);
    if pos.turn() == Color::White {
        diff
    } else {
        -diff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_mobility_is_zero() {
        // both sides have the same number of legal first moves, and the
        // null-move reply count mirrors it, so the term cancels out.
        assert_eq!(mobility(&Chess::default()), 0);
    }

    #[test]
    fn in_check_falls_back_to_equal_opp_count() {
        let fen: shakmaty::fen::Fen =
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3"
                .parse()
                .unwrap();
        let pos: Chess = fen.into_position(shakmaty::CastlingMode::Standard).unwrap();
        assert!(pos.is_check());
        // own == opp by construction when null move is illegal, so the term is 0.
        assert_eq!(mobility(&pos), 0);
    }
}
