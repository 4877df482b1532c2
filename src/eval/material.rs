//! Material + piece-square table term (§4.3 item 1).

use shakmaty::{Chess, Color, Position};

use crate::eval::pst::{piece_value, pst_value};
use crate::types::Score;

/// White-centric material + PST score: positive favors white.
pub fn material_and_pst(pos: &Chess) -> Score {
    let mut score = 0;
    for (square, piece) in pos.board().pieces() {
        let value = piece_value(piece.role) + pst_value(piece.role, piece.color, square);
        score += if piece.color == Color::White { value } else { -value };
    }
    score
}
