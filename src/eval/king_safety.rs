//! King safety term (§4.3 item 5): a simple pawn-shield count.

use shakmaty::{Chess, Color, Position, Role, Square};

use crate::types::Score;

const SHIELD_PAWN_BONUS: Score = 15;

fn square_at(file: i32, rank: i32) -> Square {
    Square::new((rank * 8 + file) as u32)
}

fn shield_count(pos: &Chess, color: Color) -> Score {
    let Some(king) = pos.board().king_of(color) else {
        return 0;
    };
    let friendly_pawns = pos.board().by_role(Role::Pawn) & pos.board().by_color(color);

    let king_file = king.file() as i32;
    let king_rank = king.rank() as i32;
    let shield_ranks: [i32; 2] = match color {
        Color::White => [king_rank + 1, king_rank + 2],
        Color::Black => [king_rank - 1, king_rank - 2],
    };

    let mut count = 0;
    for file in (king_file - 1)..=(king_file + 1) {
        if !(0..=7).contains(&file) {
            continue;
        }
        for &rank in &shield_ranks {
            if !(0..=7).contains(&rank) {
                continue;
            }
            if friendly_pawns.contains(square_at(file, rank)) {
                count += SHIELD_PAWN_BONUS;
            }
        }
    }
    count
}

/// White-centric king safety score.
pub fn king_safety(pos: &Chess) -> Score {
    shield_count(pos, Color::White) - shield_count(pos, Color::Black)
}
