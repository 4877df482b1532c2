//! Passed-pawn evaluation (§4.3.1), including the square rule for
//! unstoppable pawns. This is the term most sensitive to getting the
//! reference's exact bonus ordering right.

use shakmaty::{Bitboard, Chess, Color, Position, Role, Square};

use crate::types::Score;

const BASE_BONUS: Score = 50;
const ADVANCEMENT_WEIGHT: Score = 5;
const UNSTOPPABLE_BONUS: Score = 400;
const KING_SUPPORT_BONUS: Score = 50;

fn pawns_of(pos: &Chess, color: Color) -> Bitboard {
    pos.board().by_role(Role::Pawn) & pos.board().by_color(color)
}

fn square_at(file: i32, rank: i32) -> Square {
    Square::new((rank * 8 + file) as u32)
}

fn is_passed(pos: &Chess, square: Square, color: Color) -> bool {
    let enemy_pawns = pawns_of(pos, color.other());
    let file = square.file() as i32;
    let rank = square.rank() as i32;

    let ahead: Vec<i32> = match color {
        Color::White => (rank + 1..=7).collect(),
        Color::Black => (0..=rank - 1).collect(),
    };

    for df in -1..=1 {
        let f = file + df;
        if !(0..=7).contains(&f) {
            continue;
        }
        for &r in &ahead {
            if enemy_pawns.contains(square_at(f, r)) {
                return false;
            }
        }
    }
    true
}

/// Promotion distance in pawn moves, accounting for the two-square first move.
fn promotion_distance(square: Square, color: Color) -> i32 {
    let rank = square.rank() as i32;
    let starting_rank = match color {
        Color::White => 1,
        Color::Black => 6,
    };
    let distance = match color {
        Color::White => 7 - rank,
        Color::Black => rank,
    };
    if rank == starting_rank {
        distance - 1
    } else {
        distance
    }
}

fn is_unstoppable(pos: &Chess, square: Square, color: Color) -> bool {
    let Some(enemy_king) = pos.board().king_of(color.other()) else {
        return false;
    };
    let promotion_rank = match color {
        Color::White => 7,
        Color::Black => 0,
    };
    let promotion_square = square_at(square.file() as i32, promotion_rank);
    let k = enemy_king.distance(promotion_square) as i32;
    let d = promotion_distance(square, color);

    if pos.turn() == color {
        k > d
    } else {
        k > d + 1
    }
}

fn has_king_support(pos: &Chess, square: Square, color: Color) -> bool {
    match pos.board().king_of(color) {
        Some(king) => king.distance(square) <= 2,
        None => false,
    }
}

fn blocked(pos: &Chess, square: Square, color: Color) -> bool {
    let file = square.file() as i32;
    let rank = square.rank() as i32;
    let in_front_rank = match color {
        Color::White => rank + 1,
        Color::Black => rank - 1,
    };
    if !(0..=7).contains(&in_front_rank) {
        return false;
    }
    pos.board().occupied().contains(square_at(file, in_front_rank))
}

fn bonus_for(pos: &Chess, square: Square, color: Color) -> Score {
    let rank = square.rank() as i32;
    let a = match color {
        Color::White => rank,
        Color::Black => 7 - rank,
    };

    let mut bonus = BASE_BONUS + ADVANCEMENT_WEIGHT * a * a;

    if is_unstoppable(pos, square, color) {
        bonus += UNSTOPPABLE_BONUS;
    } else if has_king_support(pos, square, color) {
        bonus += KING_SUPPORT_BONUS;
    }

    if blocked(pos, square, color) {
        bonus /= 2;
    }

    bonus
}

/// White-centric passed-pawn score.
pub fn passed_pawns(pos: &Chess) -> Score {
    let mut score = 0;
    for &color in &[Color::White, Color::Black] {
        for square in pawns_of(pos, color) {
            if is_passed(pos, square, color) {
                let bonus = bonus_for(pos, square, color);
                score += if color == Color::White { bonus } else { -bonus };
            }
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::CastlingMode;

    fn pos_from_fen(fen: &str) -> Chess {
        let fen: shakmaty::fen::Fen = fen.parse().unwrap();
        fen.into_position(CastlingMode::Standard).unwrap()
    }

    #[test]
    fn startpos_has_no_passed_pawns() {
        assert_eq!(passed_pawns(&Chess::default()), 0);
    }

    #[test]
    fn unstoppable_a_pawn_scores_over_400() {
        // white pawn on a6, white king on a1, black king far away on h8: the
        // scenario from the concrete end-to-end cases.
        let pos = pos_from_fen("7k/8/P7/8/8/8/8/K7 w - - 0 1");
        assert!(passed_pawns(&pos) > 400);
    }

    #[test]
    fn blocked_passed_pawn_bonus_is_halved() {
        let unblocked = pos_from_fen("4k3/8/8/4P3/8/8/8/4K3 w - - 0 1");
        let blocked_pos = pos_from_fen("4k3/4n3/8/4P3/8/8/8/4K3 w - - 0 1");
        assert_eq!(passed_pawns(&blocked_pos), passed_pawns(&unblocked) / 2);
    }

    #[test]
    fn king_support_bonus_applies_without_square_rule() {
        // pawn on e5 is not unstoppable (the enemy king is close enough to
        // catch it), but white's own king can still support it closely.
        let supported = pos_from_fen("3k4/8/8/4P3/3K4/8/8/8 w - - 0 1");
        let unsupported = pos_from_fen("3k4/8/8/4P3/8/8/8/K7 w - - 0 1");
        assert!(passed_pawns(&supported) > passed_pawns(&unsupported));
    }
}
