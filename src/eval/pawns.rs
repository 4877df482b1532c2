//! Pawn structure term (§4.3 item 4): doubled and isolated pawn penalties.

use shakmaty::{Bitboard, Chess, Color, Position, Role};

use crate::types::Score;

const DOUBLED_PER_EXTRA_PAWN: Score = 20;
const ISOLATED_PENALTY: Score = 15;

fn pawns_of(pos: &Chess, color: Color) -> Bitboard {
    pos.board().by_role(Role::Pawn) & pos.board().by_color(color)
}

fn file_count(pawns: Bitboard) -> [u32; 8] {
    let mut counts = [0u32; 8];
    for square in pawns {
        counts[square.file() as usize] += 1;
    }
    counts
}

fn doubled_penalty(pawns: Bitboard) -> Score {
    file_count(pawns)
        .iter()
        .filter(|&&k| k >= 2)
        .map(|&k| DOUBLED_PER_EXTRA_PAWN * (k as Score - 1))
        .sum()
}

fn isolated_penalty(pawns: Bitboard) -> Score {
    let counts = file_count(pawns);
    let mut penalty = 0;
    for square in pawns {
        let file = square.file() as usize;
        let left = file.checked_sub(1).map(|f| counts[f]).unwrap_or(0);
        let right = counts.get(file + 1).copied().unwrap_or(0);
        if left == 0 && right == 0 {
            penalty += ISOLATED_PENALTY;
        }
    }
    penalty
}

/// White-centric pawn structure score (penalties are against the owning color).
pub fn pawn_structure(pos: &Chess) -> Score {
    let white_pawns = pawns_of(pos, Color::White);
    let black_pawns = pawns_of(pos, Color::Black);

    let white_penalty = doubled_penalty(white_pawns) + isolated_penalty(white_pawns);
    let black_penalty = doubled_penalty(black_pawns) + isolated_penalty(black_pawns);

    black_penalty - white_penalty
}
