//! Tactical annotator (§1, non-core sibling): a pure function of a board and
//! a move that reports human-readable tactical commentary. It never
//! influences search or score.
//!
//! Grounded directly on `shakmaty`'s attack-bitboard queries
//! (`shakmaty::attacks::*`) rather than any teacher module, since the
//! teacher's own attack bitboards belong to the hand-rolled rules engine
//! this crate replaces.

use shakmaty::{attacks, Bitboard, Chess, Color, Move, Position, Role, Square};

use crate::eval::pst::piece_value;

const FORK_MIN_VALUE: i32 = 300;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tactic {
    Fork,
    Pin,
    Skewer,
    DiscoveredAttack,
    PromotionThreat,
}

impl std::fmt::Display for Tactic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Tactic::Fork => "Fork",
            Tactic::Pin => "Pin",
            Tactic::Skewer => "Skewer",
            Tactic::DiscoveredAttack => "Discovered attack",
            Tactic::PromotionThreat => "Promotion threat",
        };
        f.write_str(name)
    }
}

fn attacked_by(role: Role, color: Color, square: Square, occupied: Bitboard) -> Bitboard {
    match role {
        Role::Pawn => attacks::pawn_attacks(color, square),
        Role::Knight => attacks::knight_attacks(square),
        Role::Bishop => attacks::bishop_attacks(square, occupied),
        Role::Rook => attacks::rook_attacks(square, occupied),
        Role::Queen => attacks::queen_attacks(square, occupied),
        Role::King => attacks::king_attacks(square),
    }
}

/// Does the piece that just moved to `to` attack at least two enemy pieces
/// each worth at least `FORK_MIN_VALUE`?
fn detect_fork(after: &Chess, to: Square) -> bool {
    let Some(piece) = after.board().piece_at(to) else { return false };
    let occupied = after.board().occupied();
    let targets = attacked_by(piece.role, piece.color, to, occupied) & after.board().by_color(piece.color.other());

    targets
        .into_iter()
        .filter(|&sq| {
            after
                .board()
                .piece_at(sq)
                .is_some_and(|p| piece_value(p.role) >= FORK_MIN_VALUE)
        })
        .count()
        >= 2
}

/// A ray-walking scan from `attacker`'s square through the board in one of
/// the eight ray directions the attacker's role can move along. Returns the
/// first two occupied squares encountered, if any.
fn first_two_along_rays(pos: &Chess, attacker_sq: Square, attacker_role: Role) -> Vec<(Square, Square)> {
    let mut findings = Vec::new();
    if !matches!(attacker_role, Role::Bishop | Role::Rook | Role::Queen) {
        return findings;
    }

    let occupied = pos.board().occupied();
    let reachable = attacked_by(attacker_role, pos.turn(), attacker_sq, occupied) & occupied;

    for first in reachable {
        let ray = attacks::ray(attacker_sq, first);
        if ray.is_empty() {
            continue;
        }
        // every other occupied square on the same ray, further than `first`.
        let further: Vec<Square> = (ray & occupied)
            .into_iter()
            .filter(|&sq| sq != attacker_sq && sq != first && attacks::between(attacker_sq, sq).contains(first))
            .collect();
        if let Some(&second) = further.iter().min_by_key(|&&sq| attacker_sq.distance(sq)) {
            findings.push((first, second));
        }
    }
    findings
}

/// A pin: our sliding piece attacks an enemy piece, and directly behind it
/// (same ray) sits the enemy king.
fn detect_pin(after: &Chess, to: Square) -> bool {
    let Some(piece) = after.board().piece_at(to) else { return false };
    let Some(enemy_king) = after.board().king_of(piece.color.other()) else { return false };

    first_two_along_rays(after, to, piece.role)
        .into_iter()
        .any(|(first, second)| {
            after.board().piece_at(first).is_some_and(|p| p.color != piece.color) && second == enemy_king
        })
}

/// A skewer: like a pin, but the front piece is worth at least as much as
/// whatever sits behind it (so moving it exposes material, not the king).
fn detect_skewer(after: &Chess, to: Square) -> bool {
    let Some(piece) = after.board().piece_at(to) else { return false };

    first_two_along_rays(after, to, piece.role).into_iter().any(|(first, second)| {
        let Some(front) = after.board().piece_at(first) else { return false };
        let Some(back) = after.board().piece_at(second) else { return false };
        front.color != piece.color
            && back.color == front.color
            && back.role != Role::King
            && piece_value(front.role) >= piece_value(back.role)
    })
}

/// Did a piece other than the one that moved gain an attack on an enemy
/// piece it didn't have before?
fn detect_discovered_attack(before: &Chess, after: &Chess, mv: &Move) -> bool {
    let Some(from) = mv.from() else { return false };
    let mover_color = before.turn();
    let occupied_before = before.board().occupied();
    let occupied_after = after.board().occupied();

    for (square, piece) in before.board().pieces() {
        if piece.color != mover_color || square == from {
            continue;
        }
        let before_targets =
            attacked_by(piece.role, piece.color, square, occupied_before) & before.board().by_color(mover_color.other());
        let after_targets =
            attacked_by(piece.role, piece.color, square, occupied_after) & after.board().by_color(mover_color.other());
        if (after_targets & !before_targets).into_iter().next().is_some() {
            return true;
        }
    }
    false
}

fn detect_promotion_threat(mv: &Move, after: &Chess) -> bool {
    if mv.role() != Role::Pawn || mv.promotion().is_some() {
        return false;
    }
    let to = mv.to();
    let rank = to.rank() as i32;
    match after.turn() {
        // it's the other side to move in `after`, so the pawn belongs to
        // `after.turn().other()`.
        Color::Black => rank == 6,
        Color::White => rank == 1,
    }
}

/// Detects tactical motifs created by playing `mv` from `pos`. Pure; does
/// not affect search or evaluation.
pub fn annotate(pos: &Chess, mv: &Move) -> Vec<Tactic> {
    let Ok(after) = pos.clone().play(mv) else {
        return Vec::new();
    };

    let to = mv.to();
    let mut tactics = Vec::new();

    if detect_fork(&after, to) {
        tactics.push(Tactic::Fork);
    }
    if detect_pin(&after, to) {
        tactics.push(Tactic::Pin);
    }
    if detect_skewer(&after, to) {
        tactics.push(Tactic::Skewer);
    }
    if detect_discovered_attack(pos, &after, mv) {
        tactics.push(Tactic::DiscoveredAttack);
    }
    if detect_promotion_threat(mv, &after) {
        tactics.push(Tactic::PromotionThreat);
    }

    tactics
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
    fn knight_fork_on_c6_is_detected() {
        let pos = pos_from_fen("r3k2r/ppp2ppp/2n5/3q4/3N4/8/PPP2PPP/R2QK2R w KQkq - 0 1");
        let moves = pos.legal_moves();
        let nxc6 = moves
            .iter()
            .find(|mv| mv.from() == Some(Square::D4) && mv.to() == Square::C6)
            .expect("Nxc6 should be legal");

        let tactics = annotate(&pos, nxc6);
        assert!(tactics.contains(&Tactic::Fork));
    }

    #[test]
    fn quiet_opening_move_has_no_tactics() {
        let pos = Chess::default();
        let moves = pos.legal_moves();
        let e4 = moves
            .iter()
            .find(|mv| mv.to() == Square::E4)
            .expect("e4 should be legal");
        assert!(annotate(&pos, e4).is_empty());
    }
}
