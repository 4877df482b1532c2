//! Thin wrapper around `shakmaty::Chess` adding a null-move constructor and a
//! cached fingerprint, the only two operations the chess-rules collaborator
//! doesn't already provide.

use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, EnPassantMode, Position as ShakmatyPosition};

use crate::fingerprint::Fingerprint;

/// A position plus its fingerprint, computed once and carried alongside it.
#[derive(Clone, Debug)]
pub struct Position {
    chess: Chess,
    fingerprint: u64,
}

impl Position {
    pub fn new(chess: Chess) -> Self {
        let fingerprint = Fingerprint::of(&chess);
        Self { chess, fingerprint }
    }

    pub fn chess(&self) -> &Chess {
        &self.chess
    }

    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// Applies a move, returning the resulting position. The caller is
    /// responsible for legality; `shakmaty::Chess::play` enforces it.
    pub fn play(&self, mv: &shakmaty::Move) -> Result<Position, shakmaty::PlayError<Chess>> {
        let chess = self.chess.clone().play(mv)?;
        Ok(Position::new(chess))
    }

    /// A hypothetical "pass": side to move flips, no piece moves, the
    /// en-passant target is cleared. `None` if the side to move is in check
    /// (a null move is never legal there).
    ///
    /// `shakmaty` has no native concept of a null move since it can't occur
    /// in real chess; we build one by round-tripping through FEN the same
    /// way a tablebase probe bridges an internal board to `shakmaty::Chess`.
    pub fn null_move(&self) -> Option<Position> {
        if self.chess.is_check() {
            return None;
        }

        let fen = Fen::from_position(self.chess.clone(), EnPassantMode::Legal).to_string();
        let mut fields: Vec<&str> = fen.split(' ').collect();
        fields[1] = if fields[1] == "w" { "b" } else { "w" };
        fields[3] = "-";
        let flipped = fields.join(" ");

        let fen: Fen = flipped.parse().ok()?;
        let chess: Chess = fen.into_position(CastlingMode::Standard).ok()?;
        Some(Position::new(chess))
    }
}

impl From<Chess> for Position {
    fn from(chess: Chess) -> Self {
        Position::new(chess)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::fen::Fen;

    fn startpos() -> Position {
        Position::new(Chess::default())
    }

    #[test]
    fn null_move_flips_side_to_move() {
        let pos = startpos();
        let null = pos.null_move().expect("start position is not in check");
        assert_eq!(null.chess().turn(), shakmaty::Color::Black);
    }

    #[test]
    fn null_move_illegal_in_check() {
        let fen: Fen = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3"
            .parse()
            .unwrap();
        let chess: Chess = fen.into_position(CastlingMode::Standard).unwrap();
        let pos = Position::new(chess);
        assert!(pos.chess().is_check());
        assert!(pos.null_move().is_none());
    }

    #[test]
    fn fingerprint_changes_after_a_move() {
        let pos = startpos();
        let moves = pos.chess().legal_moves();
        let mv = &moves[0];
        let next = pos.play(mv).unwrap();
        assert_ne!(pos.fingerprint(), next.fingerprint());
    }
}
