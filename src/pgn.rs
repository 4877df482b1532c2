//! Minimal PGN move-text loading: replays a game's mainline moves onto a
//! `shakmaty::Chess` position using `pgn-reader`'s visitor API.

use pgn_reader::{BufferedReader, SanPlus, Skip, Visitor};
use shakmaty::{Chess, Position};

use crate::error::GambitError;

struct ReplayVisitor {
    position: Chess,
    moves: Vec<SanPlus>,
    error: Option<String>,
}

impl ReplayVisitor {
    fn new() -> Self {
        Self {
            position: Chess::default(),
            moves: Vec::new(),
            error: None,
        }
    }
}

impl Visitor for ReplayVisitor {
    type Result = ();

    fn san(&mut self, san_plus: SanPlus) {
        if self.error.is_some() {
            return;
        }
        match san_plus.san.to_move(&self.position) {
            Ok(mv) => {
                self.position.play_unchecked(&mv);
                self.moves.push(san_plus);
            }
            Err(_) => self.error = Some(format!("illegal move in game text: {san_plus}")),
        }
    }

    fn begin_variation(&mut self) -> Skip {
        // mainline only; skip side variations entirely.
        Skip(true)
    }

    fn end_game(&mut self) -> Self::Result {}
}

/// Replays `pgn` move-text (a single game, mainline only) from the standard
/// starting position and returns the resulting position.
pub fn replay(pgn: &str) -> Result<Chess, GambitError> {
    let mut reader = BufferedReader::new_cursor(pgn);
    let mut visitor = ReplayVisitor::new();
    reader
        .read_game(&mut visitor)
        .map_err(|e| GambitError::ParsePgn(e.to_string()))?;

    if let Some(err) = visitor.error {
        return Err(GambitError::ParsePgn(err));
    }
    if visitor.moves.is_empty() {
        return Err(GambitError::ParsePgn("no moves found in game text".to_string()));
    }
    Ok(visitor.position)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_ruy_lopez_opening() {
        let pgn = "1. e4 e5 2. Nf3 Nc6 3. Bb5 *";
        let pos = replay(pgn).expect("ruy lopez mainline should replay");
        assert!(!pos.legal_moves().is_empty());
        assert!(!pos.is_check());
    }

    #[test]
    fn rejects_illegal_move_text() {
        // the black queen's diagonal to a5 is blocked by its own c7 pawn.
        let pgn = "1. e4 e5 2. Qh5 Qa5 *";
        assert!(replay(pgn).is_err());
    }

    #[test]
    fn rejects_empty_movetext() {
        assert!(replay("*").is_err());
    }
}
