//! Error types surfaced at the edges of the engine (CLI input, PGN loading).
//!
//! Nothing inside the search itself returns an error: every failure mode
//! described in the design (time exhaustion, an illegal null move, a TT
//! collision) degrades gracefully to "return the current best" instead.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GambitError {
    #[error("could not parse position: {0}")]
    ParsePosition(String),

    #[error("could not load PGN: {0}")]
    ParsePgn(String),

    #[error("could not parse move sequence: {0}")]
    ParseMoveSequence(String),
}
