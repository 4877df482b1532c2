//! Command-line argument parsing for the `gambit` binary.

use clap::Parser;
use shakmaty::Color;

use crate::error::GambitError;

/// Analyze a chess position with alpha-beta search.
#[derive(Parser, Debug)]
#[command(name = "gambit", version, about)]
pub struct Cli {
    /// Position to analyze: a FEN string, a PGN move-text string, or "start".
    #[arg(long = "pos")]
    pub position: String,

    /// Which side the engine is analyzing for: "w"/"white" or "b"/"black".
    /// Defaults to the side to move in the loaded position.
    #[arg(long = "as")]
    pub engine_side: Option<String>,

    /// How to interpret `--pos`: "fen", "pgn", or "auto" (guess from content).
    #[arg(long, default_value = "auto")]
    pub format: String,

    /// Maximum search depth in plies.
    #[arg(long, default_value_t = crate::types::DEFAULT_DEPTH)]
    pub depth: u8,

    /// Search time budget in seconds.
    #[arg(long, default_value_t = crate::types::DEFAULT_TIME_SECS)]
    pub time: u64,

    /// A comma-separated SAN move sequence applied to the starting position
    /// before analysis continues, e.g. "e4,e5,Nf3,Nc6,Bb5".
    #[arg(long = "move")]
    pub move_sequence: Option<String>,

    /// Search the root moves across multiple threads instead of a single one.
    #[arg(long)]
    pub parallel: bool,

    /// Worker thread count for `--parallel`. Defaults to the available
    /// parallelism reported by the OS.
    #[arg(long)]
    pub workers: Option<usize>,

    /// Tracing log level: "error", "warn", "info", "debug", or "trace".
    #[arg(long = "log-level", default_value = "info")]
    pub log_level: String,

    /// Transposition table size, in megabytes.
    #[arg(long = "hash-mb", default_value_t = 64)]
    pub hash_mb: usize,

    /// Print tactical annotations (fork/pin/skewer/discovered attack/
    /// promotion threat) for the move the engine chooses. On by default;
    /// pass `--annotate=false` to suppress.
    #[arg(long, default_value_t = true)]
    pub annotate: bool,
}

impl Cli {
    pub fn workers_or_default(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get)
    }

    /// Converts `--hash-mb` into a TT entry budget. Each entry is a rough
    /// constant-factor estimate; exactness doesn't matter, only that the
    /// bound scales with the requested memory.
    pub fn max_tt_entries(&self) -> usize {
        const BYTES_PER_ENTRY: usize = 64;
        (self.hash_mb * 1024 * 1024 / BYTES_PER_ENTRY).max(1024)
    }

    /// Resolves `--as` against the position actually being analyzed,
    /// defaulting to the side to move when the flag is absent.
    pub fn engine_color(&self, side_to_move: Color) -> Result<Color, GambitError> {
        match self.engine_side.as_deref() {
            None => Ok(side_to_move),
            Some("w") | Some("white") => Ok(Color::White),
            Some("b") | Some("black") => Ok(Color::Black),
            Some(other) => Err(GambitError::ParsePosition(format!(
                "unknown --as value: {other} (expected w, white, b, or black)"
            ))),
        }
    }
}
