//! Position fingerprinting: a 64-bit hash used to key the transposition
//! table. Not required to be collision-free; callers tolerate rare
//! collisions (see `tt`).

use std::sync::LazyLock;

use shakmaty::{CastlingSide, Chess, Color, EnPassantMode, Position as ShakmatyPosition, Role};

struct ZobristKeys {
    /// [role][color][square]
    piece: [[[u64; 64]; 2]; 6],
    side: u64,
    /// one key per (color, castling side): white king-side, white queen-side,
    /// black king-side, black queen-side.
    castling: [u64; 4],
    ep: [u64; 8],
}

static KEYS: LazyLock<ZobristKeys> = LazyLock::new(|| {
    let mut rng = XorShift64(0x3243F6A8885A308D); // fixed seed, digits of pi

    let mut piece = [[[0u64; 64]; 2]; 6];
    for role_keys in &mut piece {
        for color_keys in role_keys {
            for key in color_keys {
                *key = rng.next();
            }
        }
    }

    let side = rng.next();

    let mut castling = [0u64; 4];
    for key in &mut castling {
        *key = rng.next();
    }

    let mut ep = [0u64; 8];
    for key in &mut ep {
        *key = rng.next();
    }

    ZobristKeys { piece, side, castling, ep }
});

fn role_index(role: Role) -> usize {
    match role {
        Role::Pawn => 0,
        Role::Knight => 1,
        Role::Bishop => 2,
        Role::Rook => 3,
        Role::Queen => 4,
        Role::King => 5,
    }
}

fn color_index(color: Color) -> usize {
    match color {
        Color::White => 0,
        Color::Black => 1,
    }
}

fn castling_index(color: Color, side: CastlingSide) -> usize {
    match (color, side) {
        (Color::White, CastlingSide::KingSide) => 0,
        (Color::White, CastlingSide::QueenSide) => 1,
        (Color::Black, CastlingSide::KingSide) => 2,
        (Color::Black, CastlingSide::QueenSide) => 3,
    }
}

/// Computes position fingerprints. Stateless; exists only as a namespace for
/// `of`.
pub struct Fingerprint;

impl Fingerprint {
    /// Computes the fingerprint of `pos` from scratch.
    pub fn of(pos: &Chess) -> u64 {
        let keys = &*KEYS;
        let mut hash = 0u64;

        for (square, piece) in pos.board().pieces() {
            hash ^= keys.piece[role_index(piece.role)][color_index(piece.color)][square as usize];
        }

        if pos.turn() == Color::Black {
            hash ^= keys.side;
        }

        let castles = pos.castles();
        for &color in &[Color::White, Color::Black] {
            for &side in &[CastlingSide::KingSide, CastlingSide::QueenSide] {
                if castles.has(color, side) {
                    hash ^= keys.castling[castling_index(color, side)];
                }
            }
        }

        if let Some(ep) = pos.ep_square(EnPassantMode::Legal) {
            hash ^= keys.ep[ep.file() as usize];
        }

        hash
    }
}

/// xorshift64 PRNG, used only to seed the fixed Zobrist table once.
struct XorShift64(u64);

impl XorShift64 {
    fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }
}
