//! RNG module - seeded linear congruential piece generator
//!
//! Each draw advances a 32-bit LCG and maps the new state to a piece kind:
//!
//! ```text
//! next = (0x41C64E6D * current + 0x3039) mod 2^32
//! kind = ((next >> 10) & 0x7FFFFFFF) mod 7 + 1
//! ```
//!
//! There is no bag and no repeat protection, so the same kind may come up
//! several times in a row. The generator is a plain `Copy` value: drawing
//! returns the new state rather than mutating, which makes any draw exactly
//! repeatable from a stored state.

use crate::types::PieceKind;

/// LCG multiplier
pub const MULTIPLIER: u32 = 0x41C6_4E6D;

/// LCG increment
pub const INCREMENT: u32 = 0x3039;

/// Seeded piece randomizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Randomizer {
    seed: u32,
    current: u32,
}

impl Randomizer {
    /// Create a randomizer whose state starts at `seed`
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            current: seed,
        }
    }

    /// Create a randomizer with a random seed
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this randomizer was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// The current LCG state
    pub fn current(&self) -> u32 {
        self.current
    }

    /// Draw one piece; pure function of the current state
    pub fn next_piece(&self) -> (PieceKind, Self) {
        let next = MULTIPLIER
            .wrapping_mul(self.current)
            .wrapping_add(INCREMENT);
        (
            kind_for_state(next),
            Self {
                seed: self.seed,
                current: next,
            },
        )
    }

    /// Draw `n` pieces in order
    pub fn next_pieces(&self, n: usize) -> (Vec<PieceKind>, Self) {
        let mut state = *self;
        let mut out = Vec::with_capacity(n);
        for _ in 0..n {
            let (kind, next) = state.next_piece();
            out.push(kind);
            state = next;
        }
        (out, state)
    }

    /// Same randomizer rewound to its original seed
    pub fn reset(&self) -> Self {
        Self::new(self.seed)
    }
}

fn kind_for_state(state: u32) -> PieceKind {
    let index = ((state >> 10) & 0x7FFF_FFFF) % 7;
    match index {
        0 => PieceKind::I,
        1 => PieceKind::O,
        2 => PieceKind::T,
        3 => PieceKind::S,
        4 => PieceKind::Z,
        5 => PieceKind::J,
        _ => PieceKind::L,
    }
}
