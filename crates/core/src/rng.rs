//! RNG module - random sources and the piece factory
//!
//! Pieces are drawn uniformly at random from the catalog on every spawn; there is no
//! "7-bag" shuffling, so the same kind can repeat any number of times in a row.
//!
//! The random source is a trait so games can be replayed exactly:
//! - [`SimpleRng`]: seeded LCG, deterministic across platforms
//! - [`ScriptedRng`]: replays a fixed list of values, for tests
//! - `fastrand::Rng`: entropy-seeded, for hosts that do not care about replays

use crate::error::ConfigError;
use crate::pieces::Tetromino;
use crate::types::PieceKind;

/// Source of random numbers for the piece factory
pub trait RandomSource {
    /// Generate next random u32
    fn next_u32(&mut self) -> u32;

    /// Generate random value in range [0, bound). `bound` must be positive.
    fn next_below(&mut self, bound: u32) -> u32 {
        self.next_u32() % bound
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Current internal state; feeding it to `new` resumes the same sequence.
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    fn next_below(&mut self, bound: u32) -> u32 {
        // The low bits of an LCG are weak; use the high half.
        (((self.next_u32() >> 16) as u64 * bound as u64) >> 16) as u32
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl RandomSource for fastrand::Rng {
    fn next_u32(&mut self) -> u32 {
        self.u32(..)
    }

    fn next_below(&mut self, bound: u32) -> u32 {
        self.u32(..bound)
    }
}

/// Replays a fixed list of values, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    values: Vec<u32>,
    index: usize,
}

impl ScriptedRng {
    /// An empty script behaves as a stream of zeros.
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, index: 0 }
    }

    /// Script that makes a factory over `catalog` yield `kinds` in order.
    ///
    /// Kinds missing from the catalog map to its first entry.
    pub fn for_kinds(catalog: &[PieceKind], kinds: &[PieceKind]) -> Self {
        let values = kinds
            .iter()
            .map(|kind| catalog.iter().position(|k| k == kind).unwrap_or(0) as u32)
            .collect();
        Self::new(values)
    }
}

impl RandomSource for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.index];
        self.index = (self.index + 1) % self.values.len();
        value
    }
}

/// Produces new pieces drawn uniformly from a fixed catalog
#[derive(Debug, Clone)]
pub struct PieceFactory<R = SimpleRng> {
    catalog: Vec<PieceKind>,
    rng: R,
}

impl<R: RandomSource> PieceFactory<R> {
    /// Create a factory; an empty catalog is a configuration error.
    pub fn new(catalog: Vec<PieceKind>, rng: R) -> Result<Self, ConfigError> {
        if catalog.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        Ok(Self { catalog, rng })
    }

    /// Factory over all seven kinds
    pub fn standard(rng: R) -> Self {
        Self {
            catalog: PieceKind::ALL.to_vec(),
            rng,
        }
    }

    /// Draw the next piece kind
    pub fn next_kind(&mut self) -> PieceKind {
        let index = self.rng.next_below(self.catalog.len() as u32) as usize;
        self.catalog[index]
    }

    /// Draw a new piece in canonical orientation, anchored at (0, 0)
    pub fn next_piece(&mut self) -> Tetromino {
        Tetromino::new(self.next_kind())
    }
}
