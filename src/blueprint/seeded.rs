//! Seeded value source
//!
//! Linear congruential generator used by both blueprint generators. The
//! constants are part of the save format: changing them changes every level.

use serde::{Deserialize, Serialize};

const MULTIPLIER: u64 = 9301;
const INCREMENT: u64 = 49297;
const MODULUS: u64 = 233_280;

/// Deterministic source of `f32` draws in `[0, 1)`
///
/// Two sources built from the same seed yield identical sequences. Reseeding
/// means building a new source; there is no way to rewind an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeededSource {
    state: u64,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed % MODULUS,
        }
    }

    /// Advance the generator and return the next draw
    pub fn next(&mut self) -> f32 {
        self.state = (self.state * MULTIPLIER + INCREMENT) % MODULUS;
        self.state as f32 / MODULUS as f32
    }

    /// Uniform draw in `[min, max)`
    #[inline]
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next() * (max - min)
    }

    /// True with probability `p`
    #[inline]
    pub fn chance(&mut self, p: f32) -> bool {
        self.next() < p
    }

    /// Uniform index into a collection of `len` items (`len` must be non-zero)
    #[inline]
    pub fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "index() requires a non-empty range");
        ((self.next() * len as f32) as usize).min(len.saturating_sub(1))
    }

    /// Current internal state (for debugging)
    pub fn state(&self) -> u64 {
        self.state
    }
}
