//! Random sources for exercise generation.
//!
//! Every generator draws its parameters through the [`RandomSource`] trait.
//! Two implementations are provided:
//!
//! - [`SeededRandom`]: the legacy string-seeded generator. Its hash and
//!   linear-congruential step are fixed so that existing seeds keep
//!   producing the same exercises.
//! - [`ChaChaSource`]: a ChaCha8-backed source for callers that do not need
//!   seed compatibility, including the explicit non-deterministic mode.
//!
//! Generators never reach for ambient randomness on their own. A caller
//! that wants unreproducible exercises has to construct
//! [`ChaChaSource::non_deterministic`] and pass it in.

mod chacha;
mod seeded;

pub use chacha::ChaChaSource;
pub use seeded::SeededRandom;

/// A source of uniformly distributed values used by the task generators.
pub trait RandomSource {
    /// Returns the next value in `[0, 1)`.
    fn next_double(&mut self) -> f64;

    /// Returns true if two sources built from the same seed produce the
    /// same sequence.
    fn is_deterministic(&self) -> bool;

    /// Returns an integer in `[min, max]` inclusive.
    fn next_int(&mut self, min: i64, max: i64) -> i64 {
        (self.next_double() * (max - min + 1) as f64).floor() as i64 + min
    }

    /// Returns an index in `[0, len)`. `len` must be non-zero.
    fn next_index(&mut self, len: usize) -> usize {
        ((self.next_double() * len as f64).floor() as usize).min(len.saturating_sub(1))
    }
}

/// Picks one element of a non-empty slice uniformly.
pub fn pick<'a, T>(rng: &mut dyn RandomSource, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.next_index(items.len()))
}
