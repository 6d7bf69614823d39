//! Legacy string-seeded random generator.

use super::RandomSource;

const LCG_MULTIPLIER: i64 = 9301;
const LCG_INCREMENT: i64 = 49297;
const LCG_MODULUS: i64 = 233_280;

/// Deterministic pseudo-random source keyed by a string seed.
///
/// The seed is folded into a 32-bit signed integer with the rolling
/// `h = (h << 5) - h + c` hash over UTF-16 code units, and the absolute
/// value becomes the initial state. Each draw applies
/// `state = (state * 9301 + 49297) % 233280`.
///
/// This is not a statistically strong generator. It exists so that seeds
/// already handed out (shared links, stored assignments) keep reproducing
/// the same exercises bit for bit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRandom {
    state: i64,
}

impl SeededRandom {
    /// Creates a generator from a string seed. Any string is accepted.
    pub fn new(seed: &str) -> Self {
        Self {
            state: i64::from(hash_seed(seed)).abs(),
        }
    }

    /// Returns the current internal state.
    pub fn state(&self) -> i64 {
        self.state
    }
}

impl RandomSource for SeededRandom {
    fn next_double(&mut self) -> f64 {
        self.state = (self.state * LCG_MULTIPLIER + LCG_INCREMENT) % LCG_MODULUS;
        self.state as f64 / LCG_MODULUS as f64
    }

    fn is_deterministic(&self) -> bool {
        true
    }
}

/// 32-bit rolling string hash with signed wrap-around.
fn hash_seed(seed: &str) -> i32 {
    seed.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    })
}
