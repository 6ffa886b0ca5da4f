//! Environment abstraction for deterministic testing.
//!
//! The `Environment` trait decouples command logic from the source of
//! randomness. This enables:
//!
//! - Deterministic Simulation: the harness provides a seeded RNG, allowing
//!   exact reproduction of any roll sequence.
//!
//! - Production Runtime: the console host draws from OS entropy without any
//!   change to the processor.
//!
//! # Invariants
//!
//! - Determinism: Given the same seed, `random_bytes()` produces the same
//!   sequence
//! - Uniformity: `random_in_range()` never favours any value of the range
//! - Isolation: Implementations must not share global state

/// Abstract environment providing randomness.
///
/// # Safety
///
/// Implementations MUST guarantee:
///
/// 1. RNG quality: `random_bytes()` fills the whole buffer on every call
/// 2. Minimal panics: Methods are infallible except in exceptional
///    circumstances (e.g., OS entropy exhaustion, incorrect simulation setup)
pub trait Environment: Clone + Send + Sync + 'static {
    /// Fills the provided buffer with random bytes.
    ///
    /// # Invariants
    ///
    /// - Determinism during simulations: Given the same RNG seed, this produces
    ///   the same sequence of bytes
    /// - Unpredictability in production: backed by the OS entropy pool
    fn random_bytes(&self, buffer: &mut [u8]);

    /// Generates a random `u64`.
    fn random_u64(&self) -> u64 {
        let mut bytes = [0u8; 8];
        self.random_bytes(&mut bytes);
        u64::from_be_bytes(bytes)
    }

    /// Draws a uniformly distributed integer in `[min, max]`, both inclusive.
    ///
    /// Uses rejection sampling over `u64`, so every value in the span is
    /// equally likely even for the full `i32` range. Bounds given in the wrong
    /// order are swapped.
    fn random_in_range(&self, min: i32, max: i32) -> i32 {
        let (low, high) = if min <= max { (min, max) } else { (max, min) };

        // At most 2^32, never zero.
        let span = (i64::from(high) - i64::from(low) + 1).unsigned_abs();
        let limit = u64::MAX - u64::MAX % span;

        loop {
            let candidate = self.random_u64();
            if candidate < limit {
                let offset = i64::try_from(candidate % span).unwrap_or(0);
                return i32::try_from(i64::from(low) + offset).unwrap_or(low);
            }
        }
    }
}
