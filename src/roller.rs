//! Random sources for the dice operator.
//!
//! The evaluator never touches a global generator: every evaluation gets
//! a `Roller` handed in. Production code uses `RngRoller`, tests can use
//! a seeded `RngRoller` or a scripted implementation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of single die rolls.
pub trait Roller {
    /// Roll one die, returning a value in `[1, faces]`.
    ///
    /// Callers guarantee `faces >= 1`.
    fn roll(&mut self, faces: i64) -> i64;
}

impl<T: Roller + ?Sized> Roller for &mut T {
    fn roll(&mut self, faces: i64) -> i64 {
        (**self).roll(faces)
    }
}

/// A `Roller` backed by any `rand` generator.
///
/// # Examples
///
/// ```rust
/// use zzroll::roller::{Roller, RngRoller};
///
/// let mut roller = RngRoller::seeded(7);
/// let value = roller.roll(6);
/// assert!((1..=6).contains(&value));
/// ```
#[derive(Debug, Clone)]
pub struct RngRoller<R: Rng = StdRng> {
    rng: R,
}

impl<R: Rng> RngRoller<R> {
    /// Wrap an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngRoller<StdRng> {
    /// Generator seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Generator with a fixed seed, for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl Default for RngRoller<StdRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<R: Rng> Roller for RngRoller<R> {
    fn roll(&mut self, faces: i64) -> i64 {
        self.rng.gen_range(1..=faces)
    }
}
