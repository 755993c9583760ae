//! Random number generation for the operator fallback.
//!
//! RULE: Nothing in the tracker calls a platform RNG directly.
//! The only randomness in a lookup is the weighted operator fallback, and
//! it flows through a `RandomSource` handed to the prefix table. Tests
//! inject fixed sources; the CLI uses a `TrackerRng` seeded either from
//! `--seed` or from OS entropy.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// Anything that can roll a float in [0.0, 1.0).
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

/// The production random source.
pub struct TrackerRng {
    inner: Pcg64Mcg,
}

impl TrackerRng {
    /// Reproducible stream for a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            inner: Pcg64Mcg::from_entropy(),
        }
    }

    /// Draw a raw u64 (full range).
    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }
}

impl RandomSource for TrackerRng {
    fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}

/// Categorical distribution over a fixed, ordered set of outcomes.
pub struct WeightedChoice<T: 'static> {
    entries: &'static [(T, f64)],
}

impl<T: Copy + 'static> WeightedChoice<T> {
    /// Entries must be non-empty with weights summing to 1.0.
    pub const fn new(entries: &'static [(T, f64)]) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &'static [(T, f64)] {
        self.entries
    }

    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }

    /// Walk cumulative weights until the roll falls inside one.
    /// Float rounding can leave a roll just above the final boundary;
    /// that lands on the last entry.
    pub fn sample(&self, rng: &mut dyn RandomSource) -> T {
        let roll = rng.next_f64();
        let mut cumulative = 0.0;
        for (outcome, weight) in self.entries {
            cumulative += weight;
            if roll < cumulative {
                return *outcome;
            }
        }
        self.entries[self.entries.len() - 1].0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedRoll(f64);

    impl RandomSource for FixedRoll {
        fn next_f64(&mut self) -> f64 {
            self.0
        }
    }

    const COLOURS: WeightedChoice<char> =
        WeightedChoice::new(&[('r', 0.5), ('g', 0.3), ('b', 0.2)]);

    #[test]
    fn sample_follows_cumulative_boundaries() {
        assert_eq!(COLOURS.sample(&mut FixedRoll(0.0)), 'r');
        assert_eq!(COLOURS.sample(&mut FixedRoll(0.49)), 'r');
        assert_eq!(COLOURS.sample(&mut FixedRoll(0.5)), 'g');
        assert_eq!(COLOURS.sample(&mut FixedRoll(0.79)), 'g');
        assert_eq!(COLOURS.sample(&mut FixedRoll(0.81)), 'b');
    }

    #[test]
    fn roll_past_total_lands_on_last_entry() {
        assert_eq!(COLOURS.sample(&mut FixedRoll(0.999_999_999)), 'b');
        assert_eq!(COLOURS.sample(&mut FixedRoll(1.5)), 'b');
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let mut a = TrackerRng::seeded(0xDEAD_BEEF);
        let mut b = TrackerRng::seeded(0xDEAD_BEEF);
        for _ in 0..32 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
        let roll = TrackerRng::seeded(7).next_f64();
        assert!((0.0..1.0).contains(&roll));
    }
}
