use std::sync::Mutex;

use rand::{rngs::OsRng, Rng, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

/// A fuzzer for generating random test data.
///
/// Uses the xoshiro256** PRNG so a failing run can be replayed from its
/// `seed`.
///
/// # Examples
///
/// ```
/// use avl_forest_util::Fuzzer;
///
/// let fuzzer = Fuzzer::new(Some(42));
/// let n = fuzzer.random_int(1, 10);
/// assert!((1..=10).contains(&n));
///
/// let choices = ["insert", "remove"];
/// assert!(choices.contains(fuzzer.pick(&choices)));
/// ```
pub struct Fuzzer {
    /// The seed this run was initialized with; print it on failure.
    pub seed: u64,
    rng: Mutex<Xoshiro256StarStar>,
}

impl Fuzzer {
    /// Creates a fuzzer from an explicit seed, or from `OsRng` when none
    /// is given.
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| OsRng.next_u64());
        Self {
            seed,
            rng: Mutex::new(Xoshiro256StarStar::seed_from_u64(seed)),
        }
    }

    /// Random integer in `[min, max]`, inclusive on both ends.
    pub fn random_int(&self, min: i64, max: i64) -> i64 {
        let mut rng = self.rng.lock().unwrap();
        rng.gen_range(min..=max)
    }

    /// `true` with probability `p`.
    pub fn chance(&self, p: f64) -> bool {
        let mut rng = self.rng.lock().unwrap();
        rng.gen_bool(p)
    }

    /// Random element of a non-empty slice.
    pub fn pick<'a, T>(&self, items: &'a [T]) -> &'a T {
        assert!(!items.is_empty(), "pick from an empty slice");
        let i = self.random_int(0, items.len() as i64 - 1) as usize;
        &items[i]
    }
}
