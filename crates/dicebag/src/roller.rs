// ABOUTME: Random number sources and face selection.
// ABOUTME: Uniform index draws and the cumulative-weight search used by weighted dice.

/// Trait for random number generation, allowing for testing with fixed values.
pub trait Rng {
    /// Generate a random number in the range [0, bound).
    ///
    /// Callers never pass a zero bound.
    fn next_in_range(&mut self, bound: u64) -> u64;
}

impl<R: Rng + ?Sized> Rng for &mut R {
    fn next_in_range(&mut self, bound: u64) -> u64 {
        (**self).next_in_range(bound)
    }
}

/// Default RNG using fastrand.
#[derive(Debug, Clone)]
pub struct FastRng(fastrand::Rng);

impl FastRng {
    pub fn new() -> Self {
        Self(fastrand::Rng::new())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self(fastrand::Rng::with_seed(seed))
    }
}

impl Default for FastRng {
    fn default() -> Self {
        Self::new()
    }
}

impl Rng for FastRng {
    fn next_in_range(&mut self, bound: u64) -> u64 {
        self.0.u64(0..bound)
    }
}

/// Pick an index in `[0, len)` with equal probability.
pub(crate) fn pick_uniform(len: usize, rng: &mut impl Rng) -> usize {
    rng.next_in_range(len as u64) as usize
}

/// Pick an index with probability proportional to its weight.
///
/// Draws once in `[0, total)` and walks the weights in order, subtracting
/// each one until the draw falls inside a bucket. Zero weights are never
/// selected. `weights` must have a positive sum.
pub(crate) fn pick_weighted(weights: &[u32], rng: &mut impl Rng) -> usize {
    let total: u64 = weights.iter().map(|&w| u64::from(w)).sum();
    let mut rolled = rng.next_in_range(total);

    for (i, &weight) in weights.iter().enumerate() {
        let weight = u64::from(weight);
        if rolled < weight {
            return i;
        }
        rolled -= weight;
    }

    // Only reachable if the RNG returns a value outside [0, total).
    weights.iter().rposition(|&w| w > 0).unwrap_or(0)
}

/// A deterministic RNG for testing: replays a script of draws, wrapping
/// each one into the requested bound.
#[cfg(test)]
pub(crate) struct ScriptedRng {
    values: Vec<u64>,
    index: usize,
}

#[cfg(test)]
impl ScriptedRng {
    pub(crate) fn new(values: Vec<u64>) -> Self {
        Self { values, index: 0 }
    }
}

#[cfg(test)]
impl Rng for ScriptedRng {
    fn next_in_range(&mut self, bound: u64) -> u64 {
        let value = self.values[self.index % self.values.len()];
        self.index += 1;
        value % bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fast_rng_in_range() {
        let mut rng = FastRng::with_seed(7);
        for _ in 0..1000 {
            assert!(rng.next_in_range(6) < 6);
        }
    }

    #[test]
    fn test_fast_rng_seeded_reproducible() {
        let mut a = FastRng::with_seed(42);
        let mut b = FastRng::with_seed(42);
        let left: Vec<u64> = (0..20).map(|_| a.next_in_range(100)).collect();
        let right: Vec<u64> = (0..20).map(|_| b.next_in_range(100)).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn test_pick_uniform() {
        let mut rng = ScriptedRng::new(vec![0, 3, 5]);
        assert_eq!(pick_uniform(6, &mut rng), 0);
        assert_eq!(pick_uniform(6, &mut rng), 3);
        assert_eq!(pick_uniform(6, &mut rng), 5);
    }

    #[test]
    fn test_pick_weighted_buckets() {
        // Buckets: [0] -> 0, [1] -> 1, [2, 3] -> 2
        let weights = [1, 1, 2];
        let mut rng = ScriptedRng::new(vec![0, 1, 2, 3]);
        assert_eq!(pick_weighted(&weights, &mut rng), 0);
        assert_eq!(pick_weighted(&weights, &mut rng), 1);
        assert_eq!(pick_weighted(&weights, &mut rng), 2);
        assert_eq!(pick_weighted(&weights, &mut rng), 2);
    }

    #[test]
    fn test_pick_weighted_skips_zero_weights() {
        let weights = [0, 3, 0, 1];
        let mut rng = ScriptedRng::new(vec![0, 1, 2, 3]);
        let picks: Vec<usize> = (0..4).map(|_| pick_weighted(&weights, &mut rng)).collect();
        assert_eq!(picks, vec![1, 1, 1, 3]);
    }

    #[test]
    fn test_pick_weighted_out_of_range_rng() {
        struct Overshoot;
        impl Rng for Overshoot {
            fn next_in_range(&mut self, bound: u64) -> u64 {
                bound
            }
        }
        assert_eq!(pick_weighted(&[2, 5, 0], &mut Overshoot), 1);
    }
}
