// ABOUTME: Monte Carlo simulation for dice and roll methods.
// ABOUTME: Runs many trials to compute probability distributions and statistics.

use crate::die::Die;
use crate::error::{Error, Result};
use crate::method::RollMethod;
use crate::parser;
use crate::roller::Rng;
use std::collections::HashMap;
use tracing::debug;

/// Result of a Monte Carlo simulation.
#[derive(Debug, Clone)]
pub struct SimResult {
    /// Distribution of outcomes: value -> count.
    pub distribution: HashMap<i64, usize>,
    /// Minimum value observed.
    pub min: i64,
    /// Maximum value observed.
    pub max: i64,
    /// Mean (average) value.
    pub mean: f64,
    /// Standard deviation.
    pub std_dev: f64,
    /// Number of trials run.
    pub n: usize,
}

impl SimResult {
    /// Returns outcomes sorted by value for iteration.
    pub fn sorted_outcomes(&self) -> Vec<(i64, usize)> {
        let mut outcomes: Vec<_> = self.distribution.iter().map(|(&k, &v)| (k, v)).collect();
        outcomes.sort_by_key(|(k, _)| *k);
        outcomes
    }

    /// Returns the probability of each outcome.
    pub fn probabilities(&self) -> HashMap<i64, f64> {
        self.distribution
            .iter()
            .map(|(&k, &v)| (k, v as f64 / self.n as f64))
            .collect()
    }

    /// Returns the mode (most common outcome), preferring the lowest on ties.
    pub fn mode(&self) -> Option<i64> {
        self.sorted_outcomes()
            .into_iter()
            .rev()
            .max_by_key(|&(_, count)| count)
            .map(|(value, _)| value)
    }

    /// Returns the median value.
    pub fn median(&self) -> f64 {
        let outcomes = self.sorted_outcomes();
        let at = |rank: usize| -> i64 {
            let mut seen = 0;
            for &(value, count) in &outcomes {
                seen += count;
                if rank < seen {
                    return value;
                }
            }
            0
        };

        if self.n == 0 {
            return 0.0;
        }

        let mid = self.n / 2;
        if self.n % 2 == 0 {
            (at(mid - 1) + at(mid)) as f64 / 2.0
        } else {
            at(mid) as f64
        }
    }
}

/// Run a Monte Carlo simulation of `method` on a die in delimited form.
///
/// # Arguments
/// * `die` - The die to simulate (e.g., "1,2,3,4,5,6" or "1,2,3:1,1,2")
/// * `method` - How each trial is rolled
/// * `n` - Number of trials to run
pub fn simulate(die: &str, method: RollMethod, n: usize) -> Result<SimResult> {
    simulate_die(&mut parser::parse(die)?, method, n)
}

/// Run a simulation with a seeded RNG for reproducibility.
pub fn simulate_seeded(die: &str, method: RollMethod, n: usize, seed: u64) -> Result<SimResult> {
    simulate_die(&mut parser::parse_seeded(die, seed)?, method, n)
}

/// Run a simulation on an existing die, advancing its RNG.
pub fn simulate_die<R: Rng>(die: &mut Die<i64, R>, method: RollMethod, n: usize) -> Result<SimResult> {
    if n == 0 {
        return Err(Error::ZeroCount);
    }

    let mut distribution: HashMap<i64, usize> = HashMap::new();
    // Welford running mean and squared deviations, kept in f64.
    let mut mean = 0.0;
    let mut m2 = 0.0;
    let mut min = i64::MAX;
    let mut max = i64::MIN;

    for trial in 1..=n {
        let total = die.roll_with(method)?;

        *distribution.entry(total).or_insert(0) += 1;
        let delta = total as f64 - mean;
        mean += delta / trial as f64;
        m2 += delta * (total as f64 - mean);
        min = min.min(total);
        max = max.max(total);
    }

    let std_dev = (m2 / n as f64).max(0.0).sqrt();

    debug!(%method, n, mean, std_dev, "simulated");
    Ok(SimResult {
        distribution,
        min,
        max,
        mean,
        std_dev,
        n,
    })
}
