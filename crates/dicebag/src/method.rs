// ABOUTME: Roll methods (normal, advantage, disadvantage, exploding) and difficulty checks.
// ABOUTME: Layers composite strategies on top of Die::roll for integer-faced dice.

use crate::die::{count, Die};
use crate::error::{Error, Result};
use crate::roller::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// How a single result is produced from one or more rolls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RollMethod {
    /// Roll once.
    #[default]
    Normal,
    /// Roll twice, keep the higher result.
    Advantage,
    /// Roll twice, keep the lower result.
    Disadvantage,
    /// Roll again every time the highest face comes up, and add everything.
    Exploding,
}

impl RollMethod {
    pub const ALL: [RollMethod; 4] = [
        RollMethod::Normal,
        RollMethod::Advantage,
        RollMethod::Disadvantage,
        RollMethod::Exploding,
    ];
}

impl FromStr for RollMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(RollMethod::Normal),
            "advantage" | "adv" => Ok(RollMethod::Advantage),
            "disadvantage" | "dis" => Ok(RollMethod::Disadvantage),
            "exploding" | "explode" => Ok(RollMethod::Exploding),
            _ => Err(Error::UnrecognizedMethod(s.to_string())),
        }
    }
}

impl fmt::Display for RollMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RollMethod::Normal => write!(f, "normal"),
            RollMethod::Advantage => write!(f, "advantage"),
            RollMethod::Disadvantage => write!(f, "disadvantage"),
            RollMethod::Exploding => write!(f, "exploding"),
        }
    }
}

/// A difficulty check: roll with `method`, add `modifier`, compare against `dc`.
///
/// With `crits` enabled, rolling the die's highest face always succeeds and
/// rolling its lowest face always fails, whatever the modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Check {
    pub dc: i64,
    pub method: RollMethod,
    pub modifier: i64,
    pub crits: bool,
}

impl Check {
    pub fn new(dc: i64) -> Self {
        Self {
            dc,
            method: RollMethod::Normal,
            modifier: 0,
            crits: false,
        }
    }

    pub fn method(mut self, method: RollMethod) -> Self {
        self.method = method;
        self
    }

    pub fn modifier(mut self, modifier: i64) -> Self {
        self.modifier = modifier;
        self
    }

    pub fn crits(mut self, crits: bool) -> Self {
        self.crits = crits;
        self
    }
}

/// A natural maximum or minimum that decided a check on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Critical {
    Success,
    Failure,
}

/// Everything that went into a check's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    /// The result of the roll method, before the modifier.
    pub roll: i64,
    /// `roll + modifier`, saturating at the bounds of `i64`.
    pub total: i64,
    pub success: bool,
    pub critical: Option<Critical>,
}

impl<R: Rng> Die<i64, R> {
    /// Roll once using `method`.
    pub fn roll_with(&mut self, method: RollMethod) -> Result<i64> {
        let value = match method {
            RollMethod::Normal => self.roll(),
            RollMethod::Advantage => self.advantage(2)?,
            RollMethod::Disadvantage => self.disadvantage(2)?,
            RollMethod::Exploding => self
                .explode()?
                .into_iter()
                .try_fold(0i64, i64::checked_add)
                .ok_or(Error::Overflow)?,
        };
        trace!(%method, value, "rolled");
        Ok(value)
    }

    /// Apply `method` independently `n` times.
    pub fn roll_n_with(&mut self, n: i64, method: RollMethod) -> Result<Vec<i64>> {
        let n = count(n)?;
        self.validate_method(method)?;
        (0..n).map(|_| self.roll_with(method)).collect()
    }

    /// Fail now if `method` could never finish on this die.
    pub(crate) fn validate_method(&self, method: RollMethod) -> Result<()> {
        match method {
            RollMethod::Exploding => self.explode_guard(self.max()),
            _ => Ok(()),
        }
    }

    /// Roll `n` times and keep the highest.
    pub fn advantage(&mut self, n: i64) -> Result<i64> {
        self.roll_n(n)?.into_iter().max().ok_or(Error::ZeroCount)
    }

    /// Roll `n` times and keep the lowest.
    pub fn disadvantage(&mut self, n: i64) -> Result<i64> {
        self.roll_n(n)?.into_iter().min().ok_or(Error::ZeroCount)
    }

    /// Roll, then keep rolling while the highest face comes up. Returns
    /// every roll; all but the last equal the highest face.
    pub fn explode(&mut self) -> Result<Vec<i64>> {
        self.explode_at(self.max())
    }

    /// Roll, then keep rolling while the result is at least `threshold`.
    pub fn explode_at(&mut self, threshold: i64) -> Result<Vec<i64>> {
        self.explode_guard(threshold)?;

        let mut rolls = Vec::new();
        loop {
            let value = self.roll();
            rolls.push(value);
            if value < threshold {
                break;
            }
        }
        trace!(threshold, explosions = rolls.len() - 1, "exploded");
        Ok(rolls)
    }

    // Exploding only stops on a roll below the threshold, so one must be possible.
    fn explode_guard(&self, threshold: i64) -> Result<()> {
        if self.face_set().reachable().any(|&face| face < threshold) {
            Ok(())
        } else {
            Err(Error::DegenerateExploding(threshold))
        }
    }

    /// Roll, rerolling if the result is not higher than `value`.
    ///
    /// With `once`, at most one reroll happens and its result stands.
    /// Otherwise the die is rerolled until it beats `value`.
    pub fn reroll(&mut self, value: i64, once: bool) -> Result<i64> {
        self.validate_reroll(value, once)?;

        let mut roll = self.roll();
        while roll <= value {
            roll = self.roll();
            if once {
                break;
            }
        }
        trace!(value, once, roll, "rerolled");
        Ok(roll)
    }

    pub(crate) fn validate_reroll(&self, value: i64, once: bool) -> Result<()> {
        if value >= self.max()
            || (!once && !self.face_set().reachable().any(|&face| face > value))
        {
            return Err(Error::RerollThreshold(value));
        }
        Ok(())
    }

    /// Roll `n` times and count the rolls that meet or beat `value`.
    pub fn target(&mut self, n: i64, value: i64) -> Result<usize> {
        let rolls = self.roll_n(n)?;
        Ok(rolls.into_iter().filter(|&roll| roll >= value).count())
    }

    /// Roll `n` times and keep the `keep` highest results, highest first.
    pub fn keep_highest(&mut self, n: i64, keep: i64) -> Result<Vec<i64>> {
        let mut rolls = self.keep_rolls(n, keep)?;
        rolls.sort_unstable_by(|a, b| b.cmp(a));
        rolls.truncate(keep as usize);
        Ok(rolls)
    }

    /// Roll `n` times and keep the `keep` lowest results, lowest first.
    pub fn keep_lowest(&mut self, n: i64, keep: i64) -> Result<Vec<i64>> {
        let mut rolls = self.keep_rolls(n, keep)?;
        rolls.sort_unstable();
        rolls.truncate(keep as usize);
        Ok(rolls)
    }

    fn keep_rolls(&mut self, n: i64, keep: i64) -> Result<Vec<i64>> {
        count(n)?;
        count(keep)?;
        if keep > n {
            return Err(Error::InvalidKeep { keep, count: n });
        }
        self.roll_n(n)
    }

    /// Evaluate a difficulty check and report how it was decided.
    pub fn check_detailed(&mut self, check: &Check) -> Result<CheckOutcome> {
        let roll = self.roll_with(check.method)?;
        let total = roll.saturating_add(check.modifier);

        let critical = match check.crits {
            true if roll == self.max() => Some(Critical::Success),
            true if roll == self.min() => Some(Critical::Failure),
            _ => None,
        };
        let success = match critical {
            Some(Critical::Success) => true,
            Some(Critical::Failure) => false,
            None => i128::from(roll) + i128::from(check.modifier) >= i128::from(check.dc),
        };

        trace!(dc = check.dc, roll, total, success, ?critical, "checked");
        Ok(CheckOutcome {
            roll,
            total,
            success,
            critical,
        })
    }

    /// Evaluate a difficulty check.
    pub fn check(&mut self, check: &Check) -> Result<bool> {
        Ok(self.check_detailed(check)?.success)
    }

    /// A plain roll against `dc`, no modifier and no crits.
    pub fn dc(&mut self, dc: i64) -> Result<bool> {
        self.check(&Check::new(dc))
    }
}
