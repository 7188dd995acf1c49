// ABOUTME: An ordered collection of dice that fans each operation out to every die.
// ABOUTME: Results are die-major: each die finishes its rolls before the next starts.

use crate::die::{count, Die};
use crate::error::{Error, Result};
use crate::method::{Check, RollMethod};
use crate::roller::{FastRng, Rng};
use std::fmt;
use std::ops::Deref;

/// Line ending used when writing a collection, one die per line.
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// An ordered bag of independent dice.
#[derive(Debug)]
pub struct Dice<T = i64, R = FastRng> {
    dice: Vec<Die<T, R>>,
}

impl<T, R> Dice<T, R> {
    pub fn new() -> Self {
        Self { dice: Vec::new() }
    }

    pub fn push(&mut self, die: Die<T, R>) {
        self.dice.push(die);
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Die<T, R>> {
        self.dice.iter_mut()
    }
}

impl<T, R> Default for Dice<T, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, R> Deref for Dice<T, R> {
    type Target = [Die<T, R>];

    fn deref(&self) -> &Self::Target {
        &self.dice
    }
}

impl<T, R> FromIterator<Die<T, R>> for Dice<T, R> {
    fn from_iter<I: IntoIterator<Item = Die<T, R>>>(iter: I) -> Self {
        Self {
            dice: iter.into_iter().collect(),
        }
    }
}

impl<T, R> IntoIterator for Dice<T, R> {
    type Item = Die<T, R>;
    type IntoIter = std::vec::IntoIter<Die<T, R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.dice.into_iter()
    }
}

impl<'a, T, R> IntoIterator for &'a Dice<T, R> {
    type Item = &'a Die<T, R>;
    type IntoIter = std::slice::Iter<'a, Die<T, R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.dice.iter()
    }
}

impl<T, R> From<Vec<Die<T, R>>> for Dice<T, R> {
    fn from(dice: Vec<Die<T, R>>) -> Self {
        Self { dice }
    }
}

impl Dice {
    /// Add `n` standard dice with faces `1..=size`.
    pub fn push_standard(&mut self, n: i64, size: usize) -> Result<&mut Self> {
        let n = count(n)?;
        if size < 2 {
            return Err(Error::InvalidSize(size));
        }
        for _ in 0..n {
            self.dice.push(Die::standard(size)?);
        }
        Ok(self)
    }
}

impl<T: Clone> Dice<T, FastRng> {
    /// A new collection holding two fresh, unseeded copies of every die.
    pub fn doubled(&self) -> Self {
        self.dice
            .iter()
            .flat_map(|die| {
                [
                    Die::from_faces(die.face_set().clone(), None),
                    Die::from_faces(die.face_set().clone(), None),
                ]
            })
            .collect()
    }
}

impl<T: Clone, R: Rng> Dice<T, R> {
    /// Roll every die once.
    pub fn roll(&mut self) -> Vec<T> {
        self.dice.iter_mut().map(Die::roll).collect()
    }

    /// Roll every die `n` times.
    pub fn roll_n(&mut self, n: i64) -> Result<Vec<T>> {
        let n = count(n)?;
        let mut rolls = Vec::with_capacity(n * self.dice.len());
        for die in &mut self.dice {
            rolls.extend((0..n).map(|_| die.roll()));
        }
        Ok(rolls)
    }
}

impl<R: Rng> Dice<i64, R> {
    /// Roll every die once using `method`.
    pub fn roll_with(&mut self, method: RollMethod) -> Result<Vec<i64>> {
        self.validate_method(method)?;
        self.dice.iter_mut().map(|die| die.roll_with(method)).collect()
    }

    /// Roll every die `n` times using `method`.
    pub fn roll_n_with(&mut self, n: i64, method: RollMethod) -> Result<Vec<i64>> {
        count(n)?;
        self.validate_method(method)?;
        let mut rolls = Vec::new();
        for die in &mut self.dice {
            rolls.extend(die.roll_n_with(n, method)?);
        }
        Ok(rolls)
    }

    /// Best of `n` rolls for every die.
    pub fn advantage(&mut self, n: i64) -> Result<Vec<i64>> {
        keep_count(n)?;
        self.dice.iter_mut().map(|die| die.advantage(n)).collect()
    }

    /// Worst of `n` rolls for every die.
    pub fn disadvantage(&mut self, n: i64) -> Result<Vec<i64>> {
        keep_count(n)?;
        self.dice.iter_mut().map(|die| die.disadvantage(n)).collect()
    }

    /// Roll every die, rerolling results not higher than `value`.
    pub fn reroll(&mut self, value: i64, once: bool) -> Result<Vec<i64>> {
        for die in &self.dice {
            die.validate_reroll(value, once)?;
        }
        self.dice.iter_mut().map(|die| die.reroll(value, once)).collect()
    }

    /// For every die, how many of `n` rolls meet or beat `value`.
    pub fn target(&mut self, n: i64, value: i64) -> Result<Vec<usize>> {
        count(n)?;
        self.dice.iter_mut().map(|die| die.target(n, value)).collect()
    }

    /// Evaluate `check` once with every die.
    pub fn check(&mut self, check: &Check) -> Result<Vec<bool>> {
        self.validate_method(check.method)?;
        self.dice.iter_mut().map(|die| die.check(check)).collect()
    }

    // Every die is checked before any of them rolls.
    fn validate_method(&self, method: RollMethod) -> Result<()> {
        self.dice.iter().try_for_each(|die| die.validate_method(method))
    }
}

fn keep_count(n: i64) -> Result<usize> {
    match count(n)? {
        0 => Err(Error::ZeroCount),
        n => Ok(n),
    }
}

impl<T: fmt::Display, R> fmt::Display for Dice<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, die) in self.dice.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", LINE_ENDING)?;
            }
            write!(f, "{}", die)?;
        }
        Ok(())
    }
}
