// ABOUTME: Core library for building and rolling custom and weighted dice.
// ABOUTME: Supports roll methods, difficulty checks, text/JSON interchange, and simulation.

//! # Dicebag
//!
//! Dice with arbitrary faces, optional per-face weights, and their own
//! seedable RNG.
//!
//! ## Quick Start
//!
//! ```
//! use dicebag::{Check, Die, RollMethod};
//!
//! // A standard d20, seeded for reproducible rolls
//! let mut d20 = Die::standard_with_seed(20, 42).unwrap();
//! let roll = d20.roll_with(RollMethod::Advantage).unwrap();
//! assert!((1..=20).contains(&roll));
//!
//! // Difficulty check: natural 20 always passes, natural 1 always fails
//! let passed = d20.check(&Check::new(15).modifier(3).crits(true)).unwrap();
//! println!("passed: {}", passed);
//!
//! // A loaded die, written as faces:weights
//! let loaded = dicebag::parse("1,2,3:1,1,2").unwrap();
//! assert_eq!(loaded.to_string(), "1,2,3:1,1,2");
//! ```
//!
//! ## Text Format
//!
//! - Plain die: `1,2,3,4,5,6`
//! - Weighted die: `1,2,3:1,1,2` (face 3 is twice as likely as 1 or 2)
//! - Collections: one die per line
//! - JSON records (`{"faces": [...], "weights": [...], "seed": n}`) via [`Format::Json`]

pub mod dice;
pub mod die;
pub mod error;
pub mod faces;
pub mod format;
pub mod method;
pub mod parser;
pub mod roller;
pub mod sim;

pub use dice::Dice;
pub use die::Die;
pub use error::{Error, Result};
pub use faces::FaceSet;
pub use format::Format;
pub use method::{Check, CheckOutcome, Critical, RollMethod};
pub use roller::{FastRng, Rng};
pub use sim::{simulate, simulate_seeded, SimResult};

/// Parse a die from its delimited form.
///
/// # Examples
///
/// ```
/// let die = dicebag::parse("1,2,3:1,1,2").unwrap();
/// assert_eq!(die.faces(), &[1, 2, 3]);
/// assert_eq!(die.weights(), Some(&[1, 1, 2][..]));
/// ```
pub fn parse(input: &str) -> Result<Die> {
    parser::parse(input)
}

/// Parse a die and roll it once.
///
/// # Examples
///
/// ```
/// let value = dicebag::roll("2,4,6").unwrap();
/// assert!([2, 4, 6].contains(&value));
/// ```
pub fn roll(input: &str) -> Result<i64> {
    Ok(parser::parse(input)?.roll())
}

/// Parse a die and roll it once with a custom RNG.
///
/// Useful for testing or when you need reproducible results.
///
/// # Examples
///
/// ```
/// use dicebag::{roll_with_rng, FastRng};
///
/// let mut rng = FastRng::with_seed(42);
/// let value = roll_with_rng("1,2,3,4,5,6", &mut rng).unwrap();
/// assert!((1..=6).contains(&value));
/// ```
pub fn roll_with_rng(input: &str, rng: &mut impl Rng) -> Result<i64> {
    let faces = parser::parse_face_set(input)?;
    Ok(Die::from_face_set(faces, rng).roll())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roll_basic() {
        let value = roll("1,2,3,4,5,6").unwrap();
        assert!((1..=6).contains(&value));
    }

    #[test]
    fn test_roll_seeded() {
        let mut rng = FastRng::with_seed(42);
        let first = roll_with_rng("1,2,3,4", &mut rng).unwrap();

        let mut rng = FastRng::with_seed(42);
        let second = roll_with_rng("1,2,3,4", &mut rng).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_seeded_die_repeats_across_construction() {
        let first = Die::with_seed(vec![1, 2, 3, 4], 42).unwrap().roll();
        let second = Die::with_seed(vec![1, 2, 3, 4], 42).unwrap().roll();
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse() {
        let die = parse("1,2,3").unwrap();
        assert_eq!(die.faces(), &[1, 2, 3]);
        assert_eq!(die.weights(), None);
    }

    #[test]
    fn test_roll_errors() {
        assert_eq!(roll(""), Err(Error::EmptyInput));
        assert!(matches!(roll("1;2"), Err(Error::MalformedInput(_))));
    }

    #[test]
    fn test_simulate_integration() {
        let result = simulate("1,2,3,4,5,6", RollMethod::Normal, 1000).unwrap();
        assert!(result.min >= 1);
        assert!(result.max <= 6);
        assert!((result.mean - 3.5).abs() < 0.5);
    }
}
